//! Users table and the `User` type.
//!
//! Entries reference their owner by `id` only.

use core::fmt;

use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{EngineError, ResultEngine};

/// A registered user. `password` holds the bcrypt hash once stored.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    /// The user id, or [`EngineError::MissingId`] for a user never persisted.
    pub fn require_id(&self) -> ResultEngine<i64> {
        self.id.ok_or_else(|| EngineError::MissingId("user".to_string()))
    }
}

// Keeps the password (even hashed) out of logs.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::entry::Entity")]
    Entries,
}

impl Related<super::entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            email: model.email,
            password: model.password,
        }
    }
}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            id: match user.id {
                Some(id) => ActiveValue::Set(id),
                None => ActiveValue::NotSet,
            },
            name: ActiveValue::Set(user.name.clone()),
            email: ActiveValue::Set(user.email.clone()),
            password: ActiveValue::Set(user.password.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_password() {
        let user = User::new("Ana", "ana@example.com", "s3cret");
        let printed = format!("{user:?}");
        assert!(printed.contains("ana@example.com"));
        assert!(!printed.contains("s3cret"));
    }
}
