//! sea-orm backed stores.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue, QueryFilter, QueryOrder, QuerySelect, prelude::*, sea_query::Expr,
};

use crate::{
    Entry, EntryFilter, EntryKind, EntryStatus, EngineError, MoneyCents, ResultEngine, User,
    entry, users,
};

use super::{EntryStore, UserStore};

fn entry_not_found(id: i64) -> EngineError {
    EngineError::KeyNotFound(format!("entry {id}"))
}

/// [`EntryStore`] over the `entries` table.
#[derive(Clone, Debug)]
pub struct SeaOrmEntryStore {
    database: DatabaseConnection,
}

impl SeaOrmEntryStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl EntryStore for SeaOrmEntryStore {
    async fn insert(&self, entry: &Entry) -> ResultEngine<Entry> {
        let mut model = entry::ActiveModel::try_from(entry)?;
        model.id = ActiveValue::NotSet;
        if model.registered_on.is_not_set() {
            model.registered_on = ActiveValue::Set(Utc::now().date_naive());
        }
        let stored = model.insert(&self.database).await?;
        Entry::try_from(stored)
    }

    async fn update(&self, entry: &Entry) -> ResultEngine<Entry> {
        let id = entry.require_id()?;
        let mut model = entry::ActiveModel::try_from(entry)?;
        model.registered_on = ActiveValue::NotSet;
        match model.update(&self.database).await {
            Ok(stored) => Entry::try_from(stored),
            Err(DbErr::RecordNotUpdated) => Err(entry_not_found(id)),
            Err(err) => Err(err.into()),
        }
    }

    async fn update_status(&self, id: i64, status: EntryStatus) -> ResultEngine<Entry> {
        let result = entry::Entity::update_many()
            .col_expr(entry::Column::Status, Expr::value(status.as_str()))
            .filter(entry::Column::Id.eq(id))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(entry_not_found(id));
        }
        self.find_by_id(id).await?.ok_or_else(|| entry_not_found(id))
    }

    async fn delete(&self, entry: &Entry) -> ResultEngine<()> {
        let id = entry.require_id()?;
        let result = entry::Entity::delete_by_id(id).exec(&self.database).await?;
        if result.rows_affected == 0 {
            return Err(entry_not_found(id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> ResultEngine<Option<Entry>> {
        entry::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(Entry::try_from)
            .transpose()
    }

    async fn find_matching(&self, filter: &EntryFilter) -> ResultEngine<Vec<Entry>> {
        entry::Entity::find()
            .filter(filter.condition())
            .order_by_asc(entry::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Entry::try_from)
            .collect()
    }

    async fn sum_by_type_status_user(
        &self,
        user_id: i64,
        kind: EntryKind,
        status: EntryStatus,
    ) -> ResultEngine<Option<MoneyCents>> {
        let total: Option<Option<i64>> = entry::Entity::find()
            .select_only()
            .column_as(Expr::col(entry::Column::AmountMinor).sum(), "total")
            .filter(entry::Column::UserId.eq(user_id))
            .filter(entry::Column::Kind.eq(kind.as_str()))
            .filter(entry::Column::Status.eq(status.as_str()))
            .into_tuple()
            .one(&self.database)
            .await?;

        Ok(total.flatten().map(MoneyCents::new))
    }
}

/// [`UserStore`] over the `users` table.
#[derive(Clone, Debug)]
pub struct SeaOrmUserStore {
    database: DatabaseConnection,
}

impl SeaOrmUserStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl UserStore for SeaOrmUserStore {
    async fn find_by_id(&self, id: i64) -> ResultEngine<Option<User>> {
        Ok(users::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> ResultEngine<Option<User>> {
        Ok(users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?
            .map(User::from))
    }

    async fn exists_by_email(&self, email: &str) -> ResultEngine<bool> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.database)
            .await?;
        Ok(count > 0)
    }

    async fn save(&self, user: &User) -> ResultEngine<User> {
        let model = users::ActiveModel::from(user);
        let stored = match user.id {
            None => model.insert(&self.database).await?,
            Some(id) => match model.update(&self.database).await {
                Ok(stored) => stored,
                Err(DbErr::RecordNotUpdated) => {
                    return Err(EngineError::KeyNotFound(format!("user {id}")));
                }
                Err(err) => return Err(err.into()),
            },
        };
        Ok(User::from(stored))
    }
}
