//! The module contains the `Entry` type: a single income or expense owned by a
//! user.
//!
//! Every field is optional so that a half-filled entry (coming from a form, or
//! used as a search example) can be represented and validated. Only entries
//! passing [`validate`](crate::validate) reach the store.
use core::fmt;

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{EngineError, MoneyCents, ResultEngine, User};

/// Whether an entry adds to or takes from the balance. Fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

impl TryFrom<&str> for EntryKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            other => Err(EngineError::InvalidValue(format!(
                "invalid entry kind: {other}"
            ))),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of an entry. Only `Confirmed` entries count in the balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl EntryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl TryFrom<&str> for EntryStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(EngineError::InvalidValue(format!(
                "invalid entry status: {other}"
            ))),
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to the user owning an entry.
///
/// An owner without an id counts as no owner at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Owner {
    pub id: Option<i64>,
}

impl Owner {
    pub fn new(id: i64) -> Self {
        Self { id: Some(id) }
    }
}

impl From<&User> for Owner {
    fn from(user: &User) -> Self {
        Self { id: user.id }
    }
}

/// An income or an expense.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    /// Assigned by the store on insert, `None` before.
    pub id: Option<i64>,
    pub description: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub amount: Option<MoneyCents>,
    pub kind: Option<EntryKind>,
    pub status: Option<EntryStatus>,
    /// Set on first save and never changed afterwards.
    pub registered_on: Option<NaiveDate>,
    pub owner: Option<Owner>,
}

impl Entry {
    /// Build an unsaved entry with every required field set.
    pub fn new(
        description: &str,
        month: u32,
        year: i32,
        amount: MoneyCents,
        kind: EntryKind,
        owner_id: i64,
    ) -> Self {
        Self {
            id: None,
            description: Some(description.to_string()),
            month: Some(month),
            year: Some(year),
            amount: Some(amount),
            kind: Some(kind),
            status: None,
            registered_on: None,
            owner: Some(Owner::new(owner_id)),
        }
    }

    /// The owner's id, if both the owner and its id are present.
    pub fn owner_id(&self) -> Option<i64> {
        self.owner.and_then(|owner| owner.id)
    }

    /// The entry id, or [`EngineError::MissingId`] for an entry never
    /// persisted.
    pub fn require_id(&self) -> ResultEngine<i64> {
        self.id.ok_or_else(|| EngineError::MissingId("entry".to_string()))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.amount.unwrap_or_default();
        let description = self.description.as_deref().unwrap_or("-");
        match (self.month, self.year) {
            (Some(month), Some(year)) => write!(f, "{amount} {description} {month:02}/{year}"),
            _ => write!(f, "{amount} {description}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub description: String,
    pub month: i32,
    pub year: i32,
    pub amount_minor: i64,
    pub kind: String,
    pub status: String,
    pub registered_on: Date,
    pub user_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Entry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let month = u32::try_from(model.month)
            .map_err(|_| EngineError::InvalidValue(format!("invalid month: {}", model.month)))?;
        Ok(Self {
            id: Some(model.id),
            description: Some(model.description),
            month: Some(month),
            year: Some(model.year),
            amount: Some(MoneyCents::new(model.amount_minor)),
            kind: Some(EntryKind::try_from(model.kind.as_str())?),
            status: Some(EntryStatus::try_from(model.status.as_str())?),
            registered_on: Some(model.registered_on),
            owner: Some(Owner::new(model.user_id)),
        })
    }
}

fn required<T>(value: Option<T>, field: &str) -> ResultEngine<T> {
    value.ok_or_else(|| EngineError::InvalidValue(format!("entry {field} is required")))
}

impl TryFrom<&Entry> for ActiveModel {
    type Error = EngineError;

    /// Maps every column. The id is left unset for entries not yet stored so
    /// the database assigns it, and so is a missing registration date.
    fn try_from(entry: &Entry) -> Result<Self, Self::Error> {
        let month = required(entry.month, "month")?;
        let month = i32::try_from(month)
            .map_err(|_| EngineError::InvalidValue(format!("invalid month: {month}")))?;
        Ok(Self {
            id: match entry.id {
                Some(id) => ActiveValue::Set(id),
                None => ActiveValue::NotSet,
            },
            description: ActiveValue::Set(required(entry.description.clone(), "description")?),
            month: ActiveValue::Set(month),
            year: ActiveValue::Set(required(entry.year, "year")?),
            amount_minor: ActiveValue::Set(required(entry.amount, "amount")?.cents()),
            kind: ActiveValue::Set(required(entry.kind, "kind")?.as_str().to_string()),
            status: ActiveValue::Set(required(entry.status, "status")?.as_str().to_string()),
            registered_on: match entry.registered_on {
                Some(date) => ActiveValue::Set(date),
                None => ActiveValue::NotSet,
            },
            user_id: ActiveValue::Set(required(entry.owner_id(), "owner")?),
        })
    }
}
