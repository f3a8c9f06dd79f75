//! Persistence seams used by the services.
//!
//! The services only talk to these traits; [`SeaOrmEntryStore`] and
//! [`SeaOrmUserStore`] are the database-backed implementations.

use async_trait::async_trait;

use crate::{Entry, EntryFilter, EntryKind, EntryStatus, MoneyCents, ResultEngine, User};

mod database;

pub use database::{SeaOrmEntryStore, SeaOrmUserStore};

#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Persist a new entry and return it with its generated id.
    async fn insert(&self, entry: &Entry) -> ResultEngine<Entry>;

    /// Overwrite a stored entry. The registration date is kept as stored.
    async fn update(&self, entry: &Entry) -> ResultEngine<Entry>;

    /// Write only the status column of a stored entry and return the stored
    /// entry. Every other column is left as stored.
    async fn update_status(&self, id: i64, status: EntryStatus) -> ResultEngine<Entry>;

    async fn delete(&self, entry: &Entry) -> ResultEngine<()>;

    async fn find_by_id(&self, id: i64) -> ResultEngine<Option<Entry>>;

    /// Every entry matching `filter`, in insertion order.
    async fn find_matching(&self, filter: &EntryFilter) -> ResultEngine<Vec<Entry>>;

    /// Sum of the amounts of a user's entries of one kind and status, `None`
    /// when there is none.
    async fn sum_by_type_status_user(
        &self,
        user_id: i64,
        kind: EntryKind,
        status: EntryStatus,
    ) -> ResultEngine<Option<MoneyCents>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> ResultEngine<Option<User>>;

    async fn find_by_email(&self, email: &str) -> ResultEngine<Option<User>>;

    async fn exists_by_email(&self, email: &str) -> ResultEngine<bool>;

    /// Insert a user without id, update one with id.
    async fn save(&self, user: &User) -> ResultEngine<User>;
}
