use serde::{Deserialize, Serialize};

use crate::{
    Entry, EntryFilter, EntryKind, EntryStatus, EngineError, MoneyCents, ResultEngine,
    store::EntryStore, validate,
};

/// How [`EntryService::transition_status`] writes the new status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTransitionPolicy {
    /// Go through [`EntryService::update`]: the whole entry is validated
    /// again, so an otherwise invalid entry cannot change status.
    #[default]
    Revalidate,
    /// Write only the status column, without validating the other fields.
    /// Other changes made to the entry in memory are not persisted.
    SkipValidation,
}

/// Entry lifecycle operations and the balance.
///
/// Every create and full update validates the entry before the store is
/// touched; a rejected entry never reaches the store.
#[derive(Debug)]
pub struct EntryService<S> {
    store: S,
    status_policy: StatusTransitionPolicy,
}

impl<S: EntryStore> EntryService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            status_policy: StatusTransitionPolicy::default(),
        }
    }

    pub fn with_status_policy(mut self, policy: StatusTransitionPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    /// Validate and insert a new entry.
    ///
    /// The status is forced to `Pending` whatever the caller set, and the
    /// registration date is stamped with today's date when missing. Both
    /// changes are visible on `entry`.
    pub async fn save(&self, entry: &mut Entry) -> ResultEngine<Entry> {
        validate(entry)?;

        entry.status = Some(EntryStatus::Pending);
        if entry.registered_on.is_none() {
            entry.registered_on = Some(chrono::Utc::now().date_naive());
        }

        let stored = self.store.insert(entry).await?;
        tracing::info!(entry_id = ?stored.id, "entry saved: {stored}");
        Ok(stored)
    }

    /// Validate and overwrite a stored entry.
    ///
    /// Fails with [`EngineError::MissingId`] for an entry never persisted,
    /// before any validation.
    pub async fn update(&self, entry: &Entry) -> ResultEngine<Entry> {
        entry.require_id()?;
        validate(entry)?;
        self.store.update(entry).await
    }

    /// Remove a stored entry. No validation: nothing is written.
    pub async fn delete(&self, entry: &Entry) -> ResultEngine<()> {
        let id = entry.require_id()?;
        self.store.delete(entry).await?;
        tracing::info!(entry_id = id, "entry deleted: {entry}");
        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> ResultEngine<Option<Entry>> {
        self.store.find_by_id(id).await
    }

    /// Entries matching every field set on `example`.
    pub async fn search(&self, example: &Entry) -> ResultEngine<Vec<Entry>> {
        self.find_matching(&EntryFilter::from_example(example)).await
    }

    pub async fn find_matching(&self, filter: &EntryFilter) -> ResultEngine<Vec<Entry>> {
        self.store.find_matching(filter).await
    }

    /// Set `entry.status` and write the entry, according to the configured
    /// [`StatusTransitionPolicy`].
    ///
    /// The status is changed on `entry` even when the write fails.
    pub async fn transition_status(
        &self,
        entry: &mut Entry,
        status: EntryStatus,
    ) -> ResultEngine<Entry> {
        entry.status = Some(status);
        match self.status_policy {
            StatusTransitionPolicy::Revalidate => self.update(entry).await,
            StatusTransitionPolicy::SkipValidation => {
                let id = entry.require_id()?;
                self.store.update_status(id, status).await
            }
        }
    }

    /// Confirmed incomes minus confirmed expenses of a user.
    ///
    /// Pending and cancelled entries are ignored.
    pub async fn compute_balance(&self, user_id: i64) -> ResultEngine<MoneyCents> {
        let income = self
            .store
            .sum_by_type_status_user(user_id, EntryKind::Income, EntryStatus::Confirmed)
            .await?
            .unwrap_or_default();
        let expense = self
            .store
            .sum_by_type_status_user(user_id, EntryKind::Expense, EntryStatus::Confirmed)
            .await?
            .unwrap_or_default();

        income
            .checked_sub(expense)
            .ok_or_else(|| EngineError::InvalidValue(format!("balance overflow for user {user_id}")))
    }
}
