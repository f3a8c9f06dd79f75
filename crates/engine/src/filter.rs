//! Search by example.
//!
//! An [`EntryFilter`] keeps only the fields set on the example entry; unset
//! fields match anything. Stores either evaluate [`EntryFilter::matches`] or
//! translate the same fields into a query condition.

use sea_orm::{
    ColumnTrait, Condition,
    sea_query::{Expr, Func, LikeExpr},
};

use crate::{Entry, EntryKind, EntryStatus, entry};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryFilter {
    /// Case-insensitive substring of the description.
    pub description: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub kind: Option<EntryKind>,
    pub status: Option<EntryStatus>,
    pub owner_id: Option<i64>,
}

impl EntryFilter {
    /// Build a filter from whichever searchable fields are set on `example`.
    ///
    /// A blank description is treated as unset.
    pub fn from_example(example: &Entry) -> Self {
        Self {
            description: example
                .description
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string),
            month: example.month,
            year: example.year,
            kind: example.kind,
            status: example.status,
            owner_id: example.owner_id(),
        }
    }

    pub fn owner(mut self, owner_id: i64) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn status(mut self, status: EntryStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// `true` when every set field matches `entry`.
    pub fn matches(&self, entry: &Entry) -> bool {
        let description_matches = match (&self.description, &entry.description) {
            (None, _) => true,
            (Some(needle), Some(haystack)) => haystack
                .to_lowercase()
                .contains(needle.to_lowercase().as_str()),
            (Some(_), None) => false,
        };

        description_matches
            && field_matches(self.month, entry.month)
            && field_matches(self.year, entry.year)
            && field_matches(self.kind, entry.kind)
            && field_matches(self.status, entry.status)
            && field_matches(self.owner_id, entry.owner_id())
    }

    /// The same predicate as [`matches`](Self::matches), as a SQL condition
    /// over the `entries` table.
    pub(crate) fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(description) = &self.description {
            let pattern = format!("%{}%", escape_like(&description.to_lowercase()));
            condition = condition.add(
                Expr::expr(Func::lower(Expr::col(entry::Column::Description)))
                    .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
            );
        }
        if let Some(month) = self.month {
            condition = condition.add(entry::Column::Month.eq(month));
        }
        if let Some(year) = self.year {
            condition = condition.add(entry::Column::Year.eq(year));
        }
        if let Some(kind) = self.kind {
            condition = condition.add(entry::Column::Kind.eq(kind.as_str()));
        }
        if let Some(status) = self.status {
            condition = condition.add(entry::Column::Status.eq(status.as_str()));
        }
        if let Some(owner_id) = self.owner_id {
            condition = condition.add(entry::Column::UserId.eq(owner_id));
        }
        condition
    }
}

const LIKE_ESCAPE: char = '!';

/// Escape the `LIKE` wildcards so the needle only matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, LIKE_ESCAPE | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

fn field_matches<T: PartialEq>(wanted: Option<T>, actual: Option<T>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual == Some(wanted),
    }
}
