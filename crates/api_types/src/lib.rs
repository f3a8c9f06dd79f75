use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether an entry adds to or takes from the balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    Income,
    Expense,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    Pending,
    Confirmed,
    Cancelled,
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserLogin {
        pub email: String,
        pub password: String,
    }

    /// A user as returned by the server. The password never leaves it.
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserView {
        pub id: i64,
        pub name: String,
        pub email: String,
    }
}

pub mod entry {
    use super::*;

    /// Body of entry create and update requests.
    ///
    /// Every field is optional so that incomplete entries reach the server
    /// validation and get its message back.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EntryPayload {
        pub description: Option<String>,
        pub month: Option<u32>,
        pub year: Option<i32>,
        /// Decimal amount, `.` or `,` as separator and at most two
        /// decimals (`"10,50"`).
        pub amount: Option<String>,
        pub kind: Option<EntryKind>,
        /// Ignored on create: new entries are always `PENDING`.
        pub status: Option<EntryStatus>,
        pub user_id: Option<i64>,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct EntryView {
        pub id: i64,
        pub description: String,
        pub month: u32,
        pub year: i32,
        pub amount_minor: i64,
        /// `amount_minor` formatted as a decimal (`"10.50"`).
        pub amount: String,
        pub kind: EntryKind,
        pub status: EntryStatus,
        pub registered_on: NaiveDate,
        pub user_id: i64,
    }

    /// Query string of the entry search. `user` is required, the other
    /// fields narrow the result when present.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EntryQuery {
        pub description: Option<String>,
        pub month: Option<u32>,
        pub year: Option<i32>,
        pub kind: Option<EntryKind>,
        pub status: Option<EntryStatus>,
        pub user: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatusUpdate {
        pub status: EntryStatus,
    }
}

pub mod balance {
    use super::*;

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Balance {
        pub user_id: i64,
        /// Confirmed incomes minus confirmed expenses, in cents. May be
        /// negative.
        pub balance_minor: i64,
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Error {
    pub error: String,
}
