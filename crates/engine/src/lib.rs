//! Personal finance entries: incomes and expenses owned by users.
//!
//! [`Engine`] bundles the two services, [`EntryService`] and [`UserService`],
//! over a sea-orm database. The services only depend on the [`EntryStore`] and
//! [`UserStore`] traits, so they can run over any store.

pub use entry::{Entry, EntryKind, EntryStatus, Owner};
pub use error::EngineError;
pub use filter::EntryFilter;
pub use money::{MALFORMED_AMOUNT, MoneyCents};
pub use ops::{
    EMAIL_TAKEN, Engine, EngineBuilder, EntryService, INVALID_PASSWORD, StatusTransitionPolicy,
    USER_NOT_FOUND, UserService,
};
pub use store::{EntryStore, SeaOrmEntryStore, SeaOrmUserStore, UserStore};
pub use users::User;
pub use validation::{
    INVALID_AMOUNT, INVALID_DESCRIPTION, INVALID_MONTH, INVALID_YEAR, MISSING_KIND, MISSING_USER,
    validate,
};

mod entry;
mod error;
mod filter;
mod money;
mod ops;
mod store;
mod users;
mod validation;

pub type ResultEngine<T> = Result<T, EngineError>;
