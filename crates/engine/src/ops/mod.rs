use sea_orm::DatabaseConnection;

use crate::{
    ResultEngine,
    store::{SeaOrmEntryStore, SeaOrmUserStore},
};

mod entries;
mod users;

pub use entries::{EntryService, StatusTransitionPolicy};
pub use users::{EMAIL_TAKEN, INVALID_PASSWORD, USER_NOT_FOUND, UserService};

/// Entry and user services sharing one database connection.
#[derive(Debug)]
pub struct Engine {
    entries: EntryService<SeaOrmEntryStore>,
    users: UserService<SeaOrmUserStore>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn entries(&self) -> &EntryService<SeaOrmEntryStore> {
        &self.entries
    }

    pub fn users(&self) -> &UserService<SeaOrmUserStore> {
        &self.users
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    status_policy: StatusTransitionPolicy,
    password_cost: Option<u32>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    pub fn status_policy(mut self, policy: StatusTransitionPolicy) -> EngineBuilder {
        self.status_policy = policy;
        self
    }

    /// bcrypt cost for new passwords, `bcrypt::DEFAULT_COST` if not set.
    pub fn password_cost(mut self, cost: u32) -> EngineBuilder {
        self.password_cost = Some(cost);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        let entries = EntryService::new(SeaOrmEntryStore::new(self.database.clone()))
            .with_status_policy(self.status_policy);
        let mut users = UserService::new(SeaOrmUserStore::new(self.database));
        if let Some(cost) = self.password_cost {
            users = users.with_password_cost(cost);
        }
        Ok(Engine { entries, users })
    }
}
