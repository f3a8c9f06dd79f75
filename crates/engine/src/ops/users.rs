use sea_orm::SqlErr;

use crate::{EngineError, ResultEngine, User, store::UserStore};

pub const EMAIL_TAKEN: &str = "Já existe um usuário cadastrado com este email.";
pub const USER_NOT_FOUND: &str = "Usuário não encontrado para o email informado!";
pub const INVALID_PASSWORD: &str = "Senha inválida!";

/// Registration and login of users.
#[derive(Debug)]
pub struct UserService<U> {
    store: U,
    password_cost: u32,
}

impl<U: UserStore> UserService<U> {
    pub fn new(store: U) -> Self {
        Self {
            store,
            password_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// bcrypt cost used by [`register`](Self::register).
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    /// Fails with [`EngineError::ExistingKey`] when the email is taken.
    pub async fn validate_email(&self, email: &str) -> ResultEngine<()> {
        if self.store.exists_by_email(email).await? {
            return Err(EngineError::ExistingKey(EMAIL_TAKEN.to_string()));
        }
        Ok(())
    }

    /// Store a new user. `user.password` is the plain text password, only its
    /// hash is persisted.
    pub async fn register(&self, user: &User) -> ResultEngine<User> {
        self.validate_email(&user.email).await?;

        let hashed = bcrypt::hash(&user.password, self.password_cost)
            .map_err(|err| EngineError::Hashing(err.to_string()))?;
        let new_user = User {
            id: None,
            password: hashed,
            ..user.clone()
        };
        // A concurrent registration can pass the check above and still lose
        // on the unique index.
        let stored = match self.store.save(&new_user).await {
            Err(EngineError::Database(err))
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
            {
                return Err(EngineError::ExistingKey(EMAIL_TAKEN.to_string()));
            }
            result => result?,
        };

        tracing::info!(user_id = ?stored.id, "user registered");
        Ok(stored)
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> ResultEngine<User> {
        let Some(user) = self.store.find_by_email(email).await? else {
            tracing::warn!("authentication failed: unknown email");
            return Err(EngineError::Authentication(USER_NOT_FOUND.to_string()));
        };

        // A malformed stored hash counts as a wrong password.
        if !bcrypt::verify(password, &user.password).unwrap_or(false) {
            tracing::warn!(user_id = ?user.id, "authentication failed: wrong password");
            return Err(EngineError::Authentication(INVALID_PASSWORD.to_string()));
        }

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> ResultEngine<Option<User>> {
        self.store.find_by_id(id).await
    }
}
