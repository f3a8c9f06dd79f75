use api_types::Error;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{ServerState, router, run_with_listener};

mod entries;
mod server;
mod users;

pub mod types {
    pub mod user {
        pub use api_types::user::{UserLogin, UserNew, UserView};
    }

    pub mod entry {
        pub use api_types::entry::{EntryPayload, EntryQuery, EntryView, StatusUpdate};
        pub use api_types::{EntryKind, EntryStatus};
    }

    pub mod balance {
        pub use api_types::balance::Balance;
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    /// Bad request data caught by the handlers themselves.
    Generic(String),
    NotFound(String),
    /// A stored value the API cannot represent.
    Internal(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidEntry(_) | EngineError::InvalidValue(_) => StatusCode::BAD_REQUEST,
        EngineError::Authentication(_) => StatusCode::UNAUTHORIZED,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::MissingId(_) | EngineError::Hashing(_) | EngineError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::MissingId(_) | EngineError::Hashing(_) => {
            tracing::error!("{err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::NotFound(err) => (StatusCode::NOT_FOUND, err),
            ServerError::Internal(err) => {
                tracing::error!("{err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
