use axum::{
    Router,
    routing::{get, post, put},
};

use std::sync::Arc;

use crate::{entries, users};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// All API routes over `engine`.
pub fn router(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    Router::new()
        .route("/api/users", post(users::register))
        .route("/api/users/authenticate", post(users::authenticate))
        .route("/api/users/{id}/balance", get(users::balance))
        .route("/api/entries", get(entries::search).post(entries::create))
        .route(
            "/api/entries/{id}",
            get(entries::get).put(entries::update).delete(entries::delete),
        )
        .route("/api/entries/{id}/status", put(entries::update_status))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine)).await
}
