//! User API endpoints

use api_types::{
    balance::Balance,
    user::{UserLogin, UserNew, UserView},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::User;

use crate::{ServerError, server::ServerState};

fn user_view(user: User) -> Result<UserView, ServerError> {
    Ok(UserView {
        id: user.require_id()?,
        name: user.name,
        email: user.email,
    })
}

/// Register a new user
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let user = User::new(&payload.name, &payload.email, &payload.password);
    let stored = state.engine.users().register(&user).await?;

    Ok((StatusCode::CREATED, Json(user_view(stored)?)))
}

pub async fn authenticate(
    State(state): State<ServerState>,
    Json(payload): Json<UserLogin>,
) -> Result<Json<UserView>, ServerError> {
    let user = state
        .engine
        .users()
        .authenticate(&payload.email, &payload.password)
        .await?;

    Ok(Json(user_view(user)?))
}

/// Confirmed balance of a user
pub async fn balance(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Balance>, ServerError> {
    if state.engine.users().find_by_id(id).await?.is_none() {
        return Err(ServerError::NotFound(format!("user {id} not found")));
    }

    let balance = state.engine.entries().compute_balance(id).await?;

    Ok(Json(Balance {
        user_id: id,
        balance_minor: balance.cents(),
    }))
}
