//! Entry API endpoints

use api_types::{
    EntryKind as ApiKind, EntryStatus as ApiStatus,
    entry::{EntryPayload, EntryQuery, EntryView, StatusUpdate},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{Entry, EntryFilter, EntryKind, EntryStatus, MoneyCents, Owner};

use crate::{ServerError, server::ServerState};

const UNKNOWN_OWNER: &str = "Usuário não encontrado para o Id informado.";
const UNKNOWN_SEARCH_USER: &str =
    "Não foi possível realizar a consulta. Usuário não cadastrado para o Id informado.";

fn map_kind(kind: ApiKind) -> EntryKind {
    match kind {
        ApiKind::Income => EntryKind::Income,
        ApiKind::Expense => EntryKind::Expense,
    }
}

fn map_status(status: ApiStatus) -> EntryStatus {
    match status {
        ApiStatus::Pending => EntryStatus::Pending,
        ApiStatus::Confirmed => EntryStatus::Confirmed,
        ApiStatus::Cancelled => EntryStatus::Cancelled,
    }
}

fn api_kind(kind: EntryKind) -> ApiKind {
    match kind {
        EntryKind::Income => ApiKind::Income,
        EntryKind::Expense => ApiKind::Expense,
    }
}

fn api_status(status: EntryStatus) -> ApiStatus {
    match status {
        EntryStatus::Pending => ApiStatus::Pending,
        EntryStatus::Confirmed => ApiStatus::Confirmed,
        EntryStatus::Cancelled => ApiStatus::Cancelled,
    }
}

fn entry_view(entry: Entry) -> Result<EntryView, ServerError> {
    let id = entry.require_id()?;
    let missing = |field: &str| ServerError::Internal(format!("stored entry {id} has no {field}"));
    let amount = entry.amount.ok_or_else(|| missing("amount"))?;

    Ok(EntryView {
        id,
        user_id: entry.owner_id().ok_or_else(|| missing("owner"))?,
        description: entry.description.ok_or_else(|| missing("description"))?,
        month: entry.month.ok_or_else(|| missing("month"))?,
        year: entry.year.ok_or_else(|| missing("year"))?,
        amount_minor: amount.cents(),
        amount: amount.to_string(),
        kind: api_kind(entry.kind.ok_or_else(|| missing("kind"))?),
        status: api_status(entry.status.ok_or_else(|| missing("status"))?),
        registered_on: entry.registered_on.ok_or_else(|| missing("registration date"))?,
    })
}

/// Build an entry from a request body. A given user must exist; a missing one
/// is left to validation.
async fn entry_from_payload(
    state: &ServerState,
    payload: EntryPayload,
) -> Result<Entry, ServerError> {
    let owner = match payload.user_id {
        Some(user_id) => {
            let user = state.engine.users().find_by_id(user_id).await?;
            let user = user.ok_or_else(|| ServerError::Generic(UNKNOWN_OWNER.to_string()))?;
            Some(Owner::from(&user))
        }
        None => None,
    };

    Ok(Entry {
        id: None,
        description: payload.description,
        month: payload.month,
        year: payload.year,
        amount: payload
            .amount
            .as_deref()
            .map(str::parse::<MoneyCents>)
            .transpose()?,
        kind: payload.kind.map(map_kind),
        status: payload.status.map(map_status),
        registered_on: None,
        owner,
    })
}

async fn find_entry(state: &ServerState, id: i64) -> Result<Entry, ServerError> {
    state
        .engine
        .entries()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("entry {id} not found")))
}

pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<EntryQuery>,
) -> Result<Json<Vec<EntryView>>, ServerError> {
    if state.engine.users().find_by_id(query.user).await?.is_none() {
        return Err(ServerError::Generic(UNKNOWN_SEARCH_USER.to_string()));
    }

    let filter = EntryFilter {
        description: query
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        month: query.month,
        year: query.year,
        kind: query.kind.map(map_kind),
        status: query.status.map(map_status),
        owner_id: Some(query.user),
    };

    let entries = state.engine.entries().find_matching(&filter).await?;
    let views = entries
        .into_iter()
        .map(entry_view)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(views))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<EntryView>, ServerError> {
    let entry = find_entry(&state, id).await?;
    Ok(Json(entry_view(entry)?))
}

/// Create an entry. It always starts `PENDING`.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EntryPayload>,
) -> Result<(StatusCode, Json<EntryView>), ServerError> {
    let mut entry = entry_from_payload(&state, payload).await?;
    let stored = state.engine.entries().save(&mut entry).await?;

    Ok((StatusCode::CREATED, Json(entry_view(stored)?)))
}

/// Replace every field of an entry. The status is kept when the body has none.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EntryPayload>,
) -> Result<Json<EntryView>, ServerError> {
    let existing = find_entry(&state, id).await?;

    let mut entry = entry_from_payload(&state, payload).await?;
    entry.id = Some(id);
    entry.status = entry.status.or(existing.status);
    entry.registered_on = existing.registered_on;

    let stored = state.engine.entries().update(&entry).await?;
    Ok(Json(entry_view(stored)?))
}

pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<EntryView>, ServerError> {
    let mut entry = find_entry(&state, id).await?;

    let stored = state
        .engine
        .entries()
        .transition_status(&mut entry, map_status(payload.status))
        .await?;
    Ok(Json(entry_view(stored)?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    let entry = find_entry(&state, id).await?;
    state.engine.entries().delete(&entry).await?;

    Ok(StatusCode::NO_CONTENT)
}
