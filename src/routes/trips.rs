//! Trip routes — thin HTTP shell over the trip store and AI services.
//!
//! ERROR HANDLING
//! ==============
//! Create and update always succeed from the caller's point of view (the
//! optimistic in-memory write applies regardless of what Postgres later
//! accepts). Only delete and the two AI operations surface an explicit
//! failure status, because the client gates a UI transition on them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use tracing::error;
use uuid::Uuid;

use crate::model::{Trip, TripDraft, duration_days};
use crate::services::{ai, persistence, trip};
use crate::state::AppState;

/// `GET /api/trips` — the in-memory collection, newest first.
pub async fn list_trips(State(state): State<AppState>) -> Json<Vec<Trip>> {
    Json(trip::list(&state).await)
}

/// `POST /api/trips` — create from a draft.
pub async fn create_trip(
    State(state): State<AppState>,
    Json(draft): Json<TripDraft>,
) -> (StatusCode, Json<Trip>) {
    let created = trip::add(&state, draft).await;
    (StatusCode::CREATED, Json(created))
}

/// `GET /api/trips/{id}`
pub async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Trip>, StatusCode> {
    trip::get(&state, id).await.map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// `PUT /api/trips/{id}` — optimistic replace; remote sync runs behind it.
pub async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<Trip>,
) -> Result<Json<Trip>, StatusCode> {
    if body.id != id {
        return Err(StatusCode::BAD_REQUEST);
    }
    trip::update(&state, body).await.map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// `DELETE /api/trips/{id}` — the one CRUD flow that surfaces remote
/// failure: memory is only touched on a non-error gateway outcome, and the
/// gateway's flag passes through unchanged.
pub async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let deleted = persistence::delete_trip(&state.pool, id).await.map_err(|e| {
        error!(error = %e, trip_id = %id, "trip delete failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    trip::remove(&state, id).await;
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}

/// `POST /api/trips/{id}/itinerary/generate` — generate a day-by-day plan
/// and merge it into the trip through the normal update path.
pub async fn generate_itinerary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Trip>, StatusCode> {
    let Some(llm) = state.llm.clone() else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };
    let current = trip::get(&state, id).await.ok_or(StatusCode::NOT_FOUND)?;

    let days = duration_days(&current.start_date, &current.end_date);
    let itinerary = ai::generate_itinerary(&llm, &current.destination, days).await;
    if itinerary.is_empty() {
        return Err(StatusCode::BAD_GATEWAY);
    }

    let mut updated = current;
    updated.itinerary = itinerary;
    trip::update(&state, updated).await.map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// `POST /api/trips/{id}/budget/analyze` — analyze the budget and merge the
/// result. A zero-total budget is rejected before any network call.
pub async fn analyze_budget(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Trip>, StatusCode> {
    let Some(llm) = state.llm.clone() else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };
    let current = trip::get(&state, id).await.ok_or(StatusCode::NOT_FOUND)?;

    if current.budget.total() == 0.0 {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let days = duration_days(&current.start_date, &current.end_date);
    let analysis = ai::analyze_budget(&llm, &current.destination, days, &current.budget)
        .await
        .ok_or(StatusCode::BAD_GATEWAY)?;

    let mut updated = current;
    updated.budget_analysis = Some(analysis);
    trip::update(&state, updated).await.map(Json).ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
#[path = "trips_test.rs"]
mod tests;
