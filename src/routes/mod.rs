//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the REST endpoints the web client calls. The trip API is the
//! whole surface; everything behind it goes through the trip store and
//! the AI service.

pub mod trips;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/trips", get(trips::list_trips).post(trips::create_trip))
        .route(
            "/api/trips/{id}",
            get(trips::get_trip)
                .put(trips::update_trip)
                .delete(trips::delete_trip),
        )
        .route("/api/trips/{id}/itinerary/generate", post(trips::generate_itinerary))
        .route("/api/trips/{id}/budget/analyze", post(trips::analyze_budget))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
