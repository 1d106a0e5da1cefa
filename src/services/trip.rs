//! Trip store — in-memory source of truth with optimistic persistence.
//!
//! DESIGN
//! ======
//! The UI renders exclusively from the in-memory collection. Mutations
//! apply to memory first and propagate to Postgres through the persistence
//! gateway; `update` does so without blocking the caller. Writes are
//! last-writer-wins per trip id; each entry's version counter lets a
//! remote round-trip result be discarded when a newer local write landed
//! while it was in flight.
//!
//! ERROR HANDLING
//! ==============
//! Gateway errors collapse to soft behavior here: a failed load starts the
//! session empty (and seeds sample data), a failed create keeps a
//! locally-identified trip that is never retried, a failed update sync
//! leaves the optimistic copy authoritative for the session.

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::model::{ItineraryDay, Trip, TripBudget, TripDraft};
use crate::services::persistence;
use crate::state::{AppState, TripEntry};

// =============================================================================
// INITIALIZATION
// =============================================================================

/// Load the trip collection from the remote store. An empty result —
/// whether "no trips" or "fetch failed" — seeds two canned sample trips so
/// the application is never empty on first run. Samples are not persisted.
pub async fn initialize(state: &AppState) {
    let loaded = match persistence::list_trips(&state.pool).await {
        Ok(trips) => trips,
        Err(e) => {
            error!(error = %e, "trip load failed; starting with an empty collection");
            Vec::new()
        }
    };

    let trips = if loaded.is_empty() {
        info!("no persisted trips; seeding sample data");
        sample_trips()
    } else {
        info!(count = loaded.len(), "hydrated trips from database");
        loaded
    };

    let mut entries = state.trips.write().await;
    *entries = trips
        .into_iter()
        .map(|trip| TripEntry { trip, version: 0 })
        .collect();
}

// =============================================================================
// ACCESSORS
// =============================================================================

/// Snapshot of all trips, newest-created first.
pub async fn list(state: &AppState) -> Vec<Trip> {
    let entries = state.trips.read().await;
    entries.iter().map(|entry| entry.trip.clone()).collect()
}

/// Snapshot of one trip by id.
pub async fn get(state: &AppState, id: Uuid) -> Option<Trip> {
    let entries = state.trips.read().await;
    entries
        .iter()
        .find(|entry| entry.trip.id == id)
        .map(|entry| entry.trip.clone())
}

// =============================================================================
// MUTATIONS
// =============================================================================

/// Create a trip from a draft: empty itinerary, zeroed budget, store-assigned
/// id. Attempts the remote create first; on failure the trip still lands in
/// memory under its local id and is never retried against the remote store.
/// The new trip is always prepended.
pub async fn add(state: &AppState, draft: TripDraft) -> Trip {
    let trip = Trip {
        id: Uuid::new_v4(),
        name: draft.name,
        destination: draft.destination,
        start_date: draft.start_date,
        end_date: draft.end_date,
        description: draft.description,
        itinerary: Vec::new(),
        budget: TripBudget::default(),
        budget_analysis: None,
    };

    let trip = match persistence::create_trip(&state.pool, &trip).await {
        Ok(Some(saved)) => saved,
        Ok(None) => {
            warn!(trip_id = %trip.id, "created trip could not be re-read; keeping the local copy");
            trip
        }
        Err(e) => {
            error!(error = %e, trip_id = %trip.id, "trip create failed; trip exists in memory only");
            trip
        }
    };

    let mut entries = state.trips.write().await;
    entries.insert(0, TripEntry { trip: trip.clone(), version: 0 });
    trip
}

/// Replace the matching trip in memory immediately, then fire the remote
/// update without blocking the caller. Returns `None` when the id is
/// unknown. The in-memory copy is authoritative; the gateway's refreshed
/// trip is applied back only while no newer local write has superseded it.
pub async fn update(state: &AppState, trip: Trip) -> Option<Trip> {
    let version = {
        let mut entries = state.trips.write().await;
        let entry = entries.iter_mut().find(|entry| entry.trip.id == trip.id)?;
        entry.trip = trip.clone();
        entry.version += 1;
        entry.version
    };

    let task_state = state.clone();
    let task_trip = trip.clone();
    tokio::spawn(async move {
        sync_update(&task_state, task_trip, version).await;
    });

    Some(trip)
}

/// Drop a trip from memory. Absent ids are a no-op. The delete route calls
/// the gateway first and only invokes this on a non-error outcome.
pub async fn remove(state: &AppState, id: Uuid) -> bool {
    let mut entries = state.trips.write().await;
    let before = entries.len();
    entries.retain(|entry| entry.trip.id != id);
    entries.len() < before
}

// =============================================================================
// REMOTE SYNC
// =============================================================================

async fn sync_update(state: &AppState, trip: Trip, version: u64) {
    let trip_id = trip.id;
    match persistence::update_trip(&state.pool, &trip).await {
        Ok(Some(refreshed)) => {
            let mut entries = state.trips.write().await;
            apply_remote(&mut entries, refreshed, version);
        }
        Ok(None) => warn!(%trip_id, "remote update returned no trip; in-memory copy kept"),
        Err(e) => error!(error = %e, %trip_id, "trip update sync failed; in-memory copy kept"),
    }
}

/// Apply a remote round-trip result, unless a newer local write has bumped
/// the entry's version in the meantime. Returns whether it was applied.
fn apply_remote(entries: &mut [TripEntry], refreshed: Trip, version: u64) -> bool {
    let Some(entry) = entries.iter_mut().find(|entry| entry.trip.id == refreshed.id) else {
        return false;
    };
    if entry.version != version {
        info!(trip_id = %refreshed.id, "discarding stale remote result; local version moved on");
        return false;
    }
    entry.trip = refreshed;
    true
}

// =============================================================================
// SAMPLE DATA
// =============================================================================

fn sample_trips() -> Vec<Trip> {
    vec![
        Trip {
            id: Uuid::new_v4(),
            name: "Summer in Tokyo".into(),
            destination: "Tokyo, Japan".into(),
            start_date: "2024-07-15".into(),
            end_date: "2024-07-25".into(),
            description: None,
            itinerary: vec![ItineraryDay {
                day_number: 1,
                title: "Arrival and Shibuya Crossing".into(),
                activities: vec![
                    "Check in to hotel".into(),
                    "Explore Shibuya".into(),
                    "Dinner at an Izakaya".into(),
                ],
            }],
            budget: TripBudget { transport: 1200.0, accommodation: 2500.0, food: 800.0, activities: 500.0 },
            budget_analysis: None,
        },
        Trip {
            id: Uuid::new_v4(),
            name: "Parisian Escapade".into(),
            destination: "Paris, France".into(),
            start_date: "2024-09-10".into(),
            end_date: "2024-09-17".into(),
            description: None,
            itinerary: vec![],
            budget: TripBudget::default(),
            budget_analysis: None,
        },
    ]
}

#[cfg(test)]
#[path = "trip_test.rs"]
mod tests;
