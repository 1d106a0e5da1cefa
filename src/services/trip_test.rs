use super::*;
use crate::state::test_helpers;

fn draft(name: &str) -> TripDraft {
    TripDraft {
        name: name.into(),
        destination: "Kyoto, Japan".into(),
        start_date: "2025-03-01".into(),
        end_date: "2025-03-08".into(),
        description: None,
    }
}

#[tokio::test]
async fn add_prepends_exactly_one_trip() {
    let state = test_helpers::test_app_state();
    test_helpers::seed_trip(&state, test_helpers::dummy_trip("Existing")).await;

    // The dummy pool has no live database behind it, so this exercises the
    // local-fallback path: the trip must still land in memory.
    let created = state_len_after_add(&state, "Cherry blossoms").await;
    assert_eq!(created.1, 2);
    assert_eq!(created.0.name, "Cherry blossoms");

    let trips = list(&state).await;
    assert_eq!(trips[0].id, created.0.id, "new trip must sit at index 0");
    assert!(trips[0].itinerary.is_empty());
    assert!(trips[0].budget.total().abs() < f64::EPSILON);
}

async fn state_len_after_add(state: &crate::state::AppState, name: &str) -> (Trip, usize) {
    let created = add(state, draft(name)).await;
    let len = state.trips.read().await.len();
    (created, len)
}

#[tokio::test]
async fn update_is_optimistic_and_field_for_field() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_trip(&state, test_helpers::dummy_trip("Original")).await;

    let mut edited = get(&state, id).await.unwrap();
    edited.name = "Renamed".into();
    edited.budget.food = 999.0;
    edited.itinerary.push(ItineraryDay { day_number: 2, title: "Day two".into(), activities: vec![] });

    let returned = update(&state, edited.clone()).await.expect("trip is known");
    assert_eq!(returned, edited);

    // Field-for-field equality immediately, before any remote write resolves.
    let in_memory = get(&state, id).await.unwrap();
    assert_eq!(in_memory, edited);
}

#[tokio::test]
async fn update_unknown_id_returns_none() {
    let state = test_helpers::test_app_state();
    let result = update(&state, test_helpers::dummy_trip("Never added")).await;
    assert!(result.is_none());
    assert!(list(&state).await.is_empty());
}

#[tokio::test]
async fn update_bumps_the_entry_version() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_trip(&state, test_helpers::dummy_trip("Versioned")).await;

    let edited = get(&state, id).await.unwrap();
    update(&state, edited.clone()).await.unwrap();
    update(&state, edited).await.unwrap();

    let entries = state.trips.read().await;
    assert_eq!(entries[0].version, 2);
}

#[tokio::test]
async fn remove_drops_the_trip_and_reports_absent_ids() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_trip(&state, test_helpers::dummy_trip("Doomed")).await;

    assert!(remove(&state, id).await);
    assert!(list(&state).await.is_empty());

    // Absent id is a no-op, not an error.
    assert!(!remove(&state, id).await);
    assert!(!remove(&state, uuid::Uuid::new_v4()).await);
}

#[test]
fn apply_remote_respects_the_version_guard() {
    let mut trip = test_helpers::dummy_trip("Synced");
    let mut entries = vec![TripEntry { trip: trip.clone(), version: 1 }];

    // Remote result from the write that produced version 1: applied.
    trip.name = "Synced (canonical)".into();
    assert!(apply_remote(&mut entries, trip.clone(), 1));
    assert_eq!(entries[0].trip.name, "Synced (canonical)");

    // A newer local write bumped the version while another sync was in
    // flight: the late result must be discarded.
    entries[0].version = 2;
    trip.name = "Stale remote".into();
    assert!(!apply_remote(&mut entries, trip, 1));
    assert_eq!(entries[0].trip.name, "Synced (canonical)");
}

#[test]
fn apply_remote_ignores_unknown_trips() {
    let mut entries: Vec<TripEntry> = Vec::new();
    assert!(!apply_remote(&mut entries, test_helpers::dummy_trip("Ghost"), 1));
}

#[test]
fn sample_trips_match_first_run_expectations() {
    let samples = sample_trips();
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].destination, "Tokyo, Japan");
    assert_eq!(samples[0].itinerary.len(), 1);
    assert!(samples[1].itinerary.is_empty());
    assert!(samples[1].budget.total().abs() < f64::EPSILON);
}

#[tokio::test]
async fn initialize_seeds_samples_when_the_load_fails() {
    // The dummy pool cannot reach a database, so the load collapses to the
    // empty/failed case and the canned samples take over.
    let state = test_helpers::test_app_state();
    initialize(&state).await;

    let trips = list(&state).await;
    assert_eq!(trips.len(), 2);
    assert_eq!(trips[0].name, "Summer in Tokyo");
}
