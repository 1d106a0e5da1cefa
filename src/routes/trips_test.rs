use super::*;
use crate::llm::{GenerateJson, LlmError};
use crate::model::TripBudget;
use crate::state::test_helpers;
use std::sync::Arc;

struct CannedLlm(&'static str);

#[async_trait::async_trait]
impl GenerateJson for CannedLlm {
    async fn generate_json(&self, _prompt: &str, _schema: &serde_json::Value) -> Result<String, LlmError> {
        Ok(self.0.to_string())
    }
}

#[tokio::test]
async fn list_trips_returns_the_store_snapshot() {
    let state = test_helpers::test_app_state();
    test_helpers::seed_trip(&state, test_helpers::dummy_trip("Visible")).await;

    let Json(trips) = list_trips(State(state)).await;
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].name, "Visible");
}

#[tokio::test]
async fn get_trip_unknown_id_is_404() {
    let state = test_helpers::test_app_state();
    let status = get_trip(State(state), Path(Uuid::new_v4())).await.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_trip_rejects_id_mismatch() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_trip(&state, test_helpers::dummy_trip("Stable")).await;

    let mut body = trip::get(&state, id).await.unwrap();
    body.id = Uuid::new_v4();

    let status = update_trip(State(state), Path(id), Json(body)).await.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generate_itinerary_without_llm_is_503() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_trip(&state, test_helpers::dummy_trip("No AI")).await;

    let status = generate_itinerary(State(state), Path(id)).await.unwrap_err();
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn generate_itinerary_merges_the_plan_into_the_trip() {
    let llm: Arc<dyn GenerateJson> =
        Arc::new(CannedLlm(r#"[{"dayNumber": 1, "title": "Arrival", "activities": ["Check in"]}]"#));
    let state = test_helpers::test_app_state_with_llm(llm);
    let id = test_helpers::seed_trip(&state, test_helpers::dummy_trip("Planned")).await;

    let Json(updated) = generate_itinerary(State(state.clone()), Path(id)).await.unwrap();
    assert_eq!(updated.itinerary.len(), 1);
    assert_eq!(updated.itinerary[0].title, "Arrival");

    // The merge went through the store: memory reflects it immediately.
    let in_memory = trip::get(&state, id).await.unwrap();
    assert_eq!(in_memory.itinerary, updated.itinerary);
}

#[tokio::test]
async fn generate_itinerary_surfaces_empty_sentinel_as_502() {
    let llm: Arc<dyn GenerateJson> = Arc::new(CannedLlm("not json"));
    let state = test_helpers::test_app_state_with_llm(llm);
    let id = test_helpers::seed_trip(&state, test_helpers::dummy_trip("Unlucky")).await;

    let status = generate_itinerary(State(state), Path(id)).await.unwrap_err();
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn analyze_budget_rejects_zero_total_before_any_call() {
    let llm: Arc<dyn GenerateJson> = Arc::new(CannedLlm("{}"));
    let state = test_helpers::test_app_state_with_llm(llm);

    let mut trip = test_helpers::dummy_trip("Broke");
    trip.budget = TripBudget::default();
    let id = test_helpers::seed_trip(&state, trip).await;

    let status = analyze_budget(State(state), Path(id)).await.unwrap_err();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn analyze_budget_merges_the_analysis() {
    let llm: Arc<dyn GenerateJson> = Arc::new(CannedLlm(
        r#"{
            "summary": "Sound plan.",
            "categoryBreakdown": [],
            "savingsTips": [],
            "warnings": [],
            "overallScore": 77
        }"#,
    ));
    let state = test_helpers::test_app_state_with_llm(llm);
    let id = test_helpers::seed_trip(&state, test_helpers::dummy_trip("Funded")).await;

    let Json(updated) = analyze_budget(State(state.clone()), Path(id)).await.unwrap();
    assert_eq!(updated.budget_analysis.as_ref().unwrap().overall_score, 77);

    let in_memory = trip::get(&state, id).await.unwrap();
    assert!(in_memory.budget_analysis.is_some());
}
