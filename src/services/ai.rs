//! AI content — schema-constrained itinerary generation and budget analysis.
//!
//! DESIGN
//! ======
//! Both operations are a single request/response round trip: build a prompt
//! embedding the structured inputs, request JSON matching a declared schema,
//! parse, then normalize. Numeric fields from the model are clamped rather
//! than trusted verbatim; a structurally invalid payload collapses to the
//! empty/absent sentinel at this boundary and never reaches the trip store
//! as a partial structure.

use std::fmt::Write;
use std::sync::Arc;

use tracing::{error, warn};

use crate::llm::{GenerateJson, schema};
use crate::model::{BudgetAnalysis, ItineraryDay, TripBudget};

/// Itineraries are requested for at most this many days regardless of trip
/// length.
pub const MAX_ITINERARY_DAYS: i64 = 7;

const MIN_OVERALL_SCORE: i32 = 1;
const MAX_OVERALL_SCORE: i32 = 100;

// =============================================================================
// OPERATIONS
// =============================================================================

/// Generate a day-by-day plan for a destination. The requested duration is
/// clamped to 1..=7 days. Soft-fails to an empty sequence on any transport
/// or parse error.
pub async fn generate_itinerary(
    llm: &Arc<dyn GenerateJson>,
    destination: &str,
    duration_days: i64,
) -> Vec<ItineraryDay> {
    let days = duration_days.clamp(1, MAX_ITINERARY_DAYS);
    let prompt = itinerary_prompt(destination, days);

    match llm.generate_json(&prompt, &schema::itinerary_schema()).await {
        Ok(text) => match serde_json::from_str::<Vec<ItineraryDay>>(&text) {
            Ok(parsed) => sanitize_itinerary(parsed),
            Err(e) => {
                warn!(error = %e, destination, "itinerary payload malformed; returning empty");
                Vec::new()
            }
        },
        Err(e) => {
            error!(error = %e, destination, "itinerary generation failed");
            Vec::new()
        }
    }
}

/// Request a structured critique of the four-category budget. Returns
/// `None` without a network call when the budget total is zero; soft-fails
/// to `None` on any transport or parse error.
pub async fn analyze_budget(
    llm: &Arc<dyn GenerateJson>,
    destination: &str,
    duration_days: i64,
    budget: &TripBudget,
) -> Option<BudgetAnalysis> {
    if budget.total() == 0.0 {
        return None;
    }

    let prompt = budget_prompt(destination, duration_days, budget);

    match llm.generate_json(&prompt, &schema::budget_analysis_schema()).await {
        Ok(text) => match serde_json::from_str::<BudgetAnalysis>(&text) {
            Ok(analysis) => Some(normalize_analysis(analysis)),
            Err(e) => {
                warn!(error = %e, destination, "budget analysis payload malformed; returning absent");
                None
            }
        },
        Err(e) => {
            error!(error = %e, destination, "budget analysis failed");
            None
        }
    }
}

// =============================================================================
// PROMPTS
// =============================================================================

fn itinerary_prompt(destination: &str, days: i64) -> String {
    format!(
        "Generate a travel itinerary for {destination} for {days} days. \
         Focus on high-quality titles and a list of specific activities for each day."
    )
}

fn budget_prompt(destination: &str, days: i64, budget: &TripBudget) -> String {
    let mut prompt = format!("Analyze this travel budget for a {days}-day trip to {destination}:\n");
    let _ = writeln!(prompt, "- Transport: ${}", budget.transport);
    let _ = writeln!(prompt, "- Accommodation: ${}", budget.accommodation);
    let _ = writeln!(prompt, "- Food: ${}", budget.food);
    let _ = writeln!(prompt, "- Activities: ${}", budget.activities);
    let _ = writeln!(prompt, "- Total: ${}", budget.total());
    prompt.push_str(&format!(
        "\nProvide a detailed analysis including:\n\
         1. Overall budget assessment summary\n\
         2. Category breakdown with percentages, assessment (good/average/high/low), and specific tips\n\
         3. Money-saving tips specific to {destination}\n\
         4. Warnings about potential budget issues\n\
         5. Overall budget score (1-100, where 100 is excellent value)"
    ));
    prompt
}

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Drop structurally useless days: non-positive day numbers and blank
/// titles. Day-number uniqueness/contiguity is left as-is.
fn sanitize_itinerary(days: Vec<ItineraryDay>) -> Vec<ItineraryDay> {
    days.into_iter()
        .filter(|day| day.day_number >= 1 && !day.title.trim().is_empty())
        .collect()
}

/// Clamp model-supplied numbers into their intended ranges before they can
/// reach persisted state.
fn normalize_analysis(mut analysis: BudgetAnalysis) -> BudgetAnalysis {
    analysis.overall_score = analysis.overall_score.clamp(MIN_OVERALL_SCORE, MAX_OVERALL_SCORE);
    for entry in &mut analysis.category_breakdown {
        entry.percentage = entry.percentage.clamp(0.0, 100.0);
    }
    analysis
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
