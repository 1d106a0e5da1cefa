//! Trip domain model.
//!
//! DESIGN
//! ======
//! `Trip` is the aggregate root the UI renders from: a nested shape with an
//! ordered itinerary, exactly one budget, and an optional AI-generated
//! budget analysis. The persisted form is normalized across three tables;
//! `services::persistence` owns the translation in both directions.
//!
//! All API-facing types serialize as camelCase to match the web client.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// TRIP
// =============================================================================

/// One planned journey. Owned by the in-memory trip store; budget and
/// itinerary are compositional children with no identity of their own in
/// the application model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: Uuid,
    pub name: String,
    pub destination: String,
    /// ISO `YYYY-MM-DD`. End >= start is the entry form's responsibility;
    /// nothing here enforces it.
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered by `day_number` ascending. Day numbers are expected unique
    /// and contiguous from 1 but that is not enforced anywhere.
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    pub budget: TripBudget,
    /// Present only after a successful analysis call. Not invalidated when
    /// the budget is edited afterwards; a new analysis replaces it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_analysis: Option<BudgetAnalysis>,
}

/// Creation payload: a trip before the store has assigned an id, an empty
/// itinerary and a zeroed budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDraft {
    pub name: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub description: Option<String>,
}

// =============================================================================
// ITINERARY
// =============================================================================

/// One calendar day's plan within a trip. Activity order is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub day_number: i32,
    pub title: String,
    pub activities: Vec<String>,
}

// =============================================================================
// BUDGET
// =============================================================================

/// Four fixed cost buckets in a single implied currency. The total is
/// derived, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripBudget {
    pub transport: f64,
    pub accommodation: f64,
    pub food: f64,
    pub activities: f64,
}

impl TripBudget {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.transport + self.accommodation + self.food + self.activities
    }
}

/// AI-generated critique of a trip's budget allocation. All fields are
/// required on the wire; a payload missing any of them fails parsing at the
/// AI boundary and never reaches the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAnalysis {
    pub summary: String,
    pub category_breakdown: Vec<CategoryBreakdown>,
    pub savings_tips: Vec<String>,
    pub warnings: Vec<String>,
    /// Intended range 1-100; clamped at the AI boundary.
    pub overall_score: i32,
}

/// Per-category slice of a budget analysis. One entry per budget category
/// is expected but not enforced to match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: String,
    pub percentage: f64,
    pub assessment: String,
    pub tip: String,
}

// =============================================================================
// DATE HELPERS
// =============================================================================

/// Whole days between two ISO dates, at least 1. Unparseable input degrades
/// to a single day rather than failing the caller.
#[must_use]
pub fn duration_days(start: &str, end: &str) -> i64 {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    let (Ok(start), Ok(end)) = (time::Date::parse(start, format), time::Date::parse(end, format)) else {
        return 1;
    };
    (end - start).whole_days().max(1)
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
