//! Declared response schemas for the two generation operations.
//!
//! The Gemini API takes an OpenAPI-style schema in `generationConfig`;
//! type names are the API's uppercase variants.

/// Schema for itinerary generation: an ordered array of day objects.
#[must_use]
pub fn itinerary_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "dayNumber": { "type": "INTEGER" },
                "title": { "type": "STRING" },
                "activities": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                }
            },
            "required": ["dayNumber", "title", "activities"],
            "propertyOrdering": ["dayNumber", "title", "activities"]
        }
    })
}

/// Schema for budget analysis: summary, per-category breakdown, tips,
/// warnings, and an overall score.
#[must_use]
pub fn budget_analysis_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "categoryBreakdown": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": { "type": "STRING" },
                        "percentage": { "type": "NUMBER" },
                        "assessment": { "type": "STRING" },
                        "tip": { "type": "STRING" }
                    },
                    "required": ["category", "percentage", "assessment", "tip"]
                }
            },
            "savingsTips": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "warnings": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "overallScore": { "type": "INTEGER" }
        },
        "required": ["summary", "categoryBreakdown", "savingsTips", "warnings", "overallScore"]
    })
}
