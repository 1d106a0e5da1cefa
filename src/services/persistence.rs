//! Trip persistence — gateway between the nested trip model and Postgres.
//!
//! DESIGN
//! ======
//! A trip is stored normalized across three tables (`trips`,
//! `trip_budgets`, `itinerary_days`) joined by trip id. This module owns
//! the reshaping in both directions; the row↔model mapping is pure and
//! tested without a database.
//!
//! ERROR HANDLING
//! ==============
//! Each operation is independently fallible and returns a tagged error so
//! callers can tell "no data" from "fetch failed". Within create/update,
//! only a failure of the leading trip-row write aborts the operation;
//! budget and itinerary step failures are logged and skipped, so partial
//! writes are possible and silent from the UI's point of view.

use std::collections::HashMap;

use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::model::{ItineraryDay, Trip, TripBudget};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Row shape of the `trips` table (the subset the application reads).
#[derive(Debug, Clone)]
struct TripRow {
    id: Uuid,
    name: String,
    destination: String,
    description: Option<String>,
    start_date: String,
    end_date: String,
}

/// Row shape of the `trip_budgets` table.
#[derive(Debug, Clone)]
struct BudgetRow {
    trip_id: Uuid,
    transport: f64,
    accommodation: f64,
    food: f64,
    activities: f64,
    budget_analysis: Option<serde_json::Value>,
}

/// Row shape of the `itinerary_days` table.
#[derive(Debug, Clone)]
struct DayRow {
    trip_id: Uuid,
    day_number: i32,
    title: String,
    activities: Vec<String>,
}

// =============================================================================
// MAPPING
// =============================================================================

/// Reshape one trip's rows into the nested model. A missing budget row
/// (possible after a partial create) maps to a zeroed budget; a budget
/// analysis blob that no longer parses is dropped rather than surfaced.
fn assemble_trip(trip: TripRow, budget: Option<BudgetRow>, days: Vec<DayRow>) -> Trip {
    let (budget, analysis) = match budget {
        Some(row) => (
            TripBudget {
                transport: row.transport,
                accommodation: row.accommodation,
                food: row.food,
                activities: row.activities,
            },
            row.budget_analysis
                .and_then(|value| serde_json::from_value(value).ok()),
        ),
        None => (TripBudget::default(), None),
    };

    Trip {
        id: trip.id,
        name: trip.name,
        destination: trip.destination,
        start_date: trip.start_date,
        end_date: trip.end_date,
        description: trip.description,
        itinerary: days
            .into_iter()
            .map(|day| ItineraryDay { day_number: day.day_number, title: day.title, activities: day.activities })
            .collect(),
        budget,
        budget_analysis: analysis,
    }
}

fn trip_row(trip: &Trip) -> TripRow {
    TripRow {
        id: trip.id,
        name: trip.name.clone(),
        destination: trip.destination.clone(),
        description: trip.description.clone(),
        start_date: trip.start_date.clone(),
        end_date: trip.end_date.clone(),
    }
}

fn budget_row(trip: &Trip) -> BudgetRow {
    BudgetRow {
        trip_id: trip.id,
        transport: trip.budget.transport,
        accommodation: trip.budget.accommodation,
        food: trip.budget.food,
        activities: trip.budget.activities,
        budget_analysis: trip
            .budget_analysis
            .as_ref()
            .and_then(|analysis| serde_json::to_value(analysis).ok()),
    }
}

fn day_rows(trip: &Trip) -> Vec<DayRow> {
    trip.itinerary
        .iter()
        .map(|day| DayRow {
            trip_id: trip.id,
            day_number: day.day_number,
            title: day.title.clone(),
            activities: day.activities.clone(),
        })
        .collect()
}

// =============================================================================
// READ PATH
// =============================================================================

/// List all trips, newest-created first, with budgets and itineraries
/// joined into the nested shape.
///
/// # Errors
///
/// Returns a database error if any of the three reads fail.
pub async fn list_trips(pool: &PgPool) -> Result<Vec<Trip>, PersistError> {
    let trip_rows = sqlx::query_as::<_, (Uuid, String, String, Option<String>, String, String)>(
        "SELECT id, name, destination, description, start_date, end_date
         FROM trips
         ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    let ids: Vec<Uuid> = trip_rows.iter().map(|row| row.0).collect();

    let budget_tuples = sqlx::query_as::<_, (Uuid, f64, f64, f64, f64, Option<serde_json::Value>)>(
        "SELECT trip_id, transport, accommodation, food, activities, budget_analysis
         FROM trip_budgets
         WHERE trip_id = ANY($1)",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let day_tuples = sqlx::query_as::<_, (Uuid, i32, String, Vec<String>)>(
        "SELECT trip_id, day_number, title, activities
         FROM itinerary_days
         WHERE trip_id = ANY($1)
         ORDER BY day_number",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut budgets: HashMap<Uuid, BudgetRow> = budget_tuples
        .into_iter()
        .map(|(trip_id, transport, accommodation, food, activities, budget_analysis)| {
            (trip_id, BudgetRow { trip_id, transport, accommodation, food, activities, budget_analysis })
        })
        .collect();

    let mut days: HashMap<Uuid, Vec<DayRow>> = HashMap::new();
    for (trip_id, day_number, title, activities) in day_tuples {
        days.entry(trip_id)
            .or_default()
            .push(DayRow { trip_id, day_number, title, activities });
    }

    Ok(trip_rows
        .into_iter()
        .map(|(id, name, destination, description, start_date, end_date)| {
            let row = TripRow { id, name, destination, description, start_date, end_date };
            assemble_trip(row, budgets.remove(&id), days.remove(&id).unwrap_or_default())
        })
        .collect())
}

/// Fetch one trip by id, or `None` when absent.
///
/// # Errors
///
/// Returns a database error if any read fails.
pub async fn fetch_trip(pool: &PgPool, id: Uuid) -> Result<Option<Trip>, PersistError> {
    let Some((id, name, destination, description, start_date, end_date)) =
        sqlx::query_as::<_, (Uuid, String, String, Option<String>, String, String)>(
            "SELECT id, name, destination, description, start_date, end_date
             FROM trips
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
    else {
        return Ok(None);
    };

    let budget = sqlx::query_as::<_, (Uuid, f64, f64, f64, f64, Option<serde_json::Value>)>(
        "SELECT trip_id, transport, accommodation, food, activities, budget_analysis
         FROM trip_budgets
         WHERE trip_id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .map(|(trip_id, transport, accommodation, food, activities, budget_analysis)| BudgetRow {
        trip_id,
        transport,
        accommodation,
        food,
        activities,
        budget_analysis,
    });

    let days = sqlx::query_as::<_, (Uuid, i32, String, Vec<String>)>(
        "SELECT trip_id, day_number, title, activities
         FROM itinerary_days
         WHERE trip_id = $1
         ORDER BY day_number",
    )
    .bind(id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|(trip_id, day_number, title, activities)| DayRow { trip_id, day_number, title, activities })
    .collect();

    let row = TripRow { id, name, destination, description, start_date, end_date };
    Ok(Some(assemble_trip(row, budget, days)))
}

// =============================================================================
// WRITE PATH
// =============================================================================

/// Persist a new trip: trip row, then budget, then itinerary days — three
/// sequential writes, not a transaction. Returns the freshly re-fetched
/// trip.
///
/// # Errors
///
/// Returns a database error only when the leading trip insert (or the
/// final re-fetch) fails; budget/itinerary step failures are logged and
/// leave a partially-written trip behind.
pub async fn create_trip(pool: &PgPool, trip: &Trip) -> Result<Option<Trip>, PersistError> {
    let row = trip_row(trip);
    sqlx::query(
        "INSERT INTO trips (id, name, destination, description, start_date, end_date)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(row.id)
    .bind(&row.name)
    .bind(&row.destination)
    .bind(&row.description)
    .bind(&row.start_date)
    .bind(&row.end_date)
    .execute(pool)
    .await?;

    if let Err(e) = insert_budget(pool, &budget_row(trip)).await {
        warn!(error = %e, trip_id = %trip.id, "budget insert failed; trip saved without budget row");
    }
    if let Err(e) = insert_days(pool, &day_rows(trip)).await {
        warn!(error = %e, trip_id = %trip.id, "itinerary insert failed; trip saved without itinerary");
    }

    fetch_trip(pool, trip.id).await
}

/// Update a trip: trip row, then budget upsert (carrying the latest
/// analysis snapshot), then full itinerary replacement. Returns the
/// re-fetched trip.
///
/// # Errors
///
/// Returns a database error only when the leading trip update (or the
/// final re-fetch) fails; later step failures are logged and skipped.
pub async fn update_trip(pool: &PgPool, trip: &Trip) -> Result<Option<Trip>, PersistError> {
    let row = trip_row(trip);
    sqlx::query(
        "UPDATE trips
         SET name = $2, destination = $3, description = $4, start_date = $5, end_date = $6, updated_at = now()
         WHERE id = $1",
    )
    .bind(row.id)
    .bind(&row.name)
    .bind(&row.destination)
    .bind(&row.description)
    .bind(&row.start_date)
    .bind(&row.end_date)
    .execute(pool)
    .await?;

    if let Err(e) = upsert_budget(pool, &budget_row(trip)).await {
        warn!(error = %e, trip_id = %trip.id, "budget upsert failed; stale budget row kept");
    }

    // Itinerary replacement is delete-all-then-reinsert, not incremental.
    if let Err(e) = sqlx::query("DELETE FROM itinerary_days WHERE trip_id = $1")
        .bind(trip.id)
        .execute(pool)
        .await
    {
        warn!(error = %e, trip_id = %trip.id, "itinerary delete failed; days may duplicate");
    }
    if let Err(e) = insert_days(pool, &day_rows(trip)).await {
        warn!(error = %e, trip_id = %trip.id, "itinerary reinsert failed; itinerary left incomplete");
    }

    fetch_trip(pool, trip.id).await
}

/// Delete a trip row; budget and itinerary rows cascade. `Ok(false)` means
/// the id was not present remotely.
///
/// # Errors
///
/// Returns a database error if the delete fails.
pub async fn delete_trip(pool: &PgPool, id: Uuid) -> Result<bool, PersistError> {
    let result = sqlx::query("DELETE FROM trips WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// =============================================================================
// HELPERS
// =============================================================================

async fn insert_budget(pool: &PgPool, row: &BudgetRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO trip_budgets (trip_id, transport, accommodation, food, activities, budget_analysis)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(row.trip_id)
    .bind(row.transport)
    .bind(row.accommodation)
    .bind(row.food)
    .bind(row.activities)
    .bind(&row.budget_analysis)
    .execute(pool)
    .await?;
    Ok(())
}

async fn upsert_budget(pool: &PgPool, row: &BudgetRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO trip_budgets (trip_id, transport, accommodation, food, activities, budget_analysis)
         VALUES ($1, $2, $3, $4, $5, $6)
         ON CONFLICT (trip_id) DO UPDATE SET
             transport = EXCLUDED.transport,
             accommodation = EXCLUDED.accommodation,
             food = EXCLUDED.food,
             activities = EXCLUDED.activities,
             budget_analysis = EXCLUDED.budget_analysis",
    )
    .bind(row.trip_id)
    .bind(row.transport)
    .bind(row.accommodation)
    .bind(row.food)
    .bind(row.activities)
    .bind(&row.budget_analysis)
    .execute(pool)
    .await?;
    Ok(())
}

async fn insert_days(pool: &PgPool, rows: &[DayRow]) -> Result<(), sqlx::Error> {
    for row in rows {
        sqlx::query(
            "INSERT INTO itinerary_days (trip_id, day_number, title, activities)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(row.trip_id)
        .bind(row.day_number)
        .bind(&row.title)
        .bind(&row.activities)
        .execute(pool)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
