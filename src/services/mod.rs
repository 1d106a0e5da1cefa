//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers stay focused on protocol translation: `persistence` maps the
//! nested trip model to its normalized tables, `trip` owns the in-memory
//! collection, `ai` turns model output into validated trip content.

pub mod ai;
pub mod persistence;
pub mod trip;
