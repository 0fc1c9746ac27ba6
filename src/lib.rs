//! MedShare Match - surplus-to-request matching for inter-clinic medicine sharing
//!
//! Clinics record stock, post surplus and file requests. The matcher pairs
//! available surplus with open requests for the same medicine and ranks the
//! pairs by urgency, shelf life and quantity coverage.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, MatchInputs, MatchResult, relevant_to_clinic};
pub use crate::models::{Match, MatchKey, ScoringWeights};
pub use crate::services::{InventoryStore, StoreError};
