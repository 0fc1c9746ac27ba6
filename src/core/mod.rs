// Core algorithm exports
pub mod expiry;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use expiry::{days_until_expiry, derive_inventory_status};
pub use filters::{is_available_surplus, is_open_request, relevant_to_clinic};
pub use matcher::{MatchInputs, MatchResult, Matcher};
pub use scoring::calculate_match_score;
