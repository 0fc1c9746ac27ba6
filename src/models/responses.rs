use serde::{Deserialize, Serialize};
use crate::models::domain::{Match, Transfer};

/// Response for the matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    pub matches: Vec<Match>,
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
    #[serde(rename = "availableSurplus")]
    pub available_surplus: usize,
    #[serde(rename = "openRequests")]
    pub open_requests: usize,
}

/// Transfers seen from one clinic's side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicTransfersResponse {
    pub outgoing: Vec<Transfer>,
    pub incoming: Vec<Transfer>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
