use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchPair, Participant};
use crate::services::writeback::LinkUpdate;

/// Response for the preference list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceListsResponse {
    pub proposers: Vec<Participant>,
    pub respondents: Vec<Participant>,
}

/// Response for the run matching endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMatchingResponse {
    pub run_id: uuid::Uuid,
    pub matches: Vec<MatchPair>,
    pub unmatched_proposers: Vec<String>,
    pub unmatched_respondents: Vec<String>,
    pub batches: Vec<Vec<LinkUpdate>>,
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
