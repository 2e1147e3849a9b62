use serde::{Deserialize, Serialize};
use crate::models::domain::{Breakdown, ProfileSummary, RankedMatch};

/// Response for the pair scoring endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchScoreResponse {
    pub score: u8,
    pub breakdown: Breakdown,
    #[serde(rename = "profileA")]
    pub profile_a: ProfileSummary,
    #[serde(rename = "profileB")]
    pub profile_b: ProfileSummary,
}

/// Response for the ranking endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankCandidatesResponse {
    #[serde(rename = "profileId")]
    pub profile_id: String,
    pub matches: Vec<RankedMatch>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "missingIds")]
    pub missing_ids: Vec<String>,
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
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }
}
