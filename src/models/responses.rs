use crate::models::domain::OutfitCandidate;
use serde::{Deserialize, Serialize};

/// Response for the suggestion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestOutfitsResponse {
    pub outfits: Vec<OutfitCandidate>,
    #[serde(rename = "totalItemsConsidered")]
    pub total_items_considered: usize,
    #[serde(rename = "fallbackUsed")]
    pub fallback_used: bool,
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

/// Save outfit response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveOutfitResponse {
    pub success: bool,
    #[serde(rename = "outfitId")]
    pub outfit_id: String,
}
