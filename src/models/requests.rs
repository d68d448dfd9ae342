use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to generate outfit suggestions
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuggestOutfitsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "owner_id", rename = "ownerId")]
    pub owner_id: String,
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    5
}

/// Request to save a suggested outfit
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveOutfitRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "owner_id", rename = "ownerId")]
    pub owner_id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    #[serde(alias = "item_ids", rename = "itemIds")]
    pub item_ids: Vec<i64>,
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
