// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Category, GarmentItem, OutfitCandidate, RawOutfit, ShoppingRecommendation, StylePreferences,
    UserProfile, WeatherSnapshot,
};
pub use requests::{SaveOutfitRequest, SuggestOutfitsRequest};
pub use responses::{ErrorResponse, HealthResponse, SaveOutfitResponse, SuggestOutfitsResponse};
