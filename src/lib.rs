//! Stylo Algo - outfit suggestion service for the Stylo wardrobe app
//!
//! This library provides the outfit suggestion pipeline used by the Stylo
//! wardrobe app: occasion and weather filtering, structural validation,
//! AI-composed outfits with a deterministic combinatorial fallback,
//! duplicate suppression and confidence scoring.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    ComboHistory, InMemoryHistory, Stylist, StylistContext, StylistOutcome, SuggestionEngine,
    ValidationPolicy,
};
pub use crate::models::{
    Category, GarmentItem, OutfitCandidate, RawOutfit, SuggestOutfitsRequest,
    SuggestOutfitsResponse, UserProfile, WeatherSnapshot,
};
