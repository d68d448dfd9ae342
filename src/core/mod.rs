// Core pipeline exports
pub mod engine;
pub mod fallback;
pub mod gaps;
pub mod history;
pub mod occasion;
pub mod scoring;
pub mod validator;
pub mod weather;

pub use engine::{Stylist, StylistContext, StylistOutcome, SuggestionEngine, SuggestionOutcome};
pub use fallback::generate_basic;
pub use history::{accept_candidate, combo_key, ComboHistory, InMemoryHistory, NameRegistry};
pub use occasion::{filter_by_occasion, Occasion};
pub use scoring::{rank, score_candidate, ScoringAdjustments};
pub use validator::{is_valid_outfit, ValidationPolicy};
pub use weather::filter_by_weather;
