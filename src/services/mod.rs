// Service exports
pub mod store;
pub mod stylist;

pub use store::{StoreError, WardrobeStoreClient};
pub use stylist::{extract_json, normalize_outfit, parse_outfits, GeminiStylist};
