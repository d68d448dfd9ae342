use serde::{Deserialize, Serialize};

/// Closed set of garment categories that drive structural validation.
///
/// Unknown category strings coming off the wire are coerced to `Other`
/// rather than carried around as free-form text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Tops,
    Bottoms,
    Dresses,
    Outerwear,
    Accessories,
    Shoes,
    Other,
}

impl Category {
    /// Every wearable category, used for gap analysis and wardrobe scans.
    pub const WEARABLE: [Category; 6] = [
        Category::Tops,
        Category::Bottoms,
        Category::Dresses,
        Category::Outerwear,
        Category::Accessories,
        Category::Shoes,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "tops" | "top" => Category::Tops,
            "bottoms" | "bottom" => Category::Bottoms,
            "dresses" | "dress" => Category::Dresses,
            "outerwear" => Category::Outerwear,
            "accessories" | "accessory" => Category::Accessories,
            "shoes" | "shoe" => Category::Shoes,
            _ => Category::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tops => "tops",
            Category::Bottoms => "bottoms",
            Category::Dresses => "dresses",
            Category::Outerwear => "outerwear",
            Category::Accessories => "accessories",
            Category::Shoes => "shoes",
            Category::Other => "other",
        }
    }

    /// Maximum occurrences of this category allowed in a single outfit.
    pub fn max_per_outfit(&self) -> usize {
        match self {
            Category::Accessories => 3,
            Category::Shoes => 2,
            _ => 1,
        }
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Category::parse(&raw)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

/// One uploaded clothing piece, as stored by the wardrobe store.
///
/// Descriptive fields stay unset until the external classifier has run;
/// `is_verified` flips to true once classification succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarmentItem {
    pub id: i64,
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    #[serde(default)]
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub formality: Option<String>,
    #[serde(rename = "fabricType", default)]
    pub fabric_type: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(rename = "warmthLevel", default)]
    pub warmth_level: Option<u8>,
    #[serde(rename = "weatherSuitability", default)]
    pub weather_suitability: Vec<String>,
    #[serde(rename = "occasionSuitability", default)]
    pub occasion_suitability: Vec<String>,
    #[serde(rename = "isVerified", default)]
    pub is_verified: bool,
    #[serde(rename = "imageRef", default)]
    pub image_ref: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl GarmentItem {
    /// First color is the dominant one once the item has been classified.
    pub fn dominant_color(&self) -> Option<&str> {
        self.colors.first().map(|c| c.as_str())
    }

    /// Case-insensitive substring match of any keyword against the item's
    /// descriptive tags (style, subcategory, occasion suitability).
    pub fn has_tag(&self, keywords: &[&str]) -> bool {
        let mut haystacks: Vec<String> = Vec::new();
        if let Some(style) = &self.style {
            haystacks.push(style.to_lowercase());
        }
        if let Some(sub) = &self.subcategory {
            haystacks.push(sub.to_lowercase());
        }
        for tag in &self.occasion_suitability {
            haystacks.push(tag.to_lowercase());
        }
        haystacks
            .iter()
            .any(|h| keywords.iter().any(|k| h.contains(k)))
    }

    pub fn formality_is(&self, level: &str) -> bool {
        self.formality
            .as_deref()
            .map(|f| f.eq_ignore_ascii_case(level))
            .unwrap_or(false)
    }

    pub fn weather_tag(&self, tags: &[&str]) -> bool {
        self.weather_suitability
            .iter()
            .any(|t| tags.iter().any(|w| t.to_lowercase().contains(w)))
    }
}

/// Structured style preferences attached to a user profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StylePreferences {
    #[serde(rename = "favoriteColors", default)]
    pub favorite_colors: Vec<String>,
    #[serde(rename = "preferredStyles", default)]
    pub preferred_styles: Vec<String>,
    #[serde(rename = "avoidColors", default)]
    pub avoid_colors: Vec<String>,
}

/// One wardrobe owner's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    #[serde(rename = "bodyType", default)]
    pub body_type: Option<String>,
    #[serde(rename = "skinTone", default)]
    pub skin_tone: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(rename = "heightCm", default)]
    pub height_cm: Option<u16>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub preferences: StylePreferences,
}

/// Current conditions for the owner's location, treated as an immutable
/// input for one suggestion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(rename = "temperatureC")]
    pub temperature_c: f64,
    pub condition: String,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(rename = "windSpeed", default)]
    pub wind_speed: Option<f64>,
}

impl WeatherSnapshot {
    pub fn is_rainy(&self) -> bool {
        self.condition.to_lowercase().contains("rain")
    }
}

/// A generated outfit, either composed by the stylist or assembled by the
/// fallback generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutfitCandidate {
    pub name: String,
    #[serde(rename = "itemIds")]
    pub item_ids: Vec<i64>,
    #[serde(default)]
    pub occasion: Option<String>,
    pub confidence: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "stylingTips", default)]
    pub styling_tips: Option<String>,
    #[serde(rename = "weatherNote", default)]
    pub weather_note: Option<String>,
}

impl OutfitCandidate {
    pub fn occasion_or_casual(&self) -> &str {
        self.occasion.as_deref().unwrap_or("casual")
    }
}

/// Fixed-shape record produced by the stylist boundary parser.
///
/// The raw model output is free to vary (string vs number ids, missing
/// fields, scalar vs array); normalization happens once at the boundary so
/// the rest of the pipeline never branches on shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RawOutfit {
    pub name: String,
    pub item_ids: Vec<i64>,
    pub confidence: Option<i32>,
    pub description: Option<String>,
    pub styling_tips: Option<String>,
    pub occasion: Option<String>,
}

/// Restocking advice emitted by the gap analyzer and persisted through the
/// wardrobe store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingRecommendation {
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    pub suggestions: Vec<String>,
    pub confidence: i32,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}
