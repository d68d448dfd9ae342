use crate::models::{Category, GarmentItem, OutfitCandidate, ShoppingRecommendation, WeatherSnapshot};

/// Outfits below this confidence trigger gap analysis.
pub const LOW_CONFIDENCE_THRESHOLD: i32 = 70;
/// At most this many suggestions per recommendation record.
pub const MAX_SUGGESTIONS: usize = 5;

/// Wardrobe staples every collection should cover.
const ESSENTIAL_COLORS: &[&str] = &["black", "white", "navy", "grey"];

const COLD_GAP_TEMP_C: f64 = 10.0;
const HOT_GAP_TEMP_C: f64 = 25.0;

fn category_suggestion(category: Category) -> &'static str {
    match category {
        Category::Tops => "a few versatile tops in neutral tones",
        Category::Bottoms => "well-fitting bottoms such as dark jeans or chinos",
        Category::Dresses => "an easy one-piece dress for low-effort outfits",
        Category::Outerwear => "a versatile blazer or cardigan for layering",
        Category::Accessories => "simple accessories like a belt or a watch",
        Category::Shoes => "comfortable everyday shoes",
        Category::Other => "",
    }
}

fn weather_suggestions(weather: &WeatherSnapshot) -> Vec<String> {
    let mut out = Vec::new();
    if weather.temperature_c < COLD_GAP_TEMP_C {
        out.push("a warm coat or parka for cold days".to_string());
        out.push("a thermal layer or heavy sweater".to_string());
        out.push("insulated boots".to_string());
    } else if weather.temperature_c > HOT_GAP_TEMP_C {
        out.push("a light, breathable shirt".to_string());
        out.push("shorts or a light skirt".to_string());
        out.push("sandals and a sun hat".to_string());
    }
    if weather.is_rainy() {
        out.push("a waterproof jacket".to_string());
        out.push("rain boots or a sturdy umbrella".to_string());
    }
    out
}

/// Inspect a ranked batch for low-confidence outfits and derive
/// restocking advice from what the wardrobe is missing.
///
/// Returns None when every outfit scored comfortably; persistence of the
/// returned record is the caller's concern.
pub fn analyze(
    owner_id: &str,
    ranked: &[OutfitCandidate],
    wardrobe: &[GarmentItem],
    weather: Option<&WeatherSnapshot>,
) -> Option<ShoppingRecommendation> {
    let low: Vec<&OutfitCandidate> = ranked
        .iter()
        .filter(|o| o.confidence < LOW_CONFIDENCE_THRESHOLD)
        .collect();
    if low.is_empty() {
        return None;
    }

    let mut suggestions: Vec<String> = Vec::new();

    for category in Category::WEARABLE {
        if !wardrobe.iter().any(|i| i.category == category) {
            suggestions.push(category_suggestion(category).to_string());
        }
    }

    let wardrobe_colors: Vec<String> = wardrobe
        .iter()
        .flat_map(|i| i.colors.iter().map(|c| c.to_lowercase()))
        .collect();
    for essential in ESSENTIAL_COLORS {
        if !wardrobe_colors.iter().any(|c| c.contains(essential)) {
            suggestions.push(format!("a {} staple piece to anchor combinations", essential));
        }
    }

    if let Some(weather) = weather {
        suggestions.extend(weather_suggestions(weather));
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    if suggestions.is_empty() {
        return None;
    }

    let mean_confidence =
        low.iter().map(|o| o.confidence).sum::<i32>() / low.len() as i32;

    Some(ShoppingRecommendation {
        owner_id: owner_id.to_string(),
        suggestions,
        confidence: mean_confidence,
        created_at: chrono::Utc::now(),
    })
}
