use crate::models::{Category, GarmentItem, OutfitCandidate, UserProfile, WeatherSnapshot};
use crate::core::weather::{COLD_TEMP_C, HOT_TEMP_C, RAIN_TAGS};

/// Base confidence when the composer did not assign one.
pub const DEFAULT_BASE_CONFIDENCE: i32 = 80;

/// Below this temperature an unlayered outfit loses confidence.
pub const LAYERING_SCORE_TEMP_C: f64 = 10.0;

/// Tops that can stand in for outerwear when it is cold.
const LAYERING_TOP_KEYWORDS: &[&str] = &["blazer", "cardigan", "sweater", "jacket"];

/// Tunable confidence adjustments, wired from configuration.
#[derive(Debug, Clone, Copy)]
pub struct ScoringAdjustments {
    pub layering_bonus: i32,
    pub layering_penalty: i32,
    pub layering_floor: i32,
    pub weather_mismatch_penalty: i32,
    pub weather_mismatch_floor: i32,
    pub weather_match_bonus: i32,
    pub favorite_color_bonus: i32,
    pub avoid_color_penalty: i32,
    pub avoid_color_floor: i32,
}

impl Default for ScoringAdjustments {
    fn default() -> Self {
        Self {
            layering_bonus: 10,
            layering_penalty: 25,
            layering_floor: 40,
            weather_mismatch_penalty: 20,
            weather_mismatch_floor: 50,
            weather_match_bonus: 5,
            favorite_color_bonus: 5,
            avoid_color_penalty: 10,
            avoid_color_floor: 60,
        }
    }
}

#[inline]
fn add_capped(value: i32, amount: i32, ceiling: i32) -> i32 {
    (value + amount).min(ceiling)
}

/// A floored subtraction never lifts a value that is already below the
/// floor.
#[inline]
fn sub_floored(value: i32, amount: i32, floor: i32) -> i32 {
    if value <= floor {
        value
    } else {
        (value - amount).max(floor)
    }
}

fn is_layering_piece(item: &GarmentItem) -> bool {
    item.category == Category::Outerwear
        || (item.category == Category::Tops && item.has_tag(LAYERING_TOP_KEYWORDS))
}

/// One item read against the current conditions.
fn weather_mismatch(item: &GarmentItem, weather: &WeatherSnapshot) -> bool {
    if weather.temperature_c < COLD_TEMP_C {
        if let Some(warmth) = item.warmth_level {
            if warmth < 2 {
                return true;
            }
        }
    }
    if weather.temperature_c > HOT_TEMP_C {
        if let Some(warmth) = item.warmth_level {
            if warmth > 2 {
                return true;
            }
        }
    }
    if weather.is_rainy() && !item.weather_suitability.is_empty() && !item.weather_tag(RAIN_TAGS) {
        return true;
    }
    false
}

fn color_matches(item_colors: &[String], preference: &str) -> bool {
    let pref = preference.to_lowercase();
    item_colors.iter().any(|c| {
        let color = c.to_lowercase();
        color.contains(&pref) || pref.contains(&color)
    })
}

/// Adjust a candidate's confidence for weather fitness and color
/// preferences, then clamp to [0, 100].
pub fn score_candidate(
    candidate: &mut OutfitCandidate,
    wardrobe: &[GarmentItem],
    weather: Option<&WeatherSnapshot>,
    profile: Option<&UserProfile>,
    adjustments: &ScoringAdjustments,
) {
    let items: Vec<&GarmentItem> = candidate
        .item_ids
        .iter()
        .filter_map(|id| wardrobe.iter().find(|i| i.id == *id))
        .collect();

    let mut confidence = if candidate.confidence > 0 {
        candidate.confidence
    } else {
        DEFAULT_BASE_CONFIDENCE
    };

    if let Some(weather) = weather {
        // Layering adjustment.
        if weather.temperature_c < LAYERING_SCORE_TEMP_C {
            if items.iter().any(|i| is_layering_piece(i)) {
                confidence = add_capped(confidence, adjustments.layering_bonus, 100);
            } else {
                confidence = sub_floored(
                    confidence,
                    adjustments.layering_penalty,
                    adjustments.layering_floor,
                );
            }
        }

        // General appropriateness across every selected item.
        let mismatched = items.iter().any(|i| weather_mismatch(i, weather));
        if mismatched {
            confidence = sub_floored(
                confidence,
                adjustments.weather_mismatch_penalty,
                adjustments.weather_mismatch_floor,
            );
        } else {
            confidence = add_capped(confidence, adjustments.weather_match_bonus, 100);
        }
    }

    if let Some(profile) = profile {
        let prefs = &profile.preferences;
        let favorite_hit = items
            .iter()
            .any(|i| prefs.favorite_colors.iter().any(|p| color_matches(&i.colors, p)));
        if favorite_hit {
            confidence = add_capped(confidence, adjustments.favorite_color_bonus, 100);
        }

        let avoid_hit = items
            .iter()
            .any(|i| prefs.avoid_colors.iter().any(|p| color_matches(&i.colors, p)));
        if avoid_hit {
            confidence = sub_floored(
                confidence,
                adjustments.avoid_color_penalty,
                adjustments.avoid_color_floor,
            );
        }
    }

    candidate.confidence = confidence.clamp(0, 100);
}

/// Sort a batch by confidence, best first, and keep the top `limit`.
pub fn rank(candidates: &mut Vec<OutfitCandidate>, limit: usize) {
    candidates.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    candidates.truncate(limit);
}
