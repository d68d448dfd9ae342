use crate::models::{GarmentItem, WeatherSnapshot};

/// Below this temperature only cold-compatible items survive.
pub const COLD_TEMP_C: f64 = 5.0;
/// Above this temperature only sun/light-compatible items survive.
pub const HOT_TEMP_C: f64 = 25.0;

pub const COLD_TAGS: &[&str] = &["cold", "winter", "snow"];
pub const HOT_TAGS: &[&str] = &["sun", "hot", "summer", "light", "breathable"];
pub const RAIN_TAGS: &[&str] = &["rain", "waterproof", "water-resistant"];

/// Narrow items by temperature and condition suitability.
///
/// Items with no suitability tags are always retained; sparsely tagged
/// wardrobes would otherwise filter down to nothing.
pub fn filter_by_weather(
    items: Vec<GarmentItem>,
    weather: Option<&WeatherSnapshot>,
) -> Vec<GarmentItem> {
    let Some(weather) = weather else {
        return items;
    };

    items
        .into_iter()
        .filter(|item| {
            if item.weather_suitability.is_empty() {
                return true;
            }
            if weather.temperature_c < COLD_TEMP_C && !item.weather_tag(COLD_TAGS) {
                return false;
            }
            if weather.temperature_c > HOT_TEMP_C && !item.weather_tag(HOT_TAGS) {
                return false;
            }
            if weather.is_rainy() && !item.weather_tag(RAIN_TAGS) {
                return false;
            }
            true
        })
        .collect()
}
