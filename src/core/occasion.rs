use crate::models::{Category, GarmentItem};

/// Qualitative context tag used to narrow the wardrobe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occasion {
    Casual,
    Business,
    Formal,
    DateNight,
    Sporty,
    Other,
}

impl Occasion {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "casual" => Occasion::Casual,
            "business" | "business_casual" => Occasion::Business,
            "formal" => Occasion::Formal,
            "date_night" | "date night" | "datenight" => Occasion::DateNight,
            "sporty" | "athletic" => Occasion::Sporty,
            _ => Occasion::Other,
        }
    }
}

// Keyword tables are the single source of truth for the string heuristics.
// Matching is always case-insensitive substring over descriptive tags.
const BUSINESS_KEYWORDS: &[&str] = &[
    "business",
    "office",
    "work",
    "professional",
    "blazer",
    "suit",
    "oxford",
    "tailored",
];

const FORMAL_KEYWORDS: &[&str] = &[
    "formal", "gala", "evening", "tuxedo", "gown", "cocktail", "ceremony",
];

const ATHLETIC_KEYWORDS: &[&str] = &[
    "athletic", "sport", "gym", "running", "training", "workout", "jogger", "jersey",
];

const VERY_FORMAL_KEYWORDS: &[&str] = &["tuxedo", "gown", "white tie", "evening dress"];

const VERY_CASUAL_KEYWORDS: &[&str] = &["gym", "lounge", "sweatpant", "pajama"];

const SNEAKER_KEYWORDS: &[&str] = &["sneaker", "trainer", "running shoe"];

const TAILORED_BOTTOM_KEYWORDS: &[&str] =
    &["chino", "slack", "trouser", "dress pant", "pencil skirt"];

const VERSATILE_ACCESSORY_KEYWORDS: &[&str] = &["belt", "watch"];

fn is_athletic(item: &GarmentItem) -> bool {
    item.has_tag(ATHLETIC_KEYWORDS)
}

fn is_very_formal(item: &GarmentItem) -> bool {
    item.formality_is("formal") && item.has_tag(VERY_FORMAL_KEYWORDS)
}

/// Versatile pieces pass the business filter even without explicit
/// business tags: plain tops, tailored bottoms, non-sneaker shoes,
/// belts and watches.
fn is_versatile_for_business(item: &GarmentItem) -> bool {
    match item.category {
        Category::Tops => !is_athletic(item),
        Category::Bottoms => item.has_tag(TAILORED_BOTTOM_KEYWORDS),
        Category::Shoes => !item.has_tag(SNEAKER_KEYWORDS),
        Category::Accessories => item.has_tag(VERSATILE_ACCESSORY_KEYWORDS),
        _ => false,
    }
}

/// Narrow the wardrobe to items plausible for the requested occasion.
///
/// Pure function of its inputs. An unrecognized occasion passes everything
/// through; no occasion behaves like casual.
pub fn filter_by_occasion(items: Vec<GarmentItem>, occasion: Option<&str>) -> Vec<GarmentItem> {
    let parsed = occasion.map(Occasion::parse).unwrap_or(Occasion::Casual);

    match parsed {
        Occasion::Casual => items.into_iter().filter(|i| !is_very_formal(i)).collect(),
        Occasion::Business => items
            .into_iter()
            .filter(|i| i.has_tag(BUSINESS_KEYWORDS) || is_versatile_for_business(i))
            .collect(),
        Occasion::Formal => items
            .into_iter()
            .filter(|i| i.formality_is("formal") || i.has_tag(FORMAL_KEYWORDS))
            .collect(),
        Occasion::Sporty => items.into_iter().filter(is_athletic).collect(),
        Occasion::DateNight => items
            .into_iter()
            .filter(|i| !is_athletic(i) && !i.has_tag(VERY_CASUAL_KEYWORDS))
            .collect(),
        Occasion::Other => items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, category: Category, style: Option<&str>, formality: Option<&str>) -> GarmentItem {
        GarmentItem {
            id,
            owner_id: "demo".to_string(),
            name: format!("item {}", id),
            category,
            subcategory: None,
            style: style.map(|s| s.to_string()),
            formality: formality.map(|f| f.to_string()),
            fabric_type: None,
            pattern: None,
            colors: vec![],
            warmth_level: None,
            weather_suitability: vec![],
            occasion_suitability: vec![],
            is_verified: true,
            image_ref: None,
            created_at: None,
        }
    }

    #[test]
    fn test_casual_excludes_very_formal() {
        let items = vec![
            item(1, Category::Tops, Some("t-shirt"), Some("casual")),
            item(2, Category::Dresses, Some("evening gown"), Some("formal")),
        ];

        let filtered = filter_by_occasion(items, Some("casual"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_no_occasion_behaves_like_casual() {
        let items = vec![item(1, Category::Dresses, Some("ball gown"), Some("formal"))];
        assert!(filter_by_occasion(items, None).is_empty());
    }

    #[test]
    fn test_business_keeps_tagged_and_versatile() {
        let items = vec![
            item(1, Category::Tops, Some("oxford shirt"), None),
            item(2, Category::Tops, Some("gym tank"), None),
            item(3, Category::Bottoms, Some("chinos"), None),
            item(4, Category::Bottoms, Some("board shorts"), None),
            item(5, Category::Shoes, Some("leather loafers"), None),
            item(6, Category::Shoes, Some("running sneakers"), None),
        ];

        let filtered = filter_by_occasion(items, Some("business"));
        let ids: Vec<i64> = filtered.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn test_formal_is_strict() {
        let items = vec![
            item(1, Category::Dresses, Some("cocktail dress"), None),
            item(2, Category::Tops, Some("plain tee"), Some("formal")),
            item(3, Category::Tops, Some("plain tee"), None),
        ];

        let filtered = filter_by_occasion(items, Some("formal"));
        let ids: Vec<i64> = filtered.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_sporty_only_athletic() {
        let items = vec![
            item(1, Category::Tops, Some("running jersey"), None),
            item(2, Category::Tops, Some("silk blouse"), None),
        ];

        let filtered = filter_by_occasion(items, Some("sporty"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_date_night_excludes_athletic_and_gym() {
        let items = vec![
            item(1, Category::Tops, Some("workout tee"), None),
            item(2, Category::Bottoms, Some("lounge sweatpants"), None),
            item(3, Category::Tops, Some("silk blouse"), None),
        ];

        let filtered = filter_by_occasion(items, Some("date_night"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 3);
    }

    #[test]
    fn test_unrecognized_occasion_passes_through() {
        let items = vec![
            item(1, Category::Tops, Some("gym tank"), None),
            item(2, Category::Dresses, Some("evening gown"), Some("formal")),
        ];

        assert_eq!(filter_by_occasion(items, Some("brunch-mystery")).len(), 2);
    }
}
