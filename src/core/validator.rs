use crate::models::{Category, GarmentItem};
use std::collections::{HashMap, HashSet};

/// How strict the composition rules are.
///
/// `Basic` accepts any wearable two-piece combination; `Mandatory` is the
/// policy applied to stylist-composed outfits and requires a full
/// top + bottom + shoes base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPolicy {
    Basic,
    Mandatory,
}

/// Below this temperature an outfit must include outerwear, provided the
/// wardrobe has any to offer.
pub const LAYERING_TEMP_C: f64 = 14.0;
/// Below this temperature a cold accessory is required, same proviso.
pub const COLD_ACCESSORY_TEMP_C: f64 = 10.0;
/// More distinct colors than this reads as noise, not an outfit.
pub const MAX_DISTINCT_COLORS: usize = 8;

const COLD_ACCESSORY_KEYWORDS: &[&str] = &["glove", "scarf", "hat", "beanie", "mitten", "earmuff"];

const SWIMWEAR_KEYWORDS: &[&str] = &["swim", "bikini", "trunks", "boardshort"];

const WINTER_COAT_KEYWORDS: &[&str] = &["parka", "puffer", "winter coat", "wool coat", "down jacket"];

/// Color pairs that never belong in the same outfit.
const COLOR_CLASH_PAIRS: &[(&str, &str)] = &[
    ("neon orange", "hot pink"),
    ("neon green", "hot pink"),
    ("neon yellow", "neon orange"),
];

fn is_cold_accessory(item: &GarmentItem) -> bool {
    item.category == Category::Accessories
        && item
            .subcategory
            .as_deref()
            .map(|s| {
                let lower = s.to_lowercase();
                COLD_ACCESSORY_KEYWORDS.iter().any(|k| lower.contains(k))
            })
            .unwrap_or(false)
}

fn name_matches(item: &GarmentItem, keywords: &[&str]) -> bool {
    let lower = item.name.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// Validate an item-id set against the outfit composition rules.
///
/// Rules are applied in order and short-circuit on the first failure.
/// Rejection is silent; this is a filter, not an error path.
pub fn is_valid_outfit(
    item_ids: &[i64],
    wardrobe: &[GarmentItem],
    temperature_c: Option<f64>,
    policy: ValidationPolicy,
) -> bool {
    // Rule 1: every id must resolve to a wardrobe item.
    let mut items: Vec<&GarmentItem> = Vec::with_capacity(item_ids.len());
    for id in item_ids {
        match wardrobe.iter().find(|i| i.id == *id) {
            Some(item) => items.push(item),
            None => return false,
        }
    }

    // Rule 2: minimum size.
    let min_size = match policy {
        ValidationPolicy::Basic => 2,
        ValidationPolicy::Mandatory => 3,
    };
    if items.len() < min_size {
        return false;
    }

    // Rule 3: per-category duplicate caps.
    let mut counts: HashMap<Category, usize> = HashMap::new();
    for item in &items {
        *counts.entry(item.category).or_insert(0) += 1;
    }
    for (category, count) in &counts {
        if *count > category.max_per_outfit() {
            return false;
        }
    }

    // Rule 4: composition requirement.
    let has = |c: Category| counts.contains_key(&c);
    match policy {
        ValidationPolicy::Mandatory => {
            // Dresses do not substitute here.
            if !(has(Category::Tops) && has(Category::Bottoms) && has(Category::Shoes)) {
                return false;
            }
        }
        ValidationPolicy::Basic => {
            let core = has(Category::Dresses) || (has(Category::Tops) && has(Category::Bottoms));
            let versatile = items.len() >= 3
                && has(Category::Outerwear)
                && (has(Category::Tops) || has(Category::Bottoms));
            if !core && !versatile {
                return false;
            }
        }
    }

    // Rule 5: conditional layering against the full wardrobe.
    if let Some(temp) = temperature_c {
        if temp < LAYERING_TEMP_C
            && wardrobe.iter().any(|i| i.category == Category::Outerwear)
            && !has(Category::Outerwear)
        {
            return false;
        }

        // Rule 6: cold accessories when the wardrobe has them.
        if temp < COLD_ACCESSORY_TEMP_C
            && wardrobe.iter().any(is_cold_accessory)
            && !items.iter().any(|i| is_cold_accessory(i))
        {
            return false;
        }
    }

    // Rule 7: color count and extreme clashes.
    let colors: HashSet<String> = items
        .iter()
        .flat_map(|i| i.colors.iter().map(|c| c.to_lowercase()))
        .collect();
    if colors.len() > MAX_DISTINCT_COLORS {
        return false;
    }
    for (a, b) in COLOR_CLASH_PAIRS {
        if colors.contains(*a) && colors.contains(*b) {
            return false;
        }
    }

    // Rule 8: swimwear alongside winter-class outerwear.
    if items.iter().any(|i| name_matches(i, SWIMWEAR_KEYWORDS))
        && items.iter().any(|i| name_matches(i, WINTER_COAT_KEYWORDS))
    {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, category: Category, name: &str, colors: &[&str]) -> GarmentItem {
        GarmentItem {
            id,
            owner_id: "demo".to_string(),
            name: name.to_string(),
            category,
            subcategory: None,
            style: None,
            formality: None,
            fabric_type: None,
            pattern: None,
            colors: colors.iter().map(|c| c.to_string()).collect(),
            warmth_level: None,
            weather_suitability: vec![],
            occasion_suitability: vec![],
            is_verified: true,
            image_ref: None,
            created_at: None,
        }
    }

    fn accessory(id: i64, subcategory: &str) -> GarmentItem {
        let mut it = item(id, Category::Accessories, subcategory, &[]);
        it.subcategory = Some(subcategory.to_string());
        it
    }

    fn basic_wardrobe() -> Vec<GarmentItem> {
        vec![
            item(1, Category::Tops, "white tee", &["white"]),
            item(2, Category::Bottoms, "blue jeans", &["blue"]),
            item(3, Category::Shoes, "white sneakers", &["white"]),
            item(4, Category::Dresses, "black dress", &["black"]),
        ]
    }

    #[test]
    fn test_unresolved_id_rejected() {
        let wardrobe = basic_wardrobe();
        assert!(!is_valid_outfit(&[1, 99], &wardrobe, None, ValidationPolicy::Basic));
    }

    #[test]
    fn test_minimum_size() {
        let wardrobe = basic_wardrobe();
        assert!(!is_valid_outfit(&[1], &wardrobe, None, ValidationPolicy::Basic));
        assert!(is_valid_outfit(&[1, 2], &wardrobe, None, ValidationPolicy::Basic));
        assert!(!is_valid_outfit(&[1, 2], &wardrobe, None, ValidationPolicy::Mandatory));
        assert!(is_valid_outfit(&[1, 2, 3], &wardrobe, None, ValidationPolicy::Mandatory));
    }

    #[test]
    fn test_category_caps() {
        let mut wardrobe = basic_wardrobe();
        wardrobe.push(item(5, Category::Tops, "black tee", &["black"]));
        // Two tops exceeds the cap of 1.
        assert!(!is_valid_outfit(&[1, 5, 2], &wardrobe, None, ValidationPolicy::Basic));

        wardrobe.push(accessory(6, "wool scarf"));
        wardrobe.push(accessory(7, "beanie"));
        wardrobe.push(accessory(8, "gloves"));
        // Three accessories are fine.
        assert!(is_valid_outfit(&[1, 2, 6, 7, 8], &wardrobe, None, ValidationPolicy::Basic));
    }

    #[test]
    fn test_composition_dress_or_top_and_bottom() {
        let wardrobe = basic_wardrobe();
        assert!(is_valid_outfit(&[4, 3], &wardrobe, None, ValidationPolicy::Basic));
        assert!(is_valid_outfit(&[1, 2], &wardrobe, None, ValidationPolicy::Basic));
        // Top plus shoes alone is not an outfit.
        assert!(!is_valid_outfit(&[1, 3], &wardrobe, None, ValidationPolicy::Basic));
    }

    #[test]
    fn test_versatile_three_piece() {
        let mut wardrobe = basic_wardrobe();
        wardrobe.push(item(5, Category::Outerwear, "denim jacket", &["blue"]));
        wardrobe.push(accessory(6, "watch"));
        // Top + outerwear + accessory counts as a versatile combination.
        assert!(is_valid_outfit(&[1, 5, 6], &wardrobe, None, ValidationPolicy::Basic));
    }

    #[test]
    fn test_mandatory_dress_does_not_substitute() {
        let wardrobe = basic_wardrobe();
        assert!(!is_valid_outfit(&[4, 3, 2], &wardrobe, None, ValidationPolicy::Mandatory));
    }

    #[test]
    fn test_cold_layering_enforced_when_available() {
        let mut wardrobe = basic_wardrobe();
        assert!(is_valid_outfit(&[1, 2, 3], &wardrobe, Some(3.0), ValidationPolicy::Mandatory));

        wardrobe.push(item(5, Category::Outerwear, "wool coat", &["grey"]));
        assert!(!is_valid_outfit(&[1, 2, 3], &wardrobe, Some(3.0), ValidationPolicy::Mandatory));
        assert!(is_valid_outfit(
            &[1, 2, 3, 5],
            &wardrobe,
            Some(3.0),
            ValidationPolicy::Mandatory
        ));
    }

    #[test]
    fn test_cold_accessory_required_when_owned() {
        let mut wardrobe = basic_wardrobe();
        wardrobe.push(accessory(6, "wool scarf"));
        assert!(!is_valid_outfit(&[1, 2, 3], &wardrobe, Some(8.0), ValidationPolicy::Mandatory));
        assert!(is_valid_outfit(
            &[1, 2, 3, 6],
            &wardrobe,
            Some(8.0),
            ValidationPolicy::Mandatory
        ));
        // Above the threshold the rule is dormant.
        assert!(is_valid_outfit(&[1, 2, 3], &wardrobe, Some(12.0), ValidationPolicy::Mandatory));
    }

    #[test]
    fn test_color_clash_rejected() {
        let wardrobe = vec![
            item(1, Category::Tops, "party top", &["neon orange"]),
            item(2, Category::Bottoms, "party skirt", &["hot pink"]),
        ];
        assert!(!is_valid_outfit(&[1, 2], &wardrobe, None, ValidationPolicy::Basic));
    }

    #[test]
    fn test_too_many_colors_rejected() {
        let wardrobe = vec![
            item(
                1,
                Category::Tops,
                "rainbow top",
                &["red", "orange", "yellow", "green", "blue"],
            ),
            item(
                2,
                Category::Bottoms,
                "patch jeans",
                &["indigo", "violet", "teal", "maroon"],
            ),
        ];
        assert!(!is_valid_outfit(&[1, 2], &wardrobe, None, ValidationPolicy::Basic));
    }

    #[test]
    fn test_swimwear_with_winter_coat_rejected() {
        let wardrobe = vec![
            item(1, Category::Tops, "swim shirt", &["blue"]),
            item(2, Category::Bottoms, "linen shorts", &["beige"]),
            item(3, Category::Outerwear, "down jacket", &["black"]),
        ];
        assert!(!is_valid_outfit(&[1, 2, 3], &wardrobe, None, ValidationPolicy::Basic));
        assert!(is_valid_outfit(&[1, 2], &wardrobe, None, ValidationPolicy::Basic));
    }
}
