use crate::core::history::{combo_key, ComboHistory};
use crate::models::{Category, GarmentItem, OutfitCandidate};

pub const PAIR_CONFIDENCE: i32 = 75;
pub const DRESS_CONFIDENCE: i32 = 80;

/// How many tops and bottoms the pairing stage looks at.
const PAIR_POOL: usize = 2;
/// How many single-dress outfits can be emitted.
const DRESS_POOL: usize = 2;

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn titled(item: &GarmentItem) -> String {
    match item.dominant_color() {
        Some(color) => format!("{} {}", capitalize(color), item.name),
        None => item.name.clone(),
    }
}

/// Deterministic outfit assembly used when the stylist is unavailable or
/// every composed candidate was rejected.
///
/// Pairs the first tops with the first bottoms, then adds single-dress
/// outfits, skipping any combination already in the history. Combos are
/// claimed immediately so a second call in the same session cannot repeat
/// them. Never fails; a wardrobe under two items yields an empty list.
pub fn generate_basic(
    wardrobe: &[GarmentItem],
    owner_id: &str,
    occasion: Option<&str>,
    history: &dyn ComboHistory,
    max_outfits: usize,
) -> Vec<OutfitCandidate> {
    let mut outfits = Vec::new();
    if wardrobe.len() < 2 {
        return outfits;
    }

    let tops: Vec<&GarmentItem> = wardrobe
        .iter()
        .filter(|i| i.category == Category::Tops)
        .take(PAIR_POOL)
        .collect();
    let bottoms: Vec<&GarmentItem> = wardrobe
        .iter()
        .filter(|i| i.category == Category::Bottoms)
        .take(PAIR_POOL)
        .collect();

    'pairs: for top in &tops {
        for bottom in &bottoms {
            if outfits.len() >= max_outfits {
                break 'pairs;
            }
            let ids = vec![top.id, bottom.id];
            if !history.claim(owner_id, &combo_key(&ids)) {
                continue;
            }
            outfits.push(OutfitCandidate {
                name: format!("{} & {}", titled(top), titled(bottom)),
                item_ids: ids,
                occasion: Some(occasion.unwrap_or("casual").to_string()),
                confidence: PAIR_CONFIDENCE,
                description: Some("A simple, dependable combination built from your wardrobe.".to_string()),
                styling_tips: Some("Add shoes and an accessory to finish the look.".to_string()),
                weather_note: None,
            });
        }
    }

    let dresses = wardrobe
        .iter()
        .filter(|i| i.category == Category::Dresses)
        .take(DRESS_POOL);
    for dress in dresses {
        if outfits.len() >= max_outfits {
            break;
        }
        let ids = vec![dress.id];
        if !history.claim(owner_id, &combo_key(&ids)) {
            continue;
        }
        outfits.push(OutfitCandidate {
            name: titled(dress),
            item_ids: ids,
            occasion: Some("formal".to_string()),
            confidence: DRESS_CONFIDENCE,
            description: Some("A one-piece outfit that works on its own.".to_string()),
            styling_tips: Some("Pair with simple shoes and minimal accessories.".to_string()),
            weather_note: None,
        });
    }

    outfits
}
