use crate::core::occasion::Occasion;
use crate::models::{Category, GarmentItem, OutfitCandidate};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Canonical key for an item-id combination: sorted ids, comma-joined.
pub fn combo_key(item_ids: &[i64]) -> String {
    let mut ids = item_ids.to_vec();
    ids.sort_unstable();
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Per-owner memory of previously suggested combinations.
///
/// Injected into the pipeline by the caller so tests and multi-instance
/// deployments can supply their own backing store. Lives for the process
/// lifetime; repetition across restarts is acceptable by design.
pub trait ComboHistory: Send + Sync {
    fn contains(&self, owner_id: &str, key: &str) -> bool;

    /// Atomically insert the key; returns false if it was already present.
    /// The single locked insert is what serializes concurrent requests for
    /// the same owner.
    fn claim(&self, owner_id: &str, key: &str) -> bool;

    fn keys_for(&self, owner_id: &str) -> Vec<String>;
}

/// Default in-process history store.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    entries: Mutex<HashMap<String, HashSet<String>>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComboHistory for InMemoryHistory {
    fn contains(&self, owner_id: &str, key: &str) -> bool {
        let entries = self.entries.lock().expect("history lock poisoned");
        entries
            .get(owner_id)
            .map(|set| set.contains(key))
            .unwrap_or(false)
    }

    fn claim(&self, owner_id: &str, key: &str) -> bool {
        let mut entries = self.entries.lock().expect("history lock poisoned");
        entries
            .entry(owner_id.to_string())
            .or_default()
            .insert(key.to_string())
    }

    fn keys_for(&self, owner_id: &str) -> Vec<String> {
        let entries = self.entries.lock().expect("history lock poisoned");
        entries
            .get(owner_id)
            .map(|set| {
                let mut keys: Vec<String> = set.iter().cloned().collect();
                keys.sort();
                keys
            })
            .unwrap_or_default()
    }
}

const CASUAL_NAMES: [&str; 8] = [
    "Weekend Comfort",
    "Laid-Back Style",
    "Everyday Ease",
    "Casual Classic",
    "Off-Duty Look",
    "Relaxed Layers",
    "Simple Staples",
    "Daytime Go-To",
];

const BUSINESS_NAMES: [&str; 8] = [
    "Boardroom Ready",
    "Office Polish",
    "Sharp Commute",
    "Monday Briefing",
    "Client Meeting",
    "Desk to Dinner",
    "Tailored Focus",
    "Quiet Authority",
];

const FORMAL_NAMES: [&str; 8] = [
    "Evening Elegance",
    "Black Tie Mood",
    "Gala Standard",
    "Midnight Formal",
    "Refined Affair",
    "Ceremony Ready",
    "Grand Entrance",
    "Velvet Hour",
];

const DATE_NIGHT_NAMES: [&str; 8] = [
    "Dinner Date",
    "City Lights",
    "First Impression",
    "Candlelit Evening",
    "Rooftop Plans",
    "Late Reservation",
    "Weekend Rendezvous",
    "After Eight",
];

const SPORTY_NAMES: [&str; 8] = [
    "Morning Run",
    "Gym Session",
    "Trackside",
    "Active Hours",
    "Court Ready",
    "Trail Day",
    "Warm-Up Set",
    "Finish Line",
];

fn templates_for(occasion: &str) -> &'static [&'static str] {
    match Occasion::parse(occasion) {
        Occasion::Business => &BUSINESS_NAMES,
        Occasion::Formal => &FORMAL_NAMES,
        Occasion::DateNight => &DATE_NIGHT_NAMES,
        Occasion::Sporty => &SPORTY_NAMES,
        Occasion::Casual | Occasion::Other => &CASUAL_NAMES,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Batch-scoped registry that keeps outfit names unique within one
/// suggestion response.
#[derive(Debug, Default)]
pub struct NameRegistry {
    used: HashSet<String>,
    placeholder_seq: u32,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the candidate's name, renaming on collision: first an unused
    /// template from the occasion pool, then a composite of the first
    /// top/bottom dominant colors, then a numbered placeholder.
    pub fn assign(&mut self, candidate: &mut OutfitCandidate, wardrobe: &[GarmentItem]) {
        let current = candidate.name.trim().to_string();
        if !current.is_empty() && self.used.insert(current.clone()) {
            candidate.name = current;
            return;
        }

        for template in templates_for(candidate.occasion_or_casual()) {
            if self.used.insert(template.to_string()) {
                candidate.name = template.to_string();
                return;
            }
        }

        if let Some(composite) = self.color_composite(candidate, wardrobe) {
            if self.used.insert(composite.clone()) {
                candidate.name = composite;
                return;
            }
        }

        loop {
            self.placeholder_seq += 1;
            let name = format!("Signature Look {}", self.placeholder_seq);
            if self.used.insert(name.clone()) {
                candidate.name = name;
                return;
            }
        }
    }

    fn color_composite(
        &self,
        candidate: &OutfitCandidate,
        wardrobe: &[GarmentItem],
    ) -> Option<String> {
        let resolve = |category: Category| {
            candidate.item_ids.iter().find_map(|id| {
                wardrobe
                    .iter()
                    .find(|i| i.id == *id && i.category == category)
                    .and_then(|i| i.dominant_color())
            })
        };

        let top = resolve(Category::Tops)?;
        let bottom = resolve(Category::Bottoms)?;
        Some(format!(
            "{} & {} Ensemble",
            capitalize(top),
            capitalize(bottom)
        ))
    }
}

/// Run a candidate through duplicate suppression for one owner.
///
/// Returns None when the sorted id-combo was already suggested this
/// session; otherwise claims the combo, resolves any name collision and
/// hands the candidate back for scoring.
pub fn accept_candidate(
    mut candidate: OutfitCandidate,
    owner_id: &str,
    history: &dyn ComboHistory,
    names: &mut NameRegistry,
    wardrobe: &[GarmentItem],
) -> Option<OutfitCandidate> {
    let key = combo_key(&candidate.item_ids);
    if !history.claim(owner_id, &key) {
        return None;
    }
    names.assign(&mut candidate, wardrobe);
    Some(candidate)
}
