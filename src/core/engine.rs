use crate::core::fallback::generate_basic;
use crate::core::history::{accept_candidate, ComboHistory, NameRegistry};
use crate::core::occasion::filter_by_occasion;
use crate::core::scoring::{rank, score_candidate, ScoringAdjustments, DEFAULT_BASE_CONFIDENCE};
use crate::core::validator::{is_valid_outfit, ValidationPolicy};
use crate::core::weather::filter_by_weather;
use crate::models::{GarmentItem, OutfitCandidate, RawOutfit, UserProfile, WeatherSnapshot};
use async_trait::async_trait;
use tracing::{debug, info};

/// Inputs handed to the external stylist.
#[derive(Debug)]
pub struct StylistContext<'a> {
    pub wardrobe: &'a [GarmentItem],
    pub profile: Option<&'a UserProfile>,
    pub weather: Option<&'a WeatherSnapshot>,
    pub occasion: Option<&'a str>,
    /// Combo keys already suggested this session, for the stylist to avoid.
    pub avoid_combos: Vec<String>,
}

/// What came back from the stylist boundary.
///
/// Quota exhaustion, timeouts and unparseable output are all `Unavailable`;
/// the fallback path is a normal branch, not an exception handler.
#[derive(Debug)]
pub enum StylistOutcome {
    Suggestions(Vec<RawOutfit>),
    Empty,
    Unavailable,
}

/// External outfit composer boundary.
#[async_trait]
pub trait Stylist: Send + Sync {
    async fn suggest(&self, ctx: &StylistContext<'_>) -> StylistOutcome;
}

/// Result of one suggestion run
#[derive(Debug)]
pub struct SuggestionOutcome {
    pub outfits: Vec<OutfitCandidate>,
    pub fallback_used: bool,
    pub items_considered: usize,
}

/// Main suggestion orchestrator - implements the filtering and validation
/// pipeline.
///
/// # Pipeline Stages
/// 1. Occasion filter
/// 2. Weather filter
/// 3. Stylist composition (external call)
/// 4. Structural validation + duplicate suppression
/// 5. Confidence scoring, ranking, truncation
/// 6. Combinatorial fallback when nothing survives
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    adjustments: ScoringAdjustments,
    max_results: usize,
    max_fallback_outfits: usize,
}

impl SuggestionEngine {
    pub fn new(adjustments: ScoringAdjustments, max_results: usize, max_fallback_outfits: usize) -> Self {
        Self {
            adjustments,
            max_results,
            max_fallback_outfits,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ScoringAdjustments::default(), 5, 4)
    }

    /// Generate ranked outfit suggestions for one owner.
    ///
    /// Degrades through the fallback generator when the stylist is
    /// unavailable or every composed candidate is rejected; a wardrobe
    /// under two usable items yields an empty result, never an error.
    pub async fn generate(
        &self,
        stylist: &dyn Stylist,
        wardrobe: &[GarmentItem],
        profile: Option<&UserProfile>,
        weather: Option<&WeatherSnapshot>,
        occasion: Option<&str>,
        owner_id: &str,
        history: &dyn ComboHistory,
        limit: usize,
    ) -> SuggestionOutcome {
        let temperature = weather.map(|w| w.temperature_c);
        let limit = limit.clamp(1, self.max_results.max(1));

        // Stages 1 and 2: narrow the wardrobe.
        let pool = filter_by_occasion(wardrobe.to_vec(), occasion);
        let pool = filter_by_weather(pool, weather);
        let items_considered = pool.len();

        debug!(
            "Suggestion pool for {}: {} of {} items (occasion: {:?})",
            owner_id,
            items_considered,
            wardrobe.len(),
            occasion
        );

        if items_considered < 2 {
            return SuggestionOutcome {
                outfits: Vec::new(),
                fallback_used: false,
                items_considered,
            };
        }

        // Stage 3: external composition.
        let ctx = StylistContext {
            wardrobe: &pool,
            profile,
            weather,
            occasion,
            avoid_combos: history.keys_for(owner_id),
        };
        let outcome = stylist.suggest(&ctx).await;

        let mut names = NameRegistry::new();
        let mut accepted: Vec<OutfitCandidate> = Vec::new();

        if let StylistOutcome::Suggestions(raw_outfits) = outcome {
            for raw in raw_outfits {
                let candidate = OutfitCandidate {
                    name: raw.name,
                    item_ids: raw.item_ids,
                    occasion: raw.occasion.or_else(|| occasion.map(|o| o.to_string())),
                    confidence: raw.confidence.unwrap_or(DEFAULT_BASE_CONFIDENCE),
                    description: raw.description,
                    styling_tips: raw.styling_tips,
                    weather_note: None,
                };

                // Stage 4: structural validation, then duplicate suppression.
                if !is_valid_outfit(
                    &candidate.item_ids,
                    wardrobe,
                    temperature,
                    ValidationPolicy::Mandatory,
                ) {
                    debug!("Dropping structurally invalid candidate {:?}", candidate.name);
                    continue;
                }

                let Some(mut candidate) =
                    accept_candidate(candidate, owner_id, history, &mut names, wardrobe)
                else {
                    continue;
                };

                // Stage 5: scoring.
                score_candidate(
                    &mut candidate,
                    wardrobe,
                    weather,
                    profile,
                    &self.adjustments,
                );
                candidate.weather_note = weather.map(|w| {
                    format!("Checked against {:.0}C, {}", w.temperature_c, w.condition)
                });
                accepted.push(candidate);
            }
        }

        rank(&mut accepted, limit);

        // Stage 6: fallback when composition produced nothing usable.
        if accepted.is_empty() {
            info!("Stylist yielded no usable outfits for {}, using fallback", owner_id);
            let mut outfits =
                generate_basic(&pool, owner_id, occasion, history, self.max_fallback_outfits);
            for outfit in &mut outfits {
                names.assign(outfit, &pool);
            }
            return SuggestionOutcome {
                fallback_used: !outfits.is_empty(),
                outfits,
                items_considered,
            };
        }

        SuggestionOutcome {
            outfits: accepted,
            fallback_used: false,
            items_considered,
        }
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::history::InMemoryHistory;
    use crate::models::Category;

    struct Unavailable;

    #[async_trait]
    impl Stylist for Unavailable {
        async fn suggest(&self, _ctx: &StylistContext<'_>) -> StylistOutcome {
            StylistOutcome::Unavailable
        }
    }

    struct Scripted(Vec<RawOutfit>);

    #[async_trait]
    impl Stylist for Scripted {
        async fn suggest(&self, _ctx: &StylistContext<'_>) -> StylistOutcome {
            StylistOutcome::Suggestions(self.0.clone())
        }
    }

    fn item(id: i64, category: Category, name: &str, color: &str) -> GarmentItem {
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
            colors: vec![color.to_string()],
            warmth_level: None,
            weather_suitability: vec![],
            occasion_suitability: vec![],
            is_verified: true,
            image_ref: None,
            created_at: None,
        }
    }

    fn full_wardrobe() -> Vec<GarmentItem> {
        vec![
            item(1, Category::Tops, "white tee", "white"),
            item(2, Category::Bottoms, "blue jeans", "blue"),
            item(3, Category::Shoes, "white sneakers", "white"),
            item(4, Category::Tops, "black shirt", "black"),
            item(5, Category::Bottoms, "khaki chinos", "khaki"),
        ]
    }

    fn raw(name: &str, ids: &[i64], confidence: Option<i32>) -> RawOutfit {
        RawOutfit {
            name: name.to_string(),
            item_ids: ids.to_vec(),
            confidence,
            description: None,
            styling_tips: None,
            occasion: None,
        }
    }

    #[tokio::test]
    async fn test_unavailable_stylist_falls_back() {
        let engine = SuggestionEngine::with_defaults();
        let history = InMemoryHistory::new();
        let wardrobe = full_wardrobe();

        let result = engine
            .generate(&Unavailable, &wardrobe, None, None, None, "demo", &history, 5)
            .await;

        assert!(result.fallback_used);
        assert!(!result.outfits.is_empty());
        assert!(result.outfits.iter().all(|o| o.confidence == 75));
    }

    #[tokio::test]
    async fn test_small_wardrobe_returns_empty() {
        let engine = SuggestionEngine::with_defaults();
        let history = InMemoryHistory::new();
        let wardrobe = vec![item(1, Category::Tops, "white tee", "white")];

        let result = engine
            .generate(&Unavailable, &wardrobe, None, None, None, "demo", &history, 5)
            .await;

        assert!(result.outfits.is_empty());
        assert!(!result.fallback_used);
    }

    #[tokio::test]
    async fn test_invalid_candidates_dropped() {
        let engine = SuggestionEngine::with_defaults();
        let history = InMemoryHistory::new();
        let wardrobe = full_wardrobe();

        // Missing shoes fails mandatory composition; unknown id fails
        // resolution; the third candidate is sound.
        let stylist = Scripted(vec![
            raw("No Shoes", &[1, 2], Some(90)),
            raw("Ghost Item", &[1, 2, 99], Some(90)),
            raw("Complete", &[1, 2, 3], Some(85)),
        ]);

        let result = engine
            .generate(&stylist, &wardrobe, None, None, None, "demo", &history, 5)
            .await;

        assert!(!result.fallback_used);
        assert_eq!(result.outfits.len(), 1);
        assert_eq!(result.outfits[0].name, "Complete");
    }

    #[tokio::test]
    async fn test_batch_sorted_and_truncated() {
        let engine = SuggestionEngine::with_defaults();
        let history = InMemoryHistory::new();
        let wardrobe = full_wardrobe();

        let stylist = Scripted(vec![
            raw("Lower", &[1, 2, 3], Some(70)),
            raw("Higher", &[4, 5, 3], Some(95)),
        ]);

        let result = engine
            .generate(&stylist, &wardrobe, None, None, None, "demo", &history, 5)
            .await;

        assert_eq!(result.outfits.len(), 2);
        assert_eq!(result.outfits[0].name, "Higher");
        assert!(result.outfits[0].confidence >= result.outfits[1].confidence);
    }

    #[tokio::test]
    async fn test_repeat_combo_suppressed_across_calls() {
        let engine = SuggestionEngine::with_defaults();
        let history = InMemoryHistory::new();
        let wardrobe = full_wardrobe();

        let stylist = Scripted(vec![raw("Repeat", &[1, 2, 3], Some(90))]);

        let first = engine
            .generate(&stylist, &wardrobe, None, None, None, "demo", &history, 5)
            .await;
        assert_eq!(first.outfits.len(), 1);
        assert!(!first.fallback_used);

        // Second run: the combo is suppressed, so the engine degrades to
        // fallback pairings instead.
        let second = engine
            .generate(&stylist, &wardrobe, None, None, None, "demo", &history, 5)
            .await;
        assert!(second.fallback_used || second.outfits.is_empty());
        for outfit in &second.outfits {
            assert_ne!(outfit.item_ids, vec![1, 2, 3]);
        }
    }
}
