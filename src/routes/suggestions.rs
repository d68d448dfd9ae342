use crate::core::{gaps, ComboHistory, Stylist, SuggestionEngine};
use crate::models::{
    ErrorResponse, HealthResponse, OutfitCandidate, SaveOutfitRequest, SaveOutfitResponse,
    SuggestOutfitsRequest, SuggestOutfitsResponse,
};
use crate::services::WardrobeStoreClient;
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<WardrobeStoreClient>,
    pub stylist: Arc<dyn Stylist>,
    pub history: Arc<dyn ComboHistory>,
    pub engine: SuggestionEngine,
}

/// Configure all suggestion-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/suggestions/generate", web::post().to(generate_suggestions))
        .route("/suggestions/history", web::get().to(get_suggestion_history))
        .route("/outfits/save", web::post().to(save_outfit));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Generate outfit suggestions
///
/// POST /api/v1/suggestions/generate
///
/// Request body:
/// ```json
/// {
///   "ownerId": "string",
///   "occasion": "business",
///   "limit": 5
/// }
/// ```
async fn generate_suggestions(
    state: web::Data<AppState>,
    req: web::Json<SuggestOutfitsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let owner_id = &req.owner_id;
    let limit = req.limit.min(10) as usize;

    tracing::info!("Generating suggestions for owner: {}, occasion: {:?}", owner_id, req.occasion);

    // The wardrobe is the one hard dependency of this endpoint.
    let wardrobe = match state.store.get_items(owner_id).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Failed to fetch items for {}: {}", owner_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch wardrobe".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Profile and weather only personalize the result; both degrade to None.
    let profile = match state.store.get_profile(owner_id).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!("Failed to fetch profile for {}, proceeding without: {}", owner_id, e);
            None
        }
    };

    let weather = match profile.as_ref().and_then(|p| p.location.as_deref()) {
        Some(location) => match state.store.get_weather(location).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Failed to fetch weather for {}, proceeding without: {}", location, e);
                None
            }
        },
        None => None,
    };

    let result = state
        .engine
        .generate(
            state.stylist.as_ref(),
            &wardrobe,
            profile.as_ref(),
            weather.as_ref(),
            req.occasion.as_deref(),
            owner_id,
            state.history.as_ref(),
            limit,
        )
        .await;

    // Side effect: low-confidence batches produce restocking advice.
    if let Some(record) = gaps::analyze(owner_id, &result.outfits, &wardrobe, weather.as_ref()) {
        if let Err(e) = state.store.save_recommendation(&record).await {
            tracing::warn!("Failed to persist shopping recommendation: {}", e);
        }
    }

    tracing::info!(
        "Returning {} outfits for {} (fallback: {}, considered {} items)",
        result.outfits.len(),
        owner_id,
        result.fallback_used,
        result.items_considered
    );

    HttpResponse::Ok().json(SuggestOutfitsResponse {
        outfits: result.outfits,
        total_items_considered: result.items_considered,
        fallback_used: result.fallback_used,
    })
}

/// Save a suggested outfit
///
/// POST /api/v1/outfits/save
async fn save_outfit(
    state: web::Data<AppState>,
    req: web::Json<SaveOutfitRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let wardrobe = match state.store.get_items(&req.owner_id).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Failed to fetch items for {}: {}", req.owner_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch wardrobe".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Every referenced item must exist and belong to the owner.
    let unknown: Vec<i64> = req
        .item_ids
        .iter()
        .copied()
        .filter(|id| !wardrobe.iter().any(|i| i.id == *id))
        .collect();
    if !unknown.is_empty() {
        return HttpResponse::NotFound().json(ErrorResponse {
            error: "Unknown items".to_string(),
            message: format!("Items not found in wardrobe: {:?}", unknown),
            status_code: 404,
        });
    }

    let outfit = OutfitCandidate {
        name: req.name.clone(),
        item_ids: req.item_ids.clone(),
        occasion: req.occasion.clone(),
        confidence: 100,
        description: req.description.clone(),
        styling_tips: None,
        weather_note: None,
    };

    match state.store.save_outfit(&req.owner_id, &outfit).await {
        Ok(outfit_id) => HttpResponse::Ok().json(SaveOutfitResponse {
            success: true,
            outfit_id,
        }),
        Err(e) => {
            tracing::error!("Failed to save outfit for {}: {}", req.owner_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to save outfit".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Get combinations already suggested this session
///
/// GET /api/v1/suggestions/history?ownerId={ownerId}
///
/// Returns the combo keys the duplicate suppressor has recorded, for
/// client-side synchronization and debugging purposes.
async fn get_suggestion_history(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let owner_id = match query.get("ownerId") {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing ownerId parameter".to_string(),
                message: "ownerId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    let combos = state.history.keys_for(owner_id);
    let count = combos.len();
    HttpResponse::Ok().json(serde_json::json!({
        "ownerId": owner_id,
        "combos": combos,
        "count": count,
    }))
}
