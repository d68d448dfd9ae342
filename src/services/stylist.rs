use crate::core::engine::{Stylist, StylistContext, StylistOutcome};
use crate::models::RawOutfit;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini-backed outfit stylist.
///
/// All expected failure modes (quota, timeout, network, unparseable
/// output) collapse into `StylistOutcome::Unavailable` so the pipeline
/// falls back instead of erroring.
pub struct GeminiStylist {
    api_key: String,
    model: String,
    temperature: f64,
    max_output_tokens: u32,
    base_url: String,
    client: Client,
}

impl GeminiStylist {
    pub fn new(api_key: String, model: impl Into<String>, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            model: model.into(),
            temperature: 0.4,
            max_output_tokens: 2048,
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Point the client at a different endpoint, for tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }

    fn build_system_prompt() -> String {
        "You are a personal stylist. Compose complete outfits strictly from \
         the wardrobe items provided, referencing items only by their ids. \
         Respond with a single JSON object of the form \
         {\"outfits\": [{\"name\", \"itemIds\", \"confidence\", \
         \"description\", \"stylingTips\", \"occasion\"}]} and nothing else."
            .to_string()
    }

    fn build_user_prompt(ctx: &StylistContext<'_>) -> String {
        let wardrobe: Vec<Value> = ctx
            .wardrobe
            .iter()
            .map(|item| {
                serde_json::json!({
                    "id": item.id,
                    "name": item.name,
                    "category": item.category,
                    "subcategory": item.subcategory,
                    "style": item.style,
                    "formality": item.formality,
                    "colors": item.colors,
                    "warmthLevel": item.warmth_level,
                })
            })
            .collect();

        let mut prompt = format!(
            "Wardrobe:\n{}\n",
            serde_json::to_string(&wardrobe).unwrap_or_else(|_| "[]".to_string())
        );

        if let Some(occasion) = ctx.occasion {
            prompt.push_str(&format!("Occasion: {}\n", occasion));
        }
        if let Some(weather) = ctx.weather {
            prompt.push_str(&format!(
                "Weather: {:.1}C, {}\n",
                weather.temperature_c, weather.condition
            ));
        }
        if let Some(profile) = ctx.profile {
            let prefs = &profile.preferences;
            if !prefs.favorite_colors.is_empty() {
                prompt.push_str(&format!(
                    "Favorite colors: {}\n",
                    prefs.favorite_colors.join(", ")
                ));
            }
            if !prefs.avoid_colors.is_empty() {
                prompt.push_str(&format!("Avoid colors: {}\n", prefs.avoid_colors.join(", ")));
            }
            if !prefs.preferred_styles.is_empty() {
                prompt.push_str(&format!(
                    "Preferred styles: {}\n",
                    prefs.preferred_styles.join(", ")
                ));
            }
        }
        if !ctx.avoid_combos.is_empty() {
            prompt.push_str(&format!(
                "Do not repeat these item-id combinations: {}\n",
                ctx.avoid_combos.join("; ")
            ));
        }
        prompt.push_str("Suggest 3 to 5 outfits.");
        prompt
    }
}

#[async_trait]
impl Stylist for GeminiStylist {
    async fn suggest(&self, ctx: &StylistContext<'_>) -> StylistOutcome {
        let request = GeminiRequest {
            system_instruction: Some(GeminiSystemInstruction {
                parts: vec![GeminiPart {
                    text: Self::build_system_prompt(),
                }],
            }),
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: Self::build_user_prompt(ctx),
                }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            }),
        };

        let response = match self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Stylist request failed: {}", e);
                return StylistOutcome::Unavailable;
            }
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Stylist quota exceeded");
            return StylistOutcome::Unavailable;
        }
        if !status.is_success() {
            tracing::warn!("Stylist returned error status: {}", status);
            return StylistOutcome::Unavailable;
        }

        let completion: GeminiResponse = match response.json().await {
            Ok(completion) => completion,
            Err(e) => {
                tracing::warn!("Failed to parse stylist response envelope: {}", e);
                return StylistOutcome::Unavailable;
            }
        };

        let text = completion
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .unwrap_or_default();

        match parse_outfits(&text) {
            Some(outfits) if !outfits.is_empty() => StylistOutcome::Suggestions(outfits),
            Some(_) => StylistOutcome::Empty,
            None => {
                tracing::warn!("Stylist output had no parseable structure");
                StylistOutcome::Unavailable
            }
        }
    }
}

/// Parse the stylist's free text into normalized outfits.
///
/// Tolerates prose around the payload and code fences; only the first
/// well-formed JSON block is considered.
pub fn parse_outfits(text: &str) -> Option<Vec<RawOutfit>> {
    let value = extract_json(text)?;

    let entries = match &value {
        Value::Array(entries) => entries.clone(),
        Value::Object(map) => map
            .get("outfits")
            .or_else(|| map.get("suggestions"))
            .and_then(|v| v.as_array())
            .cloned()?,
        _ => return None,
    };

    Some(entries.iter().filter_map(normalize_outfit).collect())
}

/// Find the first well-formed JSON value embedded in free text.
pub fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    // Code fences first, then a balanced-bracket scan.
    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        let after = after.strip_prefix("json").unwrap_or(after);
        if let Some(end) = after.find("```") {
            if let Ok(value) = serde_json::from_str::<Value>(after[..end].trim()) {
                return Some(value);
            }
        }
    }

    let open = trimmed.find(|c| c == '{' || c == '[')?;
    let bytes = trimmed.as_bytes();
    let (open_ch, close_ch) = if bytes[open] == b'{' {
        (b'{', b'}')
    } else {
        (b'[', b']')
    };

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, &b) in bytes[open..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            _ if b == open_ch => depth += 1,
            _ if b == close_ch => {
                depth -= 1;
                if depth == 0 {
                    let candidate = &trimmed[open..open + offset + 1];
                    return serde_json::from_str(candidate).ok();
                }
            }
            _ => {}
        }
    }

    None
}

fn value_as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Object(map) => map.get("id").and_then(value_as_id),
        _ => None,
    }
}

fn value_as_string(value: Option<&Value>) -> Option<String> {
    value.and_then(|v| v.as_str()).map(|s| s.to_string())
}

/// Normalize one loosely-shaped outfit object into a fixed-shape record.
///
/// Item ids may arrive as numbers, numeric strings, nested objects or a
/// bare scalar; an outfit without any resolvable id is dropped.
pub fn normalize_outfit(value: &Value) -> Option<RawOutfit> {
    let map = value.as_object()?;

    let raw_ids = map
        .get("itemIds")
        .or_else(|| map.get("item_ids"))
        .or_else(|| map.get("items"))?;

    let mut item_ids: Vec<i64> = Vec::new();
    match raw_ids {
        Value::Array(entries) => {
            for entry in entries {
                if let Some(id) = value_as_id(entry) {
                    if !item_ids.contains(&id) {
                        item_ids.push(id);
                    }
                }
            }
        }
        scalar => {
            if let Some(id) = value_as_id(scalar) {
                item_ids.push(id);
            }
        }
    }
    if item_ids.is_empty() {
        return None;
    }

    let name = value_as_string(map.get("name").or_else(|| map.get("outfitName")))
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "Styled Look".to_string());

    let confidence = map.get("confidence").and_then(|v| match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    });

    Some(RawOutfit {
        name,
        item_ids,
        confidence: confidence.map(|c| c as i32),
        description: value_as_string(map.get("description")),
        styling_tips: value_as_string(map.get("stylingTips").or_else(|| map.get("styling_tips"))),
        occasion: value_as_string(map.get("occasion")),
    })
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none", rename = "systemInstruction")]
    system_instruction: Option<GeminiSystemInstruction>,
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "generationConfig")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}
