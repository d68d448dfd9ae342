use crate::core::ScoringAdjustments;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    pub gemini: GeminiSettings,
    pub cache: CacheSettings,
    pub suggestion: SuggestionSettings,
    pub scoring: ScoringSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_gemini_temperature")]
    pub temperature: f64,
    #[serde(default = "default_gemini_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_gemini_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}
fn default_gemini_temperature() -> f64 {
    0.4
}
fn default_gemini_max_output_tokens() -> u32 {
    2048
}
fn default_gemini_timeout_secs() -> u64 {
    20
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub weather_ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionSettings {
    pub max_results: Option<usize>,
    pub max_fallback_outfits: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub adjustments: AdjustmentsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdjustmentsConfig {
    #[serde(default = "default_layering_bonus")]
    pub layering_bonus: i32,
    #[serde(default = "default_layering_penalty")]
    pub layering_penalty: i32,
    #[serde(default = "default_layering_floor")]
    pub layering_floor: i32,
    #[serde(default = "default_weather_mismatch_penalty")]
    pub weather_mismatch_penalty: i32,
    #[serde(default = "default_weather_mismatch_floor")]
    pub weather_mismatch_floor: i32,
    #[serde(default = "default_weather_match_bonus")]
    pub weather_match_bonus: i32,
    #[serde(default = "default_favorite_color_bonus")]
    pub favorite_color_bonus: i32,
    #[serde(default = "default_avoid_color_penalty")]
    pub avoid_color_penalty: i32,
    #[serde(default = "default_avoid_color_floor")]
    pub avoid_color_floor: i32,
}

impl Default for AdjustmentsConfig {
    fn default() -> Self {
        Self {
            layering_bonus: default_layering_bonus(),
            layering_penalty: default_layering_penalty(),
            layering_floor: default_layering_floor(),
            weather_mismatch_penalty: default_weather_mismatch_penalty(),
            weather_mismatch_floor: default_weather_mismatch_floor(),
            weather_match_bonus: default_weather_match_bonus(),
            favorite_color_bonus: default_favorite_color_bonus(),
            avoid_color_penalty: default_avoid_color_penalty(),
            avoid_color_floor: default_avoid_color_floor(),
        }
    }
}

impl AdjustmentsConfig {
    pub fn to_adjustments(&self) -> ScoringAdjustments {
        ScoringAdjustments {
            layering_bonus: self.layering_bonus,
            layering_penalty: self.layering_penalty,
            layering_floor: self.layering_floor,
            weather_mismatch_penalty: self.weather_mismatch_penalty,
            weather_mismatch_floor: self.weather_mismatch_floor,
            weather_match_bonus: self.weather_match_bonus,
            favorite_color_bonus: self.favorite_color_bonus,
            avoid_color_penalty: self.avoid_color_penalty,
            avoid_color_floor: self.avoid_color_floor,
        }
    }
}

fn default_layering_bonus() -> i32 { 10 }
fn default_layering_penalty() -> i32 { 25 }
fn default_layering_floor() -> i32 { 40 }
fn default_weather_mismatch_penalty() -> i32 { 20 }
fn default_weather_mismatch_floor() -> i32 { 50 }
fn default_weather_match_bonus() -> i32 { 5 }
fn default_favorite_color_bonus() -> i32 { 5 }
fn default_avoid_color_penalty() -> i32 { 10 }
fn default_avoid_color_floor() -> i32 { 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with STYLO_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with STYLO_)
            // e.g., STYLO_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("STYLO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("STYLO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Promote well-known secret variables into the config tree.
/// GEMINI_API_KEY and STORE_API_KEY are the names the deployment tooling
/// exports; the prefixed forms still win if both are set.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let gemini_api_key = env::var("STYLO_GEMINI__API_KEY")
        .or_else(|_| env::var("GEMINI_API_KEY"))
        .ok();
    let store_api_key = env::var("STYLO_STORE__API_KEY")
        .or_else(|_| env::var("STORE_API_KEY"))
        .ok();
    let store_endpoint = env::var("STYLO_STORE__ENDPOINT").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = gemini_api_key {
        builder = builder.set_override("gemini.api_key", api_key)?;
    }
    if let Some(api_key) = store_api_key {
        builder = builder.set_override("store.api_key", api_key)?;
    }
    if let Some(endpoint) = store_endpoint {
        builder = builder.set_override("store.endpoint", endpoint)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_adjustments() {
        let adjustments = AdjustmentsConfig::default().to_adjustments();
        assert_eq!(adjustments.layering_bonus, 10);
        assert_eq!(adjustments.layering_penalty, 25);
        assert_eq!(adjustments.layering_floor, 40);
        assert_eq!(adjustments.weather_mismatch_penalty, 20);
        assert_eq!(adjustments.avoid_color_floor, 60);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_default_gemini_model() {
        assert_eq!(default_gemini_model(), "gemini-1.5-flash");
        assert_eq!(default_gemini_timeout_secs(), 20);
    }
}
