//! Application configuration. Model credentials, endpoints, map settings.

use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_MAP_ZOOM: u8 = 15;
/// Highest zoom level served by the standard OSM tile layer.
pub const MAX_MAP_ZOOM: u8 = 19;
pub const DEFAULT_MOCK_DELAY_MS: u64 = 800;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Generative Model Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Model API key. Read from SITE_SELECT_API_KEY, then GEMINI_API_KEY, then API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL (without the `/models/...` suffix). Read from SITE_SELECT_API_URL.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Model name. Defaults to "gemini-2.5-flash". Read from SITE_SELECT_MODEL.
    #[serde(default)]
    pub model: Option<String>,

    /// Optional request timeout in seconds. Unset means the transport default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Simulated latency of the mock model in ms. Read from SITE_SELECT_MOCK_DELAY_MS.
    #[serde(default)]
    pub mock_delay_ms: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Map Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Tile zoom level for card maps (0-19). Read from SITE_SELECT_MAP_ZOOM.
    #[serde(default)]
    pub map_zoom: Option<u8>,

    /// Tile URL template with `{z}`, `{x}`, `{y}`. Read from SITE_SELECT_TILE_URL.
    #[serde(default)]
    pub tile_url: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("SITE_SELECT"));
        if let Ok(path) = std::env::var("SITE_SELECT_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the model API key if configured. Empty values count as unset.
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Returns the API base URL without a trailing slash.
    pub fn api_url_or_default(&self) -> String {
        self.api_url
            .as_deref()
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn model_or_default(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn request_timeout(&self) -> Option<std::time::Duration> {
        self.request_timeout_secs
            .filter(|s| *s > 0)
            .map(std::time::Duration::from_secs)
    }

    pub fn mock_delay_ms_or_default(&self) -> u64 {
        self.mock_delay_ms.unwrap_or(DEFAULT_MOCK_DELAY_MS)
    }

    /// Returns the map zoom, clamped to the tile layer's range. Defaults to 15.
    pub fn map_zoom_or_default(&self) -> u8 {
        self.map_zoom.unwrap_or(DEFAULT_MAP_ZOOM).min(MAX_MAP_ZOOM)
    }

    pub fn tile_url_or_default(&self) -> String {
        self.tile_url
            .clone()
            .unwrap_or_else(|| DEFAULT_TILE_URL.to_string())
    }

    /// Returns true if a real model is configured (API key present).
    pub fn is_ai_configured(&self) -> bool {
        self.api_key().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_url_or_default(), DEFAULT_API_URL);
        assert_eq!(cfg.model_or_default(), "gemini-2.5-flash");
        assert_eq!(cfg.map_zoom_or_default(), 15);
        assert_eq!(cfg.tile_url_or_default(), DEFAULT_TILE_URL);
        assert!(cfg.request_timeout().is_none());
    }

    #[test]
    fn test_zoom_clamped_and_url_trimmed() {
        let cfg = AppConfig {
            map_zoom: Some(25),
            api_url: Some("http://localhost:8080/v1beta/".to_string()),
            request_timeout_secs: Some(30),
            ..Default::default()
        };
        assert_eq!(cfg.map_zoom_or_default(), MAX_MAP_ZOOM);
        assert_eq!(cfg.api_url_or_default(), "http://localhost:8080/v1beta");
        assert_eq!(
            cfg.request_timeout(),
            Some(std::time::Duration::from_secs(30))
        );
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let cfg = AppConfig {
            api_key: Some("secret".to_string()),
            ..Default::default()
        };
        assert_eq!(cfg.api_key().as_deref(), Some("secret"));
        assert!(cfg.is_ai_configured());

        let blank = AppConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        // Blank explicit key falls through to the filter, not to the env fallbacks.
        assert!(blank.api_key().is_none());
    }
}
