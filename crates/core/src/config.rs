//! Deck-building configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::geometry::SlideGeometry;
use crate::script::Script;
use crate::{Error, Result};

/// Default translation target (Odia).
pub const DEFAULT_TARGET_LANGUAGE: &str = "or";

/// Body text beyond this many characters is dropped before layout.
pub const DEFAULT_MAX_BODY_CHARS: usize = 30_000;

/// Settings for one deck build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Language code passed to the translator.
    pub target_language: String,

    /// Script whose presence means the article needs no translation.
    pub target_script: Script,

    /// Maximum body length in characters.
    pub max_body_chars: usize,

    /// Maximum number of slides composed at the same time.
    pub concurrency: usize,

    /// Geometry shared by wrapping and rendering.
    pub geometry: SlideGeometry,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            target_script: Script::odia(),
            max_body_chars: DEFAULT_MAX_BODY_CHARS,
            concurrency: 4,
            geometry: SlideGeometry::default(),
        }
    }
}

impl DeckConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("invalid configuration: {}", e)))?;
        config.geometry.validate()?;
        config.concurrency = config.concurrency.max(1);
        Ok(config)
    }

    /// Read a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        log::debug!("Loaded configuration from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Set the target language, switching the target script to match when
    /// the language is known.
    pub fn with_target_language(mut self, language: impl Into<String>) -> Self {
        self.target_language = language.into();
        match Script::for_language(&self.target_language) {
            Some(script) => self.target_script = script,
            None => log::warn!(
                "No script known for language {:?}; keeping {}",
                self.target_language,
                self.target_script.name
            ),
        }
        self
    }

    /// Set the target script explicitly.
    pub fn with_target_script(mut self, script: Script) -> Self {
        self.target_script = script;
        self
    }

    /// Set the maximum number of concurrently composed slides.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1); // At least one slide at a time
        self
    }

    /// Set the maximum body length in characters.
    pub fn with_max_body_chars(mut self, max_body_chars: usize) -> Self {
        self.max_body_chars = max_body_chars;
        self
    }

    /// Replace the slide geometry.
    pub fn with_geometry(mut self, geometry: SlideGeometry) -> Self {
        self.geometry = geometry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeckConfig::new();
        assert_eq!(config.target_language, "or");
        assert_eq!(config.target_script, Script::odia());
        assert_eq!(config.max_body_chars, 30_000);
        assert_eq!(config.geometry, SlideGeometry::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DeckConfig::from_json_str(
            r##"{"concurrency": 2, "geometry": {"line_height": 48, "palette": {"body": "#333333"}}}"##,
        )
        .unwrap();
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.geometry.line_height, 48);
        assert_eq!(config.geometry.width, 1280);
        assert_eq!(config.geometry.palette.body.to_string(), "#333333");
        assert_eq!(config.target_language, "or");
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        assert!(matches!(
            DeckConfig::from_json_str("{not json"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            DeckConfig::from_json_str(r##"{"geometry": {"palette": {"body": "blue"}}}"##),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_invalid_geometry_is_rejected() {
        assert!(matches!(
            DeckConfig::from_json_str(r#"{"geometry": {"line_height": 0}}"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_oversized_geometry_is_config_error() {
        assert!(matches!(
            DeckConfig::from_json_str(r#"{"geometry": {"pad": 4000000000}}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            DeckConfig::from_json_str(r#"{"geometry": {"title_advance": 4294967295}}"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_with_target_language_switches_script() {
        let config = DeckConfig::new().with_target_language("hi");
        assert_eq!(config.target_script.name, "Devanagari");

        let config = DeckConfig::new().with_target_language("xx");
        assert_eq!(config.target_language, "xx");
        assert_eq!(config.target_script, Script::odia());
    }

    #[test]
    fn test_concurrency_is_at_least_one() {
        assert_eq!(DeckConfig::new().with_concurrency(0).concurrency, 1);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = DeckConfig::new().with_target_language("ta");
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(DeckConfig::from_json_str(&json).unwrap(), config);
    }
}
