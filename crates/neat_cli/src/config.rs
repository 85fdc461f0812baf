//! `neat.toml` handling
//!
//! Every section is optional:
//!
//! ```toml
//! [timing]
//! loading_ms = 2000
//! verify_ms = 2000
//! reset_ms = 1000
//!
//! [text]
//! font_size = 16.0
//! char_advance = 0.55
//!
//! [text.widths]
//! Schedule = 70.0
//!
//! [engine]
//! frame_rate = 120
//!
//! [catalog]
//! path = "artworks.toml"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use neat_core::{TableTextMeasurer, TextLayoutOptions};
use neat_widgets::{
    ArtworkConfig, Catalog, HostConfig, PinConfig, ShowcaseConfig, StatusConfig,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG: &str = "neat.toml";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NeatConfig {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub text: TextConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Phase durations in milliseconds
#[derive(Debug, Deserialize, Serialize)]
pub struct TimingConfig {
    #[serde(default = "default_loading_ms")]
    pub loading_ms: u64,
    #[serde(default = "default_verify_ms")]
    pub verify_ms: u64,
    #[serde(default = "default_reset_ms")]
    pub reset_ms: u64,
}

fn default_loading_ms() -> u64 {
    2000
}

fn default_verify_ms() -> u64 {
    2000
}

fn default_reset_ms() -> u64 {
    1000
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            loading_ms: default_loading_ms(),
            verify_ms: default_verify_ms(),
            reset_ms: default_reset_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TextConfig {
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Average advance per character in em, used for unpinned labels
    #[serde(default = "default_char_advance")]
    pub char_advance: f32,
    /// Pinned label widths in pixels
    #[serde(default)]
    pub widths: BTreeMap<String, f32>,
}

fn default_font_size() -> f32 {
    16.0
}

fn default_char_advance() -> f32 {
    0.55
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            char_advance: default_char_advance(),
            widths: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

fn default_frame_rate() -> u32 {
    120
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// TOML file with `[[artwork]]` entries; the built-in catalog otherwise
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl NeatConfig {
    /// Load `path`, or the defaults when no path is given and `neat.toml`
    /// does not exist in the working directory
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG), false),
        };

        if !path.exists() {
            if required {
                anyhow::bail!("Config file {} not found", path.display());
            }
            tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        // Catalog paths are relative to the config file
        if let (Some(catalog), Some(dir)) = (config.catalog.path.as_mut(), path.parent()) {
            if catalog.is_relative() {
                *catalog = dir.join(&*catalog);
            }
        }

        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: NeatConfig = toml::from_str(content)?;
        if config.engine.frame_rate == 0 {
            anyhow::bail!("engine.frame_rate must be positive");
        }
        if config.text.font_size.is_nan() || config.text.font_size <= 0.0 {
            anyhow::bail!("text.font_size must be positive");
        }
        Ok(config)
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog.path {
            Some(path) => Catalog::load(path)
                .with_context(|| format!("Failed to load catalog {}", path.display())),
            None => Ok(Catalog::builtin()),
        }
    }

    pub fn measurer(&self) -> Arc<TableTextMeasurer> {
        let mut measurer = TableTextMeasurer::new()
            .with_options(TextLayoutOptions::new().with_char_advance(self.text.char_advance));
        for (label, width) in &self.text.widths {
            measurer.insert(label.clone(), *width);
        }
        Arc::new(measurer)
    }

    pub fn showcase(&self) -> Result<ShowcaseConfig> {
        let timing = &self.timing;
        Ok(ShowcaseConfig {
            status: StatusConfig::new().loading(Duration::from_millis(timing.loading_ms)),
            pin: PinConfig::new()
                .verify(Duration::from_millis(timing.verify_ms))
                .reset(Duration::from_millis(timing.reset_ms)),
            artwork: ArtworkConfig::new(),
            catalog: self.load_catalog()?,
            host: HostConfig::with_frame_rate(self.engine.frame_rate)
                .font_size(self.text.font_size),
            ..ShowcaseConfig::default()
        })
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = NeatConfig::from_toml_str("").unwrap();
        assert_eq!(config.timing.loading_ms, 2000);
        assert_eq!(config.timing.verify_ms, 2000);
        assert_eq!(config.timing.reset_ms, 1000);
        assert_eq!(config.text.font_size, 16.0);
        assert_eq!(config.engine.frame_rate, 120);
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config = NeatConfig::from_toml_str(
            r#"
            [timing]
            loading_ms = 500

            [text.widths]
            Schedule = 70.0
            Meeting = 60.0
            "#,
        )
        .unwrap();

        assert_eq!(config.timing.loading_ms, 500);
        assert_eq!(config.timing.reset_ms, 1000);
        assert_eq!(config.text.widths.get("Meeting"), Some(&60.0));

        let showcase = config.showcase().unwrap();
        assert_eq!(showcase.status.loading, Duration::from_millis(500));
        assert_eq!(showcase.host.frame_interval, Duration::from_millis(8));
    }

    #[test]
    fn test_measurer_uses_pins_and_advance() {
        let config = NeatConfig::from_toml_str(
            r#"
            [text]
            char_advance = 0.5

            [text.widths]
            Schedule = 70.0
            "#,
        )
        .unwrap();

        let measurer = config.measurer();
        assert_eq!(neat_core::TextMeasurer::measure(&*measurer, "Schedule", 16.0).width, 70.0);
        assert_eq!(neat_core::TextMeasurer::measure(&*measurer, "Failed", 16.0).width, 48.0);
    }

    #[test]
    fn test_rejects_zero_frame_rate() {
        assert!(NeatConfig::from_toml_str("[engine]\nframe_rate = 0").is_err());
    }

    #[test]
    fn test_rejects_unknown_types() {
        assert!(NeatConfig::from_toml_str("[timing]\nloading_ms = \"soon\"").is_err());
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let err = NeatConfig::load(Some(Path::new("/nonexistent/neat.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = NeatConfig::default();
        let text = config.to_toml().unwrap();
        let back = NeatConfig::from_toml_str(&text).unwrap();
        assert_eq!(back.engine.frame_rate, 120);
    }
}
