//! Analysis configuration.
//!
//! YAML file with per-field defaults. Lookup order: explicit path, then
//! `COLORCARD_CONFIG`, then `<config dir>/colorcard/config.yaml`, then defaults.

use crate::cache::{DEFAULT_HISTOGRAM_ENTRIES, DEFAULT_IMAGE_MEMORY_MB};
use crate::error::{Error, Result};
use crate::image::DEFAULT_SAMPLE_STEP;
use crate::overlay::DEFAULT_OVERLAY_STEP;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "COLORCARD_CONFIG";

/// Sampling settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Histogram sampling stride.
    #[serde(default = "default_sample_step")]
    pub sample_step: u32,

    /// Pick the stride from image size instead of `sample_step`.
    #[serde(default)]
    pub adaptive_sampling: bool,

    /// Zone overlay stride and block size.
    #[serde(default = "default_overlay_step")]
    pub overlay_step: u32,
}

fn default_sample_step() -> u32 {
    DEFAULT_SAMPLE_STEP
}
fn default_overlay_step() -> u32 {
    DEFAULT_OVERLAY_STEP
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_step: default_sample_step(),
            adaptive_sampling: false,
            overlay_step: default_overlay_step(),
        }
    }
}

/// Cache limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Histograms kept.
    #[serde(default = "default_histogram_entries")]
    pub histogram_entries: usize,

    /// Image cache budget in megabytes.
    #[serde(default = "default_image_memory_mb")]
    pub image_memory_mb: usize,
}

fn default_histogram_entries() -> usize {
    DEFAULT_HISTOGRAM_ENTRIES
}
fn default_image_memory_mb() -> usize {
    DEFAULT_IMAGE_MEMORY_MB
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            histogram_entries: default_histogram_entries(),
            image_memory_mb: default_image_memory_mb(),
        }
    }
}

/// Light/dark preference for themed colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow the system setting.
    #[default]
    Auto,
    /// Always light.
    Light,
    /// Always dark.
    Dark,
}

impl ThemePreference {
    /// Resolve against the system setting.
    #[must_use]
    pub const fn is_dark(self, system_dark: bool) -> bool {
        match self {
            Self::Auto => system_dark,
            Self::Light => false,
            Self::Dark => true,
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Theme preference.
    #[serde(default)]
    pub theme: ThemePreference,

    /// Show hex codes next to swatches.
    #[serde(default = "default_hex_visible")]
    pub hex_visible: bool,
}

fn default_hex_visible() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { theme: ThemePreference::default(), hex_visible: default_hex_visible() }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Sampling settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Cache limits.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Presentation settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            analysis: AnalysisConfig::default(),
            cache: CacheConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        let config = Self::parse(&content)?;
        crate::debug!("config", "loaded {}", path.display());
        Ok(config)
    }

    /// Parses and validates configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails, or
    /// [`Error::ConfigInvalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse { line, message: e.to_string() }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        let invalid = |key: &str, message: &str| {
            Err(Error::ConfigInvalid { key: key.to_string(), message: message.to_string() })
        };
        if self.version != 1 {
            return invalid("version", "only version 1 is supported");
        }
        if self.analysis.sample_step == 0 {
            return invalid("analysis.sample_step", "must be at least 1");
        }
        if self.analysis.overlay_step == 0 {
            return invalid("analysis.overlay_step", "must be at least 1");
        }
        if self.cache.histogram_entries == 0 {
            return invalid("cache.histogram_entries", "must be at least 1");
        }
        Ok(())
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            crate::warn!("config", "{e}; using defaults");
            Self::default()
        })
    }

    /// `<config dir>/colorcard/config.yaml`, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("colorcard").join("config.yaml"))
    }

    /// Loads from `COLORCARD_CONFIG` if set, else the default path, else defaults.
    #[must_use]
    pub fn from_env_or_default() -> Self {
        let path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from).or_else(Self::default_path);
        match path {
            Some(path) if path.exists() => Self::load_or_default(path),
            _ => Self::default(),
        }
    }

    /// Serializes to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self)
            .map_err(|e| Error::ConfigInvalid { key: "config".to_string(), message: e.to_string() })
    }

    /// Writes the configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem operation fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::new();

        assert_eq!(config.version, 1);
        assert_eq!(config.analysis.sample_step, 4);
        assert_eq!(config.analysis.overlay_step, 4);
        assert!(!config.analysis.adaptive_sampling);
        assert_eq!(config.cache.histogram_entries, 50);
        assert_eq!(config.cache.image_memory_mb, 500);
        assert_eq!(config.display.theme, ThemePreference::Auto);
        assert!(config.display.hex_visible);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_minimal() {
        let config = Config::parse("version: 1").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_parse_full() {
        let yaml = r#"
version: 1
analysis:
  sample_step: 2
  adaptive_sampling: true
  overlay_step: 8
cache:
  histogram_entries: 10
  image_memory_mb: 64
display:
  theme: dark
  hex_visible: false
"#;

        let config = Config::parse(yaml).unwrap();

        assert_eq!(config.analysis.sample_step, 2);
        assert!(config.analysis.adaptive_sampling);
        assert_eq!(config.analysis.overlay_step, 8);
        assert_eq!(config.cache.histogram_entries, 10);
        assert_eq!(config.cache.image_memory_mb, 64);
        assert_eq!(config.display.theme, ThemePreference::Dark);
        assert!(!config.display.hex_visible);
    }

    #[test]
    fn test_config_parse_error_includes_line() {
        let yaml = r#"
version: 1
analysis:
  sample_step: not_a_number
"#;

        let err = Config::parse(yaml).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }), "{err}");
        assert!(err.to_string().contains('4'), "Error should include line number");
    }

    #[test]
    fn test_config_rejects_zero_step() {
        let err = Config::parse("analysis:\n  sample_step: 0\n").unwrap_err();
        match err {
            Error::ConfigInvalid { key, .. } => assert_eq!(key, "analysis.sample_step"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_config_rejects_unknown_theme() {
        assert!(matches!(
            Config::parse("display:\n  theme: sepia\n"),
            Err(Error::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_theme_resolution() {
        assert!(ThemePreference::Auto.is_dark(true));
        assert!(!ThemePreference::Auto.is_dark(false));
        assert!(ThemePreference::Dark.is_dark(false));
        assert!(!ThemePreference::Light.is_dark(true));
    }

    #[test]
    fn test_config_load_or_default() {
        let config = Config::load_or_default("/nonexistent/path");
        assert_eq!(config.version, 1);
        assert!(matches!(Config::load("/nonexistent/path"), Err(Error::ConfigNotFound(_))));
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.yaml");

        let mut config = Config::default();
        config.analysis.sample_step = 3;
        config.display.theme = ThemePreference::Light;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(std::fs::read_to_string(&path).unwrap().contains("theme: light"));
    }

    #[test]
    fn test_default_path_shape() {
        if let Some(path) = Config::default_path() {
            assert!(path.ends_with("colorcard/config.yaml"));
        }
    }
}
