//! Top-level Trellis configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{LoggingConfig, MarkerConfig, ResolutionConfig};
use crate::constants::{LOG_LEVELS, PROJECT_CONFIG_FILE};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`TRELLIS_*`)
/// 3. Project config (`trellis.toml` in the scanned root)
/// 4. User config (`~/.trellis/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TrellisConfig {
    pub markers: MarkerConfig,
    pub resolution: ResolutionConfig,
    pub logging: LoggingConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub output_package: Option<String>,
    pub log_level: Option<String>,
    pub tag_key: Option<String>,
    pub parallel: Option<bool>,
}

impl TrellisConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(path = %user_config_path.display(), error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &TrellisConfig) -> Result<(), ConfigError> {
        if let Some(ref key) = config.markers.tag_key {
            if key.is_empty() || key.contains(|c: char| c == ':' || c == '"' || c.is_whitespace())
            {
                return Err(ConfigError::ValidationFailed {
                    field: "markers.tag_key".to_string(),
                    message: "must be non-empty and free of ':', '\"' and whitespace".to_string(),
                });
            }
        }

        for (field, markers) in [
            ("markers.component", &config.markers.component),
            ("markers.configuration", &config.markers.configuration),
        ] {
            for marker in markers {
                if !is_qualified_type_path(marker) {
                    return Err(ConfigError::InvalidValue {
                        field: field.to_string(),
                        message: format!("'{marker}' is not a qualified type path (expected 'import/path.Name')"),
                    });
                }
            }
        }

        let configuration_markers = config.markers.effective_configuration_markers();
        if let Some(shared) = config
            .markers
            .effective_component_markers()
            .into_iter()
            .find(|m| configuration_markers.contains(m))
        {
            return Err(ConfigError::ValidationFailed {
                field: "markers".to_string(),
                message: format!("'{shared}' is registered as both a component and a configuration marker"),
            });
        }

        if let Some(ref level) = config.logging.level {
            if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "logging.level".to_string(),
                    message: format!("'{level}' is not one of {}", LOG_LEVELS.join(", ")),
                });
            }
        }

        if let Some(ref pkg) = config.resolution.output_package {
            if pkg.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "resolution.output_package".to_string(),
                    message: "must not be empty when set".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Returns the user config path: `~/.trellis/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut TrellisConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: TrellisConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a value.
    fn merge(base: &mut TrellisConfig, other: &TrellisConfig) {
        // Markers
        if !other.markers.component.is_empty() {
            base.markers.component = other.markers.component.clone();
        }
        if !other.markers.configuration.is_empty() {
            base.markers.configuration = other.markers.configuration.clone();
        }
        if other.markers.tag_key.is_some() {
            base.markers.tag_key = other.markers.tag_key.clone();
        }

        // Resolution
        if other.resolution.output_package.is_some() {
            base.resolution.output_package = other.resolution.output_package.clone();
        }
        if other.resolution.parallel.is_some() {
            base.resolution.parallel = other.resolution.parallel;
        }
        if other.resolution.warn_on_directive_fallback.is_some() {
            base.resolution.warn_on_directive_fallback =
                other.resolution.warn_on_directive_fallback;
        }

        // Logging
        if other.logging.level.is_some() {
            base.logging.level = other.logging.level.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `TRELLIS_OUTPUT_PACKAGE`, `TRELLIS_TAG_KEY`, etc.
    fn apply_env_overrides(config: &mut TrellisConfig) {
        if let Ok(val) = std::env::var("TRELLIS_OUTPUT_PACKAGE") {
            config.resolution.output_package = Some(val);
        }
        if let Ok(val) = std::env::var("TRELLIS_TAG_KEY") {
            config.markers.tag_key = Some(val);
        }
        if let Ok(val) = std::env::var("TRELLIS_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.resolution.parallel = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TRELLIS_WARN_ON_DIRECTIVE_FALLBACK") {
            if let Ok(v) = val.parse::<bool>() {
                config.resolution.warn_on_directive_fallback = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TRELLIS_LOG_LEVEL") {
            config.logging.level = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut TrellisConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.output_package {
            config.resolution.output_package = Some(v.clone());
        }
        if let Some(ref v) = cli.log_level {
            config.logging.level = Some(v.clone());
        }
        if let Some(ref v) = cli.tag_key {
            config.markers.tag_key = Some(v.clone());
        }
        if let Some(v) = cli.parallel {
            config.resolution.parallel = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// `import/path.Name` with a non-empty path and name.
fn is_qualified_type_path(marker: &str) -> bool {
    match marker.rsplit_once('.') {
        Some((path, name)) => {
            !path.is_empty() && !name.is_empty() && !marker.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Returns the user-level trellis config directory: `~/.trellis/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".trellis"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
