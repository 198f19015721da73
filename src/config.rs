//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/settree/settree.toml`
//! 3. Explicit config file (`--config <file>`)
//! 4. Environment variables: `SETTREE_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{ElementOrder, RenderStyle};

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub style: Option<RenderStyle>,
    pub order: Option<ElementOrder>,
    pub skip_blank_lines: Option<bool>,
    pub header: Option<bool>,
}

/// Unified configuration for settree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Diagram layout (default: ascii)
    pub style: RenderStyle,
    /// Element order inside printed sets (default: insertion)
    pub order: ElementOrder,
    /// Ignore blank input lines instead of rejecting them (default: true)
    pub skip_blank_lines: bool,
    /// Print a header line before each file's tree (default: true)
    pub header: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: RenderStyle::Ascii,
            order: ElementOrder::Insertion,
            skip_blank_lines: true,
            header: true,
        }
    }
}

/// Get the XDG config directory for settree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "settree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("settree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

fn invalid_env(key: &str, reason: String) -> ApplicationError {
    ApplicationError::Config {
        message: format!("SETTREE_{}: {}", key.to_uppercase(), reason),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            style: overlay.style.unwrap_or(self.style),
            order: overlay.order.unwrap_or(self.order),
            skip_blank_lines: overlay.skip_blank_lines.unwrap_or(self.skip_blank_lines),
            header: overlay.header.unwrap_or(self.header),
        }
    }

    /// Load settings with full precedence, using the XDG global config.
    ///
    /// An explicit config file must exist; the global one is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), explicit)
    }

    /// Load settings from the given global and explicit config files.
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, skipped when absent
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config, must exist
        if let Some(path) = explicit {
            debug!("loading config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Apply environment variables
        Self::apply_env_overrides(current, Environment::with_prefix("SETTREE"))
    }

    /// Apply `SETTREE_*` variables from `env` as explicit overrides.
    pub fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env.prefix_separator("_").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("style") {
            settings.style = val.parse().map_err(|e| invalid_env("style", e))?;
        }
        if let Ok(val) = config.get_string("order") {
            settings.order = val.parse().map_err(|e| invalid_env("order", e))?;
        }
        if let Ok(val) = config.get_string("skip_blank_lines") {
            settings.skip_blank_lines = parse_flag(&val).map_err(|e| invalid_env("skip_blank_lines", e))?;
        }
        if let Ok(val) = config.get_string("header") {
            settings.header = parse_flag(&val).map_err(|e| invalid_env("header", e))?;
        }

        Ok(settings)
    }

    /// Render settings as TOML (for `--info`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}

fn parse_flag(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("expected a boolean, got '{}'", other)),
    }
}
