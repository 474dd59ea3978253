#![allow(clippy::result_large_err)]

use super::MediatagConfig;
use crate::core::error::AppError;
use crate::core::types::{ErrorCategory, OutputFormat};
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "mediatag.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from workspace root (workspace/mediatag.toml)
    /// Environment variables override config file values
    pub fn load_from_workspace(workspace_path: &Path) -> Result<MediatagConfig, AppError> {
        let config_path = workspace_path.join(CONFIG_FILE_NAME);
        let mut config = Self::load_from_file(&config_path)?.unwrap_or_default();
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Load config from an explicit path, which must exist
    pub fn load_explicit(path: &Path) -> Result<MediatagConfig, AppError> {
        let mut config = Self::load_from_file(path)?.ok_or_else(|| {
            AppError::new(
                ErrorCategory::ConfigError,
                format!("config file {} does not exist", path.display()),
            )
            .with_code("CFG-001")
        })?;
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<MediatagConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
            .with_code("CFG-001")
        })?;

        let config: MediatagConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
            .with_code("CFG-001")
        })?;

        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(Some(config))
    }

    /// Apply environment variable overrides to the configuration
    /// Unparseable values are ignored
    fn apply_env_overrides(config: &mut MediatagConfig) {
        if let Ok(path) = env::var("MEDIATAG_SCHEMA_PATH") {
            config.schema.path = PathBuf::from(path);
        }

        if let Ok(check_cycles) = env::var("MEDIATAG_ORDERING_CHECK_CYCLES") {
            if let Ok(check_cycles) = check_cycles.parse::<bool>() {
                config.ordering.check_cycles = check_cycles;
            }
        }

        if let Ok(max_moves) = env::var("MEDIATAG_ORDERING_MAX_MOVES") {
            if let Ok(max_moves) = max_moves.parse::<usize>() {
                config.ordering.max_moves = Some(max_moves);
            }
        }

        if let Ok(format) = env::var("MEDIATAG_OUTPUT_FORMAT") {
            if let Ok(format) = format.parse::<OutputFormat>() {
                config.output.format = format;
            }
        }
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "MEDIATAG_SCHEMA_PATH - Override the schema file (default: events_tags.yaml)",
            "MEDIATAG_ORDERING_CHECK_CYCLES - Reject cyclic tag lists before ordering (true/false, default: true)",
            "MEDIATAG_ORDERING_MAX_MOVES - Override the ordering move budget",
            "MEDIATAG_OUTPUT_FORMAT - Override output format (text/json, default: text)",
        ]
    }
}
