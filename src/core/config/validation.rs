#![allow(clippy::result_large_err)]

use super::MediatagConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &MediatagConfig) -> Result<(), AppError> {
        if config.schema.path.as_os_str().is_empty() {
            return Err(AppError::new(
                ErrorCategory::ConfigError,
                "schema.path cannot be empty",
            )
            .with_code("CFG-002"));
        }

        if config.ordering.max_moves == Some(0) {
            return Err(AppError::new(
                ErrorCategory::ConfigError,
                "ordering.max_moves must be >= 1 when set",
            )
            .with_code("CFG-002"));
        }

        Ok(())
    }
}
