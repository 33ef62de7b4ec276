//! Configuration validation

use super::engine_config::EngineConfig;
use crate::error::{DumpError, DumpResult};

const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const VALID_FORMATS: &[&str] = &["pretty", "compact", "json"];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration
    pub fn validate(config: &EngineConfig) -> DumpResult<()> {
        Self::validate_index(config)?;
        Self::validate_limits(config)?;
        Self::validate_logging(config)?;
        Ok(())
    }

    fn validate_index(config: &EngineConfig) -> DumpResult<()> {
        let index = &config.index;
        if index.batch_size == 0 {
            return Err(DumpError::config("index.batch_size must be greater than 0"));
        }
        if index.prefix_min == 0 || index.prefix_min > index.prefix_max {
            return Err(DumpError::config(format!(
                "index prefix range {}..={} is empty",
                index.prefix_min, index.prefix_max
            )));
        }
        Ok(())
    }

    fn validate_limits(config: &EngineConfig) -> DumpResult<()> {
        if config.search.max_results == 0 {
            return Err(DumpError::config("search.max_results must be greater than 0"));
        }
        if config.scoped.max_results == 0 {
            return Err(DumpError::config("scoped.max_results must be greater than 0"));
        }
        if config.scoped.batch_size == 0 {
            return Err(DumpError::config("scoped.batch_size must be greater than 0"));
        }
        Ok(())
    }

    fn validate_logging(config: &EngineConfig) -> DumpResult<()> {
        let level = config.logging.level.to_lowercase();
        if !VALID_LEVELS.contains(&level.as_str()) {
            return Err(DumpError::config(format!(
                "Unknown log level '{}'. Valid levels are: {:?}",
                config.logging.level, VALID_LEVELS
            )));
        }
        let format = config.logging.format.to_lowercase();
        if !VALID_FORMATS.contains(&format.as_str()) {
            return Err(DumpError::config(format!(
                "Unknown log format '{}'. Valid formats are: {:?}",
                config.logging.format, VALID_FORMATS
            )));
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Validate this configuration
    pub fn validate(&self) -> DumpResult<()> {
        ConfigValidator::validate(self)
    }
}
