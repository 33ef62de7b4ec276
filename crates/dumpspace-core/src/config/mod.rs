//! Configuration management for Dumpspace

mod engine_config;
mod file_loader;
mod logging_config;
mod validation;

pub use engine_config::{EngineConfig, IndexConfig, ReferenceScope, ScopedConfig, SearchConfig};
pub use file_loader::load_from_file;
pub use logging_config::LoggingConfig;
pub use validation::ConfigValidator;
