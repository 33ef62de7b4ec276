//! Core error type for Dumpspace

use thiserror::Error;

/// Result type alias for Dumpspace operations
pub type DumpResult<T> = Result<T, DumpError>;

/// Main error type for Dumpspace
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DumpError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },

    /// Resource not found
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        resource_type: Option<String>,
    },

    /// No dataset has been loaded into the engine yet
    #[error("No dataset loaded")]
    NotLoaded,

    /// A build was invalidated by a newer dataset load
    #[error("Build for generation {generation} was superseded by a newer load")]
    Superseded { generation: u64 },

    /// Operation was cancelled
    #[error("Operation was cancelled")]
    Cancelled,
}

impl DumpError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "DUMP_CONFIG",
            Self::InvalidInput { .. } => "DUMP_INVALID_INPUT",
            Self::NotFound { .. } => "DUMP_NOT_FOUND",
            Self::NotLoaded => "DUMP_NOT_LOADED",
            Self::Superseded { .. } => "DUMP_SUPERSEDED",
            Self::Cancelled => "DUMP_CANCELLED",
        }
    }
}
