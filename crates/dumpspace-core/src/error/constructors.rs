//! Constructor methods for DumpError

use super::types::DumpError;

impl DumpError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: None,
        }
    }

    /// Create an invalid input error naming the offending field
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a not found error for a named entity of a given kind
    pub fn entity_not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        let kind = kind.into();
        Self::NotFound {
            message: format!("{} '{}' does not exist in the loaded dataset", kind, name.into()),
            resource_type: Some(kind),
        }
    }

    /// Create a superseded-build error
    pub fn superseded(generation: u64) -> Self {
        Self::Superseded { generation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_not_found_message() {
        let err = DumpError::entity_not_found("class", "UActor");
        assert_eq!(
            err.to_string(),
            "Not found: class 'UActor' does not exist in the loaded dataset"
        );
        assert_eq!(err.error_code(), "DUMP_NOT_FOUND");
    }

    #[test]
    fn test_superseded_message() {
        let err = DumpError::superseded(3);
        assert_eq!(err.error_code(), "DUMP_SUPERSEDED");
        assert!(err.to_string().contains("generation 3"));
    }
}
