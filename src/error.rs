//! Error types for the Jargon glossary engine
//!
//! This module provides comprehensive error handling using thiserror for
//! structured error definitions and anyhow for error propagation.

use thiserror::Error;

/// Main error type for Jargon operations
#[derive(Error, Debug)]
pub enum JargonError {
    /// A document path matched more than one declared namespace
    #[error(
        "Ambiguity found for {query} in {path}. Name your namespaces more concretely. Possible namespaces are: {}",
        candidates.join(",")
    )]
    AmbiguousNamespace {
        query: String,
        path: String,
        candidates: Vec<String>,
    },

    /// No glossary definitions were found at any root
    #[error("No .jargon.yml files were found in: {}", roots.join(", "))]
    EmptyGlossary { roots: Vec<String> },

    /// Definition document has an unusable shape
    #[error("Invalid glossary definition: {0}")]
    InvalidDefinition(String),

    /// Workspace folder URI could not be mapped to a local path
    #[error("Invalid workspace URI: {0}")]
    InvalidUri(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse or emit error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Jargon operations
pub type Result<T> = std::result::Result<T, JargonError>;

/// Convert anyhow::Error to JargonError
impl From<anyhow::Error> for JargonError {
    fn from(err: anyhow::Error) -> Self {
        JargonError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = JargonError::InvalidUri("http://example.com".to_string());
        assert_eq!(err.to_string(), "Invalid workspace URI: http://example.com");
    }

    #[test]
    fn test_ambiguity_message_lists_candidates() {
        let err = JargonError::AmbiguousNamespace {
            query: "token".to_string(),
            path: "/service/authz/handler.ts".to_string(),
            candidates: vec!["auth".to_string(), "authz".to_string()],
        };

        let message = err.to_string();
        assert!(message.contains("token"));
        assert!(message.contains("/service/authz/handler.ts"));
        assert!(message.ends_with("auth,authz"));
    }

    #[test]
    fn test_error_conversion() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{ not: a list").unwrap_err();
        let jargon_err: JargonError = yaml_err.into();
        assert!(matches!(jargon_err, JargonError::Yaml(_)));
    }
}
