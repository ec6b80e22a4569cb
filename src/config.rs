//! Configuration for Jargon
//!
//! # Configuration File Format
//!
//! TOML, passed with `--config` (all keys optional):
//!
//! ```toml
//! [files]
//! definitions = ".jargon.yml"
//! known_terms = ".jargon.known.yml"
//!
//! [diagnostics]
//! source = "jargon"
//! severity = "information"
//! ```

use crate::error::{JargonError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tower_lsp::lsp_types::DiagnosticSeverity;

/// Default definitions file name at each workspace root
pub const DEFINITIONS_FILE: &str = ".jargon.yml";

/// Default known-terms file name at each workspace root
pub const KNOWN_TERMS_FILE: &str = ".jargon.known.yml";

/// Complete Jargon configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JargonConfig {
    /// Glossary file names
    #[serde(default)]
    pub files: FileSettings,

    /// How annotations are reported to the editor
    #[serde(default)]
    pub diagnostics: DiagnosticSettings,
}

/// Glossary file names looked up at every workspace root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default = "default_definitions_file")]
    pub definitions: String,

    #[serde(default = "default_known_terms_file")]
    pub known_terms: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            definitions: default_definitions_file(),
            known_terms: default_known_terms_file(),
        }
    }
}

/// Diagnostic reporting settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticSettings {
    /// `source` field of published diagnostics; code actions only apply to it
    #[serde(default = "default_source")]
    pub source: String,

    #[serde(default)]
    pub severity: AnnotationSeverity,
}

impl Default for DiagnosticSettings {
    fn default() -> Self {
        Self {
            source: default_source(),
            severity: AnnotationSeverity::default(),
        }
    }
}

/// LSP diagnostic severity used for annotations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationSeverity {
    Warning,
    #[default]
    Information,
    Hint,
}

impl AnnotationSeverity {
    /// Severity of published diagnostics
    pub fn lsp_severity(self) -> DiagnosticSeverity {
        match self {
            AnnotationSeverity::Warning => DiagnosticSeverity::WARNING,
            AnnotationSeverity::Information => DiagnosticSeverity::INFORMATION,
            AnnotationSeverity::Hint => DiagnosticSeverity::HINT,
        }
    }
}

// Default value helpers
fn default_definitions_file() -> String {
    DEFINITIONS_FILE.to_string()
}

fn default_known_terms_file() -> String {
    KNOWN_TERMS_FILE.to_string()
}

fn default_source() -> String {
    "jargon".to_string()
}

impl JargonConfig {
    /// Load configuration from file, falling back to defaults when missing
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("Config file not found, using defaults: {:?}", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            JargonError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config file: {}", e),
            ))
        })?;

        let config = Self::from_toml(&content)?;
        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| JargonError::Config(format!("Failed to parse config file: {}", e)))
    }
}
