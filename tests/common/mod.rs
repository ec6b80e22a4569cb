//! Common test utilities and helpers

#![allow(dead_code)]

use std::fs;
use tempfile::TempDir;

/// Billing/shipping glossary shared by most integration tests
pub const SAMPLE_DEFINITIONS: &str = r#"
global:
  SLA:
    aka: service level agreement
    description: Promised availability.
billing:
  invoice:
    aka: bill
    description: A request for payment.
  dunning:
    aka: [reminder, chaser]
shipping:
  manifest:
    description: List of parcels in a shipment.
"#;

/// Create a workspace root with the given glossary files
pub fn create_workspace(definitions: Option<&str>, known: Option<&str>) -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp workspace");
    if let Some(content) = definitions {
        fs::write(temp.path().join(".jargon.yml"), content).expect("Failed to write definitions");
    }
    if let Some(content) = known {
        fs::write(temp.path().join(".jargon.known.yml"), content)
            .expect("Failed to write known terms");
    }
    temp
}

/// Workspace with [`SAMPLE_DEFINITIONS`] and no known terms
pub fn sample_workspace() -> TempDir {
    create_workspace(Some(SAMPLE_DEFINITIONS), None)
}

/// `file://` URI of a workspace directory
pub fn folder_uri(workspace: &TempDir) -> String {
    url::Url::from_directory_path(workspace.path())
        .expect("Absolute temp path")
        .to_string()
        .trim_end_matches('/')
        .to_string()
}
