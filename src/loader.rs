//! Glossary compilation from workspace roots
//!
//! Every workspace root may carry a definitions file and a known-terms file.
//! Roots are processed in order and layered into one [`Glossary`]; a root
//! without either file simply contributes nothing.

use crate::config::JargonConfig;
use crate::definitions::{DefinitionDocument, KnownTermsDocument};
use crate::error::{JargonError, Result};
use crate::glossary::Glossary;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

/// Map a workspace location (`file://` URI or plain path) to a local path
pub fn root_path(location: &str) -> Result<PathBuf> {
    if location.starts_with("file:") {
        let url = Url::parse(location)
            .map_err(|e| JargonError::InvalidUri(format!("{}: {}", location, e)))?;
        return url
            .to_file_path()
            .map_err(|_| JargonError::InvalidUri(location.to_string()));
    }

    if location.contains("://") {
        return Err(JargonError::InvalidUri(location.to_string()));
    }

    Ok(PathBuf::from(location))
}

/// Reads glossary documents from workspace roots
#[derive(Debug, Clone, Default)]
pub struct GlossaryLoader {
    config: JargonConfig,
}

impl GlossaryLoader {
    pub fn new(config: JargonConfig) -> Self {
        Self { config }
    }

    /// Definitions file at `root`
    pub fn definitions_path(&self, root: &Path) -> PathBuf {
        root.join(&self.config.files.definitions)
    }

    /// Known-terms file at `root`
    pub fn known_terms_path(&self, root: &Path) -> PathBuf {
        root.join(&self.config.files.known_terms)
    }

    /// Whether `location` names one of the glossary files themselves
    pub fn is_glossary_document(&self, location: &str) -> bool {
        location.ends_with(&self.config.files.definitions)
            || location.ends_with(&self.config.files.known_terms)
    }

    /// Compile a glossary from every root, in order
    pub fn compile<P: AsRef<Path>>(&self, roots: &[P]) -> Result<Glossary> {
        let mut glossary = Glossary::new();

        for root in roots {
            let root = root.as_ref();

            if let Some(definitions) = self.read_definitions(root)? {
                debug!(
                    "Loaded {} term(s) from {:?}",
                    definitions.term_count(),
                    self.definitions_path(root)
                );
                glossary.define_all(&definitions);
            }

            if let Some(known) = self.read_known_terms(root)? {
                glossary.apply_known(&known);
            }
        }

        info!(
            "Compiled glossary from {} root(s): {} namespace(s)",
            roots.len(),
            glossary.namespaces().len()
        );
        Ok(glossary)
    }

    /// Compile, treating an empty result as a setup error
    pub fn compile_required<P: AsRef<Path>>(&self, roots: &[P]) -> Result<Glossary> {
        let glossary = self.compile(roots)?;
        if glossary.is_empty() {
            return Err(JargonError::EmptyGlossary {
                roots: roots
                    .iter()
                    .map(|root| root.as_ref().display().to_string())
                    .collect(),
            });
        }
        Ok(glossary)
    }

    /// Compile from workspace folder URIs or paths
    pub fn compile_locations(&self, locations: &[String]) -> Result<Glossary> {
        let roots = locations
            .iter()
            .map(|location| root_path(location))
            .collect::<Result<Vec<_>>>()?;
        self.compile_required(&roots)
    }

    /// Read the definitions document at `root`, if present
    pub fn read_definitions(&self, root: &Path) -> Result<Option<DefinitionDocument>> {
        match read_optional(&self.definitions_path(root))? {
            Some(content) => Ok(Some(DefinitionDocument::parse(&content)?)),
            None => Ok(None),
        }
    }

    /// Read the known-terms document at `root`, if present
    pub fn read_known_terms(&self, root: &Path) -> Result<Option<KnownTermsDocument>> {
        match read_optional(&self.known_terms_path(root))? {
            Some(content) => Ok(Some(KnownTermsDocument::parse(&content)?)),
            None => Ok(None),
        }
    }

    /// Add `term` to the known-terms file at `root`
    ///
    /// The file is created when missing and only rewritten when the term was
    /// not listed yet. Returns whether the file changed.
    pub fn persist_known(&self, root: &Path, namespace: &str, term: &str) -> Result<bool> {
        let path = self.known_terms_path(root);
        let mut known = self.read_known_terms(root)?.unwrap_or_default();

        if !known.insert(namespace, term) {
            debug!("'{}' already listed in {:?}", term, path);
            return Ok(false);
        }

        fs::write(&path, known.to_yaml()?).map_err(|e| {
            JargonError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write {:?}: {}", path, e),
            ))
        })?;

        info!("Marked '{}' as known in '{}' ({:?})", term, namespace, path);
        Ok(true)
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        debug!("No glossary file at {:?}", path);
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        JargonError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read {:?}: {}", path, e),
        ))
    })?;
    Ok(Some(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn root_with(definitions: Option<&str>, known: Option<&str>) -> TempDir {
        let temp = TempDir::new().unwrap();
        if let Some(content) = definitions {
            fs::write(temp.path().join(".jargon.yml"), content).unwrap();
        }
        if let Some(content) = known {
            fs::write(temp.path().join(".jargon.known.yml"), content).unwrap();
        }
        temp
    }

    #[test]
    fn test_root_path_accepts_paths_and_file_uris() {
        assert_eq!(root_path("/tmp/ws").unwrap(), PathBuf::from("/tmp/ws"));
        #[cfg(unix)]
        assert_eq!(
            root_path("file:///tmp/my%20ws").unwrap(),
            PathBuf::from("/tmp/my ws")
        );
        assert!(matches!(
            root_path("https://example.com/ws"),
            Err(JargonError::InvalidUri(_))
        ));
    }

    #[test]
    fn test_compile_zero_roots_is_empty() {
        let loader = GlossaryLoader::default();
        let roots: Vec<PathBuf> = Vec::new();
        assert!(loader.compile(&roots).unwrap().is_empty());
        assert!(matches!(
            loader.compile_required(&roots),
            Err(JargonError::EmptyGlossary { .. })
        ));
    }

    #[test]
    fn test_compile_root_without_files_is_empty() {
        let temp = TempDir::new().unwrap();
        let loader = GlossaryLoader::default();
        let err = loader.compile_required(&[temp.path()]).unwrap_err();
        assert!(err.to_string().contains(&temp.path().display().to_string()));
    }

    #[test]
    fn test_compile_applies_known_terms() {
        let root = root_with(
            Some("billing:\n  invoice:\n    aka: bill\n"),
            Some("billing:\n  - invoice\n"),
        );
        let glossary = GlossaryLoader::default().compile(&[root.path()]).unwrap();

        assert!(glossary.resolve("bill", "/x/billing/y").unwrap().is_none());
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let root = root_with(Some("billing: [unterminated\n"), None);
        let err = GlossaryLoader::default().compile(&[root.path()]).unwrap_err();
        assert!(matches!(err, JargonError::Yaml(_)));
    }

    #[test]
    fn test_persist_known_creates_and_is_idempotent() {
        let root = root_with(Some("billing:\n  invoice: {}\n"), None);
        let loader = GlossaryLoader::default();

        assert!(loader.persist_known(root.path(), "billing", "invoice").unwrap());
        assert!(!loader.persist_known(root.path(), "billing", "invoice").unwrap());

        let known = loader.read_known_terms(root.path()).unwrap().unwrap();
        assert_eq!(known.terms("billing"), ["invoice".to_string()]);
    }

    #[test]
    fn test_custom_file_names() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("glossary.yml"), "global:\n  api: {}\n").unwrap();

        let mut config = JargonConfig::default();
        config.files.definitions = "glossary.yml".to_string();
        let loader = GlossaryLoader::new(config);

        assert!(loader.is_glossary_document("file:///ws/glossary.yml"));
        assert!(!loader.is_glossary_document("file:///ws/readme.md"));
        assert!(!loader.compile(&[temp.path()]).unwrap().is_empty());
    }
}
