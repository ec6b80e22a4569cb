//! Process-wide glossary handle
//!
//! Holds the current [`Glossary`] behind a lock and swaps it out wholesale on
//! reload. Readers take an `Arc` snapshot and keep seeing that glossary for
//! as long as they hold it, so a scan never observes a half-built store.
//! Marking a term as known copies the current snapshot when it is shared
//! and publishes the modified copy under the write lock.

use crate::error::{JargonError, Result};
use crate::glossary::Glossary;
use crate::types::Term;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// Shared, atomically replaceable glossary
#[derive(Debug, Default)]
pub struct GlossaryHandle {
    current: RwLock<Arc<Glossary>>,
}

impl GlossaryHandle {
    /// Create a handle around an already compiled glossary
    pub fn new(glossary: Glossary) -> Self {
        Self {
            current: RwLock::new(Arc::new(glossary)),
        }
    }

    /// Current glossary
    pub fn snapshot(&self) -> Result<Arc<Glossary>> {
        let current = self
            .current
            .read()
            .map_err(|e| JargonError::Other(format!("Failed to lock glossary: {}", e)))?;
        Ok(Arc::clone(&current))
    }

    /// Replace the glossary with a freshly compiled one
    pub fn replace(&self, glossary: Glossary) -> Result<()> {
        let namespaces = glossary.namespaces().len();
        let fresh = Arc::new(glossary);

        let mut current = self
            .current
            .write()
            .map_err(|e| JargonError::Other(format!("Failed to lock glossary: {}", e)))?;
        *current = fresh;

        info!("Glossary replaced ({} namespace(s))", namespaces);
        Ok(())
    }

    /// Suppress `term` in `namespace` on the live glossary
    ///
    /// Returns false when the term was already known.
    pub fn mark_as_known(&self, namespace: &str, term: &str) -> Result<bool> {
        let mut current = self
            .current
            .write()
            .map_err(|e| JargonError::Other(format!("Failed to lock glossary: {}", e)))?;

        if current
            .namespace(namespace)
            .is_some_and(|ns| ns.known_terms.contains(term))
        {
            debug!("'{}' already known in '{}'", term, namespace);
            return Ok(false);
        }

        Ok(Arc::make_mut(&mut *current).mark_as_known(namespace, term))
    }

    /// Resolve against the current glossary, returning owned results
    pub fn resolve(&self, query: &str, path: &str) -> Result<Option<(Term, String)>> {
        let glossary = self.snapshot()?;
        let resolved = glossary
            .resolve(query, path)?
            .map(|(term, ns)| (term.clone(), ns.name.clone()));
        Ok(resolved)
    }
}
