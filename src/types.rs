//! Core data types for the Jargon glossary
//!
//! Terms are grouped into namespaces. A document draws its terms from the
//! namespace whose name appears in the document's path, or from the global
//! namespace when none does.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Name of the implicit namespace used when no other namespace matches
pub const GLOBAL_NAMESPACE: &str = "global";

/// A single queryable glossary entry
///
/// A defined term with aliases expands into one entry for the term itself and
/// one per alias. Every entry lists the other names as `aka` and shares the
/// description; `canonical` always points back at the defining term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Name of this entry as authored (the alias, for alias entries)
    pub name: String,

    /// Name of the term that defines this entry
    pub canonical: String,

    /// Lowercased `name`, compared against lowercased queries
    pub lookup_key: String,

    /// Other names for the same concept, never including `name`
    pub aka: Vec<String>,

    /// Explanatory text
    pub description: Option<String>,
}

impl Term {
    /// Create the entry for a defined term
    pub fn new(name: impl Into<String>, aka: Vec<String>, description: Option<String>) -> Self {
        let name = name.into();
        Self {
            lookup_key: name.to_lowercase(),
            canonical: name.clone(),
            name,
            aka,
            description,
        }
    }

    /// Create the entry registered for one alias of `canonical`
    pub fn alias(
        alias: impl Into<String>,
        canonical: impl Into<String>,
        aka: Vec<String>,
        description: Option<String>,
    ) -> Self {
        let name = alias.into();
        Self {
            lookup_key: name.to_lowercase(),
            canonical: canonical.into(),
            name,
            aka,
            description,
        }
    }

    /// Whether this entry was registered for an alias
    pub fn is_alias(&self) -> bool {
        self.name != self.canonical
    }

    /// Whether a lowercased query equals this entry's lookup key
    pub fn matches_exact(&self, lowercase_query: &str) -> bool {
        self.lookup_key == lowercase_query
    }

    /// Trailing-"s" plural fold; no other plural forms are recognized
    pub fn matches_plural(&self, lowercase_query: &str) -> bool {
        lowercase_query
            .strip_suffix('s')
            .is_some_and(|stem| stem == self.lookup_key)
    }
}

/// Whether a namespace is the implicit fallback or selected by path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamespaceKind {
    /// Used when no named namespace appears in the document path
    Global,

    /// Selected when its name is a substring of the document path
    Named,
}

/// A named scope of jargon terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// Identifier matched against document paths
    pub name: String,

    /// Global or path-selected
    pub kind: NamespaceKind,

    /// Entries in registration order; the first match wins
    pub terms: Vec<Term>,

    /// Names the user no longer wants annotated in this namespace
    pub known_terms: BTreeSet<String>,
}

impl Namespace {
    /// Create the global namespace
    pub fn global() -> Self {
        Self::with_kind(GLOBAL_NAMESPACE, NamespaceKind::Global)
    }

    /// Create an empty path-selected namespace
    pub fn named(name: impl Into<String>) -> Self {
        Self::with_kind(name, NamespaceKind::Named)
    }

    fn with_kind(name: impl Into<String>, kind: NamespaceKind) -> Self {
        Self {
            name: name.into(),
            kind,
            terms: Vec::new(),
            known_terms: BTreeSet::new(),
        }
    }

    /// Check if this is the global namespace
    pub fn is_global(&self) -> bool {
        self.kind == NamespaceKind::Global
    }

    /// Whether the namespace has no terms and no known terms
    pub fn is_unpopulated(&self) -> bool {
        self.terms.is_empty() && self.known_terms.is_empty()
    }

    /// Whether this namespace applies to documents at `path`
    ///
    /// The global namespace never matches by path; it is the fallback.
    pub fn applies_to(&self, path: &str) -> bool {
        !self.is_global() && path.contains(&self.name)
    }

    /// Whether annotations for `term` are suppressed here
    pub fn is_known(&self, term: &Term) -> bool {
        self.known_terms.contains(&term.canonical) || self.known_terms.contains(&term.name)
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            NamespaceKind::Global => write!(f, "{} (global)", self.name),
            NamespaceKind::Named => write!(f, "{}", self.name),
        }
    }
}
