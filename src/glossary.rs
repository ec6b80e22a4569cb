//! Glossary store and resolver
//!
//! The store is an ordered list of namespaces with the global namespace
//! always first. It is built wholesale from parsed definitions and is only
//! mutated afterwards by [`Glossary::mark_as_known`].
//!
//! # Resolution
//!
//! 1. Pick the namespace: the single named namespace whose name is a
//!    substring of the document path, the global namespace when there is
//!    none, and [`JargonError::AmbiguousNamespace`] when there are several.
//! 2. Look the lowercased word up: first exact match on `lookup_key`, then
//!    first match with a trailing "s" removed.
//! 3. Drop the match when the user marked the term as known.
//!
//! # Example
//!
//! ```
//! use jargon_core::definitions::{NamespaceDefinition, TermDefinition};
//! use jargon_core::Glossary;
//!
//! let mut glossary = Glossary::new();
//! glossary.define(&NamespaceDefinition {
//!     name: "billing".to_string(),
//!     terms: vec![TermDefinition::new("invoice").with_aka(["bill"])],
//! });
//!
//! let (term, ns) = glossary.resolve("Bills", "/repo/billing/readme.md")?.unwrap();
//! assert_eq!(term.canonical, "invoice");
//! assert_eq!(ns.name, "billing");
//! # Ok::<(), jargon_core::JargonError>(())
//! ```

use crate::definitions::{DefinitionDocument, KnownTermsDocument, NamespaceDefinition};
use crate::error::{JargonError, Result};
use crate::types::{Namespace, Term};
use tracing::debug;

/// Outcome of looking a word up inside one namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Matched and not suppressed
    Found(&'a Term),

    /// Matched, but the user marked the term as known
    Suppressed(&'a Term),

    /// No entry matches
    NotFound,
}

impl<'a> Lookup<'a> {
    /// The term to annotate, if any
    pub fn annotatable(self) -> Option<&'a Term> {
        match self {
            Lookup::Found(term) => Some(term),
            Lookup::Suppressed(_) | Lookup::NotFound => None,
        }
    }
}

/// In-memory glossary of namespaced terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glossary {
    namespaces: Vec<Namespace>,
}

impl Glossary {
    /// Create a glossary holding only the empty global namespace
    pub fn new() -> Self {
        Self {
            namespaces: vec![Namespace::global()],
        }
    }

    /// Build a glossary from definition and known-term documents
    ///
    /// Documents are layered in order: later definitions of the same
    /// namespace append terms, they never replace earlier ones.
    pub fn from_documents<'a, D, K>(definitions: D, known: K) -> Self
    where
        D: IntoIterator<Item = &'a DefinitionDocument>,
        K: IntoIterator<Item = &'a KnownTermsDocument>,
    {
        let mut glossary = Self::new();
        for document in definitions {
            glossary.define_all(document);
        }
        for document in known {
            glossary.apply_known(document);
        }
        glossary
    }

    /// Register every namespace of a definitions document
    pub fn define_all(&mut self, document: &DefinitionDocument) {
        for namespace in &document.namespaces {
            self.define(namespace);
        }
    }

    /// Register the terms of one namespace definition
    ///
    /// Each term yields one entry for itself and one per alias. An alias
    /// entry lists the canonical name followed by the remaining aliases.
    pub fn define(&mut self, definition: &NamespaceDefinition) {
        let ns = self.namespace_or_insert(&definition.name);

        for term in &definition.terms {
            let aka: Vec<String> = term
                .aka
                .iter()
                .filter(|alias| **alias != term.name)
                .cloned()
                .collect();

            ns.terms.push(Term::new(
                term.name.clone(),
                aka.clone(),
                term.description.clone(),
            ));

            for alias in &aka {
                let others = std::iter::once(term.name.clone())
                    .chain(aka.iter().filter(|other| *other != alias).cloned())
                    .collect();
                ns.terms.push(Term::alias(
                    alias.clone(),
                    term.name.clone(),
                    others,
                    term.description.clone(),
                ));
            }
        }

        debug!(
            "Registered {} term(s) in namespace '{}' ({} entries)",
            definition.terms.len(),
            definition.name,
            ns.terms.len()
        );
    }

    /// Apply a known-terms document
    pub fn apply_known(&mut self, document: &KnownTermsDocument) {
        for (namespace, terms) in &document.namespaces {
            for term in terms {
                self.mark_as_known(namespace, term);
            }
        }
    }

    /// Suppress future matches of `term` within `namespace`
    ///
    /// Creates the namespace when it does not exist yet. Returns false when
    /// the term was already known.
    pub fn mark_as_known(&mut self, namespace: &str, term: &str) -> bool {
        self.namespace_or_insert(namespace)
            .known_terms
            .insert(term.to_string())
    }

    /// True when nothing beyond the implicit global namespace was populated
    pub fn is_empty(&self) -> bool {
        self.namespaces
            .iter()
            .all(|ns| ns.is_global() && ns.is_unpopulated())
    }

    /// All namespaces, global first
    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    /// The global fallback namespace
    pub fn global(&self) -> &Namespace {
        // Constructors always place global at index 0
        &self.namespaces[0]
    }

    /// Look a namespace up by exact name
    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }

    /// Select the namespace whose terms apply to `path`
    pub fn namespace_for(&self, query: &str, path: &str) -> Result<&Namespace> {
        let mut matching = self.namespaces.iter().filter(|ns| ns.applies_to(path));

        match (matching.next(), matching.next()) {
            (None, _) => Ok(self.global()),
            (Some(ns), None) => Ok(ns),
            (Some(first), Some(second)) => {
                let candidates = [first, second]
                    .into_iter()
                    .chain(matching)
                    .map(|ns| ns.name.clone())
                    .collect();
                Err(JargonError::AmbiguousNamespace {
                    query: query.to_string(),
                    path: path.to_string(),
                    candidates,
                })
            }
        }
    }

    /// Look `query` up in `namespace`, reporting suppressed matches
    pub fn lookup<'a>(&self, namespace: &'a Namespace, query: &str) -> Lookup<'a> {
        let query = query.to_lowercase();

        let found = namespace
            .terms
            .iter()
            .find(|term| term.matches_exact(&query))
            .or_else(|| namespace.terms.iter().find(|term| term.matches_plural(&query)));

        match found {
            Some(term) if namespace.is_known(term) => Lookup::Suppressed(term),
            Some(term) => Lookup::Found(term),
            None => Lookup::NotFound,
        }
    }

    /// Resolve a scanned word for the document at `path`
    pub fn resolve(&self, query: &str, path: &str) -> Result<Option<(&Term, &Namespace)>> {
        let namespace = self.namespace_for(query, path)?;
        Ok(self
            .lookup(namespace, query)
            .annotatable()
            .map(|term| (term, namespace)))
    }

    fn namespace_or_insert(&mut self, name: &str) -> &mut Namespace {
        let index = match self.namespaces.iter().position(|ns| ns.name == name) {
            Some(index) => index,
            None => {
                self.namespaces.push(Namespace::named(name));
                self.namespaces.len() - 1
            }
        };
        &mut self.namespaces[index]
    }
}

impl Default for Glossary {
    fn default() -> Self {
        Self::new()
    }
}
