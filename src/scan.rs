//! Document scanning
//!
//! Splits document text into candidate words and resolves each one against
//! the glossary. Every hit becomes an [`Annotation`] anchored at the word's
//! byte range, carrying enough context to render a message and to mark the
//! term as known later.

use crate::error::Result;
use crate::glossary::Glossary;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tower_lsp::lsp_types::Position;
use tracing::debug;

/// A letter followed by one or more letters, hyphens or underscores
fn word_pattern() -> &'static Regex {
    static PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[a-zA-Z][a-zA-Z\-_]+").expect("Valid word regex"));
    &PATTERN
}

/// A word found in document text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'t> {
    pub text: &'t str,
    pub range: Range<usize>,
}

/// Lazily yield candidate words, left to right
pub fn candidates(text: &str) -> impl Iterator<Item = Candidate<'_>> {
    word_pattern().find_iter(text).map(|m| Candidate {
        text: m.as_str(),
        range: m.range(),
    })
}

/// Reference back to the term, used by the "mark as known" action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermRef {
    pub term_name: String,
    pub namespace_name: String,
}

/// One resolved jargon occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Byte range of the word in the document
    pub range: Range<usize>,

    /// Word as it appears in the document
    pub word: String,

    /// Term the word resolved to
    pub term: TermRef,

    /// Other names of the term
    pub aka: Vec<String>,

    pub description: Option<String>,
}

impl Annotation {
    /// Markdown text shown for the annotation
    ///
    /// `Also known as **a**, **b**.` when there are aliases, followed by the
    /// description, separated by a blank line.
    pub fn message(&self) -> String {
        let mut parts = Vec::with_capacity(2);

        if !self.aka.is_empty() {
            let aka = self
                .aka
                .iter()
                .map(|name| format!("**{}**", name))
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!("Also known as {}.", aka));
        }

        if let Some(description) = &self.description {
            parts.push(description.clone());
        }

        parts.join("\n\n")
    }
}

/// Resolves every candidate of a document against a glossary
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner;

impl Scanner {
    pub fn new() -> Self {
        Self
    }

    /// Annotate `text`, the content of the document at `location`
    ///
    /// Fails with `AmbiguousNamespace` when the location matches several
    /// namespaces; the caller reports that as a configuration problem.
    pub fn scan(&self, glossary: &Glossary, location: &str, text: &str) -> Result<Vec<Annotation>> {
        let mut annotations = Vec::new();

        for candidate in candidates(text) {
            if let Some((term, namespace)) = glossary.resolve(candidate.text, location)? {
                annotations.push(Annotation {
                    range: candidate.range,
                    word: candidate.text.to_string(),
                    term: TermRef {
                        term_name: term.canonical.clone(),
                        namespace_name: namespace.name.clone(),
                    },
                    aka: term.aka.clone(),
                    description: term.description.clone(),
                });
            }
        }

        debug!("Scanned {}: {} annotation(s)", location, annotations.len());
        Ok(annotations)
    }
}

/// Converts byte offsets of one text into LSP positions
#[derive(Debug, Clone)]
pub struct LineIndex<'t> {
    text: &'t str,
    line_starts: Vec<usize>,
}

impl<'t> LineIndex<'t> {
    pub fn new(text: &'t str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    /// Zero-based line and UTF-16 column of byte `offset`
    ///
    /// Offsets past the end clamp to the end.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line];

        let character = self.text[line_start..offset]
            .chars()
            .map(char::len_utf16)
            .sum::<usize>();

        Position::new(line as u32, character as u32)
    }
}
