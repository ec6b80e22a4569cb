//! Jargon - Namespaced Glossary Annotations
//!
//! Finds project jargon in documents and explains it in place, while letting
//! every user silence the terms they already know:
//! - Glossaries scoped to namespaces selected by document path
//! - Aliases, case-insensitive matching and plural folding
//! - Per-namespace "known term" suppression, persisted next to the glossary
//! - A stdio language server publishing annotations as diagnostics
//!
//! # Architecture
//!
//! - **Types / Glossary**: the term model, store and resolver
//! - **Definitions / Loader**: typed YAML documents and compilation from
//!   workspace roots
//! - **Scan**: tokenizing documents into annotations
//! - **Handle**: the process-wide, atomically replaced glossary
//! - **LSP**: `tower-lsp` server interface for editors
//!
//! # Example
//!
//! ```no_run
//! use jargon_core::{GlossaryLoader, JargonConfig, Scanner};
//!
//! fn main() -> jargon_core::Result<()> {
//!     let loader = GlossaryLoader::new(JargonConfig::default());
//!     let glossary = loader.compile_required(&["/path/to/workspace"])?;
//!
//!     let text = "Every invoice goes through dunning.";
//!     for annotation in Scanner::new().scan(&glossary, "/path/to/workspace/billing/notes.md", text)? {
//!         println!("{}: {}", annotation.word, annotation.message());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod definitions;
pub mod error;
pub mod glossary;
pub mod handle;
pub mod loader;
pub mod lsp;
pub mod report;
pub mod scan;
pub mod types;

// Re-export commonly used types
pub use config::JargonConfig;
pub use error::{JargonError, Result};
pub use glossary::{Glossary, Lookup};
pub use handle::GlossaryHandle;
pub use loader::GlossaryLoader;
pub use lsp::{JargonLanguageServer, Session};
pub use scan::{Annotation, Scanner, TermRef};
pub use types::{Namespace, NamespaceKind, Term};
