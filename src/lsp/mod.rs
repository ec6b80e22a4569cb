//! Language Server Protocol front end
//!
//! Publishes jargon annotations as diagnostics over stdio and handles the
//! "Mark as known" quick fix. The protocol plumbing is `tower-lsp`; the
//! session logic lives in [`Session`] and runs without a transport.

pub mod server;
pub mod session;

pub use server::{serve, JargonLanguageServer};
pub use session::{Effect, Session, MARK_AS_KNOWN_COMMAND};
