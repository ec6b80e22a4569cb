//! tower-lsp front end
//!
//! Adapts [`Session`] to `tower_lsp::LanguageServer`: handlers lock the
//! session, run the synchronous operation, then forward the resulting
//! effects to the client after the lock is released.

use super::session::{Effect, Session, MARK_AS_KNOWN_COMMAND};
use crate::config::JargonConfig;
use crate::error::JargonError;
use crate::scan::TermRef;
use serde_json::{json, Value};
use std::borrow::Cow;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::{Error, ErrorCode, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

/// Jargon language server
pub struct JargonLanguageServer {
    /// LSP client for sending notifications
    client: Client,
    session: RwLock<Session>,
}

impl JargonLanguageServer {
    pub fn new(client: Client, config: JargonConfig) -> Self {
        Self {
            client,
            session: RwLock::new(Session::new(config)),
        }
    }

    async fn apply(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Publish { uri, diagnostics } => {
                    self.client.publish_diagnostics(uri, diagnostics, None).await
                }
                Effect::Show { kind, message } => self.client.show_message(kind, message).await,
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for JargonLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        tracing::info!("Initializing Jargon language server");
        self.session
            .write()
            .await
            .initialize(&params)
            .map_err(initialize_error)
    }

    async fn initialized(&self, _: InitializedParams) {
        tracing::info!("Jargon language server initialized");
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("Shutting down Jargon language server");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        tracing::debug!("Document opened: {}", params.text_document.uri);
        let document = params.text_document;
        let effects = self.session.write().await.open(document.uri, document.text);
        self.apply(effects).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        tracing::debug!("Document changed: {}", params.text_document.uri);
        let effects = self
            .session
            .write()
            .await
            .change(params.text_document.uri, params.content_changes);
        self.apply(effects).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        tracing::debug!("Document closed: {}", params.text_document.uri);
        let effects = self.session.write().await.close(params.text_document.uri);
        self.apply(effects).await;
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        Ok(self.session.read().await.code_actions(&params))
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        if params.command != MARK_AS_KNOWN_COMMAND {
            return Err(Error::invalid_params(format!(
                "Unknown command: {}",
                params.command
            )));
        }

        let term = mark_as_known_arguments(params.arguments)?;
        let outcome = self.session.write().await.mark_as_known(&term);

        match outcome {
            Ok(effects) => {
                self.apply(effects).await;
                Ok(None)
            }
            Err(e) => {
                tracing::error!("Failed to mark '{}' as known: {}", term.term_name, e);
                Err(Error {
                    code: ErrorCode::ServerError(-32000),
                    message: Cow::Owned(format!("Mark as known failed: {}", e)),
                    data: None,
                })
            }
        }
    }

    async fn did_change_watched_files(&self, _: DidChangeWatchedFilesParams) {
        tracing::info!("Glossary files changed");
        let effects = self.session.write().await.reload();
        self.apply(effects).await;
    }

    async fn did_change_workspace_folders(&self, params: DidChangeWorkspaceFoldersParams) {
        tracing::info!("Workspace folder change event received");
        let effects = self.session.write().await.change_folders(&params.event);
        self.apply(effects).await;
    }
}

/// Initialize failures are setup problems; tell the client not to retry
fn initialize_error(e: JargonError) -> Error {
    tracing::error!("Failed to compile glossary: {}", e);
    Error {
        code: ErrorCode::InternalError,
        message: Cow::Owned(e.to_string()),
        data: Some(json!({ "retry": false })),
    }
}

fn mark_as_known_arguments(arguments: Vec<Value>) -> Result<TermRef> {
    let argument = arguments
        .into_iter()
        .next()
        .ok_or_else(|| Error::invalid_params("Missing mark-as-known argument"))?;

    serde_json::from_value(argument)
        .map_err(|e| Error::invalid_params(format!("Invalid mark-as-known arguments: {}", e)))
}

/// Serve the language server on stdin/stdout until the client exits
pub async fn serve(config: JargonConfig) {
    tracing::info!("Jargon language server started, listening on stdin...");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(|client| JargonLanguageServer::new(client, config));
    Server::new(stdin, stdout, socket).serve(service).await;

    tracing::info!("Jargon language server shutting down");
}
