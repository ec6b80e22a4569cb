//! Editor session state
//!
//! Everything the language server knows about one editor session: workspace
//! folders, open documents and the glossary they are checked against. Each
//! operation takes typed LSP params and returns the [`Effect`]s the client
//! has to see, in order, so the session runs without a transport.

use crate::config::JargonConfig;
use crate::error::{JargonError, Result};
use crate::handle::GlossaryHandle;
use crate::loader::{root_path, GlossaryLoader};
use crate::scan::{Annotation, LineIndex, Scanner, TermRef};
use std::collections::BTreeMap;
use tower_lsp::lsp_types::*;
use tracing::{error, info, warn};

/// Command executed by the "Mark as known" code action
pub const MARK_AS_KNOWN_COMMAND: &str = "jargon.markAsKnown";

/// Something the client must be told
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// `textDocument/publishDiagnostics`
    Publish {
        uri: Url,
        diagnostics: Vec<Diagnostic>,
    },

    /// `window/showMessage`
    Show { kind: MessageType, message: String },
}

impl Effect {
    fn info(message: impl Into<String>) -> Self {
        Effect::Show {
            kind: MessageType::INFO,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Effect::Show {
            kind: MessageType::ERROR,
            message: message.into(),
        }
    }
}

/// State of one editor session
pub struct Session {
    config: JargonConfig,
    loader: GlossaryLoader,
    scanner: Scanner,
    glossary: GlossaryHandle,

    /// Workspace folder URIs (or paths), first one receives known terms
    workspace_folders: Vec<String>,

    /// Open documents by URI
    documents: BTreeMap<Url, String>,

    related_information: bool,
}

impl Session {
    /// Create a session; the glossary is compiled on `initialize`
    pub fn new(config: JargonConfig) -> Self {
        Self {
            loader: GlossaryLoader::new(config.clone()),
            config,
            scanner: Scanner::new(),
            glossary: GlossaryHandle::default(),
            workspace_folders: Vec::new(),
            documents: BTreeMap::new(),
            related_information: false,
        }
    }

    /// Shared glossary used by this session
    pub fn glossary(&self) -> &GlossaryHandle {
        &self.glossary
    }

    /// Workspace folders in the order they were announced
    pub fn workspace_folders(&self) -> &[String] {
        &self.workspace_folders
    }

    /// Compile the glossary for the announced workspace and describe the server
    ///
    /// Fails with `EmptyGlossary` when no root carries glossary files.
    pub fn initialize(&mut self, params: &InitializeParams) -> Result<InitializeResult> {
        self.workspace_folders = workspace_locations(params);

        let glossary = self.loader.compile_locations(&self.workspace_folders)?;
        self.glossary.replace(glossary)?;

        let capabilities = &params.capabilities;
        let workspace_folders_supported = capabilities
            .workspace
            .as_ref()
            .and_then(|workspace| workspace.workspace_folders)
            .unwrap_or(false);
        self.related_information = capabilities
            .text_document
            .as_ref()
            .and_then(|text_document| text_document.publish_diagnostics.as_ref())
            .and_then(|publish| publish.related_information)
            .unwrap_or(false);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                code_action_provider: Some(CodeActionProviderCapability::Simple(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![MARK_AS_KNOWN_COMMAND.to_string()],
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),
                workspace: workspace_folders_supported.then(|| WorkspaceServerCapabilities {
                    workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                        supported: Some(true),
                        change_notifications: Some(OneOf::Left(true)),
                    }),
                    file_operations: None,
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "jargon".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    /// Track an opened document and annotate it
    pub fn open(&mut self, uri: Url, text: String) -> Vec<Effect> {
        self.documents.insert(uri.clone(), text);
        self.validate(&uri)
    }

    /// Replace a document's text (full sync) and annotate it again
    pub fn change(&mut self, uri: Url, changes: Vec<TextDocumentContentChangeEvent>) -> Vec<Effect> {
        // Full sync: the last change carries the whole document
        let Some(change) = changes.into_iter().last() else {
            warn!("didChange for {} without content", uri);
            return Vec::new();
        };

        self.documents.insert(uri.clone(), change.text);
        self.validate(&uri)
    }

    /// Forget a document and clear its annotations
    pub fn close(&mut self, uri: Url) -> Vec<Effect> {
        self.documents.remove(&uri);
        vec![Effect::Publish {
            uri,
            diagnostics: Vec::new(),
        }]
    }

    /// One "Mark as known" quick fix per jargon diagnostic in the request
    pub fn code_actions(&self, params: &CodeActionParams) -> Option<CodeActionResponse> {
        if !self.documents.contains_key(&params.text_document.uri) {
            return None;
        }

        let actions = params
            .context
            .diagnostics
            .iter()
            .filter(|diagnostic| {
                diagnostic.source.as_deref() == Some(self.config.diagnostics.source.as_str())
            })
            .map(|diagnostic| {
                CodeActionOrCommand::CodeAction(CodeAction {
                    title: "Mark as known".to_string(),
                    kind: Some(CodeActionKind::QUICKFIX),
                    diagnostics: Some(vec![diagnostic.clone()]),
                    command: Some(Command {
                        title: "Mark as known".to_string(),
                        command: MARK_AS_KNOWN_COMMAND.to_string(),
                        arguments: diagnostic.data.clone().map(|data| vec![data]),
                    }),
                    ..Default::default()
                })
            })
            .collect();

        Some(actions)
    }

    /// Stop annotating `term` and persist the choice
    ///
    /// The known-terms file is written first; the live glossary only changes
    /// once that succeeded, so memory and file never disagree.
    pub fn mark_as_known(&mut self, term: &TermRef) -> Result<Vec<Effect>> {
        match self.workspace_folders.first() {
            Some(folder) => {
                let root = root_path(folder)?;
                self.loader
                    .persist_known(&root, &term.namespace_name, &term.term_name)?;
            }
            None => warn!("No workspace folder to persist known terms in"),
        }

        self.glossary
            .mark_as_known(&term.namespace_name, &term.term_name)?;

        let mut effects = vec![Effect::info(format!(
            "Jargon won't underline '{}' for you anymore in this context. If you change your mind, you can delete it from {} at the root of your workspace.",
            term.term_name, self.config.files.known_terms
        ))];
        effects.extend(self.validate_all());
        Ok(effects)
    }

    /// Apply added and removed workspace folders, then reload
    pub fn change_folders(&mut self, event: &WorkspaceFoldersChangeEvent) -> Vec<Effect> {
        let removed: Vec<String> = event
            .removed
            .iter()
            .map(|folder| folder.uri.to_string())
            .collect();
        self.workspace_folders
            .retain(|folder| !removed.contains(folder));

        for folder in &event.added {
            let added = folder.uri.to_string();
            if !self.workspace_folders.contains(&added) {
                self.workspace_folders.push(added);
            }
        }

        self.reload()
    }

    /// Recompile from the current workspace folders and revalidate
    ///
    /// A failed compile keeps the previous glossary in service.
    pub fn reload(&mut self) -> Vec<Effect> {
        let glossary = self
            .loader
            .compile_locations(&self.workspace_folders)
            .and_then(|glossary| self.glossary.replace(glossary));

        if let Err(e) = glossary {
            error!("Glossary reload failed: {}", e);
            return vec![Effect::error(e.to_string())];
        }

        let mut effects = self.validate_all();
        effects.push(Effect::info("Jargon glossary reloaded."));
        effects
    }

    fn validate_all(&self) -> Vec<Effect> {
        self.documents
            .keys()
            .flat_map(|uri| self.validate(uri))
            .collect()
    }

    /// Annotations of one open document as diagnostics
    fn validate(&self, uri: &Url) -> Vec<Effect> {
        if self.loader.is_glossary_document(uri.as_str()) {
            return Vec::new();
        }
        let Some(text) = self.documents.get(uri) else {
            return Vec::new();
        };

        let publish = |diagnostics| Effect::Publish {
            uri: uri.clone(),
            diagnostics,
        };

        match self.annotate(uri, text) {
            Ok(annotations) => {
                let index = LineIndex::new(text);
                let diagnostics = annotations
                    .iter()
                    .map(|annotation| self.diagnostic(&index, annotation))
                    .collect();
                vec![publish(diagnostics)]
            }
            Err(e @ JargonError::AmbiguousNamespace { .. }) => {
                warn!("{}", e);
                vec![Effect::error(e.to_string()), publish(Vec::new())]
            }
            Err(e) => {
                error!("Failed to scan {}: {}", uri, e);
                vec![publish(Vec::new())]
            }
        }
    }

    fn annotate(&self, uri: &Url, text: &str) -> Result<Vec<Annotation>> {
        let glossary = self.glossary.snapshot()?;
        self.scanner.scan(&glossary, uri.as_str(), text)
    }

    fn diagnostic(&self, index: &LineIndex<'_>, annotation: &Annotation) -> Diagnostic {
        Diagnostic {
            range: Range::new(
                index.position(annotation.range.start),
                index.position(annotation.range.end),
            ),
            severity: Some(self.config.diagnostics.severity.lsp_severity()),
            source: Some(self.config.diagnostics.source.clone()),
            message: annotation.message(),
            related_information: self.related_information.then(Vec::new),
            data: serde_json::to_value(&annotation.term).ok(),
            ..Default::default()
        }
    }
}

/// Folder URIs from `workspaceFolders`, falling back to `rootUri`/`rootPath`
#[allow(deprecated)]
fn workspace_locations(params: &InitializeParams) -> Vec<String> {
    if let Some(folders) = &params.workspace_folders {
        return folders.iter().map(|folder| folder.uri.to_string()).collect();
    }

    params
        .root_uri
        .as_ref()
        .map(Url::to_string)
        .or_else(|| params.root_path.clone())
        .map(|root| vec![root])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(uri: &str) -> WorkspaceFolder {
        WorkspaceFolder {
            uri: Url::parse(uri).unwrap(),
            name: "ws".to_string(),
        }
    }

    #[test]
    #[allow(deprecated)]
    fn test_workspace_locations_fallbacks() {
        let params = InitializeParams {
            workspace_folders: Some(vec![folder("file:///a"), folder("file:///b")]),
            root_uri: Some(Url::parse("file:///ignored").unwrap()),
            ..Default::default()
        };
        assert_eq!(workspace_locations(&params), vec!["file:///a", "file:///b"]);

        let params = InitializeParams {
            root_uri: Some(Url::parse("file:///r").unwrap()),
            root_path: Some("/p".to_string()),
            ..Default::default()
        };
        assert_eq!(workspace_locations(&params), vec!["file:///r"]);

        let params = InitializeParams {
            root_path: Some("/p".to_string()),
            ..Default::default()
        };
        assert_eq!(workspace_locations(&params), vec!["/p"]);

        assert!(workspace_locations(&InitializeParams::default()).is_empty());
    }

    #[test]
    #[allow(deprecated)]
    fn test_initialize_without_glossary_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut session = Session::new(JargonConfig::default());
        let params = InitializeParams {
            root_path: Some(temp.path().display().to_string()),
            ..Default::default()
        };

        assert!(matches!(
            session.initialize(&params),
            Err(JargonError::EmptyGlossary { .. })
        ));
    }

    #[test]
    fn test_code_actions_need_an_open_document() {
        let session = Session::new(JargonConfig::default());
        let params = CodeActionParams {
            text_document: TextDocumentIdentifier::new(Url::parse("file:///a.md").unwrap()),
            range: Range::default(),
            context: CodeActionContext::default(),
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
        };
        assert!(session.code_actions(&params).is_none());
    }

    #[test]
    fn test_change_without_content_is_ignored() {
        let mut session = Session::new(JargonConfig::default());
        let uri = Url::parse("file:///a.md").unwrap();
        assert!(session.change(uri, Vec::new()).is_empty());
    }
}
