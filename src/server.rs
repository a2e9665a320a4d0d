use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::format::SOURCE_NAME;
use crate::linter::Linter;
use crate::result::{LintResult, Severity};

/// Document state stored for each open file
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub content: String,
    pub version: i32,
}

/// kousei Language Server implementation
pub struct KouseiServer {
    client: Client,
    documents: Arc<RwLock<HashMap<Url, DocumentState>>>,
    linter: Arc<Linter>,
}

/// Convert a 1-based finding into an LSP diagnostic.
///
/// Suggestions travel in `data` so code actions can offer them as fixes.
pub fn to_diagnostic(result: &LintResult) -> Diagnostic {
    let to_position = |line: usize, column: usize| Position {
        line: line.saturating_sub(1) as u32,
        character: column.saturating_sub(1) as u32,
    };
    let end = result.end_or_start();

    Diagnostic {
        range: Range {
            start: to_position(result.line, result.column),
            end: to_position(end.line, end.column),
        },
        severity: Some(match result.severity {
            Severity::Info => DiagnosticSeverity::INFORMATION,
            Severity::Warning => DiagnosticSeverity::WARNING,
            Severity::Error => DiagnosticSeverity::ERROR,
        }),
        code: Some(NumberOrString::String(result.rule.to_string())),
        source: Some(SOURCE_NAME.to_string()),
        message: result.message.clone(),
        data: (!result.suggestions.is_empty()).then(|| serde_json::json!(result.suggestions)),
        ..Default::default()
    }
}

/// Quick fixes replacing a diagnostic's range with each of its suggestions
pub fn quick_fixes(uri: &Url, diagnostic: &Diagnostic) -> Vec<CodeActionOrCommand> {
    if diagnostic.source.as_deref() != Some(SOURCE_NAME) || diagnostic.range.start == diagnostic.range.end {
        return Vec::new();
    }

    let suggestions: Vec<String> = diagnostic
        .data
        .clone()
        .and_then(|data| serde_json::from_value(data).ok())
        .unwrap_or_default();

    suggestions
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let edit = TextEdit {
                range: diagnostic.range,
                new_text: text.clone(),
            };
            CodeActionOrCommand::CodeAction(CodeAction {
                title: format!("「{}」に置換", text),
                kind: Some(CodeActionKind::QUICKFIX),
                diagnostics: Some(vec![diagnostic.clone()]),
                edit: Some(WorkspaceEdit {
                    changes: Some(HashMap::from([(uri.clone(), vec![edit])])),
                    ..Default::default()
                }),
                is_preferred: Some(i == 0),
                ..Default::default()
            })
        })
        .collect()
}

impl KouseiServer {
    pub fn new(client: Client, linter: Arc<Linter>) -> Self {
        Self {
            client,
            documents: Arc::new(RwLock::new(HashMap::new())),
            linter,
        }
    }

    /// Identifier used in findings: the file path when the URI has one
    fn document_id(uri: &Url) -> String {
        uri.to_file_path()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|_| uri.to_string())
    }

    /// Lint document and publish diagnostics
    async fn analyze_document(&self, uri: &Url) {
        let documents = self.documents.read().await;
        if let Some(doc) = documents.get(uri) {
            let results = self.linter.lint_content(&Self::document_id(uri), &doc.content);
            let diagnostics = results.iter().map(to_diagnostic).collect();

            self.client
                .publish_diagnostics(uri.clone(), diagnostics, Some(doc.version))
                .await;
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for KouseiServer {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        tracing::info!("kousei server initializing...");

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                            include_text: Some(true),
                        })),
                        ..Default::default()
                    },
                )),
                code_action_provider: Some(CodeActionProviderCapability::Simple(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "kousei".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        tracing::info!("kousei server initialized!");
        self.client
            .log_message(MessageType::INFO, "kousei Language Server started")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("kousei server shutting down...");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let content = params.text_document.text;
        let version = params.text_document.version;

        tracing::debug!("Document opened: {}", uri);

        {
            let mut documents = self.documents.write().await;
            documents.insert(uri.clone(), DocumentState { content, version });
        }

        self.analyze_document(&uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        if let Some(change) = params.content_changes.into_iter().last() {
            let content = change.text;

            {
                let mut documents = self.documents.write().await;
                documents.insert(uri.clone(), DocumentState { content, version });
            }

            self.analyze_document(&uri).await;
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;
        tracing::debug!("Document saved: {}", uri);

        if let Some(content) = params.text {
            let mut documents = self.documents.write().await;
            if let Some(doc) = documents.get_mut(&uri) {
                doc.content = content;
            }
        }

        self.analyze_document(&uri).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        tracing::debug!("Document closed: {}", uri);

        {
            let mut documents = self.documents.write().await;
            documents.remove(&uri);
        }

        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let uri = &params.text_document.uri;
        let actions: Vec<CodeActionOrCommand> = params
            .context
            .diagnostics
            .iter()
            .flat_map(|diagnostic| quick_fixes(uri, diagnostic))
            .collect();

        Ok((!actions.is_empty()).then_some(actions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{Position as SourcePosition, Span};
    use pretty_assertions::assert_eq;

    fn span_result() -> LintResult {
        let span = Span {
            start: SourcePosition { line: 3, column: 4 },
            end: SourcePosition { line: 3, column: 14 },
        };
        LintResult::spanning("a.md", span, "proper-noun", Severity::Warning, "誤記")
            .with_suggestion("JavaScript")
    }

    #[test]
    fn test_to_diagnostic_is_zero_based() {
        let diag = to_diagnostic(&span_result());

        assert_eq!(diag.range.start, Position { line: 2, character: 3 });
        assert_eq!(diag.range.end, Position { line: 2, character: 13 });
        assert_eq!(diag.severity, Some(DiagnosticSeverity::WARNING));
        assert_eq!(diag.code, Some(NumberOrString::String("proper-noun".to_string())));
        assert_eq!(diag.source.as_deref(), Some("kousei"));
    }

    #[test]
    fn test_point_diagnostic_has_empty_range() {
        let result = LintResult::at(
            "a.md",
            SourcePosition { line: 1, column: 1 },
            "comma-density",
            Severity::Info,
            "読点",
        );
        let diag = to_diagnostic(&result);

        assert_eq!(diag.range.start, diag.range.end);
        assert_eq!(diag.severity, Some(DiagnosticSeverity::INFORMATION));
        assert!(diag.data.is_none());
    }

    #[test]
    fn test_quick_fix_from_suggestion() {
        let uri = Url::parse("file:///tmp/a.md").unwrap();
        let diag = to_diagnostic(&span_result());
        let actions = quick_fixes(&uri, &diag);

        assert_eq!(actions.len(), 1);
        let CodeActionOrCommand::CodeAction(action) = &actions[0] else {
            panic!("expected a code action");
        };
        let edits = &action.edit.as_ref().unwrap().changes.as_ref().unwrap()[&uri];
        assert_eq!(edits[0].new_text, "JavaScript");
        assert_eq!(edits[0].range, diag.range);
    }

    #[test]
    fn test_no_quick_fix_for_foreign_diagnostics() {
        let uri = Url::parse("file:///tmp/a.md").unwrap();
        let mut diag = to_diagnostic(&span_result());
        diag.source = Some("other".to_string());

        assert!(quick_fixes(&uri, &diag).is_empty());
    }

    #[test]
    fn test_document_id_prefers_file_path() {
        let uri = Url::parse("file:///path/to/README.md").unwrap();
        assert_eq!(KouseiServer::document_id(&uri), "/path/to/README.md");

        let untitled = Url::parse("untitled:Untitled-1").unwrap();
        assert_eq!(KouseiServer::document_id(&untitled), "untitled:Untitled-1");
    }
}
