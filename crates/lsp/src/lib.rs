pub mod capabilities;
pub mod lens;
pub mod util;

use crate::util::{apply_changes, Document};
use dashmap::DashMap;
use refscope_api::{CancellationToken, LensEngine};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

pub type EngineBuilder = Arc<dyn Fn(PathBuf) -> Arc<dyn LensEngine> + Send + Sync>;

pub struct LspServer {
    client: Client,
    pub engine: Arc<RwLock<Option<Arc<dyn LensEngine>>>>,
    pub engine_builder: EngineBuilder,
    pub documents: DashMap<Url, Arc<Document>>,
    cancel_token: CancellationToken,
}

impl LspServer {
    pub fn new(client: Client, engine_builder: EngineBuilder) -> Self {
        Self {
            client,
            engine: Arc::new(RwLock::new(None)),
            engine_builder,
            documents: DashMap::new(),
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn current_engine(&self) -> Option<Arc<dyn LensEngine>> {
        self.engine.read().await.clone()
    }

    pub async fn document_text(&self, uri: &Url) -> Option<Arc<str>> {
        if let Some(doc) = self.documents.get(uri) {
            return Some(doc.content.clone());
        }
        lens::read_text(uri).await
    }

    /// Token for one request; cancelled with the server on shutdown.
    pub fn request_token(&self) -> CancellationToken {
        self.cancel_token.child_token()
    }

    async fn notify_engine(&self, uri: &Url, text: Option<Arc<str>>) {
        if let Some(engine) = self.current_engine().await {
            engine.document_changed(uri.as_str(), text);
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let root_path = params
            .root_uri
            .as_ref()
            .and_then(|uri| uri.to_file_path().ok())
            .or_else(|| {
                params
                    .workspace_folders
                    .as_ref()
                    .and_then(|folders| folders.first())
                    .and_then(|f| f.uri.to_file_path().ok())
            });

        if let Some(path) = root_path {
            tracing::info!("Initializing lens engine for {}", path.display());
            let handle = (self.engine_builder)(path);
            if let Some(options) = &params.initialization_options {
                handle.configure(options);
            }
            let mut guard = self.engine.write().await;
            *guard = Some(handle);
        } else {
            tracing::warn!("No workspace root given; code lenses are disabled");
        }

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "refscope".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: capabilities::server_capabilities(),
        })
    }

    async fn shutdown(&self) -> Result<()> {
        self.cancel_token.cancel();
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let doc = Arc::new(Document::new(
            params.text_document.text,
            params.text_document.version,
        ));
        self.notify_engine(&uri, Some(doc.content.clone())).await;
        self.documents.insert(uri, doc);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        let updated = match self.documents.get_mut(&uri) {
            Some(doc_ref) if doc_ref.is_stale(version) => {
                tracing::debug!(
                    "Ignoring change {} for {}, document is at {}",
                    version,
                    uri,
                    doc_ref.version
                );
                None
            }
            Some(mut doc_ref) => {
                let doc = doc_ref.value_mut();
                let content = apply_changes(&doc.content, &params.content_changes);
                *doc = Arc::new(Document::new(content, version));
                Some(doc.content.clone())
            }
            None => None,
        };
        if let Some(text) = updated {
            self.notify_engine(&uri, Some(text)).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.client
            .log_message(
                MessageType::LOG,
                format!("LSP Event: did_close uri={}", params.text_document.uri),
            )
            .await;
        self.documents.remove(&params.text_document.uri);
        self.notify_engine(&params.text_document.uri, None).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let Some(engine) = self.current_engine().await else {
            return;
        };
        engine.configure(&params.settings);
        if let Err(e) = self.client.code_lens_refresh().await {
            tracing::debug!("Client did not accept codeLens refresh: {}", e);
        }
    }

    async fn code_lens(&self, params: CodeLensParams) -> Result<Option<Vec<CodeLens>>> {
        self.client
            .log_message(
                MessageType::LOG,
                format!(
                    "LSP Request: textDocument/codeLens uri={}",
                    params.text_document.uri
                ),
            )
            .await;
        let result = lens::code_lens(self, params).await;
        if let Ok(Some(lenses)) = &result {
            self.client
                .log_message(
                    MessageType::LOG,
                    format!("LSP Response: placed {} code lenses", lenses.len()),
                )
                .await;
        }
        result
    }

    async fn code_lens_resolve(&self, params: CodeLens) -> Result<CodeLens> {
        let pos = params.range.start;
        self.client
            .log_message(
                MessageType::LOG,
                format!(
                    "LSP Request: codeLens/resolve pos={}:{}",
                    pos.line, pos.character
                ),
            )
            .await;
        let result = lens::code_lens_resolve(self, params).await;
        match &result {
            Ok(CodeLens {
                command: Some(command),
                ..
            }) => {
                self.client
                    .log_message(
                        MessageType::LOG,
                        format!("LSP Response: {}", command.title),
                    )
                    .await
            }
            Ok(_) => {
                self.client
                    .log_message(MessageType::LOG, "LSP Response: lens left unresolved")
                    .await
            }
            Err(e) => {
                self.client
                    .log_message(MessageType::ERROR, format!("LSP Error: {}", e))
                    .await
            }
        }
        result
    }
}

pub async fn run_server<F>(engine_builder: F) -> std::result::Result<(), Box<dyn std::error::Error>>
where
    F: Fn(PathBuf) -> Arc<dyn LensEngine> + Send + Sync + 'static,
{
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let builder: EngineBuilder = Arc::new(engine_builder);

    let (service, socket) =
        tower_lsp::LspService::new(move |client| LspServer::new(client, builder.clone()));
    tower_lsp::Server::new(stdin, stdout, socket)
        .serve(service)
        .await;

    Ok(())
}
