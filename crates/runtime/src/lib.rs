use refscope_api::{CodeLensProvider, EditorContext, LensEngine, LensKind, SourceUnit};
use refscope_core::{ClassTextLensProvider, LensSettings, ReferencesLensProvider};
use refscope_java::JavaWorkspace;
use std::path::PathBuf;
use std::sync::Arc;

/// Lenses over a Java workspace: declarations from tree-sitter, counts from
/// a source search of every discovered project.
pub struct JavaLensEngine {
    workspace: Arc<JavaWorkspace>,
    provider: Arc<ReferencesLensProvider>,
}

impl JavaLensEngine {
    pub fn new(workspace: Arc<JavaWorkspace>, settings: LensSettings) -> Self {
        let provider = Arc::new(ReferencesLensProvider::new(workspace.clone(), settings));
        Self {
            workspace,
            provider,
        }
    }
}

impl LensEngine for JavaLensEngine {
    fn provider(&self) -> Arc<dyn CodeLensProvider> {
        self.provider.clone()
    }

    fn editor_context(&self, uri: &str, text: Arc<str>) -> Arc<dyn EditorContext> {
        Arc::new(self.workspace.editor_context(uri, text))
    }

    fn document_changed(&self, uri: &str, text: Option<Arc<str>>) {
        self.workspace.set_overlay(uri, text);
    }

    fn configure(&self, payload: &serde_json::Value) {
        let settings = self.provider.settings().merged_with_payload(payload);
        tracing::info!("Lens settings updated: {:?}", settings);
        self.provider.set_settings(settings);
    }
}

/// Fallback when Java support cannot be loaded: `class` lines only, counts
/// from the open document.
struct TextLensEngine {
    provider: Arc<ClassTextLensProvider>,
}

struct TextContext(Arc<str>);

impl EditorContext for TextContext {
    fn source_unit(&self) -> Option<Arc<dyn SourceUnit>> {
        None
    }

    fn text(&self) -> Option<Arc<str>> {
        Some(self.0.clone())
    }
}

impl LensEngine for TextLensEngine {
    fn provider(&self) -> Arc<dyn CodeLensProvider> {
        self.provider.clone()
    }

    fn editor_context(&self, _uri: &str, text: Arc<str>) -> Arc<dyn EditorContext> {
        Arc::new(TextContext(text))
    }

    fn document_changed(&self, _uri: &str, _text: Option<Arc<str>>) {}
}

/// Assembles the lens engine for a workspace root.
pub fn build_default_engine(root: PathBuf, settings: LensSettings) -> Arc<dyn LensEngine> {
    match JavaWorkspace::new(&root) {
        Ok(workspace) => Arc::new(JavaLensEngine::new(Arc::new(workspace), settings)),
        Err(e) => {
            tracing::error!("Failed to load Java support: {}", e);
            Arc::new(TextLensEngine {
                provider: Arc::new(ClassTextLensProvider::new(
                    settings.command_for(LensKind::References),
                )),
            })
        }
    }
}

/// Starts file logging for the host named `component` (`lsp`, `cli`).
///
/// The returned guard owns the background writer; hold it until exit so
/// buffered lines reach the file.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<impl Drop> {
    Some(refscope_core::logging::init_logging(component, to_stderr))
}
