use crate::provider::CodeLensProvider;
use crate::unit::EditorContext;
use std::sync::Arc;

/// Everything a host needs to serve lenses for one workspace.
pub trait LensEngine: Send + Sync {
    fn provider(&self) -> Arc<dyn CodeLensProvider>;

    /// Wraps the current text of an open document as an editor context.
    fn editor_context(&self, uri: &str, text: Arc<str>) -> Arc<dyn EditorContext>;

    /// Records unsaved content of an open document; `None` when it is closed.
    fn document_changed(&self, uri: &str, text: Option<Arc<str>>);

    /// Applies a settings payload (LSP `initializationOptions` or
    /// `didChangeConfiguration`).
    fn configure(&self, _payload: &serde_json::Value) {}
}
