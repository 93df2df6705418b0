use crate::parser::JavaParser;
use crate::unit::JavaUnit;
use refscope_api::{EditorContext, SourceUnit};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;
use url::Url;

/// The active editor: a document URI and its current text.
///
/// The declaration tree is parsed on every request, so a resolve always
/// sees the text as it is now, not as it was when the lens was produced.
pub struct JavaEditorContext {
    uri: String,
    path: Option<PathBuf>,
    text: Arc<str>,
    parser: JavaParser,
}

impl JavaEditorContext {
    pub fn new(parser: JavaParser, uri: impl Into<String>, text: Arc<str>) -> Self {
        let uri = uri.into();
        let path = Url::parse(&uri)
            .ok()
            .and_then(|u| u.to_file_path().ok());
        Self {
            uri,
            path,
            text,
            parser,
        }
    }
}

impl EditorContext for JavaEditorContext {
    fn source_unit(&self) -> Option<Arc<dyn SourceUnit>> {
        match JavaUnit::parse(&self.parser, &self.uri, self.path.clone(), self.text.clone()) {
            Ok(unit) => Some(Arc::new(unit)),
            Err(e) => {
                warn!("Cannot build source unit for {}: {}", self.uri, e);
                None
            }
        }
    }

    fn text(&self) -> Option<Arc<str>> {
        Some(self.text.clone())
    }
}
