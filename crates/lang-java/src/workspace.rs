use crate::context::JavaEditorContext;
use crate::error::Result;
use crate::parser::JavaParser;
use crate::project::discover_projects;
use crate::search::{JavaSourceParticipant, Overlays};
use refscope_api::{LensResult, Project, SearchParticipant, SymbolIndex};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// A Java workspace rooted at one directory.
///
/// Projects are discovered from disk on every call, so build files added
/// or removed between two resolves are picked up without a reload.
pub struct JavaWorkspace {
    root: PathBuf,
    parser: JavaParser,
    overlays: Overlays,
    participant: Arc<JavaSourceParticipant>,
}

impl JavaWorkspace {
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        let parser = JavaParser::new()?;
        let overlays = Overlays::default();
        let participant = Arc::new(JavaSourceParticipant::new(
            parser.clone(),
            overlays.clone(),
        ));
        Ok(Self {
            root,
            parser,
            overlays,
            participant,
        })
    }

    /// Records the unsaved text of an open document; `None` drops it.
    pub fn set_overlay(&self, uri: &str, text: Option<Arc<str>>) {
        let Some(path) = Url::parse(uri).ok().and_then(|u| u.to_file_path().ok()) else {
            debug!("Ignoring overlay for non-file URI {}", uri);
            return;
        };
        match text {
            Some(text) => {
                self.overlays.insert(path, text);
            }
            None => {
                self.overlays.remove(&path);
            }
        }
    }

    pub fn editor_context(&self, uri: &str, text: Arc<str>) -> JavaEditorContext {
        JavaEditorContext::new(self.parser.clone(), uri, text)
    }
}

impl SymbolIndex for JavaWorkspace {
    fn projects(&self) -> LensResult<Vec<Project>> {
        Ok(discover_projects(&self.root)?)
    }

    fn default_participants(&self) -> Vec<Arc<dyn SearchParticipant>> {
        vec![self.participant.clone() as Arc<dyn SearchParticipant>]
    }
}
