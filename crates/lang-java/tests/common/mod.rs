use refscope_java::{JavaEditorContext, JavaWorkspace};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use url::Url;

/// A Maven-shaped workspace on disk. The directory lives as long as this
/// value.
pub struct TestWorkspace {
    pub dir: TempDir,
    pub workspace: Arc<JavaWorkspace>,
}

impl TestWorkspace {
    pub fn source_path(&self, rel: &str) -> PathBuf {
        self.dir.path().join("src/main/java").join(rel)
    }

    pub fn uri(&self, rel: &str) -> String {
        uri_of(&self.source_path(rel))
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.source_path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Editor context over the on-disk text of `rel`.
    pub fn open(&self, rel: &str) -> JavaEditorContext {
        let text = fs::read_to_string(self.source_path(rel)).unwrap();
        self.workspace.editor_context(&self.uri(rel), text.into())
    }

    pub fn open_with(&self, rel: &str, text: &str) -> JavaEditorContext {
        self.workspace.editor_context(&self.uri(rel), text.into())
    }
}

pub fn setup_java_workspace(files: Vec<(&str, &str)>) -> TestWorkspace {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("pom.xml"), "<project/>").unwrap();
    fs::create_dir_all(dir.path().join("src/main/java")).unwrap();
    let workspace = Arc::new(JavaWorkspace::new(dir.path()).unwrap());
    let ws = TestWorkspace { dir, workspace };
    for (rel, content) in files {
        ws.write(rel, content);
    }
    ws
}

pub fn uri_of(path: &Path) -> String {
    Url::from_file_path(path).unwrap().to_string()
}
