use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootKind {
    Source,
    /// Compiled or library-only content.
    Binary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    pub path: PathBuf,
    pub kind: RootKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub roots: Vec<ProjectRoot>,
}

impl Project {
    pub fn source_roots(&self) -> impl Iterator<Item = &Path> {
        self.roots
            .iter()
            .filter(|r| r.kind == RootKind::Source)
            .map(|r| r.path.as_path())
    }
}

/// Immutable set of projects a search runs against.
#[derive(Debug, Clone, Default)]
pub struct SearchScope {
    projects: Arc<[Project]>,
}

impl SearchScope {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects: projects.into(),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn source_roots(&self) -> impl Iterator<Item = &Path> {
        self.projects.iter().flat_map(|p| p.source_roots())
    }

    pub fn encloses(&self, path: &Path) -> bool {
        self.source_roots().any(|root| path.starts_with(root))
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
