use crate::error::JavaError;
use crate::matcher::find_matches;
use crate::parser::JavaParser;
use crate::project::is_java_file;
use dashmap::DashMap;
use ignore::WalkBuilder;
use refscope_api::{
    CancellationToken, LensError, LensResult, SearchMatch, SearchParticipant, SearchPattern,
    SearchScope,
};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

pub type Overlays = Arc<DashMap<PathBuf, Arc<str>>>;

/// Searches Java sources under the scope's source roots.
///
/// Open documents are read from the overlay map instead of disk, so
/// unsaved edits are searched as well.
pub struct JavaSourceParticipant {
    parser: JavaParser,
    overlays: Overlays,
}

impl JavaSourceParticipant {
    pub fn new(parser: JavaParser, overlays: Overlays) -> Self {
        Self { parser, overlays }
    }

    fn read_source(&self, path: &Path) -> Option<Arc<str>> {
        if let Some(text) = self.overlays.get(path) {
            return Some(text.clone());
        }
        match fs::read_to_string(path) {
            Ok(text) => Some(text.into()),
            Err(e) => {
                warn!("Skipping unreadable file {}: {}", path.display(), e);
                None
            }
        }
    }

    fn search_file(
        &self,
        path: &Path,
        pattern: &SearchPattern,
        requestor: &mut dyn FnMut(SearchMatch),
    ) -> LensResult<()> {
        let Some(source) = self.read_source(path) else {
            return Ok(());
        };
        let tree = match self.parser.parse(&source) {
            Ok(tree) => tree,
            Err(e @ JavaError::Language(_)) => return Err(e.into()),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                return Ok(());
            }
        };
        let unit = Url::from_file_path(path).ok().map(|u| u.to_string());
        for hit in find_matches(&tree, &source, pattern) {
            requestor(SearchMatch {
                element: hit.element,
                enclosing_unit: unit.clone(),
                offset: hit.offset,
                length: hit.length,
            });
        }
        Ok(())
    }
}

impl SearchParticipant for JavaSourceParticipant {
    fn name(&self) -> &str {
        "java-source"
    }

    fn locate_matches(
        &self,
        pattern: &SearchPattern,
        scope: &SearchScope,
        cancel: &CancellationToken,
        requestor: &mut dyn FnMut(SearchMatch),
    ) -> LensResult<()> {
        let mut seen: HashSet<PathBuf> = HashSet::new();

        for root in scope.source_roots() {
            for entry in WalkBuilder::new(root).build() {
                if cancel.is_cancelled() {
                    return Err(LensError::Cancelled);
                }
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!("Skipping entry under {}: {}", root.display(), e);
                        continue;
                    }
                };
                let path = entry.path();
                if !path.is_file() || !is_java_file(path) || !seen.insert(path.to_path_buf()) {
                    continue;
                }
                self.search_file(path, pattern, requestor)?;
            }
        }

        // Open documents that do not exist on disk yet
        let unsaved: Vec<PathBuf> = self
            .overlays
            .iter()
            .map(|e| e.key().clone())
            .filter(|p| is_java_file(p) && scope.encloses(p) && !seen.contains(p))
            .collect();
        for path in unsaved {
            if cancel.is_cancelled() {
                return Err(LensError::Cancelled);
            }
            self.search_file(&path, pattern, requestor)?;
        }

        debug!(
            "{} searched {} files for {}",
            self.name(),
            seen.len(),
            pattern.symbol.name
        );
        Ok(())
    }
}
