use crate::error::LensResult;
use crate::models::{Project, SearchMatch, SearchPattern, SearchScope};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Workspace-wide symbol index. External to the lens core and read-only
/// from its point of view.
pub trait SymbolIndex: Send + Sync {
    /// All projects currently open in the workspace.
    fn projects(&self) -> LensResult<Vec<Project>>;

    /// Participants a search should consult when none are specified.
    fn default_participants(&self) -> Vec<Arc<dyn SearchParticipant>>;
}

/// A source of matches for a search pattern.
pub trait SearchParticipant: Send + Sync {
    fn name(&self) -> &str;

    /// Reports every match of `pattern` inside `scope` to `requestor`.
    ///
    /// Implementations poll `cancel` and return `LensError::Cancelled` once
    /// it fires.
    fn locate_matches(
        &self,
        pattern: &SearchPattern,
        scope: &SearchScope,
        cancel: &CancellationToken,
        requestor: &mut dyn FnMut(SearchMatch),
    ) -> LensResult<()>;
}
