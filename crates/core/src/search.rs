use refscope_api::{
    CancellationToken, LensError, LensResult, SearchMatch, SearchParticipant, SearchPattern,
    SearchScope,
};
use std::sync::Arc;
use tracing::trace;

/// Runs one pattern through a set of participants.
pub struct SearchEngine {
    participants: Vec<Arc<dyn SearchParticipant>>,
}

impl SearchEngine {
    pub fn new(participants: Vec<Arc<dyn SearchParticipant>>) -> Self {
        Self { participants }
    }

    /// Feeds every match to `requestor`.
    ///
    /// Returns `Cancelled` whenever the token fired during the query, even
    /// if the participants finished, so callers never see a partial result
    /// as final.
    pub fn search(
        &self,
        pattern: &SearchPattern,
        scope: &SearchScope,
        cancel: &CancellationToken,
        requestor: &mut dyn FnMut(SearchMatch),
    ) -> LensResult<()> {
        for participant in &self.participants {
            if cancel.is_cancelled() {
                return Err(LensError::Cancelled);
            }
            trace!(
                "Searching {:?} of {} with {}",
                pattern.limit_to,
                pattern.symbol.name,
                participant.name()
            );
            participant.locate_matches(pattern, scope, cancel, requestor)?;
        }
        if cancel.is_cancelled() {
            return Err(LensError::Cancelled);
        }
        Ok(())
    }
}
