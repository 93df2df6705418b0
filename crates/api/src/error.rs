/// Failure taxonomy shared by every stage of lens production and resolution.
///
/// None of these ever reach the host as a crash: the provider maps them to
/// an empty lens list or an unresolved lens.
#[derive(Debug, thiserror::Error)]
pub enum LensError {
    /// The declaration tree of a unit could not be read.
    #[error("Model access error: {0}")]
    ModelAccess(String),
    /// Workspace projects could not be enumerated.
    #[error("Scope build error: {0}")]
    ScopeBuild(String),
    /// The symbol search itself failed.
    #[error("Search execution error: {0}")]
    SearchExecution(String),
    #[error("Operation cancelled")]
    Cancelled,
}

impl LensError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LensError::Cancelled)
    }
}

pub type LensResult<T> = std::result::Result<T, LensError>;
