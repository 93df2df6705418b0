use refscope_api::LensError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JavaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parsing error: {0}")]
    Parsing(String),
    #[error("Language error: {0}")]
    Language(String),
    #[error("Workspace error: {0}")]
    Workspace(String),
}

impl From<JavaError> for LensError {
    fn from(err: JavaError) -> Self {
        match err {
            JavaError::Workspace(msg) => LensError::ScopeBuild(msg),
            JavaError::Language(msg) => LensError::SearchExecution(msg),
            other => LensError::ModelAccess(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, JavaError>;
