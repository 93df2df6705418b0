//! Java source model for refscope: declaration trees from tree-sitter,
//! project discovery, and a source-level search participant.

pub mod constants;
pub mod context;
pub mod error;
pub mod line_index;
pub mod matcher;
pub mod parser;
pub mod project;
pub mod search;
pub mod unit;
pub mod workspace;

pub use context::JavaEditorContext;
pub use error::{JavaError, Result};
pub use parser::JavaParser;
pub use search::JavaSourceParticipant;
pub use unit::JavaUnit;
pub use workspace::JavaWorkspace;
