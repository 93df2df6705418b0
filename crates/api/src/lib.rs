pub mod engine;
pub mod error;
pub mod models;
pub mod provider;
pub mod search;
pub mod unit;

// Re-export commonly used types
pub use engine::LensEngine;
pub use error::{LensError, LensResult};
pub use models::*;
pub use provider::CodeLensProvider;
pub use search::{SearchParticipant, SymbolIndex};
pub use unit::{EditorContext, SourceUnit};

/// Cooperative cancellation signal threaded through every provider call.
pub use tokio_util::sync::CancellationToken;
