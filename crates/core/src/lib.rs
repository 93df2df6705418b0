//! Lazily resolved reference and implementation lenses.
//!
//! `produce` walks a unit's declarations and places unresolved lenses;
//! `resolve` later re-locates the declaration under one lens and counts
//! its references or implementations across the workspace.

pub mod enumerator;
pub mod logging;
pub mod naive;
pub mod placeholder;
pub mod provider;
pub mod resolver;
pub mod scope;
pub mod search;
pub mod settings;

pub use naive::ClassTextLensProvider;
pub use provider::ReferencesLensProvider;
pub use settings::LensSettings;
