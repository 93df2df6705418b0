use crate::error::LensResult;
use crate::models::{Declaration, Range, Span};
use std::sync::Arc;

/// Read-only view of a parsed source file and its declaration tree.
///
/// Declarations handed out by one call are only valid against the tree
/// that produced them. Callers that need a symbol later must keep its
/// anchor and go through [`SourceUnit::declaration_at`] again.
pub trait SourceUnit: Send + Sync {
    fn uri(&self) -> &str;

    /// Whether the backing resource still exists.
    fn exists(&self) -> bool;

    /// Top-level declarations in source order.
    fn declarations(&self) -> LensResult<Vec<Declaration>>;

    /// Members of `parent` in source order.
    fn children(&self, parent: &Declaration) -> LensResult<Vec<Declaration>>;

    /// Converts a byte span of this unit into a line/column range.
    fn to_range(&self, span: Span) -> LensResult<Range>;

    /// Finds the declaration whose name is at `anchor` in the current tree.
    fn declaration_at(&self, anchor: &Range) -> LensResult<Option<Declaration>>;
}

/// What the host knows about the active editor.
pub trait EditorContext: Send + Sync {
    fn source_unit(&self) -> Option<Arc<dyn SourceUnit>>;

    /// Raw document text, for providers that scan text instead of a model.
    fn text(&self) -> Option<Arc<str>>;
}
