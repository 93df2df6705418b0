use crate::scope::build_scope;
use crate::search::SearchEngine;
use refscope_api::{
    CancellationToken, Declaration, LensKind, LensResult, Range, SearchPattern, SourceUnit,
    SymbolIndex, SymbolKey,
};
use tracing::debug;

/// Counts references or implementations of the declaration anchored at a
/// lens position.
pub struct ReferenceResolver<'a> {
    index: &'a dyn SymbolIndex,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(index: &'a dyn SymbolIndex) -> Self {
        Self { index }
    }

    /// Returns `Ok(None)` when nothing at `anchor` can carry a lens of
    /// `kind` any more.
    ///
    /// The declaration is looked up again in the unit's current tree; a
    /// declaration from an earlier walk is never reused.
    pub fn count(
        &self,
        unit: &dyn SourceUnit,
        anchor: &Range,
        kind: LensKind,
        cancel: &CancellationToken,
    ) -> LensResult<Option<usize>> {
        let Some(decl) = unit.declaration_at(anchor)? else {
            debug!(
                "No declaration at {}:{} in {}",
                anchor.start_line,
                anchor.start_col,
                unit.uri()
            );
            return Ok(None);
        };
        if !accepts(&decl, kind) {
            debug!("{} can no longer carry a {:?} lens", decl.name, kind);
            return Ok(None);
        }

        let pattern = SearchPattern {
            symbol: SymbolKey::from_declaration(unit.uri(), &decl),
            limit_to: kind.search_for(),
        };
        let scope = build_scope(self.index)?;
        let engine = SearchEngine::new(self.index.default_participants());

        let mut count = 0usize;
        let mut orphaned = 0usize;
        engine.search(&pattern, &scope, cancel, &mut |m| {
            if m.enclosing_unit.is_some() {
                count += 1;
            } else {
                orphaned += 1;
            }
        })?;

        if orphaned > 0 {
            debug!(
                "Discarded {} matches for {} without an enclosing unit",
                orphaned, decl.name
            );
        }
        Ok(Some(count))
    }
}

fn accepts(decl: &Declaration, kind: LensKind) -> bool {
    match kind {
        LensKind::References => decl.is_type() || (decl.is_method() && !decl.flags.hidden),
        LensKind::Implementations => decl.is_type(),
    }
}
