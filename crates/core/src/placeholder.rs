use crate::settings::LensSettings;
use refscope_api::{CodeLens, Declaration, LensKind, LensResult, SourceUnit};

/// Unresolved lenses for one enumerated declaration, anchored at its name.
///
/// Every declaration gets a References lens; interface and abstract types
/// also get an Implementations lens right after it. Kinds switched off in
/// `settings` are left out.
pub fn build(
    unit: &dyn SourceUnit,
    decl: &Declaration,
    settings: &LensSettings,
) -> LensResult<Vec<CodeLens>> {
    let anchor = unit.to_range(decl.name_span)?;
    let mut lenses = Vec::with_capacity(2);

    if settings.is_enabled(LensKind::References) {
        lenses.push(CodeLens::unresolved(LensKind::References, anchor));
    }
    if settings.is_enabled(LensKind::Implementations) && wants_implementations(decl) {
        lenses.push(CodeLens::unresolved(LensKind::Implementations, anchor));
    }
    Ok(lenses)
}

pub fn wants_implementations(decl: &Declaration) -> bool {
    decl.is_type() && (decl.flags.interface || decl.flags.is_abstract)
}
