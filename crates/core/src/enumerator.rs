use refscope_api::{
    CancellationToken, Declaration, DeclarationKind, LensError, LensResult, SourceUnit,
};

/// Walks the declaration tree of `unit` depth-first and returns every
/// declaration that gets lenses.
///
/// A type's members come before the type itself. Hidden methods and
/// anything that is neither a type nor a method are skipped. Cancellation
/// is polled before each sibling and turns the whole walk into
/// `LensError::Cancelled`.
pub fn enumerate(unit: &dyn SourceUnit, cancel: &CancellationToken) -> LensResult<Vec<Declaration>> {
    let top_level = unit.declarations()?;
    let mut out = Vec::with_capacity(top_level.len());
    collect(unit, top_level, cancel, &mut out)?;
    Ok(out)
}

fn collect(
    unit: &dyn SourceUnit,
    siblings: Vec<Declaration>,
    cancel: &CancellationToken,
    out: &mut Vec<Declaration>,
) -> LensResult<()> {
    for decl in siblings {
        if cancel.is_cancelled() {
            return Err(LensError::Cancelled);
        }
        match decl.kind {
            DeclarationKind::Type => {
                let members = unit.children(&decl)?;
                collect(unit, members, cancel, out)?;
                out.push(decl);
            }
            DeclarationKind::Method if !decl.flags.hidden => out.push(decl),
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use refscope_api::{DeclId, DeclarationFlags, Range, Span};
    use smol_str::SmolStr;

    /// Flat arena: (declaration, parent index).
    struct ArenaUnit {
        nodes: Vec<(Declaration, Option<u32>)>,
        fail_children_of: Option<u32>,
    }

    impl ArenaUnit {
        fn new() -> Self {
            Self {
                nodes: Vec::new(),
                fail_children_of: None,
            }
        }

        fn add(&mut self, name: &str, kind: DeclarationKind, hidden: bool, parent: Option<u32>) -> u32 {
            let id = self.nodes.len() as u32;
            self.nodes.push((
                Declaration {
                    id: DeclId(id),
                    kind,
                    flags: DeclarationFlags {
                        hidden,
                        ..Default::default()
                    },
                    name: SmolStr::new(name),
                    name_span: Span::new(id as usize, 1),
                    container: None,
                    signature: None,
                },
                parent,
            ));
            id
        }

        fn of_parent(&self, parent: Option<u32>) -> Vec<Declaration> {
            self.nodes
                .iter()
                .filter(|(_, p)| *p == parent)
                .map(|(d, _)| d.clone())
                .collect()
        }
    }

    impl SourceUnit for ArenaUnit {
        fn uri(&self) -> &str {
            "file:///A.java"
        }
        fn exists(&self) -> bool {
            true
        }
        fn declarations(&self) -> LensResult<Vec<Declaration>> {
            Ok(self.of_parent(None))
        }
        fn children(&self, parent: &Declaration) -> LensResult<Vec<Declaration>> {
            if self.fail_children_of == Some(parent.id.0) {
                return Err(LensError::ModelAccess("gone".into()));
            }
            Ok(self.of_parent(Some(parent.id.0)))
        }
        fn to_range(&self, span: Span) -> LensResult<Range> {
            Ok(Range::new(0, span.offset, 0, span.end()))
        }
        fn declaration_at(&self, _anchor: &Range) -> LensResult<Option<Declaration>> {
            Ok(None)
        }
    }

    fn names(decls: &[Declaration]) -> Vec<&str> {
        decls.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn members_are_visited_before_their_type() {
        let mut unit = ArenaUnit::new();
        let outer = unit.add("Outer", DeclarationKind::Type, false, None);
        unit.add("a", DeclarationKind::Method, false, Some(outer));
        let inner = unit.add("Inner", DeclarationKind::Type, false, Some(outer));
        unit.add("b", DeclarationKind::Method, false, Some(inner));
        unit.add("c", DeclarationKind::Method, false, Some(outer));
        unit.add("Next", DeclarationKind::Type, false, None);

        let out = enumerate(&unit, &CancellationToken::new()).unwrap();
        assert_eq!(names(&out), ["a", "b", "Inner", "c", "Outer", "Next"]);
    }

    #[test]
    fn hidden_methods_and_other_members_are_skipped() {
        let mut unit = ArenaUnit::new();
        let ty = unit.add("T", DeclarationKind::Type, false, None);
        unit.add("field", DeclarationKind::Other, false, Some(ty));
        unit.add("generated", DeclarationKind::Method, true, Some(ty));
        unit.add("visible", DeclarationKind::Method, false, Some(ty));

        let out = enumerate(&unit, &CancellationToken::new()).unwrap();
        assert_eq!(names(&out), ["visible", "T"]);
    }

    #[test]
    fn cancelled_token_aborts_walk() {
        let mut unit = ArenaUnit::new();
        unit.add("T", DeclarationKind::Type, false, None);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = enumerate(&unit, &cancel).unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn child_access_failure_aborts_walk() {
        let mut unit = ArenaUnit::new();
        unit.add("Ok", DeclarationKind::Type, false, None);
        let broken = unit.add("Broken", DeclarationKind::Type, false, None);
        unit.fail_children_of = Some(broken);

        let err = enumerate(&unit, &CancellationToken::new()).unwrap_err();
        assert!(matches!(err, LensError::ModelAccess(_)));
    }
}
