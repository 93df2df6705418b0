//! Syntactic occurrence matching for one parsed file.
//!
//! Matching is by simple name. Method calls are narrowed by arity and by
//! the declared type of their receiver when this file states it; a call
//! whose receiver type cannot be told from the file still matches.

use crate::constants::*;
use refscope_api::{DeclarationKind, SearchFor, SearchPattern, SymbolKey};
use smol_str::SmolStr;
use tree_sitter::{Node, Tree};

/// A match inside one file, as a byte span of the matched name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub element: SmolStr,
    pub offset: usize,
    pub length: usize,
}

impl Hit {
    fn at(node: Node, element: SmolStr) -> Self {
        Self {
            element,
            offset: node.start_byte(),
            length: node.end_byte() - node.start_byte(),
        }
    }
}

pub fn find_matches(tree: &Tree, source: &str, pattern: &SearchPattern) -> Vec<Hit> {
    let symbol = &pattern.symbol;
    let mut hits = Vec::new();
    match (pattern.limit_to, symbol.kind) {
        (SearchFor::References, DeclarationKind::Type) => {
            walk(tree, |node| type_reference(node, source, symbol, &mut hits))
        }
        (SearchFor::References, DeclarationKind::Method) => {
            let constructor = symbol.signature.as_ref().is_some_and(|s| s.constructor);
            if constructor {
                walk(tree, |node| constructor_call(node, source, symbol, &mut hits))
            } else {
                walk(tree, |node| method_call(node, source, symbol, &mut hits))
            }
        }
        (SearchFor::Implementations, DeclarationKind::Type) => {
            walk(tree, |node| implementation(node, source, symbol, &mut hits))
        }
        _ => {}
    }
    hits
}

/// Pre-order traversal with an explicit cursor; deep expression trees do
/// not grow the stack.
fn walk<'t>(tree: &'t Tree, mut visit: impl FnMut(Node<'t>)) {
    let mut cursor = tree.walk();
    loop {
        visit(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

fn text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn type_reference(node: Node, source: &str, symbol: &SymbolKey, hits: &mut Vec<Hit>) {
    let is_name = match node.kind() {
        KIND_TYPE_IDENTIFIER => true,
        // `Foo.bar()`, `Foo.CONST`, `import a.b.Foo;`
        KIND_IDENTIFIER => node.parent().is_some_and(|parent| match parent.kind() {
            KIND_METHOD_INVOCATION | KIND_FIELD_ACCESS => {
                parent.child_by_field_name(FIELD_OBJECT) == Some(node)
            }
            KIND_SCOPED_IDENTIFIER => true,
            _ => false,
        }),
        _ => false,
    };
    if !is_name || text(node, source) != symbol.name {
        return;
    }
    // `foo.bar()` on a variable named like the type
    if node.kind() == KIND_IDENTIFIER && !matches!(binding_of(node, source), Binding::Unbound) {
        return;
    }
    hits.push(Hit::at(node, enclosing_element(node, source)));
}

fn method_call(node: Node, source: &str, symbol: &SymbolKey, hits: &mut Vec<Hit>) {
    match node.kind() {
        KIND_METHOD_INVOCATION => {
            let Some(name) = node.child_by_field_name(FIELD_NAME) else {
                return;
            };
            if text(name, source) == symbol.name
                && arity_fits(node, symbol)
                && receiver_fits(node, node.child_by_field_name(FIELD_OBJECT), source, symbol)
            {
                hits.push(Hit::at(name, enclosing_element(node, source)));
            }
        }
        KIND_METHOD_REFERENCE => {
            let mut cursor = node.walk();
            let parts: Vec<Node> = node.named_children(&mut cursor).collect();
            if let [receiver, .., last] = parts.as_slice()
                && last.kind() == KIND_IDENTIFIER
                && text(*last, source) == symbol.name
                && receiver_fits(node, Some(*receiver), source, symbol)
            {
                hits.push(Hit::at(*last, enclosing_element(node, source)));
            }
        }
        _ => {}
    }
}

fn constructor_call(node: Node, source: &str, symbol: &SymbolKey, hits: &mut Vec<Hit>) {
    if node.kind() != KIND_OBJECT_CREATION {
        return;
    }
    let Some(ty) = node.child_by_field_name(FIELD_TYPE) else {
        return;
    };
    if simple_type_name(ty, source) == Some(symbol.name.as_str()) && arity_fits(node, symbol) {
        hits.push(Hit::at(ty, enclosing_element(node, source)));
    }
}

fn implementation(node: Node, source: &str, symbol: &SymbolKey, hits: &mut Vec<Hit>) {
    if node.kind() == KIND_OBJECT_CREATION {
        if body_of(node).is_some()
            && let Some(ty) = node.child_by_field_name(FIELD_TYPE)
            && simple_type_name(ty, source) == Some(symbol.name.as_str())
        {
            let element = SmolStr::new(format!("new {}() {{...}}", symbol.name));
            hits.push(Hit::at(ty, element));
        }
        return;
    }

    let implements = supertypes(node)
        .iter()
        .any(|t| simple_type_name(*t, source) == Some(symbol.name.as_str()));
    if implements && let Some(name) = node.child_by_field_name(FIELD_NAME) {
        hits.push(Hit::at(name, SmolStr::new(text(name, source))));
    }
}

/// Types named in the `extends`/`implements` clauses of a type declaration.
fn supertypes(decl: Node) -> Vec<Node> {
    match decl.kind() {
        KIND_CLASS_DECL | KIND_ENUM_DECL | KIND_RECORD_DECL => {
            let mut types = Vec::new();
            if let Some(superclass) = decl.child_by_field_name(FIELD_SUPERCLASS) {
                types.extend(named_children(superclass));
            }
            if let Some(interfaces) = decl.child_by_field_name(FIELD_INTERFACES) {
                types.extend(type_list(interfaces));
            }
            types
        }
        KIND_INTERFACE_DECL => named_children(decl)
            .into_iter()
            .filter(|c| c.kind() == KIND_EXTENDS_INTERFACES)
            .flat_map(type_list)
            .collect(),
        _ => Vec::new(),
    }
}

/// Whether a call through `receiver` (none for an unqualified call) can
/// reach a method owned by `symbol.container`.
fn receiver_fits(call: Node, receiver: Option<Node>, source: &str, symbol: &SymbolKey) -> bool {
    let Some(owner) = symbol.container.as_deref() else {
        return true;
    };
    let types = enclosing_types(call);
    let Some(receiver) = receiver else {
        return enclosing_fits(&types, source, owner, &symbol.name);
    };
    match receiver.kind() {
        KIND_THIS => enclosing_fits(&types[..types.len().min(1)], source, owner, &symbol.name),
        KIND_SUPER => types
            .first()
            .is_none_or(|t| !super_names(*t, source).is_empty()),
        KIND_IDENTIFIER => match binding_of(receiver, source) {
            Binding::Typed(ty) => ty == owner,
            Binding::Untyped => true,
            // `Owner.m()`; another capitalized name is another type
            Binding::Unbound => {
                let name = text(receiver, source);
                name == owner || !name.starts_with(char::is_uppercase)
            }
        },
        KIND_FIELD_ACCESS => match this_field_type(receiver, &types, source) {
            Binding::Typed(ty) => ty == owner,
            _ => true,
        },
        KIND_TYPE_IDENTIFIER | KIND_SCOPED_TYPE_IDENTIFIER | KIND_GENERIC_TYPE => {
            simple_type_name(receiver, source) == Some(owner)
        }
        _ => true,
    }
}

/// An unqualified call resolves against the enclosing types: it reaches
/// `owner` when one of them is or extends it, and misses when one of them
/// declares the method itself.
fn enclosing_fits(types: &[Node], source: &str, owner: &str, method: &str) -> bool {
    let owned = types.iter().any(|t| {
        own_name(*t, source) == Some(owner) || super_names(*t, source).contains(&owner)
    });
    if owned {
        return true;
    }
    if types.iter().any(|t| declares_method(*t, source, method)) {
        return false;
    }
    // May be inherited through a supertype declared elsewhere
    types.iter().any(|t| !super_names(*t, source).is_empty())
}

/// Type declarations and anonymous class bodies around `node`, innermost first.
fn enclosing_types(node: Node) -> Vec<Node> {
    let mut types = Vec::new();
    let mut current = node.parent();
    while let Some(n) = current {
        let anonymous = n.kind() == KIND_OBJECT_CREATION
            && body_of(n).is_some_and(|b| {
                b.start_byte() <= node.start_byte() && node.end_byte() <= b.end_byte()
            });
        if anonymous || is_type_declaration(n.kind()) {
            types.push(n);
        }
        current = n.parent();
    }
    types
}

fn own_name<'s>(decl: Node, source: &'s str) -> Option<&'s str> {
    if !is_type_declaration(decl.kind()) {
        return None;
    }
    decl.child_by_field_name(FIELD_NAME).map(|n| text(n, source))
}

/// An anonymous class has the instantiated type as its only supertype.
fn super_names<'s>(decl: Node, source: &'s str) -> Vec<&'s str> {
    let types = if decl.kind() == KIND_OBJECT_CREATION {
        decl.child_by_field_name(FIELD_TYPE).into_iter().collect()
    } else {
        supertypes(decl)
    };
    types
        .into_iter()
        .filter_map(|t| simple_type_name(t, source))
        .collect()
}

fn body_of(decl: Node) -> Option<Node> {
    if decl.kind() == KIND_OBJECT_CREATION {
        return named_children(decl)
            .into_iter()
            .find(|c| c.kind() == KIND_CLASS_BODY);
    }
    if is_type_declaration(decl.kind()) {
        return decl.child_by_field_name(FIELD_BODY);
    }
    None
}

fn declares_method(decl: Node, source: &str, method: &str) -> bool {
    let Some(body) = body_of(decl) else {
        return false;
    };
    named_children(body)
        .into_iter()
        .flat_map(|m| {
            if m.kind() == KIND_ENUM_BODY_DECLS {
                named_children(m)
            } else {
                vec![m]
            }
        })
        .any(|m| {
            m.kind() == KIND_METHOD_DECL
                && is_named(m.child_by_field_name(FIELD_NAME), method, source)
        })
}

/// What a simple name used as an expression refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding<'s> {
    /// A variable whose declared type is written out.
    Typed(&'s str),
    /// A variable of `var`, lambda, array or catch type.
    Untyped,
    /// No variable of that name is declared in this file's scopes.
    Unbound,
}

/// Looks the name up through the local, parameter and field declarations
/// visible at `name_node`.
fn binding_of<'s>(name_node: Node, source: &'s str) -> Binding<'s> {
    let name = text(name_node, source);
    let mut scope = name_node.parent();
    while let Some(node) = scope {
        if let Some(binding) = declared_in(node, name, name_node.start_byte(), source) {
            return binding;
        }
        scope = node.parent();
    }
    Binding::Unbound
}

fn declared_in<'s>(scope: Node, name: &str, before: usize, source: &'s str) -> Option<Binding<'s>> {
    match scope.kind() {
        KIND_METHOD_DECL | KIND_CONSTR_DECL | KIND_RECORD_DECL => {
            if let Some(params) = scope.child_by_field_name(FIELD_PARAMETERS)
                && let Some(binding) = parameter(params, name, source)
            {
                return Some(binding);
            }
        }
        KIND_LAMBDA => {
            if let Some(params) = scope.child_by_field_name(FIELD_PARAMETERS) {
                let binding = match params.kind() {
                    KIND_IDENTIFIER if text(params, source) == name => Some(Binding::Untyped),
                    KIND_FORMAL_PARAMETERS => parameter(params, name, source),
                    KIND_INFERRED_PARAMETERS => named_children(params)
                        .iter()
                        .any(|p| text(*p, source) == name)
                        .then_some(Binding::Untyped),
                    _ => None,
                };
                if binding.is_some() {
                    return binding;
                }
            }
        }
        KIND_ENHANCED_FOR if is_named(scope.child_by_field_name(FIELD_NAME), name, source) => {
            return Some(declared_type(scope.child_by_field_name(FIELD_TYPE), source));
        }
        KIND_CATCH_CLAUSE => {
            let caught = named_children(scope).iter().any(|c| {
                c.kind() == KIND_CATCH_FORMAL_PARAMETER
                    && is_named(c.child_by_field_name(FIELD_NAME), name, source)
            });
            if caught {
                return Some(Binding::Untyped);
            }
        }
        KIND_TRY_WITH_RESOURCES => {
            if let Some(resources) = scope.child_by_field_name(FIELD_RESOURCES)
                && let Some(resource) = named_children(resources).into_iter().find(|r| {
                    r.kind() == KIND_RESOURCE
                        && is_named(r.child_by_field_name(FIELD_NAME), name, source)
                })
            {
                return Some(declared_type(resource.child_by_field_name(FIELD_TYPE), source));
            }
        }
        _ => {}
    }
    named_children(scope)
        .into_iter()
        .find_map(|member| match member.kind() {
            KIND_LOCAL_VAR_DECL if member.start_byte() < before => declarator(member, name, source),
            KIND_FIELD_DECL | KIND_CONSTANT_DECL => declarator(member, name, source),
            _ => None,
        })
}

fn parameter<'s>(params: Node, name: &str, source: &'s str) -> Option<Binding<'s>> {
    named_children(params)
        .into_iter()
        .find_map(|p| match p.kind() {
            KIND_FORMAL_PARAMETER if is_named(p.child_by_field_name(FIELD_NAME), name, source) => {
                Some(declared_type(p.child_by_field_name(FIELD_TYPE), source))
            }
            // `Foo... items` is an array
            KIND_SPREAD_PARAMETER => named_children(p)
                .into_iter()
                .find(|c| c.kind() == KIND_VARIABLE_DECLARATOR)
                .filter(|d| is_named(d.child_by_field_name(FIELD_NAME), name, source))
                .map(|_| Binding::Untyped),
            _ => None,
        })
}

fn declarator<'s>(decl: Node, name: &str, source: &'s str) -> Option<Binding<'s>> {
    let mut cursor = decl.walk();
    let declared = decl
        .children_by_field_name(FIELD_DECLARATOR, &mut cursor)
        .any(|d| is_named(d.child_by_field_name(FIELD_NAME), name, source));
    declared.then(|| declared_type(decl.child_by_field_name(FIELD_TYPE), source))
}

fn declared_type<'s>(ty: Option<Node>, source: &'s str) -> Binding<'s> {
    match ty.and_then(|t| simple_type_name(t, source)) {
        Some(name) if name != INFERRED_TYPE => Binding::Typed(name),
        _ => Binding::Untyped,
    }
}

/// Declared type of `this.field` when the innermost type declares it.
fn this_field_type<'s>(access: Node, types: &[Node], source: &'s str) -> Binding<'s> {
    let (Some(object), Some(field)) = (
        access.child_by_field_name(FIELD_OBJECT),
        access.child_by_field_name(FIELD_FIELD),
    ) else {
        return Binding::Unbound;
    };
    if object.kind() != KIND_THIS {
        return Binding::Unbound;
    }
    types
        .first()
        .and_then(|t| body_of(*t))
        .and_then(|body| declared_in(body, text(field, source), usize::MAX, source))
        .unwrap_or(Binding::Unbound)
}

fn is_named(node: Option<Node>, name: &str, source: &str) -> bool {
    node.is_some_and(|n| text(n, source) == name)
}

fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !is_comment(c.kind()))
        .collect()
}

/// Types listed by a `super_interfaces`/`extends_interfaces` clause.
fn type_list(clause: Node) -> Vec<Node> {
    named_children(clause)
        .into_iter()
        .flat_map(named_children)
        .collect()
}

/// `Foo`, `Foo<T>` and `a.b.Foo` all name `Foo`.
fn simple_type_name<'s>(node: Node, source: &'s str) -> Option<&'s str> {
    match node.kind() {
        KIND_TYPE_IDENTIFIER | KIND_IDENTIFIER => Some(text(node, source)),
        KIND_GENERIC_TYPE => node
            .named_child(0)
            .and_then(|base| simple_type_name(base, source)),
        KIND_SCOPED_TYPE_IDENTIFIER => named_children(node)
            .into_iter()
            .rev()
            .find(|c| c.kind() == KIND_TYPE_IDENTIFIER)
            .map(|c| text(c, source)),
        _ => None,
    }
}

fn arity_fits(call: Node, symbol: &SymbolKey) -> bool {
    let Some(signature) = &symbol.signature else {
        return true;
    };
    let Some(args) = call.child_by_field_name(FIELD_ARGUMENTS) else {
        return true;
    };
    signature.accepts(named_children(args).len())
}

/// Name of the closest declaration around `node`, or `<unit>` at top level.
fn enclosing_element(node: Node, source: &str) -> SmolStr {
    let mut current = node.parent();
    while let Some(n) = current {
        if (is_type_declaration(n.kind()) || is_method_declaration(n.kind()))
            && let Some(name) = n.child_by_field_name(FIELD_NAME)
        {
            return SmolStr::new(text(name, source));
        }
        current = n.parent();
    }
    SmolStr::new_static("<unit>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::JavaParser;
    use refscope_api::MethodSignature;

    fn pattern(
        name: &str,
        kind: DeclarationKind,
        limit_to: SearchFor,
        signature: Option<MethodSignature>,
    ) -> SearchPattern {
        SearchPattern {
            symbol: SymbolKey {
                unit: "file:///Decl.java".to_string(),
                name: SmolStr::new(name),
                kind,
                container: None,
                signature,
            },
            limit_to,
        }
    }

    fn run(source: &str, pattern: &SearchPattern) -> Vec<Hit> {
        let tree = JavaParser::new().unwrap().parse(source).unwrap();
        find_matches(&tree, source, pattern)
    }

    fn elements(hits: &[Hit]) -> Vec<&str> {
        hits.iter().map(|h| h.element.as_str()).collect()
    }

    #[test]
    fn type_references_cover_types_and_qualifiers() {
        let src = r#"
import com.acme.Foo;
class User {
    Foo field;
    java.util.List<Foo> all() { return Foo.create(); }
    int size() { return Foo.MAX; }
}
"#;
        let hits = run(
            src,
            &pattern("Foo", DeclarationKind::Type, SearchFor::References, None),
        );
        assert_eq!(elements(&hits), ["<unit>", "User", "all", "all", "size"]);
        for hit in &hits {
            assert_eq!(&src[hit.offset..hit.offset + hit.length], "Foo");
        }
    }

    #[test]
    fn method_references_respect_arity() {
        let src = r#"
class Caller {
    void go(Service s) {
        s.bar();
        s.bar(1);
        s.baz();
        Runnable r = s::bar;
    }
}
"#;
        let zero = MethodSignature {
            arity: Some(0),
            varargs: false,
            constructor: false,
        };
        let hits = run(
            src,
            &pattern(
                "bar",
                DeclarationKind::Method,
                SearchFor::References,
                Some(zero),
            ),
        );
        assert_eq!(hits.len(), 2);
        assert_eq!(elements(&hits), ["go", "go"]);
    }

    fn owned_by(mut pattern: SearchPattern, owner: &str) -> SearchPattern {
        pattern.symbol.container = Some(SmolStr::new(owner));
        pattern
    }

    #[test]
    fn given_calls_on_several_receivers_when_matching_owned_method_then_only_owner_calls_hit() {
        let src = r#"
class Service {
    void bar() {}
    void self() { bar(); this.bar(); }
}
class Other {
    void bar() {}
    void go(Service s, Other o) {
        s.bar();
        o.bar();
        bar();
        Service.bar();
        Other.bar();
        var v = make();
        v.bar();
        Runnable r = s::bar;
        Runnable q = o::bar;
    }
}
class Child extends Service {
    void go() { bar(); super.bar(); }
}
"#;
        let hits = run(
            src,
            &owned_by(
                pattern("bar", DeclarationKind::Method, SearchFor::References, None),
                "Service",
            ),
        );
        assert_eq!(
            elements(&hits),
            ["self", "self", "go", "go", "go", "go", "go", "go"]
        );
        let receivers: Vec<&str> = hits
            .iter()
            .map(|h| {
                let line_start = src[..h.offset].rfind('\n').map_or(0, |i| i + 1);
                src[line_start..h.offset].trim()
            })
            .collect();
        assert_eq!(
            receivers,
            [
                "void self() {",
                "void self() { bar(); this.",
                "s.",
                "Service.",
                "v.",
                "Runnable r = s::",
                "void go() {",
                "void go() { bar(); super.",
            ]
        );
    }

    #[test]
    fn given_fields_and_locals_when_matching_owned_method_then_declared_types_decide() {
        let src = r#"
class Holder {
    private Service service;
    private Other other;
    void run(java.util.List<Service> all) {
        this.service.bar();
        this.other.bar();
        service.bar();
        other.bar();
        for (Service each : all) { each.bar(); }
        all.forEach(x -> x.bar());
    }
}
"#;
        let hits = run(
            src,
            &owned_by(
                pattern("bar", DeclarationKind::Method, SearchFor::References, None),
                "Service",
            ),
        );
        let lines: Vec<&str> = hits
            .iter()
            .map(|h| {
                let start = src[..h.offset].rfind('\n').map_or(0, |i| i + 1);
                let end = src[h.offset..].find('\n').map_or(src.len(), |i| h.offset + i);
                src[start..end].trim()
            })
            .collect();
        assert_eq!(
            lines,
            [
                "this.service.bar();",
                "service.bar();",
                "for (Service each : all) { each.bar(); }",
                "all.forEach(x -> x.bar());",
            ]
        );
    }

    #[test]
    fn given_variable_named_like_type_when_matching_type_references_then_variable_skipped() {
        let src = r#"
class Uses {
    void m(Object Foo) { Foo.toString(); }
    void n() { Foo.make(); }
}
"#;
        let hits = run(
            src,
            &pattern("Foo", DeclarationKind::Type, SearchFor::References, None),
        );
        assert_eq!(elements(&hits), ["n"]);
    }

    #[test]
    fn constructor_references_match_instantiations() {
        let src = r#"
class Factory {
    Point a() { return new Point(1, 2); }
    Point b() { return new Point(); }
    Object c() { return new geo.Point(3, 4); }
}
"#;
        let two = MethodSignature {
            arity: Some(2),
            varargs: false,
            constructor: true,
        };
        let hits = run(
            src,
            &pattern(
                "Point",
                DeclarationKind::Method,
                SearchFor::References,
                Some(two),
            ),
        );
        assert_eq!(elements(&hits), ["a", "c"]);
    }

    #[test]
    fn implementations_include_subtypes_and_anonymous_classes() {
        let src = r#"
class A implements Shape {}
class B extends Base implements Comparable<B>, geo.Shape {}
interface Solid extends Shape {}
enum Unit implements Shape { ONE }
class C extends Other {}
class D {
    Shape s = new Shape() { };
    Shape t = new Square();
}
"#;
        let hits = run(
            src,
            &pattern(
                "Shape",
                DeclarationKind::Type,
                SearchFor::Implementations,
                None,
            ),
        );
        assert_eq!(
            elements(&hits),
            ["A", "B", "Solid", "Unit", "new Shape() {...}"]
        );
    }

    #[test]
    fn implementations_of_a_method_are_never_searched() {
        let hits = run(
            "class A { void m() { m(); } }",
            &pattern("m", DeclarationKind::Method, SearchFor::Implementations, None),
        );
        assert!(hits.is_empty());
    }
}
