use crate::constants::*;
use crate::error::{JavaError, Result};
use crate::line_index::LineIndex;
use crate::parser::JavaParser;
use refscope_api::{
    DeclId, Declaration, DeclarationFlags, DeclarationKind, LensError, LensResult,
    MethodSignature, Range, SourceUnit, Span,
};
use smol_str::SmolStr;
use std::path::PathBuf;
use std::sync::Arc;
use tree_sitter::Node;

struct DeclNode {
    decl: Declaration,
    children: Vec<DeclId>,
}

/// A parsed Java compilation unit.
///
/// Declarations live in a flat arena and refer to each other by `DeclId`.
/// The syntax tree is dropped once the arena is built, so a unit never
/// holds on to a stale tree.
pub struct JavaUnit {
    uri: String,
    path: Option<PathBuf>,
    text: Arc<str>,
    lines: LineIndex,
    nodes: Vec<DeclNode>,
    roots: Vec<DeclId>,
}

impl JavaUnit {
    pub fn parse(
        parser: &JavaParser,
        uri: impl Into<String>,
        path: Option<PathBuf>,
        text: Arc<str>,
    ) -> Result<Self> {
        let tree = parser.parse(&text)?;
        let mut collector = Collector {
            source: &text,
            nodes: Vec::new(),
        };
        let roots = collector.top_level(tree.root_node());
        let nodes = collector.nodes;
        Ok(Self {
            uri: uri.into(),
            path,
            lines: LineIndex::new(&text),
            text,
            nodes,
            roots,
        })
    }

    fn node(&self, id: DeclId) -> LensResult<&DeclNode> {
        self.nodes.get(id.0 as usize).ok_or_else(|| {
            LensError::ModelAccess(format!("unknown declaration {:?} in {}", id, self.uri))
        })
    }

    fn decls(&self, ids: &[DeclId]) -> LensResult<Vec<Declaration>> {
        ids.iter()
            .map(|id| self.node(*id).map(|n| n.decl.clone()))
            .collect()
    }
}

impl SourceUnit for JavaUnit {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn exists(&self) -> bool {
        self.path.as_ref().is_none_or(|p| p.exists())
    }

    fn declarations(&self) -> LensResult<Vec<Declaration>> {
        self.decls(&self.roots)
    }

    fn children(&self, parent: &Declaration) -> LensResult<Vec<Declaration>> {
        let node = self.node(parent.id)?;
        if node.decl.name_span != parent.name_span {
            return Err(LensError::ModelAccess(format!(
                "declaration {} does not belong to {}",
                parent.name, self.uri
            )));
        }
        self.decls(&node.children)
    }

    fn to_range(&self, span: Span) -> LensResult<Range> {
        let out_of_bounds =
            || JavaError::Parsing(format!("span {:?} outside of {}", span, self.uri));
        let (start_line, start_col) = self
            .lines
            .position(&self.text, span.offset)
            .ok_or_else(out_of_bounds)?;
        let (end_line, end_col) = self
            .lines
            .position(&self.text, span.end())
            .ok_or_else(out_of_bounds)?;
        Ok(Range::new(start_line, start_col, end_line, end_col))
    }

    fn declaration_at(&self, anchor: &Range) -> LensResult<Option<Declaration>> {
        let Some(offset) = self
            .lines
            .offset(&self.text, anchor.start_line, anchor.start_col)
        else {
            return Ok(None);
        };
        let found = self
            .nodes
            .iter()
            .filter(|n| n.decl.name_span.length > 0)
            .find(|n| n.decl.name_span.offset == offset)
            .or_else(|| {
                self.nodes.iter().find(|n| {
                    let span = n.decl.name_span;
                    span.length > 0 && span.offset <= offset && offset < span.end()
                })
            });
        Ok(found.map(|n| n.decl.clone()))
    }
}

/// Builds the declaration arena from a syntax tree.
struct Collector<'s> {
    source: &'s str,
    nodes: Vec<DeclNode>,
}

impl<'s> Collector<'s> {
    fn top_level(&mut self, root: Node) -> Vec<DeclId> {
        let mut ids = Vec::new();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if is_type_declaration(child.kind()) {
                ids.push(self.type_declaration(child, None));
            }
        }
        ids
    }

    fn push(&mut self, decl: Declaration) -> DeclId {
        let id = decl.id;
        self.nodes.push(DeclNode {
            decl,
            children: Vec::new(),
        });
        id
    }

    fn next_id(&self) -> DeclId {
        DeclId(self.nodes.len() as u32)
    }

    fn text(&self, node: Node) -> &'s str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn type_declaration(&mut self, node: Node, container: Option<&SmolStr>) -> DeclId {
        let name_node = node.child_by_field_name(FIELD_NAME);
        let name = SmolStr::new(name_node.map(|n| self.text(n)).unwrap_or(""));
        let flags = DeclarationFlags {
            interface: matches!(node.kind(), KIND_INTERFACE_DECL | KIND_ANNOTATION_DECL),
            is_abstract: has_modifier(node, KIND_ABSTRACT),
            hidden: false,
        };
        let id = self.push(Declaration {
            id: self.next_id(),
            kind: DeclarationKind::Type,
            flags,
            name: name.clone(),
            name_span: span_of(name_node, node),
            container: container.cloned(),
            signature: None,
        });

        let children = match node.child_by_field_name(FIELD_BODY) {
            Some(body) => self.members(body, &name),
            None => Vec::new(),
        };
        self.nodes[id.0 as usize].children = children;
        id
    }

    fn members(&mut self, body: Node, container: &SmolStr) -> Vec<DeclId> {
        let mut ids = Vec::new();
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            if child.kind() == KIND_ENUM_BODY_DECLS {
                ids.extend(self.members(child, container));
            } else if let Some(id) = self.member(child, container) {
                ids.push(id);
            }
        }
        ids
    }

    fn member(&mut self, node: Node, container: &SmolStr) -> Option<DeclId> {
        let kind = node.kind();
        if is_type_declaration(kind) {
            return Some(self.type_declaration(node, Some(container)));
        }
        if is_method_declaration(kind) {
            return Some(self.method_declaration(node, container));
        }
        let (name_node, name) = match kind {
            KIND_FIELD_DECL | KIND_CONSTANT_DECL => {
                let name_node = node
                    .child_by_field_name(FIELD_DECLARATOR)
                    .and_then(|d| d.child_by_field_name(FIELD_NAME));
                (name_node, name_node.map(|n| self.text(n)).unwrap_or(""))
            }
            KIND_ENUM_CONSTANT => {
                let name_node = node.child_by_field_name(FIELD_NAME);
                (name_node, name_node.map(|n| self.text(n)).unwrap_or(""))
            }
            KIND_STATIC_INITIALIZER | KIND_BLOCK => (None, "<init>"),
            _ => return None,
        };
        Some(self.push(Declaration {
            id: self.next_id(),
            kind: DeclarationKind::Other,
            flags: DeclarationFlags::default(),
            name: SmolStr::new(name),
            name_span: span_of(name_node, node),
            container: Some(container.clone()),
            signature: None,
        }))
    }

    fn method_declaration(&mut self, node: Node, container: &SmolStr) -> DeclId {
        let name_node = node.child_by_field_name(FIELD_NAME);
        let missing_name = name_node.is_none_or(|n| n.is_missing() || n.byte_range().is_empty());
        let flags = DeclarationFlags {
            interface: false,
            is_abstract: has_modifier(node, KIND_ABSTRACT),
            hidden: missing_name || self.is_generated(node),
        };
        let signature = self.signature(node);
        self.push(Declaration {
            id: self.next_id(),
            kind: DeclarationKind::Method,
            flags,
            name: SmolStr::new(name_node.map(|n| self.text(n)).unwrap_or("")),
            name_span: span_of(name_node, node),
            container: Some(container.clone()),
            signature: Some(signature),
        })
    }

    fn signature(&self, node: Node) -> MethodSignature {
        let constructor = matches!(node.kind(), KIND_CONSTR_DECL | KIND_COMPACT_CONSTR_DECL);
        if node.kind() == KIND_ANNOTATION_ELEMENT_DECL {
            return MethodSignature {
                arity: Some(0),
                varargs: false,
                constructor,
            };
        }
        let Some(params) = node.child_by_field_name(FIELD_PARAMETERS) else {
            // Compact constructors take the record header's parameters.
            return MethodSignature {
                arity: None,
                varargs: false,
                constructor,
            };
        };
        let mut arity = 0;
        let mut varargs = false;
        let mut cursor = params.walk();
        for p in params.named_children(&mut cursor) {
            match p.kind() {
                KIND_FORMAL_PARAMETER => arity += 1,
                KIND_SPREAD_PARAMETER => {
                    arity += 1;
                    varargs = true;
                }
                _ => {}
            }
        }
        MethodSignature {
            arity: Some(arity),
            varargs,
            constructor,
        }
    }

    fn is_generated(&self, node: Node) -> bool {
        let Some(modifiers) = modifiers_of(node) else {
            return false;
        };
        let mut cursor = modifiers.walk();
        let generated = modifiers.named_children(&mut cursor).any(|m| {
            matches!(m.kind(), KIND_MARKER_ANNOTATION | KIND_ANNOTATION)
                && m.child_by_field_name(FIELD_NAME).is_some_and(|n| {
                    self.text(n).rsplit('.').next() == Some(GENERATED_ANNOTATION)
                })
        });
        generated
    }
}

fn modifiers_of(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|c| c.kind() == KIND_MODIFIERS);
    found
}

fn has_modifier(node: Node, keyword: &str) -> bool {
    let Some(modifiers) = modifiers_of(node) else {
        return false;
    };
    let mut cursor = modifiers.walk();
    let found = modifiers.children(&mut cursor).any(|c| c.kind() == keyword);
    found
}

/// Span of the name node, or an empty span at the start of `fallback`.
fn span_of(name: Option<Node>, fallback: Node) -> Span {
    match name {
        Some(n) => Span::new(n.start_byte(), n.end_byte() - n.start_byte()),
        None => Span::new(fallback.start_byte(), 0),
    }
}
