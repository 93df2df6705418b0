use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Zero-based line/column range. Columns count UTF-16 code units.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Range {
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    pub fn contains(&self, line: usize, col: usize) -> bool {
        if line < self.start_line || line > self.end_line {
            return false;
        }
        if line == self.start_line && col < self.start_col {
            return false;
        }
        if line == self.end_line && col > self.end_col {
            return false;
        }
        true
    }
}

/// Byte offset and length into a unit's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub offset: usize,
    pub length: usize,
}

impl Span {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Type,
    Method,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DeclarationFlags {
    pub interface: bool,
    pub is_abstract: bool,
    /// Compiler- or tool-generated members that never get a lens.
    pub hidden: bool,
}

/// Index of a declaration in the arena of the unit that produced it.
///
/// Only meaningful against the tree it came from; a recomputed tree hands
/// out fresh ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    /// Number of declared parameters, `None` when the source does not say.
    pub arity: Option<usize>,
    pub varargs: bool,
    pub constructor: bool,
}

impl MethodSignature {
    /// Whether a call site passing `args` arguments can bind to this signature.
    pub fn accepts(&self, args: usize) -> bool {
        match self.arity {
            None => true,
            Some(n) if self.varargs => args + 1 >= n,
            Some(n) => args == n,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub id: DeclId,
    pub kind: DeclarationKind,
    pub flags: DeclarationFlags,
    pub name: SmolStr,
    pub name_span: Span,
    /// Simple name of the enclosing type, if any.
    pub container: Option<SmolStr>,
    pub signature: Option<MethodSignature>,
}

impl Declaration {
    pub fn is_type(&self) -> bool {
        self.kind == DeclarationKind::Type
    }

    pub fn is_method(&self) -> bool {
        self.kind == DeclarationKind::Method
    }
}

/// What a search is looking for about a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchFor {
    References,
    Implementations,
}

/// Position-free identity of a symbol, as handed to search participants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolKey {
    /// URI of the unit declaring the symbol.
    pub unit: String,
    pub name: SmolStr,
    pub kind: DeclarationKind,
    pub container: Option<SmolStr>,
    pub signature: Option<MethodSignature>,
}

impl SymbolKey {
    pub fn from_declaration(unit: &str, decl: &Declaration) -> Self {
        Self {
            unit: unit.to_string(),
            name: decl.name.clone(),
            kind: decl.kind,
            container: decl.container.clone(),
            signature: decl.signature.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
    pub symbol: SymbolKey,
    pub limit_to: SearchFor,
}

/// One hit reported by a search participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// Short description of the matched element, e.g. the implementing type.
    pub element: SmolStr,
    /// URI of the unit containing the match, when it can be determined.
    pub enclosing_unit: Option<String>,
    pub offset: usize,
    pub length: usize,
}
