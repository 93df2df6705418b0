use refscope_api::{
    CancellationToken, Declaration, DeclarationFlags, DeclarationKind, DeclId, EditorContext,
    LensError, LensResult, MethodSignature, Project, ProjectRoot, Range, RootKind, SearchFor,
    SearchMatch, SearchParticipant, SearchPattern, SearchScope, SourceUnit, Span, SymbolIndex,
};
use smol_str::SmolStr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Declaration arena where the name of declaration `n` sits on line `n`.
pub struct FakeUnit {
    pub uri: String,
    pub exists: bool,
    nodes: Vec<(Declaration, Option<u32>)>,
    pub fail_children_of: Option<u32>,
    pub cancel_on_children_of: Option<(u32, CancellationToken)>,
}

impl FakeUnit {
    pub fn new(uri: &str) -> Self {
        Self {
            uri: uri.to_string(),
            exists: true,
            nodes: Vec::new(),
            fail_children_of: None,
            cancel_on_children_of: None,
        }
    }

    fn push(
        &mut self,
        name: &str,
        kind: DeclarationKind,
        flags: DeclarationFlags,
        parent: Option<u32>,
    ) -> u32 {
        let id = self.nodes.len() as u32;
        let container = parent.map(|p| self.nodes[p as usize].0.name.clone());
        let signature = (kind == DeclarationKind::Method).then(|| MethodSignature {
            arity: Some(0),
            varargs: false,
            constructor: false,
        });
        self.nodes.push((
            Declaration {
                id: DeclId(id),
                kind,
                flags,
                name: SmolStr::new(name),
                name_span: Span::new(id as usize, name.len()),
                container,
                signature,
            },
            parent,
        ));
        id
    }

    pub fn class(&mut self, name: &str, parent: Option<u32>) -> u32 {
        self.push(name, DeclarationKind::Type, DeclarationFlags::default(), parent)
    }

    pub fn interface(&mut self, name: &str, parent: Option<u32>) -> u32 {
        let flags = DeclarationFlags {
            interface: true,
            ..Default::default()
        };
        self.push(name, DeclarationKind::Type, flags, parent)
    }

    pub fn abstract_class(&mut self, name: &str, parent: Option<u32>) -> u32 {
        let flags = DeclarationFlags {
            is_abstract: true,
            ..Default::default()
        };
        self.push(name, DeclarationKind::Type, flags, parent)
    }

    pub fn method(&mut self, name: &str, parent: u32) -> u32 {
        self.push(name, DeclarationKind::Method, DeclarationFlags::default(), Some(parent))
    }

    pub fn hidden_method(&mut self, name: &str, parent: u32) -> u32 {
        let flags = DeclarationFlags {
            hidden: true,
            ..Default::default()
        };
        self.push(name, DeclarationKind::Method, flags, Some(parent))
    }

    pub fn field(&mut self, name: &str, parent: u32) -> u32 {
        self.push(name, DeclarationKind::Other, DeclarationFlags::default(), Some(parent))
    }

    /// Anchor of the lens for declaration `id`.
    pub fn anchor_of(&self, id: u32) -> Range {
        let span = self.nodes[id as usize].0.name_span;
        Range::new(span.offset, 0, span.offset, span.length)
    }

    fn of_parent(&self, parent: Option<u32>) -> Vec<Declaration> {
        self.nodes
            .iter()
            .filter(|(_, p)| *p == parent)
            .map(|(d, _)| d.clone())
            .collect()
    }
}

impl SourceUnit for FakeUnit {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn exists(&self) -> bool {
        self.exists
    }

    fn declarations(&self) -> LensResult<Vec<Declaration>> {
        Ok(self.of_parent(None))
    }

    fn children(&self, parent: &Declaration) -> LensResult<Vec<Declaration>> {
        if self.fail_children_of == Some(parent.id.0) {
            return Err(LensError::ModelAccess(format!("cannot read {}", parent.name)));
        }
        if let Some((id, token)) = &self.cancel_on_children_of {
            if *id == parent.id.0 {
                token.cancel();
            }
        }
        Ok(self.of_parent(Some(parent.id.0)))
    }

    fn to_range(&self, span: Span) -> LensResult<Range> {
        Ok(Range::new(span.offset, 0, span.offset, span.length))
    }

    fn declaration_at(&self, anchor: &Range) -> LensResult<Option<Declaration>> {
        Ok(self
            .nodes
            .iter()
            .map(|(d, _)| d)
            .find(|d| {
                let r = Range::new(d.name_span.offset, 0, d.name_span.offset, d.name_span.length);
                r.contains(anchor.start_line, anchor.start_col)
            })
            .cloned())
    }
}

pub struct FakeContext {
    pub unit: Option<Arc<dyn SourceUnit>>,
}

impl FakeContext {
    pub fn of(unit: FakeUnit) -> Self {
        Self {
            unit: Some(Arc::new(unit)),
        }
    }

    pub fn empty() -> Self {
        Self { unit: None }
    }
}

impl EditorContext for FakeContext {
    fn source_unit(&self) -> Option<Arc<dyn SourceUnit>> {
        self.unit.clone()
    }

    fn text(&self) -> Option<std::sync::Arc<str>> {
        None
    }
}

pub enum Behaviour {
    Matches(Vec<SearchMatch>),
    Fail(String),
    /// Reports the matches, then cancels the token as a host would mid-query.
    CancelAfter(Vec<SearchMatch>),
}

/// Participant answering each (name, mode) with a scripted behaviour.
pub struct ScriptedParticipant {
    script: Vec<(String, SearchFor, Behaviour)>,
    pub seen: Mutex<Vec<SearchPattern>>,
}

impl ScriptedParticipant {
    pub fn new() -> Self {
        Self {
            script: Vec::new(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn on(mut self, name: &str, mode: SearchFor, behaviour: Behaviour) -> Self {
        self.script.push((name.to_string(), mode, behaviour));
        self
    }
}

impl SearchParticipant for ScriptedParticipant {
    fn name(&self) -> &str {
        "scripted"
    }

    fn locate_matches(
        &self,
        pattern: &SearchPattern,
        _scope: &SearchScope,
        cancel: &CancellationToken,
        requestor: &mut dyn FnMut(SearchMatch),
    ) -> LensResult<()> {
        self.seen.lock().unwrap().push(pattern.clone());
        let entry = self
            .script
            .iter()
            .find(|(n, m, _)| n == pattern.symbol.name.as_str() && *m == pattern.limit_to);
        match entry.map(|(_, _, b)| b) {
            None => Ok(()),
            Some(Behaviour::Matches(ms)) => {
                ms.iter().cloned().for_each(|m| requestor(m));
                Ok(())
            }
            Some(Behaviour::Fail(msg)) => Err(LensError::SearchExecution(msg.clone())),
            Some(Behaviour::CancelAfter(ms)) => {
                ms.iter().cloned().for_each(|m| requestor(m));
                cancel.cancel();
                Ok(())
            }
        }
    }
}

pub struct FakeIndex {
    pub projects: Option<Vec<Project>>,
    pub participants: Vec<Arc<dyn SearchParticipant>>,
}

impl FakeIndex {
    pub fn with(participant: Arc<ScriptedParticipant>) -> Self {
        Self {
            projects: Some(vec![Project {
                name: "app".into(),
                roots: vec![ProjectRoot {
                    path: PathBuf::from("/ws/app/src"),
                    kind: RootKind::Source,
                }],
            }]),
            participants: vec![participant],
        }
    }
}

impl SymbolIndex for FakeIndex {
    fn projects(&self) -> LensResult<Vec<Project>> {
        self.projects
            .clone()
            .ok_or_else(|| LensError::ScopeBuild("workspace root is not accessible".into()))
    }

    fn default_participants(&self) -> Vec<Arc<dyn SearchParticipant>> {
        self.participants.clone()
    }
}

pub fn hit(element: &str, unit: Option<&str>) -> SearchMatch {
    SearchMatch {
        element: SmolStr::new(element),
        enclosing_unit: unit.map(str::to_string),
        offset: 0,
        length: element.len(),
    }
}
