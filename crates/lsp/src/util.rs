use refscope_api::{CodeLens as Lens, LensKind, Range as LensRange};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_lsp::lsp_types::{CodeLens, Command, Position, Range, TextDocumentContentChangeEvent, Url};

/// Lightweight container for document state
pub struct Document {
    pub content: Arc<str>,
    pub version: i32,
}

impl Document {
    pub fn new(content: impl Into<Arc<str>>, version: i32) -> Self {
        Self {
            content: content.into(),
            version,
        }
    }

    /// Changes are versioned by the client; an older one arrived late.
    pub fn is_stale(&self, version: i32) -> bool {
        version <= self.version
    }
}

/// Round-trips through the client between `codeLens` and `codeLens/resolve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LensData {
    pub uri: Url,
    pub kind: LensKind,
}

pub fn to_lsp_range(range: &LensRange) -> Range {
    Range {
        start: Position::new(range.start_line as u32, range.start_col as u32),
        end: Position::new(range.end_line as u32, range.end_col as u32),
    }
}

pub fn from_lsp_range(range: &Range) -> LensRange {
    LensRange::new(
        range.start.line as usize,
        range.start.character as usize,
        range.end.line as usize,
        range.end.character as usize,
    )
}

pub fn to_lsp_lens(uri: &Url, lens: &Lens) -> CodeLens {
    let range = to_lsp_range(&lens.anchor);
    let command = lens.action.as_ref().map(|action| Command {
        title: action.title.clone(),
        command: action.command_id.clone(),
        arguments: Some(vec![
            serde_json::json!(uri),
            serde_json::json!(range.start),
        ]),
    });
    let data = serde_json::to_value(LensData {
        uri: uri.clone(),
        kind: lens.kind,
    })
    .ok();
    CodeLens {
        range,
        command,
        data,
    }
}

/// Rebuilds an unresolved lens from what the client sent back. `None` when
/// the lens was not produced by this server.
pub fn from_lsp_lens(lens: &CodeLens) -> Option<(LensData, Lens)> {
    let data: LensData = serde_json::from_value(lens.data.clone()?).ok()?;
    let unresolved = Lens::unresolved(data.kind, from_lsp_range(&lens.range));
    Some((data, unresolved))
}

fn offset_at(text: &str, position: Position) -> usize {
    let mut line = 0;
    let mut offset = 0;
    let mut chars = text.chars().peekable();

    while line < position.line as usize {
        match chars.next() {
            Some(c) => {
                offset += c.len_utf8();
                if c == '\n' {
                    line += 1;
                } else if c == '\r' {
                    if let Some(&'\n') = chars.peek() {
                        chars.next();
                        offset += 1;
                    }
                    line += 1;
                }
            }
            None => return offset,
        }
    }

    let mut utf16_count = 0;
    while utf16_count < position.character as usize {
        match chars.next() {
            Some(c) if c != '\n' && c != '\r' => {
                utf16_count += c.len_utf16();
                offset += c.len_utf8();
            }
            _ => break,
        }
    }
    offset
}

/// Applies `didChange` events in order. Events without a range replace the
/// whole text.
pub fn apply_changes(text: &str, changes: &[TextDocumentContentChangeEvent]) -> String {
    let mut content = text.to_string();
    for change in changes {
        match change.range {
            Some(range) => {
                let start = offset_at(&content, range.start);
                let end = offset_at(&content, range.end).max(start);
                content.replace_range(start..end, &change.text);
            }
            None => content = change.text.clone(),
        }
    }
    content
}
