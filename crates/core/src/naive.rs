//! Text-scanning lens provider.
//!
//! Shows the bare shape of the provider contract: no declaration model, no
//! index, just `class ` lines and `new <Name>` occurrences in the same
//! document.

use crate::settings::DEFAULT_REFERENCES_COMMAND;
use refscope_api::{
    CancellationToken, CodeLens, CodeLensProvider, EditorContext, LensKind, Range,
};

const CLASS_KEYWORD: &str = "class ";

pub struct ClassTextLensProvider {
    command_id: String,
}

impl Default for ClassTextLensProvider {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCES_COMMAND)
    }
}

impl ClassTextLensProvider {
    pub fn new(command_id: impl Into<String>) -> Self {
        Self {
            command_id: command_id.into(),
        }
    }
}

impl CodeLensProvider for ClassTextLensProvider {
    fn produce(&self, ctx: &dyn EditorContext, cancel: &CancellationToken) -> Vec<CodeLens> {
        let Some(text) = ctx.text() else {
            return Vec::new();
        };
        if cancel.is_cancelled() {
            return Vec::new();
        }
        text.lines()
            .enumerate()
            .filter_map(|(line_no, line)| {
                let (start, name) = class_name_in(line)?;
                let start_col = utf16_len(&line[..start]);
                let anchor = Range::new(line_no, start_col, line_no, start_col + utf16_len(name));
                Some(CodeLens::unresolved(LensKind::References, anchor))
            })
            .collect()
    }

    fn resolve(
        &self,
        ctx: &dyn EditorContext,
        mut lens: CodeLens,
        cancel: &CancellationToken,
    ) -> CodeLens {
        let Some(text) = ctx.text() else {
            return lens;
        };
        if cancel.is_cancelled() {
            return lens;
        }
        let Some((_, name)) = text
            .lines()
            .nth(lens.anchor.start_line)
            .and_then(class_name_in)
        else {
            return lens;
        };

        let needle = format!("new {}", name);
        let count = text.lines().filter(|line| line.contains(&needle)).count();
        lens.set_count(count, &self.command_id);
        lens
    }
}

/// Byte offset and text of the class name following `class ` on a line.
fn class_name_in(line: &str) -> Option<(usize, &str)> {
    let start = line.find(CLASS_KEYWORD)? + CLASS_KEYWORD.len();
    let rest = &line[start..];
    let is_ident = |c: char| c.is_alphanumeric() || c == '_' || c == '$';
    let end = rest.find(|c: char| !is_ident(c)).unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    Some((start, &rest[..end]))
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}
