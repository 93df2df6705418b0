use super::symbol::{Range, SearchFor};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LensKind {
    References,
    Implementations,
}

impl LensKind {
    /// Noun used in the resolved label, e.g. `3 references`.
    pub fn noun(&self) -> &'static str {
        match self {
            LensKind::References => "references",
            LensKind::Implementations => "implementations",
        }
    }

    pub fn search_for(&self) -> SearchFor {
        match self {
            LensKind::References => SearchFor::References,
            LensKind::Implementations => SearchFor::Implementations,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub title: String,
    pub command_id: String,
}

/// An inline annotation anchored to a declaration name.
///
/// Produced without a label (a placeholder) and labelled at most once by a
/// later resolve call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodeLens {
    pub anchor: Range,
    pub kind: LensKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Command>,
}

impl CodeLens {
    pub fn unresolved(kind: LensKind, anchor: Range) -> Self {
        Self {
            anchor,
            kind,
            label: None,
            action: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.label.is_some()
    }

    /// Writes the count label and its action into the lens.
    pub fn set_count(&mut self, count: usize, command_id: &str) {
        let title = format!("{} {}", count, self.kind.noun());
        self.action = Some(Command {
            title: title.clone(),
            command_id: command_id.to_string(),
        });
        self.label = Some(title);
    }
}
