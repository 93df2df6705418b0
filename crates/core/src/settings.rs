use refscope_api::LensKind;
use serde::Deserialize;
use serde_json::Value;

pub const SETTINGS_SECTION_KEY: &str = "refscope";
pub const DEFAULT_REFERENCES_COMMAND: &str = "refscope.showReferences";
pub const DEFAULT_IMPLEMENTATIONS_COMMAND: &str = "refscope.showImplementations";

/// User-facing switches for the references provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LensSettings {
    pub references_enabled: bool,
    pub implementations_enabled: bool,
    pub references_command: String,
    pub implementations_command: String,
}

impl Default for LensSettings {
    fn default() -> Self {
        Self {
            references_enabled: true,
            implementations_enabled: true,
            references_command: DEFAULT_REFERENCES_COMMAND.to_string(),
            implementations_command: DEFAULT_IMPLEMENTATIONS_COMMAND.to_string(),
        }
    }
}

impl LensSettings {
    pub fn from_payload(payload: Option<&Value>) -> Self {
        match payload {
            Some(payload) => Self::default().merged_with_payload(payload),
            None => Self::default(),
        }
    }

    /// Layers a JSON payload on top of `self`. The payload may be the
    /// settings object itself or wrap it under the `refscope` key; fields
    /// that fail to parse are ignored.
    pub fn merged_with_payload(&self, payload: &Value) -> Self {
        let mut merged = self.clone();

        for candidate in payload_candidates(payload) {
            if let Ok(patch) = serde_json::from_value::<LensSettingsPatch>(candidate.clone()) {
                merged.apply_patch(patch);
            }
        }

        merged.normalize();
        merged
    }

    pub fn is_enabled(&self, kind: LensKind) -> bool {
        match kind {
            LensKind::References => self.references_enabled,
            LensKind::Implementations => self.implementations_enabled,
        }
    }

    pub fn command_for(&self, kind: LensKind) -> &str {
        match kind {
            LensKind::References => &self.references_command,
            LensKind::Implementations => &self.implementations_command,
        }
    }

    fn apply_patch(&mut self, patch: LensSettingsPatch) {
        if let Some(references) = patch.references {
            if let Some(enabled) = references.enabled {
                self.references_enabled = enabled;
            }
            if let Some(command) = references.command {
                self.references_command = command;
            }
        }
        if let Some(implementations) = patch.implementations {
            if let Some(enabled) = implementations.enabled {
                self.implementations_enabled = enabled;
            }
            if let Some(command) = implementations.command {
                self.implementations_command = command;
            }
        }
    }

    fn normalize(&mut self) {
        if self.references_command.trim().is_empty() {
            self.references_command = DEFAULT_REFERENCES_COMMAND.to_string();
        }
        if self.implementations_command.trim().is_empty() {
            self.implementations_command = DEFAULT_IMPLEMENTATIONS_COMMAND.to_string();
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LensSettingsPatch {
    references: Option<LensKindPatch>,
    implementations: Option<LensKindPatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LensKindPatch {
    enabled: Option<bool>,
    command: Option<String>,
}

fn payload_candidates(payload: &Value) -> Vec<&Value> {
    let mut candidates = vec![payload];
    if let Some(section) = payload.get(SETTINGS_SECTION_KEY) {
        candidates.push(section);
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_enable_both_kinds() {
        let settings = LensSettings::from_payload(None);
        assert!(settings.is_enabled(LensKind::References));
        assert!(settings.is_enabled(LensKind::Implementations));
        assert_eq!(
            settings.command_for(LensKind::References),
            DEFAULT_REFERENCES_COMMAND
        );
    }

    #[test]
    fn nested_section_overrides_defaults() {
        let payload = json!({
            "refscope": {
                "implementations": { "enabled": false },
                "references": { "command": "editor.action.showReferences" }
            }
        });
        let settings = LensSettings::from_payload(Some(&payload));
        assert!(!settings.implementations_enabled);
        assert!(settings.references_enabled);
        assert_eq!(settings.references_command, "editor.action.showReferences");
    }

    #[test]
    fn malformed_patch_is_ignored_and_blank_command_restored() {
        let payload = json!({
            "references": { "enabled": "yes" },
            "refscope": { "implementations": { "command": "  " } }
        });
        let settings = LensSettings::from_payload(Some(&payload));
        assert!(settings.references_enabled);
        assert_eq!(
            settings.implementations_command,
            DEFAULT_IMPLEMENTATIONS_COMMAND
        );
    }
}
