use loomflow_core::ConfigPreset;
use loomflow_core::schema::{FieldKind, FieldSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    Multiline,
    Number,
    Integer,
    Boolean,
    Select { options: Vec<String> },
    Code { language: String },
    Json,
    ConfigPreset { options: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualField {
    pub id: String,
    pub label: String,
    pub field_type: FieldType,
    pub default_value: Option<Value>,
    /// Boolean field that must be `true` for this one to be shown.
    pub visible_when: Option<String>,
}

impl VisualField {
    /// Maps a schema field to its editor widget. Preset selectors list the
    /// names of `presets`, with an empty entry for "none".
    pub fn from_spec(spec: &FieldSpec, presets: &[ConfigPreset]) -> Self {
        let field_type = match spec.kind {
            FieldKind::Text => FieldType::Text,
            FieldKind::Multiline => FieldType::Multiline,
            FieldKind::Number => FieldType::Number,
            FieldKind::Integer => FieldType::Integer,
            FieldKind::Boolean => FieldType::Boolean,
            FieldKind::Select(options) => FieldType::Select {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
            FieldKind::Code => FieldType::Code {
                language: "python".to_string(),
            },
            FieldKind::Json => FieldType::Json,
            FieldKind::ConfigPreset => FieldType::ConfigPreset {
                options: std::iter::once(String::new())
                    .chain(presets.iter().map(|p| p.name.clone()))
                    .collect(),
            },
        };

        Self {
            id: spec.key.to_string(),
            label: spec.label.to_string(),
            field_type,
            default_value: Some(spec.default.to_value()),
            visible_when: spec.visible_when.map(str::to_string),
        }
    }

    /// Generic JSON editor for a key of a node type without a schema.
    pub fn generic(key: &str) -> Self {
        Self {
            id: key.to_string(),
            label: capitalize(key),
            field_type: FieldType::Json,
            default_value: None,
            visible_when: None,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

/// Text shown in a field's editor: strings raw, everything else as
/// pretty-printed JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
