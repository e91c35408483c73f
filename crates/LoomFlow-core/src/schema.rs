//! Per-type default data and field descriptions.
//!
//! Every creatable node kind has a fixed, ordered list of fields. A new node
//! is seeded with exactly these keys, and the property panel renders them in
//! this order.

use crate::node_kind::NodeKind;
use serde_json::{Map, Value, json};

const CODE_PLACEHOLDER: &str = "# Write Python code here\noutput = \"Hello, World!\"";

/// How a field is edited.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldKind {
    Text,
    Multiline,
    Number,
    Integer,
    Boolean,
    Select(&'static [&'static str]),
    Code,
    /// Structured value (list, map, null) edited as JSON text.
    Json,
    /// Name of one of the server's LLM connection presets.
    ConfigPreset,
}

/// Seed value of a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldDefault {
    Str(&'static str),
    Float(f64),
    Int(i64),
    Bool(bool),
    EmptyList,
    EmptyMap,
    Null,
}

impl FieldDefault {
    pub fn to_value(self) -> Value {
        match self {
            FieldDefault::Str(s) => Value::String(s.to_string()),
            FieldDefault::Float(f) => json!(f),
            FieldDefault::Int(i) => json!(i),
            FieldDefault::Bool(b) => Value::Bool(b),
            FieldDefault::EmptyList => Value::Array(Vec::new()),
            FieldDefault::EmptyMap => Value::Object(Map::new()),
            FieldDefault::Null => Value::Null,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSpec {
    /// Key inside the node's `data` object.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: FieldDefault,
    /// Boolean field that must be `true` for this one to be shown.
    pub visible_when: Option<&'static str>,
}

impl FieldSpec {
    const fn new(key: &'static str, label: &'static str, kind: FieldKind, default: FieldDefault) -> Self {
        Self {
            key,
            label,
            kind,
            default,
            visible_when: None,
        }
    }

    const fn shown_when(mut self, toggle: &'static str) -> Self {
        self.visible_when = Some(toggle);
        self
    }
}

const LLM: &[FieldSpec] = &[
    FieldSpec::new("config_id", "Config Preset", FieldKind::ConfigPreset, FieldDefault::Str("")),
    FieldSpec::new("model", "Model", FieldKind::Text, FieldDefault::Str("gpt-3.5-turbo")),
    FieldSpec::new("system_prompt", "System Prompt", FieldKind::Multiline, FieldDefault::Str("")),
    FieldSpec::new("temperature", "Temperature", FieldKind::Number, FieldDefault::Float(0.7)),
    FieldSpec::new("user_message", "User Message", FieldKind::Multiline, FieldDefault::Str("{{user_input}}")),
    FieldSpec::new(
        "enable_structured_output",
        "Structured Output",
        FieldKind::Boolean,
        FieldDefault::Bool(false),
    ),
    FieldSpec::new(
        "structured_output_schema",
        "Output Schema",
        FieldKind::Json,
        FieldDefault::Str(""),
    )
    .shown_when("enable_structured_output"),
];

const RAG: &[FieldSpec] = &[
    FieldSpec::new("kb_ids", "Knowledge Bases", FieldKind::Json, FieldDefault::EmptyList),
    FieldSpec::new("query", "Query", FieldKind::Multiline, FieldDefault::Str("{{user_input}}")),
    FieldSpec::new("top_k", "Top K", FieldKind::Integer, FieldDefault::Int(3)),
];

const CODE: &[FieldSpec] = &[
    FieldSpec::new("code", "Code", FieldKind::Code, FieldDefault::Str(CODE_PLACEHOLDER)),
    FieldSpec::new("timeout", "Timeout (s)", FieldKind::Integer, FieldDefault::Int(30)),
];

const CONDITION: &[FieldSpec] = &[
    FieldSpec::new("conditions", "Conditions", FieldKind::Json, FieldDefault::EmptyList),
    FieldSpec::new("default_branch", "Default Branch", FieldKind::Text, FieldDefault::Str("")),
];

const HTTP: &[FieldSpec] = &[
    FieldSpec::new("url", "URL", FieldKind::Text, FieldDefault::Str("")),
    FieldSpec::new(
        "method",
        "Method",
        FieldKind::Select(&["GET", "POST", "PUT", "DELETE"]),
        FieldDefault::Str("GET"),
    ),
    FieldSpec::new("headers", "Headers", FieldKind::Json, FieldDefault::EmptyMap),
    FieldSpec::new("body", "Body", FieldKind::Json, FieldDefault::Null),
    FieldSpec::new("timeout", "Timeout (s)", FieldKind::Integer, FieldDefault::Int(30)),
];

const VARIABLE: &[FieldSpec] = &[
    FieldSpec::new("variable_name", "Name", FieldKind::Text, FieldDefault::Str("")),
    FieldSpec::new("default_value", "Default Value", FieldKind::Text, FieldDefault::Str("")),
    FieldSpec::new(
        "variable_type",
        "Type",
        FieldKind::Select(&["string", "number", "boolean", "object"]),
        FieldDefault::Str("string"),
    ),
];

const TEMPLATE: &[FieldSpec] = &[FieldSpec::new(
    "template",
    "Template",
    FieldKind::Multiline,
    FieldDefault::Str("Hello, {{name}}!"),
)];

/// Ordered field list of a kind. Unknown kinds have none.
pub fn fields_for(kind: &NodeKind) -> &'static [FieldSpec] {
    match kind {
        NodeKind::Llm => LLM,
        NodeKind::Rag => RAG,
        NodeKind::Code => CODE,
        NodeKind::Condition => CONDITION,
        NodeKind::Http => HTTP,
        NodeKind::Variable => VARIABLE,
        NodeKind::Template => TEMPLATE,
        NodeKind::Other(_) => &[],
    }
}

pub fn field_spec(kind: &NodeKind, key: &str) -> Option<&'static FieldSpec> {
    fields_for(kind).iter().find(|spec| spec.key == key)
}

/// Fresh `data` object holding every default key of `kind`.
pub fn default_data(kind: &NodeKind) -> Map<String, Value> {
    fields_for(kind)
        .iter()
        .map(|spec| (spec.key.to_string(), spec.default.to_value()))
        .collect()
}
