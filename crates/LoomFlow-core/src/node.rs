use crate::node_kind::NodeKind;
use crate::schema;
use loom_canvas::model::NodeData;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload of a workflow node on the canvas.
///
/// Flattened into the saved node next to `node_id` and `position`, this is
/// the `{ node_type, data }` part of the wire shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNodeData {
    pub node_type: NodeKind,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl WorkflowNodeData {
    /// A node of `kind` seeded with its default data.
    pub fn new(kind: NodeKind) -> Self {
        let data = schema::default_data(&kind);
        Self {
            node_type: kind,
            data,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.node_type
    }

    /// Stores a raw edit into `data[key]`, coercing it first.
    ///
    /// Keys outside the kind's schema are accepted as well.
    pub fn set_field(&mut self, key: &str, raw: &str) -> &Value {
        let value = coerce_field_value(raw);
        self.data.insert(key.to_string(), value);
        &self.data[key]
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Truthiness of a boolean field; anything but `true` reads as off.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.data.get(key), Some(Value::Bool(true)))
    }
}

impl NodeData for WorkflowNodeData {
    fn node_type(&self) -> String {
        self.node_type.to_string()
    }

    fn label(&self) -> String {
        self.node_type.label()
    }
}

/// Parses user input as JSON, falling back to the literal string.
pub fn coerce_field_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
