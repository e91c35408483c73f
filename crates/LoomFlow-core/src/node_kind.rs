use crate::error::EditorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The type tag of a workflow node.
///
/// The editor creates only the seven pipeline kinds. `Other` carries node
/// types that arrive from the server verbatim (`start`, `end` in templates)
/// so they survive a load/save cycle untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Llm,
    Rag,
    Code,
    Condition,
    Http,
    Variable,
    Template,
    Other(String),
}

impl NodeKind {
    /// Every kind the editor can create, in palette order.
    pub const ALL: [NodeKind; 7] = [
        NodeKind::Llm,
        NodeKind::Rag,
        NodeKind::Code,
        NodeKind::Condition,
        NodeKind::Http,
        NodeKind::Variable,
        NodeKind::Template,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Llm => "llm",
            NodeKind::Rag => "rag",
            NodeKind::Code => "code",
            NodeKind::Condition => "condition",
            NodeKind::Http => "http",
            NodeKind::Variable => "variable",
            NodeKind::Template => "template",
            NodeKind::Other(s) => s,
        }
    }

    /// Header title shown on the canvas and in the panel.
    pub fn label(&self) -> String {
        match self {
            NodeKind::Llm => "LLM".to_string(),
            NodeKind::Rag => "RAG Retrieval".to_string(),
            NodeKind::Code => "Code".to_string(),
            NodeKind::Condition => "Condition".to_string(),
            NodeKind::Http => "HTTP Request".to_string(),
            NodeKind::Variable => "Variable".to_string(),
            NodeKind::Template => "Template".to_string(),
            NodeKind::Other(s) => s.clone(),
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, NodeKind::Other(_))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Lenient: server payloads may carry any type string.
impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "llm" => NodeKind::Llm,
            "rag" => NodeKind::Rag,
            "code" => NodeKind::Code,
            "condition" => NodeKind::Condition,
            "http" => NodeKind::Http,
            "variable" => NodeKind::Variable,
            "template" => NodeKind::Template,
            _ => NodeKind::Other(s),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Other(s) => s,
            builtin => builtin.as_str().to_string(),
        }
    }
}

/// Strict: only the creatable kinds parse.
impl FromStr for NodeKind {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match NodeKind::from(s.to_string()) {
            NodeKind::Other(other) => Err(EditorError::UnknownNodeType(other)),
            kind => Ok(kind),
        }
    }
}
