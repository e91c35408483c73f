//! # LoomFlow Core
//!
//! Workflow domain of the LoomFlow editor: the node kinds, their default
//! data and field schemas, id generation, the wire models of the workflow
//! server and an HTTP client for it.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod node;
pub mod node_kind;
pub mod schema;

pub use api::{ConfigPreset, WorkflowDefinition, WorkflowGraph, WorkflowTemplate};
pub use client::{ConfigProvider, HttpWorkflowClient, WorkflowStore};
pub use config::{ClientConfig, EditorConfig};
pub use error::{ClientError, EditorError};
pub use node::{WorkflowNodeData, coerce_field_value};
pub use node_kind::NodeKind;
