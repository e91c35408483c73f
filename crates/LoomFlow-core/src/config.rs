use crate::error::ClientError;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

pub const SERVER_URL_VAR: &str = "LOOMFLOW_SERVER_URL";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Where the workflow server lives.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: Url,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
        })
    }

    /// Reads `LOOMFLOW_SERVER_URL`, after loading a `.env` file if one exists.
    pub fn from_env() -> Result<Self, ClientError> {
        dotenv::dotenv().ok();
        let raw = env::var(SERVER_URL_VAR).unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        tracing::debug!(server_url = %raw, "Loaded client configuration");
        Self::new(&raw)
    }
}

/// Placement of newly added nodes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Top-left corner of the spawn area.
    pub spawn_origin: DVec2,
    /// Width and height of the random spread added to `spawn_origin`.
    pub spawn_jitter: DVec2,
    pub node_size: DVec2,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            spawn_origin: DVec2::new(100.0, 100.0),
            spawn_jitter: DVec2::new(200.0, 200.0),
            node_size: DVec2::new(150.0, 80.0),
        }
    }
}
