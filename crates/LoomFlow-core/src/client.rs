use crate::api::{
    ConfigList, ConfigPreset, SaveRequest, WorkflowDefinition, WorkflowGraph, WorkflowList,
    WorkflowTemplate,
};
use crate::config::ClientConfig;
use crate::error::ClientError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// Source of the named LLM connection presets offered on `llm` nodes.
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    async fn list_configs(&self) -> Result<Vec<ConfigPreset>, ClientError>;
}

/// Server-side persistence of workflow graphs.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Fetches a named starter graph.
    async fn fetch_template(&self, name: &str) -> Result<WorkflowTemplate, ClientError>;

    /// Stores `graph` under `name`. The acknowledgment is returned uninterpreted.
    async fn save_workflow(&self, name: &str, graph: &WorkflowGraph) -> Result<Value, ClientError>;

    /// Overwrites the nodes and edges of an already stored workflow.
    async fn update_workflow(&self, workflow_id: &str, graph: &WorkflowGraph) -> Result<Value, ClientError>;

    async fn list_workflows(&self) -> Result<Vec<WorkflowDefinition>, ClientError>;

    async fn fetch_workflow(&self, workflow_id: &str) -> Result<WorkflowDefinition, ClientError>;

    async fn delete_workflow(&self, workflow_id: &str) -> Result<(), ClientError>;
}

/// `reqwest`-backed client for the `/api/workflows` endpoints.
#[derive(Clone, Debug)]
pub struct HttpWorkflowClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpWorkflowClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/api/workflows/<segments...>`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::BadUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["api", "workflows"])
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder, url: &Url) -> Result<String, ClientError> {
        let response = request.send().await.map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "Workflow server rejected request");
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn post_graph(&self, url: Url, graph: &WorkflowGraph) -> Result<Value, ClientError> {
        let request = self.http.post(url.clone()).json(&SaveRequest::from(graph));
        let body = self.send(request, &url).await?;
        parse_body(&url, &body)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let body = self.send(self.http.get(url.clone()), &url).await?;
        parse_body(&url, &body)
    }
}

fn parse_body<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|source| ClientError::Malformed {
        url: url.to_string(),
        source,
    })
}

#[async_trait]
impl ConfigProvider for HttpWorkflowClient {
    #[tracing::instrument(skip(self))]
    async fn list_configs(&self) -> Result<Vec<ConfigPreset>, ClientError> {
        let list: ConfigList = self.get_json(self.endpoint(&["configs"])?).await?;
        tracing::info!(count = list.configs.len(), "Loaded config presets");
        Ok(list.configs)
    }
}

#[async_trait]
impl WorkflowStore for HttpWorkflowClient {
    #[tracing::instrument(skip(self))]
    async fn fetch_template(&self, name: &str) -> Result<WorkflowTemplate, ClientError> {
        let template: WorkflowTemplate = self.get_json(self.endpoint(&["templates", name])?).await?;
        tracing::info!(
            nodes = template.graph.nodes.len(),
            edges = template.graph.edges.len(),
            "Fetched template"
        );
        Ok(template)
    }

    #[tracing::instrument(skip(self, graph), fields(nodes = graph.nodes.len(), edges = graph.edges.len()))]
    async fn save_workflow(&self, name: &str, graph: &WorkflowGraph) -> Result<Value, ClientError> {
        let mut url = self.endpoint(&["create"])?;
        url.query_pairs_mut().append_pair("name", name);

        let ack = self.post_graph(url, graph).await?;
        tracing::info!("Workflow saved");
        Ok(ack)
    }

    #[tracing::instrument(skip(self, graph), fields(nodes = graph.nodes.len(), edges = graph.edges.len()))]
    async fn update_workflow(&self, workflow_id: &str, graph: &WorkflowGraph) -> Result<Value, ClientError> {
        let ack = self.post_graph(self.endpoint(&[workflow_id])?, graph).await?;
        tracing::info!("Workflow updated");
        Ok(ack)
    }

    #[tracing::instrument(skip(self))]
    async fn list_workflows(&self) -> Result<Vec<WorkflowDefinition>, ClientError> {
        let list: WorkflowList = self.get_json(self.endpoint(&["list"])?).await?;
        Ok(list.workflows)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_workflow(&self, workflow_id: &str) -> Result<WorkflowDefinition, ClientError> {
        self.get_json(self.endpoint(&[workflow_id])?).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_workflow(&self, workflow_id: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&[workflow_id])?;
        self.send(self.http.delete(url.clone()), &url).await?;
        tracing::info!("Workflow deleted");
        Ok(())
    }
}
