use anyhow::Result;
use mission_protocol::{FeedEvent, LogEntry, LogLevel, Metadata, StatusUpdate};
use reqwest::RequestBuilder;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;

/// HTTP client reporting one agent's status, terminal logs and feed events
/// to a Mission Control dashboard.
///
/// Every call is a single round trip. Non-2xx responses surface as a
/// `reqwest::Error` (inside the returned `anyhow::Error`) carrying the status
/// code; nothing is retried.
pub struct MissionControlClient {
    base_url: String,
    agent_id: String,
    client: reqwest::Client,
}

impl MissionControlClient {
    pub fn new(base_url: impl Into<String>, agent_id: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            base_url,
            agent_id: agent_id.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone(), config.agent_id.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Set the agent status ("working", "idle" or "offline") and optionally
    /// the task it is busy with
    pub async fn update_status(
        &self,
        status: impl Into<String>,
        current_task: Option<&str>,
    ) -> Result<Value> {
        let url = format!("{}/api/agents/{}/status", self.base_url, self.agent_id);
        let body = StatusUpdate::new(status, current_task);

        self.send(self.client.put(&url).json(&body)).await
    }

    /// Append a line to the agent's terminal
    pub async fn log(
        &self,
        level: impl Into<String>,
        message: impl Into<String>,
        task_id: Option<&str>,
        metadata: Option<Metadata>,
    ) -> Result<Value> {
        let url = format!("{}/api/terminal", self.base_url);
        let body = LogEntry::new(self.agent_id.as_str(), level, message)
            .with_task_id(task_id)
            .with_metadata(metadata);

        self.send(self.client.post(&url).json(&body)).await
    }

    /// Append an event to the live feed
    pub async fn add_event(
        &self,
        event_type: impl Into<String>,
        message: impl Into<String>,
        task_id: Option<&str>,
        metadata: Option<Metadata>,
    ) -> Result<Value> {
        let url = format!("{}/api/events", self.base_url);
        let body = FeedEvent::new(event_type, self.agent_id.as_str(), message)
            .with_task_id(task_id)
            .with_metadata(metadata);

        self.send(self.client.post(&url).json(&body)).await
    }

    pub async fn info(
        &self,
        message: impl Into<String>,
        task_id: Option<&str>,
        metadata: Option<Metadata>,
    ) -> Result<Value> {
        self.log(LogLevel::Info, message, task_id, metadata).await
    }

    pub async fn success(
        &self,
        message: impl Into<String>,
        task_id: Option<&str>,
        metadata: Option<Metadata>,
    ) -> Result<Value> {
        self.log(LogLevel::Success, message, task_id, metadata).await
    }

    pub async fn warning(
        &self,
        message: impl Into<String>,
        task_id: Option<&str>,
        metadata: Option<Metadata>,
    ) -> Result<Value> {
        self.log(LogLevel::Warning, message, task_id, metadata).await
    }

    pub async fn error(
        &self,
        message: impl Into<String>,
        task_id: Option<&str>,
        metadata: Option<Metadata>,
    ) -> Result<Value> {
        self.log(LogLevel::Error, message, task_id, metadata).await
    }

    pub async fn system(
        &self,
        message: impl Into<String>,
        task_id: Option<&str>,
        metadata: Option<Metadata>,
    ) -> Result<Value> {
        self.log(LogLevel::System, message, task_id, metadata).await
    }

    /// Read back this agent's terminal lines (server default limit is 100)
    pub async fn fetch_logs(&self, limit: Option<u32>) -> Result<Value> {
        let url = format!("{}/api/terminal", self.base_url);

        let mut query = vec![("agentId", self.agent_id.clone())];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }

        self.send(self.client.get(&url).query(&query)).await
    }

    /// Read back the most recent feed events, optionally of a single type
    /// (server default limit is 50)
    pub async fn recent_events(
        &self,
        limit: Option<u32>,
        event_type: Option<&str>,
    ) -> Result<Value> {
        let url = format!("{}/api/events", self.base_url);

        let mut query = Vec::new();
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(event_type) = event_type.filter(|t| !t.is_empty()) {
            query.push(("type", event_type.to_string()));
        }

        self.send(self.client.get(&url).query(&query)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        let response = self.client.execute(request).await?;
        debug!("{} {} -> {}", method, url, response.status());

        let body = response.error_for_status()?.json::<Value>().await?;
        Ok(body)
    }
}
