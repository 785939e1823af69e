//! `TaskApi` over the JSON RPC routes, using `reqwest`.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tasklist_config::ClientConfig;
use tasklist_core::entities::Task;
use tasklist_core::inputs::{CreateTaskInput, SetDoneInput, TaskIdInput, UpdateTaskInput};
use tasklist_core::procedures;
use tasklist_core::responses::{ApiError, DeleteResponse, HealthResponse};

use crate::api::TaskApi;
use crate::error::ClientError;

/// HTTP client for a running `tasklist serve`.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTaskApi {
    /// Build a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("tasklist/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(config.base_url.clone(), config.request_timeout())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe `GET /health`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the server is unreachable or unhealthy.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let resp = self.http.get(self.url(procedures::HEALTH)).send().await?;
        decode(resp).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post<I, O>(&self, path: &str, body: &I) -> Result<O, ClientError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        tracing::debug!(path, "calling procedure");
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        decode(resp).await
    }
}

/// Map a procedure response onto `Ok(body)` or the matching `ClientError`.
async fn decode<O: DeserializeOwned>(resp: reqwest::Response) -> Result<O, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return resp
            .json::<O>()
            .await
            .map_err(|e| ClientError::Transport(format!("undecodable response: {e}")));
    }

    let body = resp.text().await.unwrap_or_default();
    let api_error = serde_json::from_str::<ApiError>(&body).ok();
    match (status, api_error) {
        (StatusCode::BAD_REQUEST, Some(err)) => {
            Err(ClientError::Validation(err.details.unwrap_or_default()))
        }
        (StatusCode::NOT_FOUND, Some(err)) => Err(ClientError::NotFound(err.message)),
        (_, Some(err)) => Err(ClientError::Transport(format!(
            "{} ({}): {}",
            status.as_u16(),
            err.code,
            err.message
        ))),
        (_, None) => Err(ClientError::Transport(format!(
            "unexpected status {}: {body}",
            status.as_u16()
        ))),
    }
}

impl TaskApi for HttpTaskApi {
    async fn list(&self) -> Result<Vec<Task>, ClientError> {
        let resp = self.http.get(self.url(procedures::TASK_LIST)).send().await?;
        decode(resp).await
    }

    async fn get(&self, id: &str) -> Result<Task, ClientError> {
        self.post(procedures::TASK_GET, &TaskIdInput { id: id.to_string() })
            .await
    }

    async fn create(&self, input: &CreateTaskInput) -> Result<Task, ClientError> {
        self.post(procedures::TASK_CREATE, input).await
    }

    async fn update(&self, input: &UpdateTaskInput) -> Result<Task, ClientError> {
        self.post(procedures::TASK_UPDATE, input).await
    }

    async fn set_done(&self, id: &str, done: bool) -> Result<Task, ClientError> {
        let input = SetDoneInput {
            id: id.to_string(),
            done,
        };
        self.post(procedures::TASK_SET_DONE, &input).await
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let _: DeleteResponse = self
            .post(procedures::TASK_DELETE, &TaskIdInput { id: id.to_string() })
            .await?;
        Ok(())
    }
}
