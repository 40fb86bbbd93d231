//! Analysis client: the single point of entry for all calls to the FairDeal
//! analysis service.
//!
//! One multipart `POST /api/analyze` per submission. No retries: a failed
//! request is returned to the caller as-is and the user decides whether to
//! resubmit.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::AppError;
use crate::models::{AnalyzeResult, Context};
use crate::upload::SelectedFile;

pub mod kb;

/// The seam between the presentation controller and the network.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(
        &self,
        file: &SelectedFile,
        context: &Context,
    ) -> Result<AnalyzeResult, AppError>;
}

/// HTTP client for the analysis service and its knowledge-base endpoints.
#[derive(Clone)]
pub struct AnalysisClient {
    client: Client,
    base_url: String,
}

impl AnalysisClient {
    /// `base_url` should be like `http://localhost:8000` (no trailing slash).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let base_url: String = base_url.into();
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(config.api_url.clone(), config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Submits the contract and context; returns the decoded result or the
    /// service's error verbatim.
    pub async fn submit(
        &self,
        file: &SelectedFile,
        context: &Context,
    ) -> Result<AnalyzeResult, AppError> {
        let context_json = serde_json::to_string(context)?;
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime)?;
        let form = Form::new().part("file", part).text("context", context_json);

        let url = self.url("/api/analyze");
        info!(url = %url, file = %file.name, bytes = file.size(), "submitting contract for analysis");

        let response = self.client.post(&url).multipart(form).send().await?;
        let body: serde_json::Value = decode(response).await?;
        let result = AnalyzeResult::from_json(body)?;

        info!(
            score = result.scoring.overall_score,
            red_flags = result.red_flags.len(),
            total_ms = result.timings.total_ms,
            "analysis received"
        );
        Ok(result)
    }

    /// GET helper shared by the knowledge-base calls.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let url = self.url(path);
        debug!(url = %url, "GET");
        let response = self.client.get(&url).query(query).send().await?;
        decode(response).await
    }
}

#[async_trait]
impl AnalysisService for AnalysisClient {
    async fn analyze(
        &self,
        file: &SelectedFile,
        context: &Context,
    ) -> Result<AnalyzeResult, AppError> {
        self.submit(file, context).await
    }
}

/// Turns a response into `T`, or into `AppError::Server` for non-2xx statuses.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(AppError::from_response(status.as_u16(), &body));
    }
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
pub(crate) mod test_server {
    use axum::Router;
    use tokio::net::TcpListener;

    /// Serves `router` on an ephemeral local port and returns its base URL.
    pub async fn spawn(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }
}
