//! Template service backed by an HTTP scaffold generator.

use crate::codegen::{
    domain::TemplateParams,
    ports::{TemplateService, TemplateServiceError, TemplateServiceResult},
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Default scaffold generator endpoint.
pub const DEFAULT_TEMPLATE_ENDPOINT: &str = "https://start.spring.io/starter.zip";

const MAX_ERROR_BODY: usize = 512;

/// Downloads scaffold archives with a `GET` request carrying the template
/// parameters as query arguments.
#[derive(Debug, Clone)]
pub struct HttpTemplateService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTemplateService {
    /// Creates a service for `endpoint` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateServiceError::Transport`] when the HTTP client
    /// cannot be constructed.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> TemplateServiceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TemplateServiceError::transport)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TemplateService for HttpTemplateService {
    async fn fetch_archive(&self, params: &TemplateParams) -> TemplateServiceResult<Vec<u8>> {
        debug!(endpoint = %self.endpoint, artifact = %params.artifact_id, "requesting scaffold");
        let response = self
            .client
            .get(&self.endpoint)
            .query(&params.query_pairs())
            .send()
            .await
            .map_err(TemplateServiceError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|index| body.is_char_boundary(*index))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(TemplateServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(TemplateServiceError::transport)?;
        Ok(bytes.to_vec())
    }
}
