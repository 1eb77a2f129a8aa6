//! HTTP client for the hosted model runtime.

use super::TextModel;
use super::protocol::{ModelRequest, ModelResponse};
use crate::config::Config;
use crate::error::{Result, SockError};
use reqwest::Url;
use std::time::Duration;

/// Blocking client for `POST {endpoint}/model/{model_id}/invoke`.
pub struct BedrockClient {
    invoke_url: Url,
    bearer_token: Option<String>,
    client: reqwest::blocking::Client,
}

impl BedrockClient {
    pub fn new(config: &Config) -> Result<Self> {
        // No request timeout: the hosting environment owns that policy.
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| SockError::ModelError(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            invoke_url: invoke_url(&config.runtime_endpoint(), &config.model_id)?,
            bearer_token: config.bearer_token.clone(),
            client,
        })
    }

    pub fn invoke_url(&self) -> &Url {
        &self.invoke_url
    }
}

/// Append `model/{model_id}/invoke` to the endpoint. The model id is one
/// path segment, so the `/` in inference-profile ARNs is percent-encoded.
fn invoke_url(endpoint: &str, model_id: &str) -> Result<Url> {
    let mut url = Url::parse(endpoint).map_err(|e| {
        SockError::ConfigError(format!("invalid model endpoint '{}': {}", endpoint, e))
    })?;

    url.path_segments_mut()
        .map_err(|_| {
            SockError::ConfigError(format!("model endpoint '{}' cannot take a path", endpoint))
        })?
        .pop_if_empty()
        .extend(["model", model_id, "invoke"]);

    Ok(url)
}

impl TextModel for BedrockClient {
    fn invoke(&self, request: &ModelRequest) -> Result<ModelResponse> {
        let url = self.invoke_url.clone();
        tracing::debug!(url = %url, max_tokens = request.max_tokens, "invoking model");

        let mut builder = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request);

        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .map_err(|e| SockError::ModelError(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SockError::ModelError(format!("HTTP {}: {}", status, body.trim())));
        }

        let body = response
            .text()
            .map_err(|e| SockError::ModelError(format!("failed to read response body: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| {
            SockError::MalformedResponse(format!("response body is not a model response: {}", e))
        })
    }
}
