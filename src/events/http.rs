//! HTTP event sink.
//!
//! Sends each event as a single-entry `PutEvents` request body:
//!
//! ```json
//! {"Entries": [{"EventBusName": "...", "Source": "...", "DetailType": "...", "Detail": "<json>"}]}
//! ```
//!
//! `Detail` is the JSON-encoded detail object, as the bus expects a string.
//! A non-success status or a non-zero `FailedEntryCount` is a delivery failure.

use super::{BusEvent, EventSink};
use crate::error::{Result, SockError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PutEventsRequest<'a> {
    entries: Vec<PutEventsEntry<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PutEventsEntry<'a> {
    event_bus_name: &'a str,
    source: &'a str,
    detail_type: &'static str,
    detail: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct PutEventsResponse {
    failed_entry_count: u64,
}

/// Sink that POSTs events to an HTTP endpoint.
pub struct HttpEventSink {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpEventSink {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        // No request timeout: the hosting environment owns that policy.
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| SockError::PublishError(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

fn request_body(event: &BusEvent) -> Result<PutEventsRequest<'_>> {
    let detail = serde_json::to_string(&event.detail)
        .map_err(|e| SockError::PublishError(format!("failed to serialize event detail: {}", e)))?;

    Ok(PutEventsRequest {
        entries: vec![PutEventsEntry {
            event_bus_name: &event.bus_name,
            source: &event.source,
            detail_type: event.detail_type.as_str(),
            detail,
        }],
    })
}

impl EventSink for HttpEventSink {
    fn deliver(&self, event: &BusEvent) -> Result<()> {
        let body = request_body(event)?;

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| SockError::PublishError(format!("request to {} failed: {}", self.endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(SockError::PublishError(format!("HTTP {}: {}", status, text)));
        }

        // Endpoints that answer with an empty body accepted the event.
        let text = response.text().unwrap_or_default();
        if text.trim().is_empty() {
            return Ok(());
        }
        let parsed: PutEventsResponse = serde_json::from_str(&text).unwrap_or_default();
        if parsed.failed_entry_count > 0 {
            return Err(SockError::PublishError(format!(
                "bus rejected {} entr{}",
                parsed.failed_entry_count,
                if parsed.failed_entry_count == 1 { "y" } else { "ies" }
            )));
        }

        Ok(())
    }
}
