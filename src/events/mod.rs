//! Notification bus for agent lifecycle telemetry.
//!
//! Every agent announces itself on the bus when it starts and again when it
//! completes (successfully or not). The bus is publish-only and
//! fire-and-forget: nothing in this crate consumes the events, and a failed
//! publish is logged and dropped rather than failing the agent.
//!
//! # Event Format
//!
//! ```json
//! {
//!   "busName": "sock-matcher-events",
//!   "source": "sock-matcher.agents",
//!   "detailType": "ColorAgentCompleted",
//!   "detail": { "agentId": "color-agent-1730000000000", ... }
//! }
//! ```
//!
//! # Sinks
//!
//! - [`HttpEventSink`]: POSTs a `PutEvents`-shaped body to an endpoint
//! - [`NdjsonEventSink`]: appends one event per line to a local file
//! - [`DisabledEventSink`]: logs the event and discards it

mod file;
mod http;

use crate::config::{Config, EventSinkKind};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use file::NdjsonEventSink;
pub use http::HttpEventSink;

/// Source attached to every event this crate emits.
pub const EVENT_SOURCE: &str = "sock-matcher.agents";

/// Detail types published by the committee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailType {
    ColorAgentStarted,
    ColorAgentCompleted,
    PersonalityAgentStarted,
    PersonalityAgentCompleted,
    SizeAgentStarted,
    SizeAgentCompleted,
    HistoricalAgentStarted,
    HistoricalAgentCompleted,
    DecisionAgentStarted,
    DecisionAgentCompleted,
    ConsensusReached,
}

impl DetailType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailType::ColorAgentStarted => "ColorAgentStarted",
            DetailType::ColorAgentCompleted => "ColorAgentCompleted",
            DetailType::PersonalityAgentStarted => "PersonalityAgentStarted",
            DetailType::PersonalityAgentCompleted => "PersonalityAgentCompleted",
            DetailType::SizeAgentStarted => "SizeAgentStarted",
            DetailType::SizeAgentCompleted => "SizeAgentCompleted",
            DetailType::HistoricalAgentStarted => "HistoricalAgentStarted",
            DetailType::HistoricalAgentCompleted => "HistoricalAgentCompleted",
            DetailType::DecisionAgentStarted => "DecisionAgentStarted",
            DetailType::DecisionAgentCompleted => "DecisionAgentCompleted",
            DetailType::ConsensusReached => "ConsensusReached",
        }
    }
}

impl std::fmt::Display for DetailType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single event as it travels to a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusEvent {
    pub bus_name: String,
    pub source: String,
    pub detail_type: DetailType,
    pub detail: Value,
    /// When the event was handed to the bus.
    pub published_at: DateTime<Utc>,
}

/// A destination for bus events.
///
/// Implementations report delivery failures; [`EventBus`] decides that those
/// failures are never fatal.
pub trait EventSink: Send + Sync {
    fn deliver(&self, event: &BusEvent) -> Result<()>;
}

/// Sink used when no destination is configured.
#[derive(Debug, Default)]
pub struct DisabledEventSink;

impl EventSink for DisabledEventSink {
    fn deliver(&self, event: &BusEvent) -> Result<()> {
        tracing::debug!(
            detail_type = %event.detail_type,
            "event bus disabled; dropping event"
        );
        Ok(())
    }
}

/// Named, publish-only event bus.
pub struct EventBus {
    bus_name: String,
    sink: Box<dyn EventSink>,
}

impl EventBus {
    pub fn new(bus_name: impl Into<String>, sink: Box<dyn EventSink>) -> Self {
        Self {
            bus_name: bus_name.into(),
            sink,
        }
    }

    /// Build the bus and its sink from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let sink: Box<dyn EventSink> = match config.event_sink() {
            EventSinkKind::Http(endpoint) => Box::new(HttpEventSink::new(endpoint)?),
            EventSinkKind::File(path) => Box::new(NdjsonEventSink::new(path)),
            EventSinkKind::Disabled => Box::new(DisabledEventSink),
        };
        Ok(Self::new(&config.event_bus_name, sink))
    }

    pub fn bus_name(&self) -> &str {
        &self.bus_name
    }

    /// Publish an event, swallowing (but logging) any delivery failure.
    pub fn publish(&self, detail_type: DetailType, detail: Value) {
        let event = BusEvent {
            bus_name: self.bus_name.clone(),
            source: EVENT_SOURCE.to_string(),
            detail_type,
            detail,
            published_at: Utc::now(),
        };

        match self.sink.deliver(&event) {
            Ok(()) => tracing::debug!(detail_type = %detail_type, "event published"),
            Err(e) => tracing::warn!(
                detail_type = %detail_type,
                error = %e,
                "failed to publish event"
            ),
        }
    }

    /// Publish a serializable detail payload.
    pub fn publish_detail<T: Serialize>(&self, detail_type: DetailType, detail: &T) {
        match serde_json::to_value(detail) {
            Ok(value) => self.publish(detail_type, value),
            Err(e) => tracing::warn!(
                detail_type = %detail_type,
                error = %e,
                "failed to serialize event detail"
            ),
        }
    }
}
