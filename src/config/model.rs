//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration shared by every agent handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Notification bus
    // =========================================================================
    /// Name stamped on every published event.
    #[serde(default = "default_event_bus_name")]
    pub event_bus_name: String,

    /// HTTP endpoint accepting `PutEvents`-shaped bodies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_endpoint: Option<String>,

    /// Local NDJSON file to append events to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_log: Option<PathBuf>,

    // =========================================================================
    // Hosted model
    // =========================================================================
    /// Model identifier used in the invoke path.
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Region used to derive the default runtime endpoint.
    #[serde(default = "default_region")]
    pub region: String,

    /// Explicit runtime endpoint; overrides the region-derived one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_endpoint: Option<String>,

    /// Bearer token for the runtime API. Never written back out.
    #[serde(default, skip_serializing)]
    pub bearer_token: Option<String>,

    // =========================================================================
    // Agent behavior
    // =========================================================================
    /// Offer local lookup tools to the model.
    #[serde(default)]
    pub tools_enabled: bool,

    /// Maximum model calls in one tool-use conversation.
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: u32,

    /// Handling of missing committee reports in the decision agent.
    #[serde(default)]
    pub upstream_policy: UpstreamPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            event_bus_name: default_event_bus_name(),
            event_endpoint: None,
            event_log: None,
            model_id: default_model_id(),
            region: default_region(),
            model_endpoint: None,
            bearer_token: None,
            tools_enabled: false,
            max_tool_rounds: default_max_tool_rounds(),
            upstream_policy: UpstreamPolicy::default(),
        }
    }
}
