//! Configuration types, defaults, and environment variable names.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_EVENT_BUS_NAME: &str = "EVENT_BUS_NAME";
pub const ENV_MODEL_ID: &str = "BEDROCK_MODEL_ID";
pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_MODEL_ENDPOINT: &str = "SOCKMATCH_MODEL_ENDPOINT";
pub const ENV_BEARER_TOKEN: &str = "AWS_BEARER_TOKEN_BEDROCK";
pub const ENV_EVENT_ENDPOINT: &str = "SOCKMATCH_EVENT_ENDPOINT";
pub const ENV_EVENT_LOG: &str = "SOCKMATCH_EVENT_LOG";
pub const ENV_UPSTREAM_POLICY: &str = "SOCKMATCH_UPSTREAM_POLICY";
pub const ENV_MAX_TOOL_ROUNDS: &str = "SOCKMATCH_MAX_TOOL_ROUNDS";

/// How the decision agent treats committee reports that never arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamPolicy {
    /// Substitute placeholder values for missing reports (default).
    #[default]
    Lenient,
    /// Fail with a missing-upstream error.
    Strict,
}

impl UpstreamPolicy {
    /// Parse a policy from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Some(Self::Lenient),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }
}

/// Where bus events are delivered, derived from the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSinkKind {
    Http(String),
    File(PathBuf),
    Disabled,
}

pub fn default_event_bus_name() -> String {
    "sock-matcher-events".to_string()
}

pub fn default_model_id() -> String {
    "anthropic.claude-3-5-sonnet-20241022-v2:0".to_string()
}

pub fn default_region() -> String {
    "us-west-2".to_string()
}

pub fn default_max_tool_rounds() -> u32 {
    5
}
