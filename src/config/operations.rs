//! Config loading, environment overrides, validation, and derived values.

use super::model::Config;
use super::types::*;
use crate::error::{Result, SockError};
use std::path::{Path, PathBuf};

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SockError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| SockError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| SockError::ConfigError(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Resolve the effective config: optional file, then process environment.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        let config = base.with_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using the given variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_EVENT_BUS_NAME) {
            self.event_bus_name = v;
        }
        if let Some(v) = get(ENV_MODEL_ID) {
            self.model_id = v;
        }
        if let Some(v) = get(ENV_REGION) {
            self.region = v;
        }
        if let Some(v) = get(ENV_MODEL_ENDPOINT) {
            self.model_endpoint = Some(v);
        }
        if let Some(v) = get(ENV_BEARER_TOKEN) {
            self.bearer_token = Some(v);
        }
        if let Some(v) = get(ENV_EVENT_ENDPOINT) {
            self.event_endpoint = Some(v);
        }
        if let Some(v) = get(ENV_EVENT_LOG) {
            self.event_log = Some(PathBuf::from(v));
        }
        if let Some(v) = get(ENV_UPSTREAM_POLICY) {
            self.upstream_policy = UpstreamPolicy::from_str(&v).ok_or_else(|| {
                SockError::ConfigError(format!(
                    "{} must be 'lenient' or 'strict' (found '{}')",
                    ENV_UPSTREAM_POLICY, v
                ))
            })?;
        }
        if let Some(v) = get(ENV_MAX_TOOL_ROUNDS) {
            self.max_tool_rounds = v.trim().parse().map_err(|_| {
                SockError::ConfigError(format!(
                    "{} must be a positive integer (found '{}')",
                    ENV_MAX_TOOL_ROUNDS, v
                ))
            })?;
        }

        Ok(self)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `event_bus_name`, `model_id` and `region` must be non-empty
    /// - `max_tool_rounds` must be positive
    /// - at most one of `event_endpoint` and `event_log` may be set
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("event_bus_name", &self.event_bus_name),
            ("model_id", &self.model_id),
            ("region", &self.region),
        ] {
            if value.trim().is_empty() {
                return Err(SockError::ConfigError(format!(
                    "config validation failed: {} must not be empty",
                    name
                )));
            }
        }

        if self.max_tool_rounds == 0 {
            return Err(SockError::ConfigError(
                "config validation failed: max_tool_rounds must be greater than 0".to_string(),
            ));
        }

        if self.event_endpoint.is_some() && self.event_log.is_some() {
            return Err(SockError::ConfigError(
                "config validation failed: set either event_endpoint or event_log, not both"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Base URL of the model runtime.
    pub fn runtime_endpoint(&self) -> String {
        match &self.model_endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
        }
    }

    /// Where events go.
    pub fn event_sink(&self) -> EventSinkKind {
        match (&self.event_endpoint, &self.event_log) {
            (Some(endpoint), _) => EventSinkKind::Http(endpoint.clone()),
            (None, Some(path)) => EventSinkKind::File(path.clone()),
            (None, None) => EventSinkKind::Disabled,
        }
    }
}
