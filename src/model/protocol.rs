//! Wire types for the hosted model's messages API.
//!
//! Requests carry a version tag, a token budget, the conversation so far and
//! (optionally) tool definitions. Responses carry content blocks, a stop
//! reason and token usage.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol version expected by the runtime.
pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Stop reason signalling that the model wants tool output before continuing.
pub const STOP_TOOL_USE: &str = "tool_use";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRequest {
    pub anthropic_version: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}

impl ModelRequest {
    /// Single-turn request with a plain-text user prompt.
    pub fn new(max_tokens: u32, prompt: impl Into<String>) -> Self {
        Self {
            anthropic_version: ANTHROPIC_VERSION.to_string(),
            max_tokens,
            messages: vec![Message::user_text(prompt)],
            tools: Vec::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Blocks(blocks),
        }
    }

    pub fn assistant_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Blocks(blocks),
        }
    }
}

/// Message content is either a bare string or a list of typed blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        #[serde(default)]
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        is_error: bool,
    },
    /// Block types this crate does not interpret.
    #[serde(other)]
    Unsupported,
}

/// A tool offered to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl Usage {
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }

    pub fn add(&mut self, other: Usage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// A tool call requested by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub input: &'a Value,
}

impl ModelResponse {
    /// Concatenated text blocks, or `None` when the response has no text.
    pub fn text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n"))
        }
    }

    pub fn tool_calls(&self) -> Vec<ToolCall<'_>> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse { id, name, input } => Some(ToolCall { id, name, input }),
                _ => None,
            })
            .collect()
    }

    pub fn wants_tools(&self) -> bool {
        self.stop_reason.as_deref() == Some(STOP_TOOL_USE) && !self.tool_calls().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_request_serializes_without_tools() {
        let request = ModelRequest::new(1024, "Analyze the color \"red\"");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["anthropic_version"], "bedrock-2023-05-31");
        assert_eq!(value["max_tokens"], 1024);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "Analyze the color \"red\"");
        assert!(value.get("tools").is_none());
    }

    #[test]
    fn tool_result_block_omits_false_error_flag() {
        let ok = ContentBlock::ToolResult {
            tool_use_id: "t1".to_string(),
            content: "#FF0000".to_string(),
            is_error: false,
        };
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value, json!({"type": "tool_result", "tool_use_id": "t1", "content": "#FF0000"}));

        let failed = ContentBlock::ToolResult {
            tool_use_id: "t2".to_string(),
            content: "unknown tool".to_string(),
            is_error: true,
        };
        assert_eq!(serde_json::to_value(&failed).unwrap()["is_error"], true);
    }

    #[test]
    fn response_parses_text_and_usage() {
        let response: ModelResponse = serde_json::from_value(json!({
            "id": "msg_1",
            "content": [{"type": "text", "text": "{\"validityScore\": 92}"}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 120, "output_tokens": 380}
        }))
        .unwrap();

        assert_eq!(response.text().as_deref(), Some("{\"validityScore\": 92}"));
        assert_eq!(response.usage.unwrap().total(), 500);
        assert!(!response.wants_tools());
    }

    #[test]
    fn response_without_text_has_no_text() {
        let response: ModelResponse = serde_json::from_value(json!({"content": []})).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn unknown_block_types_are_tolerated() {
        let response: ModelResponse = serde_json::from_value(json!({
            "content": [
                {"type": "thinking", "thinking": "hmm"},
                {"type": "text", "text": "done"}
            ]
        }))
        .unwrap();
        assert_eq!(response.content[0], ContentBlock::Unsupported);
        assert_eq!(response.text().as_deref(), Some("done"));
    }

    #[test]
    fn tool_use_response_lists_calls() {
        let response: ModelResponse = serde_json::from_value(json!({
            "content": [
                {"type": "text", "text": "Let me look that up."},
                {"type": "tool_use", "id": "tu_1", "name": "get_color_hex_code", "input": {"color": "red"}}
            ],
            "stop_reason": "tool_use"
        }))
        .unwrap();

        assert!(response.wants_tools());
        let calls = response.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "get_color_hex_code");
        assert_eq!(calls[0].input["color"], "red");
    }
}
