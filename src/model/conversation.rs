//! One model conversation, with or without tool use.

use super::TextModel;
use super::protocol::{ContentBlock, Message, ModelRequest, Usage};
use crate::error::{Result, SockError};
use crate::tools::{self, Toolbox};

/// Final text of a conversation and what it cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    /// Summed over every model call; `None` if the model never reported usage.
    pub usage: Option<Usage>,
    /// Number of model calls made.
    pub rounds: u32,
}

/// Drives a prompt to a final text answer.
pub struct Conversation<'a> {
    model: &'a dyn TextModel,
    max_tokens: u32,
    toolbox: Option<&'a Toolbox>,
    max_rounds: u32,
}

impl<'a> Conversation<'a> {
    pub fn new(model: &'a dyn TextModel, max_tokens: u32) -> Self {
        Self {
            model,
            max_tokens,
            toolbox: None,
            max_rounds: 1,
        }
    }

    /// Offer `toolbox` to the model for up to `max_rounds` model calls.
    pub fn with_tools(mut self, toolbox: &'a Toolbox, max_rounds: u32) -> Self {
        if !toolbox.is_empty() {
            self.toolbox = Some(toolbox);
            self.max_rounds = max_rounds.max(1);
        }
        self
    }

    pub fn run(&self, prompt: &str) -> Result<Completion> {
        let mut request = ModelRequest::new(self.max_tokens, prompt);
        if let Some(toolbox) = self.toolbox {
            request = request.with_tools(toolbox.definitions());
        }

        let mut usage: Option<Usage> = None;
        let mut rounds = 0;

        loop {
            rounds += 1;
            let response = self.model.invoke(&request)?;

            if let Some(reported) = response.usage {
                usage.get_or_insert_with(Usage::default).add(reported);
            }

            let toolbox = match self.toolbox {
                Some(toolbox) if response.wants_tools() => toolbox,
                _ => {
                    let text = response.text().ok_or_else(|| {
                        SockError::MalformedResponse(
                            "response contained no text content".to_string(),
                        )
                    })?;
                    return Ok(Completion {
                        text,
                        usage,
                        rounds,
                    });
                }
            };

            if rounds >= self.max_rounds {
                return Err(SockError::ToolLoopExceeded(self.max_rounds));
            }

            let results: Vec<ContentBlock> = response
                .tool_calls()
                .into_iter()
                .map(|call| {
                    let (content, is_error) = match toolbox.call(call.name, call.input) {
                        Ok(output) => (tools::output_text(&output), false),
                        Err(e) => {
                            tracing::debug!(tool = call.name, error = %e, "tool call failed");
                            (e.to_string(), true)
                        }
                    };
                    ContentBlock::ToolResult {
                        tool_use_id: call.id.to_string(),
                        content,
                        is_error,
                    }
                })
                .collect();

            tracing::debug!(round = rounds, calls = results.len(), "answering tool calls");

            let echoed: Vec<ContentBlock> = response
                .content
                .into_iter()
                .filter(|block| !matches!(block, ContentBlock::Unsupported))
                .collect();
            request.messages.push(Message::assistant_blocks(echoed));
            request.messages.push(Message::user_blocks(results));
        }
    }
}
