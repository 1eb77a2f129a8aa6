//! Hosted text-model access.
//!
//! Agents depend on the [`TextModel`] trait, never on a concrete client, so a
//! single client built at process start can be shared by reference and tests
//! can substitute a scripted model.

mod bedrock;
mod conversation;
pub mod extract;
pub mod protocol;

use crate::error::Result;

pub use bedrock::BedrockClient;
pub use conversation::{Completion, Conversation};
pub use protocol::{ModelRequest, ModelResponse, ToolDefinition, Usage};

/// A model that answers one request with one response.
pub trait TextModel: Send + Sync {
    fn invoke(&self, request: &ModelRequest) -> Result<ModelResponse>;
}
