//! The Sock Matching Committee.
//!
//! Five agents, each a plain function over a [`SockInput`]:
//!
//! - **Color** ([`color::analyze`]): cultural essay and validity score (model)
//! - **Size** ([`size::validate`]): ISO compliance report (deterministic)
//! - **Personality** ([`personality::analyze`]): MBTI and zodiac profile (model)
//! - **Historical** ([`historical::analyze`]): randomized trend report
//! - **Decision** ([`decision::decide`]): verdict and five-way tally (model)
//!
//! Every agent runs inside the same lifecycle: a `Started` event, the work,
//! then a `Completed` event carrying either the report or a failure record.
//!
//! [`SockInput`]: crate::input::SockInput

mod envelope;
mod runner;

pub mod color;
pub mod decision;
pub mod historical;
pub mod personality;
pub mod prompt;
pub mod size;

pub use envelope::{AgentKind, AgentReport, FailureReport, StartedEvent, Vote, agent_id};
pub use runner::Outcome;

use crate::config::Config;
use crate::error::Result;
use crate::events::EventBus;
use crate::model::{Completion, Conversation, TextModel};
use crate::tools::Toolbox;

/// The collaborators an agent talks to.
#[derive(Clone, Copy)]
pub struct Clients<'a> {
    pub model: &'a dyn TextModel,
    pub bus: &'a EventBus,
    pub config: &'a Config,
}

impl<'a> Clients<'a> {
    pub fn new(model: &'a dyn TextModel, bus: &'a EventBus, config: &'a Config) -> Self {
        Self { model, bus, config }
    }

    pub fn tools_enabled(&self) -> bool {
        self.config.tools_enabled
    }

    /// Send `prompt` to the model on behalf of `kind`, running its tool loop
    /// when tools are enabled.
    pub fn complete(&self, kind: AgentKind, prompt: &str) -> Result<Completion> {
        let toolbox = Toolbox::for_agent(kind);
        let mut conversation = Conversation::new(self.model, kind.max_tokens());
        if self.tools_enabled() {
            conversation = conversation.with_tools(&toolbox, self.config.max_tool_rounds);
        }

        tracing::debug!(agent = %kind, prompt_chars = prompt.len(), "invoking model");
        conversation.run(prompt)
    }
}
