//! Identity, votes, and the result envelope shared by every agent.

use crate::error::SockError;
use crate::events::DetailType;
use crate::input::SockInput;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A committee member's vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    For,
    Against,
    Abstain,
}

impl Vote {
    /// Parse a vote, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "for" => Some(Vote::For),
            "against" => Some(Vote::Against),
            "abstain" => Some(Vote::Abstain),
            _ => None,
        }
    }

    /// `for` above the approval threshold, `against` otherwise.
    pub fn from_score(score: u8) -> Self {
        if score > 50 { Vote::For } else { Vote::Against }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Vote::For => "for",
            Vote::Against => "against",
            Vote::Abstain => "abstain",
        }
    }
}

/// The five seats on the committee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Color,
    Size,
    Personality,
    Historical,
    Decision,
}

impl AgentKind {
    /// Seating order used when votes are collected.
    pub const COMMITTEE: [AgentKind; 5] = [
        AgentKind::Color,
        AgentKind::Size,
        AgentKind::Personality,
        AgentKind::Historical,
        AgentKind::Decision,
    ];

    pub fn agent_name(&self) -> &'static str {
        match self {
            AgentKind::Color => "ColorAnalysisAgent",
            AgentKind::Size => "SizeValidationAgent",
            AgentKind::Personality => "PersonalityAnalyzerAgent",
            AgentKind::Historical => "HistoricalContextAgent",
            AgentKind::Decision => "FinalDecisionAgent",
        }
    }

    pub fn from_agent_name(name: &str) -> Option<Self> {
        Self::COMMITTEE
            .into_iter()
            .find(|kind| kind.agent_name() == name.trim())
    }

    pub fn id_prefix(&self) -> &'static str {
        match self {
            AgentKind::Color => "color-agent",
            AgentKind::Size => "size-agent",
            AgentKind::Personality => "personality-agent",
            AgentKind::Historical => "historical-agent",
            AgentKind::Decision => "decision-agent",
        }
    }

    pub fn started_event(&self) -> DetailType {
        match self {
            AgentKind::Color => DetailType::ColorAgentStarted,
            AgentKind::Size => DetailType::SizeAgentStarted,
            AgentKind::Personality => DetailType::PersonalityAgentStarted,
            AgentKind::Historical => DetailType::HistoricalAgentStarted,
            AgentKind::Decision => DetailType::DecisionAgentStarted,
        }
    }

    pub fn completed_event(&self) -> DetailType {
        match self {
            AgentKind::Color => DetailType::ColorAgentCompleted,
            AgentKind::Size => DetailType::SizeAgentCompleted,
            AgentKind::Personality => DetailType::PersonalityAgentCompleted,
            AgentKind::Historical => DetailType::HistoricalAgentCompleted,
            AgentKind::Decision => DetailType::DecisionAgentCompleted,
        }
    }

    /// Token budget for the agent's model call; zero for deterministic agents.
    pub fn max_tokens(&self) -> u32 {
        match self {
            AgentKind::Color | AgentKind::Personality => 1024,
            AgentKind::Decision => 2048,
            AgentKind::Size | AgentKind::Historical => 0,
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.agent_name())
    }
}

/// Correlation id of the form `<prefix>-<unix millis>`.
pub fn agent_id(kind: AgentKind, at: DateTime<Utc>) -> String {
    format!("{}-{}", kind.id_prefix(), at.timestamp_millis())
}

/// Payload of every `*Started` event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartedEvent {
    pub sock_id: String,
    pub agent_id: String,
    pub agent_name: String,
    pub timestamp: DateTime<Utc>,
}

/// A successful agent result. Agent-specific fields are flattened in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentReport<D> {
    pub agent_id: String,
    pub agent_name: String,
    pub sock_id: String,
    pub color: String,
    pub size: String,
    pub timestamp: DateTime<Utc>,
    pub vote: Vote,
    pub confidence: u8,
    /// Milliseconds.
    pub processing_time: f64,
    pub cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_usage: Option<u64>,
    #[serde(flatten)]
    pub detail: D,
}

/// The abstaining record published when an agent fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureReport {
    pub agent_id: String,
    pub agent_name: String,
    pub sock_id: String,
    pub color: String,
    pub size: String,
    pub timestamp: DateTime<Utc>,
    pub error: String,
    pub vote: Vote,
    pub confidence: u8,
    pub processing_time: f64,
}

impl FailureReport {
    pub fn new(
        kind: AgentKind,
        agent_id: impl Into<String>,
        input: &SockInput,
        error: &SockError,
        processing_time: f64,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            agent_name: kind.agent_name().to_string(),
            sock_id: input.sock_id.clone(),
            color: input.color.clone(),
            size: input.size.clone(),
            timestamp: Utc::now(),
            error: error.to_string(),
            vote: Vote::Abstain,
            confidence: 0,
            processing_time,
        }
    }
}
