//! Lifecycle shared by every agent: announce, work, report.

use super::envelope::{AgentKind, AgentReport, FailureReport, StartedEvent, Vote, agent_id};
use crate::error::{Result, SockError};
use crate::events::EventBus;
use crate::input::SockInput;
use crate::model::Usage;
use chrono::Utc;
use serde::Serialize;
use std::time::Instant;

/// Price per thousand tokens used for usage-based cost estimates.
const COST_PER_1K_TOKENS: f64 = 0.003;

/// What an agent's work produced, before the envelope is filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<D> {
    pub vote: Vote,
    pub confidence: u8,
    pub cost: f64,
    pub token_usage: Option<u64>,
    pub detail: D,
}

impl<D> Outcome<D> {
    /// Outcome with a fixed cost and no token accounting.
    pub fn fixed_cost(vote: Vote, confidence: u8, cost: f64, detail: D) -> Self {
        Self {
            vote,
            confidence,
            cost,
            token_usage: None,
            detail,
        }
    }

    /// Outcome priced from reported token usage, or `fallback_cost` without it.
    pub fn metered(
        vote: Vote,
        confidence: u8,
        usage: Option<Usage>,
        fallback_cost: f64,
        detail: D,
    ) -> Self {
        match usage {
            Some(usage) => Self {
                vote,
                confidence,
                cost: usage.total() as f64 / 1000.0 * COST_PER_1K_TOKENS,
                token_usage: Some(usage.total()),
                detail,
            },
            None => Self::fixed_cost(vote, confidence, fallback_cost, detail),
        }
    }
}

/// Run `work` inside the standard lifecycle.
///
/// Publishes `<Agent>Started`, then either the full report or an abstaining
/// failure record as `<Agent>Completed`. Failures come back as
/// [`SockError::AgentFailed`] carrying both the record and the cause.
pub(crate) fn run_agent<D, F>(
    kind: AgentKind,
    bus: &EventBus,
    input: &SockInput,
    work: F,
) -> Result<AgentReport<D>>
where
    D: Serialize,
    F: FnOnce() -> Result<Outcome<D>>,
{
    let started_at = Instant::now();
    let now = Utc::now();
    let id = agent_id(kind, now);

    tracing::info!(agent = %kind, sock_id = %input.sock_id, agent_id = %id, "starting analysis");

    bus.publish_detail(
        kind.started_event(),
        &StartedEvent {
            sock_id: input.sock_id.clone(),
            agent_id: id.clone(),
            agent_name: kind.agent_name().to_string(),
            timestamp: now,
        },
    );

    match work() {
        Ok(outcome) => {
            let report = AgentReport {
                agent_id: id,
                agent_name: kind.agent_name().to_string(),
                sock_id: input.sock_id.clone(),
                color: input.color.clone(),
                size: input.size.clone(),
                timestamp: Utc::now(),
                vote: outcome.vote,
                confidence: outcome.confidence,
                processing_time: elapsed_ms(started_at),
                cost: outcome.cost,
                token_usage: outcome.token_usage,
                detail: outcome.detail,
            };

            bus.publish_detail(kind.completed_event(), &report);
            tracing::info!(
                agent = %kind,
                vote = report.vote.as_str(),
                confidence = report.confidence,
                processing_ms = report.processing_time,
                "analysis complete"
            );
            Ok(report)
        }
        Err(source) => {
            tracing::error!(agent = %kind, sock_id = %input.sock_id, error = %source, "analysis failed");

            let report = FailureReport::new(kind, id, input, &source, elapsed_ms(started_at));
            bus.publish_detail(kind.completed_event(), &report);

            Err(SockError::AgentFailed {
                report: Box::new(report),
                source: Box::new(source),
            })
        }
    }
}

fn elapsed_ms(started_at: Instant) -> f64 {
    started_at.elapsed().as_secs_f64() * 1000.0
}
