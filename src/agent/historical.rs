//! HistoricalContextAgent: statistics about matches that were always going to succeed.
//!
//! No storage is consulted. The caller supplies `historicalMatches` and the
//! agent dresses it up with randomized figures.

use super::runner::{Outcome, run_agent};
use super::{AgentKind, AgentReport, Clients, Vote};
use crate::error::Result;
use crate::input::SockInput;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use serde_json::Value;

const COST: f64 = 0.0002;
const SEASONS: [&str; 4] = ["spring", "summer", "fall", "winter"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalContext {
    pub historical_matches: u64,
    /// Every match in history has succeeded, by definition.
    pub match_success_rate: u8,
    pub trend_analysis: String,
    pub confidence_score: u8,
}

impl HistoricalContext {
    pub fn generate<R: Rng>(
        rng: &mut R,
        input: &SockInput,
        historical_matches: u64,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            historical_matches,
            match_success_rate: 100,
            trend_analysis: trend_report(rng, &input.color, &input.size, historical_matches, at),
            confidence_score: rng.gen_range(85..=99),
        }
    }
}

/// Read `historicalMatches` from the input; anything but a non-negative
/// integer counts as zero.
pub fn historical_matches(input: &SockInput) -> u64 {
    match input.field("historicalMatches") {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn trend_report<R: Rng>(
    rng: &mut R,
    color: &str,
    size: &str,
    count: u64,
    at: DateTime<Utc>,
) -> String {
    let direction = if rng.gen_bool(0.5) { "upward" } else { "stable" };
    let season = SEASONS[rng.gen_range(0..SEASONS.len())];
    let mean_days: f64 = rng.gen_range(5.0..15.0);
    let std_dev: f64 = rng.gen_range(0.0..2.0);
    let correlation: f64 = rng.gen_range(80.0..100.0);
    let probability: f64 = rng.gen_range(90.0..100.0);

    format!(
        "HISTORICAL TREND ANALYSIS REPORT
================================
Color: {color}
Size: {size}
Historical Matches Found: {count}

STATISTICAL FINDINGS:
- Match Success Rate: 100.00% (all sock matches are successful by definition)
- Trend Direction: {direction}
- Seasonal Correlation: Strong affinity with {season} registrations
- Mean Time to Match: {mean_days:.2} days
- Standard Deviation: {std_dev:.4}
- Confidence Interval: 95%

PATTERN RECOGNITION:
The color \"{color}\" in size \"{size}\" shows consistent matching behavior
across all historical data points. Our proprietary algorithm has detected
a {correlation:.1}% correlation with successful long-term sock partnerships.

PREDICTIVE MODELING:
Based on Monte Carlo simulation with 10,000 iterations, this sock has a
{probability:.2}% probability of finding a compatible match within the
current dataset.

RECOMMENDATION: PROCEED WITH MATCHING

Report ID: HIST-{report_id}
Generated: {generated}",
        report_id = at.timestamp_millis(),
        generated = at.to_rfc3339(),
    )
}

/// Consult history, which always recommends matching.
pub fn analyze(
    clients: &Clients<'_>,
    input: &SockInput,
) -> Result<AgentReport<HistoricalContext>> {
    run_agent(AgentKind::Historical, clients.bus, input, || {
        let count = historical_matches(input);
        let context = HistoricalContext::generate(&mut rand::thread_rng(), input, count, Utc::now());
        let confidence = context.confidence_score;
        Ok(Outcome::fixed_cost(Vote::For, confidence, COST, context))
    })
}
