//! FinalDecisionAgent: the philosophical arbiter.
//!
//! Reads the other committee members' reports from `parallelResults` and an
//! optional `historicalContext`, asks the model for a verdict, and tallies the
//! five-way vote.
//!
//! # Finding upstream reports
//!
//! Each slot (color, size, personality) is filled by the first entry whose
//! `agentName` names that agent. Failing that, the slot's position is used
//! (0 color, 1 size, 2 personality) unless the entry there names a different
//! committee member. Under [`UpstreamPolicy::Lenient`] an empty slot gets a
//! placeholder report; under [`UpstreamPolicy::Strict`] it is an error.

use super::prompt::{self, vars};
use super::runner::{Outcome, run_agent};
use super::{AgentKind, AgentReport, Clients, Vote};
use crate::config::UpstreamPolicy;
use crate::error::{Result, SockError};
use crate::events::DetailType;
use crate::input::SockInput;
use crate::model::extract::{self, extract_json};
use crate::tools::{ConsensusType, tally_votes};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

const FIXED_COST: f64 = 0.006;
const REPORT_EXCERPT_CHARS: usize = 500;

const PROMPT: &str = r#"You are Justice Sockrates, the final arbiter in a prestigious Sock Matching Committee. Your role is to synthesize the analyses from your fellow committee members and render a final verdict on this sock's matchability.

SOCK UNDER REVIEW:
- ID: {sock_id}
- Color: {color}
- Size: {size}

COMMITTEE REPORTS:

1. COLOR ANALYSIS AGENT REPORT:
Validity Score: {validity_score}/100
Cultural Essay: {cultural_essay}

2. SIZE VALIDATION AGENT REPORT:
ISO Compliant: {is_valid}
Compliance Report: {compliance_report}

3. PERSONALITY ANALYZER AGENT REPORT:
MBTI Type: {mbti_type}
Compatibility Potential: {compatibility_potential}%
Summary: {personality_summary}

4. HISTORICAL CONTEXT AGENT REPORT:
Match Success Rate: {match_success_rate}%
Trend Analysis: {trend_analysis}

YOUR TASK:
Write a comprehensive 500-word philosophical analysis addressing:
1. The existential nature of sock pairing and what it means for this particular sock
2. How the committee's findings inform your decision
3. The practical implications of approving or denying this sock's entry into the matching pool
4. A final recommendation with confidence score

Reference philosophical frameworks (existentialism, utilitarianism, Kantian ethics) as appropriate. Be thoughtful, thorough, and slightly dramatic. This is an important decision.
{tool_hint}
Format your response as JSON:
{{
  "philosophicalAnalysis": "<500-word essay>",
  "decision": "match" or "no-match",
  "confidenceScore": <0-100>,
  "reasoning": "<one-sentence summary>",
  "dissent": "<any concerns or minority opinions>"
}}"#;

const TOOL_HINT: &str = "\nYou have tools to tally committee votes and compute a weighted compatibility score. Use them before deciding.\n";

/// One committee member's report as seen by the arbiter.
#[derive(Debug, Clone, PartialEq)]
struct Upstream {
    record: Map<String, Value>,
    placeholder: bool,
}

impl Upstream {
    fn score(&self, key: &str, default: u8) -> u8 {
        extract::score(self.record.get(key), default)
    }

    fn text(&self, key: &str, default: &str) -> String {
        extract::text(&self.record, key, default)
    }

    fn flag(&self, key: &str, default: bool) -> bool {
        self.record.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// The member's recorded vote; absent means `for`, garbage means abstain.
    fn vote(&self) -> Vote {
        match self.record.get("vote") {
            None | Some(Value::Null) => Vote::For,
            Some(Value::String(s)) => Vote::parse(s).unwrap_or(Vote::Abstain),
            Some(_) => Vote::Abstain,
        }
    }
}

/// The committee's reports, resolved into slots.
#[derive(Debug, Clone, PartialEq)]
struct CommitteeReports {
    color: Upstream,
    size: Upstream,
    personality: Upstream,
    historical: Upstream,
}

fn placeholder(pairs: &[(&str, Value)]) -> Upstream {
    Upstream {
        record: pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
        placeholder: true,
    }
}

fn claimed_agent(entry: &Value) -> Option<AgentKind> {
    entry
        .get("agentName")
        .and_then(Value::as_str)
        .and_then(AgentKind::from_agent_name)
}

fn find_slot(results: &[Value], kind: AgentKind, position: usize) -> Option<Map<String, Value>> {
    if let Some(entry) = results.iter().find(|entry| claimed_agent(entry) == Some(kind)) {
        return entry.as_object().cloned();
    }

    let entry = results.get(position)?;
    match claimed_agent(entry) {
        Some(other) if other != kind => None,
        _ => entry.as_object().cloned(),
    }
}

fn fill_slot(
    results: &[Value],
    kind: AgentKind,
    position: usize,
    policy: UpstreamPolicy,
    fallback: &[(&str, Value)],
) -> Result<Upstream> {
    match find_slot(results, kind, position) {
        Some(record) => Ok(Upstream {
            record,
            placeholder: false,
        }),
        None if policy == UpstreamPolicy::Strict => {
            Err(SockError::MissingUpstream(kind.agent_name().to_string()))
        }
        None => {
            tracing::warn!(agent = %kind, "upstream report missing; using placeholder");
            Ok(placeholder(fallback))
        }
    }
}

impl CommitteeReports {
    fn resolve(input: &SockInput, policy: UpstreamPolicy) -> Result<Self> {
        let results: &[Value] = input
            .field("parallelResults")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let color = fill_slot(
            results,
            AgentKind::Color,
            0,
            policy,
            &[
                ("validityScore", Value::from(80)),
                ("culturalEssay", Value::from("Color analysis pending")),
            ],
        )?;
        let size = fill_slot(
            results,
            AgentKind::Size,
            1,
            policy,
            &[
                ("isValid", Value::from(true)),
                ("complianceReport", Value::from("Size validation pending")),
            ],
        )?;
        let personality = fill_slot(
            results,
            AgentKind::Personality,
            2,
            policy,
            &[
                ("compatibilityPotential", Value::from(85)),
                ("mbtiType", Value::from("ENFP")),
                ("personalitySummary", Value::from("Personality analysis pending")),
            ],
        )?;

        let historical = match input.field("historicalContext").and_then(Value::as_object) {
            Some(record) if !record.is_empty() => Upstream {
                record: record.clone(),
                placeholder: false,
            },
            _ => placeholder(&[
                ("matchSuccessRate", Value::from(100)),
                ("confidenceScore", Value::from(90)),
                ("trendAnalysis", Value::from("Historical analysis pending")),
            ]),
        };

        Ok(Self {
            color,
            size,
            personality,
            historical,
        })
    }

    fn placeholders(&self) -> usize {
        [&self.color, &self.size, &self.personality, &self.historical]
            .iter()
            .filter(|u| u.placeholder)
            .count()
    }
}

/// The model's verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub decision: String,
    pub philosophical_analysis: String,
    pub confidence_score: u8,
    pub reasoning: String,
    pub dissent: String,
}

impl Verdict {
    pub fn from_model_text(raw: &str) -> Self {
        match extract_json(raw) {
            Some(map) => Self {
                decision: extract::text(&map, "decision", "match"),
                philosophical_analysis: extract::text(&map, "philosophicalAnalysis", ""),
                confidence_score: extract::score(map.get("confidenceScore"), 95),
                reasoning: extract::text(&map, "reasoning", ""),
                dissent: extract::text(&map, "dissent", "None"),
            },
            None => {
                tracing::warn!("verdict was not JSON; using default record");
                Self {
                    decision: "match".to_string(),
                    philosophical_analysis: raw.to_string(),
                    confidence_score: 95,
                    reasoning: "All committee members concur on matchability".to_string(),
                    dissent: "None".to_string(),
                }
            }
        }
    }

    /// Only the exact string `match` approves; anything else is a rejection.
    pub fn is_match(&self) -> bool {
        self.decision == "match"
    }
}

/// One entry of the five-way vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastVote {
    pub agent: String,
    pub vote: Vote,
    pub confidence: u8,
}

impl CastVote {
    fn new(kind: AgentKind, vote: Vote, confidence: u8) -> Self {
        Self {
            agent: kind.agent_name().to_string(),
            vote,
            confidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalDecision {
    #[serde(flatten)]
    pub verdict: Verdict,
    pub votes: Vec<CastVote>,
    pub votes_for: usize,
    /// Every vote that was not `for`.
    pub votes_against: usize,
    pub abstentions: usize,
    pub consensus_reached: bool,
    pub consensus_type: ConsensusType,
}

/// Payload of the `ConsensusReached` event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusEvent {
    pub sock_id: String,
    pub consensus_reached: bool,
    pub votes_for: usize,
    pub votes_against: usize,
    pub final_decision: String,
    pub timestamp: DateTime<Utc>,
}

fn collect_votes(reports: &CommitteeReports, verdict: &Verdict) -> Vec<CastVote> {
    let size_confidence = if reports.size.flag("isValid", true) { 100 } else { 0 };
    let final_vote = if verdict.is_match() { Vote::For } else { Vote::Against };

    vec![
        CastVote::new(
            AgentKind::Color,
            reports.color.vote(),
            reports.color.score("validityScore", 80),
        ),
        CastVote::new(AgentKind::Size, reports.size.vote(), size_confidence),
        CastVote::new(
            AgentKind::Personality,
            reports.personality.vote(),
            reports.personality.score("compatibilityPotential", 85),
        ),
        CastVote::new(
            AgentKind::Historical,
            reports.historical.vote(),
            reports.historical.score("confidenceScore", 90),
        ),
        CastVote::new(AgentKind::Decision, final_vote, verdict.confidence_score),
    ]
}

fn build_prompt(input: &SockInput, reports: &CommitteeReports, with_tools: bool) -> Result<String> {
    let excerpt = |upstream: &Upstream, key: &str, default: &str| {
        extract::truncate_chars(&upstream.text(key, default), REPORT_EXCERPT_CHARS)
    };

    Ok(prompt::render(
        PROMPT,
        &vars([
            ("sock_id", input.sock_id.clone()),
            ("color", input.color.clone()),
            ("size", input.size.clone()),
            ("validity_score", reports.color.score("validityScore", 80).to_string()),
            ("cultural_essay", reports.color.text("culturalEssay", "")),
            ("is_valid", reports.size.flag("isValid", true).to_string()),
            ("compliance_report", excerpt(&reports.size, "complianceReport", "Compliant")),
            ("mbti_type", reports.personality.text("mbtiType", "ENFP")),
            (
                "compatibility_potential",
                reports.personality.score("compatibilityPotential", 85).to_string(),
            ),
            ("personality_summary", reports.personality.text("personalitySummary", "")),
            (
                "match_success_rate",
                reports.historical.score("matchSuccessRate", 100).to_string(),
            ),
            ("trend_analysis", excerpt(&reports.historical, "trendAnalysis", "Positive trends")),
            (
                "tool_hint",
                if with_tools { TOOL_HINT } else { "" }.to_string(),
            ),
        ]),
    )?)
}

/// Deliberate, vote, and announce whether the committee agrees.
pub fn decide(clients: &Clients<'_>, input: &SockInput) -> Result<AgentReport<FinalDecision>> {
    let report = run_agent(AgentKind::Decision, clients.bus, input, || {
        let reports = CommitteeReports::resolve(input, clients.config.upstream_policy)?;
        if reports.placeholders() > 0 {
            tracing::info!(placeholders = reports.placeholders(), "deliberating with placeholder reports");
        }

        let prompt = build_prompt(input, &reports, clients.tools_enabled())?;
        let completion = clients.complete(AgentKind::Decision, &prompt)?;
        let verdict = Verdict::from_model_text(&completion.text);

        let votes = collect_votes(&reports, &verdict);
        let ballot: Vec<Vote> = votes.iter().map(|v| v.vote).collect();
        let tally = tally_votes(&ballot);

        let vote = if verdict.is_match() { Vote::For } else { Vote::Against };
        let confidence = verdict.confidence_score;

        Ok(Outcome::metered(
            vote,
            confidence,
            completion.usage,
            FIXED_COST,
            FinalDecision {
                verdict,
                votes,
                votes_for: tally.votes_for,
                votes_against: tally.total - tally.votes_for,
                abstentions: tally.abstentions,
                consensus_reached: tally.consensus_reached,
                consensus_type: tally.consensus_type,
            },
        ))
    })?;

    clients.bus.publish_detail(
        DetailType::ConsensusReached,
        &ConsensusEvent {
            sock_id: report.sock_id.clone(),
            consensus_reached: report.detail.consensus_reached,
            votes_for: report.detail.votes_for,
            votes_against: report.detail.votes_against,
            final_decision: report.detail.verdict.decision.clone(),
            timestamp: Utc::now(),
        },
    );

    tracing::info!(
        decision = %report.detail.verdict.decision,
        consensus = report.detail.consensus_reached,
        votes_for = report.detail.votes_for,
        "committee has spoken"
    );

    Ok(report)
}
