//! ColorAnalysisAgent: a PhD in chromatics, applied to one sock.

use super::prompt::{self, vars};
use super::runner::{Outcome, run_agent};
use super::{AgentKind, AgentReport, Clients, Vote};
use crate::error::Result;
use crate::input::SockInput;
use crate::model::extract::{self, extract_json};
use serde::Serialize;

const FIXED_COST: f64 = 0.003;
const ESSAY_FALLBACK_CHARS: usize = 500;

const PROMPT: &str = r#"You are Dr. Chromatius, a color theory expert with a PhD in chromatics and 20 years of experience in textile analysis.

Analyze the color "{color}" for a sock. Provide:
1. A validity score (0-100) for whether this is a real, recognizable color
2. A 200-word essay on its cultural significance, psychological impact, and historical context in fashion
3. A suggested hex code that best represents this color
{tool_hint}
Format your response as JSON:
{{
  "validityScore": <number 0-100>,
  "culturalEssay": "<200-word essay>",
  "hexCode": "<hex code>",
  "colorFamily": "<primary color family>",
  "mood": "<emotional association>"
}}

Be thorough and take this analysis VERY seriously."#;

const TOOL_HINT: &str = "\nYou have reference tools for canonical hex codes and color psychology. Consult them before answering.\n";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorAnalysis {
    pub validity_score: u8,
    pub cultural_essay: String,
    pub hex_code: String,
    pub color_family: String,
    pub mood: String,
}

impl ColorAnalysis {
    /// Interpret the model's answer. Never fails: prose becomes the essay.
    pub fn from_model_text(raw: &str) -> Self {
        match extract_json(raw) {
            Some(map) => Self {
                validity_score: extract::score(map.get("validityScore"), 85),
                cultural_essay: extract::text(&map, "culturalEssay", ""),
                hex_code: extract::text(&map, "hexCode", "#808080"),
                color_family: extract::text(&map, "colorFamily", "unknown"),
                mood: extract::text(&map, "mood", "neutral"),
            },
            None => {
                tracing::warn!("color analysis was not JSON; using default record");
                Self {
                    validity_score: 85,
                    cultural_essay: extract::truncate_chars(raw, ESSAY_FALLBACK_CHARS),
                    hex_code: "#808080".to_string(),
                    color_family: "unknown".to_string(),
                    mood: "neutral".to_string(),
                }
            }
        }
    }
}

pub fn build_prompt(input: &SockInput, with_tools: bool) -> Result<String> {
    let hint = if with_tools { TOOL_HINT } else { "" };
    Ok(prompt::render(
        PROMPT,
        &vars([("color", input.color.clone()), ("tool_hint", hint.to_string())]),
    )?)
}

/// Score the sock's color and commission an essay about it.
pub fn analyze(clients: &Clients<'_>, input: &SockInput) -> Result<AgentReport<ColorAnalysis>> {
    run_agent(AgentKind::Color, clients.bus, input, || {
        let prompt = build_prompt(input, clients.tools_enabled())?;
        let completion = clients.complete(AgentKind::Color, &prompt)?;
        let analysis = ColorAnalysis::from_model_text(&completion.text);

        Ok(Outcome::metered(
            Vote::from_score(analysis.validity_score),
            analysis.validity_score,
            completion.usage,
            FIXED_COST,
            analysis,
        ))
    })
}
