//! PersonalityAnalyzerAgent: profiles the inner life of a sock.

use super::prompt::{self, vars};
use super::runner::{Outcome, run_agent};
use super::{AgentKind, AgentReport, Clients, Vote};
use crate::error::Result;
use crate::input::SockInput;
use crate::model::extract::{self, extract_json};
use serde::Serialize;

const FIXED_COST: f64 = 0.003;
const SUMMARY_FALLBACK_CHARS: usize = 200;

const PROMPT: &str = r#"You are Professor Sockmund Freud, a renowned sock psychologist with expertise in textile personality theory.

Based on this sock's attributes:
- Color: {color}
- Size: {size}

Create a detailed personality profile for this sock. Include:
1. Myers-Briggs Type Indicator (MBTI) - which of the 16 types best fits this sock?
2. Zodiac sign - based on the color's energy and size's groundedness
3. Top 5 personality traits
4. Favorite music genre
5. Ideal partner sock characteristics
6. Compatibility score potential (0-100)
7. A brief personality summary (50 words)
{tool_hint}
Be creative but commit fully to the analysis as if socks truly have personalities.

Format as JSON:
{{
  "mbtiType": "<4-letter type>",
  "zodiacSign": "<sign>",
  "traits": ["trait1", "trait2", "trait3", "trait4", "trait5"],
  "musicGenre": "<genre>",
  "idealPartner": "<description>",
  "compatibilityPotential": <number 0-100>,
  "personalitySummary": "<50-word summary>"
}}"#;

const TOOL_HINT: &str = "\nYou have reference tools for MBTI compatibility and zodiac traits. Use them to ground your profile.\n";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityProfile {
    pub mbti_type: String,
    pub zodiac_sign: String,
    pub traits: Vec<String>,
    pub music_genre: String,
    pub ideal_partner: String,
    pub compatibility_potential: u8,
    pub personality_summary: String,
}

impl PersonalityProfile {
    pub fn from_model_text(raw: &str) -> Self {
        let Some(map) = extract_json(raw) else {
            tracing::warn!("personality profile was not JSON; using default record");
            return Self::fallback(raw);
        };

        Self {
            mbti_type: extract::text(&map, "mbtiType", "ENFP"),
            zodiac_sign: extract::text(&map, "zodiacSign", "Sagittarius"),
            traits: extract::string_list(&map, "traits"),
            music_genre: extract::text(&map, "musicGenre", "Unknown"),
            ideal_partner: extract::text(&map, "idealPartner", ""),
            compatibility_potential: extract::score(map.get("compatibilityPotential"), 85),
            personality_summary: extract::text(&map, "personalitySummary", ""),
        }
    }

    fn fallback(raw: &str) -> Self {
        Self {
            mbti_type: "ENFP".to_string(),
            zodiac_sign: "Sagittarius".to_string(),
            traits: ["adventurous", "warm", "reliable", "cozy", "supportive"]
                .map(String::from)
                .to_vec(),
            music_genre: "Indie Folk".to_string(),
            ideal_partner: "A sock of matching color with complementary energy".to_string(),
            compatibility_potential: 85,
            personality_summary: extract::truncate_chars(raw, SUMMARY_FALLBACK_CHARS),
        }
    }
}

pub fn build_prompt(input: &SockInput, with_tools: bool) -> Result<String> {
    let hint = if with_tools { TOOL_HINT } else { "" };
    Ok(prompt::render(
        PROMPT,
        &vars([
            ("color", input.color.clone()),
            ("size", input.size.clone()),
            ("tool_hint", hint.to_string()),
        ]),
    )?)
}

/// Derive the sock's MBTI type, star sign and romantic prospects.
pub fn analyze(
    clients: &Clients<'_>,
    input: &SockInput,
) -> Result<AgentReport<PersonalityProfile>> {
    run_agent(AgentKind::Personality, clients.bus, input, || {
        let prompt = build_prompt(input, clients.tools_enabled())?;
        let completion = clients.complete(AgentKind::Personality, &prompt)?;
        let profile = PersonalityProfile::from_model_text(&completion.text);
        tracing::debug!(mbti = %profile.mbti_type, zodiac = %profile.zodiac_sign, "profile parsed");

        Ok(Outcome::metered(
            Vote::from_score(profile.compatibility_potential),
            profile.compatibility_potential,
            completion.usage,
            FIXED_COST,
            profile,
        ))
    })
}
