//! Deterministic tools the model may call during a conversation.
//!
//! Each tool is a pure function over fixed tables or simple arithmetic. The
//! [`Toolbox`] describes a set of tools to the model and executes the calls
//! it makes.

pub mod consensus;
pub mod lookup;

use crate::agent::{AgentKind, Vote};
use crate::error::{Result, SockError};
use crate::model::extract;
use crate::model::ToolDefinition;
use serde_json::{Map, Value, json};

pub use consensus::{ConsensusType, TallyResult, generate_compatibility_score, tally_votes};

/// Every tool the committee knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    ColorHexCode,
    ColorPsychology,
    MbtiCompatibility,
    ZodiacTraits,
    TallyVotes,
    CompatibilityScore,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::ColorHexCode,
        Tool::ColorPsychology,
        Tool::MbtiCompatibility,
        Tool::ZodiacTraits,
        Tool::TallyVotes,
        Tool::CompatibilityScore,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::ColorHexCode => "get_color_hex_code",
            Tool::ColorPsychology => "get_color_psychology",
            Tool::MbtiCompatibility => "get_mbti_compatibility",
            Tool::ZodiacTraits => "get_zodiac_traits",
            Tool::TallyVotes => "tally_votes",
            Tool::CompatibilityScore => "generate_compatibility_score",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tool::ColorHexCode => "Look up the canonical hex code for a color name.",
            Tool::ColorPsychology => {
                "Look up the psychological associations of a color name."
            }
            Tool::MbtiCompatibility => {
                "Look up which personality types a given MBTI type pairs best with."
            }
            Tool::ZodiacTraits => "Look up the character traits of a zodiac sign.",
            Tool::TallyVotes => {
                "Tally committee votes ('for', 'against', 'abstain') and report whether a \
                 majority consensus was reached."
            }
            Tool::CompatibilityScore => {
                "Combine committee scores into a weighted 0-100 compatibility score."
            }
        }
    }

    pub fn input_schema(&self) -> Value {
        let string_param = |name: &str, description: &str| {
            json!({
                "type": "object",
                "properties": { name: { "type": "string", "description": description } },
                "required": [name]
            })
        };

        match self {
            Tool::ColorHexCode | Tool::ColorPsychology => {
                string_param("color", "Color name, e.g. \"red\"")
            }
            Tool::MbtiCompatibility => string_param("mbti_type", "Four-letter MBTI type"),
            Tool::ZodiacTraits => string_param("sign", "Zodiac sign"),
            Tool::TallyVotes => json!({
                "type": "object",
                "properties": {
                    "votes": {
                        "type": "array",
                        "items": { "type": "string", "enum": ["for", "against", "abstain"] }
                    }
                },
                "required": ["votes"]
            }),
            Tool::CompatibilityScore => json!({
                "type": "object",
                "properties": {
                    "color_score": { "type": "number" },
                    "size_valid": { "type": "boolean" },
                    "personality_score": { "type": "number" },
                    "historical_score": { "type": "number" }
                },
                "required": ["color_score", "size_valid", "personality_score", "historical_score"]
            }),
        }
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }

    /// Run the tool against model-supplied input.
    pub fn run(&self, input: &Value) -> Result<Value> {
        let args = input.as_object().ok_or_else(|| {
            SockError::UserError(format!("{} expects a JSON object argument", self.name()))
        })?;

        let output = match self {
            Tool::ColorHexCode => json!(lookup::color_hex_code(required_str(args, "color")?)),
            Tool::ColorPsychology => json!(lookup::color_psychology(required_str(args, "color")?)),
            Tool::MbtiCompatibility => {
                json!(lookup::mbti_compatibility(required_str(args, "mbti_type")?))
            }
            Tool::ZodiacTraits => json!(lookup::zodiac_traits(required_str(args, "sign")?)),
            Tool::TallyVotes => {
                let votes = parse_votes(args)?;
                serde_json::to_value(tally_votes(&votes))
                    .map_err(|e| SockError::UserError(format!("failed to encode tally: {}", e)))?
            }
            Tool::CompatibilityScore => {
                let size_valid = args
                    .get("size_valid")
                    .and_then(Value::as_bool)
                    .unwrap_or(true);
                json!(generate_compatibility_score(
                    f64::from(extract::score(args.get("color_score"), 80)),
                    size_valid,
                    f64::from(extract::score(args.get("personality_score"), 85)),
                    f64::from(extract::score(args.get("historical_score"), 100)),
                ))
            }
        };

        Ok(output)
    }
}

fn required_str<'a>(args: &'a Map<String, Value>, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| SockError::UserError(format!("missing required string field '{}'", key)))
}

fn parse_votes(args: &Map<String, Value>) -> Result<Vec<Vote>> {
    let items = args
        .get("votes")
        .and_then(Value::as_array)
        .ok_or_else(|| SockError::UserError("missing required array field 'votes'".to_string()))?;

    items
        .iter()
        .map(|item| {
            // Accept bare votes or {agent, vote, confidence} records.
            let raw = match item {
                Value::Object(record) => record.get("vote").and_then(Value::as_str),
                other => other.as_str(),
            };
            raw.and_then(Vote::parse)
                .ok_or_else(|| SockError::UserError(format!("invalid vote: {}", item)))
        })
        .collect()
}

/// A set of tools offered to the model in one conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolbox {
    tools: Vec<Tool>,
}

impl Toolbox {
    pub fn new(tools: Vec<Tool>) -> Self {
        Self { tools }
    }

    /// Tools relevant to an agent's analysis. Deterministic agents get none.
    pub fn for_agent(kind: AgentKind) -> Self {
        let tools = match kind {
            AgentKind::Color => vec![Tool::ColorHexCode, Tool::ColorPsychology],
            AgentKind::Personality => vec![Tool::MbtiCompatibility, Tool::ZodiacTraits],
            AgentKind::Decision => vec![Tool::TallyVotes, Tool::CompatibilityScore],
            AgentKind::Size | AgentKind::Historical => Vec::new(),
        };
        Self::new(tools)
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(Tool::definition).collect()
    }

    /// Execute a call by name. Tools outside this box are rejected.
    pub fn call(&self, name: &str, input: &Value) -> Result<Value> {
        let tool = Tool::from_name(name)
            .filter(|tool| self.tools.contains(tool))
            .ok_or_else(|| SockError::UserError(format!("unknown tool '{}'", name)))?;

        tracing::debug!(tool = name, "running tool");
        tool.run(input)
    }
}

impl Default for Toolbox {
    fn default() -> Self {
        Self::new(Tool::ALL.to_vec())
    }
}

/// Render tool output as the text handed back to the model.
pub fn output_text(output: &Value) -> String {
    match output {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
        }
        assert_eq!(Tool::from_name("get_horoscope"), None);
    }

    #[test]
    fn agent_tool_sets() {
        let names = |kind| -> Vec<String> {
            Toolbox::for_agent(kind)
                .definitions()
                .into_iter()
                .map(|d| d.name)
                .collect()
        };

        assert_eq!(names(AgentKind::Color), ["get_color_hex_code", "get_color_psychology"]);
        assert_eq!(
            names(AgentKind::Personality),
            ["get_mbti_compatibility", "get_zodiac_traits"]
        );
        assert_eq!(
            names(AgentKind::Decision),
            ["tally_votes", "generate_compatibility_score"]
        );
        assert!(Toolbox::for_agent(AgentKind::Size).is_empty());
    }

    #[test]
    fn hex_tool_runs() {
        let output = Toolbox::default()
            .call("get_color_hex_code", &json!({"color": "RED"}))
            .unwrap();
        assert_eq!(output, json!("#FF0000"));
    }

    #[test]
    fn tally_tool_accepts_strings_and_records() {
        let output = Toolbox::default()
            .call(
                "tally_votes",
                &json!({"votes": [
                    "for",
                    {"agent": "SizeValidationAgent", "vote": "FOR", "confidence": 100},
                    "for",
                    "against",
                    "abstain"
                ]}),
            )
            .unwrap();
        assert_eq!(output["votesFor"], 3);
        assert_eq!(output["consensusType"], "majority");
    }

    #[test]
    fn score_tool_uses_weights() {
        let output = Toolbox::default()
            .call(
                "generate_compatibility_score",
                &json!({"color_score": 80, "size_valid": true, "personality_score": 85, "historical_score": 100}),
            )
            .unwrap();
        assert_eq!(output, json!(92));
    }

    #[test]
    fn bad_calls_are_errors() {
        let toolbox = Toolbox::for_agent(AgentKind::Color);
        assert!(toolbox.call("tally_votes", &json!({"votes": []})).is_err());
        assert!(toolbox.call("get_color_hex_code", &json!({})).is_err());
        assert!(toolbox.call("get_color_hex_code", &json!("red")).is_err());
        assert!(
            Toolbox::default()
                .call("tally_votes", &json!({"votes": ["maybe"]}))
                .is_err()
        );
    }

    #[test]
    fn output_text_unwraps_strings() {
        assert_eq!(output_text(&json!("#FF0000")), "#FF0000");
        assert_eq!(output_text(&json!(92)), "92");
    }
}
