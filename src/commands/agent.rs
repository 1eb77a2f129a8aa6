//! Implementation of the agent commands (`color`, `personality`, `size`,
//! `historical`, `decide`).

use super::write_json;
use crate::agent::{AgentKind, Clients, color, decision, historical, personality, size};
use crate::cli::AgentArgs;
use crate::config::Config;
use crate::error::{Result, SockError};
use crate::events::EventBus;
use crate::input::SockInput;
use crate::model::BedrockClient;
use serde_json::{Value, json};
use std::io::Write;

/// Execute one committee member against the invocation input.
///
/// The agent's report is printed to stdout. On failure the abstaining
/// failure record is printed instead and the error is returned so the
/// process exits non-zero.
pub fn cmd_agent(kind: AgentKind, args: AgentArgs, config_path: Option<&std::path::Path>) -> Result<()> {
    let mut config = Config::resolve(config_path)?;
    if args.with_tools {
        config.tools_enabled = true;
    }

    let input = load_input(args)?;
    let model = BedrockClient::new(&config)?;
    let bus = EventBus::from_config(&config)?;
    let clients = Clients::new(&model, &bus, &config);

    let stdout = std::io::stdout();
    run_and_print(kind, &clients, &input, &mut stdout.lock())
}

/// Build the invocation input from `--input` and the field flags.
fn load_input(args: AgentArgs) -> Result<SockInput> {
    let AgentArgs {
        input,
        sock_id,
        color,
        size,
        ..
    } = args;

    let base = match input {
        Some(path) => SockInput::read_from(&path)?,
        None if sock_id.is_none() && color.is_none() && size.is_none() => {
            return Err(SockError::UserError(
                "no sock given: pass --input <file|-> or --sock-id/--color/--size".to_string(),
            ));
        }
        None => SockInput::from_value(json!({})),
    };

    Ok(base.with_overrides(sock_id, color, size))
}

fn run(kind: AgentKind, clients: &Clients<'_>, input: &SockInput) -> Result<Value> {
    let value = match kind {
        AgentKind::Color => serde_json::to_value(color::analyze(clients, input)?),
        AgentKind::Size => serde_json::to_value(size::validate(clients, input)?),
        AgentKind::Personality => serde_json::to_value(personality::analyze(clients, input)?),
        AgentKind::Historical => serde_json::to_value(historical::analyze(clients, input)?),
        AgentKind::Decision => serde_json::to_value(decision::decide(clients, input)?),
    };
    value.map_err(|e| SockError::IoError(format!("failed to serialize report: {}", e)))
}

fn run_and_print<W: Write>(
    kind: AgentKind,
    clients: &Clients<'_>,
    input: &SockInput,
    out: &mut W,
) -> Result<()> {
    match run(kind, clients, input) {
        Ok(report) => write_json(out, &report),
        Err(err) => {
            // The agent's error decides the exit code, even if the record is lost.
            if let Some(record) = err.failure_report()
                && let Err(write_err) = write_json(out, record)
            {
                tracing::warn!(error = %write_err, "failed to print failure record");
            }
            Err(err)
        }
    }
}
