//! Command implementations for sockmatch.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command writes its JSON or YAML result to stdout;
//! diagnostics go to stderr through `tracing`.

mod agent;
mod config;
mod tool;

use crate::agent::AgentKind;
use crate::cli::{Cli, Command, ConfigAction};
use crate::error::{Result, SockError};
use serde::Serialize;
use std::io::Write;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        config, command, ..
    } = cli;
    let config_path = config.as_deref();

    match command {
        Command::Color(args) => agent::cmd_agent(AgentKind::Color, args, config_path),
        Command::Personality(args) => agent::cmd_agent(AgentKind::Personality, args, config_path),
        Command::Size(args) => agent::cmd_agent(AgentKind::Size, args, config_path),
        Command::Historical(args) => agent::cmd_agent(AgentKind::Historical, args, config_path),
        Command::Decide(args) => agent::cmd_agent(AgentKind::Decision, args, config_path),
        Command::Tool(args) => tool::cmd_tool(args),
        Command::Config(cmd) => match cmd.action {
            ConfigAction::Show => config::cmd_config_show(config_path),
        },
    }
}

/// Write `value` as pretty JSON followed by a newline.
fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| SockError::IoError(format!("failed to serialize output: {}", e)))?;
    writeln!(out, "{}", json)
        .map_err(|e| SockError::IoError(format!("failed to write output: {}", e)))
}
