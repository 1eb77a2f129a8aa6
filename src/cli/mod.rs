//! CLI argument parsing for sockmatch.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Sockmatch: the Sock Matching Committee.
///
/// Each agent reads one sock, writes one JSON report to stdout and
/// announces its progress on the notification bus.
#[derive(Parser, Debug)]
#[command(name = "sockmatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// YAML configuration file. Environment variables override it.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for sockmatch.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a cultural essay about the sock's color and score it.
    Color(AgentArgs),

    /// Profile the sock's personality (MBTI, zodiac, ideal partner).
    Personality(AgentArgs),

    /// Check the sock's size against the ISO size table.
    Size(AgentArgs),

    /// Produce a historical trend report for the sock.
    Historical(AgentArgs),

    /// Deliberate over the committee's reports and render a verdict.
    ///
    /// Reads `parallelResults` and `historicalContext` from the input.
    Decide(AgentArgs),

    /// Run one of the committee's tools directly.
    Tool(ToolArgs),

    /// Configuration commands.
    Config(ConfigCommand),
}

/// Input options shared by every agent command.
#[derive(Args, Debug, Default)]
pub struct AgentArgs {
    /// JSON input file, or `-` for stdin.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Sock identifier (overrides the input file).
    #[arg(long)]
    pub sock_id: Option<String>,

    /// Sock color (overrides the input file).
    #[arg(long)]
    pub color: Option<String>,

    /// Sock size (overrides the input file).
    #[arg(long)]
    pub size: Option<String>,

    /// Offer the agent's lookup tools to the model.
    #[arg(long)]
    pub with_tools: bool,
}

/// Arguments for the `tool` command.
#[derive(Parser, Debug)]
pub struct ToolArgs {
    /// Tool name (e.g., get_color_hex_code, tally_votes).
    pub name: String,

    /// Tool arguments as a JSON object.
    #[arg(long, default_value = "{}")]
    pub args: String,
}

/// Config subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as YAML.
    Show,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
