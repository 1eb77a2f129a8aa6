//! Implementation of the `sockmatch tool` command.

use super::write_json;
use crate::cli::ToolArgs;
use crate::error::{Result, SockError};
use crate::tools::Toolbox;
use serde_json::Value;
use std::io::Write;

/// Run a committee tool with JSON arguments and print its result.
pub fn cmd_tool(args: ToolArgs) -> Result<()> {
    let stdout = std::io::stdout();
    run_tool(&args, &mut stdout.lock())
}

fn run_tool<W: Write>(args: &ToolArgs, out: &mut W) -> Result<()> {
    let input: Value = serde_json::from_str(&args.args).map_err(|e| {
        SockError::UserError(format!("tool arguments are not valid JSON: {}", e))
    })?;
    if !input.is_object() {
        return Err(SockError::UserError(
            "tool arguments must be a JSON object".to_string(),
        ));
    }

    let output = Toolbox::default().call(&args.name, &input)?;
    write_json(out, &output)
}
