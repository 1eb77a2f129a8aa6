//! Implementation of the `sockmatch config show` command.

use crate::config::Config;
use crate::error::Result;
use std::path::Path;

/// Print the effective configuration (file plus environment) as YAML.
///
/// The bearer token is never printed.
pub fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = Config::resolve(config_path)?;
    print!("{}", config.to_yaml()?);
    Ok(())
}
