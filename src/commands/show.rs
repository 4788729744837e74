//! Config command - displays the resolved configuration.

use anyhow::Result;

use crate::config::Config;

/// Execute the config command.
pub fn cmd_config(config: &Config, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        config.print();
    }
    Ok(())
}
