//! `mediapost tools` -- print the tool definitions.

use mediapost_gateway::tool_definitions;

pub fn run() -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&tool_definitions())?);
    Ok(())
}
