//! `mediapost call` -- dispatch one tool call from the command line.

use anyhow::Context;
use clap::Args;
use mediapost_gateway::{Dispatcher, GatewayError};
use mediapost_types::GatewayConfig;
use serde_json::{Map, Value};

/// Arguments for the `mediapost call` subcommand.
#[derive(Args)]
pub struct CallArgs {
    /// Tool name, e.g. `publish_to_wechat`.
    pub tool: String,

    /// Tool arguments: a JSON object, or `key=value,key=value`
    /// (nested credentials need JSON).
    pub args: Option<String>,
}

/// Run the call and print the result. Returns `false` for an unknown tool.
pub async fn run(args: CallArgs, config: &GatewayConfig) -> anyhow::Result<bool> {
    let tool_args = parse_args(args.args.as_deref())?;
    let dispatcher = Dispatcher::new(config)?;

    match dispatcher.dispatch(&args.tool, tool_args).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(true)
        }
        Err(err @ GatewayError::UnknownTool(_)) => {
            eprintln!("{err}");
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

/// Parse command-line tool arguments.
pub fn parse_args(raw: Option<&str>) -> anyhow::Result<Value> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(Value::Object(Map::new()));
    };

    if raw.starts_with('{') {
        return serde_json::from_str(raw).context("tool arguments are not valid JSON");
    }

    let mut map = Map::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("expected key=value, got `{pair}`"))?;
        map.insert(key.trim().to_owned(), Value::String(value.trim().to_owned()));
    }
    Ok(Value::Object(map))
}
