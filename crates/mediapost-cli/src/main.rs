//! `mediapost` -- CLI binary for the mediapost publishing gateway.
//!
//! Provides the following subcommands:
//!
//! - `mediapost serve` -- Serve the publishing tools over stdio (the default).
//! - `mediapost tools` -- Print the tool definitions.
//! - `mediapost call` -- Dispatch a single tool call and print the result.

use clap::{Parser, Subcommand};

mod commands;

/// Multi-platform publishing gateway.
#[derive(Parser)]
#[command(name = "mediapost", about = "Multi-platform publishing gateway", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Serve the publishing tools over stdin/stdout.
    Serve,

    /// Print the tool definitions as JSON.
    Tools,

    /// Dispatch one tool call and print the result.
    Call(commands::call::CallArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the protocol, so logs go to stderr.
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = commands::load_config(cli.config.as_deref()).await?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::run(&config).await?,
        Commands::Tools => commands::tools::run()?,
        Commands::Call(args) => {
            if !commands::call::run(args, &config).await? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
