mod commands;
mod config;
mod output;
mod validation;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "stockquotes")]
#[command(about = "Fetch historical daily stock quotes")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print daily quotes for a symbol over a date range
    History(commands::history::HistoryArgs),
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stockquotes=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::from_name(&cli.output);
    let config = Config::from_env()?;
    tracing::debug!("Using endpoint {}", config.base_url);

    match &cli.command {
        Commands::History(args) => commands::history::run(args, &config, &format)?,
    }

    Ok(())
}
