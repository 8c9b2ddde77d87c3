//! maqal - Arabic article to markdown and metadata
//!
//! Entry point for the maqal CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use maqal::cli::{Cli, Commands};
use maqal::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        // Needs neither configuration nor logging
        Commands::Completions { shell } => {
            maqal::cli::completions::print(shell);
        }
        Commands::Process(args) => {
            let settings = init(cli.verbose)?;
            maqal::cli::commands::process_article(&settings, args).await?;
        }
        Commands::Doctor { json } => {
            let settings = init(cli.verbose)?;
            maqal::cli::commands::run_doctor(&settings, json).await?;
        }
        Commands::Config(config_cmd) => {
            let settings = init(cli.verbose)?;
            maqal::cli::commands::config_command(&settings, config_cmd)?;
        }
    }

    Ok(())
}

/// Load configuration and initialize logging for runtime commands.
fn init(verbose: bool) -> Result<Settings> {
    let settings = Settings::load()?;

    let default_level = if verbose {
        "debug"
    } else {
        settings.general.log_level.as_str()
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    Ok(settings)
}
