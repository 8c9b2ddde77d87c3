//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// maqal - Turn Arabic articles into styled markdown and metadata
#[derive(Parser, Debug)]
#[command(name = "maqal")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an article to markdown and metadata
    Process(ProcessArgs),

    /// Check API key, example files and output directory
    Doctor {
        /// Print machine-readable JSON output
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Article text file (reads stdin when omitted or "-")
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Base filename for the saved markdown, metadata and image
    #[arg(short, long)]
    pub filename: Option<String>,

    /// Author name to record in the metadata
    #[arg(short, long)]
    pub author: Option<String>,

    /// Article date, recorded verbatim
    #[arg(short, long, conflicts_with = "today")]
    pub date: Option<String>,

    /// Use today's date (e.g. "9 Jan 2025")
    #[arg(long)]
    pub today: bool,

    /// Cover image to copy next to the outputs
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Output directory (overrides general.output_dir)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Preview only, do not write any files
    #[arg(long)]
    pub no_save: bool,

    /// Print the result as JSON instead of a preview
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
