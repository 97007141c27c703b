//! Shibboleth CLI - challenge/response judging from the terminal.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use shibboleth_core::types::Verdict;

#[derive(Parser)]
#[command(name = "shibboleth")]
#[command(author, version, about = "Shibboleth - word-affinity human/bot classifier", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Shibboleth project
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Issue a new riddle (replaces any outstanding one)
    Challenge,

    /// Submit a response to the outstanding riddle
    Respond {
        /// The response word
        word: String,

        /// Force the verdict instead of computing it
        #[arg(long, value_enum)]
        mode: Option<Mode>,
    },

    /// Add words to the vocabulary
    Insert {
        /// Words to add
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Remove words from the vocabulary
    Remove {
        /// Words to remove
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Show vocabulary and session statistics
    Stats,
}

/// Manual verdict labels for supervised adaptation.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Human,
    Machine,
}

impl From<Mode> for Verdict {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Human => Verdict::Human,
            Mode::Machine => Verdict::Machine,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Challenge => commands::challenge::run(),
        Commands::Respond { word, mode } => {
            commands::respond::run(&word, mode.map(Verdict::from))
        }
        Commands::Insert { words } => commands::insert::run(&words),
        Commands::Remove { words } => commands::remove::run(&words),
        Commands::Stats => commands::stats::run(),
    }
}
