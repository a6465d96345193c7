use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "journal")]
#[command(about = "Daily journal: one entry a day, keep the streak going")]
pub struct Cli {
    /// Use local in-memory data instead of the configured backend
    #[arg(long, global = true)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the current streak and whether today's entry is written
    Status,
    /// Write today's entry
    Submit {
        /// Entry text, up to 1000 characters
        content: String,
    },
    /// List past entries, latest first
    History,
    /// Show a single entry
    Show {
        /// Entry id as listed by `history`
        id: String,
    },
    /// Print config path and create default file if missing
    ConfigPath,
}
