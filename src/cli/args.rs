//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    calc::CalcArgs,
    completions::CompletionsArgs,
    fit::FitCommands,
    import::ImportArgs,
    init::InitArgs,
    review::ReviewCommands,
    search::SearchCommands,
    submit::SubmitArgs,
    validate::ValidateArgs,
    veh::VehCommands,
};

#[derive(Parser)]
#[command(name = "tyredex")]
#[command(author, version, about = "Tyredex vehicle tyre-fitment catalog")]
#[command(
    long_about = "A Unix-style toolkit for maintaining a vehicle tyre-fitment catalog as plain text files, with size search and a tyre geometry calculator."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Catalog root (default: auto-detect by finding .tyredex/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new tyredex catalog
    Init(InitArgs),

    /// Vehicle management
    #[command(subcommand)]
    Veh(VehCommands),

    /// Tyre fitment management
    #[command(subcommand)]
    Fit(FitCommands),

    /// Tyre geometry calculator (diameter, circumference, alternatives)
    Calc(CalcArgs),

    /// Search vehicles by tyre size
    #[command(subcommand)]
    Search(SearchCommands),

    /// Submit a vehicle for review
    Submit(SubmitArgs),

    /// Review user submissions (list, approve, reject)
    #[command(subcommand)]
    Review(ReviewCommands),

    /// Import vehicles from a CSV file
    Import(ImportArgs),

    /// Validate catalog files
    Validate(ValidateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (yaml for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
