use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the page index.
    List(ListArgs),
    /// Print one page's descriptor.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Base URL or path holding `summary.json` (or the summary file itself).
    /// Defaults to $SCHEMA_BROWSER_BASE, then `./output`.
    #[arg(long, conflicts_with = "dir")]
    pub base: Option<String>,

    /// Local directory of JSON outputs to load as a file set.
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Page to show (default: the first loaded page).
    #[arg(long)]
    pub page: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
