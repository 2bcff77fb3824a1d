//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sortlint",
    version,
    about = "Check and fix the sort order of JSON keys, string enums and string arrays",
    long_about = "Sortlint: lint and fix the order of JSON object keys, string-valued enums and string arrays using TOML policies.\n\nConfiguration precedence: CLI > sortlint.toml > defaults.\nSet SORTLINT_LOG (e.g. debug) for diagnostics on stderr.",
    after_help = "Examples:\n  sortlint lint --index conventions/index.toml\n  sortlint format --index conventions/index.toml --diff\n  sortlint format --check --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for linting and formatting.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current sortlint version."
    )]
    Version,
    /// Lint sort order using TOML policies
    #[command(
        about = "Run lint checks",
        long_about = "Report every member that is out of the configured order. Errors contribute to a non-zero exit.",
        after_help = "Examples:\n  sortlint lint --index conv/index.toml\n  sortlint lint --index conv/index.toml --output json"
    )]
    Lint {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Path to index.toml, relative to the repository root")]
        index: Option<String>,
    },
    /// Reorder members to satisfy policies
    #[command(
        about = "Apply sort fixes",
        long_about = "Reorder members per policy. When --diff or --check is set, write is disabled.",
        after_help = "Examples:\n  sortlint format --index conv/index.toml --diff\n  sortlint format --index conv/index.toml --write"
    )]
    Format {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Write changes to files")]
        write: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Show diffs for changed files (implies write=false)")]
        diff: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if changes would occur (implies write=false)")]
        check: bool,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Path to index.toml, relative to the repository root")]
        index: Option<String>,
    },
}
