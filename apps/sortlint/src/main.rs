//! Sortlint CLI binary entry point.
//! Delegates to library modules for lint/format and prints results.

use clap::Parser;
use sortlint::cli::{Cli, Commands};
use sortlint::config::{self, CliOverrides, Effective};
use sortlint::models::index::Index;
use sortlint::{format, lint, logging, output, utils, Result, SortlintError};
use std::collections::BTreeSet;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let outcome = match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Lint {
            repo_root,
            output,
            index,
        } => cmd_lint(&CliOverrides {
            repo_root: repo_root.as_deref(),
            index: index.as_deref(),
            output: output.as_deref(),
            ..CliOverrides::default()
        }),
        Commands::Format {
            repo_root,
            write,
            diff,
            check,
            output,
            index,
        } => cmd_format(&CliOverrides {
            repo_root: repo_root.as_deref(),
            index: index.as_deref(),
            output: output.as_deref(),
            write: write.then_some(true),
            diff: diff.then_some(true),
            check: check.then_some(true),
        }),
    };
    outcome.unwrap_or_else(fail)
}

fn fail(err: SortlintError) -> ExitCode {
    tracing::error!(error = %err, "command failed");
    eprintln!("{} {}", utils::error_prefix(), err);
    ExitCode::from(err.exit_code() as u8)
}

/// Resolve configuration, start logging, and print the usual notes.
fn prepare(cli: &CliOverrides<'_>) -> Result<Effective> {
    let eff = config::resolve_effective(cli)?;
    logging::init(&eff.log_level);
    let index = eff.index()?;
    if eff.output != "json" {
        if !eff.config_found {
            eprintln!("{} No sortlint.toml found; using defaults.", utils::note_prefix());
        }
        // Single top info when index default patterns are used (no overrides in sortlint.toml)
        if let Ok(ix) = Index::load(&eff.repo_root.join(index)) {
            let pat_set: BTreeSet<&str> = ix
                .rules
                .iter()
                .filter(|r| !eff.pattern_overrides.contains_key(&r.id))
                .flat_map(|r| r.patterns.iter().map(String::as_str))
                .collect();
            if !pat_set.is_empty() {
                eprintln!(
                    "{} Using default patterns: [{}]",
                    utils::info_prefix(),
                    pat_set.into_iter().collect::<Vec<_>>().join(", ")
                );
            }
        }
    }
    Ok(eff)
}

fn cmd_lint(cli: &CliOverrides<'_>) -> Result<ExitCode> {
    let eff = prepare(cli)?;
    let result = lint::run_lint(&eff.repo_root, eff.index()?, &eff.pattern_overrides)?;
    output::print_lint(&result, &eff.output);
    if result.summary.errors > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_format(cli: &CliOverrides<'_>) -> Result<ExitCode> {
    let eff = prepare(cli)?;
    // If diff or check is enabled, force write=false for this run.
    let write = eff.write && !(eff.diff || eff.check);
    let results = format::run_format(
        &eff.repo_root,
        eff.index()?,
        write,
        eff.diff || eff.check,
        &eff.pattern_overrides,
    )?;
    output::print_format(&results, &eff.output, write, eff.diff);
    if format::should_fail(&results, eff.check) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
