//! Recreate command driver
//!
//! Reads a merged document, extracts every reconstructible file, and writes
//! them under the output directory.

use crate::cli::RecreateArgs;
use crate::core::error::{Error, Result};
use crate::merge;
use crate::output::{self, RecreateSummary};
use std::env;
use tracing::info;

/// Run the recreate command
pub fn run(args: RecreateArgs) -> Result<()> {
    let cwd = env::current_dir()?;

    let input = cwd.join(&args.input);
    if !input.exists() {
        return Err(Error::InputNotFound { path: input });
    }

    let document = std::fs::read_to_string(&input)?;
    let files = merge::extract(&document)?;
    info!(input = %input.display(), files = files.len(), "extracted");

    let output_dir = match args.output.clone() {
        Some(dir) => cwd.join(dir),
        None => cwd,
    };

    let outcome = merge::write_files(&files, &output_dir, args.dry_run, args.overwrite)?;

    let summary = RecreateSummary {
        files: outcome.files,
        total_size: outcome.total_size,
        total_size_human: output::format_bytes(outcome.total_size),
        skipped_existing: outcome.skipped_existing,
        output_dir: output_dir.display().to_string(),
        dry_run: args.dry_run,
    };
    if args.json {
        println!("{}", output::json::format(&summary));
    } else {
        print!("{}", output::human::format_recreate(&summary));
    }

    Ok(())
}
