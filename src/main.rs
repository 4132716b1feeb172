//! codemerge CLI entry point

use clap::Parser;
use codemerge::cli::{Cli, Commands};
use codemerge::core::error::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("CODEMERGE_LOG"))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Combine(args) => codemerge::cli::combine::run(args),
        Commands::Recreate(args) => codemerge::cli::recreate::run(args),
    }
}
