//! CLI command definitions and handlers

pub mod combine;
pub mod recreate;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

const LONG_ABOUT: &str = r#"
Merge a project's source into one annotated document - and back.

The document carries a <code_index> map of classes, functions, and loops
with dual line references (OL = line in the original file, ML = line in
the merged document), followed by every file's content between
four-backtick fences.

QUICK START:
    1. codemerge combine              Merge the current directory
    2. codemerge recreate             Rebuild the files from codemerge.txt

COMBINE:
    codemerge combine                 Write codemerge.txt with prompt + index
    codemerge combine --no-header     Document only, no prompt or index
    codemerge combine --no-parse      File tree only, no code structure
    codemerge combine --skip-content "*.lock,dist/*"
                                      List matching files but omit their body

RECREATE:
    codemerge recreate                Restore files next to codemerge.txt
    codemerge recreate -o out/        Restore into a directory
    codemerge recreate --overwrite    Replace files that already exist

EXAMPLES:
    codemerge combine -i .py,.rs      Only merge Python and Rust sources
    codemerge combine -e "docs,*.md"  Extra ignore globs
    codemerge combine -d              Preview the index without writing
    codemerge recreate -d --json      Machine-readable dry-run listing
"#;

/// Merge source files into one annotated, reversible document
#[derive(Parser, Debug)]
#[command(name = "codemerge")]
#[command(author, version)]
#[command(about = "Merge source files into one annotated, reversible document")]
#[command(long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge project files into a single annotated document
    #[command(visible_alias = "c")]
    Combine(CombineArgs),

    /// Recreate project files from a merged document
    #[command(visible_alias = "r")]
    Recreate(RecreateArgs),
}

/// Arguments for the combine command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    codemerge combine                      Merge into codemerge.txt
    codemerge combine -o context.txt       Custom output file
    codemerge combine -i .py,.js           Only these extensions
    codemerge combine --skip-content \"*.min.js\"
                                           Keep in tree, omit the body")]
pub struct CombineArgs {
    /// Output file (default from config, else codemerge.txt)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Project root (default: current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Preview without writing anything
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Comma-separated extensions to exclusively include (e.g. .py,.js)
    #[arg(short = 'i', long)]
    pub include_ext: Option<String>,

    /// Comma-separated extra glob patterns to exclude
    #[arg(short = 'e', long)]
    pub exclude: Option<String>,

    /// Use the system prompt for llms.txt context
    #[arg(short = 'l', long)]
    pub llms_txt: bool,

    /// Do not use patterns from .gitignore files
    #[arg(long)]
    pub no_gitignore: bool,

    /// Omit the introductory prompt and code index
    #[arg(long)]
    pub no_header: bool,

    /// Comma-separated globs for files listed in the tree but with content omitted
    #[arg(long)]
    pub skip_content: Option<String>,

    /// Disable code structure scanning (file tree only)
    #[arg(long)]
    pub no_parse: bool,

    /// JSON summary output
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the recreate command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    codemerge recreate                     Restore from codemerge.txt
    codemerge recreate --input ctx.txt     Custom input document
    codemerge recreate -o restored/        Restore into a directory
    codemerge recreate --overwrite         Replace existing files")]
pub struct RecreateArgs {
    /// Input merged document
    #[arg(long, default_value = "codemerge.txt")]
    pub input: PathBuf,

    /// Output directory (default: current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// List files without writing anything
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Overwrite existing files
    #[arg(long)]
    pub overwrite: bool,

    /// JSON summary output
    #[arg(long)]
    pub json: bool,
}
