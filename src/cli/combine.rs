//! Combine command driver
//!
//! Orchestrates one merge: walk the project, read and scan each file,
//! resolve offsets, assemble, and write the document.

use crate::cli::CombineArgs;
use crate::core::config::{
    Config, DEFAULT_SYSTEM_PROMPT, LLMS_TXT_SYSTEM_PROMPT, SAFETY_IGNORES,
};
use crate::core::error::{Error, Result};
use crate::merge::{self, MergeOptions, SourceFile};
use crate::output::{self, CombineSummary};
use crate::scan;
use crate::walk::{gitmodule_paths, FileWalker, WalkedFile};
use glob::Pattern;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

/// Run the combine command
pub fn run(args: CombineArgs) -> Result<()> {
    let config = Config::load()?;

    let root = match args.project.clone() {
        Some(p) => p,
        None => env::current_dir()?,
    }
    .canonicalize()?;

    let output_name = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.combine.output));
    let output_path = root.join(&output_name);

    if !args.json {
        println!("codemerge v{}", env!("CARGO_PKG_VERSION"));
        println!("Root: {}", root.display());
    }
    info!(root = %root.display(), output = %output_path.display(), "combining");

    // Ignore rules: safety list, config, -e globs, gitmodule paths
    let mut excludes: Vec<String> = SAFETY_IGNORES.iter().map(|s| s.to_string()).collect();
    excludes.extend(config.ignore.patterns.iter().cloned());
    if let Some(extra) = &args.exclude {
        excludes.extend(split_list(extra));
    }
    excludes.extend(gitmodule_paths(&root));

    let mut walker = FileWalker::new(&root)
        .gitignore(!args.no_gitignore)
        .excludes(excludes)
        .skip_path(&output_path);
    if let Some(exts) = &args.include_ext {
        walker = walker.include_exts(split_list(exts));
    }

    let (walked, skipped) = walker.walk()?;
    if walked.is_empty() {
        return Err(Error::NoFilesToInclude);
    }

    let skip_globs = skip_content_globs(&config, args.skip_content.as_deref())?;
    let parse_enabled = !args.no_parse && config.combine.parse;

    let mut files: Vec<SourceFile> = walked
        .iter()
        .map(|w| read_file(w, &skip_globs, parse_enabled))
        .collect();

    let prompt = if args.llms_txt {
        LLMS_TXT_SYSTEM_PROMPT
    } else {
        DEFAULT_SYSTEM_PROMPT
    };
    let opts = MergeOptions {
        prompt: prompt.to_string(),
        header: !args.no_header,
        parse: parse_enabled,
        root_name: root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "project".to_string()),
    };

    let code_index = merge::resolve(&mut files, &opts);

    let omitted = files.iter().filter(|f| f.is_omitted()).count();
    let total_size: u64 = files
        .iter()
        .filter(|f| !f.is_omitted())
        .map(|f| f.size)
        .sum();

    if args.dry_run {
        let summary = CombineSummary {
            files: files.len(),
            total_size,
            total_size_human: output::format_bytes(total_size),
            omitted,
            skipped,
            output: None,
            total_lines: None,
            dry_run: true,
        };
        if args.json {
            println!("{}", output::json::format(&summary));
        } else {
            println!("\nFiles to include (dry run):\n");
            print!("{}", code_index);
            print!("{}", output::human::format_combine(&summary));
        }
        return Ok(());
    }

    let document = merge::assemble(&files, &code_index, &opts);
    std::fs::write(&output_path, &document.text)?;
    info!(
        files = files.len(),
        lines = document.total_lines,
        "document written"
    );

    let summary = CombineSummary {
        files: files.len(),
        total_size,
        total_size_human: output::format_bytes(total_size),
        omitted,
        skipped,
        output: Some(output_path.display().to_string()),
        total_lines: Some(document.total_lines),
        dry_run: false,
    };
    if args.json {
        println!("{}", output::json::format(&summary));
    } else {
        print!("{}", output::human::format_combine(&summary));
    }

    Ok(())
}

/// Read one walked file into a SourceFile, scanning it when enabled.
fn read_file(walked: &WalkedFile, skip_globs: &[Pattern], parse_enabled: bool) -> SourceFile {
    let rel_str = walked.rel_str();

    if skip_globs.iter().any(|p| p.matches(&rel_str)) {
        return SourceFile::omitted(rel_str, walked.size, walked.formatted_size.clone());
    }

    match std::fs::read_to_string(&walked.abs) {
        Ok(content) => {
            let elements = if parse_enabled {
                let lines = merge::split_lines(&content);
                scan::nest(scan::scan(&walked.rel, &lines))
            } else {
                Vec::new()
            };
            let mut file = SourceFile::with_content(
                rel_str,
                content,
                walked.size,
                walked.formatted_size.clone(),
            );
            file.elements = elements;
            file
        }
        Err(e) => {
            warn!(path = %walked.abs.display(), error = %e, "failed to read file");
            SourceFile::unreadable(rel_str, &e, walked.size, walked.formatted_size.clone())
        }
    }
}

/// Compile the content-omission predicate from config and CLI patterns.
fn skip_content_globs(config: &Config, cli_patterns: Option<&str>) -> Result<Vec<Pattern>> {
    let mut patterns: Vec<String> = config.skip.patterns.clone();
    if let Some(extra) = cli_patterns {
        patterns.extend(split_list(extra));
    }
    patterns
        .iter()
        .map(|p| Pattern::new(p).map_err(Error::from))
        .collect()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_trims_and_drops_empties() {
        assert_eq!(split_list(" .py, .js ,,"), vec![".py", ".js"]);
        assert!(split_list("").is_empty());
    }
}
