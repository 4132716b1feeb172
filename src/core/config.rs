//! Configuration management
//!
//! The system prompts and the safety ignore list live here as immutable
//! values that get passed into the pipeline; nothing in the merge core
//! reads them as hidden state.

use crate::core::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prompt placed at the top of a merged document by default.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are an expert software architect. The user is providing you with the complete source code for a project, contained in a single file. Your task is to meticulously analyze the provided codebase to gain a comprehensive understanding of its structure, functionality, dependencies, and overall architecture.

A code map with expanded tree structure `<code_index>` is provided below to give you a high-level overview. The subsequent section `<merged_code>` contain the full content of each file (read using the command `sed -n '<ML_START>,<ML_END>p' codemerge.txt`), clearly marked with a file header.

Your instructions are:
1.  Analyze Thoroughly: Read through every file to understand its purpose and how it interacts with other files.
2.  Identify Key Components: Pay close attention to configuration files (like package.json, pyproject.toml), entry points (like index.js, main.py), and core logic.
3.  Use the Code Map: The code map shows classes, functions, loops with their line numbers (OL = Original Line, ML = Merged Line) and sizes for precise navigation.";

/// Prompt used when the merged document carries llms.txt documentation.
pub const LLMS_TXT_SYSTEM_PROMPT: &str = "\
You are an expert software architect. The user is providing you with the full documentation for a project. This file contains the complete context needed to understand the project's features, APIs, and usage for a specific version. Your task is to act as a definitive source of truth based *only* on this provided documentation.

When answering questions or writing code, adhere strictly to the functions, variables, and methods described in this context. Do not use or suggest any deprecated or older functionalities that are not present here.

A code map with expanded tree structure is provided below for a high-level overview.";

/// Always-excluded paths, applied even with `--no-gitignore`.
pub const SAFETY_IGNORES: &[&str] = &[".git", ".DS_Store"];

/// Default name of the merged document.
pub const DEFAULT_OUTPUT: &str = "codemerge.txt";

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub combine: CombineConfig,
    pub ignore: IgnoreConfig,
    pub skip: SkipConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineConfig {
    /// Default output file name
    pub output: String,
    /// Scan code structure by default
    pub parse: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Extra ignore globs applied on every combine
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SkipConfig {
    /// Globs for files whose content is omitted (tree/index entry only)
    pub patterns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            combine: CombineConfig::default(),
            ignore: IgnoreConfig::default(),
            skip: SkipConfig::default(),
        }
    }
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            output: DEFAULT_OUTPUT.to_string(),
            parse: true,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = Self::codemerge_home()?;
        Ok(home.join("config.toml"))
    }

    /// Get the codemerge home directory
    pub fn codemerge_home() -> Result<PathBuf> {
        // Check CODEMERGE_HOME env var first
        if let Ok(home) = std::env::var("CODEMERGE_HOME") {
            return Ok(PathBuf::from(home));
        }

        // Use XDG directories
        ProjectDirs::from("dev", "codemerge", "codemerge")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| Error::ConfigError {
                message: "Could not determine codemerge home directory".to_string(),
            })
    }
}
