//! Project File Walker
//!
//! Collects the ordered file list one merge invocation works from. Respects
//! per-directory `.gitignore` chains (toggleable), user exclude globs, the
//! safety ignore list, and `.gitmodules` submodule paths. Hidden files are
//! included unless a rule says otherwise. Likely-binary files and the output
//! document itself never make the list.
//!
//! @module walk

use crate::core::error::Result;
use crate::output::format_bytes;
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A file selected for merging, with both coordinate paths and its size.
#[derive(Debug, Clone)]
pub struct WalkedFile {
    /// Absolute path on disk
    pub abs: PathBuf,
    /// Path relative to the project root
    pub rel: PathBuf,
    /// Size on disk in bytes
    pub size: u64,
    /// Human-formatted size
    pub formatted_size: String,
}

impl WalkedFile {
    /// Relative path with forward slashes, the pipeline's unique key.
    pub fn rel_str(&self) -> String {
        self.rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Walks project files for one combine invocation
pub struct FileWalker {
    root: PathBuf,
    use_gitignore: bool,
    excludes: Vec<String>,
    allowed_exts: Option<HashSet<String>>,
    skip_paths: Vec<PathBuf>,
}

impl FileWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            use_gitignore: true,
            excludes: Vec::new(),
            allowed_exts: None,
            skip_paths: Vec::new(),
        }
    }

    /// Toggle `.gitignore` evaluation
    pub fn gitignore(mut self, enabled: bool) -> Self {
        self.use_gitignore = enabled;
        self
    }

    /// Add ignore globs (safety list, config, `-e`, `.gitmodules` paths)
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Restrict to the given extensions (leading dot optional)
    pub fn include_exts<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: HashSet<String> = exts
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        if !set.is_empty() {
            self.allowed_exts = Some(set);
        }
        self
    }

    /// Never include this absolute path (the output document)
    pub fn skip_path(mut self, path: &Path) -> Self {
        self.skip_paths.push(path.to_path_buf());
        self
    }

    /// Walk the project and return the sorted file list plus the number of
    /// entries this walker skipped itself (binary, filtered, self-output).
    pub fn walk(&self) -> Result<(Vec<WalkedFile>, usize)> {
        let mut overrides = OverrideBuilder::new(&self.root);
        for pattern in &self.excludes {
            // A leading "!" marks an ignore pattern in override globs.
            overrides.add(&format!("!{}", pattern))?;
        }
        let overrides = overrides.build()?;

        let walker = WalkBuilder::new(&self.root)
            .hidden(false) // dotfiles are fair game unless a rule says no
            .git_ignore(self.use_gitignore)
            .git_global(false)
            .git_exclude(false)
            .parents(false)
            .require_git(false)
            .overrides(overrides)
            .build();

        let mut files = Vec::new();
        let mut skipped = 0usize;

        for entry in walker.flatten() {
            let path = entry.path();
            if path.is_dir() {
                continue;
            }

            if self.skip_paths.iter().any(|s| s == path) {
                skipped += 1;
                continue;
            }

            if let Some(allowed) = &self.allowed_exts {
                let ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("")
                    .to_lowercase();
                if !allowed.contains(&ext) {
                    skipped += 1;
                    continue;
                }
            }

            if is_likely_binary(path) {
                debug!(path = %path.display(), "skipping likely-binary file");
                skipped += 1;
                continue;
            }

            let size = match path.metadata() {
                Ok(meta) => meta.len(),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to stat file");
                    skipped += 1;
                    continue;
                }
            };

            let rel = match path.strip_prefix(&self.root) {
                Ok(rel) => rel.to_path_buf(),
                Err(_) => continue,
            };

            files.push(WalkedFile {
                abs: path.to_path_buf(),
                rel,
                size,
                formatted_size: format_bytes(size),
            });
        }

        files.sort_by(|a, b| a.rel.cmp(&b.rel));
        Ok((files, skipped))
    }
}

/// A file is likely binary when its first KiB contains a NUL byte.
/// Unreadable files count as binary.
pub fn is_likely_binary(path: &Path) -> bool {
    let mut buf = [0u8; 1024];
    match std::fs::File::open(path) {
        Ok(mut f) => match f.read(&mut buf) {
            Ok(n) => buf[..n].contains(&0),
            Err(_) => true,
        },
        Err(_) => true,
    }
}

/// Submodule paths from `.gitmodules`, to be excluded from the walk.
pub fn gitmodule_paths(root: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(root.join(".gitmodules")) else {
        return Vec::new();
    };

    let mut paths = Vec::new();
    for line in content.lines() {
        if let Some((key, value)) = line.split_once('=') {
            if key.trim() == "path" {
                paths.push(value.trim().to_string());
            }
        }
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_walk_sorted_relative_paths() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "b.py", b"x\n");
        touch(temp.path(), "a/c.py", b"y\n");

        let (files, _) = FileWalker::new(temp.path()).walk().unwrap();
        let rels: Vec<String> = files.iter().map(|f| f.rel_str()).collect();
        assert_eq!(rels, vec!["a/c.py", "b.py"]);
    }

    #[test]
    fn test_walk_respects_gitignore() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), ".gitignore", b"ignored.txt\n");
        touch(temp.path(), "ignored.txt", b"gone\n");
        touch(temp.path(), "kept.txt", b"here\n");

        let (files, _) = FileWalker::new(temp.path())
            .excludes([".gitignore"])
            .walk()
            .unwrap();
        let rels: Vec<String> = files.iter().map(|f| f.rel_str()).collect();
        assert_eq!(rels, vec!["kept.txt"]);
    }

    #[test]
    fn test_walk_gitignore_disabled() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), ".gitignore", b"ignored.txt\n");
        touch(temp.path(), "ignored.txt", b"present\n");

        let (files, _) = FileWalker::new(temp.path())
            .gitignore(false)
            .excludes([".gitignore"])
            .walk()
            .unwrap();
        let rels: Vec<String> = files.iter().map(|f| f.rel_str()).collect();
        assert_eq!(rels, vec!["ignored.txt"]);
    }

    #[test]
    fn test_walk_skips_binary_and_counts_it() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "data.bin", b"ab\0cd");
        touch(temp.path(), "text.txt", b"hello\n");

        let (files, skipped) = FileWalker::new(temp.path()).walk().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].rel_str(), "text.txt");
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_walk_extension_filter() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.py", b"x\n");
        touch(temp.path(), "b.js", b"y\n");

        let (files, skipped) = FileWalker::new(temp.path())
            .include_exts([".py"])
            .walk()
            .unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].rel_str(), "a.py");
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_walk_excludes_output_file() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.py", b"x\n");
        touch(temp.path(), "merged.txt", b"old run\n");

        let (files, _) = FileWalker::new(temp.path())
            .skip_path(&temp.path().join("merged.txt"))
            .walk()
            .unwrap();
        let rels: Vec<String> = files.iter().map(|f| f.rel_str()).collect();
        assert_eq!(rels, vec!["a.py"]);
    }

    #[test]
    fn test_walk_exclude_globs() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/a.py", b"x\n");
        touch(temp.path(), "vendor/lib.py", b"y\n");

        let (files, _) = FileWalker::new(temp.path())
            .excludes(["vendor"])
            .walk()
            .unwrap();
        let rels: Vec<String> = files.iter().map(|f| f.rel_str()).collect();
        assert_eq!(rels, vec!["src/a.py"]);
    }

    #[test]
    fn test_walk_includes_hidden_files() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), ".env", b"SECRET=1\n");

        let (files, _) = FileWalker::new(temp.path()).walk().unwrap();
        let rels: Vec<String> = files.iter().map(|f| f.rel_str()).collect();
        assert_eq!(rels, vec![".env"]);
    }

    #[test]
    fn test_gitmodule_paths() {
        let temp = TempDir::new().unwrap();
        touch(
            temp.path(),
            ".gitmodules",
            b"[submodule \"dep\"]\n\tpath = third_party/dep\n\turl = https://example.com/dep\n",
        );
        assert_eq!(gitmodule_paths(temp.path()), vec!["third_party/dep"]);
        assert!(gitmodule_paths(&temp.path().join("nope")).is_empty());
    }

    #[test]
    fn test_is_likely_binary() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "bin.dat", b"\x00\x01\x02");
        touch(temp.path(), "text.txt", b"plain text");
        assert!(is_likely_binary(&temp.path().join("bin.dat")));
        assert!(!is_likely_binary(&temp.path().join("text.txt")));
        assert!(is_likely_binary(&temp.path().join("missing.file")));
    }
}
