use anyhow::{Result, Context};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::app_config::ScanConfig;

// @module: Candidate file discovery

/// How a candidate file is processed by the rewriter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Shell-like file: comments and echoed strings are candidates
    Shell,
    /// Markdown README: prose lines are candidates
    Markdown,
}

/// Walks a directory tree and classifies candidate files
pub struct Scanner {
    // @field: Directory names pruned from the walk
    excluded_dirs: Vec<String>,

    // @field: Lowercased shell-like extensions
    target_extensions: Vec<String>,

    // @field: Lowercased README filenames
    readme_names: Vec<String>,
}

impl Scanner {
    /// Build a scanner from the scan section of the config
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            excluded_dirs: config.excluded_dirs.clone(),
            target_extensions: config
                .target_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            readme_names: config.readme_names.iter().map(|n| n.to_lowercase()).collect(),
        }
    }

    /// Classify a single path, returning None for files this tool ignores
    pub fn classify(&self, path: &Path) -> Option<FileKind> {
        if let Some(ext) = path.extension() {
            let ext = ext.to_string_lossy().to_lowercase();
            if self.target_extensions.iter().any(|e| *e == ext) {
                return Some(FileKind::Shell);
            }
        }

        let name = path.file_name()?.to_string_lossy().to_lowercase();
        if self.readme_names.iter().any(|n| *n == name) {
            return Some(FileKind::Markdown);
        }

        None
    }

    /// Walk the tree rooted at `root` and collect candidate files in walk order
    pub fn scan<P: AsRef<Path>>(&self, root: P) -> Result<Vec<(PathBuf, FileKind)>> {
        let root = root.as_ref();
        let mut candidates = Vec::new();

        let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !self.excluded_dirs.iter().any(|d| *d == name)
        });

        for entry in walker {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(kind) = self.classify(path) {
                candidates.push((path.to_path_buf(), kind));
            }
        }

        Ok(candidates)
    }
}
