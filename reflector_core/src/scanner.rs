//! Source tree scanning.
//!
//! Walks the source root in sorted order, reads every file with a recognized
//! extension and runs the extractor over it. Files are read and parsed in
//! parallel; results keep traversal order so downstream writes are
//! deterministic.

use crate::config::ReflectorConfig;
use crate::error::ReflectError;
use crate::extract::Extractor;
use crate::types::FileDeclarations;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

/// Result of scanning a source tree.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Files that contained at least one declaration, in traversal order.
    pub files: Vec<FileDeclarations>,
    /// Files or directories that could not be read.
    pub failures: Vec<ReflectError>,
    /// Number of candidate files visited.
    pub files_scanned: usize,
}

impl ScanOutcome {
    pub fn declaration_count(&self) -> usize {
        self.files.iter().map(|f| f.declarations.len()).sum()
    }
}

/// Finds scoped enum declarations under a source root.
#[derive(Debug, Clone)]
pub struct Scanner {
    source_root: PathBuf,
    extensions: Vec<String>,
    extractor: Extractor,
    /// Canonical output directory, skipped during the walk.
    skip_dir: Option<PathBuf>,
}

impl Scanner {
    pub fn new(config: &ReflectorConfig) -> Self {
        Self {
            source_root: config.paths.source_root.clone(),
            extensions: config
                .scan
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect(),
            extractor: Extractor::new(config.scan.strategy),
            skip_dir: config.paths.output_root.canonicalize().ok(),
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Whether `path` has one of the configured extensions.
    pub fn is_candidate(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }

    /// Walks the tree and returns candidate files in sorted order, plus any
    /// directory entries that could not be read.
    pub fn candidate_files(&self) -> (Vec<PathBuf>, Vec<ReflectError>) {
        let mut files = Vec::new();
        let mut failures = Vec::new();

        let walker = WalkDir::new(&self.source_root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_skipped_dir(entry));

        for entry in walker {
            match entry {
                Ok(entry) => {
                    let file_type = entry.file_type();
                    // Dangling links are kept so the read reports them.
                    let is_file = file_type.is_file()
                        || (file_type.is_symlink() && !entry.path().is_dir());
                    if is_file && self.is_candidate(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.source_root.clone());
                    warn!("Error walking {:?}: {}", path, e);
                    failures.push(ReflectError::unreadable_source(path, e.to_string()));
                }
            }
        }

        debug!("Found {} candidate files under {:?}", files.len(), self.source_root);
        (files, failures)
    }

    /// Scans the whole tree.
    pub fn scan(&self) -> ScanOutcome {
        info!("Scanning {:?} for scoped enums", self.source_root);
        let (candidates, mut failures) = self.candidate_files();

        let results: Vec<_> = candidates.par_iter().map(|path| self.scan_file(path)).collect();

        let mut files = Vec::new();
        for result in results {
            match result {
                Ok(found) if found.declarations.is_empty() => {}
                Ok(found) => files.push(found),
                Err(e) => {
                    warn!("{}", e);
                    failures.push(e);
                }
            }
        }

        let outcome = ScanOutcome {
            files,
            failures,
            files_scanned: candidates.len(),
        };
        info!(
            "Scan complete. {} files scanned, {} declarations in {} files, {} failures",
            outcome.files_scanned,
            outcome.declaration_count(),
            outcome.files.len(),
            outcome.failures.len()
        );
        outcome
    }

    /// Reads and extracts one file. The returned path is relative to the
    /// source root.
    pub fn scan_file(&self, path: &Path) -> Result<FileDeclarations, ReflectError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ReflectError::unreadable_source(path, e.to_string()))?;

        let declarations = self.extractor.extract(&content);
        let relative = path.strip_prefix(&self.source_root).unwrap_or(path);
        if declarations.is_empty() {
            trace!("No declarations in {:?}", relative);
        } else {
            debug!("{} declarations in {:?}", declarations.len(), relative);
        }

        Ok(FileDeclarations {
            path: relative.to_path_buf(),
            declarations,
        })
    }

    fn is_skipped_dir(&self, entry: &walkdir::DirEntry) -> bool {
        match &self.skip_dir {
            Some(skip) if entry.file_type().is_dir() && entry.depth() > 0 => entry
                .path()
                .canonicalize()
                .is_ok_and(|canonical| &canonical == skip),
            _ => false,
        }
    }
}
