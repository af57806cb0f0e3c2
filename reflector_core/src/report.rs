//! Run summary returned by the driver.

use crate::error::ReflectError;
use crate::generate::GeneratedFile;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Report of one generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Artifacts written, in write order. A path appears more than once when
    /// a later declaration replaced or extended an earlier one.
    pub files: Vec<GeneratedFile>,
    /// Number of candidate files visited.
    pub files_scanned: usize,
    /// Number of declarations the extractor returned.
    pub declarations_found: usize,
    /// Unreadable sources and rejected declarations.
    pub failures: Vec<ReflectError>,
    /// Duplicate names or enumerators that were resolved by policy.
    pub conflicts: Vec<String>,
    /// Stale artifacts deleted from the output directory.
    pub pruned: Vec<PathBuf>,
}

impl GenerationReport {
    /// False when any file failed to read or any declaration was rejected.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of distinct artifact files on disk after the run.
    pub fn artifact_count(&self) -> usize {
        self.files
            .iter()
            .map(|f| &f.path)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Total bytes written across all writes.
    pub fn bytes_written(&self) -> usize {
        self.files.iter().map(|f| f.bytes_written).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, bytes: usize) -> GeneratedFile {
        GeneratedFile {
            path: PathBuf::from(path),
            bytes_written: bytes,
            enum_name: "E".to_string(),
            source: PathBuf::from("E.h"),
        }
    }

    #[test]
    fn test_empty_report_is_success() {
        let report = GenerationReport::default();
        assert!(report.is_success());
        assert_eq!(report.artifact_count(), 0);
    }

    #[test]
    fn test_failures_make_report_unsuccessful() {
        let report = GenerationReport {
            failures: vec![ReflectError::unreadable_source("x.h", "denied")],
            ..Default::default()
        };
        assert!(!report.is_success());
    }

    #[test]
    fn test_artifact_count_ignores_rewrites() {
        let report = GenerationReport {
            files: vec![file("out/A.cpp", 10), file("out/B.cpp", 20), file("out/A.cpp", 30)],
            ..Default::default()
        };
        assert_eq!(report.artifact_count(), 2);
        assert_eq!(report.bytes_written(), 60);
    }
}
