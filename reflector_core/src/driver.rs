//! The generation run: scan, resolve duplicates, write, prune.

use crate::config::{DuplicatePolicy, ReflectorConfig};
use crate::error::{ReflectError, Result};
use crate::generate::MappingGenerator;
use crate::report::GenerationReport;
use crate::scanner::Scanner;
use crate::types::EnumDeclaration;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// A declaration already written during the current run.
struct Registered {
    source: PathBuf,
    declaration: EnumDeclaration,
}

/// Runs the scanner and generator for one configuration.
pub struct Reflector {
    config: ReflectorConfig,
}

impl Reflector {
    pub fn new(config: ReflectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReflectorConfig {
        &self.config
    }

    /// Generates one artifact per enumeration found under the source root.
    ///
    /// Unreadable files and rejected declarations are collected in the
    /// report; an output directory that cannot be created or written is
    /// returned as an error.
    pub fn run(&self) -> Result<GenerationReport> {
        info!(
            "Starting enum reflection: {:?} -> {:?}",
            self.config.paths.source_root, self.config.paths.output_root
        );

        let generator =
            MappingGenerator::new(&self.config.paths.output_root, &self.config.generate);
        generator.ensure_output_root().inspect_err(|e| error!("{}", e))?;

        let outcome = Scanner::new(&self.config).scan();
        let mut report = GenerationReport {
            files_scanned: outcome.files_scanned,
            declarations_found: outcome.declaration_count(),
            failures: outcome.failures,
            ..Default::default()
        };

        let mut registry: HashMap<String, Registered> = HashMap::new();
        for file in outcome.files {
            for declaration in file.declarations {
                self.emit(&generator, &mut registry, &file.path, declaration, &mut report)
                    .inspect_err(|e| error!("{}", e))?;
            }
        }

        if self.config.generate.prune_stale {
            let unreadable = report
                .failures
                .iter()
                .any(|f| matches!(f, ReflectError::UnreadableSource { .. }));
            if unreadable {
                warn!("Skipping prune: some sources could not be read");
            } else {
                // Rejected declarations keep their previous artifact.
                let keep: HashSet<String> = registry
                    .keys()
                    .map(String::as_str)
                    .chain(report.failures.iter().filter_map(|f| match f {
                        ReflectError::AmbiguousEnumeration { name, .. } => Some(name.as_str()),
                        _ => None,
                    }))
                    .map(|name| generator.artifact_file_name(name))
                    .collect();
                report.pruned = prune_stale(&generator, &keep, &mut report.failures)?;
            }
        }

        info!(
            "Generation complete. {} artifacts written, {} failures",
            report.artifact_count(),
            report.failures.len()
        );
        Ok(report)
    }

    fn emit(
        &self,
        generator: &MappingGenerator,
        registry: &mut HashMap<String, Registered>,
        source: &Path,
        mut declaration: EnumDeclaration,
        report: &mut GenerationReport,
    ) -> Result<()> {
        let policy = self.config.generate.on_duplicate;

        let repeated = declaration.duplicate_enumerators();
        if !repeated.is_empty() {
            let message = format!(
                "enumerators {} repeated in {}",
                repeated.join(", "),
                source.display()
            );
            warn!("Ambiguous enumeration {}: {}", declaration.name, message);
            match policy {
                DuplicatePolicy::Fail => {
                    report
                        .failures
                        .push(ReflectError::ambiguous(&declaration.name, message));
                    return Ok(());
                }
                DuplicatePolicy::Merge => {
                    declaration.dedup_enumerators();
                    report.conflicts.push(format!("{}: {}", declaration.name, message));
                }
                DuplicatePolicy::Overwrite => {
                    report.conflicts.push(format!("{}: {}", declaration.name, message));
                }
            }
        }

        let name = declaration.name.clone();
        match registry.get_mut(&name) {
            None => {
                registry.insert(
                    name.clone(),
                    Registered {
                        source: source.to_path_buf(),
                        declaration,
                    },
                );
            }
            Some(previous) => {
                let message = format!(
                    "declared in {} and {}",
                    previous.source.display(),
                    source.display()
                );
                warn!("Ambiguous enumeration {}: {}", name, message);

                match policy {
                    DuplicatePolicy::Fail => {
                        report.failures.push(ReflectError::ambiguous(&name, message));
                        return Ok(());
                    }
                    DuplicatePolicy::Merge
                        if previous.declaration.qualified_name() != declaration.qualified_name() =>
                    {
                        report.failures.push(ReflectError::ambiguous(
                            &name,
                            format!(
                                "cannot merge {} into {}: {}",
                                declaration.qualified_name(),
                                previous.declaration.qualified_name(),
                                message
                            ),
                        ));
                        return Ok(());
                    }
                    DuplicatePolicy::Merge => {
                        previous.declaration.merge_from(&declaration);
                        report.conflicts.push(format!("{}: {} (merged)", name, message));
                    }
                    DuplicatePolicy::Overwrite => {
                        *previous = Registered {
                            source: source.to_path_buf(),
                            declaration,
                        };
                        report.conflicts.push(format!("{}: {} (overwritten)", name, message));
                    }
                }
            }
        }

        let entry = &registry[&name];
        let file = generator.write(&entry.declaration, &entry.source)?;
        report.files.push(file);
        Ok(())
    }
}

/// Deletes artifacts in the output root whose file names are not in `keep`.
fn prune_stale(
    generator: &MappingGenerator,
    keep: &HashSet<String>,
    failures: &mut Vec<ReflectError>,
) -> Result<Vec<PathBuf>> {
    let output_root = generator.output_root();
    let mut stale: Vec<PathBuf> = fs::read_dir(output_root)
        .map_err(|e| ReflectError::unwritable_output(output_root, e))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| generator.is_artifact_name(name) && !keep.contains(name))
        })
        .map(|entry| entry.path())
        .collect();
    stale.sort();

    let mut pruned = Vec::new();
    for path in stale {
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed stale artifact {:?}", path);
                pruned.push(path);
            }
            Err(e) => {
                warn!("Failed to remove stale artifact {:?}: {}", path, e);
                failures.push(ReflectError::unwritable_output(path, e));
            }
        }
    }

    if !pruned.is_empty() {
        info!("Pruned {} stale artifacts", pruned.len());
    }
    Ok(pruned)
}
