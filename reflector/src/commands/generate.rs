//! Generate command - scans sources and writes mapping artifacts.

use super::load_config;
use crate::cli::{Cli, GenerateArgs};
use reflector_core::{GenerationReport, Reflector, Result};
use tracing::{info, warn};

/// Runs the generate command. Returns whether the run finished without
/// unreadable files or rejected declarations.
pub fn run(cli: &Cli, args: GenerateArgs) -> Result<bool> {
    let mut config = load_config(cli)?;

    if let Some(strategy) = args.strategy {
        config.scan.strategy = strategy.into();
    }
    if let Some(policy) = args.on_duplicate {
        config.generate.on_duplicate = policy.into();
    }
    if args.prune {
        config.generate.prune_stale = true;
    }

    let report = Reflector::new(config).run()?;
    summarize(&report);
    Ok(report.is_success())
}

fn summarize(report: &GenerationReport) {
    for conflict in &report.conflicts {
        info!("Resolved duplicate {}", conflict);
    }
    for failure in &report.failures {
        warn!("{}", failure);
    }
    info!(
        "{} files scanned, {} enumerations found, {} artifacts written ({} bytes), {} pruned",
        report.files_scanned,
        report.declarations_found,
        report.artifact_count(),
        report.bytes_written(),
        report.pruned.len()
    );
}
