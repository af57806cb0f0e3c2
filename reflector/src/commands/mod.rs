//! Command handlers for the Reflector CLI.

pub mod generate;
pub mod init;
pub mod list;

use crate::cli::Cli;
use reflector_core::{ReflectorConfig, Result};
use tracing::{debug, error};

/// Loads configuration and applies the global path overrides.
pub fn load_config(cli: &Cli) -> Result<ReflectorConfig> {
    let mut config = ReflectorConfig::load(cli.config.as_deref())
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    if let Some(source) = &cli.source {
        config.paths.source_root = source.clone();
    }
    if let Some(output) = &cli.output {
        config.paths.output_root = output.clone();
    }

    debug!("Effective configuration: {:?}", config);
    Ok(config)
}
