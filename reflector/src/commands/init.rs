//! Init command - writes a starter reflector.toml.

use crate::cli::{Cli, InitArgs};
use reflector_core::config::CONFIG_FILE_NAME;
use reflector_core::{ReflectError, Result};
use std::fs;
use std::path::Path;
use tracing::info;

const STARTER_CONFIG: &str = r#"# Reflector Configuration

[paths]
# Directory scanned for scoped enum declarations
source_root = "."
# Directory that receives <Name>_EnumMappings files
output_root = "Meta"

[scan]
extensions = ["h", "cpp"]
# "tokens" or "pattern"
strategy = "tokens"

[generate]
artifact_extension = "cpp"
# "source" includes the declaring header, "enum-name" includes <Name>.h
include = "source"
# "overwrite", "fail" or "merge"
on_duplicate = "overwrite"
# Delete artifacts not produced by the current run
prune_stale = false
"#;

/// Runs the init command.
pub fn run(cli: &Cli, args: InitArgs) -> Result<bool> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| Path::new(CONFIG_FILE_NAME).to_path_buf());

    if config_path.exists() && !args.force {
        return Err(ReflectError::config(format!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        )));
    }

    fs::write(&config_path, STARTER_CONFIG)?;
    info!("Created {}", config_path.display());
    info!("Run 'reflector generate' to write mapping artifacts");
    Ok(true)
}
