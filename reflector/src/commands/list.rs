//! List command - prints detected enumerations without writing artifacts.

use super::load_config;
use crate::cli::{Cli, ListArgs, ListFormat};
use reflector_core::{Result, ScanOutcome, Scanner};
use tracing::warn;

/// Runs the list command. Returns whether every candidate file was read.
pub fn run(cli: &Cli, args: ListArgs) -> Result<bool> {
    let mut config = load_config(cli)?;
    if let Some(strategy) = args.strategy {
        config.scan.strategy = strategy.into();
    }

    let outcome = Scanner::new(&config).scan();
    for failure in &outcome.failures {
        warn!("{}", failure);
    }

    match args.format {
        ListFormat::Pretty => print!("{}", render_pretty(&outcome)),
        ListFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome.files)?),
    }

    Ok(outcome.failures.is_empty())
}

fn render_pretty(outcome: &ScanOutcome) -> String {
    let mut output = String::new();
    for file in &outcome.files {
        output.push_str(&format!("{}\n", file.path.display()));
        for decl in &file.declarations {
            output.push_str(&format!(
                "  {} : {} [{}]\n",
                decl.qualified_name(),
                decl.underlying,
                decl.enumerators.join(", ")
            ));
        }
    }
    output.push_str(&format!(
        "\n{} enumerations in {} of {} files\n",
        outcome.declaration_count(),
        outcome.files.len(),
        outcome.files_scanned
    ));
    output
}
