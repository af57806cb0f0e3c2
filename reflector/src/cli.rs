//! Command-line interface definitions for Reflector.

use clap::{Args, Parser, Subcommand, ValueEnum};
use reflector_core::{DuplicatePolicy, ExtractStrategy};
use std::path::PathBuf;

/// Reflector - generates enum-to-string mappings for C++ scoped enums
#[derive(Parser, Debug)]
#[command(name = "reflector")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to reflector.toml configuration file
    #[arg(short, long, global = true, env = "REFLECTOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Source root override (overrides config file)
    #[arg(short, long, global = true)]
    pub source: Option<PathBuf>,

    /// Output directory override (overrides config file)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Enable verbose output (-v, -vv, -vvv for increasing verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Log filter implied by `-v`/`-q` when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan sources and write mapping artifacts (default)
    Generate(GenerateArgs),

    /// Print detected enumerations without writing anything
    List(ListArgs),

    /// Initialize a new reflector.toml configuration file
    Init(InitArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Extraction strategy (overrides config)
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// How to handle repeated enum names or enumerators (overrides config)
    #[arg(long, value_enum)]
    pub on_duplicate: Option<DuplicateArg>,

    /// Delete artifacts that were not produced by this run
    #[arg(long)]
    pub prune: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Extraction strategy (overrides config)
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Output format
    #[arg(long, value_enum, default_value = "pretty")]
    pub format: ListFormat,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Tokenizer with brace tracking
    Tokens,
    /// Single regular expression
    Pattern,
}

impl From<StrategyArg> for ExtractStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Tokens => ExtractStrategy::Tokens,
            StrategyArg::Pattern => ExtractStrategy::Pattern,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DuplicateArg {
    /// Last declaration wins
    Overwrite,
    /// Reject later declarations and exit non-zero
    Fail,
    /// Union enumerator lists
    Merge,
}

impl From<DuplicateArg> for DuplicatePolicy {
    fn from(arg: DuplicateArg) -> Self {
        match arg {
            DuplicateArg::Overwrite => DuplicatePolicy::Overwrite,
            DuplicateArg::Fail => DuplicatePolicy::Fail,
            DuplicateArg::Merge => DuplicatePolicy::Merge,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Pretty,
    Json,
}
