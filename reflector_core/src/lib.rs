//! Reflector - enum-to-string mapping generator for C++ sources.
//!
//! Scans a source tree for scoped enumerations (`enum class X : T { ... };`)
//! and writes one `<X>_EnumMappings.cpp` per enumeration holding a lookup
//! table and a `ToString` function.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! fn main() {
//!     let report = reflector_core::generate().expect("Enum reflection failed");
//!     assert!(report.is_success());
//! }
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod extract;
pub mod generate;
pub mod report;
pub mod scanner;
pub mod types;

pub use config::{DuplicatePolicy, IncludeStyle, ReflectorConfig};
pub use driver::Reflector;
pub use error::{ReflectError, Result};
pub use extract::{ExtractStrategy, Extractor};
pub use generate::{GeneratedFile, MappingGenerator};
pub use report::GenerationReport;
pub use scanner::{ScanOutcome, Scanner};
pub use types::{EnumDeclaration, FileDeclarations};

/// Runs a generation pass using `reflector.toml`, searched upward from the
/// current directory. Defaults apply when no file is found.
pub fn generate() -> Result<GenerationReport> {
    let config = ReflectorConfig::load(None)?;
    Reflector::new(config).run()
}

/// Runs a generation pass with a programmatic configuration.
pub fn generate_with_config(config: ReflectorConfig) -> Result<GenerationReport> {
    Reflector::new(config).run()
}
