pub use reflector_core::{
    DuplicatePolicy, EnumDeclaration, ExtractStrategy, GenerationReport, ReflectError,
    Reflector, ReflectorConfig, Result, config, error, extract, generate, generate_with_config,
};

pub mod cli;
pub mod commands;
