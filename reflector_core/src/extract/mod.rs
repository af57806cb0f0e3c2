//! Scoped enum extraction from C++ source text.
//!
//! Two strategies are available:
//!
//! - [`ExtractStrategy::Tokens`] (default) tokenizes the text with a logos
//!   lexer, so comments, string literals and preprocessor lines never produce
//!   matches, and tracks brace depth to find the real end of each body and
//!   the enclosing namespaces.
//! - [`ExtractStrategy::Pattern`] runs a single regex over the text with
//!   comments removed.
//!
//! Both recognize
//!
//! ```text
//! enum class <Identifier> : <Type> { <enumerator-list> };
//! ```
//!
//! Nothing here returns an error: text that does not match is simply not a
//! declaration.
//!
//! # Example
//!
//! ```
//! use reflector_core::extract::extract;
//!
//! let decls = extract("enum class Color : uint8_t { Red, Green, Blue = 5 };");
//! assert_eq!(decls[0].name, "Color");
//! assert_eq!(decls[0].enumerators, ["Red", "Green", "Blue"]);
//! ```

pub mod lexer;
pub mod parser;
pub mod pattern;

use crate::types::EnumDeclaration;
use serde::Deserialize;
use tracing::trace;

/// How declarations are located in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractStrategy {
    /// Tokenizer with brace-depth tracking.
    #[default]
    Tokens,
    /// Single regex over comment-stripped text.
    Pattern,
}

/// Extracts scoped enum declarations with a fixed strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor {
    strategy: ExtractStrategy,
}

impl Extractor {
    pub fn new(strategy: ExtractStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> ExtractStrategy {
        self.strategy
    }

    /// Returns every declaration in `text`, in source order.
    pub fn extract(&self, text: &str) -> Vec<EnumDeclaration> {
        let declarations = match self.strategy {
            ExtractStrategy::Tokens => parser::parse_declarations(&lexer::tokenize(text)),
            ExtractStrategy::Pattern => pattern::extract_with_pattern(text),
        };
        trace!(
            "{:?} strategy found {} declarations",
            self.strategy,
            declarations.len()
        );
        declarations
    }
}

/// Extracts declarations with the default strategy.
pub fn extract(text: &str) -> Vec<EnumDeclaration> {
    Extractor::default().extract(text)
}
