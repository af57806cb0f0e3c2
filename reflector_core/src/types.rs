//! Data model shared by the extractor, generator and driver.

use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// A scoped enumeration found in source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDeclaration {
    /// The enumeration identifier, e.g. `Color`.
    pub name: String,
    /// The underlying integer type as written, e.g. `uint8_t`.
    pub underlying: String,
    /// Enclosing namespaces and classes, outermost first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scope: Vec<String>,
    /// Enumerator identifiers in source order. Explicit values are dropped.
    pub enumerators: Vec<String>,
}

impl EnumDeclaration {
    pub fn new(
        name: impl Into<String>,
        underlying: impl Into<String>,
        enumerators: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            underlying: underlying.into(),
            scope: Vec::new(),
            enumerators,
        }
    }

    pub fn with_scope(mut self, scope: Vec<String>) -> Self {
        self.scope = scope;
        self
    }

    /// The name to use when referring to the type from generated code.
    pub fn qualified_name(&self) -> String {
        if self.scope.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.scope.join("::"), self.name)
        }
    }

    /// Enumerators that appear more than once, each reported once in first-seen order.
    pub fn duplicate_enumerators(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.enumerators
            .iter()
            .filter(|e| !seen.insert(e.as_str()) && reported.insert(e.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Drops repeated enumerators, keeping the first occurrence.
    pub fn dedup_enumerators(&mut self) {
        let mut seen = HashSet::new();
        self.enumerators.retain(|e| seen.insert(e.clone()));
    }

    /// Appends enumerators from `other` that are not already present.
    pub fn merge_from(&mut self, other: &EnumDeclaration) {
        for enumerator in &other.enumerators {
            if !self.enumerators.contains(enumerator) {
                self.enumerators.push(enumerator.clone());
            }
        }
    }
}

/// All declarations extracted from one source file.
#[derive(Debug, Clone, Serialize)]
pub struct FileDeclarations {
    /// Path relative to the source root.
    pub path: PathBuf,
    pub declarations: Vec<EnumDeclaration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(enumerators: &[&str]) -> EnumDeclaration {
        EnumDeclaration::new(
            "Color",
            "uint8_t",
            enumerators.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_qualified_name_without_scope() {
        assert_eq!(decl(&[]).qualified_name(), "Color");
    }

    #[test]
    fn test_qualified_name_with_scope() {
        let d = decl(&[]).with_scope(vec!["Gfx".to_string(), "Palette".to_string()]);
        assert_eq!(d.qualified_name(), "Gfx::Palette::Color");
    }

    #[test]
    fn test_duplicate_enumerators_reported_once() {
        let d = decl(&["Red", "Green", "Red", "Blue", "Red", "Green"]);
        assert_eq!(d.duplicate_enumerators(), vec!["Red", "Green"]);
    }

    #[test]
    fn test_no_duplicates() {
        assert!(decl(&["Red", "Green"]).duplicate_enumerators().is_empty());
    }

    #[test]
    fn test_dedup_keeps_first() {
        let mut d = decl(&["B", "A", "B", "C", "A"]);
        d.dedup_enumerators();
        assert_eq!(d.enumerators, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_merge_appends_new_enumerators_in_order() {
        let mut first = decl(&["Red", "Green"]);
        first.merge_from(&decl(&["Green", "Blue", "Alpha"]));
        assert_eq!(first.enumerators, vec!["Red", "Green", "Blue", "Alpha"]);
    }
}
