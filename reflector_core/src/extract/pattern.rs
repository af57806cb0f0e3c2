//! Regex-based extraction.
//!
//! Matches `enum class Name : Type { ... };` directly on the text after
//! removing comments. The body may not contain braces. Scopes are not
//! tracked.
//!
//! Comment removal does not know about string literals: a `//` or `/*`
//! inside a string (`"http://host"`) is treated as the start of a comment,
//! so a declaration later on that line is missed. The token strategy does
//! not have this limit.

use crate::types::EnumDeclaration;
use once_cell::sync::Lazy;
use regex::Regex;

static COMMENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)//[^\n]*|/\*.*?\*/").expect("Invalid regex for comment stripping")
});

static ENUM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\benum\s+class\s+(\w+)\s*:\s*(\w+(?:\s*::\s*\w+|\s+\w+)*)\s*\{([^{}]*)\}\s*;",
    )
    .expect("Invalid regex for enum declarations")
});

/// Extracts declarations using the regex matcher.
pub fn extract_with_pattern(text: &str) -> Vec<EnumDeclaration> {
    let stripped = COMMENT_PATTERN.replace_all(text, " ");

    ENUM_PATTERN
        .captures_iter(&stripped)
        .map(|cap| {
            EnumDeclaration::new(
                &cap[1],
                normalize_type(&cap[2]),
                split_enumerators(&cap[3]),
            )
        })
        .collect()
}

/// Splits an enum body on `,`, drops empty entries and explicit values.
pub fn split_enumerators(body: &str) -> Vec<String> {
    body.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.split('=').next().unwrap_or(token).trim())
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// `std :: uint8_t` -> `std::uint8_t`, `unsigned\n  char` -> `unsigned char`.
fn normalize_type(raw: &str) -> String {
    raw.split("::")
        .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("::")
}
