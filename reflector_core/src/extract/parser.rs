//! Token-level extraction of `enum class` declarations.
//!
//! Walks the token stream once, tracking brace depth so that enclosing
//! namespaces and classes are known when a declaration is found. A
//! declaration that does not fit the recognized shape is skipped and the walk
//! resumes right after its `enum` keyword.

use super::lexer::{SpannedToken, Token};
use crate::types::EnumDeclaration;
use tracing::trace;

/// Extracts every well-formed scoped enum declaration from `tokens`.
pub fn parse_declarations(tokens: &[SpannedToken]) -> Vec<EnumDeclaration> {
    DeclarationParser::new(tokens).run()
}

struct DeclarationParser<'a> {
    tokens: &'a [SpannedToken],
    pos: usize,
    /// One entry per open brace; `Some` for named namespaces and classes.
    scopes: Vec<Option<String>>,
    /// Name to attach to the next `{`.
    pending_scope: Option<String>,
}

impl<'a> DeclarationParser<'a> {
    fn new(tokens: &'a [SpannedToken]) -> Self {
        Self {
            tokens,
            pos: 0,
            scopes: Vec::new(),
            pending_scope: None,
        }
    }

    fn run(mut self) -> Vec<EnumDeclaration> {
        let mut declarations = Vec::new();

        while let Some(token) = self.peek_at(self.pos) {
            match token {
                Token::Enum => match self.parse_enum(self.pos) {
                    Some((declaration, next)) => {
                        trace!(
                            "Found enum {} with {} enumerators",
                            declaration.name,
                            declaration.enumerators.len()
                        );
                        declarations.push(declaration);
                        self.pos = next;
                    }
                    None => {
                        trace!("Skipping malformed enum at {:?}", self.span_at(self.pos));
                        self.pos += 1;
                    }
                },
                Token::Namespace => self.namespace_head(),
                Token::Class | Token::Struct | Token::Union => self.class_head(),
                Token::LBrace => {
                    self.scopes.push(self.pending_scope.take());
                    self.pos += 1;
                }
                Token::RBrace => {
                    self.scopes.pop();
                    self.pending_scope = None;
                    self.pos += 1;
                }
                Token::Semicolon => {
                    self.pending_scope = None;
                    self.pos += 1;
                }
                _ => self.pos += 1,
            }
        }

        declarations
    }

    fn peek_at(&self, index: usize) -> Option<&'a Token> {
        self.tokens.get(index).map(|t| &t.token)
    }

    fn span_at(&self, index: usize) -> Option<std::ops::Range<usize>> {
        self.tokens.get(index).map(|t| t.span.clone())
    }

    fn identifier_at(&self, index: usize) -> Option<&'a str> {
        match self.peek_at(index) {
            Some(Token::Identifier(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    fn current_scope(&self) -> Vec<String> {
        self.scopes.iter().flatten().cloned().collect()
    }

    /// `namespace A::B {`, `inline namespace v1 {`, `namespace {`.
    ///
    /// Positions the walk on the opening brace with the scope name pending, or
    /// past the keyword when this is an alias or something unexpected.
    fn namespace_head(&mut self) {
        let mut parts: Vec<&str> = Vec::new();
        let mut index = self.pos + 1;

        loop {
            match self.peek_at(index) {
                Some(Token::Identifier(name)) => parts.push(name),
                Some(Token::PathSep) => {}
                Some(Token::LBrace) => {
                    self.pending_scope = (!parts.is_empty()).then(|| parts.join("::"));
                    self.pos = index;
                    return;
                }
                _ => {
                    self.pos += 1;
                    return;
                }
            }
            index += 1;
        }
    }

    /// `class ENGINE_API Name final : public Base<T> {`.
    ///
    /// The scope name is the last identifier of the head, so export macros
    /// in front of it are skipped. Template parameters (`class T>`),
    /// elaborated type specifiers in parameter lists and forward
    /// declarations do not open a scope.
    fn class_head(&mut self) {
        let start = self.pos;
        self.pos += 1;

        if start > 0 && matches!(self.peek_at(start - 1), Some(Token::Enum)) {
            return;
        }

        let mut index = start + 1;
        let mut name = None;
        while let Some(ident) = self.identifier_at(index) {
            if ident != "final" || name.is_none() {
                name = Some(ident);
            }
            index += 1;
        }
        let Some(name) = name else {
            return;
        };
        let head_end = index;

        loop {
            match self.peek_at(index) {
                Some(Token::LBrace) => {
                    self.pending_scope = Some(name.to_string());
                    self.pos = index;
                    return;
                }
                Some(
                    Token::Semicolon
                    | Token::Equals
                    | Token::LParen
                    | Token::RParen
                    | Token::RBrace,
                )
                | None => return,
                // template parameter: `class T>`, `class T,`
                Some(Token::Gt | Token::Comma) if index == head_end => return,
                Some(_) => index += 1,
            }
        }
    }

    /// Parses `enum class Name : Type { A, B = expr, };` starting at the
    /// `enum` token. Returns the declaration and the index after the `;`.
    fn parse_enum(&self, start: usize) -> Option<(EnumDeclaration, usize)> {
        let mut index = start + 1;
        if self.peek_at(index) != Some(&Token::Class) {
            return None;
        }
        index += 1;

        let name = self.identifier_at(index)?;
        index += 1;

        if self.peek_at(index) != Some(&Token::Colon) {
            return None;
        }
        index += 1;

        let (underlying, after_type) = self.underlying_type(index)?;
        index = after_type;

        if self.peek_at(index) != Some(&Token::LBrace) {
            return None;
        }
        index += 1;

        let mut enumerators = Vec::new();
        loop {
            match self.peek_at(index)? {
                Token::RBrace => break,
                Token::Comma => index += 1,
                Token::Identifier(enumerator) => {
                    enumerators.push(enumerator.clone());
                    index += 1;
                    if self.peek_at(index) == Some(&Token::Equals) {
                        index = self.skip_value(index + 1)?;
                    }
                    match self.peek_at(index)? {
                        Token::Comma => index += 1,
                        Token::RBrace => {}
                        _ => return None,
                    }
                }
                _ => return None,
            }
        }

        // `}` must be followed by `;`
        index += 1;
        if self.peek_at(index) != Some(&Token::Semicolon) {
            return None;
        }

        let declaration =
            EnumDeclaration::new(name, underlying, enumerators).with_scope(self.current_scope());
        Some((declaration, index + 1))
    }

    /// Reads `uint8_t`, `std::uint32_t` or `unsigned char` up to the `{`.
    fn underlying_type(&self, mut index: usize) -> Option<(String, usize)> {
        let mut text = String::new();
        let mut previous_was_word = false;

        loop {
            match self.peek_at(index)? {
                Token::Identifier(word) => {
                    if previous_was_word {
                        text.push(' ');
                    }
                    text.push_str(word);
                    previous_was_word = true;
                }
                Token::PathSep => {
                    text.push_str("::");
                    previous_was_word = false;
                }
                Token::LBrace if previous_was_word => return Some((text, index)),
                _ => return None,
            }
            index += 1;
        }
    }

    /// Skips an enumerator value expression. Stops at the `,` or `}` that ends
    /// it; commas inside parentheses or brackets belong to the expression.
    fn skip_value(&self, mut index: usize) -> Option<usize> {
        let mut depth = 0usize;

        loop {
            match self.peek_at(index)? {
                Token::Comma | Token::RBrace if depth == 0 => return Some(index),
                Token::LParen | Token::LBracket => depth += 1,
                Token::RParen | Token::RBracket => depth = depth.saturating_sub(1),
                Token::LBrace | Token::Semicolon | Token::Enum => return None,
                _ => {}
            }
            index += 1;
        }
    }
}
