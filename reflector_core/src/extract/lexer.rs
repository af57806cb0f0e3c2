//! C++ lexer using the logos crate.
//!
//! Only the tokens needed to find scoped enum declarations and track
//! namespace/class nesting are recognized. Anything else is dropped.

use logos::Logos;
use tracing::trace;

/// Tokens relevant to enum extraction.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // Keywords
    #[token("enum")]
    Enum,

    #[token("class")]
    Class,

    #[token("struct")]
    Struct,

    #[token("union")]
    Union,

    #[token("namespace")]
    Namespace,

    // Punctuation
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(">")]
    Gt,

    #[token(";")]
    Semicolon,

    #[token("::")]
    PathSep,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token("=")]
    Equals,

    // Literals
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    StringLiteral,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    CharLiteral,

    #[regex(r"[0-9][0-9A-Za-z_.']*")]
    Number,

    // Identifiers (must come after keywords)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Dropped by `tokenize`
    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")]
    BlockComment,

    #[regex(r"#(?:[^\n\\]|\\\r?\n|\\[^\n])*")]
    Preprocessor,
}

/// A token with its span in the source.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: std::ops::Range<usize>,
}

/// Tokenize C++ source text.
///
/// Comments and preprocessor lines are removed. Characters the lexer does not
/// recognize (operators, stray unicode) are skipped; this never fails.
pub fn tokenize(source: &str) -> Vec<SpannedToken> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        match result {
            Ok(Token::LineComment | Token::BlockComment | Token::Preprocessor) => {}
            Ok(token) => tokens.push(SpannedToken {
                token,
                span: lexer.span(),
            }),
            Err(()) => {
                trace!("Skipping unrecognized input at {:?}", lexer.span());
            }
        }
    }

    tokens
}
