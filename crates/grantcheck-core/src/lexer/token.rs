//! Token types for the GRANT lexer.

use std::fmt;

use super::Span;

/// Structural keywords of a GRANT statement.
///
/// Keywords are recognized only in their exact uppercase spelling, the form
/// servers use when printing grants. A lowercase `on` is an ordinary word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Grant,
    On,
    To,
    Table,
    Function,
    Procedure,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-sensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GRANT" => Some(Self::Grant),
            "ON" => Some(Self::On),
            "TO" => Some(Self::To),
            "TABLE" => Some(Self::Table),
            "FUNCTION" => Some(Self::Function),
            "PROCEDURE" => Some(Self::Procedure),
            _ => None,
        }
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Grant => "GRANT",
            Self::On => "ON",
            Self::To => "TO",
            Self::Table => "TABLE",
            Self::Function => "FUNCTION",
            Self::Procedure => "PROCEDURE",
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Structural keyword
    Keyword(Keyword),
    /// Bare word (privilege word or unquoted identifier), case preserved
    Word(String),
    /// Identifier quoted with backticks or double quotes
    QuotedIdentifier(String),
    /// Single-quoted string literal (user and host names)
    String(String),

    /// ,
    Comma,
    /// .
    Dot,
    /// *
    Star,
    /// @
    At,
    /// (
    LeftParen,
    /// )
    RightParen,

    /// End of input
    Eof,
    /// Invalid/unknown token
    Error(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(kw) => f.write_str(kw.as_str()),
            Self::Word(w) => f.write_str(w),
            Self::QuotedIdentifier(id) => write!(f, "`{id}`"),
            Self::String(s) => write!(f, "'{s}'"),
            Self::Comma => f.write_str(","),
            Self::Dot => f.write_str("."),
            Self::Star => f.write_str("*"),
            Self::At => f.write_str("@"),
            Self::LeftParen => f.write_str("("),
            Self::RightParen => f.write_str(")"),
            Self::Eof => f.write_str("end of input"),
            Self::Error(msg) => f.write_str(msg),
        }
    }
}

/// A token with its span in the statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the statement.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this token is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    /// Returns the bare text of a word or keyword token.
    ///
    /// Privilege names such as `GRANT OPTION` contain keyword spellings, so
    /// the privilege list treats both kinds as plain words.
    #[must_use]
    pub fn word(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word(w) => Some(w),
            TokenKind::Keyword(kw) => Some(kw.as_str()),
            _ => None,
        }
    }
}
