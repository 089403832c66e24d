//! GRANT statement parser.
//!
//! A hand-written recursive descent parser over the lexer's token stream.
//! Privilege names are resolved against the [`PrivilegeCatalog`]; the target
//! is parsed structurally and everything after `TO` is kept verbatim.
//!
//! [`PrivilegeCatalog`]: crate::catalog::PrivilegeCatalog

mod error;
mod parser;

pub use error::GrantParseError;
pub use parser::GrantParser;

use crate::grant::Grant;

/// The parser's verdict on one statement: a grant, or the reason it could not
/// be read as one.
pub type ParsedGrant = Result<Grant, GrantParseError>;

/// Parses one line of `SHOW GRANTS` output.
///
/// # Errors
///
/// Returns a `GrantParseError` if the line is not a privilege grant or names
/// a privilege missing from the catalog.
pub fn parse_grant(statement: &str) -> ParsedGrant {
    GrantParser::new(statement).parse()
}
