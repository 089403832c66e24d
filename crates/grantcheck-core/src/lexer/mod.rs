//! GRANT statement lexer.
//!
//! A hand-written lexer that turns one line of `SHOW GRANTS` output into a
//! stream of spanned tokens. Tokens are produced on demand, so the parser
//! can stop reading once it reaches the grantee.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
