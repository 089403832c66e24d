//! Parser error types.

use thiserror::Error;

use crate::lexer::Span;

/// Why a line could not be read as a privilege grant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrantParseError {
    /// The line does not start with the `GRANT` keyword.
    #[error("not a GRANT statement: found {found} at position {}", .span.start)]
    NotAGrant { found: String, span: Span },

    /// `GRANT role TO user`: no privilege list, no `ON` clause.
    #[error("role grant is not a privilege grant (TO at position {})", .span.start)]
    RoleGrant { span: Span },

    /// The privilege list never reaches `ON`.
    #[error("missing ON clause")]
    MissingOn,

    /// The target is not followed by `TO`.
    #[error("missing TO clause")]
    MissingTo,

    /// Nothing follows `TO`.
    #[error("missing grantee after TO")]
    MissingGrantee,

    /// Two commas in a row, or a comma right before `ON`.
    #[error("empty privilege at position {}", .span.start)]
    EmptyPrivilege { span: Span },

    /// A privilege-list segment names no catalog entry.
    #[error("unknown privilege `{name}` at position {}..{}", .span.start, .span.end)]
    UnknownPrivilege { name: String, span: Span },

    /// `ALL PRIVILEGES` listed next to other privileges.
    #[error("ALL PRIVILEGES cannot be combined with other privileges (position {})", .span.start)]
    AllPrivilegesCombined { span: Span },

    #[error("unexpected token: expected {expected}, found {found} at position {}", .span.start)]
    Unexpected {
        expected: &'static str,
        found: String,
        span: Span,
    },

    #[error("{message} at position {}..{}", .span.start, .span.end)]
    Lex { message: String, span: Span },
}

impl GrantParseError {
    /// Location of the offending text, when there is one.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        match self {
            Self::NotAGrant { span, .. }
            | Self::RoleGrant { span }
            | Self::EmptyPrivilege { span }
            | Self::UnknownPrivilege { span, .. }
            | Self::AllPrivilegesCombined { span }
            | Self::Unexpected { span, .. }
            | Self::Lex { span, .. } => Some(*span),
            Self::MissingOn | Self::MissingTo | Self::MissingGrantee => None,
        }
    }
}
