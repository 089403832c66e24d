//! GRANT parser implementation.

use super::error::GrantParseError;
use crate::catalog::PrivilegeCatalog;
use crate::grant::{Grant, GrantTarget, GrantedPrivilege, ObjectKind, ObjectName};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

/// Parser for one grant statement.
///
/// Shape: `GRANT <privilege-list> ON <target> TO <grantee> [<trailing>]`.
/// Only the privilege list decides what the line grants. The target is read
/// on a best-effort basis and never fails the statement, and the lexer is
/// never advanced past `TO`, so password hashes, `<secret>` markers and other
/// trailing clauses cannot produce lexer errors.
pub struct GrantParser<'a> {
    input: &'a str,
    lexer: Lexer<'a>,
    current: Token,
    catalog: &'static PrivilegeCatalog,
}

impl<'a> GrantParser<'a> {
    /// Creates a new parser for the given statement.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            input,
            lexer,
            current,
            catalog: PrivilegeCatalog::global(),
        }
    }

    /// Parses the statement.
    ///
    /// # Errors
    ///
    /// Returns a `GrantParseError` if the input is not a privilege grant.
    pub fn parse(mut self) -> Result<Grant, GrantParseError> {
        if !self.current.is_keyword(Keyword::Grant) {
            return Err(GrantParseError::NotAGrant {
                found: self.current.kind.to_string(),
                span: self.current.span,
            });
        }
        self.advance()?;

        let (list, on_span) = self.collect_privilege_list()?;
        let privileges = self.resolve_privileges(&list, on_span)?;

        let target_tokens = self.collect_target()?;
        let target = model_target(&target_tokens).unwrap_or_else(|| {
            let raw = Span::new(on_span.end, self.current.span.start);
            GrantTarget::Other(raw.text(self.input).trim().to_string())
        });

        let rest = Span::new(self.current.span.end, self.input.len());
        let grantee = rest.text(self.input).trim();
        if grantee.is_empty() {
            return Err(GrantParseError::MissingGrantee);
        }

        Ok(Grant {
            privileges,
            target,
            grantee: grantee.to_string(),
            with_grant_option: ends_with_grant_option(grantee),
        })
    }

    /// Moves to the next token and returns the one just consumed.
    fn bump(&mut self) -> Token {
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    /// Like [`Self::bump`], but fails if the new current token is a lexer
    /// error.
    fn advance(&mut self) -> Result<Token, GrantParseError> {
        let consumed = self.bump();
        if let TokenKind::Error(message) = &self.current.kind {
            return Err(GrantParseError::Lex {
                message: message.clone(),
                span: self.current.span,
            });
        }
        Ok(consumed)
    }

    fn unexpected(&self, expected: &'static str) -> GrantParseError {
        unexpected(expected, &self.current)
    }

    /// Collects the tokens between `GRANT` and the top-level `ON`, consuming
    /// the `ON`. Returns the tokens and the span of `ON`.
    ///
    /// Reaching `TO` first means the line grants a role, not privileges.
    fn collect_privilege_list(&mut self) -> Result<(Vec<Token>, Span), GrantParseError> {
        let mut tokens = Vec::new();
        let mut depth = 0usize;
        loop {
            match &self.current.kind {
                TokenKind::Keyword(Keyword::On) if depth == 0 => {
                    let on = self.bump();
                    return Ok((tokens, on.span));
                }
                TokenKind::Keyword(Keyword::To) if depth == 0 => {
                    return Err(GrantParseError::RoleGrant {
                        span: self.current.span,
                    });
                }
                TokenKind::Eof => return Err(GrantParseError::MissingOn),
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth = depth.checked_sub(1).ok_or_else(|| self.unexpected("`,` or ON"))?;
                }
                _ => {}
            }
            tokens.push(self.advance()?);
        }
    }

    /// Resolves a privilege list into catalog names.
    ///
    /// Commas separate privileges and every segment must name exactly one
    /// catalog entry: `RELOAD SELECT` is an unknown privilege, not two. A
    /// parenthesized column list attaches to the privilege right before it.
    /// `ALL PRIVILEGES` must be the only privilege in the list.
    fn resolve_privileges(
        &self,
        tokens: &[Token],
        on_span: Span,
    ) -> Result<Vec<GrantedPrivilege>, GrantParseError> {
        let mut privileges: Vec<GrantedPrivilege> = Vec::new();
        let mut sentinel = None;
        let mut rest = tokens;
        loop {
            let word_count = rest.iter().take_while(|t| t.word().is_some()).count();
            let (words, tail) = rest.split_at(word_count);
            let (Some(first), Some(last)) = (words.first(), words.last()) else {
                return Err(match tail.first() {
                    None => GrantParseError::EmptyPrivilege { span: on_span },
                    Some(t) if t.kind == TokenKind::Comma => {
                        GrantParseError::EmptyPrivilege { span: t.span }
                    }
                    Some(t) => unexpected("privilege name", t),
                });
            };
            let segment = first.span.merge(last.span);
            let privilege = self.resolve_segment(words, segment)?;
            if privilege.name.is_all_privileges() {
                sentinel = Some(segment);
            }
            privileges.push(privilege);
            rest = tail;

            if rest.first().is_some_and(|t| t.kind == TokenKind::LeftParen) {
                let (columns, tail) = parse_column_list(rest, on_span)?;
                if let Some(last) = privileges.last_mut() {
                    last.columns = columns;
                }
                rest = tail;
            }

            match rest.split_first() {
                None => break,
                Some((t, tail)) if t.kind == TokenKind::Comma => rest = tail,
                Some((t, _)) => return Err(unexpected("`,` or ON", t)),
            }
        }

        match sentinel {
            Some(span) if privileges.len() > 1 => {
                Err(GrantParseError::AllPrivilegesCombined { span })
            }
            _ => Ok(privileges),
        }
    }

    /// Resolves one comma-separated segment. The longest catalog match must
    /// cover every word of the segment.
    fn resolve_segment(
        &self,
        words: &[Token],
        span: Span,
    ) -> Result<GrantedPrivilege, GrantParseError> {
        let texts: Vec<&str> = words.iter().filter_map(Token::word).collect();
        match self.catalog.longest_match(&texts) {
            Some((name, used)) if used == texts.len() => Ok(GrantedPrivilege::new(name)),
            _ => Err(GrantParseError::UnknownPrivilege {
                name: texts.join(" "),
                span,
            }),
        }
    }

    /// Collects the target tokens after `ON`, stopping at `TO`.
    ///
    /// Lexer errors are kept as tokens here; only a missing `TO` fails.
    fn collect_target(&mut self) -> Result<Vec<Token>, GrantParseError> {
        let mut tokens = Vec::new();
        loop {
            match self.current.kind {
                TokenKind::Keyword(Keyword::To) => return Ok(tokens),
                TokenKind::Eof => return Err(GrantParseError::MissingTo),
                _ => tokens.push(self.bump()),
            }
        }
    }
}

/// Reads the privilege level out of the target tokens. Returns `None` for a
/// shape that is neither an object level nor a proxy account.
fn model_target(tokens: &[Token]) -> Option<GrantTarget> {
    match tokens {
        [user, at, host] if at.kind == TokenKind::At => {
            return Some(GrantTarget::Proxy {
                user: account_part(user)?,
                host: Some(account_part(host)?),
            });
        }
        [user] if matches!(user.kind, TokenKind::String(_)) => {
            return Some(GrantTarget::Proxy {
                user: account_part(user)?,
                host: None,
            });
        }
        _ => {}
    }

    let (kind, rest) = match tokens.first().map(|t| &t.kind) {
        Some(TokenKind::Keyword(Keyword::Table)) => (ObjectKind::Table, &tokens[1..]),
        Some(TokenKind::Keyword(Keyword::Function)) => (ObjectKind::Function, &tokens[1..]),
        Some(TokenKind::Keyword(Keyword::Procedure)) => (ObjectKind::Procedure, &tokens[1..]),
        _ => (ObjectKind::default(), tokens),
    };
    let (database, name) = match rest {
        [name] => (None, object_name(name)?),
        [database, dot, name] if dot.kind == TokenKind::Dot => {
            (Some(object_name(database)?), object_name(name)?)
        }
        _ => return None,
    };
    Some(GrantTarget::Object {
        kind,
        database,
        name,
    })
}

fn object_name(token: &Token) -> Option<ObjectName> {
    match &token.kind {
        TokenKind::Star => Some(ObjectName::Wildcard),
        TokenKind::Word(name) | TokenKind::QuotedIdentifier(name) => {
            Some(ObjectName::Named(name.clone()))
        }
        _ => None,
    }
}

/// User or host part of a proxy account, quoted or not.
fn account_part(token: &Token) -> Option<String> {
    match &token.kind {
        TokenKind::String(part) | TokenKind::QuotedIdentifier(part) | TokenKind::Word(part) => {
            Some(part.clone())
        }
        _ => None,
    }
}

fn unexpected(expected: &'static str, found: &Token) -> GrantParseError {
    GrantParseError::Unexpected {
        expected,
        found: found.kind.to_string(),
        span: found.span,
    }
}

/// Parses `( col [, col]* )` at the head of `tokens`, returning the column
/// names and the tokens after the closing parenthesis.
fn parse_column_list(
    tokens: &[Token],
    on_span: Span,
) -> Result<(Vec<String>, &[Token]), GrantParseError> {
    let mut columns = Vec::new();
    let mut i = 1;
    loop {
        match tokens.get(i).map(|t| &t.kind) {
            Some(TokenKind::Word(name) | TokenKind::QuotedIdentifier(name)) => {
                columns.push(name.clone());
            }
            Some(_) => return Err(unexpected("column name", &tokens[i])),
            None => {
                return Err(GrantParseError::Unexpected {
                    expected: "column name",
                    found: TokenKind::Keyword(Keyword::On).to_string(),
                    span: on_span,
                })
            }
        }
        i += 1;
        match tokens.get(i).map(|t| &t.kind) {
            Some(TokenKind::Comma) => i += 1,
            Some(TokenKind::RightParen) => return Ok((columns, &tokens[i + 1..])),
            Some(_) => return Err(unexpected("`,` or `)`", &tokens[i])),
            None => {
                return Err(GrantParseError::Unexpected {
                    expected: "`)`",
                    found: TokenKind::Keyword(Keyword::On).to_string(),
                    span: on_span,
                })
            }
        }
    }
}

/// Returns true if the grantee clause ends with `WITH GRANT OPTION`.
fn ends_with_grant_option(grantee: &str) -> bool {
    let mut words = grantee.split_whitespace().rev();
    matches!(
        (words.next(), words.next(), words.next()),
        (Some("OPTION"), Some("GRANT"), Some("WITH"))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(sql: &str) -> Grant {
        GrantParser::new(sql)
            .parse()
            .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
    }

    fn parse_err(sql: &str) -> GrantParseError {
        GrantParser::new(sql)
            .parse()
            .expect_err(&format!("Expected parse error for: {sql}"))
    }

    fn names(grant: &Grant) -> Vec<&str> {
        grant.privilege_names().map(|n| n.as_str()).collect()
    }

    #[test]
    fn test_single_privilege() {
        let grant = parse("GRANT SELECT ON *.* TO 'user'@'%'");
        assert_eq!(names(&grant), vec!["SELECT"]);
        assert!(grant.target.is_global());
        assert_eq!(grant.grantee, "'user'@'%'");
        assert!(!grant.with_grant_option);
    }

    #[test]
    fn test_multi_word_privileges() {
        let grant = parse("GRANT REPLICATION SLAVE, REPLICATION CLIENT ON *.* TO 'u'@'%'");
        assert_eq!(names(&grant), vec!["REPLICATION SLAVE", "REPLICATION CLIENT"]);
    }

    #[test]
    fn test_all_privileges_is_one_token() {
        let grant = parse("GRANT ALL PRIVILEGES ON *.* TO 'u'@'%'");
        assert_eq!(names(&grant), vec!["ALL PRIVILEGES"]);
        assert!(grant.is_all_privileges());
    }

    #[test]
    fn test_grant_option_privilege() {
        let grant = parse("GRANT SELECT, GRANT OPTION ON `db`.* TO 'u'@'%'");
        assert_eq!(names(&grant), vec!["SELECT", "GRANT OPTION"]);
    }

    #[test]
    fn test_trailing_clause_not_lexed() {
        let grant = parse("GRANT ALL PRIVILEGES ON *.* TO 'u'@'%' IDENTIFIED BY PASSWORD <secret> WITH GRANT OPTION");
        assert_eq!(names(&grant), vec!["ALL PRIVILEGES"]);
        assert!(grant.with_grant_option);
    }

    #[test]
    fn test_column_list() {
        let grant = parse("GRANT SELECT (`id`, name), INSERT (`email`) ON `db`.`users` TO 'u'@'%'");
        assert_eq!(names(&grant), vec!["SELECT", "INSERT"]);
        assert_eq!(grant.privileges[0].columns, vec!["id", "name"]);
        assert_eq!(grant.privileges[1].columns, vec!["email"]);
    }

    #[test]
    fn test_routine_target() {
        let grant = parse("GRANT EXECUTE ON FUNCTION db1.anomaly_score TO user1@domain-or-ip-address1");
        assert_eq!(names(&grant), vec!["EXECUTE"]);
        assert_eq!(
            grant.target,
            GrantTarget::Object {
                kind: ObjectKind::Function,
                database: Some(ObjectName::Named(String::from("db1"))),
                name: ObjectName::Named(String::from("anomaly_score")),
            }
        );
        assert_eq!(grant.grantee, "user1@domain-or-ip-address1");
    }

    #[test]
    fn test_proxy_target() {
        let grant = parse("GRANT PROXY ON ''@'' TO 'root'@'localhost' WITH GRANT OPTION");
        assert_eq!(names(&grant), vec!["PROXY"]);
        assert_eq!(
            grant.target,
            GrantTarget::Proxy {
                user: String::new(),
                host: Some(String::new()),
            }
        );
        assert!(grant.with_grant_option);
    }

    #[test]
    fn test_proxy_target_with_backticks() {
        let grant = parse("GRANT PROXY ON ``@`` TO `root`@`localhost` WITH GRANT OPTION");
        assert_eq!(names(&grant), vec!["PROXY"]);
        assert_eq!(
            grant.target,
            GrantTarget::Proxy {
                user: String::new(),
                host: Some(String::new()),
            }
        );
    }

    #[test]
    fn test_unmodeled_target_kept_as_text() {
        let grant = parse("GRANT RELOAD, SELECT ON my-db.* TO 'u'@'%'");
        assert_eq!(names(&grant), vec!["RELOAD", "SELECT"]);
        assert_eq!(grant.target, GrantTarget::Other(String::from("my-db.*")));
        assert_eq!(grant.grantee, "'u'@'%'");
    }

    #[test]
    fn test_model_target_shapes() {
        let target = |sql: &str| {
            let mut tokens = Lexer::new(sql).tokenize();
            tokens.pop();
            model_target(&tokens)
        };
        assert!(target("*.*").is_some_and(|t| t.is_global()));
        assert!(matches!(target("'u'"), Some(GrantTarget::Proxy { host: None, .. })));
        assert_eq!(target("db.*.*"), None);
        assert_eq!(target(""), None);
    }

    #[test]
    fn test_segment_must_be_one_privilege() {
        let err = parse_err("GRANT RELOAD SELECT ON *.* TO 'u'@'%'");
        assert!(
            matches!(&err, GrantParseError::UnknownPrivilege { name, .. } if name == "RELOAD SELECT")
        );
        assert_eq!(err.span(), Some(Span::new(6, 19)));
    }

    #[test]
    fn test_all_privileges_must_stand_alone() {
        assert!(matches!(
            parse_err("GRANT ALL PRIVILEGES, SELECT ON *.* TO 'u'@'%'"),
            GrantParseError::AllPrivilegesCombined { .. }
        ));
        assert!(matches!(
            parse_err("GRANT SELECT, ALL PRIVILEGES ON *.* TO 'u'@'%'"),
            GrantParseError::AllPrivilegesCombined { .. }
        ));
    }

    #[test]
    fn test_not_a_grant() {
        assert!(matches!(
            parse_err("CREATE DATABASE db1"),
            GrantParseError::NotAGrant { .. }
        ));
        assert!(matches!(
            parse_err("grant SELECT ON *.* TO u"),
            GrantParseError::NotAGrant { .. }
        ));
    }

    #[test]
    fn test_role_grant() {
        assert!(matches!(
            parse_err("GRANT `r1`@`%` TO `u`@`%`"),
            GrantParseError::RoleGrant { .. }
        ));
    }

    #[test]
    fn test_unknown_privilege() {
        let err = parse_err("GRANT all privileges ON *.* TO 'u'@'%'");
        assert!(
            matches!(&err, GrantParseError::UnknownPrivilege { name, .. } if name == "all privileges")
        );
    }

    #[test]
    fn test_missing_clauses() {
        assert_eq!(parse_err("GRANT SELECT"), GrantParseError::MissingOn);
        assert_eq!(parse_err("GRANT SELECT ON *.*"), GrantParseError::MissingTo);
        assert_eq!(parse_err("GRANT SELECT ON *.* TO   "), GrantParseError::MissingGrantee);
    }

    #[test]
    fn test_empty_privilege() {
        assert!(matches!(
            parse_err("GRANT SELECT,, INSERT ON *.* TO u"),
            GrantParseError::EmptyPrivilege { .. }
        ));
        assert!(matches!(
            parse_err("GRANT ON *.* TO u"),
            GrantParseError::EmptyPrivilege { .. }
        ));
    }

    #[test]
    fn test_ends_with_grant_option() {
        assert!(ends_with_grant_option("'u'@'%' WITH GRANT OPTION"));
        assert!(ends_with_grant_option("'u'@'%' WITH  GRANT\tOPTION "));
        assert!(!ends_with_grant_option("'u'@'%'"));
        assert!(!ends_with_grant_option("'u'@'%' GRANT OPTION"));
    }
}
