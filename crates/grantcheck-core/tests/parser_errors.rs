//! Tests for lines that are not privilege grants.

mod common;
use common::*;

use grantcheck_core::{GrantParseError, State};

#[test]
fn error_empty_input() {
    assert!(matches!(parse_err(""), GrantParseError::NotAGrant { .. }));
}

#[test]
fn error_invalid_text() {
    assert!(matches!(
        parse_err("invalid SQL statement"),
        GrantParseError::NotAGrant { .. }
    ));
}

#[test]
fn error_non_grant_sql() {
    assert!(matches!(
        parse_err("CREATE DATABASE db1"),
        GrantParseError::NotAGrant { .. }
    ));
}

#[test]
fn error_lowercase_grant_keyword() {
    assert!(matches!(
        parse_err("grant select on *.* to 'u'@'%'"),
        GrantParseError::NotAGrant { .. }
    ));
}

#[test]
fn error_role_grant() {
    assert!(matches!(
        parse_err("GRANT `app_read`@`%` TO `alice`@`%`"),
        GrantParseError::RoleGrant { .. }
    ));
    assert!(matches!(
        parse_err("GRANT app_read TO alice"),
        GrantParseError::RoleGrant { .. }
    ));
}

#[test]
fn error_lowercase_privileges() {
    assert!(matches!(
        parse_err("GRANT all privileges ON *.* TO 'user'@'%'"),
        GrantParseError::UnknownPrivilege { .. }
    ));
}

#[test]
fn error_one_unknown_privilege_spoils_statement() {
    let err = parse_err("GRANT SELECT, FROBNICATE, RELOAD ON *.* TO 'u'@'%'");
    assert!(matches!(err, GrantParseError::UnknownPrivilege { ref name, .. } if name == "FROBNICATE"));
}

#[test]
fn error_partial_multi_word_privilege() {
    assert!(matches!(
        parse_err("GRANT TEMPORARY TABLES ON *.* TO 'u'@'%'"),
        GrantParseError::UnknownPrivilege { .. }
    ));
}

#[test]
fn error_missing_on() {
    assert_eq!(parse_err("GRANT SELECT, RELOAD"), GrantParseError::MissingOn);
}

#[test]
fn error_missing_to() {
    assert_eq!(parse_err("GRANT SELECT ON *.*"), GrantParseError::MissingTo);
}

#[test]
fn error_missing_grantee() {
    assert_eq!(parse_err("GRANT SELECT ON *.* TO"), GrantParseError::MissingGrantee);
}

#[test]
fn error_trailing_comma() {
    assert!(matches!(
        parse_err("GRANT SELECT, ON *.* TO 'u'@'%'"),
        GrantParseError::EmptyPrivilege { .. }
    ));
}

#[test]
fn error_privileges_without_comma() {
    let sql = "GRANT RELOAD SELECT ON *.* TO 'u'@'%'";
    assert!(matches!(
        parse_err(sql),
        GrantParseError::UnknownPrivilege { ref name, .. } if name == "RELOAD SELECT"
    ));
    assert_eq!(dump_and_replication(&[sql]), (State::Failure, State::Failure));
}

#[test]
fn error_multi_word_privilege_run_together() {
    assert!(matches!(
        parse_err("GRANT REPLICATION SLAVE REPLICATION CLIENT ON *.* TO 'u'@'%'"),
        GrantParseError::UnknownPrivilege { .. }
    ));
}

#[test]
fn error_all_privileges_with_others() {
    let sql = "GRANT ALL PRIVILEGES, SELECT ON *.* TO 'u'@'%'";
    assert!(matches!(
        parse_err(sql),
        GrantParseError::AllPrivilegesCombined { .. }
    ));
    assert_eq!(dump_and_replication(&[sql]), (State::Failure, State::Failure));
}

#[test]
fn error_unterminated_identifier_in_target_hides_to() {
    assert_eq!(
        parse_err("GRANT SELECT ON `db.* TO 'u'@'%'"),
        GrantParseError::MissingTo
    );
}

#[test]
fn error_lexer_error_in_privilege_list() {
    assert!(matches!(
        parse_err("GRANT SELECT; ON *.* TO 'u'@'%'"),
        GrantParseError::Lex { .. }
    ));
}

#[test]
fn error_unclosed_column_list() {
    assert!(parse_grant_fails("GRANT SELECT (`id` ON `db`.`t` TO 'u'@'%'"));
}

fn parse_grant_fails(sql: &str) -> bool {
    grantcheck_core::parse_grant(sql).is_err()
}
