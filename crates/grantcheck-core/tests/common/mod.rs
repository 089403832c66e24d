#![allow(dead_code)]

use grantcheck_core::{parse_grant, privileges, verify, Grant, GrantParseError, PrivilegeName, State};

pub fn dump_privileges() -> Vec<PrivilegeName> {
    privileges(&["RELOAD", "SELECT"])
}

pub fn replication_privileges() -> Vec<PrivilegeName> {
    privileges(&["REPLICATION SLAVE", "REPLICATION CLIENT"])
}

pub fn parse(sql: &str) -> Grant {
    parse_grant(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_err(sql: &str) -> GrantParseError {
    parse_grant(sql)
        .err()
        .unwrap_or_else(|| panic!("Expected parse error for: {sql}"))
}

/// Privilege names of `sql` in statement order.
pub fn privilege_names(sql: &str) -> Vec<String> {
    parse(sql)
        .privilege_names()
        .map(|n| n.as_str().to_string())
        .collect()
}

/// Verifies `grants` against the dump and replication policies.
pub fn dump_and_replication(grants: &[&str]) -> (State, State) {
    (
        verify(grants, &dump_privileges()).state,
        verify(grants, &replication_privileges()).state,
    )
}
