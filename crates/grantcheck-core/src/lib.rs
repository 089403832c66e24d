//! # grantcheck-core
//!
//! Decides whether a MySQL-family account holds the privileges a sensitive
//! operation needs, from nothing but the account's `SHOW GRANTS` output.
//!
//! This crate provides:
//! - A hand-written lexer and recursive descent parser for GRANT statements
//! - A catalog of privilege names, resolved longest-match first so that
//!   multi-word privileges like `CREATE TEMPORARY TABLES` stay whole
//! - Aggregation of privileges across every grant line of the account
//! - A verifier with the `ALL PRIVILEGES` shortcut and missing-privilege
//!   diagnostics
//!
//! ## Verifying grants
//!
//! ```rust
//! use grantcheck_core::{privileges, verify, State};
//!
//! let grants = [
//!     "GRANT REPLICATION SLAVE ON *.* TO 'repl'@'%'",
//!     "GRANT REPLICATION CLIENT ON *.* TO 'repl'@'%'",
//! ];
//!
//! let verdict = verify(&grants, &privileges(&["REPLICATION SLAVE", "REPLICATION CLIENT"]));
//! assert_eq!(verdict.state, State::Success);
//!
//! let verdict = verify(&grants, &privileges(&["RELOAD", "SELECT"]));
//! assert_eq!(verdict.state, State::Failure);
//! assert_eq!(verdict.missing.len(), 2);
//! ```
//!
//! ## Parsing a single statement
//!
//! ```rust
//! use grantcheck_core::parse_grant;
//!
//! let grant = parse_grant(
//!     "GRANT LOAD FROM S3, SELECT, CREATE TEMPORARY TABLES ON *.* TO 'root'@'%'",
//! )
//! .expect("valid grant");
//! let names: Vec<&str> = grant.privilege_names().map(|n| n.as_str()).collect();
//! assert_eq!(names, ["LOAD FROM S3", "SELECT", "CREATE TEMPORARY TABLES"]);
//!
//! // Role grants and other SQL are not privilege grants.
//! assert!(parse_grant("GRANT `admin`@`%` TO `alice`@`%`").is_err());
//! assert!(parse_grant("CREATE DATABASE db1").is_err());
//! ```
//!
//! ## Policies
//!
//! [`Policy::Dump`] and [`Policy::Replication`] carry the privilege lists
//! for a full dump and for binlog replication. [`PrivilegeChecker`] runs a
//! policy against any [`GrantSource`].

pub mod aggregate;
pub mod catalog;
pub mod checker;
pub mod grant;
pub mod lexer;
pub mod parser;
pub mod privilege;
pub mod verify;

pub use aggregate::{aggregate, GrantSet};
pub use catalog::PrivilegeCatalog;
pub use checker::{GrantSource, Policy, PrivilegeChecker, StaticGrants};
pub use grant::{Grant, GrantTarget, GrantedPrivilege, ObjectKind, ObjectName};
pub use parser::{parse_grant, GrantParseError, GrantParser, ParsedGrant};
pub use privilege::{privileges, PrivilegeName, ALL_PRIVILEGES};
pub use verify::{verify, verify_privileges, CheckResult, State, Verdict};
