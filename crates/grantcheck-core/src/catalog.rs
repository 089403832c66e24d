//! The closed set of privilege names the parser recognizes.
//!
//! Grant statements separate privileges with commas but a single privilege
//! may span several words (`CREATE TEMPORARY TABLES`), and some of those
//! words are privileges on their own (`CREATE`). The catalog resolves a run
//! of words by trying the longest candidate first.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::privilege::{PrivilegeName, ALL_PRIVILEGES};

/// Static privileges printed by MySQL and MariaDB.
const STATIC_PRIVILEGES: &[&str] = &[
    ALL_PRIVILEGES,
    "ALTER",
    "ALTER ROUTINE",
    "CREATE",
    "CREATE ROLE",
    "CREATE ROUTINE",
    "CREATE TABLESPACE",
    "CREATE TEMPORARY TABLES",
    "CREATE USER",
    "CREATE VIEW",
    "DELETE",
    "DELETE HISTORY",
    "DROP",
    "DROP ROLE",
    "EVENT",
    "EXECUTE",
    "FILE",
    "GRANT OPTION",
    "INDEX",
    "INSERT",
    "LOCK TABLES",
    "PROCESS",
    "PROXY",
    "REFERENCES",
    "RELOAD",
    "REPLICATION CLIENT",
    "REPLICATION SLAVE",
    "SELECT",
    "SHOW DATABASES",
    "SHOW VIEW",
    "SHUTDOWN",
    "SUPER",
    "TRIGGER",
    "UPDATE",
    "USAGE",
];

/// Amazon Aurora extensions.
const AURORA_PRIVILEGES: &[&str] = &[
    "LOAD FROM S3",
    "SELECT INTO S3",
    "INVOKE LAMBDA",
    "INVOKE SAGEMAKER",
    "INVOKE COMPREHEND",
];

/// MariaDB administrative privileges split out of `SUPER`.
const MARIADB_PRIVILEGES: &[&str] = &[
    "BINLOG ADMIN",
    "BINLOG MONITOR",
    "BINLOG REPLAY",
    "CONNECTION ADMIN",
    "FEDERATED ADMIN",
    "READ_ONLY ADMIN",
    "REPLICATION MASTER ADMIN",
    "REPLICATION SLAVE ADMIN",
    "SET USER",
    "SHOW CREATE ROUTINE",
    "SLAVE MONITOR",
];

/// MySQL 8 dynamic privileges, which `SHOW GRANTS` lists on their own line.
const DYNAMIC_PRIVILEGES: &[&str] = &[
    "APPLICATION_PASSWORD_ADMIN",
    "AUDIT_ABORT_EXEMPT",
    "AUDIT_ADMIN",
    "AUTHENTICATION_POLICY_ADMIN",
    "BACKUP_ADMIN",
    "BINLOG_ADMIN",
    "BINLOG_ENCRYPTION_ADMIN",
    "CLONE_ADMIN",
    "CONNECTION_ADMIN",
    "ENCRYPTION_KEY_ADMIN",
    "FIREWALL_EXEMPT",
    "FLUSH_OPTIMIZER_COSTS",
    "FLUSH_STATUS",
    "FLUSH_TABLES",
    "FLUSH_USER_RESOURCES",
    "GROUP_REPLICATION_ADMIN",
    "GROUP_REPLICATION_STREAM",
    "INNODB_REDO_LOG_ARCHIVE",
    "INNODB_REDO_LOG_ENABLE",
    "PASSWORDLESS_USER_ADMIN",
    "PERSIST_RO_VARIABLES_ADMIN",
    "REPLICATION_APPLIER",
    "REPLICATION_SLAVE_ADMIN",
    "RESOURCE_GROUP_ADMIN",
    "RESOURCE_GROUP_USER",
    "ROLE_ADMIN",
    "SENSITIVE_VARIABLES_OBSERVER",
    "SERVICE_CONNECTION_ADMIN",
    "SESSION_VARIABLES_ADMIN",
    "SET_USER_ID",
    "SHOW_ROUTINE",
    "SYSTEM_USER",
    "SYSTEM_VARIABLES_ADMIN",
    "TABLE_ENCRYPTION_ADMIN",
    "TELEMETRY_LOG_ADMIN",
    "XA_RECOVER_ADMIN",
];

static CATALOG: LazyLock<PrivilegeCatalog> = LazyLock::new(|| {
    PrivilegeCatalog::from_names(
        STATIC_PRIVILEGES
            .iter()
            .chain(AURORA_PRIVILEGES)
            .chain(MARIADB_PRIVILEGES)
            .chain(DYNAMIC_PRIVILEGES)
            .copied(),
    )
});

/// A read-only registry of privilege names keyed by normalized text.
#[derive(Debug, Clone)]
pub struct PrivilegeCatalog {
    names: HashSet<&'static str>,
    /// Word count of the longest entry.
    max_words: usize,
}

impl PrivilegeCatalog {
    /// Returns the process-wide catalog, built on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &CATALOG
    }

    fn from_names(names: impl Iterator<Item = &'static str>) -> Self {
        let names: HashSet<&'static str> = names.collect();
        let max_words = names
            .iter()
            .map(|n| n.split(' ').count())
            .max()
            .unwrap_or(0);
        Self { names, max_words }
    }

    /// Returns true if `name` is a known privilege (exact, case-sensitive).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Word count of the longest entry.
    #[must_use]
    pub const fn max_words(&self) -> usize {
        self.max_words
    }

    /// Number of entries, including the `ALL PRIVILEGES` sentinel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolves the longest privilege that `words` starts with.
    ///
    /// Returns the privilege together with the number of words it consumed,
    /// or `None` if no prefix of `words` is a known privilege.
    #[must_use]
    pub fn longest_match(&self, words: &[&str]) -> Option<(PrivilegeName, usize)> {
        let longest = self.max_words.min(words.len());
        (1..=longest).rev().find_map(|n| {
            let candidate = words[..n].join(" ");
            self.names
                .contains(candidate.as_str())
                .then(|| (PrivilegeName::new(&candidate), n))
        })
    }

    /// Iterates over every entry in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = PrivilegeName> + '_ {
        self.names.iter().map(|n| PrivilegeName::new(n))
    }
}
