//! Canonical privilege names.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Spelling of the sentinel that grants every privilege.
pub const ALL_PRIVILEGES: &str = "ALL PRIVILEGES";

/// The canonical name of one privilege (e.g. `SELECT`, `REPLICATION SLAVE`).
///
/// Runs of whitespace collapse to a single space on construction. Case is
/// kept as given: `select` and `SELECT` are different names, and only the
/// uppercase form ever matches a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PrivilegeName(String);

impl PrivilegeName {
    /// Creates a privilege name, normalizing internal whitespace.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    /// The `ALL PRIVILEGES` sentinel.
    #[must_use]
    pub fn all_privileges() -> Self {
        Self(String::from(ALL_PRIVILEGES))
    }

    /// Returns true for the `ALL PRIVILEGES` sentinel.
    #[must_use]
    pub fn is_all_privileges(&self) -> bool {
        self.0 == ALL_PRIVILEGES
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrivilegeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PrivilegeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PrivilegeName {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<PrivilegeName> for String {
    fn from(name: PrivilegeName) -> Self {
        name.0
    }
}

impl AsRef<str> for PrivilegeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PrivilegeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Builds a required-privilege list from string names.
#[must_use]
pub fn privileges<S: AsRef<str>>(names: &[S]) -> Vec<PrivilegeName> {
    names.iter().map(|n| PrivilegeName::new(n.as_ref())).collect()
}
