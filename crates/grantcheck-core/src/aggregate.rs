//! Union of privileges across the grant lines of one account.

use std::collections::BTreeSet;

use tracing::debug;

use crate::parser::parse_grant;
use crate::privilege::PrivilegeName;

/// The privileges held by an account, as the union of all parseable grants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantSet {
    privileges: BTreeSet<PrivilegeName>,
    unparsed: usize,
}

impl GrantSet {
    /// Returns true if `name` was granted explicitly.
    ///
    /// This does not expand `ALL PRIVILEGES`; see [`Self::has_all_privileges`].
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.privileges.contains(name)
    }

    /// Returns true if any grant carried the `ALL PRIVILEGES` sentinel.
    #[must_use]
    pub fn has_all_privileges(&self) -> bool {
        self.privileges.iter().any(PrivilegeName::is_all_privileges)
    }

    /// Number of lines that were skipped because they did not parse.
    #[must_use]
    pub const fn unparsed(&self) -> usize {
        self.unparsed
    }

    /// Number of distinct privileges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.privileges.len()
    }

    /// Returns true if no privilege was granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.privileges.is_empty()
    }

    /// Iterates over the granted privileges in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &PrivilegeName> {
        self.privileges.iter()
    }
}

/// Parses every statement and returns the union of their privileges.
///
/// Statements that fail to parse contribute nothing; they are logged and
/// counted but never abort the batch.
#[must_use]
pub fn aggregate<S: AsRef<str>>(statements: &[S]) -> GrantSet {
    let mut set = GrantSet::default();
    for statement in statements {
        let statement = statement.as_ref();
        match parse_grant(statement) {
            Ok(grant) => {
                set.privileges
                    .extend(grant.privileges.into_iter().map(|p| p.name));
            }
            Err(e) => {
                debug!(%statement, error = %e, "Skipping unparseable grant");
                set.unparsed += 1;
            }
        }
    }
    set
}
