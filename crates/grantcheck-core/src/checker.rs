//! Named privilege policies and the checker that runs them.
//!
//! The checker does not talk to a database. Whatever runs `SHOW GRANTS`
//! implements [`GrantSource`]; the checker turns its output into a
//! [`CheckResult`].

use std::convert::Infallible;
use std::fmt;

use tracing::{info, warn};

use crate::privilege::PrivilegeName;
use crate::verify::{verify, CheckResult, State};

/// A required-privilege list for one kind of sensitive operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Full data dump: `RELOAD` for `FLUSH TABLES WITH READ LOCK`, plus
    /// `SELECT`.
    Dump,
    /// Binlog replication: `REPLICATION SLAVE` and `REPLICATION CLIENT`.
    Replication,
}

impl Policy {
    /// Every policy, in check order.
    pub const ALL: [Self; 2] = [Self::Dump, Self::Replication];

    /// The privileges this policy requires.
    #[must_use]
    pub fn required(&self) -> Vec<PrivilegeName> {
        let names: &[&str] = match self {
            Self::Dump => &["RELOAD", "SELECT"],
            Self::Replication => &["REPLICATION SLAVE", "REPLICATION CLIENT"],
        };
        names.iter().copied().map(PrivilegeName::new).collect()
    }

    /// Short name of the policy.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dump => "dump",
            Self::Replication => "replication",
        }
    }

    /// Name of the check that enforces this policy.
    #[must_use]
    pub const fn checker_name(&self) -> &'static str {
        match self {
            Self::Dump => "source db dump privilege checker",
            Self::Replication => "source db replication privilege checker",
        }
    }

    /// What the check verifies.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Dump => "check dump privileges of source DB",
            Self::Replication => "check replication privileges of source DB",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provides the raw `SHOW GRANTS` lines of the account under check.
pub trait GrantSource {
    type Error: fmt::Display;

    /// Returns the account's grant statements, one per line.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the grants cannot be fetched.
    fn show_grants(&self) -> Result<Vec<String>, Self::Error>;
}

/// Grants that are already in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticGrants(pub Vec<String>);

impl StaticGrants {
    #[must_use]
    pub fn new<S: Into<String>>(grants: impl IntoIterator<Item = S>) -> Self {
        Self(grants.into_iter().map(Into::into).collect())
    }
}

impl GrantSource for StaticGrants {
    type Error = Infallible;

    fn show_grants(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.0.clone())
    }
}

/// Runs one policy against one grant source.
#[derive(Debug, Clone)]
pub struct PrivilegeChecker<S> {
    source: S,
    name: String,
    description: String,
    required: Vec<PrivilegeName>,
}

impl<S: GrantSource> PrivilegeChecker<S> {
    /// Creates a checker for a predefined policy.
    #[must_use]
    pub fn new(source: S, policy: Policy) -> Self {
        Self {
            source,
            name: policy.checker_name().to_string(),
            description: policy.description().to_string(),
            required: policy.required(),
        }
    }

    /// Creates a checker for an ad-hoc privilege list.
    #[must_use]
    pub fn custom(source: S, name: impl Into<String>, required: Vec<PrivilegeName>) -> Self {
        let required_text = required
            .iter()
            .map(PrivilegeName::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            source,
            name: name.into(),
            description: format!("check privileges {required_text}"),
            required,
        }
    }

    /// Name of the check.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The privileges this checker requires.
    #[must_use]
    pub fn required(&self) -> &[PrivilegeName] {
        &self.required
    }

    /// Fetches the grants and verifies them.
    ///
    /// A source error is reported as a failed check, never propagated.
    #[must_use]
    pub fn check(&self, id: u64) -> CheckResult {
        let mut result = CheckResult::new(id, &self.name, &self.description);
        match self.source.show_grants() {
            Ok(grants) => {
                let verdict = verify(&grants, &self.required);
                result.record(&verdict);
                info!(check = %self.name, state = %result.state, "Privilege check finished");
            }
            Err(e) => {
                warn!(check = %self.name, error = %e, "Failed to fetch grants");
                result.state = State::Failure;
                result.error_msg = format!("failed to fetch grants: {e}");
                result.instruction = String::from(
                    "make sure the account can run SHOW GRANTS against the source database",
                );
            }
        }
        result
    }
}
