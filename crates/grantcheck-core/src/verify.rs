//! Checks aggregated grants against a required privilege list.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::aggregate::aggregate;
use crate::privilege::PrivilegeName;

/// Outcome of a privilege check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Success,
    #[default]
    Failure,
}

impl State {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The answer to one verification call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub state: State,
    /// Required privileges absent from the grants, in required order.
    pub missing: Vec<PrivilegeName>,
}

impl Verdict {
    #[must_use]
    pub const fn success() -> Self {
        Self {
            state: State::Success,
            missing: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.state == State::Success
    }

    /// Human-readable list of missing privileges, or `None` on success.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        if self.is_success() {
            return None;
        }
        Some(format!("lack of privileges: {}", join(&self.missing)))
    }

    /// Suggested fix for a failed check, or `None` on success.
    #[must_use]
    pub fn instruction(&self) -> Option<String> {
        if self.is_success() {
            return None;
        }
        Some(format!(
            "grant the missing privileges to the account, e.g. `GRANT {} ON *.* TO <user>`",
            join(&self.missing)
        ))
    }
}

fn join(names: &[PrivilegeName]) -> String {
    names
        .iter()
        .map(PrivilegeName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decides whether `statements` grant every privilege in `required`.
///
/// `ALL PRIVILEGES` anywhere in the grants satisfies any requirement.
/// Otherwise each required name must appear verbatim (case-sensitive) in the
/// union of the parseable statements. The union is recomputed on each call.
#[must_use]
pub fn verify<S: AsRef<str>>(statements: &[S], required: &[PrivilegeName]) -> Verdict {
    let granted = aggregate(statements);
    if granted.has_all_privileges() {
        debug!(statements = statements.len(), "ALL PRIVILEGES granted");
        return Verdict::success();
    }

    let missing: Vec<PrivilegeName> = required
        .iter()
        .filter(|name| !granted.contains(name.as_str()))
        .cloned()
        .collect();
    let state = if missing.is_empty() {
        State::Success
    } else {
        State::Failure
    };
    debug!(
        statements = statements.len(),
        unparsed = granted.unparsed(),
        missing = missing.len(),
        %state,
        "Verified privileges"
    );
    Verdict { state, missing }
}

/// A caller-owned check result, the shape a check-orchestration layer keeps
/// per check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub id: u64,
    pub name: String,
    pub desc: String,
    pub state: State,
    pub error_msg: String,
    pub instruction: String,
}

impl CheckResult {
    /// Creates a result in the `Failure` state with no detail.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            desc: desc.into(),
            ..Self::default()
        }
    }

    /// Overwrites state and detail with `verdict`. Nothing from a previous
    /// verdict survives.
    pub fn record(&mut self, verdict: &Verdict) {
        self.state = verdict.state;
        self.error_msg = verdict.error_message().unwrap_or_default();
        self.instruction = verdict.instruction().unwrap_or_default();
    }
}

/// Accumulator-style wrapper around [`verify`].
///
/// Each call answers one independent question: the result's state and detail
/// are replaced, never merged with an earlier call's.
pub fn verify_privileges<S: AsRef<str>>(
    result: &mut CheckResult,
    statements: &[S],
    required: &[PrivilegeName],
) {
    result.record(&verify(statements, required));
}
