//! Parsed representation of a GRANT statement.

use std::fmt;

use crate::privilege::PrivilegeName;

/// One parsed `GRANT ... ON ... TO ...` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    /// Privileges in the order they appear in the statement.
    pub privileges: Vec<GrantedPrivilege>,
    /// The privilege level the statement names. Informational only.
    pub target: GrantTarget,
    /// Everything after `TO`: the grantee and any trailing clause, verbatim.
    pub grantee: String,
    /// Whether the statement ends with `WITH GRANT OPTION`.
    pub with_grant_option: bool,
}

impl Grant {
    /// Iterates over the privilege names in statement order.
    pub fn privilege_names(&self) -> impl Iterator<Item = &PrivilegeName> {
        self.privileges.iter().map(|p| &p.name)
    }

    /// Returns true if the statement grants `ALL PRIVILEGES`.
    #[must_use]
    pub fn is_all_privileges(&self) -> bool {
        self.privilege_names().any(PrivilegeName::is_all_privileges)
    }
}

/// A privilege as written in the privilege list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantedPrivilege {
    pub name: PrivilegeName,
    /// Column list for column-level grants such as `SELECT (a, b)`; empty
    /// when the privilege covers the whole object.
    pub columns: Vec<String>,
}

impl GrantedPrivilege {
    #[must_use]
    pub const fn new(name: PrivilegeName) -> Self {
        Self {
            name,
            columns: Vec::new(),
        }
    }
}

impl fmt::Display for GrantedPrivilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.columns.is_empty() {
            let columns: Vec<String> = self.columns.iter().map(|c| quote_identifier(c)).collect();
            write!(f, " ({})", columns.join(", "))?;
        }
        Ok(())
    }
}

/// Object type prefix of a grant target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectKind {
    #[default]
    Table,
    Function,
    Procedure,
}

impl ObjectKind {
    /// Returns the keyword spelling of the object kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::Function => "FUNCTION",
            Self::Procedure => "PROCEDURE",
        }
    }
}

/// A database or object name in a grant target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectName {
    /// `*`
    Wildcard,
    Named(String),
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str("*"),
            Self::Named(name) => f.write_str(&quote_identifier(name)),
        }
    }
}

/// What a grant applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantTarget {
    /// A privilege level: `*`, `*.*`, `db.*`, `db.tbl` or a routine.
    Object {
        kind: ObjectKind,
        /// `None` when the target names no database (`*` or `tbl`).
        database: Option<ObjectName>,
        name: ObjectName,
    },
    /// `GRANT PROXY ON 'user'@'host'`.
    Proxy { user: String, host: Option<String> },
    /// Any other text between `ON` and `TO`, trimmed.
    Other(String),
}

impl GrantTarget {
    /// Returns true for the global level, `*.*`.
    #[must_use]
    pub const fn is_global(&self) -> bool {
        matches!(
            self,
            Self::Object {
                kind: ObjectKind::Table,
                database: Some(ObjectName::Wildcard),
                name: ObjectName::Wildcard,
            }
        )
    }
}

impl fmt::Display for GrantTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object {
                kind,
                database,
                name,
            } => {
                if *kind != ObjectKind::Table {
                    write!(f, "{} ", kind.as_str())?;
                }
                if let Some(database) = database {
                    write!(f, "{database}.")?;
                }
                write!(f, "{name}")
            }
            Self::Proxy { user, host } => {
                write!(f, "'{}'", user.replace('\'', "''"))?;
                if let Some(host) = host {
                    write!(f, "@'{}'", host.replace('\'', "''"))?;
                }
                Ok(())
            }
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(database: Option<ObjectName>, name: ObjectName) -> GrantTarget {
        GrantTarget::Object {
            kind: ObjectKind::Table,
            database,
            name,
        }
    }

    #[test]
    fn test_global_target() {
        let target = object(Some(ObjectName::Wildcard), ObjectName::Wildcard);
        assert!(target.is_global());
        assert_eq!(target.to_string(), "*.*");
    }

    #[test]
    fn test_database_target_is_not_global() {
        let target = object(
            Some(ObjectName::Named(String::from("db1"))),
            ObjectName::Wildcard,
        );
        assert!(!target.is_global());
        assert_eq!(target.to_string(), "`db1`.*");
    }

    #[test]
    fn test_routine_target_display() {
        let target = GrantTarget::Object {
            kind: ObjectKind::Function,
            database: Some(ObjectName::Named(String::from("db1"))),
            name: ObjectName::Named(String::from("anomaly_score")),
        };
        assert_eq!(target.to_string(), "FUNCTION `db1`.`anomaly_score`");
    }

    #[test]
    fn test_proxy_target_display() {
        let target = GrantTarget::Proxy {
            user: String::new(),
            host: Some(String::new()),
        };
        assert_eq!(target.to_string(), "''@''");
    }

    #[test]
    fn test_other_target_display() {
        let target = GrantTarget::Other(String::from("my-db.*"));
        assert!(!target.is_global());
        assert_eq!(target.to_string(), "my-db.*");
    }

    #[test]
    fn test_granted_privilege_display() {
        let mut privilege = GrantedPrivilege::new(PrivilegeName::new("SELECT"));
        assert_eq!(privilege.to_string(), "SELECT");
        privilege.columns = vec![String::from("id"), String::from("name")];
        assert_eq!(privilege.to_string(), "SELECT (`id`, `name`)");
    }
}
