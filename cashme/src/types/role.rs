use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Recognized role. Labels from the server are free-form; they are mapped
/// onto this set once, when the profile is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Owner,
    Admin,
    Member,
}

impl Role {
    /// Map a server label to a role. Case-insensitive substring match;
    /// `owner` wins over `admin`, anything unrecognized is a member.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_ascii_lowercase();
        if label.contains("owner") {
            Role::Owner
        } else if label.contains("admin") {
            Role::Admin
        } else {
            Role::Member
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Owner => "Owner",
            Role::Admin => "Admin",
            Role::Member => "Member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The roles held by a user.
///
/// Owner is a superset of admin: every admin check passes for an owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            labels
                .into_iter()
                .map(|l| Role::from_label(l.as_ref()))
                .collect(),
        )
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.contains(Role::Admin) || self.contains(Role::Owner)
    }

    pub fn is_owner(&self) -> bool {
        self.contains(Role::Owner)
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for RoleSet {
    fn from(labels: Vec<String>) -> Self {
        Self::from_labels(labels)
    }
}

impl From<RoleSet> for Vec<String> {
    fn from(roles: RoleSet) -> Self {
        roles.iter().map(|r| r.as_str().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_is_case_insensitive() {
        for label in ["ADMIN", "admin", "Admin"] {
            let roles = RoleSet::from_labels([label]);
            assert!(roles.is_admin(), "{label} should be admin");
            assert!(!roles.is_owner());
        }
    }

    #[test]
    fn test_owner_implies_admin() {
        let roles = RoleSet::from_labels(["Owner"]);
        assert!(roles.is_admin());
        assert!(roles.is_owner());
    }

    #[test]
    fn test_substring_match() {
        assert_eq!(Role::from_label("ROLE_ADMIN"), Role::Admin);
        assert_eq!(Role::from_label("SuperAdmin"), Role::Admin);
        assert_eq!(Role::from_label("co-owner"), Role::Owner);
    }

    #[test]
    fn test_unrecognized_is_member() {
        let roles = RoleSet::from_labels(["Member", "User", "whatever"]);
        assert!(!roles.is_admin());
        assert!(!roles.is_owner());
        assert!(roles.contains(Role::Member));
    }

    #[test]
    fn test_empty_roles() {
        let roles = RoleSet::default();
        assert!(roles.is_empty());
        assert!(!roles.is_admin());
    }
}
