//! Role-based permission model.
//!
//! Roles are stored on the user record as a list of role identifiers;
//! permissions are derived from them at check time. The mapping is fixed
//! in code rather than configurable.

use serde::{Deserialize, Serialize};

/// A permission gating a specific operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Permission {
    /// View the admin user list.
    UsersAdminList,
    /// Schedule/revert account deletions.
    UsersAdminManage,
    /// Edit other users' roles.
    UsersAdminAssignRoles,
    /// Manage own profile and view the tag taxonomy.
    UsersManageProfile,
    /// Book desks / appear on the hub map.
    VisitsCreate,
    /// View office visitors for a date.
    VisitsList,
}

/// A user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Standard office member.
    Regular,
    /// Low-priority visitor role.
    Guest,
}

impl Role {
    /// All known role identifiers.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Regular, Self::Guest];

    /// Parse a role identifier.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "admin" => Some(Self::Admin),
            "regular" => Some(Self::Regular),
            "guest" => Some(Self::Guest),
            _ => None,
        }
    }

    /// The stable identifier stored on user records.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Regular => "regular",
            Self::Guest => "guest",
        }
    }

    /// Permissions granted by this role.
    #[must_use]
    pub const fn permissions(self) -> &'static [Permission] {
        match self {
            Self::Admin => &[
                Permission::UsersAdminList,
                Permission::UsersAdminManage,
                Permission::UsersAdminAssignRoles,
                Permission::UsersManageProfile,
                Permission::VisitsCreate,
                Permission::VisitsList,
            ],
            Self::Regular => &[
                Permission::UsersManageProfile,
                Permission::VisitsCreate,
                Permission::VisitsList,
            ],
            Self::Guest => &[],
        }
    }
}

/// Collect the permissions granted by a set of role identifiers.
///
/// Unknown role identifiers grant nothing.
#[must_use]
pub fn permissions_for_roles(role_ids: &[String]) -> Vec<Permission> {
    let mut perms: Vec<Permission> = role_ids
        .iter()
        .filter_map(|id| Role::parse(id))
        .flat_map(|role| role.permissions().iter().copied())
        .collect();
    perms.sort_by_key(|p| *p as u8);
    perms.dedup();
    perms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_holds_all_permissions() {
        let perms = permissions_for_roles(&["admin".to_string()]);
        assert!(perms.contains(&Permission::UsersAdminList));
        assert!(perms.contains(&Permission::UsersAdminAssignRoles));
        assert!(perms.contains(&Permission::VisitsCreate));
    }

    #[test]
    fn test_regular_cannot_administer_users() {
        let perms = permissions_for_roles(&["regular".to_string()]);
        assert!(perms.contains(&Permission::VisitsCreate));
        assert!(perms.contains(&Permission::UsersManageProfile));
        assert!(!perms.contains(&Permission::UsersAdminList));
    }

    #[test]
    fn test_guest_holds_nothing() {
        assert!(permissions_for_roles(&["guest".to_string()]).is_empty());
    }

    #[test]
    fn test_unknown_role_grants_nothing() {
        assert!(permissions_for_roles(&["superuser".to_string()]).is_empty());
    }

    #[test]
    fn test_role_parse_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.id()), Some(role));
        }
        assert_eq!(Role::parse("nope"), None);
    }
}
