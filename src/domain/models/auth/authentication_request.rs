use crate::domain::entities::users::user::UserPermission;

/// Authentication mode of a guarded scope.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// A valid token is mandatory
    Required,
    /// A token is verified when present, anonymous requests pass
    Optional,
}

/// Role requirement of a guarded scope.
#[derive(Debug, Clone)]
pub enum RequiredRole {
    /// One specific role
    Single(String),
    /// Any of the listed roles (OR)
    Any(Vec<String>),
}

impl RequiredRole {
    /// Whether the caller's role satisfies the requirement.
    pub fn is_satisfied(&self, user_role: &str) -> bool {
        match self {
            RequiredRole::Single(required) => user_role == required,
            RequiredRole::Any(required) => required.iter().any(|role| user_role == role),
        }
    }
}

/// Permission requirement of a guarded scope. All listed permissions
/// must be granted (AND).
#[derive(Debug, Clone)]
pub struct RequiredPermissions(pub Vec<UserPermission>);

impl RequiredPermissions {
    pub fn is_satisfied(&self, user_permissions: &[String]) -> bool {
        self.0
            .iter()
            .all(|p| user_permissions.iter().any(|held| held == p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_role_single() {
        let requirement = RequiredRole::Single("admin".to_string());
        assert!(requirement.is_satisfied("admin"));
        assert!(!requirement.is_satisfied("trainer"));
    }

    #[test]
    fn test_required_role_any() {
        let requirement = RequiredRole::Any(vec!["admin".to_string(), "super_admin".to_string()]);
        assert!(requirement.is_satisfied("super_admin"));
        assert!(requirement.is_satisfied("admin"));
        assert!(!requirement.is_satisfied("user"));
    }

    #[test]
    fn test_required_permissions_all_of() {
        let requirement = RequiredPermissions(vec![
            UserPermission::ManageUsers,
            UserPermission::ManageTrainers,
        ]);

        let full = vec!["manage:users".to_string(), "manage:trainers".to_string()];
        let partial = vec!["manage:users".to_string()];

        assert!(requirement.is_satisfied(&full));
        assert!(!requirement.is_satisfied(&partial));
        assert!(!requirement.is_satisfied(&[]));
    }

    #[test]
    fn test_empty_permission_requirement() {
        let requirement = RequiredPermissions(vec![]);
        assert!(requirement.is_satisfied(&[]));
    }
}
