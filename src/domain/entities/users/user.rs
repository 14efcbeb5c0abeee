//! User Entity Implementation
//!
//! The user document stored in the `users` collection, together with
//! the role and permission enums that drive authorization.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// User roles ordered by privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular gym member
    User,
    /// Gym trainer
    Trainer,
    /// Gym administrator
    Admin,
    /// System owner
    SuperAdmin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Trainer => "trainer",
            UserRole::Admin => "admin",
            UserRole::SuperAdmin => "super_admin",
        }
    }

    /// Permissions granted to a freshly created account of this role.
    pub fn default_permissions(&self) -> Vec<UserPermission> {
        match self {
            UserRole::User => vec![],
            UserRole::Trainer => vec![UserPermission::ManageWorkouts],
            UserRole::Admin => vec![
                UserPermission::ManageUsers,
                UserPermission::ManageTrainers,
                UserPermission::ManageWorkouts,
                UserPermission::ManageClasses,
                UserPermission::ViewAnalytics,
            ],
            UserRole::SuperAdmin => UserPermission::all(),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fine-grained permissions attached to a user.
///
/// Authorization checks require ALL listed permissions to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserPermission {
    /// Create, update, delete users
    #[serde(rename = "manage:users")]
    ManageUsers,
    /// Assign, manage trainers
    #[serde(rename = "manage:trainers")]
    ManageTrainers,
    /// Create, modify workout plans
    #[serde(rename = "manage:workouts")]
    ManageWorkouts,
    /// Schedule, modify classes
    #[serde(rename = "manage:classes")]
    ManageClasses,
    /// View gym analytics
    #[serde(rename = "view:analytics")]
    ViewAnalytics,
    /// Modify system settings
    #[serde(rename = "system:settings")]
    SystemSettings,
}

impl UserPermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserPermission::ManageUsers => "manage:users",
            UserPermission::ManageTrainers => "manage:trainers",
            UserPermission::ManageWorkouts => "manage:workouts",
            UserPermission::ManageClasses => "manage:classes",
            UserPermission::ViewAnalytics => "view:analytics",
            UserPermission::SystemSettings => "system:settings",
        }
    }

    pub fn all() -> Vec<UserPermission> {
        vec![
            UserPermission::ManageUsers,
            UserPermission::ManageTrainers,
            UserPermission::ManageWorkouts,
            UserPermission::ManageClasses,
            UserPermission::ViewAnalytics,
            UserPermission::SystemSettings,
        ]
    }
}

/// User entity
///
/// Represents every account in the system. Deleted accounts are kept
/// as tombstones (`is_deleted = true`) so that historical references
/// stay resolvable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email (unique, lowercase)
    pub email: String,
    /// Bcrypt password hash
    pub password_hash: String,
    /// Assigned role
    pub role: UserRole,
    /// Granted permissions
    pub permissions: Vec<UserPermission>,
    /// Email verification state
    pub is_email_verified: bool,
    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Profile picture URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    /// Account active state
    pub is_active: bool,
    /// Soft-delete tombstone flag
    pub is_deleted: bool,
    /// When the account was soft-deleted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime>,
    /// Last successful login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// Creates a new active user with the default permissions of the
    /// given role.
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        password_hash: String,
        role: UserRole,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            first_name,
            last_name,
            email: email.to_lowercase(),
            password_hash,
            permissions: role.default_permissions(),
            role,
            is_email_verified: false,
            phone_number: None,
            profile_picture: None,
            is_active: true,
            is_deleted: false,
            deleted_at: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Hex string of the document id.
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn has_permission(&self, permission: UserPermission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Whether the account may authenticate at all.
    pub fn can_login(&self) -> bool {
        self.is_active && !self.is_deleted
    }

    /// Wire representations of the granted permissions.
    pub fn permission_strings(&self) -> Vec<String> {
        self.permissions.iter().map(|p| p.as_str().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_default_permissions() {
        assert!(UserRole::User.default_permissions().is_empty());
        assert_eq!(
            UserRole::Trainer.default_permissions(),
            vec![UserPermission::ManageWorkouts]
        );

        let admin = UserRole::Admin.default_permissions();
        assert!(admin.contains(&UserPermission::ManageUsers));
        assert!(admin.contains(&UserPermission::ViewAnalytics));
        assert!(!admin.contains(&UserPermission::SystemSettings));

        let super_admin = UserRole::SuperAdmin.default_permissions();
        assert_eq!(super_admin.len(), 6);
        assert!(super_admin.contains(&UserPermission::SystemSettings));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&UserRole::SuperAdmin).unwrap(), "\"super_admin\"");
        assert_eq!(serde_json::to_string(&UserRole::User).unwrap(), "\"user\"");

        let role: UserRole = serde_json::from_str("\"trainer\"").unwrap();
        assert_eq!(role, UserRole::Trainer);
    }

    #[test]
    fn test_permission_serialization() {
        assert_eq!(
            serde_json::to_string(&UserPermission::ManageUsers).unwrap(),
            "\"manage:users\""
        );

        let permission: UserPermission = serde_json::from_str("\"system:settings\"").unwrap();
        assert_eq!(permission, UserPermission::SystemSettings);
    }

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            "Jane".to_string(),
            "Doe".to_string(),
            "Jane@Example.COM".to_string(),
            "hash".to_string(),
            UserRole::User,
        );

        assert_eq!(user.email, "jane@example.com");
        assert!(user.is_active);
        assert!(!user.is_deleted);
        assert!(!user.is_email_verified);
        assert!(user.permissions.is_empty());
        assert!(user.can_login());
        assert_eq!(user.full_name(), "Jane Doe");
    }

    #[test]
    fn test_tombstoned_user_cannot_login() {
        let mut user = User::new(
            "Jane".to_string(),
            "Doe".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
            UserRole::User,
        );
        user.is_deleted = true;
        assert!(!user.can_login());

        user.is_deleted = false;
        user.is_active = false;
        assert!(!user.can_login());
    }
}
