use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Closed role set. Stored as the `user_role` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Employee,
    Manager,
    Hr,
}

/// One record per user. `uid` comes from the external auth provider and is
/// treated as an opaque string, not generated here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub uid: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// Set for employees; the team-progress query pivots on it.
    pub manager_uid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Hr).unwrap(), "\"hr\"");
        assert_eq!(
            serde_json::to_string(&UserRole::Employee).unwrap(),
            "\"employee\""
        );
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result: Result<UserRole, _> = serde_json::from_str("\"admin\"");
        assert!(result.is_err());
    }
}
