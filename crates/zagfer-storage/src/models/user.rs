use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Permission level of a user.
///
/// Admins manage the tool catalog and the user roster and may export CSV
/// reports; regular users register checkouts and returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Stable TEXT code for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Human-readable name in Portuguese.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Admin => "Administrador",
            Self::User => "Usuário",
        }
    }

    /// Check if this role carries administrative permissions.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// A tool-room operator.
///
/// Login is a plaintext matricula lookup requiring `active`; there is no
/// credential or session model. A user may never deactivate or delete
/// their own account (enforced at the service layer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Caller-assigned unique identifier
    pub id: String,

    /// Full display name
    pub name: String,

    /// Employee registration number, unique, used as the login key
    pub matricula: String,

    /// Inactive users cannot authenticate
    pub active: bool,

    /// Permission level
    pub role: Role,

    /// Record creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        matricula: impl Into<String>,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            matricula: matricula.into(),
            active: true,
            role,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display_name() {
        assert_eq!(Role::Admin.display_name(), "Administrador");
        assert_eq!(Role::User.display_name(), "Usuário");
    }

    #[test]
    fn test_role_serde_codes() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn test_new_user_is_active() {
        let user = User::new("1", "Gerente", "459524", Role::Admin);
        assert!(user.active);
        assert!(user.role.is_admin());
    }
}
