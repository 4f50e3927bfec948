use serde::{Deserialize, Serialize};

/// Closed role set used for actor gating. Adding a role must force every
/// match over it to be revisited, so no catch-all arms downstream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Student,
    Tutor,
    Admin,
}

impl UserRole {
    /// Wire spelling, as sent in query parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Student => "STUDENT",
            UserRole::Tutor => "TUTOR",
            UserRole::Admin => "ADMIN",
        }
    }
}

/// The authenticated identity handed explicitly to every guarded operation.
/// Obtained from the external auth provider's session accessor; absence of a
/// value means "not signed in".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_wire_spelling() {
        for role in [UserRole::Student, UserRole::Tutor, UserRole::Admin] {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            let back: UserRole = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }
}
