//! Teacher accounts.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A tutor employed by the agency.
///
/// Teachers sign in with a bcrypt-hashed password and can be assigned to
/// students once approved.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Teacher {
    pub id: Uuid,
    /// Login handle
    #[sqlx(rename = "user_handle")]
    pub user: String,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// `None` means the approval flag was never set.
    pub approved: Option<bool>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Teacher {
    /// Approved teachers, and teachers whose flag was never set, are eligible.
    pub fn is_eligible(&self) -> bool {
        self.approved.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher(approved: Option<bool>) -> Teacher {
        let now = chrono::Utc::now();
        Teacher {
            id: Uuid::new_v4(),
            user: "mbeki".into(),
            email: "mbeki@tutordesk.test".into(),
            full_name: "Grace Mbeki".into(),
            phone: None,
            password_hash: String::new(),
            approved,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_eligibility_defaults_to_true() {
        assert!(teacher(None).is_eligible());
        assert!(teacher(Some(true)).is_eligible());
        assert!(!teacher(Some(false)).is_eligible());
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let mut t = teacher(Some(true));
        t.password_hash = "$2b$12$secret".into();
        let json = serde_json::to_value(&t).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["user"], "mbeki");
    }
}
