//! JWT claim structures for session tokens.

use serde::{Deserialize, Serialize};
use tutordesk_models::RoleKind;
use utoipa::ToSchema;
use uuid::Uuid;

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Account ID (subject claim)
    pub sub: String,
    /// Login handle
    pub user: String,
    /// Account class the subject was resolved in
    pub role: RoleKind,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn subject_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    pub fn is_admin(&self) -> bool {
        self.role == RoleKind::Admin
    }
}
