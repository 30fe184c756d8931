//! Login request and response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::identity::{Identity, RoleHint};

/// Credentials submitted by the sign-in form.
///
/// `identifier` is a handle, an email, or a student identifier. `secret` is
/// a password for admins and teachers and the guardian's name for students.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub identifier: String,
    #[validate(length(min = 1, max = 256))]
    pub secret: String,
    #[serde(default)]
    pub role: RoleHint,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub identity: Identity,
}
