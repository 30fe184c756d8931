use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tutordesk_auth::{Claims, verify_token};
use tutordesk_core::AppError;
use tutordesk_models::RoleKind;

use crate::state::AppState;

/// Extractor that validates the bearer token and exposes its claims.
#[derive(Debug, Clone)]
pub struct AuthSession(pub Claims);

impl AuthSession {
    pub fn user(&self) -> &str {
        &self.0.user
    }

    pub fn role(&self) -> RoleKind {
        self.0.role
    }
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthSession(claims))
    }
}

/// Extractor for sessions resolved on the admin path. Other roles get 403.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthSession);

impl RequireAdmin {
    pub fn user(&self) -> &str {
        self.0.user()
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = AuthSession::from_request_parts(parts, state).await?;

        if !session.0.is_admin() {
            return Err(AppError::forbidden(format!(
                "Access denied for role {}",
                session.role()
            )));
        }

        Ok(RequireAdmin(session))
    }
}
