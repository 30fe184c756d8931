use axum::Json;
use axum::extract::State;
use tracing::instrument;
use tutordesk_auth::{Claims, create_access_token};
use tutordesk_core::AppError;
use tutordesk_models::{LoginRequest, LoginResponse};

use super::service::AuthService;
use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthSession;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Sign in as an admin, a teacher or a student
///
/// Admins must send `"role": "admin"`. Without a role hint the identifier is
/// matched against teachers first, then students.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 503, description = "Credential store unavailable", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto), fields(identifier = %dto.identifier, role = ?dto.role))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let identity = AuthService::resolve_credentials(
        state.store.as_ref(),
        &dto.identifier,
        &dto.secret,
        dto.role,
    )
    .await?;

    let access_token = create_access_token(&identity, &state.jwt_config)?;

    Ok(Json(LoginResponse {
        access_token,
        identity,
    }))
}

/// Decode the caller's session
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current session", body = Claims),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
#[instrument(skip(session))]
pub async fn current_session(session: AuthSession) -> Json<Claims> {
    Json(session.0)
}
