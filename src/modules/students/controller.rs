use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;
use tutordesk_core::AppError;
use tutordesk_models::{CreateStudentDto, Student};

use super::service::StudentService;
use crate::docs::ErrorResponse;
use crate::middleware::auth::RequireAdmin;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Enroll a student with their teachers and payment schedule
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student enrolled", body = Student),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 403, description = "Admin session required", body = ErrorResponse),
        (status = 409, description = "Identifier collision", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 503, description = "Credential store unavailable", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, admin, dto), fields(admin = %admin.user()))]
pub async fn create_student(
    State(state): State<AppState>,
    admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let (fields, teacher_ids, payments) = dto.into_parts();
    let student =
        StudentService::create_student_with_schedule(state.store.as_ref(), fields, teacher_ids, payments)
            .await?;
    Ok((StatusCode::CREATED, Json(student)))
}
