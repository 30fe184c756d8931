use serde::Serialize;
use tutordesk_auth::Claims;
use tutordesk_models::{
    Admin, Category, CreateStudentDto, Identity, LoginRequest, LoginResponse, NextDueResponse,
    RoleHint, RoleKind, Student, StudentFields, Teacher, TeacherPaymentDto,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::current_session,
        crate::modules::students::controller::create_student,
        crate::modules::payments::controller::next_due,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            Identity,
            RoleHint,
            RoleKind,
            Claims,
            Admin,
            Teacher,
            Student,
            Category,
            StudentFields,
            TeacherPaymentDto,
            CreateStudentDto,
            NextDueResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Credential resolution and sessions"),
        (name = "Students", description = "Student enrollment"),
        (name = "Payments", description = "Payment schedule")
    ),
    info(
        title = "Tutordesk API",
        version = "0.1.0",
        description = "Sign-in and student enrollment for a tutoring agency, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
