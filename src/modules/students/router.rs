use crate::modules::students::controller::create_student;
use crate::state::AppState;
use axum::{Router, routing::post};

pub fn init_students_router() -> Router<AppState> {
    Router::new().route("/", post(create_student))
}
