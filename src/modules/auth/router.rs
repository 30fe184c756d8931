use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{current_session, login};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/session", get(current_session))
}
