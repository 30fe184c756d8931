use crate::state::AppState;
use axum::{Router, routing::get};

use super::controller::next_due;

pub fn init_payments_router() -> Router<AppState> {
    Router::new().route("/next-due", get(next_due))
}
