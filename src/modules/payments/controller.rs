use axum::Json;
use axum::extract::Query;
use tracing::instrument;

use tutordesk_models::{NextDueQuery, NextDueResponse};

use crate::docs::ErrorResponse;

use super::schedule::compute_next_due_date;

/// Preview the due date that follows a payment
#[utoipa::path(
    get,
    path = "/api/payments/next-due",
    params(NextDueQuery),
    responses(
        (status = 200, description = "Next due date", body = NextDueResponse),
        (status = 400, description = "Missing or malformed payment_date", body = ErrorResponse)
    ),
    tag = "Payments"
)]
#[instrument]
pub async fn next_due(Query(query): Query<NextDueQuery>) -> Json<NextDueResponse> {
    Json(NextDueResponse {
        payment_date: query.payment_date,
        next_payment_due: compute_next_due_date(query.payment_date),
    })
}
