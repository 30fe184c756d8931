//! Payment schedule records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// One teacher's fee for one student.
///
/// `next_payment_due` is derived from `payment_date` when the record is
/// created and is never chosen by the user.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct PaymentRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    pub teacher_id: Uuid,
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub next_payment_due: NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Link between a student and an assigned teacher.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct StudentTeacherRelation {
    pub id: Uuid,
    pub student_id: Uuid,
    pub teacher_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A payment row ready to be inserted alongside its student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub teacher_id: Uuid,
    pub amount: i64,
    pub payment_date: NaiveDate,
    pub next_payment_due: NaiveDate,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NextDueQuery {
    /// Date the payment was made (YYYY-MM-DD)
    pub payment_date: NaiveDate,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, ToSchema)]
pub struct NextDueResponse {
    pub payment_date: NaiveDate,
    pub next_payment_due: NaiveDate,
}
