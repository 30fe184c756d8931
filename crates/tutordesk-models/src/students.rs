//! Student domain models and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::identifiers::{Category, StudentIdentifier};

/// A student enrolled with the agency.
///
/// `user` always equals `identifier`; students sign in with it and their
/// guardian's name.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub identifier: StudentIdentifier,
    /// Login handle
    #[sqlx(rename = "user_handle")]
    pub user: String,
    pub full_name: String,
    pub category: Category,
    /// Doubles as the student's login secret, so it is never serialized.
    #[serde(skip_serializing, default)]
    pub guardian_name: String,
    pub guardian_phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// The student-owned fields submitted by the enrollment form.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct StudentFields {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub full_name: String,
    pub category: Option<Category>,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub guardian_name: String,
    #[serde(default)]
    #[validate(length(max = 40))]
    pub guardian_phone: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
}

/// Payment terms agreed with one selected teacher.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct TeacherPaymentDto {
    pub teacher_id: Uuid,
    pub amount: i64,
    pub payment_date: NaiveDate,
    /// Accepted for form compatibility and ignored: the due date is always
    /// derived from `payment_date`.
    #[serde(default)]
    pub next_payment_due: Option<NaiveDate>,
}

/// DTO for enrolling a student with their teachers and payment schedule.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[serde(flatten)]
    #[validate(nested)]
    pub student: StudentFields,
    #[serde(default)]
    pub teacher_ids: Vec<Uuid>,
    #[serde(default)]
    pub payments: Vec<TeacherPaymentDto>,
}

impl CreateStudentDto {
    pub fn into_parts(self) -> (StudentFields, Vec<Uuid>, Vec<TeacherPaymentDto>) {
        (self.student, self.teacher_ids, self.payments)
    }
}

/// A validated student row ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub identifier: StudentIdentifier,
    pub full_name: String,
    pub category: Category,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl NewStudent {
    /// Login handle; identical to the identifier.
    pub fn user(&self) -> &str {
        self.identifier.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_dto_flattens_student_fields() {
        let dto: CreateStudentDto = serde_json::from_value(json!({
            "full_name": "Amina Njoya",
            "category": "anglo",
            "guardian_name": "Paul Njoya",
            "guardian_phone": "+237600000000",
            "teacher_ids": ["6f1c1f3e-3c1a-4c55-9d1e-1b2f7f0d9a01"],
            "payments": [{
                "teacher_id": "6f1c1f3e-3c1a-4c55-9d1e-1b2f7f0d9a01",
                "amount": 15000,
                "payment_date": "2024-01-31"
            }]
        }))
        .unwrap();

        let (fields, teachers, payments) = dto.into_parts();
        assert_eq!(fields.full_name, "Amina Njoya");
        assert_eq!(fields.category, Some(Category::Anglo));
        assert_eq!(teachers.len(), 1);
        assert_eq!(payments[0].amount, 15000);
        assert_eq!(payments[0].next_payment_due, None);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let dto: CreateStudentDto = serde_json::from_value(json!({
            "full_name": "Amina Njoya",
            "category": "franco",
            "guardian_name": "Paul Njoya",
            "guardian_phone": "+237600000000"
        }))
        .unwrap();

        assert!(dto.teacher_ids.is_empty());
        assert!(dto.payments.is_empty());
    }

    #[test]
    fn test_invalid_email_fails_validation() {
        let fields = StudentFields {
            full_name: "Amina".into(),
            category: Some(Category::Anglo),
            guardian_name: "Paul".into(),
            guardian_phone: "600".into(),
            email: Some("not-an-email".into()),
            address: None,
        };
        assert!(fields.validate().is_err());
    }
}
