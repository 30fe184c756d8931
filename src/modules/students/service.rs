use std::collections::HashSet;

use tracing::{info, instrument, warn};
use tutordesk_core::{CoreError, CoreResult};
use tutordesk_db::{CredentialStore, NewEnrollment, StoreError};
use tutordesk_models::{
    Category, NewPayment, NewStudent, Student, StudentFields, StudentIdentifier, TeacherPaymentDto,
};
use uuid::Uuid;

use super::allocator::IdentifierAllocator;
use crate::modules::payments::schedule::compute_next_due_date;

/// Allocation plus insert is attempted this many times before giving up on
/// identifier collisions.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 3;

/// Enrollment inputs that passed every check that needs no store access.
#[derive(Debug, Clone)]
struct CheckedEnrollment {
    category: Category,
    full_name: String,
    guardian_name: String,
    guardian_phone: String,
    email: Option<String>,
    address: Option<String>,
    payments: Vec<NewPayment>,
}

impl CheckedEnrollment {
    fn with_identifier(&self, identifier: StudentIdentifier) -> NewEnrollment {
        NewEnrollment {
            student: NewStudent {
                identifier,
                full_name: self.full_name.clone(),
                category: self.category,
                guardian_name: self.guardian_name.clone(),
                guardian_phone: self.guardian_phone.clone(),
                email: self.email.clone(),
                address: self.address.clone(),
            },
            payments: self.payments.clone(),
        }
    }
}

fn required(value: &str, field: &'static str, label: &str) -> CoreResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoreError::validation(field, format!("{label} is required")));
    }
    Ok(value.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Check the submitted enrollment and derive one payment per selected
/// teacher, in selection order.
fn check_enrollment(
    fields: StudentFields,
    teacher_ids: &[Uuid],
    payments: &[TeacherPaymentDto],
) -> CoreResult<CheckedEnrollment> {
    let full_name = required(&fields.full_name, "full_name", "Full name")?;
    let guardian_name = required(&fields.guardian_name, "guardian_name", "Guardian name")?;
    let guardian_phone = required(&fields.guardian_phone, "guardian_phone", "Guardian phone")?;
    let category = fields
        .category
        .ok_or_else(|| CoreError::validation("category", "Category is required"))?;

    if teacher_ids.is_empty() {
        return Err(CoreError::validation(
            "teacher_ids",
            "At least one teacher must be selected",
        ));
    }

    let mut seen = HashSet::with_capacity(teacher_ids.len());
    if let Some(dup) = teacher_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(CoreError::validation(
            "teacher_ids",
            format!("Teacher {dup} is selected more than once"),
        ));
    }

    if let Some(p) = payments.iter().find(|p| p.amount <= 0) {
        return Err(CoreError::validation(
            "amount",
            format!("Payment amount for teacher {} must be positive", p.teacher_id),
        ));
    }

    if let Some(p) = payments.iter().find(|p| !seen.contains(&p.teacher_id)) {
        return Err(CoreError::validation(
            "payments",
            format!("Payment names unselected teacher {}", p.teacher_id),
        ));
    }

    let mut schedule = Vec::with_capacity(teacher_ids.len());
    for teacher_id in teacher_ids {
        let mut entries = payments.iter().filter(|p| p.teacher_id == *teacher_id);
        let payment = match (entries.next(), entries.next()) {
            (Some(p), None) => p,
            (None, _) => {
                return Err(CoreError::validation(
                    "payments",
                    format!("Missing payment for teacher {teacher_id}"),
                ));
            }
            (Some(_), Some(_)) => {
                return Err(CoreError::validation(
                    "payments",
                    format!("More than one payment for teacher {teacher_id}"),
                ));
            }
        };

        schedule.push(NewPayment {
            teacher_id: *teacher_id,
            amount: payment.amount,
            payment_date: payment.payment_date,
            next_payment_due: compute_next_due_date(payment.payment_date),
        });
    }

    Ok(CheckedEnrollment {
        category,
        full_name,
        guardian_name,
        guardian_phone,
        email: optional(fields.email),
        address: optional(fields.address),
        payments: schedule,
    })
}

pub struct StudentService;

impl StudentService {
    /// Enroll a student with their teachers and first payments.
    ///
    /// The student row, its teacher relations and its payments are written
    /// together or not at all. Inputs are checked before an identifier is
    /// allocated, so a rejected request leaves the sequence untouched.
    #[instrument(skip(store, fields, payments), fields(category = ?fields.category, teachers = teacher_ids.len()))]
    pub async fn create_student_with_schedule(
        store: &dyn CredentialStore,
        fields: StudentFields,
        teacher_ids: Vec<Uuid>,
        payments: Vec<TeacherPaymentDto>,
    ) -> CoreResult<Student> {
        let checked = check_enrollment(fields, &teacher_ids, &payments)?;
        Self::ensure_teachers_eligible(store, &teacher_ids).await?;

        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let identifier = IdentifierAllocator::allocate(store, checked.category).await;

            match store.insert_enrollment(checked.with_identifier(identifier)).await {
                Ok(student) => {
                    info!(
                        identifier = %student.identifier,
                        payments = checked.payments.len(),
                        "Student enrolled"
                    );
                    return Ok(student);
                }
                Err(StoreError::DuplicateIdentifier(taken)) => {
                    warn!(attempt, identifier = %taken, "Identifier already taken, reallocating");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(CoreError::StoreUnavailable(format!(
            "no free student identifier after {MAX_ALLOCATION_ATTEMPTS} attempts"
        )))
    }

    /// Every selected teacher must exist, be live, and be approved or
    /// unflagged.
    async fn ensure_teachers_eligible(
        store: &dyn CredentialStore,
        teacher_ids: &[Uuid],
    ) -> CoreResult<()> {
        let teachers = store.find_teachers(teacher_ids).await?;

        for id in teacher_ids {
            match teachers.iter().find(|t| t.id == *id) {
                None => {
                    return Err(CoreError::validation(
                        "teacher_ids",
                        format!("Teacher {id} does not exist"),
                    ));
                }
                Some(teacher) if !teacher.is_eligible() => {
                    return Err(CoreError::validation(
                        "teacher_ids",
                        format!("Teacher {id} is not approved"),
                    ));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

/// Create a student, their teacher relations and their payment schedule as
/// one unit.
pub async fn create_student_with_schedule(
    store: &dyn CredentialStore,
    fields: StudentFields,
    teacher_ids: Vec<Uuid>,
    payments: Vec<TeacherPaymentDto>,
) -> CoreResult<Student> {
    StudentService::create_student_with_schedule(store, fields, teacher_ids, payments).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fields() -> StudentFields {
        StudentFields {
            full_name: " Amina Njoya ".into(),
            category: Some(Category::Bilingue),
            guardian_name: "Paul Njoya".into(),
            guardian_phone: "+237600000000".into(),
            email: Some("  ".into()),
            address: None,
        }
    }

    fn payment(teacher_id: Uuid, amount: i64) -> TeacherPaymentDto {
        TeacherPaymentDto {
            teacher_id,
            amount,
            payment_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            next_payment_due: None,
        }
    }

    fn field_of(err: CoreError) -> &'static str {
        match err {
            CoreError::Validation { field, .. } => field,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_checked_enrollment_trims_and_derives_due_dates() {
        let t = Uuid::new_v4();
        let checked = check_enrollment(fields(), &[t], &[payment(t, 15000)]).unwrap();

        assert_eq!(checked.full_name, "Amina Njoya");
        assert_eq!(checked.email, None);
        assert_eq!(checked.payments.len(), 1);
        assert_eq!(
            checked.payments[0].next_payment_due,
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_first_missing_field_is_reported() {
        let t = Uuid::new_v4();
        let mut f = fields();
        f.full_name = "   ".into();
        f.guardian_phone = String::new();
        let err = check_enrollment(f, &[t], &[payment(t, 1)]).unwrap_err();
        assert_eq!(field_of(err), "full_name");

        let mut f = fields();
        f.category = None;
        let err = check_enrollment(f, &[t], &[payment(t, 1)]).unwrap_err();
        assert_eq!(field_of(err), "category");
    }

    #[test]
    fn test_teacher_selection_rules() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let err = check_enrollment(fields(), &[], &[]).unwrap_err();
        assert_eq!(field_of(err), "teacher_ids");

        let err = check_enrollment(fields(), &[a, a], &[payment(a, 1)]).unwrap_err();
        assert_eq!(field_of(err), "teacher_ids");

        let err = check_enrollment(fields(), &[a, b], &[payment(a, 1)]).unwrap_err();
        assert_eq!(field_of(err), "payments");

        let err = check_enrollment(fields(), &[a], &[payment(a, 1), payment(b, 1)]).unwrap_err();
        assert_eq!(field_of(err), "payments");

        let err = check_enrollment(fields(), &[a], &[payment(a, 1), payment(a, 2)]).unwrap_err();
        assert_eq!(field_of(err), "payments");
    }

    #[test]
    fn test_non_positive_amount_is_rejected() {
        let t = Uuid::new_v4();
        let err = check_enrollment(fields(), &[t], &[payment(t, 0)]).unwrap_err();
        assert_eq!(field_of(err), "amount");
    }
}
