//! The persistence contract consumed by credential resolution and student
//! enrollment.

use async_trait::async_trait;
use tutordesk_core::CoreError;
use tutordesk_models::{Admin, NewPayment, NewStudent, Student, Teacher};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("student identifier {0} is already taken")]
    DuplicateIdentifier(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(reason) => CoreError::StoreUnavailable(reason),
            StoreError::DuplicateIdentifier(_) => CoreError::AllocationConflict,
        }
    }
}

/// A student row plus one payment (and therefore one teacher relation) per
/// selected teacher. Written all-or-nothing by
/// [`CredentialStore::insert_enrollment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollment {
    pub student: NewStudent,
    pub payments: Vec<NewPayment>,
}

impl NewEnrollment {
    pub fn teacher_ids(&self) -> Vec<Uuid> {
        self.payments.iter().map(|p| p.teacher_id).collect()
    }
}

/// Lookups take identifiers already normalized (trimmed, lowercased) and
/// compare them case-insensitively. Logically deleted rows are never
/// returned.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Admin whose handle or email equals `identifier`.
    async fn find_admin(&self, identifier: &str) -> StoreResult<Option<Admin>>;

    /// Eligible teacher (approved or unflagged) whose handle or email equals
    /// `identifier`.
    async fn find_approved_teacher(&self, identifier: &str) -> StoreResult<Option<Teacher>>;

    /// Student whose login handle equals `handle`.
    async fn find_student(&self, handle: &str) -> StoreResult<Option<Student>>;

    /// Every stored student identifier starting with `prefix`, including
    /// those of logically deleted students.
    async fn list_student_identifiers(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Teachers among `ids` that exist and are not deleted, whatever their
    /// approval state.
    async fn find_teachers(&self, ids: &[Uuid]) -> StoreResult<Vec<Teacher>>;

    /// Atomically set the counter of `prefix` to `max(counter, floor) + 1`
    /// and return the new value.
    async fn advance_sequence(&self, prefix: &str, floor: i64) -> StoreResult<i64>;

    /// Insert the student, its teacher relations and its payments in one
    /// transaction.
    ///
    /// Fails with [`StoreError::DuplicateIdentifier`] when the identifier is
    /// already stored; nothing is written in that case.
    async fn insert_enrollment(&self, enrollment: NewEnrollment) -> StoreResult<Student>;
}
