//! Process-local credential store.
//!
//! Backs the test suites and `STORE_BACKEND=memory` runs. Every trait
//! operation takes the state lock once, so each one is atomic with respect
//! to the others. The `inject_*`/`set_unavailable` hooks let tests provoke
//! the failure paths the PostgreSQL store can hit.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use tutordesk_models::{
    Admin, Category, PaymentRecord, Student, StudentIdentifier, StudentTeacherRelation, Teacher,
};
use uuid::Uuid;

use crate::store::{CredentialStore, NewEnrollment, StoreError, StoreResult};

#[derive(Default)]
struct State {
    admins: Vec<Admin>,
    teachers: Vec<Teacher>,
    students: Vec<Student>,
    relations: Vec<StudentTeacherRelation>,
    payments: Vec<PaymentRecord>,
    counters: HashMap<String, i64>,
    deleted: HashSet<Uuid>,
}

#[derive(Default)]
pub struct InMemoryCredentialStore {
    state: Mutex<State>,
    unavailable: AtomicBool,
    pending_conflicts: AtomicUsize,
    fail_payment_writes: AtomicBool,
    insert_attempts: AtomicUsize,
}

impl std::fmt::Debug for InMemoryCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCredentialStore")
            .field("unavailable", &self.unavailable.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

fn matches_handle_or_email(user: &str, email: &str, identifier: &str) -> bool {
    user.to_lowercase() == identifier || email.to_lowercase() == identifier
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store switched off".into()));
        }
        Ok(())
    }

    /// Make every subsequent operation fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Report the next `count` enrollment inserts as identifier collisions.
    pub fn inject_conflicts(&self, count: usize) {
        self.pending_conflicts.store(count, Ordering::SeqCst);
    }

    /// Fail enrollment inserts after the student row has been staged.
    pub fn fail_payment_writes(&self, fail: bool) {
        self.fail_payment_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of `insert_enrollment` calls received, successful or not.
    pub fn insert_attempts(&self) -> usize {
        self.insert_attempts.load(Ordering::SeqCst)
    }

    pub fn add_admin(
        &self,
        user: &str,
        email: &str,
        full_name: &str,
        password_hash: &str,
    ) -> Admin {
        let now = Utc::now();
        let admin = Admin {
            id: Uuid::new_v4(),
            user: user.to_string(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.lock().admins.push(admin.clone());
        admin
    }

    pub fn add_teacher(
        &self,
        user: &str,
        email: &str,
        full_name: &str,
        password_hash: &str,
        approved: Option<bool>,
    ) -> Teacher {
        let now = Utc::now();
        let teacher = Teacher {
            id: Uuid::new_v4(),
            user: user.to_string(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            phone: None,
            password_hash: password_hash.to_string(),
            approved,
            created_at: now,
            updated_at: now,
        };
        self.lock().teachers.push(teacher.clone());
        teacher
    }

    /// Store a student row as-is, bypassing the identifier counter.
    ///
    /// Models rows written before counters existed, or by other writers.
    pub fn add_student(
        &self,
        identifier: &str,
        full_name: &str,
        guardian_name: &str,
        category: Category,
    ) -> Student {
        let now = Utc::now();
        let student = Student {
            id: Uuid::new_v4(),
            identifier: StudentIdentifier::from_stored(identifier),
            user: identifier.to_string(),
            full_name: full_name.to_string(),
            category,
            guardian_name: guardian_name.to_string(),
            guardian_phone: String::new(),
            email: None,
            address: None,
            created_at: now,
            updated_at: now,
        };
        self.lock().students.push(student.clone());
        student
    }

    /// Logically delete any account with this id.
    pub fn soft_delete(&self, id: Uuid) {
        self.lock().deleted.insert(id);
    }

    pub fn students(&self) -> Vec<Student> {
        self.lock().students.clone()
    }

    pub fn relations(&self) -> Vec<StudentTeacherRelation> {
        self.lock().relations.clone()
    }

    pub fn payments(&self) -> Vec<PaymentRecord> {
        self.lock().payments.clone()
    }

    pub fn counter(&self, prefix: &str) -> Option<i64> {
        self.lock().counters.get(prefix).copied()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_admin(&self, identifier: &str) -> StoreResult<Option<Admin>> {
        self.check_available()?;
        let state = self.lock();
        Ok(state
            .admins
            .iter()
            .filter(|a| !state.deleted.contains(&a.id))
            .find(|a| matches_handle_or_email(&a.user, &a.email, identifier))
            .cloned())
    }

    async fn find_approved_teacher(&self, identifier: &str) -> StoreResult<Option<Teacher>> {
        self.check_available()?;
        let state = self.lock();
        Ok(state
            .teachers
            .iter()
            .filter(|t| !state.deleted.contains(&t.id) && t.is_eligible())
            .find(|t| matches_handle_or_email(&t.user, &t.email, identifier))
            .cloned())
    }

    async fn find_student(&self, handle: &str) -> StoreResult<Option<Student>> {
        self.check_available()?;
        let state = self.lock();
        Ok(state
            .students
            .iter()
            .filter(|s| !state.deleted.contains(&s.id))
            .find(|s| s.user.to_lowercase() == handle)
            .cloned())
    }

    async fn list_student_identifiers(&self, prefix: &str) -> StoreResult<Vec<String>> {
        self.check_available()?;
        Ok(self
            .lock()
            .students
            .iter()
            .map(|s| s.identifier.as_str())
            .filter(|id| id.starts_with(prefix))
            .map(str::to_string)
            .collect())
    }

    async fn find_teachers(&self, ids: &[Uuid]) -> StoreResult<Vec<Teacher>> {
        self.check_available()?;
        let state = self.lock();
        Ok(state
            .teachers
            .iter()
            .filter(|t| ids.contains(&t.id) && !state.deleted.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn advance_sequence(&self, prefix: &str, floor: i64) -> StoreResult<i64> {
        self.check_available()?;
        let mut state = self.lock();
        let counter = state.counters.entry(prefix.to_string()).or_insert(0);
        *counter = (*counter).max(floor).checked_add(1).ok_or_else(|| {
            StoreError::Unavailable(format!("identifier counter for {prefix} is exhausted"))
        })?;
        Ok(*counter)
    }

    async fn insert_enrollment(&self, enrollment: NewEnrollment) -> StoreResult<Student> {
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let NewEnrollment { student, payments } = enrollment;
        let identifier = student.identifier.as_str().to_string();

        let injected = self
            .pending_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Err(StoreError::DuplicateIdentifier(identifier));
        }

        let mut state = self.lock();

        let taken = state.students.iter().any(|s| {
            s.identifier.as_str() == identifier || s.user.eq_ignore_ascii_case(&identifier)
        });
        if taken {
            return Err(StoreError::DuplicateIdentifier(identifier));
        }

        let now = Utc::now();
        let created = Student {
            id: Uuid::new_v4(),
            user: student.user().to_string(),
            identifier: student.identifier,
            full_name: student.full_name,
            category: student.category,
            guardian_name: student.guardian_name,
            guardian_phone: student.guardian_phone,
            email: student.email,
            address: student.address,
            created_at: now,
            updated_at: now,
        };

        // Staged rows are only published once every write has succeeded.
        if self.fail_payment_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("payment insert failed".into()));
        }

        let relations = payments.iter().map(|p| StudentTeacherRelation {
            id: Uuid::new_v4(),
            student_id: created.id,
            teacher_id: p.teacher_id,
            created_at: now,
        });
        let records = payments.iter().map(|p| PaymentRecord {
            id: Uuid::new_v4(),
            student_id: created.id,
            teacher_id: p.teacher_id,
            amount: p.amount,
            payment_date: p.payment_date,
            next_payment_due: p.next_payment_due,
            created_at: now,
        });

        state.students.push(created.clone());
        state.relations.extend(relations);
        state.payments.extend(records);

        Ok(created)
    }
}
