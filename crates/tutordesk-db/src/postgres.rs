//! PostgreSQL credential store.
//!
//! Identifier counters live in `student_identifier_counters`; advancing one is
//! a single upsert, so concurrent allocators serialize on the counter row.
//! Enrollment writes share one transaction: a dropped future or a failed
//! statement rolls everything back.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;
use tutordesk_models::{Admin, Student, Teacher};
use uuid::Uuid;

use crate::store::{CredentialStore, NewEnrollment, StoreError, StoreResult};

const ADMIN_COLUMNS: &str =
    "id, user_handle, email, full_name, password_hash, created_at, updated_at";
const TEACHER_COLUMNS: &str =
    "id, user_handle, email, full_name, phone, password_hash, approved, created_at, updated_at";
const STUDENT_COLUMNS: &str = "id, identifier, user_handle, full_name, category, guardian_name, \
     guardian_phone, email, address, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert an administrator. `password_hash` must already be a bcrypt hash.
    #[instrument(skip(self, password_hash))]
    pub async fn create_admin(
        &self,
        user: &str,
        email: &str,
        full_name: &str,
        password_hash: &str,
    ) -> StoreResult<Admin> {
        let sql = format!(
            "INSERT INTO admins (user_handle, email, full_name, password_hash) \
             VALUES ($1, $2, $3, $4) RETURNING {ADMIN_COLUMNS}"
        );

        let admin = sqlx::query_as::<_, Admin>(&sql)
            .bind(user)
            .bind(email)
            .bind(full_name)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await?;

        Ok(admin)
    }

    /// Insert a teacher. `approved = None` leaves the approval flag unset.
    #[instrument(skip(self, password_hash))]
    pub async fn create_teacher(
        &self,
        user: &str,
        email: &str,
        full_name: &str,
        phone: Option<&str>,
        password_hash: &str,
        approved: Option<bool>,
    ) -> StoreResult<Teacher> {
        let sql = format!(
            "INSERT INTO teachers (user_handle, email, full_name, phone, password_hash, approved) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {TEACHER_COLUMNS}"
        );

        let teacher = sqlx::query_as::<_, Teacher>(&sql)
            .bind(user)
            .bind(email)
            .bind(full_name)
            .bind(phone)
            .bind(password_hash)
            .bind(approved)
            .fetch_one(&self.pool)
            .await?;

        Ok(teacher)
    }

    /// Set the approval flag of the teacher with this handle or email.
    /// Returns `false` when no such teacher exists.
    #[instrument(skip(self))]
    pub async fn set_teacher_approval(
        &self,
        identifier: &str,
        approved: bool,
    ) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE teachers SET approved = $2, updated_at = NOW() \
             WHERE deleted_at IS NULL AND (LOWER(user_handle) = $1 OR LOWER(email) = $1)",
        )
        .bind(identifier.trim().to_lowercase())
        .bind(approved)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of teacher rows, deleted ones included.
    pub async fn count_teachers(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

fn map_insert_error(err: sqlx::Error, identifier: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::DuplicateIdentifier(identifier.to_string());
        }
    }
    StoreError::from(err)
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    #[instrument(skip(self))]
    async fn find_admin(&self, identifier: &str) -> StoreResult<Option<Admin>> {
        let sql = format!(
            "SELECT {ADMIN_COLUMNS} FROM admins \
             WHERE deleted_at IS NULL AND (LOWER(user_handle) = $1 OR LOWER(email) = $1) \
             ORDER BY created_at LIMIT 1"
        );

        let admin = sqlx::query_as::<_, Admin>(&sql)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await?;

        Ok(admin)
    }

    #[instrument(skip(self))]
    async fn find_approved_teacher(&self, identifier: &str) -> StoreResult<Option<Teacher>> {
        let sql = format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers \
             WHERE deleted_at IS NULL AND COALESCE(approved, TRUE) \
             AND (LOWER(user_handle) = $1 OR LOWER(email) = $1) \
             ORDER BY created_at LIMIT 1"
        );

        let teacher = sqlx::query_as::<_, Teacher>(&sql)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await?;

        Ok(teacher)
    }

    #[instrument(skip(self))]
    async fn find_student(&self, handle: &str) -> StoreResult<Option<Student>> {
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM students \
             WHERE deleted_at IS NULL AND LOWER(user_handle) = $1 LIMIT 1"
        );

        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?;

        Ok(student)
    }

    #[instrument(skip(self))]
    async fn list_student_identifiers(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let identifiers = sqlx::query_scalar::<_, String>(
            "SELECT identifier FROM students WHERE starts_with(identifier, $1)",
        )
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;

        Ok(identifiers)
    }

    #[instrument(skip(self))]
    async fn find_teachers(&self, ids: &[Uuid]) -> StoreResult<Vec<Teacher>> {
        let sql = format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers WHERE deleted_at IS NULL AND id = ANY($1)"
        );

        let teachers = sqlx::query_as::<_, Teacher>(&sql)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await?;

        Ok(teachers)
    }

    #[instrument(skip(self))]
    async fn advance_sequence(&self, prefix: &str, floor: i64) -> StoreResult<i64> {
        let next = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO student_identifier_counters (prefix, last_value)
            VALUES ($1, $2 + 1)
            ON CONFLICT (prefix) DO UPDATE
            SET last_value = GREATEST(student_identifier_counters.last_value, $2) + 1,
                updated_at = NOW()
            RETURNING last_value
            "#,
        )
        .bind(prefix)
        .bind(floor)
        .fetch_one(&self.pool)
        .await?;

        Ok(next)
    }

    #[instrument(skip(self, enrollment), fields(identifier = %enrollment.student.identifier))]
    async fn insert_enrollment(&self, enrollment: NewEnrollment) -> StoreResult<Student> {
        let NewEnrollment { student, payments } = enrollment;
        let identifier = student.identifier.as_str();

        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO students (identifier, user_handle, full_name, category, guardian_name, \
             guardian_phone, email, address) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {STUDENT_COLUMNS}"
        );

        let created = sqlx::query_as::<_, Student>(&sql)
            .bind(&student.identifier)
            .bind(student.user())
            .bind(&student.full_name)
            .bind(student.category)
            .bind(&student.guardian_name)
            .bind(&student.guardian_phone)
            .bind(&student.email)
            .bind(&student.address)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_insert_error(e, identifier))?;

        let teacher_ids: Vec<Uuid> = payments.iter().map(|p| p.teacher_id).collect();
        let amounts: Vec<i64> = payments.iter().map(|p| p.amount).collect();
        let payment_dates: Vec<NaiveDate> = payments.iter().map(|p| p.payment_date).collect();
        let due_dates: Vec<NaiveDate> = payments.iter().map(|p| p.next_payment_due).collect();

        sqlx::query(
            "INSERT INTO student_teachers (student_id, teacher_id) \
             SELECT $1, teacher_id FROM UNNEST($2::uuid[]) AS t(teacher_id)",
        )
        .bind(created.id)
        .bind(&teacher_ids)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO payments (student_id, teacher_id, amount, payment_date, next_payment_due)
            SELECT $1, p.teacher_id, p.amount, p.payment_date, p.next_payment_due
            FROM UNNEST($2::uuid[], $3::bigint[], $4::date[], $5::date[])
                AS p(teacher_id, amount, payment_date, next_payment_due)
            "#,
        )
        .bind(created.id)
        .bind(&teacher_ids)
        .bind(&amounts)
        .bind(&payment_dates)
        .bind(&due_dates)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(created)
    }
}
