//! PostgreSQL store tests. They need `DATABASE_URL` pointing at a server the
//! test user may create databases on:
//!
//! ```bash
//! cargo test --test integration_pg_store -- --ignored
//! ```

mod common;

use common::{date, payment, quick_hash, student_fields};
use sqlx::PgPool;
use tutordesk::core::{IdentifierAllocator, create_student_with_schedule, resolve_credentials};
use tutordesk_core::CoreError;
use tutordesk_db::{CredentialStore, NewEnrollment, PgCredentialStore, StoreError};
use tutordesk_models::{Category, NewPayment, NewStudent, RoleHint, RoleKind, StudentIdentifier};

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_pg_counter_takes_existing_rows_into_account(pool: PgPool) {
    let store = PgCredentialStore::new(pool.clone());

    sqlx::query(
        "INSERT INTO students (identifier, user_handle, full_name, category, guardian_name, guardian_phone) \
         VALUES ('ST00A41', 'ST00A41', 'Legacy', 'anglo', 'Jane Doe', '0')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let first = IdentifierAllocator::allocate(&store, Category::Anglo).await;
    let second = IdentifierAllocator::allocate(&store, Category::Anglo).await;

    assert_eq!(first.as_str(), "ST00A42");
    assert_eq!(second.as_str(), "ST00A43");
    assert_eq!(store.advance_sequence("ST00F", 0).await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_pg_enrollment_is_written_in_one_transaction(pool: PgPool) {
    let store = PgCredentialStore::new(pool.clone());
    let teacher = store
        .create_teacher("tina", "tina@agency.test", "Tina T", None, &quick_hash("teach"), None)
        .await
        .unwrap();

    let student = create_student_with_schedule(
        &store,
        student_fields(Category::Franco),
        vec![teacher.id],
        vec![payment(teacher.id, 15000, date(2024, 1, 31))],
    )
    .await
    .unwrap();

    assert_eq!(student.identifier.as_str(), "ST00F1");

    let due: Vec<chrono::NaiveDate> =
        sqlx::query_scalar("SELECT next_payment_due FROM payments WHERE student_id = $1")
            .bind(student.id)
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(due, vec![date(2024, 2, 29)]);

    let relations: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM student_teachers WHERE student_id = $1")
            .bind(student.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(relations, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_pg_failed_payment_insert_rolls_back_the_student(pool: PgPool) {
    let store = PgCredentialStore::new(pool.clone());
    let teacher = store
        .create_teacher("tina", "tina@agency.test", "Tina T", None, &quick_hash("teach"), Some(true))
        .await
        .unwrap();

    sqlx::query("ALTER TABLE payments ADD CONSTRAINT reject_all CHECK (amount < 0)")
        .execute(&pool)
        .await
        .unwrap();

    let err = create_student_with_schedule(
        &store,
        student_fields(Category::Anglo),
        vec![teacher.id],
        vec![payment(teacher.id, 100, date(2024, 1, 1))],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CoreError::StoreUnavailable(_)));

    let students: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
        .fetch_one(&pool)
        .await
        .unwrap();
    let relations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM student_teachers")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(students, 0);
    assert_eq!(relations, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_pg_duplicate_identifier_is_reported(pool: PgPool) {
    let store = PgCredentialStore::new(pool.clone());
    let teacher = store
        .create_teacher("tina", "tina@agency.test", "Tina T", None, &quick_hash("teach"), None)
        .await
        .unwrap();

    let enrollment = |guardian: &str| NewEnrollment {
        student: NewStudent {
            identifier: StudentIdentifier::new(Category::Bilingue, 5),
            full_name: "Amina Njoya".into(),
            category: Category::Bilingue,
            guardian_name: guardian.into(),
            guardian_phone: "0".into(),
            email: None,
            address: None,
        },
        payments: vec![NewPayment {
            teacher_id: teacher.id,
            amount: 100,
            payment_date: date(2024, 1, 1),
            next_payment_due: date(2024, 2, 1),
        }],
    };

    store.insert_enrollment(enrollment("Paul")).await.unwrap();
    let err = store.insert_enrollment(enrollment("Marie")).await.unwrap_err();

    assert_eq!(err, StoreError::DuplicateIdentifier("ST00B5".into()));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_pg_resolution_paths(pool: PgPool) {
    let store = PgCredentialStore::new(pool.clone());
    store
        .create_admin("admin", "admin@agency.test", "Admin", &quick_hash("s3cret!"))
        .await
        .unwrap();
    store
        .create_teacher("tina", "tina@agency.test", "Tina T", None, &quick_hash("teach"), Some(false))
        .await
        .unwrap();

    let admin = resolve_credentials(&store, " ADMIN@agency.test", "s3cret!", RoleHint::Admin)
        .await
        .unwrap();
    assert_eq!(admin.role(), RoleKind::Admin);

    let pending = resolve_credentials(&store, "tina", "teach", RoleHint::None).await;
    assert_eq!(pending.unwrap_err(), CoreError::NotFound);

    assert!(store.set_teacher_approval("TINA", true).await.unwrap());
    let approved = resolve_credentials(&store, "tina", "teach", RoleHint::None).await.unwrap();
    assert_eq!(approved.role(), RoleKind::Teacher);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_pg_concurrent_allocations_are_distinct(pool: PgPool) {
    let store = PgCredentialStore::new(pool.clone());

    sqlx::query(
        "INSERT INTO students (identifier, user_handle, full_name, category, guardian_name, guardian_phone) \
         VALUES ('ST00B7', 'ST00B7', 'Legacy', 'bilingue', 'Jane Doe', '0')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                IdentifierAllocator::try_allocate(&store, Category::Bilingue).await
            })
        })
        .collect();

    let mut ids = std::collections::HashSet::new();
    for handle in handles {
        let id = handle.await.unwrap().unwrap();
        assert!(id.sequence_number().unwrap() > 7);
        ids.insert(id);
    }

    assert_eq!(ids.len(), 50);

    let last: i64 = sqlx::query_scalar(
        "SELECT last_value FROM student_identifier_counters WHERE prefix = 'ST00B'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(last, 57);
}
