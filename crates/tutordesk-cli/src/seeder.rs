//! Fake teacher accounts for development databases.

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use std::time::Instant;
use tutordesk_core::hash_password;
use tutordesk_db::{PgCredentialStore, StoreError};
use tutordesk_models::Teacher;

/// Seed data for creating a teacher.
#[derive(Debug, Clone)]
pub struct TeacherSeed {
    pub user: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
}

/// Generate `count` teachers with distinct handles `teacher<offset + i>`.
pub fn generate_teachers(count: usize, offset: usize) -> Vec<TeacherSeed> {
    (0..count)
        .map(|i| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let n = offset + i;

            TeacherSeed {
                user: format!("teacher{n}"),
                email: format!(
                    "{}.{}+teacher{n}@example.com",
                    first_name.to_lowercase(),
                    last_name.to_lowercase()
                ),
                full_name: format!("{first_name} {last_name}"),
                phone: PhoneNumber().fake(),
            }
        })
        .collect()
}

/// Insert `count` fake teachers sharing one password.
///
/// Handles continue after the teachers already stored, so repeated runs do
/// not collide.
pub async fn seed_teachers(
    store: &PgCredentialStore,
    count: usize,
    password: &str,
    approved: Option<bool>,
) -> Result<Vec<Teacher>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("👩‍🏫 Seeding {count} teachers...");

    let password_hash = hash_password(password).map_err(|e| e.error.to_string())?;
    let offset = existing_teacher_count(store).await? + 1;

    let mut teachers = Vec::with_capacity(count);
    for seed in generate_teachers(count, offset) {
        let teacher = store
            .create_teacher(
                &seed.user,
                &seed.email,
                &seed.full_name,
                Some(&seed.phone),
                &password_hash,
                approved,
            )
            .await?;
        teachers.push(teacher);
    }

    println!(
        "✅ Seeded {} teachers in {:.2}s",
        teachers.len(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(teachers)
}

async fn existing_teacher_count(store: &PgCredentialStore) -> Result<usize, StoreError> {
    let count = store.count_teachers().await?;
    Ok(usize::try_from(count).unwrap_or(0))
}
