//! # Tutordesk CLI
//!
//! Account administration and seeding for Tutordesk.
//!
//! Admins and teachers cannot be created over HTTP; this crate is how they
//! enter the database.
//!
//! ## Usage
//!
//! ```ignore
//! use tutordesk_cli::seeder::seed_teachers;
//! use tutordesk_db::{PgCredentialStore, init_db_pool};
//!
//! let store = PgCredentialStore::new(init_db_pool().await);
//! seed_teachers(&store, 20, "password123", Some(true)).await?;
//! ```

pub mod seeder;
