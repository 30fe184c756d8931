//! # Tutordesk Core
//!
//! Core types, errors, and utilities for the Tutordesk API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: The domain error taxonomy and its HTTP response conversion
//! - [`password`]: bcrypt hashing and verification for admin/teacher secrets
//! - [`normalize`]: Identifier and guardian-name normalization
//!
//! # Example
//!
//! ```ignore
//! use tutordesk_core::{CoreError, AppError};
//! use tutordesk_core::password::{hash_password, verify_password};
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//!
//! let error: AppError = CoreError::InvalidCredential.into();
//! ```

pub mod errors;
pub mod normalize;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, CoreError, CoreResult};
pub use normalize::{normalize_identifier, normalize_secret};
pub use password::{hash_password, verify_password};
