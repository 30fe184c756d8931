//! # Tutordesk Models
//!
//! Domain models and DTOs for the Tutordesk API.
//!
//! # Modules
//!
//! - [`identifiers`]: Student categories and the prefixed student identifier
//! - [`admins`], [`teachers`], [`students`]: The three account classes
//! - [`identity`]: The resolved identity returned by a successful login
//! - [`payments`]: Payment records and student/teacher relations
//! - [`auth`]: Login request and response DTOs
//!
//! # Example
//!
//! ```ignore
//! use tutordesk_models::{Category, StudentIdentifier};
//!
//! let id = StudentIdentifier::new(Category::Anglo, 7);
//! assert_eq!(id.as_str(), "ST00A7");
//! ```

pub mod admins;
pub mod auth;
pub mod identifiers;
pub mod identity;
pub mod payments;
pub mod students;
pub mod teachers;

// Re-export commonly used types at crate root for convenience
pub use admins::Admin;
pub use auth::{LoginRequest, LoginResponse};
pub use identifiers::{Category, IdentifierError, StudentIdentifier, trailing_number};
pub use identity::{Identity, RoleHint, RoleKind};
pub use payments::{
    NewPayment, NextDueQuery, NextDueResponse, PaymentRecord, StudentTeacherRelation,
};
pub use students::{CreateStudentDto, NewStudent, Student, StudentFields, TeacherPaymentDto};
pub use teachers::Teacher;
