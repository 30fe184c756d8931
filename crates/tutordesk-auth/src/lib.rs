//! # Tutordesk Auth
//!
//! Session tokens for the Tutordesk API.
//!
//! A successful credential resolution is turned into a signed, short-lived
//! token. Handlers receive the decoded [`Claims`] explicitly instead of
//! reading a process-wide "current user".
//!
//! # Example
//!
//! ```ignore
//! use tutordesk_auth::{create_access_token, verify_token};
//! use tutordesk_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(&identity, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, identity.role());
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
