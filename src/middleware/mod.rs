//! Request extractors for session handling.
//!
//! - [`auth::AuthSession`]: any valid session token
//! - [`auth::RequireAdmin`]: a session resolved on the admin path
//!
//! Handlers receive the session as an argument; nothing about the caller is
//! kept outside the request.

pub mod auth;
