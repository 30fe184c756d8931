//! The identity produced by a successful login.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::admins::Admin;
use crate::students::Student;
use crate::teachers::Teacher;

/// Caller-supplied hint restricting a login attempt to the admin set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoleHint {
    Admin,
    #[default]
    None,
}

/// Which account class an identity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    Admin,
    Teacher,
    Student,
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "role", content = "account", rename_all = "lowercase")]
pub enum Identity {
    Admin(Admin),
    Teacher(Teacher),
    Student(Student),
}

impl Identity {
    pub fn role(&self) -> RoleKind {
        match self {
            Self::Admin(_) => RoleKind::Admin,
            Self::Teacher(_) => RoleKind::Teacher,
            Self::Student(_) => RoleKind::Student,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::Admin(a) => a.id,
            Self::Teacher(t) => t.id,
            Self::Student(s) => s.id,
        }
    }

    /// Login handle.
    pub fn user(&self) -> &str {
        match self {
            Self::Admin(a) => &a.user,
            Self::Teacher(t) => &t.user,
            Self::Student(s) => &s.user,
        }
    }

    pub fn full_name(&self) -> &str {
        match self {
            Self::Admin(a) => &a.full_name,
            Self::Teacher(t) => &t.full_name,
            Self::Student(s) => &s.full_name,
        }
    }
}
