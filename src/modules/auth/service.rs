use tracing::{debug, error, instrument};
use tutordesk_core::{CoreError, CoreResult, normalize_identifier, normalize_secret, verify_password};
use tutordesk_db::CredentialStore;
use tutordesk_models::{Identity, RoleHint};

/// How a path checks the submitted secret against what it has stored.
#[derive(Debug, Clone, Copy)]
pub enum SecretCheck<'a> {
    /// bcrypt hash (admins and teachers).
    Hashed(&'a str),
    /// Guardian name compared in the clear after trimming and case folding
    /// (students).
    GuardianName(&'a str),
}

impl SecretCheck<'_> {
    pub fn verify(&self, secret: &str) -> bool {
        match self {
            Self::Hashed(hash) => match verify_password(secret, hash) {
                Ok(valid) => valid,
                Err(err) => {
                    error!(error = %err.error, "Stored password hash is unreadable");
                    false
                }
            },
            Self::GuardianName(expected) => normalize_secret(secret) == normalize_secret(expected),
        }
    }
}

fn check(identity: Identity, check: SecretCheck<'_>, secret: &str) -> CoreResult<Identity> {
    if check.verify(secret) {
        debug!(role = %identity.role(), user = %identity.user(), "Credentials accepted");
        Ok(identity)
    } else {
        Err(CoreError::InvalidCredential)
    }
}

pub struct AuthService;

impl AuthService {
    /// Resolve who is signing in.
    ///
    /// With [`RoleHint::Admin`] only administrators are searched. Otherwise an
    /// eligible teacher is tried first and a student second; a teacher whose
    /// password does not match ends the search.
    #[instrument(skip(store, secret))]
    pub async fn resolve_credentials(
        store: &dyn CredentialStore,
        identifier: &str,
        secret: &str,
        role_hint: RoleHint,
    ) -> CoreResult<Identity> {
        let identifier = normalize_identifier(identifier);

        match role_hint {
            RoleHint::Admin => Self::resolve_admin(store, &identifier, secret).await,
            RoleHint::None => Self::resolve_member(store, &identifier, secret).await,
        }
    }

    async fn resolve_admin(
        store: &dyn CredentialStore,
        identifier: &str,
        secret: &str,
    ) -> CoreResult<Identity> {
        let admin = store
            .find_admin(identifier)
            .await?
            .ok_or(CoreError::NotFound)?;

        let hash = admin.password_hash.clone();
        check(Identity::Admin(admin), SecretCheck::Hashed(&hash), secret)
    }

    async fn resolve_member(
        store: &dyn CredentialStore,
        identifier: &str,
        secret: &str,
    ) -> CoreResult<Identity> {
        if let Some(teacher) = store.find_approved_teacher(identifier).await? {
            let hash = teacher.password_hash.clone();
            return check(Identity::Teacher(teacher), SecretCheck::Hashed(&hash), secret);
        }

        let student = store
            .find_student(identifier)
            .await?
            .ok_or(CoreError::NotFound)?;

        let guardian = student.guardian_name.clone();
        check(
            Identity::Student(student),
            SecretCheck::GuardianName(&guardian),
            secret,
        )
    }
}

/// Resolve an `(identifier, secret, role_hint)` triple to an identity.
pub async fn resolve_credentials(
    store: &dyn CredentialStore,
    identifier: &str,
    secret: &str,
    role_hint: RoleHint,
) -> CoreResult<Identity> {
    AuthService::resolve_credentials(store, identifier, secret, role_hint).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guardian_name_check_folds_case_and_whitespace() {
        let check = SecretCheck::GuardianName("Jane Doe");
        assert!(check.verify("  jane DOE "));
        assert!(!check.verify("Jane D."));
    }

    #[test]
    fn test_malformed_hash_is_a_mismatch() {
        assert!(!SecretCheck::Hashed("not-a-bcrypt-hash").verify("anything"));
    }
}
