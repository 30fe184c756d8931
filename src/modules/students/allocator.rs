//! Student identifier allocation.
//!
//! The next number for a category is `max(counter, highest stored number) + 1`,
//! computed by the store in one atomic step. Scanning the stored identifiers
//! first keeps the counter ahead of rows written by anything that bypassed
//! it, such as imports or rows predating the counter table.

use chrono::Utc;
use tracing::{instrument, warn};
use tutordesk_db::{CredentialStore, StoreError, StoreResult};
use tutordesk_models::{Category, StudentIdentifier, trailing_number};

pub struct IdentifierAllocator;

impl IdentifierAllocator {
    /// Allocate the next identifier for `category`.
    ///
    /// Never fails: when the store cannot be reached the identifier degrades
    /// to [`Self::timestamp_fallback`], which is not guaranteed unique. The
    /// subsequent insert rejects a collision.
    #[instrument(skip(store))]
    pub async fn allocate(store: &dyn CredentialStore, category: Category) -> StudentIdentifier {
        match Self::try_allocate(store, category).await {
            Ok(identifier) => identifier,
            Err(err) => {
                let identifier =
                    Self::timestamp_fallback(category, Utc::now().timestamp_millis());
                warn!(
                    error = %err,
                    identifier = %identifier,
                    "Sequential allocation failed, using timestamp identifier"
                );
                identifier
            }
        }
    }

    /// Allocate strictly from the store, surfacing its failures.
    pub async fn try_allocate(
        store: &dyn CredentialStore,
        category: Category,
    ) -> StoreResult<StudentIdentifier> {
        let prefix = category.prefix();
        let existing = store.list_student_identifiers(prefix).await?;
        let floor = Self::highest_sequence(prefix, &existing);

        let next = store.advance_sequence(prefix, floor).await?;
        match u64::try_from(next) {
            Ok(n) if n > 0 => Ok(StudentIdentifier::new(category, n)),
            _ => Err(StoreError::Unavailable(format!(
                "counter for {prefix} returned {next}"
            ))),
        }
    }

    /// Highest sequence number among `identifiers` carrying `prefix`, or 0.
    ///
    /// Identifiers without a positive trailing number, or with one too large
    /// for the counter column, are ignored.
    pub fn highest_sequence<S: AsRef<str>>(prefix: &str, identifiers: &[S]) -> i64 {
        identifiers
            .iter()
            .map(|id| id.as_ref())
            .filter(|id| id.starts_with(prefix))
            .filter_map(trailing_number)
            .filter_map(|n| i64::try_from(n).ok())
            .filter(|n| *n < i64::MAX)
            .max()
            .unwrap_or(0)
    }

    /// `prefix` followed by the last three digits of `millis`.
    ///
    /// Keeps leading zeros (`ST00A042`), and may repeat a number already
    /// handed out or about to be handed out sequentially.
    pub fn timestamp_fallback(category: Category, millis: i64) -> StudentIdentifier {
        let digits = millis.unsigned_abs().to_string();
        let suffix = &digits[digits.len().saturating_sub(3)..];
        StudentIdentifier::with_raw_suffix(category, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_sequence_ignores_other_prefixes_and_junk() {
        let ids = ["ST00A3", "ST00A12", "ST00F99", "ST00A", "ST00Axx", "ST00A0"];
        assert_eq!(IdentifierAllocator::highest_sequence("ST00A", &ids), 12);
    }

    #[test]
    fn test_highest_sequence_of_nothing_is_zero() {
        let ids: [&str; 0] = [];
        assert_eq!(IdentifierAllocator::highest_sequence("ST00B", &ids), 0);
    }

    #[test]
    fn test_highest_sequence_skips_out_of_range_numbers() {
        let ids = ["ST00A5", "ST00A9223372036854775807", "ST00A99999999999999999999"];
        assert_eq!(IdentifierAllocator::highest_sequence("ST00A", &ids), 5);
    }

    #[test]
    fn test_timestamp_fallback_uses_last_three_digits() {
        let id = IdentifierAllocator::timestamp_fallback(Category::Franco, 1_700_000_000_042);
        assert_eq!(id.as_str(), "ST00F042");

        let id = IdentifierAllocator::timestamp_fallback(Category::Anglo, 1_700_000_000_917);
        assert_eq!(id.as_str(), "ST00A917");
    }

    #[test]
    fn test_timestamp_fallback_short_input() {
        let id = IdentifierAllocator::timestamp_fallback(Category::Bilingue, 7);
        assert_eq!(id.as_str(), "ST00B7");
    }
}
