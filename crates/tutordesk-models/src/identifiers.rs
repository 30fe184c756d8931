//! Student categories and the identifiers allocated for them.
//!
//! A [`StudentIdentifier`] is `<PREFIX><N>` where the prefix is fixed by the
//! student's [`Category`] and `N` is a positive integer without padding:
//!
//! | Category   | Prefix  | Example    |
//! |------------|---------|------------|
//! | `anglo`    | `ST00A` | `ST00A12`  |
//! | `franco`   | `ST00F` | `ST00F3`   |
//! | `bilingue` | `ST00B` | `ST00B140` |
//!
//! Canonical identifiers match `^(ST00A|ST00F|ST00B)[1-9][0-9]*$`.

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Type,
    postgres::{PgHasArrayType, PgTypeInfo},
};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    UnknownCategory(String),
    Malformed(String),
}

impl std::error::Error for IdentifierError {}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory(c) => write!(f, "Unknown student category '{}'", c),
            Self::Malformed(s) => write!(f, "'{}' is not a valid student identifier", s),
        }
    }
}

// ============================================================================
// Category
// ============================================================================

/// Language track of a student; decides the identifier prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Anglo,
    Franco,
    Bilingue,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Anglo, Category::Franco, Category::Bilingue];

    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Anglo => "ST00A",
            Self::Franco => "ST00F",
            Self::Bilingue => "ST00B",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anglo => "anglo",
            Self::Franco => "franco",
            Self::Bilingue => "bilingue",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.prefix() == prefix)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anglo" => Ok(Self::Anglo),
            "franco" => Ok(Self::Franco),
            "bilingue" => Ok(Self::Bilingue),
            other => Err(IdentifierError::UnknownCategory(other.to_string())),
        }
    }
}

impl Type<sqlx::Postgres> for Category {
    fn type_info() -> PgTypeInfo {
        <String as Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> Encode<'q, sqlx::Postgres> for Category {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> Decode<'r, sqlx::Postgres> for Category {
    fn decode(
        value: <sqlx::Postgres as Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(s.parse::<Category>()?)
    }
}

// ============================================================================
// StudentIdentifier
// ============================================================================

/// Extract the trailing run of ASCII digits of `value` as a positive number.
///
/// Mirrors matching `(\d+)$`: no trailing digits, an overflowing run, or a
/// run equal to zero all yield `None`.
pub fn trailing_number(value: &str) -> Option<u64> {
    let digits_start = value
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;

    value[digits_start..].parse::<u64>().ok().filter(|n| *n > 0)
}

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
#[schema(value_type = String, example = "ST00A7")]
pub struct StudentIdentifier(String);

impl StudentIdentifier {
    /// Build the canonical identifier for sequence number `number`.
    ///
    /// # Panics
    ///
    /// Panics if `number` is zero.
    pub fn new(category: Category, number: u64) -> Self {
        assert!(number > 0, "student sequence numbers start at 1");
        Self(format!("{}{}", category.prefix(), number))
    }

    /// Build an identifier from an arbitrary digit suffix without checking
    /// the canonical format.
    ///
    /// Used only by the allocator's timestamp fallback, whose suffix may carry
    /// leading zeros.
    pub fn with_raw_suffix(category: Category, suffix: &str) -> Self {
        Self(format!("{}{}", category.prefix(), suffix))
    }

    /// Wrap a value loaded from storage. Legacy rows are not re-validated.
    #[inline]
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn category(&self) -> Option<Category> {
        self.0.get(..5).and_then(Category::from_prefix)
    }

    pub fn sequence_number(&self) -> Option<u64> {
        trailing_number(&self.0)
    }

    /// True when the identifier matches `^(ST00A|ST00F|ST00B)[1-9][0-9]*$`.
    pub fn is_canonical(&self) -> bool {
        if self.category().is_none() {
            return false;
        }
        let digits = &self.0[5..];
        !digits.is_empty()
            && !digits.starts_with('0')
            && digits.bytes().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Debug for StudentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StudentIdentifier({})", self.0)
    }
}

impl fmt::Display for StudentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StudentIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for StudentIdentifier {
    type Err = IdentifierError;

    /// Parses canonical identifiers only; the prefix is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Self(s.to_string());
        if id.is_canonical() {
            Ok(id)
        } else {
            Err(IdentifierError::Malformed(s.to_string()))
        }
    }
}

impl<'de> Deserialize<'de> for StudentIdentifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self)
    }
}

impl Type<sqlx::Postgres> for StudentIdentifier {
    fn type_info() -> PgTypeInfo {
        <String as Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> Encode<'q, sqlx::Postgres> for StudentIdentifier {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

impl<'r> Decode<'r, sqlx::Postgres> for StudentIdentifier {
    fn decode(
        value: <sqlx::Postgres as Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(Self::from_stored(s))
    }
}

impl PgHasArrayType for StudentIdentifier {
    fn array_type_info() -> PgTypeInfo {
        <String as PgHasArrayType>::array_type_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_map_one_to_one() {
        assert_eq!(Category::Anglo.prefix(), "ST00A");
        assert_eq!(Category::Franco.prefix(), "ST00F");
        assert_eq!(Category::Bilingue.prefix(), "ST00B");

        for category in Category::ALL {
            assert_eq!(Category::from_prefix(category.prefix()), Some(category));
        }
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("Franco".parse::<Category>(), Ok(Category::Franco));
        assert!("spanish".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_is_lowercase() {
        let json = serde_json::to_string(&Category::Bilingue).unwrap();
        assert_eq!(json, "\"bilingue\"");
    }

    #[test]
    fn test_trailing_number() {
        assert_eq!(trailing_number("ST00A7"), Some(7));
        assert_eq!(trailing_number("ST00B140"), Some(140));
        assert_eq!(trailing_number("ST00A0"), None);
        assert_eq!(trailing_number("ST00A"), None);
        assert_eq!(trailing_number("ST00Ax"), None);
        assert_eq!(trailing_number("ST00A99999999999999999999999"), None);
    }

    #[test]
    fn test_trailing_number_takes_only_the_last_run() {
        // The prefix's own "00" must not bleed into the number.
        assert_eq!(trailing_number("ST00F12"), Some(12));
        assert_eq!(trailing_number("ST00F007"), Some(7));
    }

    #[test]
    fn test_new_identifier_is_canonical() {
        let id = StudentIdentifier::new(Category::Anglo, 7);
        assert_eq!(id.as_str(), "ST00A7");
        assert!(id.is_canonical());
        assert_eq!(id.category(), Some(Category::Anglo));
        assert_eq!(id.sequence_number(), Some(7));
    }

    #[test]
    fn test_parse_rejects_non_canonical() {
        assert!("ST00A1".parse::<StudentIdentifier>().is_ok());
        assert!("ST00A01".parse::<StudentIdentifier>().is_err());
        assert!("ST00A0".parse::<StudentIdentifier>().is_err());
        assert!("st00a1".parse::<StudentIdentifier>().is_err());
        assert!("ST00C1".parse::<StudentIdentifier>().is_err());
        assert!("ST00A".parse::<StudentIdentifier>().is_err());
    }

    #[test]
    fn test_raw_suffix_may_be_non_canonical() {
        let id = StudentIdentifier::with_raw_suffix(Category::Franco, "042");
        assert_eq!(id.as_str(), "ST00F042");
        assert!(!id.is_canonical());
        assert_eq!(id.sequence_number(), Some(42));
    }

    #[test]
    #[should_panic]
    fn test_zero_sequence_number_panics() {
        let _ = StudentIdentifier::new(Category::Anglo, 0);
    }
}
