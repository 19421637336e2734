//! Forum domain model.
//!
//! # Responsibility
//! - Define the five persisted record types and their identifiers.
//! - Own field-level validation shared by every storage backend.
//!
//! # Invariants
//! - Every record is identified by a stable v4 UUID assigned at construction.
//! - Short text columns are capped at `MAX_SHORT_FIELD_CHARS` characters.
//! - Foreign keys are plain ids; existence is checked by the store, not here.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod comment;
pub mod company;
pub mod industry;
pub mod post;
pub mod user;

/// Upper bound for names, usernames, password hashes and emails.
pub const MAX_SHORT_FIELD_CHARS: usize = 64;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email regex"));

/// Untyped record identifier used where the entity kind is carried separately.
pub type EntityId = Uuid;

/// Discriminates the five record types in errors, logs and cascade reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Industry,
    Company,
    User,
    Post,
    Comment,
}

impl EntityKind {
    /// Stable lowercase label used in log events and error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Industry => "industry",
            Self::Company => "company",
            Self::User => "user",
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Field-level validation failures raised before any write reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trimming.
    BlankField {
        kind: EntityKind,
        field: &'static str,
    },
    /// Short text field exceeds `MAX_SHORT_FIELD_CHARS`.
    FieldTooLong {
        kind: EntityKind,
        field: &'static str,
        max_chars: usize,
        actual_chars: usize,
    },
    /// User email does not look like `local@domain`.
    InvalidEmail(String),
    /// Foreign key points at a record that is not persisted.
    MissingReference { kind: EntityKind, id: EntityId },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { kind, field } => write!(f, "{kind}.{field} must not be blank"),
            Self::FieldTooLong {
                kind,
                field,
                max_chars,
                actual_chars,
            } => write!(
                f,
                "{kind}.{field} allows at most {max_chars} characters, got {actual_chars}"
            ),
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
            Self::MissingReference { kind, id } => {
                write!(f, "referenced {kind} does not exist: {id}")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(
    kind: EntityKind,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField { kind, field });
    }
    Ok(())
}

pub(crate) fn require_short_text(
    kind: EntityKind,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    require_text(kind, field, value)?;
    let actual_chars = value.chars().count();
    if actual_chars > MAX_SHORT_FIELD_CHARS {
        return Err(ValidationError::FieldTooLong {
            kind,
            field,
            max_chars: MAX_SHORT_FIELD_CHARS,
            actual_chars,
        });
    }
    Ok(())
}

pub(crate) fn require_email(value: &str) -> Result<(), ValidationError> {
    require_short_text(EntityKind::User, "email", value)?;
    if !EMAIL_RE.is_match(value) {
        return Err(ValidationError::InvalidEmail(value.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{require_email, require_short_text, EntityKind, ValidationError};

    #[test]
    fn short_text_rejects_blank_and_overlong_values() {
        let blank = require_short_text(EntityKind::Industry, "name", "   ").unwrap_err();
        assert!(matches!(blank, ValidationError::BlankField { field: "name", .. }));

        let long = "x".repeat(65);
        let err = require_short_text(EntityKind::Company, "name", &long).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::FieldTooLong {
                actual_chars: 65,
                ..
            }
        ));
        assert!(require_short_text(EntityKind::Company, "name", &"x".repeat(64)).is_ok());
    }

    #[test]
    fn email_requires_single_at_sign() {
        assert!(require_email("test@ing.com").is_ok());
        assert!(matches!(
            require_email("not-an-email"),
            Err(ValidationError::InvalidEmail(_))
        ));
        assert!(require_email("a@b@c").is_err());
    }
}
