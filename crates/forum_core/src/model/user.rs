//! Forum user record.
//!
//! # Invariants
//! - `password_hash` is stored verbatim; hashing happens outside core.
//! - `email` is the lookup key used by callers but is not schema-unique.

use super::{require_email, require_short_text, EntityKind, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type UserId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uuid: UserId,
    pub username: String,
    pub password_hash: String,
    pub email: String,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            username: username.into(),
            password_hash: password_hash.into(),
            email: email.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_short_text(EntityKind::User, "username", &self.username)?;
        require_short_text(EntityKind::User, "password_hash", &self.password_hash)?;
        require_email(&self.email)
    }
}
