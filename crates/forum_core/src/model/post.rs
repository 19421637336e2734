//! Post record.
//!
//! # Responsibility
//! - Hold one forum post written by a user, optionally about a company.
//!
//! # Invariants
//! - `user_id` is required; `company_id` is nullable.
//! - Deleting the author or the referenced company deletes the post.
//! - `timestamp_ms` is Unix epoch milliseconds supplied by the caller.

use super::company::CompanyId;
use super::user::UserId;
use super::{require_text, EntityKind, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PostId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub uuid: PostId,
    /// Free-form text; no length cap.
    pub body: String,
    pub timestamp_ms: i64,
    /// Company the post talks about, if any.
    pub company_id: Option<CompanyId>,
    /// Author.
    pub user_id: UserId,
}

impl Post {
    /// Creates an unsaved post with a generated id.
    ///
    /// # Invariants
    /// - References are not checked here; `create_post` rejects dangling ids.
    pub fn new(
        body: impl Into<String>,
        timestamp_ms: i64,
        company_id: Option<CompanyId>,
        user_id: UserId,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            body: body.into(),
            timestamp_ms,
            company_id,
            user_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(EntityKind::Post, "body", &self.body)
    }
}
