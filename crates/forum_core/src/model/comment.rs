//! Comment record.
//!
//! # Invariants
//! - `post_id` and `user_id` are both required.
//! - Deleting either the post or the commenting user deletes the comment.

use super::post::PostId;
use super::user::UserId;
use super::{require_text, EntityKind, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CommentId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub uuid: CommentId,
    pub body: String,
    /// Unix epoch milliseconds.
    pub timestamp_ms: i64,
    /// Whether the commenter agrees with the post.
    pub is_positive: bool,
    pub post_id: PostId,
    pub user_id: UserId,
}

impl Comment {
    pub fn new(
        body: impl Into<String>,
        timestamp_ms: i64,
        is_positive: bool,
        post_id: PostId,
        user_id: UserId,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            body: body.into(),
            timestamp_ms,
            is_positive,
            post_id,
            user_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(EntityKind::Comment, "body", &self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::Comment;
    use uuid::Uuid;

    #[test]
    fn blank_body_is_rejected() {
        let comment = Comment::new(" \n", 0, true, Uuid::new_v4(), Uuid::new_v4());
        assert!(comment.validate().is_err());
    }
}
