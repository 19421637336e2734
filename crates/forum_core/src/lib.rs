//! Core data model and entity store for the forum.
//! This crate is the single source of truth for record and cascade invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{open_configured_db, ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::comment::{Comment, CommentId};
pub use model::company::{Company, CompanyId};
pub use model::industry::{Industry, IndustryId};
pub use model::post::{Post, PostId};
pub use model::user::{User, UserId};
pub use model::{EntityId, EntityKind, ValidationError};
pub use repo::{
    CascadeReport, CommentQuery, CommentRepository, CompanyQuery, CompanyRepository, ForumStore,
    IndustryQuery, IndustryRepository, MemoryForumStore, PostQuery, PostRepository, RepoError,
    RepoResult, SqliteForumStore, UserQuery, UserRepository,
};
pub use service::forum_service::{CommentSentiment, ForumService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
