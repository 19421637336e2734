//! Entity store contracts and their storage implementations.
//!
//! # Responsibility
//! - Define one repository trait per entity plus the `ForumStore` umbrella.
//! - Keep backend details (arena maps, SQL) behind those traits.
//!
//! # Invariants
//! - Writes run `validate()` and check every referenced parent before
//!   touching storage.
//! - Deleting a parent removes all transitive dependents first.
//! - Deleting an absent id succeeds with an empty `CascadeReport`.
//! - `get_*` resolves exactly one row; zero is `NotFound`, more than one is
//!   `MultipleMatches`.

use crate::db::DbError;
use crate::model::comment::{Comment, CommentId};
use crate::model::company::{Company, CompanyId};
use crate::model::industry::{Industry, IndustryId};
use crate::model::post::{Post, PostId};
use crate::model::user::{User, UserId};
use crate::model::{EntityId, EntityKind, ValidationError};
use log::{debug, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod arena;
pub mod memory_store;
pub mod query;
pub mod sqlite_store;

pub use memory_store::MemoryForumStore;
pub use query::{CommentQuery, CompanyQuery, IndustryQuery, PostQuery, UserQuery};
pub use sqlite_store::SqliteForumStore;

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors surfaced by every store operation.
#[derive(Debug)]
pub enum RepoError {
    /// Field or reference validation failed; nothing was written.
    Validation(ValidationError),
    /// SQLite transport or bootstrap error.
    Db(DbError),
    /// No persisted record matched. `id` is set for id-based operations.
    NotFound {
        kind: EntityKind,
        id: Option<EntityId>,
    },
    /// Create was called with an id that is already persisted.
    AlreadyExists { kind: EntityKind, id: EntityId },
    /// A lookup expected to be unique matched several records.
    MultipleMatches { kind: EntityKind, count: usize },
    /// Persisted data cannot be converted into a valid record.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Returns whether this error means "no such record".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id: Some(id) } => write!(f, "{kind} not found: {id}"),
            Self::NotFound { kind, id: None } => write!(f, "no {kind} matches the query"),
            Self::AlreadyExists { kind, id } => write!(f, "{kind} already exists: {id}"),
            Self::MultipleMatches { kind, count } => {
                write!(f, "expected one {kind}, query matched {count}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted forum data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "forum store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "forum store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "forum store requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rows removed by one delete call, including the target itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub industries: usize,
    pub companies: usize,
    pub users: usize,
    pub posts: usize,
    pub comments: usize,
}

impl CascadeReport {
    pub fn removed(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Industry => self.industries,
            EntityKind::Company => self.companies,
            EntityKind::User => self.users,
            EntityKind::Post => self.posts,
            EntityKind::Comment => self.comments,
        }
    }

    pub fn total(&self) -> usize {
        self.industries + self.companies + self.users + self.posts + self.comments
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub(crate) fn record(&mut self, kind: EntityKind) {
        self.add(kind, 1);
    }

    pub(crate) fn add(&mut self, kind: EntityKind, count: usize) {
        let slot = match kind {
            EntityKind::Industry => &mut self.industries,
            EntityKind::Company => &mut self.companies,
            EntityKind::User => &mut self.users,
            EntityKind::Post => &mut self.posts,
            EntityKind::Comment => &mut self.comments,
        };
        *slot += count;
    }
}

pub(crate) fn log_write(backend: &str, op: &str, kind: EntityKind, id: EntityId) {
    debug!("event=entity_{op} module=repo status=ok backend={backend} kind={kind} id={id}");
}

pub(crate) fn log_delete(backend: &str, kind: EntityKind, id: EntityId, report: &CascadeReport) {
    if report.is_empty() {
        debug!("event=entity_delete module=repo status=noop backend={backend} kind={kind} id={id}");
        return;
    }
    info!(
        "event=entity_delete module=repo status=ok backend={backend} kind={kind} id={id} industries={} companies={} users={} posts={} comments={}",
        report.industries, report.companies, report.users, report.posts, report.comments
    );
}

/// Narrows a filtered result to the one record a `get_*` call expects.
pub(crate) fn expect_single<T>(kind: EntityKind, mut matches: Vec<T>) -> RepoResult<T> {
    match matches.len() {
        0 => Err(RepoError::NotFound { kind, id: None }),
        1 => Ok(matches.remove(0)),
        count => Err(RepoError::MultipleMatches { kind, count }),
    }
}

pub trait IndustryRepository {
    fn create_industry(&mut self, industry: &Industry) -> RepoResult<IndustryId>;
    fn update_industry(&mut self, industry: &Industry) -> RepoResult<()>;
    fn find_industry(&self, id: IndustryId) -> RepoResult<Option<Industry>>;
    fn list_industries(&self, query: &IndustryQuery) -> RepoResult<Vec<Industry>>;
    /// Removes the industry and every company (with their posts) under it.
    fn delete_industry(&mut self, id: IndustryId) -> RepoResult<CascadeReport>;

    fn get_industry(&self, query: &IndustryQuery) -> RepoResult<Industry> {
        expect_single(EntityKind::Industry, self.list_industries(query)?)
    }

    fn count_industries(&self) -> RepoResult<usize> {
        Ok(self.list_industries(&IndustryQuery::default())?.len())
    }
}

pub trait CompanyRepository {
    fn create_company(&mut self, company: &Company) -> RepoResult<CompanyId>;
    fn update_company(&mut self, company: &Company) -> RepoResult<()>;
    fn find_company(&self, id: CompanyId) -> RepoResult<Option<Company>>;
    fn list_companies(&self, query: &CompanyQuery) -> RepoResult<Vec<Company>>;
    /// Removes the company and every post about it.
    fn delete_company(&mut self, id: CompanyId) -> RepoResult<CascadeReport>;

    fn get_company(&self, query: &CompanyQuery) -> RepoResult<Company> {
        expect_single(EntityKind::Company, self.list_companies(query)?)
    }

    fn count_companies(&self) -> RepoResult<usize> {
        Ok(self.list_companies(&CompanyQuery::default())?.len())
    }
}

pub trait UserRepository {
    fn create_user(&mut self, user: &User) -> RepoResult<UserId>;
    fn update_user(&mut self, user: &User) -> RepoResult<()>;
    fn find_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn list_users(&self, query: &UserQuery) -> RepoResult<Vec<User>>;
    /// Removes the user, their posts and every comment they wrote.
    fn delete_user(&mut self, id: UserId) -> RepoResult<CascadeReport>;

    fn get_user(&self, query: &UserQuery) -> RepoResult<User> {
        expect_single(EntityKind::User, self.list_users(query)?)
    }

    fn count_users(&self) -> RepoResult<usize> {
        Ok(self.list_users(&UserQuery::default())?.len())
    }
}

pub trait PostRepository {
    fn create_post(&mut self, post: &Post) -> RepoResult<PostId>;
    fn update_post(&mut self, post: &Post) -> RepoResult<()>;
    fn find_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    fn list_posts(&self, query: &PostQuery) -> RepoResult<Vec<Post>>;
    /// Removes the post and its comments.
    fn delete_post(&mut self, id: PostId) -> RepoResult<CascadeReport>;

    fn get_post(&self, query: &PostQuery) -> RepoResult<Post> {
        expect_single(EntityKind::Post, self.list_posts(query)?)
    }

    fn count_posts(&self) -> RepoResult<usize> {
        Ok(self.list_posts(&PostQuery::default())?.len())
    }
}

pub trait CommentRepository {
    fn create_comment(&mut self, comment: &Comment) -> RepoResult<CommentId>;
    fn update_comment(&mut self, comment: &Comment) -> RepoResult<()>;
    fn find_comment(&self, id: CommentId) -> RepoResult<Option<Comment>>;
    fn list_comments(&self, query: &CommentQuery) -> RepoResult<Vec<Comment>>;
    fn delete_comment(&mut self, id: CommentId) -> RepoResult<CascadeReport>;

    fn get_comment(&self, query: &CommentQuery) -> RepoResult<Comment> {
        expect_single(EntityKind::Comment, self.list_comments(query)?)
    }

    fn count_comments(&self) -> RepoResult<usize> {
        Ok(self.list_comments(&CommentQuery::default())?.len())
    }
}

/// Full forum store: every entity repository behind one handle.
pub trait ForumStore:
    IndustryRepository + CompanyRepository + UserRepository + PostRepository + CommentRepository
{
}

impl<T> ForumStore for T where
    T: IndustryRepository
        + CompanyRepository
        + UserRepository
        + PostRepository
        + CommentRepository
{
}
