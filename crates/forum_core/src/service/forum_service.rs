//! Forum use-case service.
//!
//! # Responsibility
//! - Provide intent-level entry points over any `ForumStore`.
//! - Stamp post/comment timestamps at publish time.
//!
//! # Invariants
//! - Every write goes through the store's validation and reference checks.
//! - Edit operations load by id first and fail with `NotFound` when the
//!   record is gone; they never resurrect a deleted record.

use crate::model::comment::{Comment, CommentId};
use crate::model::company::{Company, CompanyId};
use crate::model::industry::{Industry, IndustryId};
use crate::model::post::{Post, PostId};
use crate::model::user::{User, UserId};
use crate::model::{EntityId, EntityKind};
use crate::repo::query::{CommentQuery, CompanyQuery, PostQuery};
use crate::repo::{CascadeReport, ForumStore, RepoError, RepoResult};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Positive/negative comment tally for one post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommentSentiment {
    pub positive: usize,
    pub negative: usize,
}

/// Use-case wrapper around a forum store handle.
pub struct ForumService<S: ForumStore> {
    store: S,
}

impl<S: ForumStore> ForumService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn create_industry(&mut self, name: impl Into<String>) -> RepoResult<Industry> {
        let industry = Industry::new(name);
        self.store.create_industry(&industry)?;
        Ok(industry)
    }

    pub fn create_company(
        &mut self,
        name: impl Into<String>,
        industry_id: IndustryId,
    ) -> RepoResult<Company> {
        let company = Company::new(name, industry_id);
        self.store.create_company(&company)?;
        Ok(company)
    }

    /// Registers a user. `password_hash` is stored as given.
    pub fn register_user(
        &mut self,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        email: impl Into<String>,
    ) -> RepoResult<User> {
        let user = User::new(username, password_hash, email);
        self.store.create_user(&user)?;
        Ok(user)
    }

    /// Publishes a post stamped with the current time.
    pub fn publish_post(
        &mut self,
        user_id: UserId,
        company_id: Option<CompanyId>,
        body: impl Into<String>,
    ) -> RepoResult<Post> {
        let post = Post::new(body, now_epoch_ms(), company_id, user_id);
        self.store.create_post(&post)?;
        Ok(post)
    }

    /// Adds a comment stamped with the current time.
    pub fn comment_on(
        &mut self,
        post_id: PostId,
        user_id: UserId,
        body: impl Into<String>,
        is_positive: bool,
    ) -> RepoResult<Comment> {
        let comment = Comment::new(body, now_epoch_ms(), is_positive, post_id, user_id);
        self.store.create_comment(&comment)?;
        Ok(comment)
    }

    pub fn rename_industry(
        &mut self,
        id: IndustryId,
        name: impl Into<String>,
    ) -> RepoResult<Industry> {
        let mut industry = self
            .store
            .find_industry(id)?
            .ok_or_else(|| not_found(EntityKind::Industry, id))?;
        industry.name = name.into();
        self.store.update_industry(&industry)?;
        Ok(industry)
    }

    pub fn rename_company(&mut self, id: CompanyId, name: impl Into<String>) -> RepoResult<Company> {
        let mut company = self
            .store
            .find_company(id)?
            .ok_or_else(|| not_found(EntityKind::Company, id))?;
        company.name = name.into();
        self.store.update_company(&company)?;
        Ok(company)
    }

    /// Replaces the user's email; the old address stops resolving at once.
    pub fn change_email(&mut self, id: UserId, email: impl Into<String>) -> RepoResult<User> {
        let mut user = self
            .store
            .find_user(id)?
            .ok_or_else(|| not_found(EntityKind::User, id))?;
        user.email = email.into();
        self.store.update_user(&user)?;
        Ok(user)
    }

    /// Replaces a post body. The original timestamp is kept.
    pub fn edit_post(&mut self, id: PostId, body: impl Into<String>) -> RepoResult<Post> {
        let mut post = self
            .store
            .find_post(id)?
            .ok_or_else(|| not_found(EntityKind::Post, id))?;
        post.body = body.into();
        self.store.update_post(&post)?;
        Ok(post)
    }

    pub fn edit_comment(&mut self, id: CommentId, body: impl Into<String>) -> RepoResult<Comment> {
        let mut comment = self
            .store
            .find_comment(id)?
            .ok_or_else(|| not_found(EntityKind::Comment, id))?;
        comment.body = body.into();
        self.store.update_comment(&comment)?;
        Ok(comment)
    }

    /// Follows a company's foreign key up to its industry.
    pub fn industry_of(&self, company_id: CompanyId) -> RepoResult<Industry> {
        let company = self
            .store
            .find_company(company_id)?
            .ok_or_else(|| not_found(EntityKind::Company, company_id))?;
        self.store
            .find_industry(company.industry_id)?
            .ok_or_else(|| not_found(EntityKind::Industry, company.industry_id))
    }

    pub fn companies_in_industry(&self, industry_name: &str) -> RepoResult<Vec<Company>> {
        self.store
            .list_companies(&CompanyQuery::in_industry_named(industry_name))
    }

    pub fn posts_about(&self, company_id: CompanyId) -> RepoResult<Vec<Post>> {
        self.store.list_posts(&PostQuery::about_company(company_id))
    }

    pub fn comments_on(&self, post_id: PostId) -> RepoResult<Vec<Comment>> {
        self.store.list_comments(&CommentQuery::on_post(post_id))
    }

    pub fn sentiment(&self, post_id: PostId) -> RepoResult<CommentSentiment> {
        let comments = self.comments_on(post_id)?;
        let positive = comments.iter().filter(|comment| comment.is_positive).count();
        Ok(CommentSentiment {
            positive,
            negative: comments.len() - positive,
        })
    }

    pub fn delete_industry(&mut self, id: IndustryId) -> RepoResult<CascadeReport> {
        self.store.delete_industry(id)
    }

    pub fn delete_company(&mut self, id: CompanyId) -> RepoResult<CascadeReport> {
        self.store.delete_company(id)
    }

    pub fn delete_user(&mut self, id: UserId) -> RepoResult<CascadeReport> {
        self.store.delete_user(id)
    }

    pub fn delete_post(&mut self, id: PostId) -> RepoResult<CascadeReport> {
        self.store.delete_post(id)
    }

    pub fn delete_comment(&mut self, id: CommentId) -> RepoResult<CascadeReport> {
        self.store.delete_comment(id)
    }
}

fn not_found(kind: EntityKind, id: EntityId) -> RepoError {
    RepoError::NotFound { kind, id: Some(id) }
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

#[cfg(test)]
mod tests {
    use super::{now_epoch_ms, ForumService};
    use crate::repo::MemoryForumStore;

    #[test]
    fn now_is_after_2020() {
        assert!(now_epoch_ms() > 1_577_836_800_000);
    }

    #[test]
    fn sentiment_splits_positive_and_negative() {
        let mut service = ForumService::new(MemoryForumStore::new());
        let user = service
            .register_user("vedant", "hash", "test@ing.com")
            .unwrap();
        let post = service.publish_post(user.uuid, None, "hello").unwrap();
        service.comment_on(post.uuid, user.uuid, "yes", true).unwrap();
        service.comment_on(post.uuid, user.uuid, "yes!", true).unwrap();
        service.comment_on(post.uuid, user.uuid, "no", false).unwrap();

        let sentiment = service.sentiment(post.uuid).unwrap();
        assert_eq!((sentiment.positive, sentiment.negative), (2, 1));
    }
}
