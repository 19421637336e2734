//! In-process forum store built on arenas and parent→children index maps.
//!
//! # Responsibility
//! - Implement every repository trait without an external database.
//! - Perform cascade deletes explicitly by walking the child indexes.
//!
//! # Invariants
//! - Each `ChildIndex` lists exactly the live children of each parent.
//! - Children are removed before their parent; a child already removed via
//!   another path (a user's comment on that user's own post) is skipped.
//! - List results follow creation order.

use super::arena::{Arena, ChildIndex};
use super::query::{CommentQuery, CompanyQuery, IndustryQuery, PostQuery, UserQuery};
use super::{
    log_delete, log_write, CascadeReport, CommentRepository, CompanyRepository,
    IndustryRepository, PostRepository, RepoError, RepoResult, UserRepository,
};
use crate::model::comment::{Comment, CommentId};
use crate::model::company::{Company, CompanyId};
use crate::model::industry::{Industry, IndustryId};
use crate::model::post::{Post, PostId};
use crate::model::user::{User, UserId};
use crate::model::{EntityId, EntityKind, ValidationError};

const BACKEND: &str = "memory";

/// Forum store held entirely in memory. Dropping it discards all data.
#[derive(Debug, Default)]
pub struct MemoryForumStore {
    industries: Arena<Industry>,
    companies: Arena<Company>,
    users: Arena<User>,
    posts: Arena<Post>,
    comments: Arena<Comment>,
    companies_by_industry: ChildIndex,
    posts_by_company: ChildIndex,
    posts_by_user: ChildIndex,
    comments_by_post: ChildIndex,
    comments_by_user: ChildIndex,
}

impl MemoryForumStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn remove_industry(&mut self, id: IndustryId, report: &mut CascadeReport) {
        if !self.industries.contains(id) {
            return;
        }
        for company_id in self.companies_by_industry.take(id) {
            self.remove_company(company_id, report);
        }
        if self.industries.remove(id).is_some() {
            report.record(EntityKind::Industry);
        }
    }

    fn remove_company(&mut self, id: CompanyId, report: &mut CascadeReport) {
        if !self.companies.contains(id) {
            return;
        }
        for post_id in self.posts_by_company.take(id) {
            self.remove_post(post_id, report);
        }
        if let Some(company) = self.companies.remove(id) {
            self.companies_by_industry.unlink(company.industry_id, id);
            report.record(EntityKind::Company);
        }
    }

    fn remove_user(&mut self, id: UserId, report: &mut CascadeReport) {
        if !self.users.contains(id) {
            return;
        }
        for post_id in self.posts_by_user.take(id) {
            self.remove_post(post_id, report);
        }
        for comment_id in self.comments_by_user.take(id) {
            self.remove_comment(comment_id, report);
        }
        if self.users.remove(id).is_some() {
            report.record(EntityKind::User);
        }
    }

    fn remove_post(&mut self, id: PostId, report: &mut CascadeReport) {
        if !self.posts.contains(id) {
            return;
        }
        for comment_id in self.comments_by_post.take(id) {
            self.remove_comment(comment_id, report);
        }
        if let Some(post) = self.posts.remove(id) {
            self.posts_by_user.unlink(post.user_id, id);
            if let Some(company_id) = post.company_id {
                self.posts_by_company.unlink(company_id, id);
            }
            report.record(EntityKind::Post);
        }
    }

    fn remove_comment(&mut self, id: CommentId, report: &mut CascadeReport) {
        if let Some(comment) = self.comments.remove(id) {
            self.comments_by_post.unlink(comment.post_id, id);
            self.comments_by_user.unlink(comment.user_id, id);
            report.record(EntityKind::Comment);
        }
    }

    fn company_matches(&self, company: &Company, query: &CompanyQuery) -> bool {
        matches_opt(&query.name, &company.name)
            && matches_opt(&query.industry_id, &company.industry_id)
            && query.industry_name.as_ref().map_or(true, |name| {
                self.industries
                    .get(company.industry_id)
                    .is_some_and(|industry| &industry.name == name)
            })
    }

    fn post_matches(&self, post: &Post, query: &PostQuery) -> bool {
        matches_opt(&query.body, &post.body)
            && matches_opt(&query.user_id, &post.user_id)
            && query
                .company_id
                .map_or(true, |company_id| post.company_id == Some(company_id))
            && self.user_email_matches(post.user_id, &query.user_email)
            && query.company_name.as_ref().map_or(true, |name| {
                post.company_id
                    .and_then(|company_id| self.companies.get(company_id))
                    .is_some_and(|company| &company.name == name)
            })
    }

    fn comment_matches(&self, comment: &Comment, query: &CommentQuery) -> bool {
        matches_opt(&query.body, &comment.body)
            && matches_opt(&query.post_id, &comment.post_id)
            && matches_opt(&query.user_id, &comment.user_id)
            && matches_opt(&query.is_positive, &comment.is_positive)
            && self.user_email_matches(comment.user_id, &query.user_email)
    }

    fn user_email_matches(&self, user_id: UserId, email: &Option<String>) -> bool {
        email.as_ref().map_or(true, |email| {
            self.users
                .get(user_id)
                .is_some_and(|user| &user.email == email)
        })
    }
}

fn matches_opt<T: PartialEq>(filter: &Option<T>, value: &T) -> bool {
    filter.as_ref().map_or(true, |expected| expected == value)
}

fn require_ref<T>(arena: &Arena<T>, kind: EntityKind, id: EntityId) -> RepoResult<()> {
    if !arena.contains(id) {
        return Err(ValidationError::MissingReference { kind, id }.into());
    }
    Ok(())
}

fn require_present<T>(arena: &Arena<T>, kind: EntityKind, id: EntityId) -> RepoResult<()> {
    if !arena.contains(id) {
        return Err(RepoError::NotFound { kind, id: Some(id) });
    }
    Ok(())
}

fn insert_new<T>(arena: &mut Arena<T>, kind: EntityKind, id: EntityId, value: T) -> RepoResult<()> {
    if !arena.insert(id, value) {
        return Err(RepoError::AlreadyExists { kind, id });
    }
    log_write(BACKEND, "create", kind, id);
    Ok(())
}

impl IndustryRepository for MemoryForumStore {
    fn create_industry(&mut self, industry: &Industry) -> RepoResult<IndustryId> {
        industry.validate()?;
        insert_new(
            &mut self.industries,
            EntityKind::Industry,
            industry.uuid,
            industry.clone(),
        )?;
        Ok(industry.uuid)
    }

    fn update_industry(&mut self, industry: &Industry) -> RepoResult<()> {
        industry.validate()?;
        let slot = self
            .industries
            .get_mut(industry.uuid)
            .ok_or(RepoError::NotFound {
                kind: EntityKind::Industry,
                id: Some(industry.uuid),
            })?;
        *slot = industry.clone();
        log_write(BACKEND, "update", EntityKind::Industry, industry.uuid);
        Ok(())
    }

    fn find_industry(&self, id: IndustryId) -> RepoResult<Option<Industry>> {
        Ok(self.industries.get(id).cloned())
    }

    fn list_industries(&self, query: &IndustryQuery) -> RepoResult<Vec<Industry>> {
        Ok(self
            .industries
            .iter()
            .filter(|industry| matches_opt(&query.name, &industry.name))
            .cloned()
            .collect())
    }

    fn delete_industry(&mut self, id: IndustryId) -> RepoResult<CascadeReport> {
        let mut report = CascadeReport::default();
        self.remove_industry(id, &mut report);
        log_delete(BACKEND, EntityKind::Industry, id, &report);
        Ok(report)
    }

    fn count_industries(&self) -> RepoResult<usize> {
        Ok(self.industries.len())
    }
}

impl CompanyRepository for MemoryForumStore {
    fn create_company(&mut self, company: &Company) -> RepoResult<CompanyId> {
        company.validate()?;
        require_ref(&self.industries, EntityKind::Industry, company.industry_id)?;
        insert_new(
            &mut self.companies,
            EntityKind::Company,
            company.uuid,
            company.clone(),
        )?;
        self.companies_by_industry
            .link(company.industry_id, company.uuid);
        Ok(company.uuid)
    }

    fn update_company(&mut self, company: &Company) -> RepoResult<()> {
        company.validate()?;
        require_present(&self.companies, EntityKind::Company, company.uuid)?;
        require_ref(&self.industries, EntityKind::Industry, company.industry_id)?;

        if let Some(slot) = self.companies.get_mut(company.uuid) {
            self.companies_by_industry
                .relink(slot.industry_id, company.industry_id, company.uuid);
            *slot = company.clone();
        }
        log_write(BACKEND, "update", EntityKind::Company, company.uuid);
        Ok(())
    }

    fn find_company(&self, id: CompanyId) -> RepoResult<Option<Company>> {
        Ok(self.companies.get(id).cloned())
    }

    fn list_companies(&self, query: &CompanyQuery) -> RepoResult<Vec<Company>> {
        Ok(self
            .companies
            .iter()
            .filter(|company| self.company_matches(company, query))
            .cloned()
            .collect())
    }

    fn delete_company(&mut self, id: CompanyId) -> RepoResult<CascadeReport> {
        let mut report = CascadeReport::default();
        self.remove_company(id, &mut report);
        log_delete(BACKEND, EntityKind::Company, id, &report);
        Ok(report)
    }

    fn count_companies(&self) -> RepoResult<usize> {
        Ok(self.companies.len())
    }
}

impl UserRepository for MemoryForumStore {
    fn create_user(&mut self, user: &User) -> RepoResult<UserId> {
        user.validate()?;
        insert_new(&mut self.users, EntityKind::User, user.uuid, user.clone())?;
        Ok(user.uuid)
    }

    fn update_user(&mut self, user: &User) -> RepoResult<()> {
        user.validate()?;
        let slot = self.users.get_mut(user.uuid).ok_or(RepoError::NotFound {
            kind: EntityKind::User,
            id: Some(user.uuid),
        })?;
        *slot = user.clone();
        log_write(BACKEND, "update", EntityKind::User, user.uuid);
        Ok(())
    }

    fn find_user(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.users.get(id).cloned())
    }

    fn list_users(&self, query: &UserQuery) -> RepoResult<Vec<User>> {
        Ok(self
            .users
            .iter()
            .filter(|user| {
                matches_opt(&query.username, &user.username) && matches_opt(&query.email, &user.email)
            })
            .cloned()
            .collect())
    }

    fn delete_user(&mut self, id: UserId) -> RepoResult<CascadeReport> {
        let mut report = CascadeReport::default();
        self.remove_user(id, &mut report);
        log_delete(BACKEND, EntityKind::User, id, &report);
        Ok(report)
    }

    fn count_users(&self) -> RepoResult<usize> {
        Ok(self.users.len())
    }
}

impl PostRepository for MemoryForumStore {
    fn create_post(&mut self, post: &Post) -> RepoResult<PostId> {
        post.validate()?;
        require_ref(&self.users, EntityKind::User, post.user_id)?;
        if let Some(company_id) = post.company_id {
            require_ref(&self.companies, EntityKind::Company, company_id)?;
        }
        insert_new(&mut self.posts, EntityKind::Post, post.uuid, post.clone())?;
        self.posts_by_user.link(post.user_id, post.uuid);
        if let Some(company_id) = post.company_id {
            self.posts_by_company.link(company_id, post.uuid);
        }
        Ok(post.uuid)
    }

    fn update_post(&mut self, post: &Post) -> RepoResult<()> {
        post.validate()?;
        require_present(&self.posts, EntityKind::Post, post.uuid)?;
        require_ref(&self.users, EntityKind::User, post.user_id)?;
        if let Some(company_id) = post.company_id {
            require_ref(&self.companies, EntityKind::Company, company_id)?;
        }

        if let Some(slot) = self.posts.get_mut(post.uuid) {
            self.posts_by_user
                .relink(slot.user_id, post.user_id, post.uuid);
            if slot.company_id != post.company_id {
                if let Some(old_company) = slot.company_id {
                    self.posts_by_company.unlink(old_company, post.uuid);
                }
                if let Some(new_company) = post.company_id {
                    self.posts_by_company.link(new_company, post.uuid);
                }
            }
            *slot = post.clone();
        }
        log_write(BACKEND, "update", EntityKind::Post, post.uuid);
        Ok(())
    }

    fn find_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        Ok(self.posts.get(id).cloned())
    }

    fn list_posts(&self, query: &PostQuery) -> RepoResult<Vec<Post>> {
        Ok(self
            .posts
            .iter()
            .filter(|post| self.post_matches(post, query))
            .cloned()
            .collect())
    }

    fn delete_post(&mut self, id: PostId) -> RepoResult<CascadeReport> {
        let mut report = CascadeReport::default();
        self.remove_post(id, &mut report);
        log_delete(BACKEND, EntityKind::Post, id, &report);
        Ok(report)
    }

    fn count_posts(&self) -> RepoResult<usize> {
        Ok(self.posts.len())
    }
}

impl CommentRepository for MemoryForumStore {
    fn create_comment(&mut self, comment: &Comment) -> RepoResult<CommentId> {
        comment.validate()?;
        require_ref(&self.posts, EntityKind::Post, comment.post_id)?;
        require_ref(&self.users, EntityKind::User, comment.user_id)?;
        insert_new(
            &mut self.comments,
            EntityKind::Comment,
            comment.uuid,
            comment.clone(),
        )?;
        self.comments_by_post.link(comment.post_id, comment.uuid);
        self.comments_by_user.link(comment.user_id, comment.uuid);
        Ok(comment.uuid)
    }

    fn update_comment(&mut self, comment: &Comment) -> RepoResult<()> {
        comment.validate()?;
        require_present(&self.comments, EntityKind::Comment, comment.uuid)?;
        require_ref(&self.posts, EntityKind::Post, comment.post_id)?;
        require_ref(&self.users, EntityKind::User, comment.user_id)?;

        if let Some(slot) = self.comments.get_mut(comment.uuid) {
            self.comments_by_post
                .relink(slot.post_id, comment.post_id, comment.uuid);
            self.comments_by_user
                .relink(slot.user_id, comment.user_id, comment.uuid);
            *slot = comment.clone();
        }
        log_write(BACKEND, "update", EntityKind::Comment, comment.uuid);
        Ok(())
    }

    fn find_comment(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        Ok(self.comments.get(id).cloned())
    }

    fn list_comments(&self, query: &CommentQuery) -> RepoResult<Vec<Comment>> {
        Ok(self
            .comments
            .iter()
            .filter(|comment| self.comment_matches(comment, query))
            .cloned()
            .collect())
    }

    fn delete_comment(&mut self, id: CommentId) -> RepoResult<CascadeReport> {
        let mut report = CascadeReport::default();
        self.remove_comment(id, &mut report);
        log_delete(BACKEND, EntityKind::Comment, id, &report);
        Ok(report)
    }

    fn count_comments(&self) -> RepoResult<usize> {
        Ok(self.comments.len())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryForumStore;
    use crate::model::comment::Comment;
    use crate::model::company::Company;
    use crate::model::industry::Industry;
    use crate::model::post::Post;
    use crate::model::user::User;
    use crate::repo::{
        CommentRepository, CompanyRepository, IndustryRepository, PostRepository, UserRepository,
    };

    #[test]
    fn user_delete_skips_comment_already_removed_with_own_post() {
        let mut store = MemoryForumStore::new();
        let author = User::new("vedant", "hash", "test@ing.com");
        store.create_user(&author).unwrap();
        let post = Post::new("own post", 1, None, author.uuid);
        store.create_post(&post).unwrap();
        let self_reply = Comment::new("agreed", 2, true, post.uuid, author.uuid);
        store.create_comment(&self_reply).unwrap();

        let report = store.delete_user(author.uuid).unwrap();
        assert_eq!((report.users, report.posts, report.comments), (1, 1, 1));
        assert!(store.comments_by_user.children(author.uuid).is_empty());
        assert!(store.comments_by_post.children(post.uuid).is_empty());
    }

    #[test]
    fn company_update_moves_child_index_bucket() {
        let mut store = MemoryForumStore::new();
        let aviation = Industry::new("Aviation");
        let tech = Industry::new("Technology");
        store.create_industry(&aviation).unwrap();
        store.create_industry(&tech).unwrap();
        let mut company = Company::new("Boeing", aviation.uuid);
        store.create_company(&company).unwrap();

        company.industry_id = tech.uuid;
        store.update_company(&company).unwrap();

        assert!(store.companies_by_industry.children(aviation.uuid).is_empty());
        assert_eq!(store.companies_by_industry.children(tech.uuid), &[company.uuid]);

        let report = store.delete_industry(aviation.uuid).unwrap();
        assert_eq!(report.companies, 0);
        assert_eq!(store.count_companies().unwrap(), 1);
    }
}
