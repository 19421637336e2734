//! Filter predicates for `list_*` / `get_*` calls.
//!
//! Every field is optional; set fields are combined with AND and compared by
//! exact equality. The default value of each query matches every record.
//! Fields named after a related entity (`industry_name`, `user_email`, ...)
//! traverse the foreign key.

use crate::model::company::CompanyId;
use crate::model::industry::IndustryId;
use crate::model::post::PostId;
use crate::model::user::UserId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndustryQuery {
    pub name: Option<String>,
}

impl IndustryQuery {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyQuery {
    pub name: Option<String>,
    pub industry_id: Option<IndustryId>,
    /// Matches companies whose owning industry has this name.
    pub industry_name: Option<String>,
}

impl CompanyQuery {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn in_industry_named(industry_name: impl Into<String>) -> Self {
        Self {
            industry_name: Some(industry_name.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UserQuery {
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub body: Option<String>,
    pub user_id: Option<UserId>,
    pub company_id: Option<CompanyId>,
    /// Matches posts whose author has this email.
    pub user_email: Option<String>,
    /// Matches posts about a company with this name. Posts without a
    /// company never match.
    pub company_name: Option<String>,
}

impl PostQuery {
    pub fn by_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    pub fn about_company(company_id: CompanyId) -> Self {
        Self {
            company_id: Some(company_id),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentQuery {
    pub body: Option<String>,
    pub post_id: Option<PostId>,
    pub user_id: Option<UserId>,
    /// Matches comments whose author has this email.
    pub user_email: Option<String>,
    pub is_positive: Option<bool>,
}

impl CommentQuery {
    pub fn on_post(post_id: PostId) -> Self {
        Self {
            post_id: Some(post_id),
            ..Self::default()
        }
    }

    pub fn by_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }
}
