#![allow(dead_code)]

use forum_core::{Comment, Company, ForumStore, Industry, Post, User};

/// Expands each listed generic scenario `fn name<S: ForumStore>(store: &mut S)`
/// into one `#[test]` per backend.
macro_rules! backend_tests {
    ($($name:ident),* $(,)?) => {
        mod memory {
            $(
                #[test]
                fn $name() {
                    let mut store = forum_core::MemoryForumStore::new();
                    super::$name(&mut store);
                }
            )*
        }

        mod sqlite {
            $(
                #[test]
                fn $name() {
                    let conn = forum_core::db::open_db_in_memory().unwrap();
                    let mut store = forum_core::SqliteForumStore::try_new(&conn).unwrap();
                    super::$name(&mut store);
                }
            )*
        }
    };
}

pub struct Industries {
    pub aviation: Industry,
    pub technology: Industry,
}

pub struct Companies {
    pub industries: Industries,
    pub american_airlines: Company,
    pub british_airways: Company,
    pub amazon: Company,
    pub apple: Company,
}

pub struct PostFixture {
    pub companies: Companies,
    pub user: User,
    pub post: Post,
}

pub struct CommentFixture {
    pub post: PostFixture,
    pub comment: Comment,
}

pub fn seed_industries<S: ForumStore>(store: &mut S) -> Industries {
    let aviation = Industry::new("Aviation");
    let technology = Industry::new("Technology");
    store.create_industry(&aviation).unwrap();
    store.create_industry(&technology).unwrap();
    Industries {
        aviation,
        technology,
    }
}

pub fn seed_companies<S: ForumStore>(store: &mut S) -> Companies {
    let industries = seed_industries(store);
    let american_airlines = Company::new("American Airlines", industries.aviation.uuid);
    let british_airways = Company::new("British Airways", industries.aviation.uuid);
    let amazon = Company::new("Amazon", industries.technology.uuid);
    let apple = Company::new("Apple", industries.technology.uuid);
    for company in [&american_airlines, &british_airways, &amazon, &apple] {
        store.create_company(company).unwrap();
    }
    Companies {
        industries,
        american_airlines,
        british_airways,
        amazon,
        apple,
    }
}

pub fn seed_user<S: ForumStore>(store: &mut S) -> User {
    let user = User::new("vedant", "asdfsdfasdf", "test@ing.com");
    store.create_user(&user).unwrap();
    user
}

pub fn seed_post<S: ForumStore>(store: &mut S) -> PostFixture {
    let companies = seed_companies(store);
    let user = seed_user(store);
    let post = Post::new(
        "This is a sample post",
        1_600_000_000_000,
        Some(companies.amazon.uuid),
        user.uuid,
    );
    store.create_post(&post).unwrap();
    PostFixture {
        companies,
        user,
        post,
    }
}

pub fn seed_comment<S: ForumStore>(store: &mut S) -> CommentFixture {
    let post = seed_post(store);
    let comment = Comment::new(
        "This is a sample comment",
        1_600_000_060_000,
        true,
        post.post.uuid,
        post.user.uuid,
    );
    store.create_comment(&comment).unwrap();
    CommentFixture { post, comment }
}
