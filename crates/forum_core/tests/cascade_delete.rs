#[macro_use]
mod common;

use common::{seed_comment, seed_companies, seed_post, seed_user};
use forum_core::{
    CascadeReport, Comment, CommentQuery, CompanyQuery, ForumStore, Post, PostQuery, User,
};

fn industry_delete_removes_all_its_companies<S: ForumStore>(store: &mut S) {
    let companies = seed_companies(store);

    let report = store
        .delete_industry(companies.industries.aviation.uuid)
        .unwrap();

    assert_eq!(report.industries, 1);
    assert_eq!(report.companies, 2);
    let remaining: Vec<String> = store
        .list_companies(&CompanyQuery::default())
        .unwrap()
        .into_iter()
        .map(|company| company.name)
        .collect();
    assert_eq!(remaining, vec!["Amazon", "Apple"]);
    assert!(store
        .find_company(companies.american_airlines.uuid)
        .unwrap()
        .is_none());
}

fn industry_delete_reaches_posts_and_comments<S: ForumStore>(store: &mut S) {
    let fixture = seed_comment(store);

    let report = store
        .delete_industry(fixture.post.companies.industries.technology.uuid)
        .unwrap();

    assert_eq!(
        report,
        CascadeReport {
            industries: 1,
            companies: 2,
            users: 0,
            posts: 1,
            comments: 1,
        }
    );
    assert_eq!(store.count_posts().unwrap(), 0);
    assert_eq!(store.count_comments().unwrap(), 0);
    assert_eq!(store.count_users().unwrap(), 1);
    assert_eq!(store.count_companies().unwrap(), 2);
}

fn company_delete_keeps_general_posts<S: ForumStore>(store: &mut S) {
    let fixture = seed_post(store);
    let general = Post::new("no company here", 10, None, fixture.user.uuid);
    store.create_post(&general).unwrap();

    let report = store.delete_company(fixture.companies.amazon.uuid).unwrap();

    assert_eq!((report.companies, report.posts), (1, 1));
    assert_eq!(
        store.list_posts(&PostQuery::default()).unwrap(),
        vec![general]
    );
}

fn user_delete_removes_their_posts_and_comments<S: ForumStore>(store: &mut S) {
    let fixture = seed_comment(store);
    let other = User::new("reader", "hash", "reader@ing.com");
    store.create_user(&other).unwrap();
    let other_post = Post::new("another view", 20, None, other.uuid);
    store.create_post(&other_post).unwrap();
    let reply_on_other = Comment::new(
        "I disagree",
        30,
        false,
        other_post.uuid,
        fixture.post.user.uuid,
    );
    store.create_comment(&reply_on_other).unwrap();
    let other_reply = Comment::new("fair", 40, true, other_post.uuid, other.uuid);
    store.create_comment(&other_reply).unwrap();

    let report = store.delete_user(fixture.post.user.uuid).unwrap();

    assert_eq!(report.users, 1);
    assert_eq!(report.posts, 1);
    assert_eq!(report.comments, 2);
    assert_eq!(
        store.list_posts(&PostQuery::default()).unwrap(),
        vec![other_post]
    );
    assert_eq!(
        store.list_comments(&CommentQuery::default()).unwrap(),
        vec![other_reply]
    );
}

fn post_delete_removes_only_its_comments<S: ForumStore>(store: &mut S) {
    let fixture = seed_comment(store);
    let sibling = Post::new("second post", 50, None, fixture.post.user.uuid);
    store.create_post(&sibling).unwrap();
    let sibling_comment = Comment::new("kept", 60, true, sibling.uuid, fixture.post.user.uuid);
    store.create_comment(&sibling_comment).unwrap();

    let report = store.delete_post(fixture.post.post.uuid).unwrap();

    assert_eq!((report.posts, report.comments), (1, 1));
    assert!(store
        .find_comment(fixture.comment.uuid)
        .unwrap()
        .is_none());
    assert_eq!(
        store.list_comments(&CommentQuery::default()).unwrap(),
        vec![sibling_comment]
    );
}

fn comment_delete_does_not_touch_parents<S: ForumStore>(store: &mut S) {
    let fixture = seed_comment(store);

    let report = store.delete_comment(fixture.comment.uuid).unwrap();

    assert_eq!(report.comments, 1);
    assert_eq!(report.total(), 1);
    assert!(store.find_post(fixture.post.post.uuid).unwrap().is_some());
    assert!(store.find_user(fixture.post.user.uuid).unwrap().is_some());
}

fn cascade_leaves_no_dangling_references<S: ForumStore>(store: &mut S) {
    let fixture = seed_comment(store);
    let second_user = User::new("second", "hash", "second@ing.com");
    store.create_user(&second_user).unwrap();
    let about_apple = Post::new(
        "apple post",
        70,
        Some(fixture.post.companies.apple.uuid),
        second_user.uuid,
    );
    store.create_post(&about_apple).unwrap();
    store
        .create_comment(&Comment::new(
            "cross comment",
            80,
            false,
            about_apple.uuid,
            fixture.post.user.uuid,
        ))
        .unwrap();

    store
        .delete_industry(fixture.post.companies.industries.technology.uuid)
        .unwrap();
    store.delete_user(second_user.uuid).unwrap();

    for post in store.list_posts(&PostQuery::default()).unwrap() {
        assert!(store.find_user(post.user_id).unwrap().is_some());
        if let Some(company_id) = post.company_id {
            assert!(store.find_company(company_id).unwrap().is_some());
        }
    }
    for comment in store.list_comments(&CommentQuery::default()).unwrap() {
        assert!(store.find_post(comment.post_id).unwrap().is_some());
        assert!(store.find_user(comment.user_id).unwrap().is_some());
    }
    assert_eq!(store.count_posts().unwrap(), 0);
    assert_eq!(store.count_comments().unwrap(), 0);
}

fn deleted_parent_cannot_take_new_children<S: ForumStore>(store: &mut S) {
    let user = seed_user(store);
    store.delete_user(user.uuid).unwrap();

    let err = store
        .create_post(&Post::new("ghost", 1, None, user.uuid))
        .unwrap_err();
    assert!(matches!(err, forum_core::RepoError::Validation(_)));
}

backend_tests!(
    industry_delete_removes_all_its_companies,
    industry_delete_reaches_posts_and_comments,
    company_delete_keeps_general_posts,
    user_delete_removes_their_posts_and_comments,
    post_delete_removes_only_its_comments,
    comment_delete_does_not_touch_parents,
    cascade_leaves_no_dangling_references,
    deleted_parent_cannot_take_new_children,
);
