use forum_core::db::migrations::latest_version;
use forum_core::db::{open_db, open_db_in_memory};
use forum_core::{
    CompanyQuery, CompanyRepository, Industry, IndustryQuery, IndustryRepository, RepoError,
    SqliteForumStore, User, UserRepository,
};
use rusqlite::Connection;

#[test]
fn store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteForumStore::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn store_rejects_connection_without_required_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteForumStore::try_new(&conn),
        Err(RepoError::MissingRequiredTable("industries"))
    ));
}

#[test]
fn store_rejects_connection_missing_required_column() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "DROP TABLE comments;
         CREATE TABLE comments (
            uuid TEXT PRIMARY KEY NOT NULL,
            body TEXT NOT NULL,
            timestamp_ms INTEGER NOT NULL,
            post_uuid TEXT NOT NULL,
            user_uuid TEXT NOT NULL
         );",
    )
    .unwrap();

    assert!(matches!(
        SqliteForumStore::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "comments",
            column: "is_positive"
        })
    ));
}

#[test]
fn corrupt_rows_surface_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO industries (uuid, name) VALUES ('not-a-uuid', 'Aviation');",
        [],
    )
    .unwrap();
    let store = SqliteForumStore::try_new(&conn).unwrap();

    let err = store.list_industries(&IndustryQuery::default()).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("industries.uuid")));
}

#[test]
fn blank_persisted_name_fails_revalidation() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO users (uuid, username, password_hash, email)
         VALUES ('00000000-0000-4000-8000-000000000009', '  ', 'hash', 'test@ing.com');",
        [],
    )
    .unwrap();
    let store = SqliteForumStore::try_new(&conn).unwrap();

    let err = store
        .find_user("00000000-0000-4000-8000-000000000009".parse().unwrap())
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn records_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forum.sqlite3");
    let aviation = Industry::new("Aviation");
    let user = User::new("vedant", "hash", "test@ing.com");

    {
        let conn = open_db(&path).unwrap();
        let mut store = SqliteForumStore::try_new(&conn).unwrap();
        store.create_industry(&aviation).unwrap();
        store.create_user(&user).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let mut store = SqliteForumStore::try_new(&conn).unwrap();
    assert_eq!(
        store.get_industry(&IndustryQuery::named("Aviation")).unwrap(),
        aviation
    );
    assert_eq!(store.find_user(user.uuid).unwrap(), Some(user));

    store
        .create_company(&forum_core::Company::new("American Airlines", aviation.uuid))
        .unwrap();
    store.delete_industry(aviation.uuid).unwrap();
    assert!(store
        .list_companies(&CompanyQuery::default())
        .unwrap()
        .is_empty());
}
