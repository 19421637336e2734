//! SQLite-backed forum store.
//!
//! # Responsibility
//! - Map the repository traits onto the `industries`, `companies`, `users`,
//!   `posts` and `comments` tables.
//! - Delegate cascades to `ON DELETE CASCADE` and report what they removed.
//!
//! # Invariants
//! - Only connections at the latest schema version are accepted.
//! - `foreign_keys` is switched on for the wrapped connection.
//! - Rows are returned in insertion (`rowid`) order.
//! - Rows read back are re-validated; corrupt rows surface as `InvalidData`.

use super::query::{CommentQuery, CompanyQuery, IndustryQuery, PostQuery, UserQuery};
use super::{
    log_delete, log_write, CascadeReport, CommentRepository, CompanyRepository,
    IndustryRepository, PostRepository, RepoError, RepoResult, UserRepository,
};
use crate::db::migrations::{current_user_version, latest_version};
use crate::model::comment::{Comment, CommentId};
use crate::model::company::{Company, CompanyId};
use crate::model::industry::{Industry, IndustryId};
use crate::model::post::{Post, PostId};
use crate::model::user::{User, UserId};
use crate::model::{EntityId, EntityKind, ValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

const BACKEND: &str = "sqlite";

const TABLES: [(EntityKind, &str); 5] = [
    (EntityKind::Industry, "industries"),
    (EntityKind::Company, "companies"),
    (EntityKind::User, "users"),
    (EntityKind::Post, "posts"),
    (EntityKind::Comment, "comments"),
];

const REQUIRED_COLUMNS: [(&str, &[&str]); 5] = [
    ("industries", &["uuid", "name"]),
    ("companies", &["uuid", "name", "industry_uuid"]),
    ("users", &["uuid", "username", "password_hash", "email"]),
    (
        "posts",
        &["uuid", "body", "timestamp_ms", "company_uuid", "user_uuid"],
    ),
    (
        "comments",
        &[
            "uuid",
            "body",
            "timestamp_ms",
            "is_positive",
            "post_uuid",
            "user_uuid",
        ],
    ),
];

const INDUSTRY_SELECT_SQL: &str = "SELECT
    i.uuid AS uuid,
    i.name AS name
FROM industries i
WHERE 1 = 1";

const COMPANY_SELECT_SQL: &str = "SELECT
    c.uuid AS uuid,
    c.name AS name,
    c.industry_uuid AS industry_uuid
FROM companies c
JOIN industries i ON i.uuid = c.industry_uuid
WHERE 1 = 1";

const USER_SELECT_SQL: &str = "SELECT
    u.uuid AS uuid,
    u.username AS username,
    u.password_hash AS password_hash,
    u.email AS email
FROM users u
WHERE 1 = 1";

const POST_SELECT_SQL: &str = "SELECT
    p.uuid AS uuid,
    p.body AS body,
    p.timestamp_ms AS timestamp_ms,
    p.company_uuid AS company_uuid,
    p.user_uuid AS user_uuid
FROM posts p
JOIN users u ON u.uuid = p.user_uuid
LEFT JOIN companies c ON c.uuid = p.company_uuid
WHERE 1 = 1";

const COMMENT_SELECT_SQL: &str = "SELECT
    m.uuid AS uuid,
    m.body AS body,
    m.timestamp_ms AS timestamp_ms,
    m.is_positive AS is_positive,
    m.post_uuid AS post_uuid,
    m.user_uuid AS user_uuid
FROM comments m
JOIN users u ON u.uuid = m.user_uuid
WHERE 1 = 1";

/// Forum store over a migrated SQLite connection.
pub struct SqliteForumStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteForumStore<'conn> {
    /// Wraps a connection produced by `open_db` / `open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not current.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` for a damaged schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    fn exists(&self, table: &str, id: EntityId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE uuid = ?1);"),
            [id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn require_ref(&self, kind: EntityKind, id: EntityId) -> RepoResult<()> {
        if !self.exists(table_name(kind), id)? {
            return Err(ValidationError::MissingReference { kind, id }.into());
        }
        Ok(())
    }

    fn require_present(&self, kind: EntityKind, id: EntityId) -> RepoResult<()> {
        if !self.exists(table_name(kind), id)? {
            return Err(RepoError::NotFound { kind, id: Some(id) });
        }
        Ok(())
    }

    fn require_absent(&self, kind: EntityKind, id: EntityId) -> RepoResult<()> {
        if self.exists(table_name(kind), id)? {
            return Err(RepoError::AlreadyExists { kind, id });
        }
        Ok(())
    }

    fn count_rows(&self, kind: EntityKind) -> RepoResult<usize> {
        count_table(self.conn, table_name(kind))
    }

    /// Deletes one row and lets foreign keys cascade, measuring the fallout
    /// as per-table row deltas inside one immediate transaction.
    fn delete_cascading(&self, kind: EntityKind, id: EntityId) -> RepoResult<CascadeReport> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let before = table_counts(&tx)?;
        let changed = tx.execute(
            &format!("DELETE FROM {} WHERE uuid = ?1;", table_name(kind)),
            [id.to_string()],
        )?;

        let mut report = CascadeReport::default();
        if changed > 0 {
            let after = table_counts(&tx)?;
            for (((table_kind, _), count_before), count_after) in
                TABLES.into_iter().zip(before).zip(after)
            {
                report.add(table_kind, count_before.saturating_sub(count_after));
            }
        }
        tx.commit()?;

        log_delete(BACKEND, kind, id, &report);
        Ok(report)
    }

    fn fetch<T>(
        &self,
        filter: SqlFilter,
        parse: fn(&Row<'_>) -> RepoResult<T>,
    ) -> RepoResult<Vec<T>> {
        let (sql, bind_values) = filter.finish();
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse(row)?);
        }
        Ok(records)
    }

    fn fetch_by_id<T>(
        &self,
        base_sql: &'static str,
        alias: &'static str,
        id: EntityId,
        parse: fn(&Row<'_>) -> RepoResult<T>,
    ) -> RepoResult<Option<T>> {
        let mut filter = SqlFilter::new(base_sql, alias);
        filter.eq_uuid(&format!("{alias}.uuid"), Some(id));
        Ok(self.fetch(filter, parse)?.into_iter().next())
    }
}

/// Incrementally built `WHERE` clause with positional bind values.
struct SqlFilter {
    sql: String,
    order_alias: &'static str,
    bind_values: Vec<Value>,
}

impl SqlFilter {
    fn new(base_sql: &'static str, order_alias: &'static str) -> Self {
        Self {
            sql: base_sql.to_string(),
            order_alias,
            bind_values: Vec::new(),
        }
    }

    fn eq_text(&mut self, column: &str, value: Option<&String>) {
        if let Some(value) = value {
            self.push(column, Value::Text(value.clone()));
        }
    }

    fn eq_uuid(&mut self, column: &str, value: Option<Uuid>) {
        if let Some(value) = value {
            self.push(column, Value::Text(value.to_string()));
        }
    }

    fn eq_bool(&mut self, column: &str, value: Option<bool>) {
        if let Some(value) = value {
            self.push(column, Value::Integer(bool_to_int(value)));
        }
    }

    fn push(&mut self, column: &str, value: Value) {
        self.sql.push_str(&format!(" AND {column} = ?"));
        self.bind_values.push(value);
    }

    fn finish(self) -> (String, Vec<Value>) {
        let mut sql = self.sql;
        sql.push_str(&format!(" ORDER BY {}.rowid ASC;", self.order_alias));
        (sql, self.bind_values)
    }
}

impl IndustryRepository for SqliteForumStore<'_> {
    fn create_industry(&mut self, industry: &Industry) -> RepoResult<IndustryId> {
        industry.validate()?;
        self.require_absent(EntityKind::Industry, industry.uuid)?;
        self.conn.execute(
            "INSERT INTO industries (uuid, name) VALUES (?1, ?2);",
            params![industry.uuid.to_string(), industry.name.as_str()],
        )?;
        log_write(BACKEND, "create", EntityKind::Industry, industry.uuid);
        Ok(industry.uuid)
    }

    fn update_industry(&mut self, industry: &Industry) -> RepoResult<()> {
        industry.validate()?;
        let changed = self.conn.execute(
            "UPDATE industries SET name = ?1 WHERE uuid = ?2;",
            params![industry.name.as_str(), industry.uuid.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Industry,
                id: Some(industry.uuid),
            });
        }
        log_write(BACKEND, "update", EntityKind::Industry, industry.uuid);
        Ok(())
    }

    fn find_industry(&self, id: IndustryId) -> RepoResult<Option<Industry>> {
        self.fetch_by_id(INDUSTRY_SELECT_SQL, "i", id, parse_industry_row)
    }

    fn list_industries(&self, query: &IndustryQuery) -> RepoResult<Vec<Industry>> {
        let mut filter = SqlFilter::new(INDUSTRY_SELECT_SQL, "i");
        filter.eq_text("i.name", query.name.as_ref());
        self.fetch(filter, parse_industry_row)
    }

    fn delete_industry(&mut self, id: IndustryId) -> RepoResult<CascadeReport> {
        self.delete_cascading(EntityKind::Industry, id)
    }

    fn count_industries(&self) -> RepoResult<usize> {
        self.count_rows(EntityKind::Industry)
    }
}

impl CompanyRepository for SqliteForumStore<'_> {
    fn create_company(&mut self, company: &Company) -> RepoResult<CompanyId> {
        company.validate()?;
        self.require_ref(EntityKind::Industry, company.industry_id)?;
        self.require_absent(EntityKind::Company, company.uuid)?;
        self.conn.execute(
            "INSERT INTO companies (uuid, name, industry_uuid) VALUES (?1, ?2, ?3);",
            params![
                company.uuid.to_string(),
                company.name.as_str(),
                company.industry_id.to_string(),
            ],
        )?;
        log_write(BACKEND, "create", EntityKind::Company, company.uuid);
        Ok(company.uuid)
    }

    fn update_company(&mut self, company: &Company) -> RepoResult<()> {
        company.validate()?;
        self.require_present(EntityKind::Company, company.uuid)?;
        self.require_ref(EntityKind::Industry, company.industry_id)?;
        self.conn.execute(
            "UPDATE companies SET name = ?1, industry_uuid = ?2 WHERE uuid = ?3;",
            params![
                company.name.as_str(),
                company.industry_id.to_string(),
                company.uuid.to_string(),
            ],
        )?;
        log_write(BACKEND, "update", EntityKind::Company, company.uuid);
        Ok(())
    }

    fn find_company(&self, id: CompanyId) -> RepoResult<Option<Company>> {
        self.fetch_by_id(COMPANY_SELECT_SQL, "c", id, parse_company_row)
    }

    fn list_companies(&self, query: &CompanyQuery) -> RepoResult<Vec<Company>> {
        let mut filter = SqlFilter::new(COMPANY_SELECT_SQL, "c");
        filter.eq_text("c.name", query.name.as_ref());
        filter.eq_uuid("c.industry_uuid", query.industry_id);
        filter.eq_text("i.name", query.industry_name.as_ref());
        self.fetch(filter, parse_company_row)
    }

    fn delete_company(&mut self, id: CompanyId) -> RepoResult<CascadeReport> {
        self.delete_cascading(EntityKind::Company, id)
    }

    fn count_companies(&self) -> RepoResult<usize> {
        self.count_rows(EntityKind::Company)
    }
}

impl UserRepository for SqliteForumStore<'_> {
    fn create_user(&mut self, user: &User) -> RepoResult<UserId> {
        user.validate()?;
        self.require_absent(EntityKind::User, user.uuid)?;
        self.conn.execute(
            "INSERT INTO users (uuid, username, password_hash, email) VALUES (?1, ?2, ?3, ?4);",
            params![
                user.uuid.to_string(),
                user.username.as_str(),
                user.password_hash.as_str(),
                user.email.as_str(),
            ],
        )?;
        log_write(BACKEND, "create", EntityKind::User, user.uuid);
        Ok(user.uuid)
    }

    fn update_user(&mut self, user: &User) -> RepoResult<()> {
        user.validate()?;
        let changed = self.conn.execute(
            "UPDATE users SET username = ?1, password_hash = ?2, email = ?3 WHERE uuid = ?4;",
            params![
                user.username.as_str(),
                user.password_hash.as_str(),
                user.email.as_str(),
                user.uuid.to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::User,
                id: Some(user.uuid),
            });
        }
        log_write(BACKEND, "update", EntityKind::User, user.uuid);
        Ok(())
    }

    fn find_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.fetch_by_id(USER_SELECT_SQL, "u", id, parse_user_row)
    }

    fn list_users(&self, query: &UserQuery) -> RepoResult<Vec<User>> {
        let mut filter = SqlFilter::new(USER_SELECT_SQL, "u");
        filter.eq_text("u.username", query.username.as_ref());
        filter.eq_text("u.email", query.email.as_ref());
        self.fetch(filter, parse_user_row)
    }

    fn delete_user(&mut self, id: UserId) -> RepoResult<CascadeReport> {
        self.delete_cascading(EntityKind::User, id)
    }

    fn count_users(&self) -> RepoResult<usize> {
        self.count_rows(EntityKind::User)
    }
}

impl PostRepository for SqliteForumStore<'_> {
    fn create_post(&mut self, post: &Post) -> RepoResult<PostId> {
        post.validate()?;
        self.require_ref(EntityKind::User, post.user_id)?;
        if let Some(company_id) = post.company_id {
            self.require_ref(EntityKind::Company, company_id)?;
        }
        self.require_absent(EntityKind::Post, post.uuid)?;
        self.conn.execute(
            "INSERT INTO posts (uuid, body, timestamp_ms, company_uuid, user_uuid)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                post.uuid.to_string(),
                post.body.as_str(),
                post.timestamp_ms,
                post.company_id.map(|id| id.to_string()),
                post.user_id.to_string(),
            ],
        )?;
        log_write(BACKEND, "create", EntityKind::Post, post.uuid);
        Ok(post.uuid)
    }

    fn update_post(&mut self, post: &Post) -> RepoResult<()> {
        post.validate()?;
        self.require_present(EntityKind::Post, post.uuid)?;
        self.require_ref(EntityKind::User, post.user_id)?;
        if let Some(company_id) = post.company_id {
            self.require_ref(EntityKind::Company, company_id)?;
        }
        self.conn.execute(
            "UPDATE posts
             SET
                body = ?1,
                timestamp_ms = ?2,
                company_uuid = ?3,
                user_uuid = ?4
             WHERE uuid = ?5;",
            params![
                post.body.as_str(),
                post.timestamp_ms,
                post.company_id.map(|id| id.to_string()),
                post.user_id.to_string(),
                post.uuid.to_string(),
            ],
        )?;
        log_write(BACKEND, "update", EntityKind::Post, post.uuid);
        Ok(())
    }

    fn find_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.fetch_by_id(POST_SELECT_SQL, "p", id, parse_post_row)
    }

    fn list_posts(&self, query: &PostQuery) -> RepoResult<Vec<Post>> {
        let mut filter = SqlFilter::new(POST_SELECT_SQL, "p");
        filter.eq_text("p.body", query.body.as_ref());
        filter.eq_uuid("p.user_uuid", query.user_id);
        filter.eq_uuid("p.company_uuid", query.company_id);
        filter.eq_text("u.email", query.user_email.as_ref());
        filter.eq_text("c.name", query.company_name.as_ref());
        self.fetch(filter, parse_post_row)
    }

    fn delete_post(&mut self, id: PostId) -> RepoResult<CascadeReport> {
        self.delete_cascading(EntityKind::Post, id)
    }

    fn count_posts(&self) -> RepoResult<usize> {
        self.count_rows(EntityKind::Post)
    }
}

impl CommentRepository for SqliteForumStore<'_> {
    fn create_comment(&mut self, comment: &Comment) -> RepoResult<CommentId> {
        comment.validate()?;
        self.require_ref(EntityKind::Post, comment.post_id)?;
        self.require_ref(EntityKind::User, comment.user_id)?;
        self.require_absent(EntityKind::Comment, comment.uuid)?;
        self.conn.execute(
            "INSERT INTO comments (uuid, body, timestamp_ms, is_positive, post_uuid, user_uuid)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                comment.uuid.to_string(),
                comment.body.as_str(),
                comment.timestamp_ms,
                bool_to_int(comment.is_positive),
                comment.post_id.to_string(),
                comment.user_id.to_string(),
            ],
        )?;
        log_write(BACKEND, "create", EntityKind::Comment, comment.uuid);
        Ok(comment.uuid)
    }

    fn update_comment(&mut self, comment: &Comment) -> RepoResult<()> {
        comment.validate()?;
        self.require_present(EntityKind::Comment, comment.uuid)?;
        self.require_ref(EntityKind::Post, comment.post_id)?;
        self.require_ref(EntityKind::User, comment.user_id)?;
        self.conn.execute(
            "UPDATE comments
             SET
                body = ?1,
                timestamp_ms = ?2,
                is_positive = ?3,
                post_uuid = ?4,
                user_uuid = ?5
             WHERE uuid = ?6;",
            params![
                comment.body.as_str(),
                comment.timestamp_ms,
                bool_to_int(comment.is_positive),
                comment.post_id.to_string(),
                comment.user_id.to_string(),
                comment.uuid.to_string(),
            ],
        )?;
        log_write(BACKEND, "update", EntityKind::Comment, comment.uuid);
        Ok(())
    }

    fn find_comment(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        self.fetch_by_id(COMMENT_SELECT_SQL, "m", id, parse_comment_row)
    }

    fn list_comments(&self, query: &CommentQuery) -> RepoResult<Vec<Comment>> {
        let mut filter = SqlFilter::new(COMMENT_SELECT_SQL, "m");
        filter.eq_text("m.body", query.body.as_ref());
        filter.eq_uuid("m.post_uuid", query.post_id);
        filter.eq_uuid("m.user_uuid", query.user_id);
        filter.eq_bool("m.is_positive", query.is_positive);
        filter.eq_text("u.email", query.user_email.as_ref());
        self.fetch(filter, parse_comment_row)
    }

    fn delete_comment(&mut self, id: CommentId) -> RepoResult<CascadeReport> {
        self.delete_cascading(EntityKind::Comment, id)
    }

    fn count_comments(&self) -> RepoResult<usize> {
        self.count_rows(EntityKind::Comment)
    }
}

fn parse_industry_row(row: &Row<'_>) -> RepoResult<Industry> {
    let industry = Industry::with_id(
        parse_uuid(row, "industries", "uuid")?,
        row.get::<_, String>("name")?,
    );
    industry
        .validate()
        .map_err(|err| invalid_row("industries", err))?;
    Ok(industry)
}

fn parse_company_row(row: &Row<'_>) -> RepoResult<Company> {
    let company = Company::with_id(
        parse_uuid(row, "companies", "uuid")?,
        row.get::<_, String>("name")?,
        parse_uuid(row, "companies", "industry_uuid")?,
    );
    company.validate().map_err(|err| invalid_row("companies", err))?;
    Ok(company)
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let user = User {
        uuid: parse_uuid(row, "users", "uuid")?,
        username: row.get("username")?,
        password_hash: row.get("password_hash")?,
        email: row.get("email")?,
    };
    user.validate().map_err(|err| invalid_row("users", err))?;
    Ok(user)
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let company_id = match row.get::<_, Option<String>>("company_uuid")? {
        Some(text) => Some(uuid_from_text("posts", "company_uuid", &text)?),
        None => None,
    };
    let post = Post {
        uuid: parse_uuid(row, "posts", "uuid")?,
        body: row.get("body")?,
        timestamp_ms: row.get("timestamp_ms")?,
        company_id,
        user_id: parse_uuid(row, "posts", "user_uuid")?,
    };
    post.validate().map_err(|err| invalid_row("posts", err))?;
    Ok(post)
}

fn parse_comment_row(row: &Row<'_>) -> RepoResult<Comment> {
    let is_positive = match row.get::<_, i64>("is_positive")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_positive value `{other}` in comments.is_positive"
            )));
        }
    };
    let comment = Comment {
        uuid: parse_uuid(row, "comments", "uuid")?,
        body: row.get("body")?,
        timestamp_ms: row.get("timestamp_ms")?,
        is_positive,
        post_id: parse_uuid(row, "comments", "post_uuid")?,
        user_id: parse_uuid(row, "comments", "user_uuid")?,
    };
    comment.validate().map_err(|err| invalid_row("comments", err))?;
    Ok(comment)
}

fn parse_uuid(row: &Row<'_>, table: &str, column: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    uuid_from_text(table, column, &text)
}

fn uuid_from_text(table: &str, column: &str, text: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{text}` in {table}.{column}"))
    })
}

fn invalid_row(table: &str, err: ValidationError) -> RepoError {
    RepoError::InvalidData(format!("row in `{table}` fails validation: {err}"))
}

fn table_name(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Industry => "industries",
        EntityKind::Company => "companies",
        EntityKind::User => "users",
        EntityKind::Post => "posts",
        EntityKind::Comment => "comments",
    }
}

fn count_table(conn: &Connection, table: &str) -> RepoResult<usize> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })?;
    usize::try_from(count)
        .map_err(|_| RepoError::InvalidData(format!("negative row count in `{table}`")))
}

fn table_counts(conn: &Connection) -> RepoResult<[usize; 5]> {
    let mut counts = [0; 5];
    for (slot, (_, table)) in counts.iter_mut().zip(TABLES) {
        *slot = count_table(conn, table)?;
    }
    Ok(counts)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for (table, columns) in REQUIRED_COLUMNS {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn {
                    table,
                    column: *column,
                });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
