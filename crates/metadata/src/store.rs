//! Metadata store trait and SQLite implementation.

use crate::error::{MetadataError, MetadataResult};
use crate::repos::{RelationRepo, SheetRepo, UserRepo};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Combined metadata store trait.
#[async_trait]
pub trait MetadataStore: SheetRepo + UserRepo + RelationRepo + Send + Sync {
    /// Run database migrations.
    async fn migrate(&self) -> MetadataResult<()>;

    /// Check database connectivity and health.
    async fn health_check(&self) -> MetadataResult<()>;
}

/// SQLite-based metadata store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Create a new SQLite store, creating and migrating the database if
    /// needed.
    pub async fn new(path: impl AsRef<Path>) -> MetadataResult<Self> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .foreign_keys(true)
            // Prevent transient "database is locked" errors under concurrent access.
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            // SQLite permits limited write concurrency; a single connection avoids
            // persistent "database is locked" failures under test/axum concurrency.
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;

        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

impl From<std::io::Error> for MetadataError {
    fn from(e: std::io::Error) -> Self {
        MetadataError::Internal(format!("I/O error: {e}"))
    }
}

#[async_trait]
impl MetadataStore for SqliteStore {
    async fn migrate(&self) -> MetadataResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn health_check(&self) -> MetadataResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// Implement the repository traits for SqliteStore
mod sqlite_impl {
    use super::*;
    use crate::models::{SheetRelationRow, SheetRow, UserRow};
    use scorebook_core::SearchCriteria;
    use std::collections::HashMap;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn like_pattern(term: &str) -> String {
        format!("%{}%", term.to_lowercase())
    }

    #[async_trait]
    impl UserRepo for SqliteStore {
        async fn create_user(&self, user: &UserRow) -> MetadataResult<()> {
            if self.get_user_by_email(&user.email).await?.is_some() {
                return Err(MetadataError::AlreadyExists(format!(
                    "email '{}' already registered",
                    user.email
                )));
            }

            sqlx::query(
                "INSERT INTO users (user_id, name, email, password_hash, bio, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(user.user_id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.bio)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn get_user(&self, user_id: Uuid) -> MetadataResult<Option<UserRow>> {
            let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn get_user_by_email(&self, email: &str) -> MetadataResult<Option<UserRow>> {
            let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn user_exists(&self, user_id: Uuid) -> MetadataResult<bool> {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = ?)")
                    .bind(user_id)
                    .fetch_one(&self.pool)
                    .await?;
            Ok(exists)
        }

        async fn update_user(&self, user: &UserRow) -> MetadataResult<()> {
            if let Some(existing) = self.get_user_by_email(&user.email).await? {
                if existing.user_id != user.user_id {
                    return Err(MetadataError::AlreadyExists(format!(
                        "email '{}' already registered",
                        user.email
                    )));
                }
            }

            let result = sqlx::query(
                "UPDATE users SET name = ?, email = ?, password_hash = ?, bio = ?, updated_at = ? \
                 WHERE user_id = ?",
            )
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.bio)
            .bind(user.updated_at)
            .bind(user.user_id)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "user {} not found",
                    user.user_id
                )));
            }
            Ok(())
        }

        async fn delete_user(&self, user_id: Uuid) -> MetadataResult<()> {
            let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
                .bind(user_id)
                .execute(&self.pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!("user {user_id} not found")));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl SheetRepo for SqliteStore {
        async fn create_sheet(&self, sheet: &SheetRow) -> MetadataResult<()> {
            sqlx::query(
                r#"
                INSERT INTO sheets (
                    sheet_id, title, description, artist, genre, instrument,
                    pdf_content, pdf_filename, pdf_size, pdf_content_type,
                    is_public, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(sheet.sheet_id)
            .bind(&sheet.title)
            .bind(&sheet.description)
            .bind(&sheet.artist)
            .bind(&sheet.genre)
            .bind(&sheet.instrument)
            .bind(&sheet.pdf_content)
            .bind(&sheet.pdf_filename)
            .bind(sheet.pdf_size)
            .bind(&sheet.pdf_content_type)
            .bind(sheet.is_public)
            .bind(sheet.created_at)
            .bind(sheet.updated_at)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn create_sheet_with_owner(
            &self,
            sheet: &SheetRow,
            owner_id: Uuid,
        ) -> MetadataResult<()> {
            // Sheet and owner relation commit together or not at all: a sheet
            // must never exist without exactly one owner row.
            let mut tx = self.pool.begin().await?;

            sqlx::query(
                r#"
                INSERT INTO sheets (
                    sheet_id, title, description, artist, genre, instrument,
                    pdf_content, pdf_filename, pdf_size, pdf_content_type,
                    is_public, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(sheet.sheet_id)
            .bind(&sheet.title)
            .bind(&sheet.description)
            .bind(&sheet.artist)
            .bind(&sheet.genre)
            .bind(&sheet.instrument)
            .bind(&sheet.pdf_content)
            .bind(&sheet.pdf_filename)
            .bind(sheet.pdf_size)
            .bind(&sheet.pdf_content_type)
            .bind(sheet.is_public)
            .bind(sheet.created_at)
            .bind(sheet.updated_at)
            .execute(&mut *tx)
            .await?;

            let now = OffsetDateTime::now_utc();
            sqlx::query(
                "INSERT INTO sheet_relations \
                 (relation_id, user_id, sheet_id, is_owner, is_favorite, created_at, updated_at) \
                 VALUES (?, ?, ?, 1, 0, ?, ?)",
            )
            .bind(Uuid::new_v4())
            .bind(owner_id)
            .bind(sheet.sheet_id)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
            Ok(())
        }

        async fn get_sheet(&self, sheet_id: Uuid) -> MetadataResult<Option<SheetRow>> {
            let row = sqlx::query_as::<_, SheetRow>("SELECT * FROM sheets WHERE sheet_id = ?")
                .bind(sheet_id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn sheet_exists(&self, sheet_id: Uuid) -> MetadataResult<bool> {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM sheets WHERE sheet_id = ?)")
                    .bind(sheet_id)
                    .fetch_one(&self.pool)
                    .await?;
            Ok(exists)
        }

        async fn update_sheet(&self, sheet: &SheetRow) -> MetadataResult<()> {
            let result = sqlx::query(
                r#"
                UPDATE sheets SET
                    title = ?, description = ?, artist = ?, genre = ?, instrument = ?,
                    pdf_content = ?, pdf_filename = ?, pdf_size = ?, pdf_content_type = ?,
                    is_public = ?, updated_at = ?
                WHERE sheet_id = ?
                "#,
            )
            .bind(&sheet.title)
            .bind(&sheet.description)
            .bind(&sheet.artist)
            .bind(&sheet.genre)
            .bind(&sheet.instrument)
            .bind(&sheet.pdf_content)
            .bind(&sheet.pdf_filename)
            .bind(sheet.pdf_size)
            .bind(&sheet.pdf_content_type)
            .bind(sheet.is_public)
            .bind(sheet.updated_at)
            .bind(sheet.sheet_id)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "sheet {} not found",
                    sheet.sheet_id
                )));
            }
            Ok(())
        }

        async fn delete_sheet(&self, sheet_id: Uuid) -> MetadataResult<()> {
            // Relationship rows go in the same transaction as the sheet so a
            // racing favorite either lands before this commit or sees the
            // sheet gone; no orphaned relation row can survive.
            let mut tx = self.pool.begin().await?;

            sqlx::query("DELETE FROM sheet_relations WHERE sheet_id = ?")
                .bind(sheet_id)
                .execute(&mut *tx)
                .await?;

            let result = sqlx::query("DELETE FROM sheets WHERE sheet_id = ?")
                .bind(sheet_id)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "sheet {sheet_id} not found"
                )));
            }

            tx.commit().await?;
            Ok(())
        }

        async fn list_sheets_by_ids(&self, sheet_ids: &[Uuid]) -> MetadataResult<Vec<SheetRow>> {
            if sheet_ids.is_empty() {
                return Ok(Vec::new());
            }
            let placeholders = vec!["?"; sheet_ids.len()].join(", ");
            let sql = format!("SELECT * FROM sheets WHERE sheet_id IN ({placeholders})");
            let mut query = sqlx::query_as::<_, SheetRow>(&sql);
            for id in sheet_ids {
                query = query.bind(id);
            }
            Ok(query.fetch_all(&self.pool).await?)
        }

        async fn list_public_sheets(&self) -> MetadataResult<Vec<SheetRow>> {
            let rows = sqlx::query_as::<_, SheetRow>("SELECT * FROM sheets WHERE is_public = 1")
                .fetch_all(&self.pool)
                .await?;
            Ok(rows)
        }

        async fn list_public_by_genre(&self, genre: &str) -> MetadataResult<Vec<SheetRow>> {
            let rows = sqlx::query_as::<_, SheetRow>(
                "SELECT * FROM sheets WHERE is_public = 1 AND lower(genre) = ?",
            )
            .bind(genre.to_lowercase())
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn list_public_by_instrument(&self, instrument: &str) -> MetadataResult<Vec<SheetRow>> {
            let rows = sqlx::query_as::<_, SheetRow>(
                "SELECT * FROM sheets WHERE is_public = 1 AND lower(instrument) = ?",
            )
            .bind(instrument.to_lowercase())
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn list_public_by_artist(&self, artist: &str) -> MetadataResult<Vec<SheetRow>> {
            let rows = sqlx::query_as::<_, SheetRow>(
                "SELECT * FROM sheets WHERE is_public = 1 AND lower(artist) LIKE ?",
            )
            .bind(like_pattern(artist))
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn search_public_sheets(&self, term: &str) -> MetadataResult<Vec<SheetRow>> {
            let pattern = like_pattern(term);
            let rows = sqlx::query_as::<_, SheetRow>(
                "SELECT * FROM sheets WHERE is_public = 1 AND (\
                     lower(title) LIKE ? OR lower(artist) LIKE ? OR \
                     (description IS NOT NULL AND lower(description) LIKE ?))",
            )
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn advanced_search(&self, criteria: &SearchCriteria) -> MetadataResult<Vec<SheetRow>> {
            // Criteria combine with AND; omitted criteria are not applied.
            // The SQL is assembled per request so absent filters cost nothing.
            let mut sql = String::from("SELECT * FROM sheets WHERE is_public = 1");
            let mut binds: Vec<String> = Vec::new();

            if let Some(term) = &criteria.search_term {
                sql.push_str(
                    " AND (lower(title) LIKE ? OR lower(artist) LIKE ? OR \
                     (description IS NOT NULL AND lower(description) LIKE ?))",
                );
                let pattern = like_pattern(term);
                binds.push(pattern.clone());
                binds.push(pattern.clone());
                binds.push(pattern);
            }
            if let Some(artist) = &criteria.artist {
                sql.push_str(" AND lower(artist) LIKE ?");
                binds.push(like_pattern(artist));
            }
            if let Some(genre) = &criteria.genre {
                sql.push_str(" AND lower(genre) = ?");
                binds.push(genre.to_lowercase());
            }
            if let Some(instrument) = &criteria.instrument {
                sql.push_str(" AND lower(instrument) = ?");
                binds.push(instrument.to_lowercase());
            }

            let mut query = sqlx::query_as::<_, SheetRow>(&sql);
            for bind in &binds {
                query = query.bind(bind);
            }
            Ok(query.fetch_all(&self.pool).await?)
        }

        async fn list_public_recent(&self, limit: u32) -> MetadataResult<Vec<SheetRow>> {
            let rows = sqlx::query_as::<_, SheetRow>(
                "SELECT * FROM sheets WHERE is_public = 1 ORDER BY created_at DESC LIMIT ?",
            )
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn distinct_genres(&self) -> MetadataResult<Vec<String>> {
            let rows: Vec<String> = sqlx::query_scalar(
                "SELECT DISTINCT genre FROM sheets WHERE is_public = 1 ORDER BY genre",
            )
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn distinct_instruments(&self) -> MetadataResult<Vec<String>> {
            let rows: Vec<String> = sqlx::query_scalar(
                "SELECT DISTINCT instrument FROM sheets WHERE is_public = 1 ORDER BY instrument",
            )
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn distinct_artists(&self) -> MetadataResult<Vec<String>> {
            let rows: Vec<String> = sqlx::query_scalar(
                "SELECT DISTINCT artist FROM sheets WHERE is_public = 1 ORDER BY artist",
            )
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }
    }

    #[async_trait]
    impl RelationRepo for SqliteStore {
        async fn create_owner_relation(&self, user_id: Uuid, sheet_id: Uuid) -> MetadataResult<()> {
            if self.get_relation(user_id, sheet_id).await?.is_some() {
                return Err(MetadataError::AlreadyExists(format!(
                    "relation already exists for user {user_id} and sheet {sheet_id}"
                )));
            }
            if self.find_owner_of(sheet_id).await?.is_some() {
                return Err(MetadataError::AlreadyExists(format!(
                    "sheet {sheet_id} already has an owner"
                )));
            }

            let now = OffsetDateTime::now_utc();
            sqlx::query(
                "INSERT INTO sheet_relations \
                 (relation_id, user_id, sheet_id, is_owner, is_favorite, created_at, updated_at) \
                 VALUES (?, ?, ?, 1, 0, ?, ?)",
            )
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(sheet_id)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn find_owner_of(&self, sheet_id: Uuid) -> MetadataResult<Option<Uuid>> {
            let owner: Option<Uuid> = sqlx::query_scalar(
                "SELECT user_id FROM sheet_relations WHERE sheet_id = ? AND is_owner = 1",
            )
            .bind(sheet_id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(owner)
        }

        async fn resolve_owners(&self, sheet_ids: &[Uuid]) -> MetadataResult<HashMap<Uuid, Uuid>> {
            if sheet_ids.is_empty() {
                return Ok(HashMap::new());
            }
            let placeholders = vec!["?"; sheet_ids.len()].join(", ");
            let sql = format!(
                "SELECT sheet_id, user_id FROM sheet_relations \
                 WHERE is_owner = 1 AND sheet_id IN ({placeholders})"
            );
            let mut query = sqlx::query_as::<_, (Uuid, Uuid)>(&sql);
            for id in sheet_ids {
                query = query.bind(id);
            }
            let rows = query.fetch_all(&self.pool).await?;
            Ok(rows.into_iter().collect())
        }

        async fn set_favorite(&self, user_id: Uuid, sheet_id: Uuid) -> MetadataResult<()> {
            let now = OffsetDateTime::now_utc();
            match self.get_relation(user_id, sheet_id).await? {
                Some(relation) => {
                    // Favorite toggles never touch the ownership facet.
                    sqlx::query(
                        "UPDATE sheet_relations SET is_favorite = 1, updated_at = ? \
                         WHERE relation_id = ?",
                    )
                    .bind(now)
                    .bind(relation.relation_id)
                    .execute(&self.pool)
                    .await?;
                }
                None => {
                    // A favorite racing a sheet (or user) deletion lands on
                    // the foreign key; surface that as not-found rather than
                    // a raw database error.
                    sqlx::query(
                        "INSERT INTO sheet_relations \
                         (relation_id, user_id, sheet_id, is_owner, is_favorite, created_at, updated_at) \
                         VALUES (?, ?, ?, 0, 1, ?, ?)",
                    )
                    .bind(Uuid::new_v4())
                    .bind(user_id)
                    .bind(sheet_id)
                    .bind(now)
                    .bind(now)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| match e {
                        sqlx::Error::Database(db)
                            if matches!(
                                db.kind(),
                                sqlx::error::ErrorKind::ForeignKeyViolation
                            ) =>
                        {
                            MetadataError::NotFound(format!(
                                "user {user_id} or sheet {sheet_id} not found"
                            ))
                        }
                        sqlx::Error::Database(db)
                            if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
                        {
                            MetadataError::Constraint(db.message().to_string())
                        }
                        other => MetadataError::Database(other),
                    })?;
                }
            }
            Ok(())
        }

        async fn clear_favorite(&self, user_id: Uuid, sheet_id: Uuid) -> MetadataResult<()> {
            let relation = self.get_relation(user_id, sheet_id).await?.ok_or_else(|| {
                MetadataError::NotFound(format!(
                    "no relation for user {user_id} and sheet {sheet_id}"
                ))
            })?;

            if relation.is_owner {
                // Favorite status for an owner lives in the same row as the
                // ownership fact; deleting it would delete ownership.
                return Err(MetadataError::InvalidOperation(
                    "cannot remove an owned sheet from favorites".to_string(),
                ));
            }

            sqlx::query("DELETE FROM sheet_relations WHERE relation_id = ?")
                .bind(relation.relation_id)
                .execute(&self.pool)
                .await?;
            Ok(())
        }

        async fn is_favorite(&self, user_id: Uuid, sheet_id: Uuid) -> MetadataResult<bool> {
            let favorite: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM sheet_relations \
                 WHERE user_id = ? AND sheet_id = ? AND is_favorite = 1)",
            )
            .bind(user_id)
            .bind(sheet_id)
            .fetch_one(&self.pool)
            .await?;
            Ok(favorite)
        }

        async fn list_favorites(&self, user_id: Uuid) -> MetadataResult<Vec<Uuid>> {
            let ids: Vec<Uuid> = sqlx::query_scalar(
                "SELECT sheet_id FROM sheet_relations WHERE user_id = ? AND is_favorite = 1",
            )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(ids)
        }

        async fn list_owned(&self, user_id: Uuid) -> MetadataResult<Vec<Uuid>> {
            let ids: Vec<Uuid> = sqlx::query_scalar(
                "SELECT sheet_id FROM sheet_relations WHERE user_id = ? AND is_owner = 1",
            )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(ids)
        }

        async fn delete_all_for_sheet(&self, sheet_id: Uuid) -> MetadataResult<u64> {
            let result = sqlx::query("DELETE FROM sheet_relations WHERE sheet_id = ?")
                .bind(sheet_id)
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected())
        }

        async fn get_relation(
            &self,
            user_id: Uuid,
            sheet_id: Uuid,
        ) -> MetadataResult<Option<SheetRelationRow>> {
            let row = sqlx::query_as::<_, SheetRelationRow>(
                "SELECT * FROM sheet_relations WHERE user_id = ? AND sheet_id = ?",
            )
            .bind(user_id)
            .bind(sheet_id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }
    }
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id BLOB PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    bio TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);

CREATE TABLE IF NOT EXISTS sheets (
    sheet_id BLOB PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    artist TEXT NOT NULL,
    genre TEXT NOT NULL,
    instrument TEXT NOT NULL,
    pdf_content BLOB NOT NULL,
    pdf_filename TEXT NOT NULL,
    pdf_size INTEGER NOT NULL,
    pdf_content_type TEXT NOT NULL,
    is_public INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_sheets_public_created ON sheets(is_public, created_at);
CREATE INDEX IF NOT EXISTS idx_sheets_genre ON sheets(genre);
CREATE INDEX IF NOT EXISTS idx_sheets_instrument ON sheets(instrument);

-- One row per (user, sheet) pair carries both facets: is_owner and
-- is_favorite. Ownership and favorite status are never split across rows.
CREATE TABLE IF NOT EXISTS sheet_relations (
    relation_id BLOB PRIMARY KEY,
    user_id BLOB NOT NULL REFERENCES users(user_id),
    sheet_id BLOB NOT NULL REFERENCES sheets(sheet_id) ON DELETE CASCADE,
    is_owner INTEGER NOT NULL DEFAULT 0,
    is_favorite INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE(user_id, sheet_id)
);
-- At most one owner row per sheet (partial unique index).
CREATE UNIQUE INDEX IF NOT EXISTS idx_relations_owner ON sheet_relations(sheet_id)
    WHERE is_owner = 1;
CREATE INDEX IF NOT EXISTS idx_relations_user ON sheet_relations(user_id);
CREATE INDEX IF NOT EXISTS idx_relations_sheet ON sheet_relations(sheet_id);
"#;
