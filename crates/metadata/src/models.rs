//! Database models mapping to the metadata schema.

use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Sheet record, including the binary payload.
///
/// Invariant: `pdf_size` equals `pdf_content.len()`.
#[derive(Debug, Clone, FromRow)]
pub struct SheetRow {
    pub sheet_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub artist: String,
    pub genre: String,
    pub instrument: String,
    pub pdf_content: Vec<u8>,
    pub pdf_filename: String,
    pub pdf_size: i64,
    pub pdf_content_type: String,
    pub is_public: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Relationship record joining a user to a sheet.
///
/// One row per (user, sheet) pair carries both facets: ownership and favorite
/// status. At most one row per sheet has `is_owner = true`, enforced by a
/// partial unique index.
#[derive(Debug, Clone, FromRow)]
pub struct SheetRelationRow {
    pub relation_id: Uuid,
    pub user_id: Uuid,
    pub sheet_id: Uuid,
    pub is_owner: bool,
    pub is_favorite: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
