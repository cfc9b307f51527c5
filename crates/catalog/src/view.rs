//! API-facing view types assembled by the catalog services.

use scorebook_core::pdf::format_file_size;
use scorebook_metadata::{SheetRow, UserRow};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// A sheet as presented to API consumers. The PDF payload itself is never
/// part of a view; it is served through the dedicated download endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SheetView {
    pub sheet_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub artist: String,
    pub genre: String,
    pub instrument: String,
    pub pdf_filename: String,
    pub pdf_size: i64,
    pub pdf_size_display: String,
    pub is_public: bool,
    pub owner_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl SheetView {
    pub fn from_row(row: SheetRow, owner_id: Uuid) -> Self {
        Self {
            sheet_id: row.sheet_id,
            title: row.title,
            description: row.description,
            artist: row.artist,
            genre: row.genre,
            instrument: row.instrument,
            pdf_filename: row.pdf_filename,
            pdf_size: row.pdf_size,
            pdf_size_display: format_file_size(row.pdf_size.max(0) as u64),
            is_public: row.is_public,
            owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A user as presented to API consumers. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<UserRow> for UserView {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.user_id,
            name: row.name,
            email: row.email,
            bio: row.bio,
            created_at: row.created_at,
        }
    }
}

/// A user profile: the user plus their owned and favorited sheets.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfileView {
    #[serde(flatten)]
    pub user: UserView,
    pub owned_sheets: Vec<SheetView>,
    pub favorite_sheets: Vec<SheetView>,
}
