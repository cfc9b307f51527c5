//! The sheet catalog: search & filter engine, mutation paths, favorites.
//!
//! Every listing follows the same pipeline: fetch candidates from the store
//! using only the supplied criteria, sort in memory, resolve owners once
//! through the batch resolver, then assemble views.

use crate::error::{CatalogError, CatalogResult};
use crate::policy::MutationPolicy;
use crate::resolver::OwnerResolver;
use crate::view::SheetView;
use bytes::Bytes;
use scorebook_core::pdf::{validate_pdf, PdfPayload};
use scorebook_core::{SearchCriteria, SortKey, RECENT_SHEETS_LIMIT};
use scorebook_metadata::{MetadataStore, SheetRow};
use serde::Deserialize;
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

/// Metadata for a new sheet.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSheet {
    pub title: String,
    pub description: Option<String>,
    pub artist: String,
    pub genre: String,
    pub instrument: String,
    #[serde(default = "default_public")]
    pub is_public: bool,
}

fn default_public() -> bool {
    true
}

/// Partial metadata update for an existing sheet. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub instrument: Option<String>,
    pub is_public: Option<bool>,
}

/// The raw PDF payload of a sheet, for the download endpoint.
#[derive(Debug, Clone)]
pub struct SheetPdf {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Sheet catalog service.
pub struct SheetCatalog {
    store: Arc<dyn MetadataStore>,
    resolver: OwnerResolver,
    policy: Arc<dyn MutationPolicy>,
    max_pdf_size: u64,
}

impl SheetCatalog {
    pub fn new(
        store: Arc<dyn MetadataStore>,
        policy: Arc<dyn MutationPolicy>,
        max_pdf_size: u64,
    ) -> Self {
        let resolver = OwnerResolver::new(Arc::clone(&store));
        Self {
            store,
            resolver,
            policy,
            max_pdf_size,
        }
    }

    /// Create a sheet with its owner relation, atomically.
    pub async fn create_sheet(
        &self,
        new: NewSheet,
        owner_id: Uuid,
        pdf: PdfPayload,
    ) -> CatalogResult<SheetView> {
        require_non_blank("title", &new.title)?;
        require_non_blank("artist", &new.artist)?;
        require_non_blank("genre", &new.genre)?;
        require_non_blank("instrument", &new.instrument)?;
        validate_pdf(&pdf, self.max_pdf_size)?;

        if !self.store.user_exists(owner_id).await? {
            return Err(CatalogError::NotFound(format!("user {owner_id} not found")));
        }

        let now = OffsetDateTime::now_utc();
        let row = SheetRow {
            sheet_id: Uuid::new_v4(),
            title: new.title.trim().to_string(),
            description: new.description.filter(|d| !d.trim().is_empty()),
            artist: new.artist.trim().to_string(),
            genre: new.genre.trim().to_string(),
            instrument: new.instrument.trim().to_string(),
            pdf_content: pdf.data.to_vec(),
            pdf_filename: pdf.filename.clone(),
            pdf_size: pdf.data.len() as i64,
            pdf_content_type: pdf.content_type.clone(),
            is_public: new.is_public,
            created_at: now,
            updated_at: now,
        };

        self.store.create_sheet_with_owner(&row, owner_id).await?;
        info!(sheet_id = %row.sheet_id, owner_id = %owner_id, "created sheet");

        Ok(SheetView::from_row(row, owner_id))
    }

    /// Fetch a single sheet with its owner attached. A sheet whose owner
    /// record is missing is treated as not found.
    pub async fn get_sheet(&self, sheet_id: Uuid) -> CatalogResult<SheetView> {
        let row = self.require_sheet(sheet_id).await?;
        let owner = self.require_owner(sheet_id).await?;
        Ok(SheetView::from_row(row, owner))
    }

    /// Fetch the raw PDF payload of a sheet.
    pub async fn get_sheet_pdf(&self, sheet_id: Uuid) -> CatalogResult<SheetPdf> {
        let row = self.require_sheet(sheet_id).await?;
        Ok(SheetPdf {
            filename: row.pdf_filename,
            content_type: row.pdf_content_type,
            data: Bytes::from(row.pdf_content),
        })
    }

    /// Apply a partial metadata update, subject to the mutation policy.
    pub async fn update_sheet(
        &self,
        sheet_id: Uuid,
        update: SheetUpdate,
        caller: Option<Uuid>,
    ) -> CatalogResult<SheetView> {
        let mut row = self.require_sheet(sheet_id).await?;
        let owner = self.authorize_mutation(sheet_id, caller).await?;

        if let Some(title) = update.title {
            require_non_blank("title", &title)?;
            row.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            row.description = if description.trim().is_empty() {
                None
            } else {
                Some(description)
            };
        }
        if let Some(artist) = update.artist {
            require_non_blank("artist", &artist)?;
            row.artist = artist.trim().to_string();
        }
        if let Some(genre) = update.genre {
            require_non_blank("genre", &genre)?;
            row.genre = genre.trim().to_string();
        }
        if let Some(instrument) = update.instrument {
            require_non_blank("instrument", &instrument)?;
            row.instrument = instrument.trim().to_string();
        }
        if let Some(is_public) = update.is_public {
            row.is_public = is_public;
        }
        row.updated_at = OffsetDateTime::now_utc();

        self.store.update_sheet(&row).await?;
        Ok(SheetView::from_row(row, owner))
    }

    /// Replace the PDF payload of a sheet, re-validated, subject to the
    /// mutation policy.
    pub async fn replace_pdf(
        &self,
        sheet_id: Uuid,
        pdf: PdfPayload,
        caller: Option<Uuid>,
    ) -> CatalogResult<SheetView> {
        validate_pdf(&pdf, self.max_pdf_size)?;

        let mut row = self.require_sheet(sheet_id).await?;
        let owner = self.authorize_mutation(sheet_id, caller).await?;

        row.pdf_content = pdf.data.to_vec();
        row.pdf_filename = pdf.filename;
        row.pdf_size = pdf.data.len() as i64;
        row.pdf_content_type = pdf.content_type;
        row.updated_at = OffsetDateTime::now_utc();

        self.store.update_sheet(&row).await?;
        info!(sheet_id = %sheet_id, size = row.pdf_size, "replaced sheet file");
        Ok(SheetView::from_row(row, owner))
    }

    /// Delete a sheet and every relationship record referencing it.
    pub async fn delete_sheet(&self, sheet_id: Uuid, caller: Option<Uuid>) -> CatalogResult<()> {
        if !self.store.sheet_exists(sheet_id).await? {
            return Err(CatalogError::NotFound(format!(
                "sheet {sheet_id} not found"
            )));
        }
        self.authorize_mutation(sheet_id, caller).await?;

        self.store.delete_sheet(sheet_id).await?;
        info!(sheet_id = %sheet_id, "deleted sheet");
        Ok(())
    }

    /// All public sheets.
    pub async fn list_public(&self, sort: SortKey) -> CatalogResult<Vec<SheetView>> {
        let rows = self.store.list_public_sheets().await?;
        self.assemble(rows, sort).await
    }

    /// Public sheets in a genre (case-insensitive equality).
    pub async fn list_by_genre(&self, genre: &str, sort: SortKey) -> CatalogResult<Vec<SheetView>> {
        let rows = self.store.list_public_by_genre(genre).await?;
        self.assemble(rows, sort).await
    }

    /// Public sheets for an instrument (case-insensitive equality).
    pub async fn list_by_instrument(
        &self,
        instrument: &str,
        sort: SortKey,
    ) -> CatalogResult<Vec<SheetView>> {
        let rows = self.store.list_public_by_instrument(instrument).await?;
        self.assemble(rows, sort).await
    }

    /// Public sheets whose artist matches (case-insensitive substring).
    pub async fn list_by_artist(
        &self,
        artist: &str,
        sort: SortKey,
    ) -> CatalogResult<Vec<SheetView>> {
        let rows = self.store.list_public_by_artist(artist).await?;
        self.assemble(rows, sort).await
    }

    /// Free-text search over title, artist and description.
    pub async fn search(&self, term: &str, sort: SortKey) -> CatalogResult<Vec<SheetView>> {
        let rows = self.store.search_public_sheets(term).await?;
        self.assemble(rows, sort).await
    }

    /// Multi-criteria search. Blank criteria are dropped before they reach
    /// the store; an all-blank request degenerates to a public listing.
    pub async fn advanced_search(
        &self,
        criteria: SearchCriteria,
        sort: SortKey,
    ) -> CatalogResult<Vec<SheetView>> {
        let criteria = criteria.normalized();
        let rows = if criteria.is_empty() {
            self.store.list_public_sheets().await?
        } else {
            self.store.advanced_search(&criteria).await?
        };
        self.assemble(rows, sort).await
    }

    /// Most recently added public sheets, newest first.
    pub async fn list_recent(&self) -> CatalogResult<Vec<SheetView>> {
        let rows = self
            .store
            .list_public_recent(RECENT_SHEETS_LIMIT as u32)
            .await?;
        // Store returns newest-first already; keep that order through assembly.
        self.assemble(rows, SortKey::Recent).await
    }

    /// Sheets owned by a user (public or not).
    pub async fn list_owned_by(&self, user_id: Uuid, sort: SortKey) -> CatalogResult<Vec<SheetView>> {
        self.require_user(user_id).await?;
        let ids = self.store.list_owned(user_id).await?;
        let rows = self.store.list_sheets_by_ids(&ids).await?;
        self.assemble(rows, sort).await
    }

    /// Public sheets owned by a user.
    pub async fn list_public_of_user(
        &self,
        user_id: Uuid,
        sort: SortKey,
    ) -> CatalogResult<Vec<SheetView>> {
        self.require_user(user_id).await?;
        let ids = self.store.list_owned(user_id).await?;
        let rows = self.store.list_sheets_by_ids(&ids).await?;
        let rows = rows.into_iter().filter(|r| r.is_public).collect();
        self.assemble(rows, sort).await
    }

    /// Sheets a user has favorited.
    pub async fn list_favorites_of(
        &self,
        user_id: Uuid,
        sort: SortKey,
    ) -> CatalogResult<Vec<SheetView>> {
        self.require_user(user_id).await?;
        let ids = self.store.list_favorites(user_id).await?;
        let rows = self.store.list_sheets_by_ids(&ids).await?;
        self.assemble(rows, sort).await
    }

    /// Mark a sheet as a favorite of a user. Idempotent.
    pub async fn add_favorite(&self, user_id: Uuid, sheet_id: Uuid) -> CatalogResult<()> {
        self.require_user(user_id).await?;
        if !self.store.sheet_exists(sheet_id).await? {
            return Err(CatalogError::NotFound(format!(
                "sheet {sheet_id} not found"
            )));
        }
        self.store.set_favorite(user_id, sheet_id).await?;
        Ok(())
    }

    /// Remove a sheet from a user's favorites.
    ///
    /// Owned sheets cannot be un-favorited: ownership and favorite status
    /// share a relationship record, and the owner row must outlive the sheet.
    pub async fn remove_favorite(&self, user_id: Uuid, sheet_id: Uuid) -> CatalogResult<()> {
        self.store.clear_favorite(user_id, sheet_id).await?;
        Ok(())
    }

    /// Whether a user has favorited a sheet.
    pub async fn is_favorite(&self, user_id: Uuid, sheet_id: Uuid) -> CatalogResult<bool> {
        Ok(self.store.is_favorite(user_id, sheet_id).await?)
    }

    /// Distinct genres across public sheets.
    pub async fn genres(&self) -> CatalogResult<Vec<String>> {
        Ok(self.store.distinct_genres().await?)
    }

    /// Distinct instruments across public sheets.
    pub async fn instruments(&self) -> CatalogResult<Vec<String>> {
        Ok(self.store.distinct_instruments().await?)
    }

    /// Distinct artists across public sheets.
    pub async fn artists(&self) -> CatalogResult<Vec<String>> {
        Ok(self.store.distinct_artists().await?)
    }

    /// Sort candidates, resolve owners in one bulk call, assemble views.
    async fn assemble(&self, mut rows: Vec<SheetRow>, sort: SortKey) -> CatalogResult<Vec<SheetView>> {
        sort_rows(&mut rows, sort);
        let resolved = self.resolver.resolve(rows).await?;
        Ok(resolved
            .into_iter()
            .map(|(row, owner)| SheetView::from_row(row, owner))
            .collect())
    }

    async fn require_sheet(&self, sheet_id: Uuid) -> CatalogResult<SheetRow> {
        self.store
            .get_sheet(sheet_id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("sheet {sheet_id} not found")))
    }

    async fn require_user(&self, user_id: Uuid) -> CatalogResult<()> {
        if !self.store.user_exists(user_id).await? {
            return Err(CatalogError::NotFound(format!("user {user_id} not found")));
        }
        Ok(())
    }

    /// Resolve the sheet's owner. A sheet without an owner record is a
    /// data-integrity gap; single fetches and mutations treat it as not
    /// found (listings drop such sheets during batch resolution instead).
    async fn require_owner(&self, sheet_id: Uuid) -> CatalogResult<Uuid> {
        match self.store.find_owner_of(sheet_id).await? {
            Some(owner) => Ok(owner),
            None => {
                warn!(sheet_id = %sheet_id, "sheet has no owner record");
                Err(CatalogError::NotFound(format!(
                    "sheet {sheet_id} not found"
                )))
            }
        }
    }

    /// Run the mutation policy against the sheet's owner. Returns the owner
    /// id for view assembly.
    async fn authorize_mutation(
        &self,
        sheet_id: Uuid,
        caller: Option<Uuid>,
    ) -> CatalogResult<Uuid> {
        let owner = self.require_owner(sheet_id).await?;
        self.policy.authorize(caller, owner)?;
        Ok(owner)
    }
}

/// In-memory ordering of a candidate set.
///
/// `title` and `artist` sort ascending, case-insensitive; `recent` (the
/// default, also used for unrecognized keys) sorts newest first.
pub fn sort_rows(rows: &mut [SheetRow], sort: SortKey) {
    match sort {
        SortKey::Title => rows.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        SortKey::Artist => {
            rows.sort_by(|a, b| a.artist.to_lowercase().cmp(&b.artist.to_lowercase()))
        }
        SortKey::Recent => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

fn require_non_blank(field: &str, value: &str) -> CatalogResult<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::Validation(format!("{field} must not be blank")));
    }
    Ok(())
}
