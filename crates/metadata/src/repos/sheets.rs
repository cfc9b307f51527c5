//! Sheet repository trait: catalog storage with predicate-driven listings.

use crate::error::MetadataResult;
use crate::models::SheetRow;
use async_trait::async_trait;
use scorebook_core::SearchCriteria;
use uuid::Uuid;

/// Repository for sheet records.
///
/// Listing operations impose no ordering unless stated; the search engine in
/// the catalog crate sorts candidate sets. Distinct-value listings are
/// restricted to public sheets and ordered ascending.
#[async_trait]
pub trait SheetRepo: Send + Sync {
    /// Insert a new sheet.
    async fn create_sheet(&self, sheet: &SheetRow) -> MetadataResult<()>;

    /// Insert a new sheet and its owner relation in one transaction.
    ///
    /// Fails with `AlreadyExists` if a relation already exists for the pair.
    async fn create_sheet_with_owner(&self, sheet: &SheetRow, owner_id: Uuid)
        -> MetadataResult<()>;

    /// Get a sheet by id.
    async fn get_sheet(&self, sheet_id: Uuid) -> MetadataResult<Option<SheetRow>>;

    /// Check whether a sheet exists.
    async fn sheet_exists(&self, sheet_id: Uuid) -> MetadataResult<bool>;

    /// Update an existing sheet (full row).
    async fn update_sheet(&self, sheet: &SheetRow) -> MetadataResult<()>;

    /// Delete a sheet and every relationship record referencing it, in one
    /// transaction. Fails with `NotFound` if the sheet is absent.
    async fn delete_sheet(&self, sheet_id: Uuid) -> MetadataResult<()>;

    /// Fetch sheets by id set. Missing ids are silently skipped.
    async fn list_sheets_by_ids(&self, sheet_ids: &[Uuid]) -> MetadataResult<Vec<SheetRow>>;

    /// All public sheets.
    async fn list_public_sheets(&self) -> MetadataResult<Vec<SheetRow>>;

    /// Public sheets with a genre equal to `genre` (case-insensitive).
    async fn list_public_by_genre(&self, genre: &str) -> MetadataResult<Vec<SheetRow>>;

    /// Public sheets with an instrument equal to `instrument` (case-insensitive).
    async fn list_public_by_instrument(&self, instrument: &str) -> MetadataResult<Vec<SheetRow>>;

    /// Public sheets whose artist contains `artist` (case-insensitive).
    async fn list_public_by_artist(&self, artist: &str) -> MetadataResult<Vec<SheetRow>>;

    /// Public sheets whose title, artist or description contains `term`
    /// (case-insensitive).
    async fn search_public_sheets(&self, term: &str) -> MetadataResult<Vec<SheetRow>>;

    /// Public sheets matching all supplied criteria (AND). Omitted criteria
    /// are not applied. Ordering is undefined at this layer.
    async fn advanced_search(&self, criteria: &SearchCriteria) -> MetadataResult<Vec<SheetRow>>;

    /// Most recently created public sheets, newest first, capped at `limit`.
    async fn list_public_recent(&self, limit: u32) -> MetadataResult<Vec<SheetRow>>;

    /// Distinct genres across public sheets, ascending.
    async fn distinct_genres(&self) -> MetadataResult<Vec<String>>;

    /// Distinct instruments across public sheets, ascending.
    async fn distinct_instruments(&self) -> MetadataResult<Vec<String>>;

    /// Distinct artists across public sheets, ascending.
    async fn distinct_artists(&self) -> MetadataResult<Vec<String>>;
}
