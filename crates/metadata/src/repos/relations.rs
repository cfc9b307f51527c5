//! Relationship ledger trait: the join model binding users to sheets.
//!
//! A single row per (user, sheet) pair carries two independent facets,
//! `is_owner` and `is_favorite`. The ledger enforces the one-owner invariant
//! and the favorite semantics; everything above it treats these rows as
//! opaque facts.

use crate::error::MetadataResult;
use crate::models::SheetRelationRow;
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

/// Repository for ownership/favorite relationship records.
#[async_trait]
pub trait RelationRepo: Send + Sync {
    /// Create the owner relation for a sheet. Called exactly once, at sheet
    /// creation. Fails with `AlreadyExists` if any relation already exists
    /// for the pair.
    async fn create_owner_relation(&self, user_id: Uuid, sheet_id: Uuid) -> MetadataResult<()>;

    /// Single-sheet owner lookup.
    ///
    /// Callers resolving owners for a *list* of sheets must use
    /// [`RelationRepo::resolve_owners`] instead; looping over this method
    /// reintroduces the per-sheet lookup cost the bulk call exists to remove.
    async fn find_owner_of(&self, sheet_id: Uuid) -> MetadataResult<Option<Uuid>>;

    /// Bulk owner resolution: one query for the whole id set.
    ///
    /// Sheets with no owner record are absent from the result map; the caller
    /// decides how to treat the gap (it is a data-integrity issue, not a
    /// not-found).
    async fn resolve_owners(&self, sheet_ids: &[Uuid]) -> MetadataResult<HashMap<Uuid, Uuid>>;

    /// Mark a sheet as a favorite of a user. Idempotent: creates a
    /// `is_owner=false, is_favorite=true` row if none exists, otherwise sets
    /// `is_favorite=true` without touching `is_owner`.
    async fn set_favorite(&self, user_id: Uuid, sheet_id: Uuid) -> MetadataResult<()>;

    /// Remove a favorite. Fails with `NotFound` if no relation exists, and
    /// with `InvalidOperation` if the relation has `is_owner=true` — deleting
    /// it would delete ownership.
    async fn clear_favorite(&self, user_id: Uuid, sheet_id: Uuid) -> MetadataResult<()>;

    /// Whether the user has favorited the sheet.
    async fn is_favorite(&self, user_id: Uuid, sheet_id: Uuid) -> MetadataResult<bool>;

    /// Sheet ids the user has favorited.
    async fn list_favorites(&self, user_id: Uuid) -> MetadataResult<Vec<Uuid>>;

    /// Sheet ids the user owns.
    async fn list_owned(&self, user_id: Uuid) -> MetadataResult<Vec<Uuid>>;

    /// Remove every relationship record referencing a sheet. Used by sheet
    /// deletion. Returns the number of rows removed.
    async fn delete_all_for_sheet(&self, sheet_id: Uuid) -> MetadataResult<u64>;

    /// Fetch the relation row for a (user, sheet) pair, if any.
    async fn get_relation(
        &self,
        user_id: Uuid,
        sheet_id: Uuid,
    ) -> MetadataResult<Option<SheetRelationRow>>;
}
