//! Test doubles: a call-counting store wrapper and a cheap password hasher.

use async_trait::async_trait;
use scorebook_catalog::{CatalogResult, PasswordHasher};
use scorebook_core::SearchCriteria;
use scorebook_metadata::{
    MetadataResult, MetadataStore, RelationRepo, SheetRelationRow, SheetRepo, SheetRow,
    SqliteStore, UserRepo, UserRow,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// Instant hasher so tests skip the real key-derivation cost.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> CatalogResult<String> {
        Ok(format!("plain:{password}"))
    }
}

/// Delegating store that counts owner-resolution calls.
///
/// Lets tests assert the batch resolver's query discipline: listings must
/// make exactly one `resolve_owners` call and never loop `find_owner_of`.
pub struct CountingStore {
    inner: SqliteStore,
    pub resolve_owners_calls: AtomicUsize,
    pub find_owner_calls: AtomicUsize,
}

impl CountingStore {
    pub async fn new(path: impl AsRef<Path>) -> MetadataResult<Self> {
        Ok(Self {
            inner: SqliteStore::new(path).await?,
            resolve_owners_calls: AtomicUsize::new(0),
            find_owner_calls: AtomicUsize::new(0),
        })
    }

    pub fn resolve_owners_count(&self) -> usize {
        self.resolve_owners_calls.load(Ordering::SeqCst)
    }

    pub fn find_owner_count(&self) -> usize {
        self.find_owner_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepo for CountingStore {
    async fn create_user(&self, user: &UserRow) -> MetadataResult<()> {
        self.inner.create_user(user).await
    }

    async fn get_user(&self, user_id: Uuid) -> MetadataResult<Option<UserRow>> {
        self.inner.get_user(user_id).await
    }

    async fn get_user_by_email(&self, email: &str) -> MetadataResult<Option<UserRow>> {
        self.inner.get_user_by_email(email).await
    }

    async fn user_exists(&self, user_id: Uuid) -> MetadataResult<bool> {
        self.inner.user_exists(user_id).await
    }

    async fn update_user(&self, user: &UserRow) -> MetadataResult<()> {
        self.inner.update_user(user).await
    }

    async fn delete_user(&self, user_id: Uuid) -> MetadataResult<()> {
        self.inner.delete_user(user_id).await
    }
}

#[async_trait]
impl SheetRepo for CountingStore {
    async fn create_sheet(&self, sheet: &SheetRow) -> MetadataResult<()> {
        self.inner.create_sheet(sheet).await
    }

    async fn create_sheet_with_owner(&self, sheet: &SheetRow, owner_id: Uuid) -> MetadataResult<()> {
        self.inner.create_sheet_with_owner(sheet, owner_id).await
    }

    async fn get_sheet(&self, sheet_id: Uuid) -> MetadataResult<Option<SheetRow>> {
        self.inner.get_sheet(sheet_id).await
    }

    async fn sheet_exists(&self, sheet_id: Uuid) -> MetadataResult<bool> {
        self.inner.sheet_exists(sheet_id).await
    }

    async fn update_sheet(&self, sheet: &SheetRow) -> MetadataResult<()> {
        self.inner.update_sheet(sheet).await
    }

    async fn delete_sheet(&self, sheet_id: Uuid) -> MetadataResult<()> {
        self.inner.delete_sheet(sheet_id).await
    }

    async fn list_sheets_by_ids(&self, sheet_ids: &[Uuid]) -> MetadataResult<Vec<SheetRow>> {
        self.inner.list_sheets_by_ids(sheet_ids).await
    }

    async fn list_public_sheets(&self) -> MetadataResult<Vec<SheetRow>> {
        self.inner.list_public_sheets().await
    }

    async fn list_public_by_genre(&self, genre: &str) -> MetadataResult<Vec<SheetRow>> {
        self.inner.list_public_by_genre(genre).await
    }

    async fn list_public_by_instrument(&self, instrument: &str) -> MetadataResult<Vec<SheetRow>> {
        self.inner.list_public_by_instrument(instrument).await
    }

    async fn list_public_by_artist(&self, artist: &str) -> MetadataResult<Vec<SheetRow>> {
        self.inner.list_public_by_artist(artist).await
    }

    async fn search_public_sheets(&self, term: &str) -> MetadataResult<Vec<SheetRow>> {
        self.inner.search_public_sheets(term).await
    }

    async fn advanced_search(&self, criteria: &SearchCriteria) -> MetadataResult<Vec<SheetRow>> {
        self.inner.advanced_search(criteria).await
    }

    async fn list_public_recent(&self, limit: u32) -> MetadataResult<Vec<SheetRow>> {
        self.inner.list_public_recent(limit).await
    }

    async fn distinct_genres(&self) -> MetadataResult<Vec<String>> {
        self.inner.distinct_genres().await
    }

    async fn distinct_instruments(&self) -> MetadataResult<Vec<String>> {
        self.inner.distinct_instruments().await
    }

    async fn distinct_artists(&self) -> MetadataResult<Vec<String>> {
        self.inner.distinct_artists().await
    }
}

#[async_trait]
impl RelationRepo for CountingStore {
    async fn create_owner_relation(&self, user_id: Uuid, sheet_id: Uuid) -> MetadataResult<()> {
        self.inner.create_owner_relation(user_id, sheet_id).await
    }

    async fn find_owner_of(&self, sheet_id: Uuid) -> MetadataResult<Option<Uuid>> {
        self.find_owner_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_owner_of(sheet_id).await
    }

    async fn resolve_owners(&self, sheet_ids: &[Uuid]) -> MetadataResult<HashMap<Uuid, Uuid>> {
        self.resolve_owners_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve_owners(sheet_ids).await
    }

    async fn set_favorite(&self, user_id: Uuid, sheet_id: Uuid) -> MetadataResult<()> {
        self.inner.set_favorite(user_id, sheet_id).await
    }

    async fn clear_favorite(&self, user_id: Uuid, sheet_id: Uuid) -> MetadataResult<()> {
        self.inner.clear_favorite(user_id, sheet_id).await
    }

    async fn is_favorite(&self, user_id: Uuid, sheet_id: Uuid) -> MetadataResult<bool> {
        self.inner.is_favorite(user_id, sheet_id).await
    }

    async fn list_favorites(&self, user_id: Uuid) -> MetadataResult<Vec<Uuid>> {
        self.inner.list_favorites(user_id).await
    }

    async fn list_owned(&self, user_id: Uuid) -> MetadataResult<Vec<Uuid>> {
        self.inner.list_owned(user_id).await
    }

    async fn delete_all_for_sheet(&self, sheet_id: Uuid) -> MetadataResult<u64> {
        self.inner.delete_all_for_sheet(sheet_id).await
    }

    async fn get_relation(
        &self,
        user_id: Uuid,
        sheet_id: Uuid,
    ) -> MetadataResult<Option<SheetRelationRow>> {
        self.inner.get_relation(user_id, sheet_id).await
    }
}

#[async_trait]
impl MetadataStore for CountingStore {
    async fn migrate(&self) -> MetadataResult<()> {
        self.inner.migrate().await
    }

    async fn health_check(&self) -> MetadataResult<()> {
        self.inner.health_check().await
    }
}
