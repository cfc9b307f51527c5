//! Batch owner resolution.

use crate::error::CatalogResult;
use scorebook_metadata::{MetadataStore, SheetRow};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Resolves sheet owners in bulk.
///
/// Listing paths fetch candidate sheets first and attach owners afterwards;
/// this type guarantees that attachment costs at most one ledger query per
/// listing, regardless of result size.
pub struct OwnerResolver {
    store: Arc<dyn MetadataStore>,
}

impl OwnerResolver {
    pub fn new(store: Arc<dyn MetadataStore>) -> Self {
        Self { store }
    }

    /// Attach owners to a candidate set with a single bulk query.
    ///
    /// An empty candidate set returns immediately without touching the
    /// ledger. Sheets whose owner record is missing are logged and dropped;
    /// a resolution gap degrades visibility, never availability.
    pub async fn resolve(&self, rows: Vec<SheetRow>) -> CatalogResult<Vec<(SheetRow, Uuid)>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.sheet_id).collect();
        let owners = self.store.resolve_owners(&ids).await?;

        let mut resolved = Vec::with_capacity(rows.len());
        for row in rows {
            match owners.get(&row.sheet_id) {
                Some(owner_id) => resolved.push((row, *owner_id)),
                None => {
                    warn!(sheet_id = %row.sheet_id, "sheet has no owner record, dropping from listing");
                }
            }
        }
        Ok(resolved)
    }
}
