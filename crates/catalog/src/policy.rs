//! Authorization hook for sheet mutation paths.

use crate::error::{CatalogError, CatalogResult};
use scorebook_core::AuthorizationConfig;
use std::sync::Arc;
use uuid::Uuid;

/// Decides whether a caller may mutate a sheet.
///
/// Applied at update, file replacement and deletion. The transport passes
/// the caller id through as-is; the policy owns the decision.
pub trait MutationPolicy: Send + Sync {
    fn authorize(&self, caller: Option<Uuid>, owner: Uuid) -> CatalogResult<()>;
}

/// Permits every mutation.
pub struct AllowAll;

impl MutationPolicy for AllowAll {
    fn authorize(&self, _caller: Option<Uuid>, _owner: Uuid) -> CatalogResult<()> {
        Ok(())
    }
}

/// Permits mutations only by the sheet's owner.
pub struct OwnerOnly;

impl MutationPolicy for OwnerOnly {
    fn authorize(&self, caller: Option<Uuid>, owner: Uuid) -> CatalogResult<()> {
        match caller {
            Some(id) if id == owner => Ok(()),
            Some(_) => Err(CatalogError::Forbidden(
                "only the sheet owner may modify it".to_string(),
            )),
            None => Err(CatalogError::Forbidden(
                "caller identity required for this operation".to_string(),
            )),
        }
    }
}

/// Select the policy from configuration.
pub fn from_config(config: &AuthorizationConfig) -> Arc<dyn MutationPolicy> {
    if config.enforce_owner {
        Arc::new(OwnerOnly)
    } else {
        Arc::new(AllowAll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_all_permits_anonymous() {
        assert!(AllowAll.authorize(None, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn owner_only_permits_owner() {
        let owner = Uuid::new_v4();
        assert!(OwnerOnly.authorize(Some(owner), owner).is_ok());
    }

    #[test]
    fn owner_only_rejects_others_and_anonymous() {
        let owner = Uuid::new_v4();
        assert!(matches!(
            OwnerOnly.authorize(Some(Uuid::new_v4()), owner),
            Err(CatalogError::Forbidden(_))
        ));
        assert!(matches!(
            OwnerOnly.authorize(None, owner),
            Err(CatalogError::Forbidden(_))
        ));
    }
}
