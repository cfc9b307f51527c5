//! User directory: registration, profiles, account maintenance.

use crate::error::{CatalogError, CatalogResult};
use crate::password::PasswordHasher;
use crate::resolver::OwnerResolver;
use crate::view::{SheetView, UserProfileView, UserView};
use scorebook_core::SortKey;
use scorebook_metadata::{MetadataStore, UserRow};
use serde::Deserialize;
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

/// Registration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
}

/// Partial account update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
}

/// Profile-only update: display name and bio.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
}

/// User directory service.
pub struct UserDirectory {
    store: Arc<dyn MetadataStore>,
    hasher: Arc<dyn PasswordHasher>,
    resolver: OwnerResolver,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn MetadataStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        let resolver = OwnerResolver::new(Arc::clone(&store));
        Self {
            store,
            hasher,
            resolver,
        }
    }

    /// Register a new user. The email must be unused; the password must meet
    /// the strength policy.
    pub async fn register(&self, new: NewUser) -> CatalogResult<UserView> {
        validate_name(&new.name)?;
        validate_email(&new.email)?;
        validate_password(&new.password)?;

        let now = OffsetDateTime::now_utc();
        let row = UserRow {
            user_id: Uuid::new_v4(),
            name: new.name.trim().to_string(),
            email: new.email.trim().to_lowercase(),
            password_hash: self.hasher.hash(&new.password)?,
            bio: new.bio.filter(|b| !b.trim().is_empty()),
            created_at: now,
            updated_at: now,
        };

        self.store.create_user(&row).await?;
        info!(user_id = %row.user_id, "registered user");
        Ok(UserView::from(row))
    }

    /// Fetch a user by id.
    pub async fn get_user(&self, user_id: Uuid) -> CatalogResult<UserView> {
        Ok(UserView::from(self.require_user(user_id).await?))
    }

    /// Apply a partial account update. Email uniqueness is re-checked; a new
    /// password goes through the strength policy and the hasher.
    pub async fn update_user(&self, user_id: Uuid, update: UserUpdate) -> CatalogResult<UserView> {
        let mut row = self.require_user(user_id).await?;

        if let Some(name) = update.name {
            validate_name(&name)?;
            row.name = name.trim().to_string();
        }
        if let Some(email) = update.email {
            validate_email(&email)?;
            row.email = email.trim().to_lowercase();
        }
        if let Some(password) = update.password {
            validate_password(&password)?;
            row.password_hash = self.hasher.hash(&password)?;
        }
        if let Some(bio) = update.bio {
            row.bio = if bio.trim().is_empty() { None } else { Some(bio) };
        }
        row.updated_at = OffsetDateTime::now_utc();

        self.store.update_user(&row).await?;
        Ok(UserView::from(row))
    }

    /// Delete a user account.
    ///
    /// Owned sheets are not cascaded; deleting an account that still owns
    /// sheets would strand them without an owner, so it is rejected.
    pub async fn delete_user(&self, user_id: Uuid) -> CatalogResult<()> {
        self.require_user(user_id).await?;

        let owned = self.store.list_owned(user_id).await?;
        if !owned.is_empty() {
            return Err(CatalogError::InvalidOperation(format!(
                "user {user_id} still owns {} sheet(s); delete or transfer them first",
                owned.len()
            )));
        }

        self.store.delete_user(user_id).await?;
        info!(user_id = %user_id, "deleted user");
        Ok(())
    }

    /// Assemble the profile view: the user plus owned and favorited sheets,
    /// newest first.
    pub async fn get_profile(&self, user_id: Uuid) -> CatalogResult<UserProfileView> {
        let row = self.require_user(user_id).await?;

        let owned_ids = self.store.list_owned(user_id).await?;
        let mut owned = self.store.list_sheets_by_ids(&owned_ids).await?;
        crate::sheets::sort_rows(&mut owned, SortKey::Recent);
        let owned_sheets = owned
            .into_iter()
            .map(|r| SheetView::from_row(r, user_id))
            .collect();

        let favorite_ids = self.store.list_favorites(user_id).await?;
        let mut favorites = self.store.list_sheets_by_ids(&favorite_ids).await?;
        crate::sheets::sort_rows(&mut favorites, SortKey::Recent);
        let favorite_sheets = self
            .resolver
            .resolve(favorites)
            .await?
            .into_iter()
            .map(|(r, owner)| SheetView::from_row(r, owner))
            .collect();

        Ok(UserProfileView {
            user: UserView::from(row),
            owned_sheets,
            favorite_sheets,
        })
    }

    /// Update the profile fields (display name, bio).
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> CatalogResult<UserView> {
        self.update_user(
            user_id,
            UserUpdate {
                name: update.name,
                bio: update.bio,
                ..UserUpdate::default()
            },
        )
        .await
    }

    async fn require_user(&self, user_id: Uuid) -> CatalogResult<UserRow> {
        self.store
            .get_user(user_id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("user {user_id} not found")))
    }
}

fn validate_name(name: &str) -> CatalogResult<()> {
    if name.trim().is_empty() {
        return Err(CatalogError::Validation("name must not be blank".to_string()));
    }
    Ok(())
}

fn validate_email(email: &str) -> CatalogResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CatalogError::Validation("email must not be blank".to_string()));
    }
    // Not a full RFC check; the store's uniqueness constraint is the real gate.
    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(CatalogError::Validation(format!("invalid email: {email}")));
    }
    Ok(())
}

/// Password policy: at least 8 characters with one digit, one lowercase and
/// one uppercase letter.
fn validate_password(password: &str) -> CatalogResult<()> {
    if password.chars().count() < 8 {
        return Err(CatalogError::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(CatalogError::Validation(
            "password must contain a digit".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return Err(CatalogError::Validation(
            "password must contain a lowercase letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(CatalogError::Validation(
            "password must contain an uppercase letter".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_policy_accepts_strong() {
        assert!(validate_password("Abcdef12").is_ok());
    }

    #[test]
    fn password_policy_rejects_weak() {
        assert!(validate_password("Ab1").is_err()); // too short
        assert!(validate_password("abcdefg1").is_err()); // no uppercase
        assert!(validate_password("ABCDEFG1").is_err()); // no lowercase
        assert!(validate_password("Abcdefgh").is_err()); // no digit
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@leading").is_err());
        assert!(validate_email("trailing@").is_err());
    }
}
