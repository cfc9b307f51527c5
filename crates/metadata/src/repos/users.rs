//! User repository trait.

use crate::error::MetadataResult;
use crate::models::UserRow;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository for user records.
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Insert a new user. Fails with `AlreadyExists` if the email is taken.
    async fn create_user(&self, user: &UserRow) -> MetadataResult<()>;

    /// Get a user by id.
    async fn get_user(&self, user_id: Uuid) -> MetadataResult<Option<UserRow>>;

    /// Get a user by email.
    async fn get_user_by_email(&self, email: &str) -> MetadataResult<Option<UserRow>>;

    /// Check whether a user exists.
    async fn user_exists(&self, user_id: Uuid) -> MetadataResult<bool>;

    /// Update an existing user. Fails with `AlreadyExists` if the new email
    /// belongs to a different user.
    async fn update_user(&self, user: &UserRow) -> MetadataResult<()>;

    /// Delete a user by id. Fails with `NotFound` if absent.
    async fn delete_user(&self, user_id: Uuid) -> MetadataResult<()>;
}
