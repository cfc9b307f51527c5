//! Password hashing collaborator.

use crate::error::{CatalogError, CatalogResult};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHasher as _};

/// Hashes passwords for storage. A trait so tests can swap in a cheap
/// implementation.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> CatalogResult<String>;
}

/// Argon2id password hasher with default parameters.
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> CatalogResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CatalogError::Internal(format!("password hashing failed: {e}")))?;
        Ok(hash.to_string())
    }
}
