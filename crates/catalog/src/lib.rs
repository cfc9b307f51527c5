//! Catalog services: the sheet catalog, user directory and their
//! collaborators.
//!
//! This crate owns the business rules; persistence stays behind the
//! `MetadataStore` trait and transport concerns stay in the server crate.

pub mod error;
pub mod password;
pub mod policy;
pub mod resolver;
pub mod sheets;
pub mod users;
pub mod view;

pub use error::{CatalogError, CatalogResult};
pub use password::{Argon2Hasher, PasswordHasher};
pub use policy::{AllowAll, MutationPolicy, OwnerOnly};
pub use resolver::OwnerResolver;
pub use sheets::{NewSheet, SheetCatalog, SheetPdf, SheetUpdate};
pub use users::{NewUser, ProfileUpdate, UserDirectory, UserUpdate};
pub use view::{SheetView, UserProfileView, UserView};
