//! Repository trait definitions.
//!
//! Each entity gets its own repository trait; the combined [`crate::MetadataStore`]
//! trait requires all of them plus migration and health checking.

pub mod relations;
pub mod sheets;
pub mod users;

pub use relations::RelationRepo;
pub use sheets::SheetRepo;
pub use users::UserRepo;
