//! Request handlers.

pub mod common;
pub mod files;
pub mod health;
pub mod sheets;
pub mod users;

pub use files::{delete_file, download_file, list_files, upload_file};
pub use health::health_check;
pub use sheets::{
    add_favorite, advanced_search, create_sheet, delete_sheet, get_pdf, get_sheet, is_favorite,
    list_artists, list_by_artist, list_by_genre, list_by_instrument, list_favorites, list_genres,
    list_instruments, list_owned, list_public, list_recent, remove_favorite, replace_file, search,
    update_sheet,
};
pub use users::{
    create_user, delete_user, get_profile, get_user, update_profile, update_user,
    user_public_sheets,
};
