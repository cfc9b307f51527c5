//! Storage backends.

pub mod filesystem;

pub use filesystem::FilesystemBackend;
