pub mod fixtures;
pub mod server;

pub use server::TestServer;
