//! University directory server — HTTP explore API, CLI and REPL.

pub mod api;
pub mod config;
pub mod render;
pub mod repl;
pub mod transport;
pub mod types;

pub use api::{explore, ExploreParams};
pub use config::open_directory;
#[cfg(feature = "http")]
pub use transport::HttpTransport;
