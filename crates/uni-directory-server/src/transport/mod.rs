//! Transport layer for the explore API.

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{router, HttpTransport, ServerState};
