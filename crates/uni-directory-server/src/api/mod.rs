//! Query operations shared by the HTTP API, CLI and REPL.

pub mod explore;

pub use explore::{explore, ExploreParams, ExploreRequest};
