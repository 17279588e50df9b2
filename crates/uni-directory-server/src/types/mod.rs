//! API types.

pub mod error;
pub mod response;

pub use error::{ApiError, ApiResult};
pub use response::{ErrorBody, ExploreResponse};
