//! Error types for the explore API.
//!
//! Callers only ever see two messages: "University not found" for a failed
//! lookup and a generic internal error for everything else. Causes are
//! logged, never returned.

use uni_directory::DirectoryError;

use super::response::ErrorBody;

/// HTTP status codes used by the API.
pub mod status_codes {
    pub const NOT_FOUND: u16 = 404;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

/// Client-facing messages.
pub const NOT_FOUND_MESSAGE: &str = "University not found";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// All errors that can occur while serving a request.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("University not found: {country}/{slug}")]
    UniversityNotFound { country: String, slug: String },

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        use status_codes::*;
        match self {
            ApiError::UniversityNotFound { .. } => NOT_FOUND,
            ApiError::InternalError(_)
            | ApiError::Directory(_)
            | ApiError::Io(_) => INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show a client.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::UniversityNotFound { .. } => NOT_FOUND_MESSAGE,
            _ => INTERNAL_ERROR_MESSAGE,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::UniversityNotFound { .. })
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.public_message().to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinct() {
        let err = ApiError::UniversityNotFound {
            country: "canada".to_string(),
            slug: "nonexistent".to_string(),
        };
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_body().error, "University not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_internal_errors_hide_cause() {
        let err = ApiError::from(DirectoryError::Catalog("secret path".to_string()));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_body().error, "Internal server error");
        assert!(!err.public_message().contains("secret"));
    }
}
