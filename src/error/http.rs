//! HTTP errors

use super::DeployError;

/// Creates a request failed error
pub fn request_failed(url: impl Into<String>, reason: impl Into<String>) -> DeployError {
    DeployError::HttpRequestFailed {
        url: url.into(),
        reason: reason.into(),
    }
}

/// Creates a non-success status error
pub fn bad_status(url: impl Into<String>, status: u16) -> DeployError {
    DeployError::HttpStatus {
        url: url.into(),
        status,
    }
}
