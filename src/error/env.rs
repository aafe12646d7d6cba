//! Environment variable errors

use super::DeployError;

/// Creates a missing environment variable error
pub fn missing(name: impl Into<String>) -> DeployError {
    DeployError::MissingEnvVar { name: name.into() }
}

/// Creates an invalid environment variable error
pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> DeployError {
    DeployError::InvalidEnvVar {
        name: name.into(),
        reason: reason.into(),
    }
}
