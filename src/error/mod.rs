//! Error types and handling for deis-deploy
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`env`]: Environment variable errors
//! - [`config`]: Configuration file errors
//! - [`command`]: External command errors
//! - [`http`]: HTTP errors (install script, notifications)

pub mod command;
pub mod config;
pub mod env;
pub mod http;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for deployment operations
#[derive(Error, Diagnostic, Debug)]
pub enum DeployError {
    // Environment errors
    #[error("Required environment variable {name} is not set")]
    #[diagnostic(
        code(deis_deploy::env::missing),
        help("Export {name} in the CI environment before running the deploy")
    )]
    MissingEnvVar { name: String },

    #[error("Invalid value for environment variable {name}: {reason}")]
    #[diagnostic(code(deis_deploy::env::invalid))]
    InvalidEnvVar { name: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(deis_deploy::config::not_found),
        help("Pass an existing file with --config or drop the flag to use defaults")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(deis_deploy::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(deis_deploy::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(deis_deploy::config::invalid))]
    ConfigInvalid { message: String },

    // External command errors
    #[error("Required tool not found on PATH: {tool}")]
    #[diagnostic(
        code(deis_deploy::command::tool_not_found),
        help("Install {tool} on the build machine")
    )]
    ToolNotFound { tool: String },

    #[error("Failed to start command `{command}`: {reason}")]
    #[diagnostic(code(deis_deploy::command::spawn_failed))]
    CommandSpawnFailed { command: String, reason: String },

    #[error("Command `{command}` failed with {status}")]
    #[diagnostic(code(deis_deploy::command::failed))]
    CommandFailed { command: String, status: String },

    // HTTP errors
    #[error("HTTP request to {url} failed: {reason}")]
    #[diagnostic(code(deis_deploy::http::request_failed))]
    HttpRequestFailed { url: String, reason: String },

    #[error("HTTP request to {url} returned status {status}")]
    #[diagnostic(code(deis_deploy::http::bad_status))]
    HttpStatus { url: String, status: u16 },

    // CLI errors
    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(deis_deploy::cli::unsupported_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnsupportedShell { shell: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(deis_deploy::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for DeployError {
    fn from(err: std::io::Error) -> Self {
        DeployError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for DeployError {
    fn from(err: serde_yaml::Error) -> Self {
        DeployError::ConfigParseFailed {
            path: "<inline>".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for DeployError {
    fn from(err: serde_json::Error) -> Self {
        DeployError::IoError {
            message: format!("JSON serialization failed: {err}"),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, DeployError>;
