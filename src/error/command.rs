//! External command errors

use super::DeployError;

/// Creates a tool not found error
pub fn tool_not_found(tool: impl Into<String>) -> DeployError {
    DeployError::ToolNotFound { tool: tool.into() }
}

/// Creates a spawn failed error
pub fn spawn_failed(command: impl Into<String>, reason: impl Into<String>) -> DeployError {
    DeployError::CommandSpawnFailed {
        command: command.into(),
        reason: reason.into(),
    }
}

/// Creates a command failed error
pub fn failed(command: impl Into<String>, status: impl Into<String>) -> DeployError {
    DeployError::CommandFailed {
        command: command.into(),
        status: status.into(),
    }
}
