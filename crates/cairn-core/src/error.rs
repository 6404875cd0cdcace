//! Error types for the orchestration engine.
//!
//! The taxonomy deliberately keeps most conditions out of the error type:
//! absence of a plan is a valid state, corruption is recovered by the store,
//! classification ambiguity is resolved by the tie-break rule, and drift is
//! a reported condition. What remains splits into environment failures
//! (I/O, serialization on write) that must surface as command failures, and
//! domain conditions (no active plan, unknown step) that callers report
//! without failing the external driver's workflow.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all orchestrator operations.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Serialization/deserialization errors on write
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// No plan exists in the active slot
    #[error("No active plan in this workspace")]
    NoActivePlan,
    /// Step not found for the given identifier
    #[error("Step '{id}' not found in the active plan")]
    StepNotFound { id: String },
    /// Phase not found for the given identifier
    #[error("Phase '{id}' not found in the active plan")]
    PhaseNotFound { id: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl OrchestratorError {
    /// Creates a file system error with path context.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Creates an input validation error.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True iff the error is an unrecoverable environment failure.
    ///
    /// Only these propagate as non-zero command exits; domain conditions
    /// such as a missing plan or an unknown step degrade gracefully so the
    /// external driver's workflow is never interrupted.
    pub fn is_environment(&self) -> bool {
        matches!(
            self,
            OrchestratorError::FileSystem { .. }
                | OrchestratorError::Serialization { .. }
                | OrchestratorError::XdgDirectory(_)
                | OrchestratorError::Configuration { .. }
        )
    }
}

/// Result type alias for orchestrator operations
pub type Result<T> = std::result::Result<T, OrchestratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_errors_are_flagged() {
        let io = OrchestratorError::file_system(
            "/nope",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(io.is_environment());

        assert!(!OrchestratorError::NoActivePlan.is_environment());
        assert!(!OrchestratorError::StepNotFound { id: "s1".into() }.is_environment());
        assert!(!OrchestratorError::invalid_input("status", "bad").is_environment());
    }
}
