//! Builder for creating and configuring Orchestrator instances.

use std::path::{Path, PathBuf};

use super::Orchestrator;
use crate::{
    error::{OrchestratorError, Result},
    store::PlanStore,
};

/// Default file name for the active plan document.
pub const STATE_FILE_NAME: &str = "plan-state.json";

/// Builder for creating and configuring Orchestrator instances.
#[derive(Debug, Clone, Default)]
pub struct OrchestratorBuilder {
    workspace_dir: Option<PathBuf>,
    state_file: Option<PathBuf>,
    archive_dir: Option<PathBuf>,
}

impl OrchestratorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the workspace directory the plan belongs to.
    ///
    /// If not specified, the current working directory is used. The active
    /// plan document defaults to `<workspace>/.cairn/plan-state.json`.
    pub fn with_workspace_dir<P: AsRef<Path>>(mut self, dir: Option<P>) -> Self {
        if let Some(dir) = dir {
            self.workspace_dir = Some(dir.as_ref().to_path_buf());
        }
        self
    }

    /// Sets a custom path for the active plan document.
    pub fn with_state_file<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.state_file = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets a custom archive directory.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/cairn/archive` or `~/.local/share/cairn/archive`.
    pub fn with_archive_dir<P: AsRef<Path>>(mut self, dir: Option<P>) -> Self {
        if let Some(dir) = dir {
            self.archive_dir = Some(dir.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured orchestrator instance.
    ///
    /// # Errors
    ///
    /// Returns `OrchestratorError::FileSystem` if the workspace cannot be
    /// resolved, or `OrchestratorError::XdgDirectory` if no archive
    /// directory can be placed.
    pub fn build(self) -> Result<Orchestrator> {
        let state_path = if let Some(path) = self.state_file {
            path
        } else {
            let workspace = match self.workspace_dir {
                Some(dir) => dir,
                None => std::env::current_dir()
                    .map_err(|e| OrchestratorError::file_system(PathBuf::from("."), e))?,
            };
            workspace.join(".cairn").join(STATE_FILE_NAME)
        };

        let archive_dir = if let Some(dir) = self.archive_dir {
            dir
        } else {
            Self::default_archive_dir()?
        };

        Ok(Orchestrator::new(PlanStore::new(state_path, archive_dir)))
    }

    /// Returns the default archive directory following XDG Base Directory
    /// specification.
    fn default_archive_dir() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("cairn")
            .create_data_directory("archive")
            .map_err(|e| OrchestratorError::XdgDirectory(e.to_string()))
    }
}
