//! Durable plan-state store.
//!
//! One JSON document at a well-known per-workspace path holds the active
//! plan; an archive directory holds immutable timestamped copies of every
//! superseded plan. Every write builds the full document in memory, writes
//! it to a temporary file in the same directory, and atomically renames it
//! into place. A reader can never observe a partially-written document and
//! the store never truncates in place.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use jiff::Timestamp;
use log::{info, warn};
use tempfile::NamedTempFile;

use crate::error::{OrchestratorError, Result};
use crate::models::{ArchiveReason, ArchiveRecord, Plan};

/// Owns the active slot and the archive for one workspace.
#[derive(Debug, Clone)]
pub struct PlanStore {
    state_path: PathBuf,
    archive_dir: PathBuf,
}

impl PlanStore {
    /// Create a store over explicit paths. Parent directories are created
    /// lazily on first write, not here.
    pub fn new(state_path: impl Into<PathBuf>, archive_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_path: state_path.into(),
            archive_dir: archive_dir.into(),
        }
    }

    /// Path of the active plan document.
    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    /// Directory holding immutable archive records.
    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    /// Load the active plan.
    ///
    /// A missing file is a valid state and returns `None`. A document that
    /// fails to parse is treated as absent, never as a fatal error; the
    /// corruption is logged and the caller proceeds as if no plan existed.
    pub fn load(&self) -> Result<Option<Plan>> {
        let raw = match fs::read_to_string(&self.state_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(OrchestratorError::file_system(&self.state_path, e)),
        };

        match serde_json::from_str::<Plan>(&raw) {
            Ok(plan) => Ok(Some(plan)),
            Err(e) => {
                warn!(
                    "plan document at {} is unreadable ({e}); treating as absent",
                    self.state_path.display()
                );
                Ok(None)
            }
        }
    }

    /// Persist the plan into the active slot atomically.
    pub fn save(&self, plan: &Plan) -> Result<()> {
        let document = serde_json::to_string_pretty(plan)?;
        atomic_write(&self.state_path, &document)
    }

    /// Archive the active plan and clear the slot.
    ///
    /// Idempotent: archiving an absent (or unreadable) plan is a no-op that
    /// returns `None`. The archive record is written before the active slot
    /// is touched, so a crash in between leaves at worst a duplicate
    /// archive, never a lost plan.
    pub fn archive(&self, reason: ArchiveReason) -> Result<Option<PathBuf>> {
        let Some(plan) = self.load()? else {
            return Ok(None);
        };

        let archived_at = Timestamp::now();
        let record = ArchiveRecord {
            archived_at,
            reason,
            plan,
        };

        let file_name = format!(
            "plan-{}-{}.json",
            record.plan.plan_id,
            archived_at.as_millisecond()
        );
        let archive_path = self.archive_dir.join(file_name);
        let document = serde_json::to_string_pretty(&record)?;
        atomic_write(&archive_path, &document)?;

        match fs::remove_file(&self.state_path) {
            Ok(()) => {}
            // A racing invocation may have cleared the slot already.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(OrchestratorError::file_system(&self.state_path, e)),
        }

        info!(
            "archived plan {} ({}) to {}",
            record.plan.plan_id,
            reason.as_str(),
            archive_path.display()
        );
        Ok(Some(archive_path))
    }
}

/// Write content to `path` via a temporary file in the same directory and a
/// single atomic rename. The parent directory is created if needed.
fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| OrchestratorError::file_system(parent, e))?;

    let mut tmp =
        NamedTempFile::new_in(parent).map_err(|e| OrchestratorError::file_system(parent, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| OrchestratorError::file_system(path, e))?;
    tmp.flush()
        .map_err(|e| OrchestratorError::file_system(path, e))?;
    tmp.persist(path)
        .map_err(|e| OrchestratorError::file_system(path, e.error))?;
    Ok(())
}
