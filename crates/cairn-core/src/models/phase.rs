//! Phase model definition.

use serde::{Deserialize, Serialize};

use super::{ExecutionMode, PhaseStatus};

/// An ordered group of steps within a plan.
///
/// A step belongs to exactly one phase; the phase records the owned step
/// identifiers in execution order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Phase {
    /// Identifier unique within the plan
    pub phase_id: String,

    /// Human-readable title of the phase
    #[serde(default)]
    pub title: String,

    /// How the steps in this phase are meant to run
    #[serde(default)]
    pub execution_mode: ExecutionMode,

    /// Current status of the phase
    #[serde(default)]
    pub status: PhaseStatus,

    /// Step identifiers owned by this phase, in execution order
    #[serde(default)]
    pub step_ids: Vec<String>,
}

impl Phase {
    /// Create a fresh pending phase.
    pub fn new(phase_id: impl Into<String>, title: impl Into<String>, mode: ExecutionMode) -> Self {
        Self {
            phase_id: phase_id.into(),
            title: title.into(),
            execution_mode: mode,
            status: PhaseStatus::Pending,
            step_ids: Vec::new(),
        }
    }
}
