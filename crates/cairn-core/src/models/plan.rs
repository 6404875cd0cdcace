//! Plan model definition: the root persisted aggregate.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Classification, Phase, Step, StepStatus};

/// Current document schema tag.
pub const PLAN_SCHEMA: &str = "plan-state-v2";

/// Iteration counters for the outer work loop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LoopState {
    /// Iterations consumed so far
    #[serde(default)]
    pub iteration: u32,

    /// Budget fixed by the plan's route at creation time
    #[serde(default)]
    pub max_iterations: u32,
}

fn epoch() -> Timestamp {
    Timestamp::UNIX_EPOCH
}

fn default_schema() -> String {
    PLAN_SCHEMA.to_string()
}

/// The root aggregate tracking one orchestration task.
///
/// Exactly one plan may be active per workspace; a workspace with no plan
/// document has no active plan. Unknown fields are preserved across a
/// load/save round trip so newer documents survive older binaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Document schema tag
    #[serde(rename = "$schema", default = "default_schema")]
    pub schema: String,

    /// Opaque unique token identifying this plan
    pub plan_id: String,

    /// Free-text task description the plan was created for
    #[serde(default)]
    pub task: String,

    /// Workflow classification fixed at creation
    pub classification: Classification,

    /// Ordered phases owning the steps
    #[serde(default)]
    pub phases: Vec<Phase>,

    /// Steps keyed by identifier; key order is lexical, never numeric
    #[serde(default)]
    pub steps: BTreeMap<String, Step>,

    /// Outer loop iteration counters and budget
    #[serde(default)]
    pub loop_state: LoopState,

    /// Version of the engine that created the document
    #[serde(default)]
    pub version: String,

    /// Timestamp when the plan was created (UTC)
    #[serde(default = "epoch")]
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    #[serde(default = "epoch")]
    pub updated_at: Timestamp,

    /// Fields this engine does not know about, carried verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Plan {
    /// Create a fresh plan for a classified task.
    pub fn new(task: impl Into<String>, classification: Classification) -> Self {
        let now = Timestamp::now();
        let route = classification.route;
        Self {
            schema: default_schema(),
            plan_id: generate_plan_id(now),
            task: task.into(),
            classification,
            phases: Vec::new(),
            steps: BTreeMap::new(),
            loop_state: LoopState {
                iteration: 0,
                max_iterations: route.max_iterations(),
            },
            version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: now,
            updated_at: now,
            extra: serde_json::Map::new(),
        }
    }

    /// Age of the plan relative to `now`, measured from the last
    /// modification.
    pub fn age(&self, now: Timestamp) -> jiff::SignedDuration {
        now.duration_since(self.updated_at)
    }

    /// True iff the plan has at least one step and every step completed.
    pub fn is_completed(&self) -> bool {
        !self.steps.is_empty()
            && self
                .steps
                .values()
                .all(|s| s.status == StepStatus::Completed)
    }

    /// Mark the plan as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

/// Opaque, collision-resistant plan identifier.
///
/// The per-process sequence keeps ids unique even when several plans are
/// created within the same millisecond.
fn generate_plan_id(now: Timestamp) -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    format!(
        "plan-{}-{}-{seq}",
        now.as_millisecond(),
        std::process::id()
    )
}

/// Why a plan left the active slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveReason {
    /// Replaced by a new plan for an unrelated task
    Superseded,

    /// Exceeded its route-specific staleness threshold
    Stale,

    /// An explicit orchestration directive forced a reset
    OrchestratorDirective,

    /// Archived on request
    Manual,
}

impl ArchiveReason {
    /// Convert to the wire string used in archive records.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveReason::Superseded => "superseded",
            ArchiveReason::Stale => "stale",
            ArchiveReason::OrchestratorDirective => "orchestrator_directive",
            ArchiveReason::Manual => "manual",
        }
    }
}

/// Immutable copy of a superseded plan, written once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchiveRecord {
    /// When the plan was archived (UTC)
    pub archived_at: Timestamp,

    /// Why the plan was archived
    pub reason: ArchiveReason,

    /// The full plan document at the moment of archival
    pub plan: Plan,
}
