//! Data models for plans, phases, steps, and their classification.
//!
//! This module contains the core domain models of the plan-state engine.
//! Display implementations live in [`crate::display::models`] to keep data
//! structures separate from presentation logic.
//!
//! The persisted document is a single JSON file per workspace; every type
//! here tolerates absent optional fields on load, and [`Plan`] carries
//! unknown fields through a round trip untouched.

pub mod classification;
pub mod drift;
pub mod phase;
pub mod plan;
pub mod status;
pub mod step;
pub mod summary;

#[cfg(test)]
mod tests;

// Re-export all public types at the models level
pub use classification::{Classification, Route};
pub use drift::{Drift, DriftItem, DriftKind};
pub use phase::Phase;
pub use plan::{ArchiveReason, ArchiveRecord, LoopState, Plan, PLAN_SCHEMA};
pub use status::{ExecutionMode, PhaseStatus, StepStatus};
pub use step::{Observed, Step, StepSpec};
pub use summary::ProgressSummary;
