//! Core library for the Cairn plan-state orchestration engine.
//!
//! This crate maintains a single durable plan document per workspace and
//! the logic around it: classifying task descriptions into workflow routes,
//! deciding when the active plan is stale or superseded, detecting drift
//! between a step's recorded contract and the code that was actually
//! written, and projecting progress summaries for status surfaces.
//!
//! # Architecture
//!
//! - **Store** ([`store`]): one JSON document per workspace, written via
//!   atomic rename; corrupt or missing documents read as "no active plan"
//! - **Classifier** ([`classifier`]): pure text heuristics mapping a task
//!   description to a route and iteration budget
//! - **Lifecycle** ([`lifecycle`]): staleness, continuation, and archival
//!   decisions for the active slot
//! - **Drift** ([`drift`]): export scanning and spec comparison
//! - **Orchestrator** ([`orchestrator`]): the async facade tying the pieces
//!   together; the only component that mutates the persisted plan
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cairn_core::{OrchestratorBuilder, params::InitPlan};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = OrchestratorBuilder::new()
//!     .with_workspace_dir(Some("/home/user/project"))
//!     .build()?;
//!
//! let plan = orchestrator
//!     .init_plan(&InitPlan {
//!         task: "Implement OAuth login".to_string(),
//!         complexity: 7,
//!         route: None,
//!     })
//!     .await?;
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod display;
pub mod drift;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod orchestrator;
pub mod params;
pub mod store;

// Re-export commonly used types
pub use classifier::{classify, is_orchestrator_directive, Classifier, TaskClass};
pub use display::{CompactStatus, LocalDateTime, OperationStatus};
pub use drift::DriftDetector;
pub use error::{OrchestratorError, Result};
pub use lifecycle::{Disposition, LifecycleManager};
pub use models::{
    ArchiveReason, Classification, Drift, Phase, Plan, ProgressSummary, Route, Step, StepStatus,
};
pub use orchestrator::{Orchestrator, OrchestratorBuilder, TaskOutcome};
pub use params::{AddPhase, AddStep, CheckStep, InitPlan, SetSpec, SubmitTask, UpdateStep};
pub use store::PlanStore;
