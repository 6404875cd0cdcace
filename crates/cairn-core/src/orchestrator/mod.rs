//! High-level orchestrator API over the plan-state store.
//!
//! The [`Orchestrator`] is the only component that mutates the persisted
//! plan. Every operation is a complete, independent transaction: it
//! re-reads the current document, applies one change, and persists through
//! the store's atomic-rename primitive. The pure components (classifier,
//! lifecycle manager, drift detector) are consulted as values and never
//! touch disk themselves.
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │  plan_ops /     │    │  LifecycleManager │    │    PlanStore    │
//! │  step_ops       │───▶│  Classifier       │───▶│ (atomic rename) │
//! │  (transactions) │    │  DriftDetector    │    │                 │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! All methods are async and push the file I/O through
//! `tokio::task::spawn_blocking`, so a caller embedded in an async driver
//! never blocks its runtime on disk access.

use crate::drift::DriftDetector;
use crate::lifecycle::LifecycleManager;
use crate::store::PlanStore;

pub mod builder;
pub mod plan_ops;
pub mod step_ops;


pub use builder::OrchestratorBuilder;
pub use plan_ops::TaskOutcome;

/// Main orchestrator interface for managing the active plan.
pub struct Orchestrator {
    pub(crate) store: PlanStore,
    pub(crate) lifecycle: LifecycleManager,
    pub(crate) detector: DriftDetector,
}

impl Orchestrator {
    /// Creates a new orchestrator over the given store.
    pub(crate) fn new(store: PlanStore) -> Self {
        Self {
            store,
            lifecycle: LifecycleManager::new(),
            detector: DriftDetector::new(),
        }
    }

    /// The store this orchestrator operates on.
    pub fn store(&self) -> &PlanStore {
        &self.store
    }
}
