//! Plan-level operations: initialization, task submission, archival.

use std::path::PathBuf;

use jiff::Timestamp;
use log::info;
use tokio::task;

use super::Orchestrator;
use crate::{
    classifier,
    error::{OrchestratorError, Result},
    lifecycle::Disposition,
    models::{ArchiveReason, Classification, Plan, ProgressSummary},
    params::{InitPlan, SubmitTask},
};

/// Result of submitting a task description against the active slot.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    /// The prompt did not warrant any plan change.
    Deferred,

    /// No plan existed; a fresh one was created.
    Created(Plan),

    /// The current plan absorbs the prompt unchanged.
    Retained(Plan),

    /// The current plan was archived and replaced by a fresh one.
    Replaced { archived: String, plan: Plan },

    /// The current plan was archived with no replacement.
    Archived { archived: String },
}

impl TaskOutcome {
    /// The plan now occupying the active slot, if any.
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            TaskOutcome::Created(plan)
            | TaskOutcome::Retained(plan)
            | TaskOutcome::Replaced { plan, .. } => Some(plan),
            TaskOutcome::Deferred | TaskOutcome::Archived { .. } => None,
        }
    }
}

impl Orchestrator {
    /// Creates a new plan for the given task, superseding any active plan.
    ///
    /// The route comes from the explicit parameter when given, otherwise
    /// from classifying the task description. An explicit complexity always
    /// overrides the route default.
    pub async fn init_plan(&self, params: &InitPlan) -> Result<Plan> {
        if params.task.trim().is_empty() {
            return Err(OrchestratorError::invalid_input(
                "task",
                "task description must not be empty",
            ));
        }

        let classification = match params.parse_route()? {
            Some(route) => Classification::with_complexity(route, params.complexity),
            None => match classifier::classify(&params.task).classification() {
                Some(c) => Classification::with_complexity(c.route, params.complexity),
                None => {
                    return Err(OrchestratorError::invalid_input(
                        "task",
                        "task description does not classify to a route; pass one explicitly",
                    ))
                }
            },
        };

        let store = self.store.clone();
        let task_text = params.task.clone();

        task::spawn_blocking(move || {
            store.archive(ArchiveReason::Superseded)?;
            let plan = Plan::new(task_text, classification);
            store.save(&plan)?;
            info!("initialized plan {}", plan.plan_id);
            Ok(plan)
        })
        .await
        .map_err(|e| OrchestratorError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Submits a raw task description against the active slot.
    ///
    /// This is the hook-boundary entry point: the lifecycle manager decides
    /// whether the prompt continues the current plan, supersedes it, or is
    /// ignored, and the store is updated accordingly. Any outcome leaves the
    /// active slot in a consistent state.
    pub async fn submit_task(&self, params: &SubmitTask) -> Result<TaskOutcome> {
        let store = self.store.clone();
        let lifecycle = self.lifecycle.clone();
        let task_text = params.task.clone();

        task::spawn_blocking(move || {
            let current = store.load()?;
            let disposition = lifecycle.assess(current.as_ref(), &task_text, Timestamp::now());

            match disposition {
                Disposition::Defer => Ok(TaskOutcome::Deferred),
                Disposition::Initialize(classification) => {
                    let plan = Plan::new(&task_text, classification);
                    store.save(&plan)?;
                    info!("created plan {} for new task", plan.plan_id);
                    Ok(TaskOutcome::Created(plan))
                }
                Disposition::Retain => match current {
                    Some(plan) => Ok(TaskOutcome::Retained(plan)),
                    None => Ok(TaskOutcome::Deferred),
                },
                Disposition::Archive { reason, then } => {
                    let archived = current.map(|p| p.plan_id).unwrap_or_default();
                    store.archive(reason)?;
                    match then {
                        Some(classification) => {
                            let plan = Plan::new(&task_text, classification);
                            store.save(&plan)?;
                            info!("archived plan {archived}, created {}", plan.plan_id);
                            Ok(TaskOutcome::Replaced { archived, plan })
                        }
                        None => Ok(TaskOutcome::Archived { archived }),
                    }
                }
            }
        })
        .await
        .map_err(|e| OrchestratorError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves the active plan, if any.
    pub async fn plan(&self) -> Result<Option<Plan>> {
        let store = self.store.clone();

        task::spawn_blocking(move || store.load())
            .await
            .map_err(|e| OrchestratorError::Configuration {
                message: format!("Task join error: {e}"),
            })?
    }

    /// Projects progress counters from the active plan.
    pub async fn progress(&self) -> Result<Option<ProgressSummary>> {
        Ok(self.plan().await?.as_ref().map(ProgressSummary::from))
    }

    /// Archives the active plan, leaving the active slot empty.
    ///
    /// Returns the archive file path, or `None` when no plan was active.
    pub async fn archive_plan(&self, reason: ArchiveReason) -> Result<Option<PathBuf>> {
        let store = self.store.clone();

        task::spawn_blocking(move || store.archive(reason))
            .await
            .map_err(|e| OrchestratorError::Configuration {
                message: format!("Task join error: {e}"),
            })?
    }
}
