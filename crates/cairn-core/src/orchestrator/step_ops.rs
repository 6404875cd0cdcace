//! Phase and step operations for the Orchestrator.
//!
//! Every operation is load-mutate-save against the active document; the
//! store's atomic rename makes each one an all-or-nothing transaction.

use tokio::task;

use super::Orchestrator;
use crate::{
    error::{OrchestratorError, Result},
    models::{Drift, Phase, PhaseStatus, Plan, Step, StepSpec, StepStatus},
    params::{AddPhase, AddStep, CheckStep, SetSpec, UpdateStep},
};

impl Orchestrator {
    /// Adds a phase to the active plan.
    pub async fn add_phase(&self, params: &AddPhase) -> Result<Phase> {
        let mode = params.parse_mode()?;
        let store = self.store.clone();
        let phase_id = params.phase_id.clone();
        let title = params.title.clone();

        task::spawn_blocking(move || {
            let mut plan = store.load()?.ok_or(OrchestratorError::NoActivePlan)?;

            if plan.phases.iter().any(|p| p.phase_id == phase_id) {
                return Err(OrchestratorError::invalid_input(
                    "phase_id",
                    format!("phase '{phase_id}' already exists"),
                ));
            }

            let phase = Phase::new(phase_id, title, mode);
            plan.phases.push(phase.clone());
            plan.touch();
            store.save(&plan)?;
            Ok(phase)
        })
        .await
        .map_err(|e| OrchestratorError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Adds a step to a phase of the active plan.
    ///
    /// The phase must already exist; steps are never created unphased.
    pub async fn add_step(&self, params: &AddStep) -> Result<Step> {
        let store = self.store.clone();
        let step_id = params.step_id.clone();
        let title = params.title.clone();
        let phase_id = params.phase_id.clone();

        task::spawn_blocking(move || {
            let mut plan = store.load()?.ok_or(OrchestratorError::NoActivePlan)?;

            if plan.steps.contains_key(&step_id) {
                return Err(OrchestratorError::invalid_input(
                    "step_id",
                    format!("step '{step_id}' already exists"),
                ));
            }

            let phase = plan
                .phases
                .iter_mut()
                .find(|p| p.phase_id == phase_id)
                .ok_or(OrchestratorError::PhaseNotFound { id: phase_id })?;
            phase.step_ids.push(step_id.clone());

            let step = Step::new(title);
            plan.steps.insert(step_id, step.clone());
            plan.touch();
            store.save(&plan)?;
            Ok(step)
        })
        .await
        .map_err(|e| OrchestratorError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Updates a step's status and optional result text.
    ///
    /// The owning phase's status is rolled up from its steps: any step in
    /// flight marks the phase in progress, all steps completed marks it
    /// completed.
    pub async fn update_step(&self, params: &UpdateStep) -> Result<Step> {
        let status = params.validate()?;
        let store = self.store.clone();
        let step_id = params.step_id.clone();
        let result = params.result.clone();

        task::spawn_blocking(move || {
            let mut plan = store.load()?.ok_or(OrchestratorError::NoActivePlan)?;

            let step = plan
                .steps
                .get_mut(&step_id)
                .ok_or(OrchestratorError::StepNotFound {
                    id: step_id.clone(),
                })?;
            step.status = status;
            if let Some(result) = result {
                step.result = Some(result);
            }
            let step = step.clone();

            roll_up_phase_status(&mut plan, &step_id);
            plan.touch();
            store.save(&plan)?;
            Ok(step)
        })
        .await
        .map_err(|e| OrchestratorError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Records the expected contract for a step: the file it owns, the
    /// symbols it must export, and optional signatures.
    pub async fn set_step_spec(&self, params: &SetSpec) -> Result<Step> {
        let store = self.store.clone();
        let step_id = params.step_id.clone();
        let spec = StepSpec {
            file: params.file.clone(),
            exports: params.exports.clone(),
            signatures: params.signatures.clone(),
        };

        task::spawn_blocking(move || {
            let mut plan = store.load()?.ok_or(OrchestratorError::NoActivePlan)?;

            let step = plan
                .steps
                .get_mut(&step_id)
                .ok_or(OrchestratorError::StepNotFound { id: step_id })?;
            step.spec = Some(spec);
            let step = step.clone();

            plan.touch();
            store.save(&plan)?;
            Ok(step)
        })
        .await
        .map_err(|e| OrchestratorError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Compares a step's recorded contract against actual file content and
    /// persists the verdict on the step.
    pub async fn check_step(&self, params: &CheckStep) -> Result<Drift> {
        let store = self.store.clone();
        let detector = self.detector.clone();
        let step_id = params.step_id.clone();
        let content = params.content.clone();

        task::spawn_blocking(move || {
            let mut plan = store.load()?.ok_or(OrchestratorError::NoActivePlan)?;

            let step = plan
                .steps
                .get_mut(&step_id)
                .ok_or(OrchestratorError::StepNotFound { id: step_id })?;

            let drift = detector.check(step, &content);
            if let Some(spec) = &step.spec {
                step.actual = Some(detector.observe(&spec.file, &content));
            }
            step.drift = drift.clone();

            plan.touch();
            store.save(&plan)?;
            Ok(drift)
        })
        .await
        .map_err(|e| OrchestratorError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

/// Recomputes the status of the phase owning `step_id` from its steps.
fn roll_up_phase_status(plan: &mut Plan, step_id: &str) {
    let Some(phase_index) = plan
        .phases
        .iter()
        .position(|p| p.step_ids.iter().any(|id| id == step_id))
    else {
        return;
    };

    let statuses: Vec<StepStatus> = plan.phases[phase_index]
        .step_ids
        .iter()
        .filter_map(|id| plan.steps.get(id))
        .map(|s| s.status)
        .collect();

    let phase = &mut plan.phases[phase_index];
    if !statuses.is_empty() && statuses.iter().all(|s| *s == StepStatus::Completed) {
        phase.status = PhaseStatus::Completed;
    } else if statuses
        .iter()
        .any(|s| !matches!(s, StepStatus::Pending))
    {
        phase.status = PhaseStatus::InProgress;
    } else {
        phase.status = PhaseStatus::Pending;
    }
}
