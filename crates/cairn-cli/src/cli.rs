//! Command handlers bridging parsed arguments to the orchestrator.
//!
//! Exit-code policy: domain conditions (no active plan, unknown step or
//! phase, invalid input, drift found) print an error message and succeed,
//! so driver scripts never abort on them. Only environment failures
//! (I/O, serialization) propagate and produce a non-zero exit.

use anyhow::Result;
use cairn_core::{
    display::OperationStatus, models::ArchiveReason, CompactStatus, Orchestrator,
    OrchestratorError, TaskOutcome,
};

use crate::args::{
    AddPhaseArgs, AddStepArgs, ArchiveArgs, CheckArgs, InitArgs, SetSpecArgs, StatusArgs,
    StatusMode, TaskArgs, UpdateStepArgs,
};
use crate::renderer::TerminalRenderer;

/// Command handler holding the orchestrator and output renderer.
pub struct Cli {
    orchestrator: Orchestrator,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(orchestrator: Orchestrator, renderer: TerminalRenderer) -> Self {
        Self {
            orchestrator,
            renderer,
        }
    }

    /// Print a domain error as a failure message, or propagate an
    /// environment error.
    fn report_error(&self, error: OrchestratorError) -> Result<()> {
        if error.is_environment() {
            return Err(error.into());
        }
        self.renderer
            .render(&OperationStatus::failure(error.to_string()).to_string())
    }

    pub async fn init(&self, args: InitArgs) -> Result<()> {
        match self.orchestrator.init_plan(&args.into()).await {
            Ok(plan) => self.renderer.render(&format!(
                "{}\n{plan}",
                OperationStatus::success(format!("Created plan {}", plan.plan_id))
            )),
            Err(e) => self.report_error(e),
        }
    }

    pub async fn task(&self, args: TaskArgs) -> Result<()> {
        match self.orchestrator.submit_task(&args.into()).await {
            Ok(outcome) => {
                let message = match &outcome {
                    TaskOutcome::Deferred => "No plan change".to_string(),
                    TaskOutcome::Created(plan) => format!("Created plan {}", plan.plan_id),
                    TaskOutcome::Retained(plan) => format!("Retained plan {}", plan.plan_id),
                    TaskOutcome::Replaced { archived, plan } => {
                        format!("Archived plan {archived}, created {}", plan.plan_id)
                    }
                    TaskOutcome::Archived { archived } => format!("Archived plan {archived}"),
                };
                self.renderer
                    .render(&OperationStatus::success(message).to_string())
            }
            Err(e) => self.report_error(e),
        }
    }

    pub async fn add_phase(&self, args: AddPhaseArgs) -> Result<()> {
        match self.orchestrator.add_phase(&args.into()).await {
            Ok(phase) => self.renderer.render(
                &OperationStatus::success(format!("Added phase {}", phase.phase_id)).to_string(),
            ),
            Err(e) => self.report_error(e),
        }
    }

    pub async fn add_step(&self, args: AddStepArgs) -> Result<()> {
        let step_id = args.step_id.clone();
        match self.orchestrator.add_step(&args.into()).await {
            Ok(_) => self
                .renderer
                .render(&OperationStatus::success(format!("Added step {step_id}")).to_string()),
            Err(e) => self.report_error(e),
        }
    }

    pub async fn update_step(&self, args: UpdateStepArgs) -> Result<()> {
        let step_id = args.step_id.clone();
        match self.orchestrator.update_step(&args.into()).await {
            Ok(step) => self.renderer.render(
                &OperationStatus::success(format!("Step {step_id}: {}", step.status)).to_string(),
            ),
            Err(e) => self.report_error(e),
        }
    }

    pub async fn set_spec(&self, args: SetSpecArgs) -> Result<()> {
        let step_id = args.step_id.clone();
        match self.orchestrator.set_step_spec(&args.into()).await {
            Ok(_) => self.renderer.render(
                &OperationStatus::success(format!("Recorded contract for {step_id}")).to_string(),
            ),
            Err(e) => self.report_error(e),
        }
    }

    pub async fn check(&self, args: CheckArgs) -> Result<()> {
        // Resolve the artifact path: explicit flag first, then the file
        // recorded in the step's contract.
        let path = match args.file {
            Some(path) => path,
            None => {
                let plan = match self.orchestrator.plan().await {
                    Ok(Some(plan)) => plan,
                    Ok(None) => return self.report_error(OrchestratorError::NoActivePlan),
                    Err(e) => return self.report_error(e),
                };
                match plan.steps.get(&args.step_id).and_then(|s| s.spec.as_ref()) {
                    Some(spec) => spec.file.clone().into(),
                    None => {
                        return self.report_error(OrchestratorError::invalid_input(
                            "file",
                            format!(
                                "step '{}' has no recorded contract; pass --file",
                                args.step_id
                            ),
                        ))
                    }
                }
            }
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => return Err(OrchestratorError::file_system(&path, e).into()),
        };

        let params = cairn_core::params::CheckStep {
            step_id: args.step_id.clone(),
            content,
        };
        match self.orchestrator.check_step(&params).await {
            Ok(drift) if !drift.detected => self.renderer.render(
                &OperationStatus::success(format!("Step {} matches its contract", args.step_id))
                    .to_string(),
            ),
            Ok(drift) => {
                let mut report = format!("Drift detected on step {}\n\n", args.step_id);
                for item in &drift.items {
                    report.push_str(&format!("- {item}\n"));
                }
                if drift.needs_sync {
                    report.push_str("\nThe plan needs a sync with the code.\n");
                }
                self.renderer.render(&report)
            }
            Err(e) => self.report_error(e),
        }
    }

    pub async fn status(&self, args: StatusArgs) -> Result<()> {
        match self.orchestrator.plan().await {
            Ok(Some(plan)) => match args.mode {
                StatusMode::Full => self.renderer.render(&plan.to_string()),
                StatusMode::Compact => self.renderer.render_plain(&CompactStatus(&plan).to_string()),
            },
            Ok(None) => match args.mode {
                StatusMode::Full => self.renderer.render("No active plan.\n"),
                StatusMode::Compact => self.renderer.render_plain(""),
            },
            Err(e) => self.report_error(e),
        }
    }

    pub async fn archive(&self, args: ArchiveArgs) -> Result<()> {
        match self
            .orchestrator
            .archive_plan(ArchiveReason::from(args.reason))
            .await
        {
            Ok(Some(path)) => self.renderer.render(
                &OperationStatus::success(format!("Archived plan to {}", path.display()))
                    .to_string(),
            ),
            Ok(None) => self
                .renderer
                .render(&OperationStatus::success("No active plan to archive".to_string()).to_string()),
            Err(e) => self.report_error(e),
        }
    }
}
