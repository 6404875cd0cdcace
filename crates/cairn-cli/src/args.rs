//! Command-line interface definitions using clap
//!
//! Argument structures here are thin CLI wrappers over the core parameter
//! types: clap-specific concerns (flags, aliases, help text, value parsing)
//! stay in this module, and each wrapper converts into its core counterpart
//! via `From`, keeping `cairn-core::params` free of clap derives.

use std::collections::BTreeMap;
use std::path::PathBuf;

use cairn_core::models::ArchiveReason;
use cairn_core::params::{
    AddPhase, AddStep, InitPlan, SetSpec, SubmitTask, UpdateStep,
};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Plan-state orchestration engine
///
/// Cairn maintains one durable plan document per workspace: it classifies
/// task descriptions into workflow routes, tracks phases and steps, detects
/// drift between a step's recorded contract and the code actually written,
/// and archives plans that are completed, superseded, or stale.
#[derive(Parser)]
#[command(version, about, name = "cairn")]
pub struct CliArgs {
    /// Path to the active plan document. Defaults to
    /// <workspace>/.cairn/plan-state.json
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,

    /// Directory for archived plans. Defaults to $XDG_DATA_HOME/cairn/archive
    #[arg(long, global = true)]
    pub archive_dir: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the Cairn CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new plan, superseding any active one
    #[command(alias = "i")]
    Init(InitArgs),
    /// Submit a task description through the lifecycle check
    #[command(alias = "t")]
    Task(TaskArgs),
    /// Add a phase to the active plan
    AddPhase(AddPhaseArgs),
    /// Add a step to a phase of the active plan
    AddStep(AddStepArgs),
    /// Update a step's status and result
    #[command(alias = "u")]
    UpdateStep(UpdateStepArgs),
    /// Record the expected file and exports for a step
    SetSpec(SetSpecArgs),
    /// Check a step's artifact for drift against its recorded contract
    #[command(alias = "c")]
    Check(CheckArgs),
    /// Show the active plan
    #[command(alias = "s")]
    Status(StatusArgs),
    /// Archive the active plan
    Archive(ArchiveArgs),
    /// Run the JSON hook boundary: read a prompt payload from stdin,
    /// emit a hook response on stdout
    Hook,
}

/// Create a new plan
#[derive(Args)]
pub struct InitArgs {
    /// Task description the plan is created for
    pub task: String,
    /// Complexity score (1-10)
    #[arg(default_value_t = 4)]
    pub complexity: u8,
    /// Workflow route; classified from the task when omitted
    #[arg(value_enum)]
    pub route: Option<RouteArg>,
}

impl From<InitArgs> for InitPlan {
    fn from(val: InitArgs) -> Self {
        InitPlan {
            task: val.task,
            complexity: val.complexity,
            route: val.route.map(|r| r.to_string()),
        }
    }
}

/// Submit a task description against the active slot
#[derive(Args)]
pub struct TaskArgs {
    /// Free-text task description (a raw user prompt)
    pub description: String,
}

impl From<TaskArgs> for SubmitTask {
    fn from(val: TaskArgs) -> Self {
        SubmitTask {
            task: val.description,
        }
    }
}

/// Add a phase to the active plan
#[derive(Args)]
pub struct AddPhaseArgs {
    /// Phase identifier, e.g. "phase-1"
    pub phase_id: String,
    /// Human-readable phase title
    pub title: String,
    /// Execution mode for the phase's steps
    #[arg(value_enum)]
    pub mode: Option<ModeArg>,
}

impl From<AddPhaseArgs> for AddPhase {
    fn from(val: AddPhaseArgs) -> Self {
        AddPhase {
            phase_id: val.phase_id,
            title: val.title,
            mode: val.mode.map(|m| m.to_string()),
        }
    }
}

/// Add a step to a phase
#[derive(Args)]
pub struct AddStepArgs {
    /// Step identifier, e.g. "step-1-1"
    pub step_id: String,
    /// Human-readable step title
    pub title: String,
    /// Identifier of the owning phase
    pub phase_id: String,
}

impl From<AddStepArgs> for AddStep {
    fn from(val: AddStepArgs) -> Self {
        AddStep {
            step_id: val.step_id,
            title: val.title,
            phase_id: val.phase_id,
        }
    }
}

/// Update a step's status or result
#[derive(Args)]
pub struct UpdateStepArgs {
    /// Identifier of the step to update
    pub step_id: String,
    /// New status for the step
    #[arg(value_enum)]
    pub status: StatusArg,
    /// Description of what was accomplished
    pub result: Option<String>,
}

impl From<UpdateStepArgs> for UpdateStep {
    fn from(val: UpdateStepArgs) -> Self {
        UpdateStep {
            step_id: val.step_id,
            status: val.status.to_string(),
            result: val.result,
        }
    }
}

/// Record the expected contract for a step
#[derive(Args)]
pub struct SetSpecArgs {
    /// Identifier of the step
    pub step_id: String,
    /// File the step owns
    pub file: String,
    /// Symbols the file must export, comma-separated
    #[arg(short, long, value_delimiter = ',')]
    pub exports: Vec<String>,
    /// Expected signatures as name=signature pairs, repeatable
    #[arg(short, long = "signature", value_parser = parse_signature)]
    pub signatures: Vec<(String, String)>,
}

impl From<SetSpecArgs> for SetSpec {
    fn from(val: SetSpecArgs) -> Self {
        SetSpec {
            step_id: val.step_id,
            file: val.file,
            exports: val.exports,
            signatures: val.signatures.into_iter().collect::<BTreeMap<_, _>>(),
        }
    }
}

fn parse_signature(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, sig)| (name.trim().to_string(), sig.trim().to_string()))
        .ok_or_else(|| format!("invalid signature '{s}', expected name=signature"))
}

/// Check a step's artifact for drift
#[derive(Args)]
pub struct CheckArgs {
    /// Identifier of the step to check
    pub step_id: String,
    /// Path of the artifact to scan; defaults to the file recorded in the
    /// step's contract, resolved against the current directory
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Show the active plan
#[derive(Args)]
pub struct StatusArgs {
    /// Output mode
    #[arg(value_enum, default_value_t = StatusMode::Full)]
    pub mode: StatusMode,
}

/// Archive the active plan
#[derive(Args)]
pub struct ArchiveArgs {
    /// Why the plan is being archived
    #[arg(long, value_enum, default_value_t = ReasonArg::Manual)]
    pub reason: ReasonArg,
}

/// Output mode for the status command
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusMode {
    /// Full markdown report
    Full,
    /// One line for status bars
    Compact,
}

impl std::fmt::Display for StatusMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusMode::Full => write!(f, "full"),
            StatusMode::Compact => write!(f, "compact"),
        }
    }
}

/// Command-line representation of workflow routes
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RouteArg {
    FastPath,
    Simple,
    Complex,
    Orchestrator,
}

impl std::fmt::Display for RouteArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteArg::FastPath => write!(f, "FAST_PATH"),
            RouteArg::Simple => write!(f, "SIMPLE"),
            RouteArg::Complex => write!(f, "COMPLEX"),
            RouteArg::Orchestrator => write!(f, "ORCHESTRATOR"),
        }
    }
}

/// Command-line representation of step status values
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl std::fmt::Display for StatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusArg::Pending => write!(f, "pending"),
            StatusArg::InProgress => write!(f, "in_progress"),
            StatusArg::Completed => write!(f, "completed"),
            StatusArg::Failed => write!(f, "failed"),
        }
    }
}

/// Command-line representation of phase execution modes
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Sequential,
    Parallel,
}

impl std::fmt::Display for ModeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModeArg::Sequential => write!(f, "sequential"),
            ModeArg::Parallel => write!(f, "parallel"),
        }
    }
}

/// Command-line representation of archive reasons
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ReasonArg {
    Manual,
    Stale,
    Superseded,
    OrchestratorDirective,
}

impl std::fmt::Display for ReasonArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReasonArg::Manual => write!(f, "manual"),
            ReasonArg::Stale => write!(f, "stale"),
            ReasonArg::Superseded => write!(f, "superseded"),
            ReasonArg::OrchestratorDirective => write!(f, "orchestrator-directive"),
        }
    }
}

impl From<ReasonArg> for ArchiveReason {
    fn from(val: ReasonArg) -> Self {
        match val {
            ReasonArg::Manual => ArchiveReason::Manual,
            ReasonArg::Stale => ArchiveReason::Stale,
            ReasonArg::Superseded => ArchiveReason::Superseded,
            ReasonArg::OrchestratorDirective => ArchiveReason::OrchestratorDirective,
        }
    }
}
