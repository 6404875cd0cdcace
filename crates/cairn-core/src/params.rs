//! Parameter structures for orchestrator operations.
//!
//! These structures are shared across interfaces (CLI, JSON hook boundary)
//! without framework-specific derives. Interface layers wrap them with their
//! own derives (clap arguments, schema generation) and convert via `From`,
//! keeping the core interface-agnostic.

use std::collections::BTreeMap;
use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{ExecutionMode, Route, StepStatus};
use crate::{OrchestratorError, Result};

/// Parameters for initializing a fresh plan.
///
/// Used by the external driver (or orchestrator agent) when it wants a plan
/// created unconditionally; any existing plan is archived first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct InitPlan {
    /// Free-text task description (required)
    pub task: String,
    /// Complexity severity score supplied by the caller
    pub complexity: u8,
    /// Workflow route; when absent the route is derived from the task
    pub route: Option<String>,
}

impl InitPlan {
    /// Parse the optional route string.
    pub fn parse_route(&self) -> Result<Option<Route>> {
        match &self.route {
            None => Ok(None),
            Some(s) => Route::from_str(s)
                .map(Some)
                .map_err(|reason| OrchestratorError::invalid_input("route", reason)),
        }
    }
}

/// Parameters for submitting a task description through the lifecycle
/// decision (classify, archive-if-stale, create-if-absent).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SubmitTask {
    /// Free-text task description from the driver
    pub task: String,
}

/// Parameters for adding a phase to the active plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddPhase {
    /// Identifier unique within the plan
    pub phase_id: String,
    /// Human-readable title
    pub title: String,
    /// Execution mode ('sequential' or 'parallel'); defaults to sequential
    pub mode: Option<String>,
}

impl AddPhase {
    /// Parse the optional execution mode string.
    pub fn parse_mode(&self) -> Result<ExecutionMode> {
        match &self.mode {
            None => Ok(ExecutionMode::Sequential),
            Some(s) => ExecutionMode::from_str(s)
                .map_err(|reason| OrchestratorError::invalid_input("mode", reason)),
        }
    }
}

/// Parameters for adding a step to a phase of the active plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddStep {
    /// Step identifier unique within the plan
    pub step_id: String,
    /// Brief title of the step
    pub title: String,
    /// Identifier of the owning phase
    pub phase_id: String,
}

/// Parameters for updating a step's status.
///
/// When changing status to 'completed' the result field documents what was
/// accomplished; it is optional but recommended.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateStep {
    /// Step identifier to update (required)
    pub step_id: String,
    /// New status ('pending', 'in_progress', 'completed', or 'failed')
    pub status: String,
    /// Description of what was accomplished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl UpdateStep {
    /// Validate the update and return the parsed status.
    ///
    /// # Errors
    ///
    /// * `OrchestratorError::InvalidInput` - when the status string is not
    ///   one of the recognized step statuses
    pub fn validate(&self) -> Result<StepStatus> {
        StepStatus::from_str(&self.status).map_err(|_| {
            OrchestratorError::invalid_input(
                "status",
                format!(
                    "Invalid status: {}. Must be 'pending', 'in_progress', 'completed', or 'failed'",
                    self.status
                ),
            )
        })
    }
}

/// Parameters for recording what a step promises about its artifact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetSpec {
    /// Step identifier to attach the spec to
    pub step_id: String,
    /// Path of the file the step is expected to produce or modify
    pub file: String,
    /// Symbol names the file is expected to export
    #[serde(default)]
    pub exports: Vec<String>,
    /// Optional expected signatures, keyed by export name
    #[serde(default)]
    pub signatures: BTreeMap<String, String>,
}

/// Parameters for checking a step's artifact against its spec.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CheckStep {
    /// Step identifier whose spec is checked
    pub step_id: String,
    /// Full content of the edited artifact
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_step_validate_valid_statuses() {
        for (input, expected) in [
            ("pending", StepStatus::Pending),
            ("in_progress", StepStatus::InProgress),
            ("in-progress", StepStatus::InProgress),
            ("completed", StepStatus::Completed),
            ("failed", StepStatus::Failed),
        ] {
            let params = UpdateStep {
                step_id: "s1".to_string(),
                status: input.to_string(),
                result: None,
            };
            assert_eq!(params.validate().unwrap(), expected, "status {input}");
        }
    }

    #[test]
    fn test_update_step_validate_invalid_status() {
        let params = UpdateStep {
            step_id: "s1".to_string(),
            status: "bogus".to_string(),
            result: None,
        };
        match params.validate().unwrap_err() {
            OrchestratorError::InvalidInput { field, reason } => {
                assert_eq!(field, "status");
                assert!(reason.contains("Invalid status: bogus"));
            }
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_init_plan_parse_route() {
        let params = InitPlan {
            task: "Test".to_string(),
            complexity: 7,
            route: Some("COMPLEX".to_string()),
        };
        assert_eq!(params.parse_route().unwrap(), Some(Route::Complex));

        let params = InitPlan {
            task: "Test".to_string(),
            complexity: 7,
            route: None,
        };
        assert_eq!(params.parse_route().unwrap(), None);

        let params = InitPlan {
            task: "Test".to_string(),
            complexity: 7,
            route: Some("WARP".to_string()),
        };
        assert!(params.parse_route().is_err());
    }

    #[test]
    fn test_add_phase_default_mode_is_sequential() {
        let params = AddPhase {
            phase_id: "impl".to_string(),
            title: "Implementation".to_string(),
            mode: None,
        };
        assert_eq!(params.parse_mode().unwrap(), ExecutionMode::Sequential);
    }
}
