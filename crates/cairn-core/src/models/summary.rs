//! Progress projection derived from a plan.

use serde::{Deserialize, Serialize};

use super::{Plan, StepStatus};

/// Read-only progress counts for a plan.
///
/// Tolerates non-numeric and mixed-format step keys: the counts are taken
/// straight from the steps map, which orders keys lexically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressSummary {
    /// Number of completed steps
    pub completed: u32,

    /// Total number of steps
    pub total: u32,

    /// Completion percentage, zero when the plan has no steps
    pub percent: u32,
}

impl From<&Plan> for ProgressSummary {
    fn from(plan: &Plan) -> Self {
        let total = plan.steps.len() as u32;
        let completed = plan
            .steps
            .values()
            .filter(|step| step.status == StepStatus::Completed)
            .count() as u32;
        let percent = if total == 0 { 0 } else { completed * 100 / total };

        Self {
            completed,
            total,
            percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Classification, Route, Step};

    fn plan_with_steps(statuses: &[(&str, StepStatus)]) -> Plan {
        let mut plan = Plan::new("test", Classification::for_route(Route::Simple));
        for (id, status) in statuses {
            let mut step = Step::new(format!("Step {id}"));
            step.status = *status;
            plan.steps.insert((*id).to_string(), step);
        }
        plan
    }

    #[test]
    fn test_empty_plan_has_zero_percent() {
        let plan = plan_with_steps(&[]);
        let progress = ProgressSummary::from(&plan);
        assert_eq!(progress.total, 0);
        assert_eq!(progress.completed, 0);
        assert_eq!(progress.percent, 0);
    }

    #[test]
    fn test_progress_counts_completed_steps() {
        let plan = plan_with_steps(&[
            ("1", StepStatus::Completed),
            ("2", StepStatus::Completed),
            ("3", StepStatus::InProgress),
            ("4", StepStatus::Pending),
            ("5", StepStatus::Pending),
        ]);
        let progress = ProgressSummary::from(&plan);
        assert_eq!(progress.completed, 2);
        assert_eq!(progress.total, 5);
        assert_eq!(progress.percent, 40);
    }

    #[test]
    fn test_mixed_format_keys_never_numeric_parse() {
        let plan = plan_with_steps(&[
            ("step-1-1", StepStatus::Completed),
            ("step-2-1", StepStatus::Pending),
            ("step-10-1", StepStatus::Pending),
        ]);
        let progress = ProgressSummary::from(&plan);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.completed, 1);

        // Lexical key order: "step-1-1" < "step-10-1" < "step-2-1"
        let keys: Vec<&String> = plan.steps.keys().collect();
        assert_eq!(keys, ["step-1-1", "step-10-1", "step-2-1"]);
    }

    #[test]
    fn test_failed_steps_do_not_count_as_completed() {
        let plan = plan_with_steps(&[("a", StepStatus::Failed), ("b", StepStatus::Completed)]);
        let progress = ProgressSummary::from(&plan);
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.percent, 50);
    }
}
