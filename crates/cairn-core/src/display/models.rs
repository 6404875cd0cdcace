//! Display implementations for domain models.
//!
//! The full status report renders as markdown: plan header, classification
//! metadata, phases with their steps, and drift markers. Steps that do not
//! belong to any phase are listed in a trailing section so partially
//! populated phases never hide work. Step ordering is lexical on the raw
//! key throughout.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{
    ExecutionMode, Phase, PhaseStatus, Plan, ProgressSummary, Route, Step, StepStatus,
};

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Step {
    /// Render one step as a compact list entry.
    fn fmt_entry(&self, f: &mut fmt::Formatter<'_>, id: &str) -> fmt::Result {
        write!(f, "- `{}` {} ({})", id, self.title, self.status.with_icon())?;
        if self.drift.detected {
            write!(f, " — drift")?;
            if self.drift.needs_sync {
                write!(f, ", needs sync")?;
            }
        }
        writeln!(f)?;

        if let Some(result) = &self.result {
            writeln!(f, "  - Result: {result}")?;
        }
        for item in &self.drift.items {
            writeln!(f, "  - Drift: {item}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = ProgressSummary::from(self);

        writeln!(f, "# ORCHESTRATION: {}", self.task)?;
        writeln!(f)?;
        writeln!(f, "- Plan: {}", self.plan_id)?;
        writeln!(
            f,
            "- Route: {} {} (complexity {})",
            self.classification.route.icon(),
            self.classification.route,
            self.classification.complexity
        )?;
        writeln!(
            f,
            "- Iterations: {}/{}",
            self.loop_state.iteration, self.loop_state.max_iterations
        )?;
        writeln!(
            f,
            "- Progress: {}/{} ({}%)",
            progress.completed, progress.total, progress.percent
        )?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        for phase in &self.phases {
            writeln!(f)?;
            write!(f, "{phase}")?;
            for step_id in &phase.step_ids {
                // A phase may reference steps that were never added.
                if let Some(step) = self.steps.get(step_id) {
                    step.fmt_entry(f, step_id)?;
                }
            }
        }

        // Steps not owned by any phase, in lexical key order.
        let orphans: Vec<(&String, &Step)> = self
            .steps
            .iter()
            .filter(|(id, _)| !self.phases.iter().any(|p| p.step_ids.contains(id)))
            .collect();
        if !orphans.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Unphased steps")?;
            writeln!(f)?;
            for (id, step) in orphans {
                step.fmt_entry(f, id)?;
            }
        }

        if self.steps.is_empty() {
            writeln!(f, "\nNo steps in this plan.")?;
        }

        Ok(())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} — {} [{}] ({})",
            self.phase_id, self.title, self.execution_mode, self.status
        )?;
        writeln!(f)
    }
}

/// One-line status projection for status bars and logs.
///
/// Format: `<route icon> <completed>/<total> <pct>% <task>`.
pub struct CompactStatus<'a>(pub &'a Plan);

impl<'a> fmt::Display for CompactStatus<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;
        let progress = ProgressSummary::from(plan);
        write!(
            f,
            "{} {}/{} {}% {}",
            plan.classification.route.icon(),
            progress.completed,
            progress.total,
            progress.percent,
            truncate(&plan.task, 60)
        )
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
