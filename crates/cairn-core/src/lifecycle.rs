//! Lifecycle decisions over the active plan slot.
//!
//! A pure decision layer: given the current plan (if any), an incoming task
//! description, and the current time, produce a [`Disposition`] describing
//! what the orchestrator should do with the slot. All mutation happens in
//! the orchestrator against the store; nothing here touches disk.

use jiff::Timestamp;

use crate::classifier::{is_orchestrator_directive, Classifier, TaskClass};
use crate::models::{ArchiveReason, Classification, Plan};

/// What the orchestrator should do with the active slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    /// Nothing to do: empty prompt, or a directive/defer with no plan
    Defer,

    /// No plan exists; create one with this classification
    Initialize(Classification),

    /// Keep the current plan untouched
    Retain,

    /// Archive the current plan, then optionally create a replacement
    Archive {
        reason: ArchiveReason,
        then: Option<Classification>,
    },
}

/// Decides staleness, continuation, and archival for the active slot.
#[derive(Debug, Clone, Default)]
pub struct LifecycleManager {
    classifier: Classifier,
}

/// Vocabulary that marks a prompt as continuing the current work.
const CONTINUATION_MARKERS: &[&str] = &[
    "continue",
    "resume",
    "keep going",
    "remaining",
    "complete",
    "finish",
    "previous task",
    "as discussed",
    "follow up",
];

impl LifecycleManager {
    /// Create a manager with the default classifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager with a custom classifier.
    pub fn with_classifier(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Decide what to do with the active slot for an incoming prompt.
    ///
    /// Precedence: orchestration directive, then absence, then continuation
    /// (which wins over staleness, so resumed work is never discarded),
    /// then completion, then the route-specific staleness threshold.
    pub fn assess(&self, current: Option<&Plan>, task: &str, now: Timestamp) -> Disposition {
        if is_orchestrator_directive(task) {
            return match current {
                // The orchestrator agent creates its own plan afterwards.
                Some(_) => Disposition::Archive {
                    reason: ArchiveReason::OrchestratorDirective,
                    then: None,
                },
                None => Disposition::Defer,
            };
        }

        let class = self.classifier.classify(task);

        let Some(plan) = current else {
            return match class {
                TaskClass::Defer => Disposition::Defer,
                TaskClass::Route(cls) => Disposition::Initialize(cls),
            };
        };

        if is_continuation(task) {
            return Disposition::Retain;
        }

        let replacement = match class {
            TaskClass::Defer => return Disposition::Retain,
            TaskClass::Route(cls) => cls,
        };

        if plan.is_completed() {
            return Disposition::Archive {
                reason: ArchiveReason::Superseded,
                then: Some(replacement),
            };
        }

        let threshold = plan.classification.route.staleness_threshold();
        if plan.age(now) > threshold {
            return Disposition::Archive {
                reason: ArchiveReason::Stale,
                then: Some(replacement),
            };
        }

        // Unrelated but recent: never silently discard in-progress work.
        Disposition::Retain
    }
}

/// True iff the prompt reads as a continuation of the current work.
pub fn is_continuation(task: &str) -> bool {
    let lower = task.to_lowercase();
    CONTINUATION_MARKERS.iter().any(|m| lower.contains(m))
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};

    use super::*;
    use crate::models::{Route, Step, StepStatus};

    fn plan_aged(route: Route, age_minutes: i64) -> (Plan, Timestamp) {
        let mut plan = Plan::new("Old Task from Previous Session", Classification::for_route(route));
        let mut step = Step::new("Step 1");
        step.status = StepStatus::InProgress;
        plan.steps.insert("1".to_string(), step);
        let now = plan.updated_at + SignedDuration::from_mins(age_minutes);
        (plan, now)
    }

    #[test]
    fn test_no_plan_initializes() {
        let manager = LifecycleManager::new();
        let decision = manager.assess(None, "fix the login bug quickly", Timestamp::now());
        assert!(matches!(decision, Disposition::Initialize(_)));
    }

    #[test]
    fn test_no_plan_with_empty_prompt_defers() {
        let manager = LifecycleManager::new();
        assert_eq!(
            manager.assess(None, "", Timestamp::now()),
            Disposition::Defer
        );
    }

    #[test]
    fn test_stale_fast_path_plan_is_archived() {
        let manager = LifecycleManager::new();
        let (plan, now) = plan_aged(Route::FastPath, 35);
        let decision = manager.assess(Some(&plan), "implement a payment webhook handler", now);
        assert!(matches!(
            decision,
            Disposition::Archive {
                reason: ArchiveReason::Stale,
                then: Some(_),
            }
        ));
    }

    #[test]
    fn test_recent_fast_path_plan_is_retained() {
        let manager = LifecycleManager::new();
        let (plan, now) = plan_aged(Route::FastPath, 10);
        let decision = manager.assess(Some(&plan), "implement a payment webhook handler", now);
        assert_eq!(decision, Disposition::Retain);
    }

    #[test]
    fn test_complex_plan_has_two_hour_threshold() {
        let manager = LifecycleManager::new();
        let (plan, now) = plan_aged(Route::Complex, 90);
        let decision = manager.assess(Some(&plan), "build something entirely new", now);
        assert_eq!(decision, Disposition::Retain);

        let (plan, now) = plan_aged(Route::Complex, 150);
        let decision = manager.assess(Some(&plan), "build something entirely new", now);
        assert!(matches!(decision, Disposition::Archive { .. }));
    }

    #[test]
    fn test_continuation_wins_over_staleness() {
        let manager = LifecycleManager::new();
        let (plan, now) = plan_aged(Route::FastPath, 500);
        let decision = manager.assess(
            Some(&plan),
            "continue with the previous task and fix remaining issues",
            now,
        );
        assert_eq!(decision, Disposition::Retain);
    }

    #[test]
    fn test_directive_always_archives_existing_plan() {
        let manager = LifecycleManager::new();
        let (plan, now) = plan_aged(Route::Complex, 1);
        let decision = manager.assess(Some(&plan), "/orchestrator implement feature X", now);
        assert_eq!(
            decision,
            Disposition::Archive {
                reason: ArchiveReason::OrchestratorDirective,
                then: None,
            }
        );
    }

    #[test]
    fn test_directive_without_plan_defers() {
        let manager = LifecycleManager::new();
        let decision = manager.assess(None, "/orchestrator implement feature X", Timestamp::now());
        assert_eq!(decision, Disposition::Defer);
    }

    #[test]
    fn test_completed_plan_is_superseded_even_when_fresh() {
        let manager = LifecycleManager::new();
        let mut plan = Plan::new("done task", Classification::for_route(Route::Simple));
        let mut step = Step::new("Step 1");
        step.status = StepStatus::Completed;
        plan.steps.insert("1".to_string(), step);

        let decision = manager.assess(Some(&plan), "start the next project", Timestamp::now());
        assert!(matches!(
            decision,
            Disposition::Archive {
                reason: ArchiveReason::Superseded,
                then: Some(_),
            }
        ));
    }

    #[test]
    fn test_empty_prompt_with_active_plan_retains() {
        let manager = LifecycleManager::new();
        let (plan, now) = plan_aged(Route::Simple, 5);
        assert_eq!(manager.assess(Some(&plan), "", now), Disposition::Retain);
    }
}
