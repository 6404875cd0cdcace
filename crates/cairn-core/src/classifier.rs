//! Task description classifier.
//!
//! Maps a free-text task description to a workflow route and resource
//! budget. Pure, deterministic, and total: every string input yields exactly
//! one outcome and classification never errors. The keyword vocabulary is
//! data on the [`Classifier`] rather than hard-coded in the decision logic,
//! so the heuristics can be refined without touching the state machine.

use crate::models::{Classification, Route};

/// Reserved command prefix that defers plan creation to the external
/// orchestrator agent.
pub const ORCHESTRATOR_PREFIX: &str = "/orchestrator";

/// Outcome of classifying a task description.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskClass {
    /// No plan should be created; the external orchestrator (or nobody, for
    /// an empty prompt) owns the decision.
    Defer,

    /// The task was routed and budgeted.
    Route(Classification),
}

impl TaskClass {
    /// Returns the classification when the task was routed.
    pub fn classification(&self) -> Option<&Classification> {
        match self {
            TaskClass::Defer => None,
            TaskClass::Route(cls) => Some(cls),
        }
    }
}

/// Keyword/length heuristics for routing a task description.
///
/// Signals are evaluated most-specific first; when a description matches
/// signals from two tiers the higher tier wins.
#[derive(Debug, Clone)]
pub struct Classifier {
    /// Vocabulary that marks multi-concern or architecture-level work
    complex_markers: Vec<&'static str>,

    /// Vocabulary that marks trivial one-shot edits
    trivial_markers: Vec<&'static str>,

    /// Enumerated-clause count (commas) at or beyond which a request is
    /// treated as multi-concern
    clause_threshold: usize,

    /// Word count beyond which a request is treated as complex
    length_threshold: usize,

    /// Word count at or below which a bare imperative is treated as trivial
    short_imperative_words: usize,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            complex_markers: vec![
                "authentication",
                "authorization",
                "oauth",
                "jwt",
                "architecture",
                "microservice",
                "distributed",
                "end-to-end",
                "migration",
                "security audit",
            ],
            trivial_markers: vec!["fix typo", "typo", "rename "],
            clause_threshold: 3,
            length_threshold: 30,
            short_imperative_words: 2,
        }
    }
}

impl Classifier {
    /// Create a classifier with the built-in vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a task description. Never errors; unrecognized input falls
    /// through to SIMPLE, the most conservative non-trivial route.
    pub fn classify(&self, task: &str) -> TaskClass {
        let trimmed = task.trim();

        // An empty prompt must not create a plan.
        if trimmed.is_empty() {
            return TaskClass::Defer;
        }

        // Explicit orchestration directive: the orchestrator agent owns
        // plan creation.
        if is_orchestrator_directive(trimmed) {
            return TaskClass::Defer;
        }

        let lower = trimmed.to_lowercase();
        let words = lower.split_whitespace().count();

        // Higher tier first: a trivial-looking prompt that also carries
        // complex vocabulary gets the larger budget.
        if self.is_complex(&lower, words) {
            return TaskClass::Route(Classification::for_route(Route::Complex));
        }

        if self.is_trivial(&lower, words) {
            return TaskClass::Route(Classification::for_route(Route::FastPath));
        }

        TaskClass::Route(Classification::for_route(Route::Simple))
    }

    fn is_complex(&self, lower: &str, words: usize) -> bool {
        if self.complex_markers.iter().any(|m| lower.contains(m)) {
            return true;
        }
        if lower.matches(',').count() >= self.clause_threshold {
            return true;
        }
        words > self.length_threshold
    }

    fn is_trivial(&self, lower: &str, words: usize) -> bool {
        self.trivial_markers
            .iter()
            .any(|m| if m.ends_with(' ') { lower.starts_with(m) } else { lower.contains(m) })
            || words <= self.short_imperative_words
    }
}

/// True iff the prompt is the reserved orchestration directive.
pub fn is_orchestrator_directive(task: &str) -> bool {
    task.trim_start().starts_with(ORCHESTRATOR_PREFIX)
}

/// Classify with the built-in vocabulary.
pub fn classify(task: &str) -> TaskClass {
    Classifier::default().classify(task)
}
