//! Step model definition and related functionality.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Drift, StepStatus};

/// What a step promised about the artifact it edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StepSpec {
    /// Path of the file the step is expected to produce or modify
    pub file: String,

    /// Symbol names the file is expected to export
    #[serde(default)]
    pub exports: Vec<String>,

    /// Optional expected signatures, keyed by export name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub signatures: BTreeMap<String, String>,
}

/// What was actually observed in the artifact after the edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Observed {
    /// Export names found by the best-effort scan
    #[serde(default)]
    pub exports: Vec<String>,
}

/// Represents an individual step within a plan.
///
/// Steps live in the plan's `steps` map keyed by a human-meaningful
/// identifier such as `"3"` or `"step-2-1"`; ordering for display is always
/// lexical on the raw key, never by numeric coercion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Brief title/summary of the step
    #[serde(alias = "name")]
    pub title: String,

    /// Current status of the step
    #[serde(default)]
    pub status: StepStatus,

    /// Description of what was accomplished, recorded on completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    /// Expected artifact contract; only steps carrying a spec are
    /// drift-checked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<StepSpec>,

    /// Observed exports after the most recent edit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<Observed>,

    /// Most recent drift verdict for the step
    #[serde(default)]
    pub drift: Drift,
}

impl Step {
    /// Create a fresh pending step with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: StepStatus::Pending,
            result: None,
            spec: None,
            actual: None,
            drift: Drift::default(),
        }
    }
}
