//! Drift records attached to steps after artifact validation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of deviation between a step's spec and the observed artifact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DriftKind {
    /// A symbol the spec promised is absent from the artifact
    Missing,

    /// The artifact exports a symbol the spec never mentioned
    Unexpected,

    /// A promised symbol exists but its declared signature changed
    SignatureChanged,
}

impl DriftKind {
    /// Convert to the wire string used in drift items.
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftKind::Missing => "missing",
            DriftKind::Unexpected => "unexpected",
            DriftKind::SignatureChanged => "signature-changed",
        }
    }
}

/// A single human-readable deviation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DriftItem {
    /// What kind of deviation this is
    pub kind: DriftKind,

    /// The affected symbol name
    pub symbol: String,
}

impl DriftItem {
    pub fn new(kind: DriftKind, symbol: impl Into<String>) -> Self {
        Self {
            kind,
            symbol: symbol.into(),
        }
    }
}

impl fmt::Display for DriftItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.symbol)
    }
}

/// Drift verdict for one step, written back into the plan document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Drift {
    /// True iff any deviation was found
    pub detected: bool,

    /// The individual deviations
    #[serde(default)]
    pub items: Vec<DriftItem>,

    /// True iff a promised symbol is missing; an unexpected addition is
    /// informational, a missing expectation is actionable
    pub needs_sync: bool,
}

impl Drift {
    /// Build a verdict from a list of deviations. `detected` and
    /// `needs_sync` are derived, never set independently.
    pub fn from_items(items: Vec<DriftItem>) -> Self {
        let detected = !items.is_empty();
        let needs_sync = items.iter().any(|i| i.kind == DriftKind::Missing);
        Self {
            detected,
            items,
            needs_sync,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_items_means_no_drift() {
        let drift = Drift::from_items(vec![]);
        assert!(!drift.detected);
        assert!(!drift.needs_sync);
    }

    #[test]
    fn test_unexpected_alone_is_informational() {
        let drift = Drift::from_items(vec![DriftItem::new(DriftKind::Unexpected, "login")]);
        assert!(drift.detected);
        assert!(!drift.needs_sync);
    }

    #[test]
    fn test_missing_is_actionable() {
        let drift = Drift::from_items(vec![DriftItem::new(DriftKind::Missing, "logout")]);
        assert!(drift.detected);
        assert!(drift.needs_sync);
    }

    #[test]
    fn test_item_display_is_human_readable() {
        let item = DriftItem::new(DriftKind::SignatureChanged, "login");
        assert_eq!(item.to_string(), "signature-changed: login");
    }
}
