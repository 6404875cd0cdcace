//! Workflow route classification attached to every plan.

use std::str::FromStr;

use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

/// Workflow routes, ordered by increasing resource allowance.
///
/// The route determines the iteration budget and the staleness threshold of
/// a plan through fixed, total lookups. ORCHESTRATOR is never produced by
/// the classifier; it is reserved for plans created by the external
/// orchestrator agent after a deferred classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Route {
    /// Trivial one-shot edits (typo fixes, renames)
    FastPath,

    /// Bounded single-concern requests
    Simple,

    /// Multi-concern or architecture-level work
    Complex,

    /// Plans driven by the external orchestrator agent
    Orchestrator,
}

impl Route {
    /// Complexity severity score for the route.
    pub fn complexity(&self) -> u8 {
        match self {
            Route::FastPath => 2,
            Route::Simple => 4,
            Route::Complex => 7,
            Route::Orchestrator => 9,
        }
    }

    /// Iteration budget for the route. Total and deterministic.
    pub fn max_iterations(&self) -> u32 {
        match self {
            Route::FastPath => 3,
            Route::Simple => 10,
            Route::Complex | Route::Orchestrator => 25,
        }
    }

    /// Age beyond which a plan of this route is considered stale when an
    /// unrelated new task arrives.
    pub fn staleness_threshold(&self) -> SignedDuration {
        match self {
            Route::FastPath => SignedDuration::from_mins(30),
            Route::Simple => SignedDuration::from_mins(60),
            Route::Complex | Route::Orchestrator => SignedDuration::from_hours(2),
        }
    }

    /// Status-line icon for the route.
    pub fn icon(&self) -> &'static str {
        match self {
            Route::FastPath => "⚡",
            Route::Simple => "📝",
            Route::Complex => "🔄",
            Route::Orchestrator => "🎯",
        }
    }

    /// Convert to the wire string used in the plan document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::FastPath => "FAST_PATH",
            Route::Simple => "SIMPLE",
            Route::Complex => "COMPLEX",
            Route::Orchestrator => "ORCHESTRATOR",
        }
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FAST_PATH" | "FASTPATH" | "FAST-PATH" => Ok(Route::FastPath),
            "SIMPLE" => Ok(Route::Simple),
            "COMPLEX" => Ok(Route::Complex),
            "ORCHESTRATOR" => Ok(Route::Orchestrator),
            _ => Err(format!("Invalid route: {s}")),
        }
    }
}

/// Classification outcome persisted on a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    /// Integer severity score
    pub complexity: u8,

    /// Workflow route governing iteration budget and staleness
    #[serde(alias = "adaptive_mode")]
    pub route: Route,

    /// Model routing hint; opaque to this core
    #[serde(default = "default_model_routing")]
    pub model_routing: String,

    /// Whether an adversarial review pass is required downstream
    #[serde(default)]
    pub adversarial_required: bool,
}

fn default_model_routing() -> String {
    "inherit".to_string()
}

impl Classification {
    /// Build a classification for a route using the fixed lookups.
    pub fn for_route(route: Route) -> Self {
        Self {
            complexity: route.complexity(),
            route,
            model_routing: default_model_routing(),
            adversarial_required: route >= Route::Complex,
        }
    }

    /// Build a classification with an explicit complexity override, used by
    /// `init` where the driver supplies its own score.
    pub fn with_complexity(route: Route, complexity: u8) -> Self {
        Self {
            complexity,
            ..Self::for_route(route)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_lookups_are_total() {
        for route in [
            Route::FastPath,
            Route::Simple,
            Route::Complex,
            Route::Orchestrator,
        ] {
            assert!(route.max_iterations() >= 3);
            assert!(route.staleness_threshold() >= SignedDuration::from_mins(30));
            assert!(!route.icon().is_empty());
        }
    }

    #[test]
    fn test_route_serializes_screaming_snake() {
        let json = serde_json::to_string(&Route::FastPath).unwrap();
        assert_eq!(json, "\"FAST_PATH\"");
        let back: Route = serde_json::from_str("\"FAST_PATH\"").unwrap();
        assert_eq!(back, Route::FastPath);
    }

    #[test]
    fn test_classification_accepts_adaptive_mode_alias() {
        let json = r#"{"complexity": 5, "adaptive_mode": "SIMPLE"}"#;
        let cls: Classification = serde_json::from_str(json).unwrap();
        assert_eq!(cls.route, Route::Simple);
        assert_eq!(cls.model_routing, "inherit");
        assert!(!cls.adversarial_required);
    }

    #[test]
    fn test_for_route_uses_fixed_scores() {
        assert_eq!(Classification::for_route(Route::FastPath).complexity, 2);
        assert_eq!(Classification::for_route(Route::Simple).complexity, 4);
        assert_eq!(Classification::for_route(Route::Complex).complexity, 7);
        assert!(Classification::for_route(Route::Complex).adversarial_required);
    }
}
