//! Tests for the data models.

use std::collections::BTreeMap;

use super::*;
use crate::display::CompactStatus;

fn sample_plan() -> Plan {
    let mut plan = Plan::new(
        "Implement the session module",
        Classification::for_route(Route::Simple),
    );
    let mut phase = Phase::new("phase-1", "Core", ExecutionMode::Sequential);
    phase.step_ids.push("step-1-1".to_string());
    phase.step_ids.push("step-1-2".to_string());
    plan.phases.push(phase);

    let mut done = Step::new("Create session store");
    done.status = StepStatus::Completed;
    done.result = Some("store created".to_string());
    plan.steps.insert("step-1-1".to_string(), done);
    plan.steps
        .insert("step-1-2".to_string(), Step::new("Wire handlers"));
    plan
}

#[test]
fn test_plan_document_round_trip_preserves_unknown_fields() {
    let raw = r#"{
        "$schema": "plan-state-v2",
        "plan_id": "plan-1724300000000-42",
        "task": "Ship the thing",
        "classification": {
            "complexity": 4,
            "adaptive_mode": "SIMPLE",
            "model_routing": "inherit"
        },
        "steps": {},
        "loop_state": {"iteration": 1, "max_iterations": 10},
        "version": "0.1.0",
        "custom_annotation": {"owner": "infra"}
    }"#;

    let plan: Plan = serde_json::from_str(raw).expect("Failed to parse plan document");
    assert_eq!(plan.schema, PLAN_SCHEMA);
    assert_eq!(plan.classification.route, Route::Simple);
    assert_eq!(plan.loop_state.max_iterations, 10);
    assert!(plan.extra.contains_key("custom_annotation"));

    let out = serde_json::to_value(&plan).expect("Failed to serialize plan");
    assert_eq!(out["$schema"], "plan-state-v2");
    assert_eq!(out["custom_annotation"]["owner"], "infra");
}

#[test]
fn test_step_title_accepts_legacy_name_field() {
    let raw = r#"{"name": "Legacy step", "status": "in_progress"}"#;
    let step: Step = serde_json::from_str(raw).expect("Failed to parse step");
    assert_eq!(step.title, "Legacy step");
    assert_eq!(step.status, StepStatus::InProgress);
}

#[test]
fn test_route_wire_format() {
    assert_eq!(
        serde_json::to_string(&Route::FastPath).expect("serialize"),
        "\"FAST_PATH\""
    );
    let route: Route = serde_json::from_str("\"COMPLEX\"").expect("deserialize");
    assert_eq!(route, Route::Complex);
}

#[test]
fn test_archive_record_round_trip() {
    let record = ArchiveRecord {
        archived_at: jiff::Timestamp::UNIX_EPOCH,
        reason: ArchiveReason::Stale,
        plan: sample_plan(),
    };
    let json = serde_json::to_string(&record).expect("Failed to serialize record");
    assert!(json.contains("\"reason\":\"stale\""));

    let back: ArchiveRecord = serde_json::from_str(&json).expect("Failed to parse record");
    assert_eq!(back.reason, ArchiveReason::Stale);
    assert_eq!(back.plan.plan_id, record.plan.plan_id);
}

#[test]
fn test_plan_is_completed() {
    let mut plan = sample_plan();
    assert!(!plan.is_completed());

    for step in plan.steps.values_mut() {
        step.status = StepStatus::Completed;
    }
    assert!(plan.is_completed());

    plan.steps.clear();
    assert!(!plan.is_completed());
}

#[test]
fn test_plan_display_full_report() {
    let plan = sample_plan();
    let report = format!("{plan}");

    assert!(report.contains("# ORCHESTRATION: Implement the session module"));
    assert!(report.contains("📝 SIMPLE (complexity 4)"));
    assert!(report.contains("- Progress: 1/2 (50%)"));
    assert!(report.contains("## phase-1 — Core [sequential]"));
    assert!(report.contains("`step-1-1` Create session store (✓ Completed)"));
    assert!(report.contains("Result: store created"));
}

#[test]
fn test_plan_display_unphased_steps() {
    let mut plan = sample_plan();
    plan.steps
        .insert("step-9-1".to_string(), Step::new("Loose end"));

    let report = format!("{plan}");
    assert!(report.contains("## Unphased steps"));
    assert!(report.contains("`step-9-1` Loose end"));
}

#[test]
fn test_compact_status_line() {
    let plan = sample_plan();
    let line = format!("{}", CompactStatus(&plan));
    assert_eq!(line, "📝 1/2 50% Implement the session module");
}

#[test]
fn test_compact_status_truncates_long_task() {
    let task = "x".repeat(80);
    let plan = Plan::new(&task, Classification::for_route(Route::FastPath));
    let line = format!("{}", CompactStatus(&plan));
    assert!(line.chars().count() < 80);
    assert!(line.ends_with('…'));
}

#[test]
fn test_drift_display_on_step_entry() {
    let mut plan = sample_plan();
    let step = plan.steps.get_mut("step-1-2").expect("step exists");
    step.drift = Drift::from_items(vec![DriftItem {
        kind: DriftKind::Missing,
        symbol: "logout".to_string(),
    }]);

    let report = format!("{plan}");
    assert!(report.contains("— drift, needs sync"));
    assert!(report.contains("Drift: missing: logout"));
}

#[test]
fn test_step_spec_serialization_shape() {
    let spec = StepSpec {
        file: "src/auth.ts".to_string(),
        exports: vec!["login".to_string()],
        signatures: BTreeMap::from([(
            "login".to_string(),
            "login(user: string): Session".to_string(),
        )]),
    };
    let json = serde_json::to_value(&spec).expect("serialize");
    assert_eq!(json["file"], "src/auth.ts");
    assert_eq!(json["exports"][0], "login");
    assert_eq!(json["signatures"]["login"], "login(user: string): Session");
}
