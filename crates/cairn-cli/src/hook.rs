//! JSON hook boundary for the external driver.
//!
//! The driver pipes a prompt payload into `cairn hook` on every user
//! prompt. The payload carries the prompt text under one of several keys
//! depending on the driver version (`userPrompt`, `userPromptContent`,
//! `prompt`). The response is a single JSON object on stdout and the exit
//! code is always 0: the hook must never block the driver, so every
//! internal failure degrades to a pass-through response (fail open).

use cairn_core::{Orchestrator, SubmitTask, TaskOutcome};
use log::warn;
use serde::Serialize;
use std::io::Read;

/// Hook response consumed by the driver.
///
/// `continue` must always be true: the plan-state engine observes prompts,
/// it never vetoes them.
#[derive(Debug, Serialize)]
struct HookResponse {
    #[serde(rename = "continue")]
    continue_: bool,
    #[serde(rename = "suppressOutput")]
    suppress_output: bool,
    #[serde(rename = "systemMessage", skip_serializing_if = "Option::is_none")]
    system_message: Option<String>,
}

impl HookResponse {
    fn pass_through() -> Self {
        Self {
            continue_: true,
            suppress_output: true,
            system_message: None,
        }
    }

    fn with_message(message: String) -> Self {
        Self {
            continue_: true,
            suppress_output: false,
            system_message: Some(message),
        }
    }
}

/// Run the hook boundary: read the payload from stdin, submit the prompt,
/// print the response. Infallible by contract.
pub async fn run_hook(orchestrator: &Orchestrator) {
    let response = process(orchestrator).await;
    emit(&response);
}

async fn process(orchestrator: &Orchestrator) -> HookResponse {
    let mut raw = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut raw) {
        warn!("hook: failed to read stdin: {e}");
        return HookResponse::pass_through();
    }

    let Some(prompt) = extract_prompt(&raw) else {
        return HookResponse::pass_through();
    };

    match orchestrator
        .submit_task(&SubmitTask { task: prompt })
        .await
    {
        Ok(outcome) => describe(&outcome),
        Err(e) => {
            warn!("hook: task submission failed: {e}");
            HookResponse::pass_through()
        }
    }
}

/// Pull the prompt text out of the payload, trying the known keys in
/// order. A payload without any of them (or that is not JSON at all) is
/// not an error; there is just nothing to do.
fn extract_prompt(raw: &str) -> Option<String> {
    let payload: serde_json::Value = serde_json::from_str(raw).ok()?;
    ["userPrompt", "userPromptContent", "prompt"]
        .iter()
        .find_map(|key| payload.get(key))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

fn describe(outcome: &TaskOutcome) -> HookResponse {
    match outcome {
        TaskOutcome::Deferred | TaskOutcome::Retained(_) => HookResponse::pass_through(),
        TaskOutcome::Created(plan) => HookResponse::with_message(format!(
            "{} plan created on the {} route ({} iterations budgeted)",
            plan.classification.route.icon(),
            plan.classification.route,
            plan.loop_state.max_iterations
        )),
        TaskOutcome::Replaced { plan, .. } => HookResponse::with_message(format!(
            "{} previous plan archived; new plan on the {} route",
            plan.classification.route.icon(),
            plan.classification.route
        )),
        TaskOutcome::Archived { .. } => {
            HookResponse::with_message("plan archived".to_string())
        }
    }
}

fn emit(response: &HookResponse) {
    // Serialization of this struct cannot fail; fall back to a literal
    // pass-through if it somehow does.
    match serde_json::to_string(response) {
        Ok(json) => println!("{json}"),
        Err(_) => println!("{{\"continue\": true, \"suppressOutput\": true}}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_prompt_key_precedence() {
        let raw = r#"{"prompt": "b", "userPrompt": "a"}"#;
        assert_eq!(extract_prompt(raw), Some("a".to_string()));
    }

    #[test]
    fn test_extract_prompt_fallback_keys() {
        assert_eq!(
            extract_prompt(r#"{"userPromptContent": "x"}"#),
            Some("x".to_string())
        );
        assert_eq!(extract_prompt(r#"{"prompt": "y"}"#), Some("y".to_string()));
    }

    #[test]
    fn test_extract_prompt_tolerates_garbage() {
        assert_eq!(extract_prompt("not json"), None);
        assert_eq!(extract_prompt("{}"), None);
        assert_eq!(extract_prompt(r#"{"prompt": 42}"#), None);
    }

    #[test]
    fn test_response_serialization() {
        let json = serde_json::to_string(&HookResponse::pass_through()).expect("serialize");
        assert!(json.contains("\"continue\":true"));
        assert!(!json.contains("systemMessage"));

        let json = serde_json::to_string(&HookResponse::with_message("hi".to_string()))
            .expect("serialize");
        assert!(json.contains("\"systemMessage\":\"hi\""));
    }
}
