//! Drift detection between a step's spec and the edited artifact.
//!
//! Compares the exports a step promised against what a best-effort,
//! language-aware scan of the actual file content finds. This is a
//! structural regex scan, not a compiler: it is expected to be approximate,
//! and the per-language patterns are a replaceable strategy keyed on the
//! spec file's extension. The detector only reports; remediation and
//! re-validation of downstream steps touching the same file belong to the
//! driver.

use std::collections::BTreeSet;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Drift, DriftItem, DriftKind, Observed, Step};

/// A single export found by the scan: the symbol and the declaration line
/// it came from (used for signature comparison).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedSymbol {
    pub name: String,
    pub declaration: String,
}

static TS_EXPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^\s*export\s+(?:default\s+)?(?:async\s+)?(?:function|class|const|let|var|interface|type|enum)\s+([A-Za-z_$][A-Za-z0-9_$]*)",
    )
    .expect("valid ts export regex")
});

static TS_EXPORT_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*export\s*\{([^}]*)\}").expect("valid ts export list regex"));

static RUST_EXPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^\s*pub\s+(?:async\s+)?(?:unsafe\s+)?(?:fn|struct|enum|trait|type|const|static|mod)\s+([A-Za-z_][A-Za-z0-9_]*)",
    )
    .expect("valid rust export regex")
});

static PYTHON_EXPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(?:def|class)\s+([A-Za-z_][A-Za-z0-9_]*)").expect("valid python export regex")
});

static GENERIC_EXPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:export\s+)?(?:function|class|def|fn)\s+([A-Za-z_$][A-Za-z0-9_$]*)")
        .expect("valid generic export regex")
});

/// Best-effort export scanner and spec comparator.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriftDetector;

impl DriftDetector {
    pub fn new() -> Self {
        Self
    }

    /// Check a step's artifact content against its recorded spec.
    ///
    /// Steps without a spec never drift. The verdict's `detected` flag is
    /// true iff any item was found; `needs_sync` iff any promised export is
    /// missing.
    pub fn check(&self, step: &Step, content: &str) -> Drift {
        let Some(spec) = &step.spec else {
            return Drift::default();
        };

        let observed = self.scan(&spec.file, content);
        let observed_names: BTreeSet<&str> =
            observed.iter().map(|sym| sym.name.as_str()).collect();
        let expected: BTreeSet<&str> = spec.exports.iter().map(String::as_str).collect();

        let mut items = Vec::new();

        // Symmetric difference: promised-but-absent is actionable,
        // present-but-unpromised is informational.
        for name in expected.difference(&observed_names) {
            items.push(DriftItem::new(DriftKind::Missing, *name));
        }
        for name in observed_names.difference(&expected) {
            items.push(DriftItem::new(DriftKind::Unexpected, *name));
        }

        for (name, expected_sig) in &spec.signatures {
            let Some(symbol) = observed.iter().find(|sym| &sym.name == name) else {
                // Already reported as missing (or never promised).
                continue;
            };
            if !signature_matches(expected_sig, &symbol.declaration) {
                items.push(DriftItem::new(DriftKind::SignatureChanged, name.clone()));
            }
        }

        Drift::from_items(items)
    }

    /// Scan file content for exported symbols, keyed on the file extension.
    pub fn scan(&self, file: &str, content: &str) -> Vec<ExportedSymbol> {
        let extension = Path::new(file)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "ts" | "tsx" | "js" | "jsx" | "mjs" | "cjs" => scan_typescript(content),
            "rs" => scan_with(&RUST_EXPORT, content),
            "py" => scan_with(&PYTHON_EXPORT, content),
            _ => scan_with(&GENERIC_EXPORT, content),
        }
    }

    /// Observed exports in plan-document form.
    pub fn observe(&self, file: &str, content: &str) -> Observed {
        Observed {
            exports: self.scan(file, content).into_iter().map(|s| s.name).collect(),
        }
    }
}

fn scan_with(pattern: &Regex, content: &str) -> Vec<ExportedSymbol> {
    let mut symbols = Vec::new();
    for caps in pattern.captures_iter(content) {
        // The name capture sits on the declaration line even when the
        // leading whitespace of the match spans earlier blank lines.
        if let Some(name) = caps.get(1) {
            push_unique(&mut symbols, name.as_str(), line_at(content, name.start()));
        }
    }
    symbols
}

fn scan_typescript(content: &str) -> Vec<ExportedSymbol> {
    let mut symbols = scan_with(&TS_EXPORT, content);

    // Named re-export lists: export { a, b as c }
    for caps in TS_EXPORT_LIST.captures_iter(content) {
        if let Some(list) = caps.get(1) {
            for entry in list.as_str().split(',') {
                // "x as y" exports y
                let name = entry.split_whitespace().last().unwrap_or("").trim();
                if !name.is_empty() {
                    push_unique(&mut symbols, name, line_at(content, list.start()));
                }
            }
        }
    }
    symbols
}

fn push_unique(symbols: &mut Vec<ExportedSymbol>, name: &str, declaration: String) {
    if symbols.iter().all(|s| s.name != name) {
        symbols.push(ExportedSymbol {
            name: name.to_string(),
            declaration,
        });
    }
}

/// Full source line containing the given byte offset of a match, so the
/// declaration used for signature comparison is always the matched line
/// itself, not an earlier textual twin.
fn line_at(content: &str, offset: usize) -> String {
    let start = content[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = content[offset..]
        .find('\n')
        .map_or(content.len(), |i| offset + i);
    content[start..end].trim().to_string()
}

/// Whitespace-insensitive containment check between an expected signature
/// and the observed declaration line.
fn signature_matches(expected: &str, declaration: &str) -> bool {
    let normalize = |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ");
    normalize(declaration).contains(&normalize(expected))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::StepSpec;

    fn step_with_spec(file: &str, exports: &[&str]) -> Step {
        let mut step = Step::new("Create service");
        step.spec = Some(StepSpec {
            file: file.to_string(),
            exports: exports.iter().map(|s| s.to_string()).collect(),
            signatures: BTreeMap::new(),
        });
        step
    }

    #[test]
    fn test_step_without_spec_never_drifts() {
        let detector = DriftDetector::new();
        let step = Step::new("No spec");
        let drift = detector.check(&step, "export function anything() {}");
        assert!(!drift.detected);
    }

    #[test]
    fn test_missing_export_is_actionable() {
        let detector = DriftDetector::new();
        let step = step_with_spec("src/service.ts", &["login", "logout"]);
        let drift = detector.check(&step, "export function login() {}\n");

        assert!(drift.detected);
        assert!(drift.needs_sync);
        assert_eq!(drift.items.len(), 1);
        assert_eq!(drift.items[0].kind, DriftKind::Missing);
        assert_eq!(drift.items[0].symbol, "logout");
    }

    #[test]
    fn test_unexpected_export_is_informational() {
        let detector = DriftDetector::new();
        let step = step_with_spec("src/service.ts", &["login"]);
        let drift = detector.check(
            &step,
            "export function login() {}\nexport function logout() {}\n",
        );

        assert!(drift.detected);
        assert!(!drift.needs_sync);
        assert_eq!(drift.items.len(), 1);
        assert_eq!(drift.items[0].kind, DriftKind::Unexpected);
        assert_eq!(drift.items[0].symbol, "logout");
    }

    #[test]
    fn test_matching_exports_do_not_drift() {
        let detector = DriftDetector::new();
        let step = step_with_spec("src/service.ts", &["login", "logout"]);
        let drift = detector.check(
            &step,
            "export function login() {}\nexport function logout() {}\n",
        );
        assert!(!drift.detected);
        assert!(!drift.needs_sync);
        assert!(drift.items.is_empty());
    }

    #[test]
    fn test_signature_change_is_reported() {
        let detector = DriftDetector::new();
        let mut step = step_with_spec("src/service.ts", &["login"]);
        step.spec.as_mut().unwrap().signatures.insert(
            "login".to_string(),
            "function login(user: string, password: string)".to_string(),
        );

        let drift = detector.check(&step, "export function login(token: string) {}\n");
        assert!(drift.detected);
        assert!(drift
            .items
            .iter()
            .any(|i| i.kind == DriftKind::SignatureChanged && i.symbol == "login"));
    }

    #[test]
    fn test_matching_signature_does_not_drift() {
        let detector = DriftDetector::new();
        let mut step = step_with_spec("src/service.ts", &["login"]);
        step.spec.as_mut().unwrap().signatures.insert(
            "login".to_string(),
            "function login(user: string)".to_string(),
        );

        let drift = detector.check(&step, "export function   login(user: string) {}\n");
        assert!(!drift.detected);
    }

    #[test]
    fn test_signature_compares_the_declaring_line() {
        let detector = DriftDetector::new();
        let mut step = step_with_spec("src/service.ts", &["login"]);
        step.spec.as_mut().unwrap().signatures.insert(
            "login".to_string(),
            "function login(user: string, password: string)".to_string(),
        );

        // An earlier comment carries the old signature text; the verdict
        // must come from the actual declaration line below it.
        let content = "\
// export function login(user: string, password: string)
export function login(token: string) {}
";
        let drift = detector.check(&step, content);
        assert!(drift
            .items
            .iter()
            .any(|i| i.kind == DriftKind::SignatureChanged && i.symbol == "login"));
    }

    #[test]
    fn test_typescript_export_forms() {
        let detector = DriftDetector::new();
        let content = r#"
export function alpha() {}
export const beta = 1;
export class Gamma {}
export interface Delta {}
export { epsilon, zeta as eta };
export default function omega() {}
"#;
        let names: Vec<String> = detector
            .scan("src/mod.ts", content)
            .into_iter()
            .map(|s| s.name)
            .collect();
        for expected in ["alpha", "beta", "Gamma", "Delta", "epsilon", "eta", "omega"] {
            assert!(names.contains(&expected.to_string()), "missing {expected}");
        }
        assert!(!names.contains(&"zeta".to_string()));
    }

    #[test]
    fn test_rust_exports() {
        let detector = DriftDetector::new();
        let content = "pub fn run() {}\npub struct Engine;\nfn private() {}\npub(crate) fn hidden() {}\n";
        let names: Vec<String> = detector
            .scan("src/lib.rs", content)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["run", "Engine"]);
    }

    #[test]
    fn test_python_top_level_exports() {
        let detector = DriftDetector::new();
        let content = "def handler(event):\n    pass\n\nclass Worker:\n    def run(self):\n        pass\n";
        let names: Vec<String> = detector
            .scan("app/worker.py", content)
            .into_iter()
            .map(|s| s.name)
            .collect();
        // Indented methods are not module exports.
        assert_eq!(names, ["handler", "Worker"]);
    }

    #[test]
    fn test_unknown_extension_uses_generic_scan() {
        let detector = DriftDetector::new();
        let content = "function greet() {}\nclass Greeter {}\n";
        let names: Vec<String> = detector
            .scan("scripts/tool.xyz", content)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["greet", "Greeter"]);
    }
}
