//! Boundary classification: where a trace should stop or pause.
//!
//! Rules are checked in a fixed precedence order (framework > generated >
//! io > abstraction > repetition); the first match wins. The order is part
//! of the contract — reordering changes classifications.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::RepoAnalysis;
use crate::core::navigation::TraceTarget;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    Framework,
    Generated,
    Io,
    Abstraction,
    Repetition,
}

impl BoundaryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryKind::Framework => "framework",
            BoundaryKind::Generated => "generated",
            BoundaryKind::Io => "io",
            BoundaryKind::Abstraction => "abstraction",
            BoundaryKind::Repetition => "repetition",
        }
    }
}

/// A classified stopping or pausing point. Computed per target, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub kind: BoundaryKind,
    pub description: String,
    pub can_cross: bool,
}

/// Path segments that mark vendored/third-party code.
const EXTERNAL_MARKERS: &[&str] = &[
    "site-packages",
    "node_modules",
    "vendor/",
    "third_party",
    ".cargo/",
    "gopath/pkg/mod",
];

/// Directory-name hints for generated output.
const GENERATED_MARKERS: &[&str] = &["generated", "gen", "dist", "build"];

/// Classifies trace targets against boundary heuristics.
pub struct BoundaryClassifier {
    io_pattern: Regex,
}

impl BoundaryClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            io_pattern: Regex::new(
                r"(?i)\bopen\(|\brequests\.|\bhttp|\bfetch\(|\bsocket\b|\bdb\b|\bsql\b|\bquery\(|\bexecute\(|\bread\(|\bwrite\(",
            )?,
        })
    }

    /// Check whether `target` sits on a meaningful boundary. `None` means
    /// tracing continues normally.
    pub fn check_boundary(&self, target: &TraceTarget, analysis: &RepoAnalysis) -> Option<Boundary> {
        if is_external_dependency(&target.location) {
            let package = package_name(&target.location);
            return Some(Boundary {
                kind: BoundaryKind::Framework,
                description: format!("Entering {package} (external dependency)"),
                can_cross: false,
            });
        }

        if is_generated_code(&target.location, analysis) {
            return Some(Boundary {
                kind: BoundaryKind::Generated,
                description: "Generated code - see source-of-truth instead".to_string(),
                can_cross: false,
            });
        }

        if self.has_io_operations(target.content.as_deref().unwrap_or("")) {
            return Some(Boundary {
                kind: BoundaryKind::Io,
                description: "I/O operation (network/database/filesystem)".to_string(),
                can_cross: true,
            });
        }

        if is_core_abstraction(target, analysis) {
            return Some(Boundary {
                kind: BoundaryKind::Abstraction,
                description: format!("Core abstraction: {}", target.name),
                can_cross: true,
            });
        }

        if is_repetitive_pattern(target) {
            return Some(Boundary {
                kind: BoundaryKind::Repetition,
                description: "This pattern repeats for other cases".to_string(),
                can_cross: false,
            });
        }

        None
    }

    fn has_io_operations(&self, content: &str) -> bool {
        self.io_pattern.is_match(content)
    }
}

fn is_external_dependency(location: &str) -> bool {
    let lowered = location.to_lowercase();
    EXTERNAL_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Dependency name from the path segment after a vendoring marker, falling
/// back to the last segment.
fn package_name(location: &str) -> String {
    let parts: Vec<&str> = location
        .split(['/', '\\'])
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        return "dependency".to_string();
    }
    for marker in ["site-packages", "node_modules"] {
        if let Some(idx) = parts.iter().position(|part| *part == marker) {
            if idx + 1 < parts.len() {
                return parts[idx + 1].to_string();
            }
        }
    }
    parts[parts.len() - 1].to_string()
}

fn is_generated_code(location: &str, analysis: &RepoAnalysis) -> bool {
    let lowered = location.to_lowercase();
    if GENERATED_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        return true;
    }
    analysis.codegen_markers.iter().any(|marker| {
        marker
            .files
            .iter()
            .any(|path| location.ends_with(path.as_str()) || location == path.as_str())
    })
}

fn is_core_abstraction(target: &TraceTarget, analysis: &RepoAnalysis) -> bool {
    let name = target.name.to_lowercase();
    analysis.key_components.iter().any(|component| {
        component.name.to_lowercase() == name || target.location.starts_with(&component.path)
    })
}

fn is_repetitive_pattern(target: &TraceTarget) -> bool {
    let lowered = target.location.to_lowercase();
    if lowered.contains("/tests/") || lowered.starts_with("tests/") {
        return true;
    }
    target.name.to_lowercase().ends_with("handler")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{CodegenMarker, Component};
    use crate::core::navigation::TargetKind;

    fn target(name: &str, location: &str, content: Option<&str>) -> TraceTarget {
        TraceTarget {
            name: name.to_string(),
            location: location.to_string(),
            kind: TargetKind::Function,
            preview: String::new(),
            calls_to: Vec::new(),
            called_by: Vec::new(),
            content: content.map(str::to_string),
        }
    }

    #[test]
    fn test_framework_beats_repetition() {
        let classifier = BoundaryClassifier::new().unwrap();
        let analysis = RepoAnalysis::minimal("demo");
        // Inside a vendored path AND a tests path: rule 1 wins.
        let boundary = classifier
            .check_boundary(&target("run", "vendor/pkg/tests/util.py:3", None), &analysis)
            .expect("boundary");
        assert_eq!(boundary.kind, BoundaryKind::Framework);
        assert!(!boundary.can_cross);
    }

    #[test]
    fn test_package_name_extraction() {
        assert_eq!(package_name("node_modules/react/index.js"), "react");
        assert_eq!(
            package_name("lib/python3.11/site-packages/flask/app.py"),
            "flask"
        );
        assert_eq!(package_name("vendor/lib.go"), "lib.go");
        assert_eq!(package_name(""), "dependency");
    }

    #[test]
    fn test_io_is_crossable() {
        let classifier = BoundaryClassifier::new().unwrap();
        let analysis = RepoAnalysis::minimal("demo");
        let boundary = classifier
            .check_boundary(
                &target("load", "src/loader.py:8", Some("with open(path) as fh:")),
                &analysis,
            )
            .expect("boundary");
        assert_eq!(boundary.kind, BoundaryKind::Io);
        assert!(boundary.can_cross);
    }

    #[test]
    fn test_io_tokens_respect_word_boundaries() {
        let classifier = BoundaryClassifier::new().unwrap();
        assert!(!classifier.has_io_operations("collect feedback from users"));
        assert!(classifier.has_io_operations("cursor = db.cursor()"));
        assert!(classifier.has_io_operations("resp = requests.get(url)"));
    }

    #[test]
    fn test_generated_via_codegen_marker() {
        let classifier = BoundaryClassifier::new().unwrap();
        let mut analysis = RepoAnalysis::minimal("demo");
        analysis.codegen_markers.push(CodegenMarker {
            pattern: "*_pb2.py".to_string(),
            files: vec!["api_pb2.py".to_string()],
        });
        let boundary = classifier
            .check_boundary(&target("decode", "proto/api_pb2.py", None), &analysis)
            .expect("boundary");
        assert_eq!(boundary.kind, BoundaryKind::Generated);
    }

    #[test]
    fn test_abstraction_via_key_component() {
        let classifier = BoundaryClassifier::new().unwrap();
        let mut analysis = RepoAnalysis::minimal("demo");
        analysis.key_components.push(Component {
            name: "Scheduler".to_string(),
            path: "src/sched/".to_string(),
            description: String::new(),
            depends_on: Vec::new(),
            surfaces: Vec::new(),
        });
        let boundary = classifier
            .check_boundary(&target("scheduler", "src/core/plan.py:9", None), &analysis)
            .expect("boundary");
        assert_eq!(boundary.kind, BoundaryKind::Abstraction);
        assert!(boundary.can_cross);
    }

    #[test]
    fn test_repetition_for_handler_suffix() {
        let classifier = BoundaryClassifier::new().unwrap();
        let analysis = RepoAnalysis::minimal("demo");
        let boundary = classifier
            .check_boundary(&target("RequestHandler", "src/web/req.py:4", None), &analysis)
            .expect("boundary");
        assert_eq!(boundary.kind, BoundaryKind::Repetition);
        assert!(!boundary.can_cross);
    }

    #[test]
    fn test_plain_function_is_no_boundary() {
        let classifier = BoundaryClassifier::new().unwrap();
        let analysis = RepoAnalysis::minimal("demo");
        assert!(classifier
            .check_boundary(&target("reshape", "src/core/shape.py:12", Some("return x")), &analysis)
            .is_none());
    }
}
