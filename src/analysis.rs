//! Input schema for the walkthrough core.
//!
//! A `RepoAnalysis` is produced upstream (by whatever orientation stage the
//! host runs) and consumed read-only here. The core never mutates it and only
//! depends on the fields below; richer orientation data stays on the host
//! side.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserGoal {
    Use,
    Contribute,
    Debug,
    Architecture,
}

impl UserGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserGoal::Use => "use",
            UserGoal::Contribute => "contribute",
            UserGoal::Debug => "debug",
            UserGoal::Architecture => "architecture",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Cli,
    Http,
    Grpc,
    PublicApi,
    Plugin,
    Config,
    Ui,
}

impl SurfaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceKind::Cli => "cli",
            SurfaceKind::Http => "http",
            SurfaceKind::Grpc => "grpc",
            SurfaceKind::PublicApi => "public_api",
            SurfaceKind::Plugin => "plugin",
            SurfaceKind::Config => "config",
            SurfaceKind::Ui => "ui",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    Library,
    Binary,
    Both,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Structure {
    #[serde(rename = "single-package")]
    SinglePackage,
    #[serde(rename = "monorepo")]
    Monorepo,
    #[serde(rename = "workspace")]
    Workspace,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Runtime {
    Interpreted,
    Compiled,
    Mixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codegen {
    None,
    Partial,
    Heavy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facets {
    pub distribution: Distribution,
    pub interfaces: Vec<String>,
    pub structure: Structure,
    pub runtime: Runtime,
    pub domain: Vec<String>,
    pub codegen: Codegen,
}

impl Default for Facets {
    fn default() -> Self {
        Self {
            distribution: Distribution::Binary,
            interfaces: Vec::new(),
            structure: Structure::SinglePackage,
            runtime: Runtime::Interpreted,
            domain: Vec::new(),
            codegen: Codegen::None,
        }
    }
}

/// An externally visible entry surface (CLI command, HTTP route, public API,
/// ...) a walkthrough can start from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surface {
    pub kind: SurfaceKind,
    pub name: String,
    pub description: String,
    pub location: String,
    pub importance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exports: Option<Vec<String>>,
}

/// A recommended starting location for a specific user goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryPoint {
    pub path: String,
    pub name: String,
    pub description: String,
    pub why: String,
}

/// A named architectural component the orientation stage considers central.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub path: String,
    pub description: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub surfaces: Vec<String>,
}

/// Marker for files produced by code generation (protoc output, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenMarker {
    pub pattern: String,
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoAnalysis {
    pub purpose: String,
    #[serde(default)]
    pub facets: Facets,
    #[serde(default)]
    pub surfaces: Vec<Surface>,
    #[serde(default)]
    pub entry_points_by_goal: HashMap<UserGoal, Vec<EntryPoint>>,
    #[serde(default)]
    pub key_components: Vec<Component>,
    #[serde(default)]
    pub codegen_markers: Vec<CodegenMarker>,
}

impl RepoAnalysis {
    /// Minimal analysis for hosts that skip the orientation stage entirely.
    /// Tracing still works; boundary classification just has fewer signals.
    pub fn minimal(purpose: impl Into<String>) -> Self {
        Self {
            purpose: purpose.into(),
            facets: Facets::default(),
            surfaces: Vec::new(),
            entry_points_by_goal: HashMap::new(),
            key_components: Vec::new(),
            codegen_markers: Vec::new(),
        }
    }

    /// Entry points recommended for a goal, best first.
    pub fn entry_points_for(&self, goal: UserGoal) -> &[EntryPoint] {
        self.entry_points_by_goal
            .get(&goal)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_keyed_map_round_trips() {
        let mut analysis = RepoAnalysis::minimal("demo");
        analysis.entry_points_by_goal.insert(
            UserGoal::Debug,
            vec![EntryPoint {
                path: "src/main.py".into(),
                name: "main".into(),
                description: "process entry".into(),
                why: "first frame in every stack trace".into(),
            }],
        );

        let json = serde_json::to_string(&analysis).unwrap();
        assert!(json.contains("\"debug\""));
        let back: RepoAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entry_points_for(UserGoal::Debug).len(), 1);
        assert!(back.entry_points_for(UserGoal::Use).is_empty());
    }
}
