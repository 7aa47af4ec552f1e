//! Codetrail turns a static scan of a source tree into an interactive,
//! resumable walkthrough: a sequence of typed steps tracing execution from
//! an entry point outward, stopping at meaningful boundaries and recording
//! branch points where several continuations are plausible.
//!
//! The crate is the deterministic core of a larger exploration tool. It
//! deliberately builds no parse tree: navigation is a best-effort, pattern
//! driven approximation that degrades to empty results instead of failing.
//!
//! ```no_run
//! use codetrail::{
//!     generate_walkthrough, Config, RepoAnalysis, SearchNavigator, Surface, SurfaceKind,
//!     UserGoal,
//! };
//!
//! # fn main() -> codetrail::Result<()> {
//! let config = Config::default();
//! let navigator = SearchNavigator::new("/path/to/repo", &config)?;
//! let analysis = RepoAnalysis::minimal("An example service");
//! let surface = Surface {
//!     kind: SurfaceKind::Cli,
//!     name: "serve".into(),
//!     description: "start the server".into(),
//!     location: "src/main.py".into(),
//!     importance: "primary".into(),
//!     commands: None,
//!     routes: None,
//!     exports: None,
//! };
//! let walkthrough = generate_walkthrough(analysis, UserGoal::Use, &surface, navigator, &config.trace)?;
//! println!("{}", serde_json::to_string_pretty(&walkthrough)?);
//! # Ok(())
//! # }
//! ```

mod analysis;
mod config;
mod core;
mod error;
mod tools;

pub use analysis::{
    Codegen, CodegenMarker, Component, Distribution, EntryPoint, Facets, RepoAnalysis, Runtime,
    Structure, Surface, SurfaceKind, UserGoal,
};
pub use config::{Config, ToolsConfig, TraceConfig};
pub use core::{
    generate_walkthrough, parse_location, pick_scenario, Boundary, BoundaryClassifier,
    BoundaryKind, BranchOption, BranchPoint, Chapter, ContinuationContext, Navigator, Scenario,
    SearchNavigator, Step, TargetKind, TraceContext, TraceTarget, Walkthrough,
    WalkthroughGenerator,
};
pub use error::{CodetrailError, Result};
pub use tools::RepoTools;
