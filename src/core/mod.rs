mod boundaries;
mod generator;
mod navigation;
mod steps;

pub use boundaries::{Boundary, BoundaryClassifier, BoundaryKind};
pub use generator::{generate_walkthrough, pick_scenario, Scenario, WalkthroughGenerator};
pub use navigation::{
    parse_location, BranchPoint, Navigator, SearchNavigator, TargetKind, TraceContext, TraceTarget,
};
pub use steps::{BranchOption, Chapter, ContinuationContext, Step, Walkthrough};
