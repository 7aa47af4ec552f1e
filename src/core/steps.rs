//! Typed step schema shared by the generator and every consumer.
//!
//! `Step` is a closed sum type on purpose: renderers and serializers match on
//! it exhaustively, so adding a variant is a compile-visible event rather
//! than an optional-field convention.

use serde::{Deserialize, Serialize};

/// One option presented at a branch point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchOption {
    pub name: String,
    pub description: String,
    pub location: String,
}

/// A single walkthrough step. Every variant carries a title, a repository
/// location (`path` or `path:line`, possibly empty for synthetic steps) and a
/// prose explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Orientation for the surface being walked.
    Overview {
        title: String,
        location: String,
        explanation: String,
        key_concepts: Vec<String>,
    },
    /// The entry point the trace starts from.
    Surface {
        title: String,
        location: String,
        explanation: String,
        surface_kind: Option<String>,
        example_usage: Option<String>,
    },
    /// Execution followed into a function or method.
    Trace {
        title: String,
        location: String,
        explanation: String,
        calls_to: Vec<String>,
        called_by: Vec<String>,
    },
    /// A key data structure encountered on the path.
    Data {
        title: String,
        location: String,
        explanation: String,
        fields: Vec<String>,
        used_by: Vec<String>,
    },
    /// Tracing reached a boundary (external code, I/O, ...).
    Boundary {
        title: String,
        location: String,
        explanation: String,
        boundary_kind: String,
        can_continue: bool,
    },
    /// Multiple plausible continuations; option 0 is the default path.
    Branch {
        title: String,
        location: String,
        explanation: String,
        options: Vec<BranchOption>,
        default_option: usize,
    },
    /// Closing summary, emitted exactly once per terminated walkthrough.
    Recap {
        title: String,
        location: String,
        explanation: String,
        summary: String,
        mental_model: String,
        next_steps: Vec<String>,
    },
}

impl Step {
    pub fn title(&self) -> &str {
        match self {
            Step::Overview { title, .. }
            | Step::Surface { title, .. }
            | Step::Trace { title, .. }
            | Step::Data { title, .. }
            | Step::Boundary { title, .. }
            | Step::Branch { title, .. }
            | Step::Recap { title, .. } => title,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            Step::Overview { location, .. }
            | Step::Surface { location, .. }
            | Step::Trace { location, .. }
            | Step::Data { location, .. }
            | Step::Boundary { location, .. }
            | Step::Branch { location, .. }
            | Step::Recap { location, .. } => location,
        }
    }

    pub fn explanation(&self) -> &str {
        match self {
            Step::Overview { explanation, .. }
            | Step::Surface { explanation, .. }
            | Step::Trace { explanation, .. }
            | Step::Data { explanation, .. }
            | Step::Boundary { explanation, .. }
            | Step::Branch { explanation, .. }
            | Step::Recap { explanation, .. } => explanation,
        }
    }

    pub fn is_recap(&self) -> bool {
        matches!(self, Step::Recap { .. })
    }
}

/// A logical grouping of steps. The generator currently fills a single
/// chapter per walkthrough; the shape allows more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub description: String,
    pub steps: Vec<Step>,
}

/// Serializable snapshot of trace progress, published whenever a walkthrough
/// can continue. Hosts persist it across processes; the live generator
/// resumes from its own in-memory context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuationContext {
    pub current_location: String,
    pub depth: usize,
    pub max_depth: usize,
    pub visited: Vec<String>,
}

/// Complete walkthrough of one codebase path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Walkthrough {
    pub title: String,
    pub goal: String,
    pub surface: String,
    pub chapters: Vec<Chapter>,
    pub has_more: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_context: Option<ContinuationContext>,
}

impl Walkthrough {
    pub fn new(title: impl Into<String>, goal: impl Into<String>, surface: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            goal: goal.into(),
            surface: surface.into(),
            chapters: Vec::new(),
            has_more: false,
            continuation_context: None,
        }
    }

    /// Append a step to the last chapter, creating the default chapter on
    /// first use.
    pub fn add_step(&mut self, step: Step) {
        if self.chapters.is_empty() {
            self.chapters.push(Chapter {
                title: "Walkthrough".to_string(),
                description: "Generated walkthrough steps.".to_string(),
                steps: Vec::new(),
            });
        }
        self.chapters
            .last_mut()
            .expect("chapter just ensured")
            .steps
            .push(step);
    }

    /// Steps of the most recent chapter.
    pub fn current_steps(&self) -> &[Step] {
        self.chapters.last().map(|c| c.steps.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_serde_tagging() {
        let step = Step::Boundary {
            title: "Boundary: io".to_string(),
            location: "src/db.py:10".to_string(),
            explanation: "I/O operation (network/database/filesystem)".to_string(),
            boundary_kind: "io".to_string(),
            can_continue: true,
        };
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"type\":\"boundary\""));

        let back: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }

    #[test]
    fn test_add_step_creates_default_chapter() {
        let mut walkthrough = Walkthrough::new("t", "use", "cli");
        walkthrough.add_step(Step::Overview {
            title: "Overview".to_string(),
            location: String::new(),
            explanation: String::new(),
            key_concepts: vec![],
        });
        assert_eq!(walkthrough.chapters.len(), 1);
        assert_eq!(walkthrough.chapters[0].title, "Walkthrough");
        assert_eq!(walkthrough.current_steps().len(), 1);
    }
}
