//! Heuristic symbol navigation for walkthrough tracing.
//!
//! No parse tree, no symbol table: a data-driven table of definition
//! patterns plus a repo-wide text search approximate "where does execution
//! go next" across common syntaxes. Misses degrade to empty results so the
//! generator can treat them as trace termination.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::Result;
use crate::tools::RepoTools;

/// What kind of definition a resolved target points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Function,
    Class,
    Struct,
    Interface,
    Symbol,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Function => "function",
            TargetKind::Class => "class",
            TargetKind::Struct => "struct",
            TargetKind::Interface => "interface",
            TargetKind::Symbol => "symbol",
        }
    }

    /// Kinds that describe data shapes rather than executable code.
    pub fn is_data_like(&self) -> bool {
        matches!(self, TargetKind::Class | TargetKind::Struct | TargetKind::Interface)
    }
}

/// Resolved definition or symbol to continue tracing into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceTarget {
    pub name: String,
    /// `path` or `path:line` within the repository.
    pub location: String,
    pub kind: TargetKind,
    pub preview: String,
    pub calls_to: Vec<String>,
    pub called_by: Vec<String>,
    /// Multi-line excerpt around the definition, when available.
    pub content: Option<String>,
}

/// Decision point with multiple candidate targets. Recorded as history;
/// never popped automatically.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchPoint {
    pub location: String,
    pub options: Vec<TraceTarget>,
}

/// Mutable trace state for one lazy generation run.
#[derive(Debug, Clone)]
pub struct TraceContext {
    pub current_location: String,
    pub depth: usize,
    pub max_depth: usize,
    pub visited: HashSet<String>,
    pub branch_points: Vec<BranchPoint>,
}

impl TraceContext {
    pub fn new(current_location: impl Into<String>, max_depth: usize) -> Self {
        Self {
            current_location: current_location.into(),
            depth: 0,
            max_depth,
            visited: HashSet::new(),
            branch_points: Vec::new(),
        }
    }
}

/// Interface for tracing navigation. `&mut self` because implementations
/// memoize resolutions for their lifetime.
pub trait Navigator {
    /// Candidate next targets reachable from `location`. Missing files and
    /// unresolvable symbols yield an empty list, never an error.
    fn find_next_steps(&mut self, location: &str, max_results: usize) -> Vec<TraceTarget>;
}

/// One row of the definition-pattern strategy table.
struct DefinitionPattern {
    regex: Regex,
    kind: TargetKind,
}

/// Pattern table rows as `(pattern, kind)`. Anchored at line start (with
/// leading whitespace) so call sites don't match. New syntaxes are added
/// here, not in control flow.
const DEFINITION_PATTERNS: &[(&str, TargetKind)] = &[
    (r"^\s*def\s+([A-Za-z_][A-Za-z0-9_]*)", TargetKind::Function),
    (r"^\s*class\s+([A-Za-z_][A-Za-z0-9_]*)", TargetKind::Class),
    (r"^\s*function\s+([A-Za-z_][A-Za-z0-9_]*)", TargetKind::Function),
    (r"^\s*export\s+function\s+([A-Za-z_][A-Za-z0-9_]*)", TargetKind::Function),
    (r"^\s*const\s+([A-Za-z_][A-Za-z0-9_]*)\s*=\s*\(", TargetKind::Function),
    (r"^\s*let\s+([A-Za-z_][A-Za-z0-9_]*)\s*=\s*\(", TargetKind::Function),
    (r"^\s*var\s+([A-Za-z_][A-Za-z0-9_]*)\s*=\s*\(", TargetKind::Function),
    (r"^\s*func\s+([A-Za-z_][A-Za-z0-9_]*)", TargetKind::Function),
    (r"^\s*fn\s+([A-Za-z_][A-Za-z0-9_]*)", TargetKind::Function),
    (r"^\s*struct\s+([A-Za-z_][A-Za-z0-9_]*)", TargetKind::Struct),
    (r"^\s*interface\s+([A-Za-z_][A-Za-z0-9_]*)", TargetKind::Interface),
];

/// Control-flow keywords and common builtins that look like calls but are
/// never worth tracing into.
const CALL_STOPWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "return", "yield", "await", "new", "delete",
    "sizeof", "typeof", "print", "len", "list", "dict", "set", "map", "filter", "reduce",
    "super", "this", "self", "console", "log", "error", "debug", "warn",
];

/// Heuristic navigator backed by file reads and repo-wide regex search.
pub struct SearchNavigator {
    tools: RepoTools,
    scope_window: usize,
    preview_lines: usize,
    definition_patterns: Vec<DefinitionPattern>,
    call_pattern: Regex,
    stopwords: HashSet<&'static str>,
    /// Per-name resolution memo, including negative results. Lives as long
    /// as this navigator; a walkthrough run assumes a static tree snapshot.
    cache: HashMap<String, Option<TraceTarget>>,
}

impl SearchNavigator {
    pub fn new<P: AsRef<Path>>(repo_root: P, config: &Config) -> Result<Self> {
        let mut definition_patterns = Vec::with_capacity(DEFINITION_PATTERNS.len());
        for (pattern, kind) in DEFINITION_PATTERNS {
            definition_patterns.push(DefinitionPattern {
                regex: Regex::new(pattern)?,
                kind: *kind,
            });
        }

        Ok(Self {
            tools: RepoTools::new(repo_root, config.tools.clone()),
            scope_window: config.trace.scope_window,
            preview_lines: config.trace.preview_lines,
            definition_patterns,
            call_pattern: Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*\(")?,
            stopwords: CALL_STOPWORDS.iter().copied().collect(),
            cache: HashMap::new(),
        })
    }

    pub fn tools(&self) -> &RepoTools {
        &self.tools
    }

    /// First definition-pattern match on a line, if any.
    fn match_definition<'a>(&self, line: &'a str) -> Option<(&'a str, TargetKind)> {
        for pattern in &self.definition_patterns {
            if let Some(captures) = pattern.regex.captures(line) {
                if let Some(name) = captures.get(1) {
                    return Some((name.as_str(), pattern.kind));
                }
            }
        }
        None
    }

    /// Nearest definition at or above `line_index`.
    fn find_enclosing_definition(&self, lines: &[&str], line_index: usize) -> Option<(String, TargetKind, usize)> {
        for idx in (0..=line_index.min(lines.len().saturating_sub(1))).rev() {
            if let Some((name, kind)) = self.match_definition(lines[idx]) {
                return Some((name.to_string(), kind, idx));
            }
        }
        None
    }

    fn find_first_definition(&self, lines: &[&str]) -> Option<(String, TargetKind, usize)> {
        for (idx, line) in lines.iter().enumerate() {
            if let Some((name, kind)) = self.match_definition(line) {
                return Some((name.to_string(), kind, idx));
            }
        }
        None
    }

    /// Call-like tokens in scope order, deduplicated, stopwords removed.
    fn extract_call_names(&self, lines: &[&str]) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut calls: Vec<String> = Vec::new();
        for line in lines {
            for captures in self.call_pattern.captures_iter(line) {
                let Some(name) = captures.get(1) else { continue };
                let name = name.as_str();
                if self.stopwords.contains(name) || seen.contains(name) {
                    continue;
                }
                seen.insert(name);
                calls.push(name.to_string());
            }
        }
        calls
    }

    fn scope_slice<'a>(&self, lines: &'a [&'a str], start: usize) -> &'a [&'a str] {
        let end = lines.len().min(start + self.scope_window);
        &lines[start..end]
    }

    fn excerpt(&self, scope: &[&str]) -> String {
        scope[..scope.len().min(self.preview_lines)].join("\n")
    }

    /// All definitions in a file, in file order. Used when call extraction
    /// produces nothing (data-only files) so callers can still branch
    /// somewhere instead of stalling.
    fn fallback_definitions(&self, path: &str, lines: &[&str], max_results: usize) -> Vec<TraceTarget> {
        let mut targets = Vec::new();
        for (idx, line) in lines.iter().enumerate() {
            if let Some((name, kind)) = self.match_definition(line) {
                let scope = self.scope_slice(lines, idx);
                targets.push(TraceTarget {
                    name: name.to_string(),
                    location: format!("{}:{}", path, idx + 1),
                    kind,
                    preview: line.trim().to_string(),
                    calls_to: self.extract_call_names(scope),
                    called_by: Vec::new(),
                    content: Some(self.excerpt(scope)),
                });
                if targets.len() >= max_results {
                    break;
                }
            }
        }
        targets
    }

    /// Resolve a call name, preferring a definition in the current file and
    /// falling back to a repo-wide search. Results, including misses, are
    /// memoized per name.
    fn resolve_symbol(&mut self, name: &str, path: &str, lines: &[&str]) -> Option<TraceTarget> {
        if let Some(cached) = self.cache.get(name) {
            trace!(name, "symbol served from cache");
            return cached.clone();
        }

        if let Some(target) = self.resolve_in_file(name, path, lines) {
            self.cache.insert(name.to_string(), Some(target.clone()));
            return Some(target);
        }

        let resolved = self.resolve_repo_wide(name);
        if resolved.is_none() {
            debug!(name, "symbol not resolved anywhere; caching miss");
        }
        self.cache.insert(name.to_string(), resolved.clone());
        resolved
    }

    fn resolve_in_file(&self, name: &str, path: &str, lines: &[&str]) -> Option<TraceTarget> {
        let definition = definition_line_pattern(name);
        for (idx, line) in lines.iter().enumerate() {
            if definition.is_match(line) {
                let scope = self.scope_slice(lines, idx);
                return Some(TraceTarget {
                    name: name.to_string(),
                    location: format!("{}:{}", path, idx + 1),
                    kind: infer_kind_from_line(line),
                    preview: line.trim().to_string(),
                    calls_to: self.extract_call_names(scope),
                    called_by: Vec::new(),
                    content: Some(self.excerpt(scope)),
                });
            }
        }
        None
    }

    fn resolve_repo_wide(&self, name: &str) -> Option<TraceTarget> {
        let pattern = definition_search_pattern(name);
        let output = self.tools.search_text(&pattern, None).ok()?;
        let first = output.lines().next()?;
        let (match_path, line_number, line_text) = parse_search_result(first)?;

        let mut content = line_text.trim().to_string();
        if let Ok(excerpt) = self.tools.read_file_range(
            &match_path,
            line_number.saturating_sub(1).max(1),
            line_number + self.preview_lines,
        ) {
            if !excerpt.is_empty() {
                content = excerpt;
            }
        }

        Some(TraceTarget {
            name: name.to_string(),
            location: format!("{}:{}", match_path, line_number),
            kind: infer_kind_from_line(&line_text),
            preview: line_text.trim().to_string(),
            calls_to: Vec::new(),
            called_by: Vec::new(),
            content: Some(content),
        })
    }
}

impl Navigator for SearchNavigator {
    fn find_next_steps(&mut self, location: &str, max_results: usize) -> Vec<TraceTarget> {
        let (path, line_number) = parse_location(location);
        if path.is_empty() {
            return Vec::new();
        }

        let Ok(content) = self.tools.read_file(&path) else {
            debug!(location, "location unreadable; terminating this path");
            return Vec::new();
        };
        let lines: Vec<&str> = content.lines().collect();
        if lines.is_empty() {
            return Vec::new();
        }

        let line_index = line_number
            .map(|n| n.saturating_sub(1).min(lines.len() - 1))
            .unwrap_or(0);

        let definition = self
            .find_enclosing_definition(&lines, line_index)
            .or_else(|| self.find_first_definition(&lines));
        let Some((name, _kind, def_line_index)) = definition else {
            return self.fallback_definitions(&path, &lines, max_results);
        };

        let scope = self.scope_slice(&lines, def_line_index);
        let call_names: Vec<String> = self
            .extract_call_names(scope)
            .into_iter()
            .filter(|call| call != &name)
            .collect();

        let mut targets = Vec::new();
        for call_name in &call_names {
            if let Some(target) = self.resolve_symbol(call_name, &path, &lines) {
                targets.push(target);
            }
            if targets.len() >= max_results {
                break;
            }
        }

        if targets.is_empty() {
            targets = self.fallback_definitions(&path, &lines, max_results);
        }
        targets
    }
}

/// Split a location into path and optional 1-based line. Accepts `path`,
/// `path:line`, and `path#Lline`. A trailing `:digits` is the only colon
/// form treated as a line marker, so Windows drive letters survive.
pub fn parse_location(location: &str) -> (String, Option<usize>) {
    if location.is_empty() {
        return (String::new(), None);
    }
    if let Some((path, line)) = location.split_once("#L") {
        if let Ok(number) = line.parse::<usize>() {
            return (path.to_string(), Some(number));
        }
        return (path.to_string(), None);
    }
    if let Some((path, tail)) = location.rsplit_once(':') {
        if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(number) = tail.parse::<usize>() {
                return (path.to_string(), Some(number));
            }
        }
    }
    (location.to_string(), None)
}

/// Matches a line that defines `name` under any supported syntax.
fn definition_line_pattern(name: &str) -> Regex {
    let escaped = regex::escape(name);
    Regex::new(&format!(
        r"\b(?:def|class|function|func|fn|struct|interface|const|let|var)\s+{escaped}\b"
    ))
    .expect("escaped symbol name always forms a valid pattern")
}

/// Repo-wide search pattern for definitions of `name`.
fn definition_search_pattern(name: &str) -> String {
    let escaped = regex::escape(name);
    format!(
        r"\b(def|class|function|func|fn|struct|interface)\s+{escaped}\b|\b(const|let|var)\s+{escaped}\b"
    )
}

/// Parse one `path:line: text` search hit.
fn parse_search_result(line: &str) -> Option<(String, usize, String)> {
    let mut parts = line.splitn(3, ':');
    let path = parts.next()?;
    let line_number = parts.next()?.trim().parse::<usize>().ok()?;
    let text = parts.next()?;
    Some((path.to_string(), line_number, text.to_string()))
}

fn infer_kind_from_line(line: &str) -> TargetKind {
    let lowered = line.trim().to_lowercase();
    if lowered.starts_with("class ") || lowered.contains(" class ") {
        return TargetKind::Class;
    }
    if lowered.starts_with("struct ") || lowered.contains(" struct ") {
        return TargetKind::Struct;
    }
    if lowered.starts_with("interface ") || lowered.contains(" interface ") {
        return TargetKind::Interface;
    }
    if lowered.contains("def ")
        || lowered.contains("function ")
        || lowered.contains("func ")
        || lowered.contains("fn ")
    {
        return TargetKind::Function;
    }
    TargetKind::Symbol
}
