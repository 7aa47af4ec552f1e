//! Repository access primitives used by the navigation layer.
//!
//! All reads are side-effect-free and confined to the repository root.
//! Failures (missing files, filtered paths, traversal attempts) surface as
//! errors here; callers in the trace path treat them as soft misses.

use std::path::{Component, Path, PathBuf};

use regex::Regex;
use tracing::trace;
use walkdir::WalkDir;

use crate::config::ToolsConfig;
use crate::error::{CodetrailError, Result};

/// Directory names never worth descending into.
const ALWAYS_SKIP: &[&str] = &[
    ".git",
    "node_modules",
    "__pycache__",
    ".venv",
    "venv",
    "env",
    ".idea",
    ".vscode",
    "dist",
    "build",
    "target",
    ".egg-info",
    "coverage",
    ".next",
    ".nuxt",
    ".cache",
    "vendor",
    ".tox",
];

/// Extensions considered text for search purposes.
const TEXT_EXTENSIONS: &[&str] = &[
    "py", "js", "ts", "tsx", "jsx", "go", "rs", "java", "kt", "c", "cc", "cpp", "h", "hpp", "rb",
    "php", "cs", "swift", "m", "mm", "scala", "sh", "bash", "zsh", "ps1", "toml", "yaml", "yml",
    "json", "xml", "md", "rst", "txt", "adoc",
];

/// Returns true for paths that scanning should ignore: anything under a
/// skip-listed or hidden directory component.
pub fn should_skip_path(rel_path: &Path) -> bool {
    for component in rel_path.components() {
        let Component::Normal(part) = component else {
            continue;
        };
        let Some(part) = part.to_str() else {
            return true;
        };
        if part.is_empty() {
            continue;
        }
        if ALWAYS_SKIP.contains(&part) || part.starts_with('.') {
            return true;
        }
    }
    false
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| TEXT_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// File and text access scoped to one repository root.
pub struct RepoTools {
    repo_root: PathBuf,
    config: ToolsConfig,
}

impl RepoTools {
    pub fn new<P: AsRef<Path>>(repo_root: P, config: ToolsConfig) -> Self {
        Self {
            repo_root: repo_root.as_ref().to_path_buf(),
            config,
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Resolve a relative path inside the repository, rejecting absolute
    /// paths and `..` components before touching the filesystem.
    fn resolve(&self, rel_path: &str) -> Result<PathBuf> {
        let rel = Path::new(rel_path);
        if rel.is_absolute() {
            return Err(CodetrailError::PathTraversal(rel_path.to_string()));
        }
        for component in rel.components() {
            match component {
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(CodetrailError::PathTraversal(rel_path.to_string()));
                }
                _ => {}
            }
        }
        Ok(self.repo_root.join(rel))
    }

    /// Read a file's content, capped at the configured byte budget.
    pub fn read_file(&self, rel_path: &str) -> Result<String> {
        let target = self.resolve(rel_path)?;
        if should_skip_path(Path::new(rel_path)) {
            return Err(CodetrailError::SkippedFile(rel_path.to_string()));
        }

        let bytes = std::fs::read(&target)?;
        let mut content = String::from_utf8_lossy(&bytes).into_owned();
        if content.len() > self.config.max_file_bytes {
            let mut cut = self.config.max_file_bytes;
            while cut > 0 && !content.is_char_boundary(cut) {
                cut -= 1;
            }
            content.truncate(cut);
        }
        Ok(content)
    }

    /// Read a slice of a file with line numbers and elision markers for the
    /// surrounding context. Lines are 1-based; `end_line` is clamped to the
    /// file length, so any large value means "to end of file".
    pub fn read_file_range(&self, rel_path: &str, start_line: usize, end_line: usize) -> Result<String> {
        let content = self.read_file(rel_path)?;
        let lines: Vec<&str> = content.split('\n').collect();

        let start = start_line.saturating_sub(1).min(lines.len());
        let end = end_line.min(lines.len());
        let mut numbered: Vec<String> = lines[start..end.max(start)]
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:4} | {}", start + i + 1, line))
            .collect();

        if start > 0 {
            numbered.insert(0, format!("[... {} lines above ...]", start));
        }
        if end < lines.len() {
            numbered.push(format!("[... {} lines below ...]", lines.len() - end));
        }
        Ok(numbered.join("\n"))
    }

    /// Numbered head and tail of a file with a skip marker between them.
    /// Small files come back whole.
    pub fn read_file_head_tail(&self, rel_path: &str, head_lines: usize, tail_lines: usize) -> Result<String> {
        let content = self.read_file(rel_path)?;
        let lines: Vec<&str> = content.split('\n').collect();

        if lines.len() <= head_lines + tail_lines {
            let numbered: Vec<String> = lines
                .iter()
                .enumerate()
                .map(|(i, line)| format!("{:4} | {}", i + 1, line))
                .collect();
            return Ok(numbered.join("\n"));
        }

        let head: Vec<String> = lines[..head_lines]
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:4} | {}", i + 1, line))
            .collect();
        let tail_start = lines.len() - tail_lines;
        let tail: Vec<String> = lines[tail_start..]
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:4} | {}", tail_start + i + 1, line))
            .collect();
        let skipped = lines.len() - head_lines - tail_lines;
        Ok(format!(
            "{}\n\n[... {} lines skipped ...]\n\n{}",
            head.join("\n"),
            skipped,
            tail.join("\n")
        ))
    }

    /// Search text-like files for a regex, returning up to the configured
    /// number of `path:line: text` hits. Traversal is sorted so the first hit
    /// is stable across runs.
    pub fn search_text(&self, pattern: &str, file_glob: Option<&str>) -> Result<String> {
        let regex = Regex::new(pattern)?;
        let glob = match file_glob {
            Some(g) => Some(
                glob::Pattern::new(g)
                    .map_err(|e| CodetrailError::Config(format!("bad file glob {g:?}: {e}")))?,
            ),
            None => None,
        };

        let mut results: Vec<String> = Vec::new();
        let walker = WalkDir::new(&self.repo_root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.repo_root)
                    .map(|rel| !should_skip_path(rel))
                    .unwrap_or(false)
            });

        for entry in walker {
            let Ok(entry) = entry else { continue };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !is_text_file(path) {
                continue;
            }
            let Ok(rel) = path.strip_prefix(&self.repo_root) else {
                continue;
            };
            if let Some(glob) = &glob {
                let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                if !glob.matches_path(rel) && !glob.matches(file_name) {
                    continue;
                }
            }
            let Ok(content) = std::fs::read_to_string(path) else {
                continue;
            };
            for (i, line) in content.split('\n').enumerate() {
                if regex.is_match(line) {
                    results.push(format!("{}:{}: {}", rel.display(), i + 1, line.trim()));
                    if results.len() >= self.config.max_search_results {
                        trace!(pattern, hits = results.len(), "search hit result cap");
                        return Ok(results.join("\n"));
                    }
                }
            }
        }

        trace!(pattern, hits = results.len(), "search complete");
        Ok(results.join("\n"))
    }

    /// Sorted listing of a directory, directories suffixed with `/`.
    pub fn list_directory(&self, rel_path: &str) -> Result<String> {
        let target = self.resolve(rel_path)?;
        let mut entries: Vec<String> = Vec::new();
        for entry in std::fs::read_dir(&target)? {
            let entry = entry?;
            let rel = Path::new(rel_path).join(entry.file_name());
            if should_skip_path(&rel) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type()?.is_dir() {
                entries.push(format!("{}/", name));
            } else {
                entries.push(name);
            }
        }
        entries.sort();
        Ok(entries.join("\n"))
    }
}
