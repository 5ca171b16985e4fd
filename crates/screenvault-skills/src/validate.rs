//! Bundle validation: size limits per file and SKILL.md frontmatter

use crate::skill::{SkillMetadata, SKILL_FILE};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Size limits every bundle file must respect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BundleLimits {
    /// Maximum number of lines per file
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
    /// Files with fewer trimmed characters count as nearly empty
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

fn default_max_lines() -> usize {
    500
}

fn default_min_chars() -> usize {
    50
}

impl Default for BundleLimits {
    fn default() -> Self {
        Self {
            max_lines: default_max_lines(),
            min_chars: default_min_chars(),
        }
    }
}

/// What is wrong with a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    OverLimit { lines: usize, max: usize },
    NearlyEmpty { chars: usize, min: usize },
    InvalidFrontmatter(String),
}

/// A problem found in one bundle file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Path relative to the bundle root
    pub path: PathBuf,
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.kind {
            IssueKind::OverLimit { lines, max } => {
                write!(f, "{path}: {lines} lines (over {max} line limit)")
            }
            IssueKind::NearlyEmpty { chars, min } => {
                write!(f, "{path}: nearly empty ({chars} chars, minimum {min})")
            }
            IssueKind::InvalidFrontmatter(reason) => {
                write!(f, "{path}: invalid frontmatter: {reason}")
            }
        }
    }
}

/// Result of validating a bundle
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub files_checked: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check one file's content against the limits
pub fn check_content(path: &Path, content: &str, limits: &BundleLimits) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let lines = content.lines().count();
    if lines > limits.max_lines {
        issues.push(ValidationIssue {
            path: path.to_path_buf(),
            kind: IssueKind::OverLimit {
                lines,
                max: limits.max_lines,
            },
        });
    }

    let chars = content.trim().chars().count();
    if chars < limits.min_chars {
        issues.push(ValidationIssue {
            path: path.to_path_buf(),
            kind: IssueKind::NearlyEmpty {
                chars,
                min: limits.min_chars,
            },
        });
    }

    if path == Path::new(SKILL_FILE) {
        let frontmatter =
            SkillMetadata::parse(content).and_then(|(metadata, _)| metadata.check());
        if let Err(e) = frontmatter {
            issues.push(ValidationIssue {
                path: path.to_path_buf(),
                kind: IssueKind::InvalidFrontmatter(e.to_string()),
            });
        }
    }

    issues
}

/// Walk a generated bundle and check every markdown file
pub fn validate(bundle_dir: &Path, limits: &BundleLimits) -> Result<ValidationReport> {
    if !bundle_dir.is_dir() {
        anyhow::bail!("Bundle directory {:?} does not exist", bundle_dir);
    }

    let mut report = ValidationReport::default();
    let mut entries: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(bundle_dir) {
        let entry = entry.with_context(|| format!("Failed to walk {:?}", bundle_dir))?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "md")
        {
            entries.push(entry.into_path());
        }
    }
    entries.sort();

    for path in entries {
        let content =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
        let relative = path.strip_prefix(bundle_dir).unwrap_or(&path);

        let issues = check_content(relative, &content, limits);
        for issue in &issues {
            warn!("{}", issue);
        }
        debug!("Checked {:?}: {} issues", relative, issues.len());

        report.files_checked += 1;
        report.issues.extend(issues);
    }

    info!(
        "Validated {} files: {} issues",
        report.files_checked,
        report.issues.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_limit_boundary() {
        let limits = BundleLimits::default();
        let at_limit = "line of reasonable length\n".repeat(500);
        let over = "line of reasonable length\n".repeat(501);

        assert!(check_content(Path::new("a.md"), &at_limit, &limits).is_empty());
        assert_eq!(
            check_content(Path::new("a.md"), &over, &limits),
            vec![ValidationIssue {
                path: PathBuf::from("a.md"),
                kind: IssueKind::OverLimit {
                    lines: 501,
                    max: 500
                },
            }]
        );
    }

    #[test]
    fn test_nearly_empty_uses_trimmed_length() {
        let limits = BundleLimits::default();
        let padded = format!("\n\n   {}   \n\n", "x".repeat(49));
        let issues = check_content(Path::new("b.md"), &padded, &limits);
        assert_eq!(
            issues[0].kind,
            IssueKind::NearlyEmpty { chars: 49, min: 50 }
        );

        let enough = "x".repeat(50);
        assert!(check_content(Path::new("b.md"), &enough, &limits).is_empty());
    }

    #[test]
    fn test_skill_frontmatter_checked() {
        let limits = BundleLimits::default();
        let body = "Body text that is long enough to clear the nearly-empty check.";
        let bad = format!("---\nname: Bad Name\ndescription: x\n---\n\n{body}\n");
        let issues = check_content(Path::new(SKILL_FILE), &bad, &limits);
        assert!(matches!(issues[0].kind, IssueKind::InvalidFrontmatter(_)));

        // Same content under another name is just markdown
        assert!(check_content(Path::new("flows/x.md"), &bad, &limits).is_empty());
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue {
            path: PathBuf::from("flows/swap.md"),
            kind: IssueKind::OverLimit {
                lines: 501,
                max: 500,
            },
        };
        assert_eq!(
            issue.to_string(),
            "flows/swap.md: 501 lines (over 500 line limit)"
        );
    }
}
