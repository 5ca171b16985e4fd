//! Intelligence input files
//!
//! Only `index.json` is required; every other file is optional and is
//! skipped when absent or unreadable.

use crate::error::PackageError;
use anyhow::Result;
use screenvault_types::Classification;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const INDEX_FILE: &str = "index.json";
pub const PATTERNS_FILE: &str = "patterns.json";
pub const COLORS_FILE: &str = "colors.json";
pub const TYPOGRAPHY_FILE: &str = "typography.json";
pub const COMPONENTS_FILE: &str = "components.json";
pub const FLOWS_FILE: &str = "flows.json";
pub const COPY_FILE: &str = "copy.json";
pub const COMPETITIVE_FILE: &str = "competitive.json";
pub const CHANGELOG_FILE: &str = "changelog.json";

/// `index.json`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Copied verbatim into SKILL.md; the only timestamp in the bundle
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub app_count: u64,
    #[serde(default)]
    pub screen_count: u64,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// `patterns.json`
#[derive(Debug, Clone, Deserialize)]
pub struct PatternsFile {
    #[serde(default)]
    pub patterns: Vec<AdoptionPattern>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionPattern {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub adoption_rate: f64,
    /// Precomputed label; decides emerging vs outlier
    pub classification: Classification,
    #[serde(default)]
    pub apps: Vec<String>,
}

/// `colors.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ColorsFile {
    #[serde(default)]
    pub palettes: Vec<Palette>,
    #[serde(default)]
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Palette {
    pub app: String,
    pub accent: String,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// `typography.json`
#[derive(Debug, Clone, Deserialize)]
pub struct TypographyFile {
    #[serde(default)]
    pub fonts: Vec<FontUsage>,
    #[serde(default)]
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontUsage {
    pub family: String,
    /// Fraction of apps using the family
    #[serde(default)]
    pub usage: f64,
    #[serde(default)]
    pub apps: Vec<String>,
}

/// `components.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentsFile {
    #[serde(default)]
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub usage: f64,
    #[serde(default)]
    pub best_practices: Vec<String>,
}

/// `flows.json`
#[derive(Debug, Clone, Deserialize)]
pub struct FlowsFile {
    #[serde(default)]
    pub flows: Vec<FlowGuide>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowGuide {
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub average_steps: Option<f64>,
    #[serde(default)]
    pub steps: Vec<FlowStep>,
    #[serde(default)]
    pub best_practices: Vec<String>,
    #[serde(default)]
    pub examples: Vec<FlowExample>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlowStep {
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlowExample {
    pub app: String,
    #[serde(default)]
    pub steps: u32,
}

/// `copy.json`
#[derive(Debug, Clone, Deserialize)]
pub struct CopyFile {
    #[serde(default)]
    pub sections: Vec<CopySection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CopySection {
    pub name: String,
    #[serde(default)]
    pub guidance: Option<String>,
    #[serde(default)]
    pub examples: Vec<CopyExample>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CopyExample {
    pub text: String,
    #[serde(default)]
    pub app: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

/// `competitive.json`
#[derive(Debug, Clone, Deserialize)]
pub struct CompetitiveFile {
    #[serde(default)]
    pub apps: Vec<CompetitorProfile>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorProfile {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub notable_patterns: Vec<String>,
}

/// `changelog.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ChangelogFile {
    #[serde(default)]
    pub entries: Vec<ChangelogEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangelogEntry {
    pub version: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub changes: Vec<String>,
}

/// Everything read from an intelligence directory
#[derive(Debug, Clone)]
pub struct Intelligence {
    pub index: Index,
    pub patterns: Option<PatternsFile>,
    pub colors: Option<ColorsFile>,
    pub typography: Option<TypographyFile>,
    pub components: Option<ComponentsFile>,
    pub flows: Option<FlowsFile>,
    pub copy: Option<CopyFile>,
    pub competitive: Option<CompetitiveFile>,
    pub changelog: Option<ChangelogFile>,
}

impl Intelligence {
    /// Read the intelligence directory
    pub fn load(dir: &Path) -> Result<Self> {
        let index_path = dir.join(INDEX_FILE);
        if !index_path.exists() {
            return Err(PackageError::MissingIndex(index_path).into());
        }
        let content = fs::read_to_string(&index_path)?;
        let index: Index = serde_json::from_str(&content).map_err(|source| {
            PackageError::InvalidIndex {
                path: index_path.clone(),
                source,
            }
        })?;

        Ok(Self {
            index,
            patterns: read_optional(dir, PATTERNS_FILE),
            colors: read_optional(dir, COLORS_FILE),
            typography: read_optional(dir, TYPOGRAPHY_FILE),
            components: read_optional(dir, COMPONENTS_FILE),
            flows: read_optional(dir, FLOWS_FILE),
            copy: read_optional(dir, COPY_FILE),
            competitive: read_optional(dir, COMPETITIVE_FILE),
            changelog: read_optional(dir, CHANGELOG_FILE),
        })
    }
}

/// Read an optional input, treating any failure as "no data"
fn read_optional<T: DeserializeOwned>(dir: &Path, name: &str) -> Option<T> {
    let path: PathBuf = dir.join(name);
    if !path.exists() {
        debug!("Optional input {:?} not present, skipping", path);
        return None;
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Skipping {:?}: {}", path, e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Skipping malformed {:?}: {}", path, e);
            None
        }
    }
}
