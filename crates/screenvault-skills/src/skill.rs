//! Skill bundle definition and parsing
//!
//! A bundle is a folder containing SKILL.md with YAML frontmatter plus the
//! topic files it links to.

use crate::error::{FrontmatterError, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the bundle entry point
pub const SKILL_FILE: &str = "SKILL.md";

/// Skill metadata stored in the SKILL.md frontmatter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillMetadata {
    /// Skill name (max 64 chars, lowercase letters/numbers/hyphens only)
    pub name: String,
    /// Skill description (max 1024 chars)
    pub description: String,
}

/// A generated bundle with metadata and, once loaded, the SKILL.md body
#[derive(Debug, Clone)]
pub struct Skill {
    /// Skill metadata
    pub metadata: SkillMetadata,
    /// Bundle root directory
    pub path: PathBuf,
    /// Full SKILL.md content (loaded on demand)
    pub content: Option<String>,
}

impl Skill {
    /// Load a bundle from a directory, including SKILL.md content
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut skill = Self::metadata_from_dir(dir)?;
        skill.load_content()?;
        Ok(skill)
    }

    /// Load only metadata from a directory
    pub fn metadata_from_dir(dir: &Path) -> Result<Self> {
        let skill_file = dir.join(SKILL_FILE);

        if !skill_file.exists() {
            return Err(anyhow!("{} not found in {:?}", SKILL_FILE, dir));
        }

        let content = fs::read_to_string(&skill_file)
            .with_context(|| format!("Failed to read {:?}", skill_file))?;

        let (metadata, _) = SkillMetadata::parse(&content)
            .and_then(|(metadata, body)| metadata.check().map(|()| (metadata, body)))
            .with_context(|| format!("Invalid frontmatter in {:?}", skill_file))?;

        Ok(Self {
            metadata,
            path: dir.to_path_buf(),
            content: None,
        })
    }

    /// Load full SKILL.md content if not already loaded
    pub fn load_content(&mut self) -> Result<()> {
        if self.content.is_some() {
            return Ok(());
        }

        let skill_file = self.path.join(SKILL_FILE);
        let content = fs::read_to_string(&skill_file)
            .with_context(|| format!("Failed to read {:?}", skill_file))?;

        self.content = Some(content);
        Ok(())
    }

    /// Markdown files in the bundle other than SKILL.md, relative and sorted
    pub fn topic_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.path)
                    .ok()
                    .map(Path::to_path_buf)
            })
            .filter(|rel| rel.extension().is_some_and(|ext| ext == "md"))
            .filter(|rel| rel.as_path() != Path::new(SKILL_FILE))
            .collect();
        files.sort();
        files
    }

    /// Read one topic file by its bundle-relative path
    pub fn read_topic(&self, relative: &Path) -> Result<String> {
        if relative.is_absolute() || relative.components().any(|c| c.as_os_str() == "..") {
            return Err(anyhow!("Topic path {:?} escapes the bundle", relative));
        }
        let path = self.path.join(relative);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))
    }

    /// Get the skill name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Get the skill description
    pub fn description(&self) -> &str {
        &self.metadata.description
    }
}

impl SkillMetadata {
    /// Split SKILL.md into its frontmatter metadata and the markdown body
    pub fn parse(content: &str) -> Result<(Self, &str), FrontmatterError> {
        let rest = content
            .strip_prefix("---\n")
            .or_else(|| content.strip_prefix("---\r\n"))
            .ok_or(FrontmatterError::Missing)?;

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == "---" {
                let metadata = serde_yaml::from_str(&rest[..offset])?;
                return Ok((metadata, &rest[offset + line.len()..]));
            }
            offset += line.len();
        }
        Err(FrontmatterError::Unterminated)
    }

    /// Name is a non-empty slug of at most 64 characters, description is 1-1024 characters
    pub fn check(&self) -> Result<(), FrontmatterError> {
        let name_ok = !self.name.is_empty()
            && self.name.len() <= MAX_NAME_LENGTH
            && self
                .name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !name_ok {
            return Err(FrontmatterError::InvalidName(self.name.clone()));
        }

        let chars = self.description.trim().chars().count();
        if chars == 0 || chars > MAX_DESCRIPTION_LENGTH {
            return Err(FrontmatterError::InvalidDescription(chars));
        }
        Ok(())
    }
}
