//! Bundle generation: intelligence directory in, markdown tree out

use crate::intelligence::Intelligence;
use crate::render::{self, RenderedFile};
use crate::skill::SkillMetadata;
use crate::validate::BundleLimits;
use anyhow::{Context, Result};
use screenvault_types::slugify;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A file written by the packager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory
    pub path: PathBuf,
    pub lines: usize,
}

/// Outcome of a generate run
#[derive(Debug, Clone, Default)]
pub struct PackageReport {
    pub files: Vec<GeneratedFile>,
}

impl PackageReport {
    pub fn total_lines(&self) -> usize {
        self.files.iter().map(|f| f.lines).sum()
    }

    /// Files longer than the configured line limit
    pub fn over_limit(&self, limits: &BundleLimits) -> Vec<&GeneratedFile> {
        self.files
            .iter()
            .filter(|f| f.lines > limits.max_lines)
            .collect()
    }
}

/// Turns an intelligence directory into a skill bundle
#[derive(Debug, Clone)]
pub struct Packager {
    input_dir: PathBuf,
    output_dir: PathBuf,
    limits: BundleLimits,
}

impl Packager {
    /// Create a packager reading `input_dir` and writing `output_dir`
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            limits: BundleLimits::default(),
        }
    }

    /// Override the line/size limits
    pub fn with_limits(mut self, limits: BundleLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render every bundle file in memory, SKILL.md last
    pub fn render(&self) -> Result<Vec<RenderedFile>> {
        let intel = Intelligence::load(&self.input_dir)?;

        SkillMetadata {
            name: slugify(&intel.index.name),
            description: intel.index.description.clone(),
        }
        .check()
        .context("index.json does not describe a valid skill")?;

        let mut files = Vec::new();

        if let Some(patterns) = &intel.patterns {
            files.push(render::patterns(patterns));
        }
        if let Some(colors) = &intel.colors {
            files.push(render::colors(colors));
        }
        if let Some(typography) = &intel.typography {
            files.push(render::typography(typography));
        }
        if let Some(components) = &intel.components {
            files.push(render::components(components));
        }
        if let Some(flows) = &intel.flows {
            files.extend(
                flows
                    .flows
                    .iter()
                    .zip(1..)
                    .map(|(guide, n)| render::flow(guide, n)),
            );
        }
        if let Some(copy) = &intel.copy {
            files.extend(
                copy.sections
                    .iter()
                    .zip(1..)
                    .map(|(section, n)| render::copy_section(section, n)),
            );
        }
        if let Some(competitive) = &intel.competitive {
            files.push(render::competitive_overview(competitive));
            files.extend(
                competitive
                    .apps
                    .iter()
                    .zip(1..)
                    .map(|(profile, n)| render::competitor(profile, n)),
            );
        }
        if let Some(changelog) = &intel.changelog {
            files.push(render::changelog(changelog));
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        files.dedup_by(|later, earlier| {
            let duplicate = later.path == earlier.path;
            if duplicate {
                warn!("Two inputs render to {:?}; keeping the first", later.path);
            }
            duplicate
        });

        let skill = render::skill(&intel.index, &files)?;
        files.push(skill);
        Ok(files)
    }

    /// Render and write the bundle
    pub fn generate(&self) -> Result<PackageReport> {
        info!(
            "Packaging {:?} into {:?}",
            self.input_dir, self.output_dir
        );

        let files = self.render()?;
        let mut report = PackageReport::default();

        for file in files {
            let target = self.output_dir.join(&file.path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {:?}", parent))?;
            }
            fs::write(&target, &file.content)
                .with_context(|| format!("Failed to write {:?}", target))?;

            let lines = file.line_count();
            debug!("Wrote {:?} ({} lines)", file.path, lines);
            report.files.push(GeneratedFile {
                path: file.path,
                lines,
            });
        }

        for file in report.over_limit(&self.limits) {
            warn!(
                "{:?} has {} lines, over the {} line limit",
                file.path, file.lines, self.limits.max_lines
            );
        }

        info!(
            "Generated {} files ({} lines)",
            report.files.len(),
            report.total_lines()
        );
        Ok(report)
    }
}
