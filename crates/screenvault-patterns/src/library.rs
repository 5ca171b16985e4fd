//! Pattern library: definitions with their label regexes compiled

use crate::error::{PatternError, Result};
use crate::matcher::{match_pattern, PatternMatch};
use regex::Regex;
use screenvault_types::{EnrichedScreen, PatternDefinition};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Library shipped with the crate
const BUILTIN_LIBRARY: &str = include_str!("../patterns.yaml");

/// A pattern definition ready to be evaluated
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    definition: PatternDefinition,
    label_regexes: Vec<Regex>,
}

impl CompiledPattern {
    /// Compile the label patterns of a definition
    pub fn compile(definition: PatternDefinition) -> Result<Self> {
        let label_regexes = definition
            .label_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| PatternError::InvalidRegex {
                    slug: definition.slug.clone(),
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            definition,
            label_regexes,
        })
    }

    pub fn definition(&self) -> &PatternDefinition {
        &self.definition
    }

    pub fn slug(&self) -> &str {
        &self.definition.slug
    }

    pub fn has_label_patterns(&self) -> bool {
        !self.label_regexes.is_empty()
    }

    /// True if any label regex matches
    pub fn matches_label(&self, label: &str) -> bool {
        self.label_regexes.iter().any(|re| re.is_match(label))
    }
}

/// Ordered set of compiled patterns
#[derive(Debug, Clone, Default)]
pub struct PatternLibrary {
    patterns: Vec<CompiledPattern>,
}

impl PatternLibrary {
    /// The library bundled with screenvault
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_LIBRARY)
    }

    /// Load a library from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| PatternError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let library = Self::from_yaml_str(&content)?;
        info!("Loaded {} patterns from {:?}", library.len(), path);
        Ok(library)
    }

    /// Parse a YAML list of pattern definitions
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let definitions: Vec<PatternDefinition> = serde_yaml::from_str(yaml)?;
        Self::from_definitions(definitions)
    }

    /// Compile a list of definitions, keeping their order
    pub fn from_definitions(definitions: Vec<PatternDefinition>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut patterns = Vec::with_capacity(definitions.len());

        for definition in definitions {
            if !seen.insert(definition.slug.clone()) {
                return Err(PatternError::DuplicateSlug(definition.slug));
            }
            debug!("Compiling pattern: {}", definition.slug);
            patterns.push(CompiledPattern::compile(definition)?);
        }

        Ok(Self { patterns })
    }

    /// Get a pattern by slug
    pub fn get(&self, slug: &str) -> Option<&CompiledPattern> {
        self.patterns.iter().find(|p| p.slug() == slug)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.patterns.iter()
    }

    /// Distinct section names (definition categories), sorted
    pub fn sections(&self) -> Vec<&str> {
        let sections: BTreeSet<&str> = self
            .patterns
            .iter()
            .map(|p| p.definition.category.as_str())
            .collect();
        sections.into_iter().collect()
    }

    /// Patterns filed under one section
    pub fn in_section<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a CompiledPattern> {
        self.patterns
            .iter()
            .filter(move |p| p.definition.category == section)
    }

    /// Evaluate every pattern against the same screen set
    pub fn match_all<'a>(
        &'a self,
        screens: &[EnrichedScreen],
    ) -> Vec<(&'a CompiledPattern, PatternMatch)> {
        self.patterns
            .iter()
            .map(|p| (p, match_pattern(p, screens)))
            .collect()
    }

    /// Get number of patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if library is empty
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
