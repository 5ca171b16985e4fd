//! Read-only repository over the loaded apps

use crate::error::{CatalogError, Result};
use crate::source::CatalogSource;
use screenvault_types::{App, Category, ElementTag, EnrichedScreen};
use std::collections::{BTreeSet, HashSet};
use tracing::{info, warn};

/// Immutable app catalog
///
/// Built once from a [`CatalogSource`]; every query returns freshly built
/// values and never mutates the catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    apps: Vec<App>,
}

impl Catalog {
    /// Load the catalog from a source
    pub fn load(source: &dyn CatalogSource) -> Result<Self> {
        let apps = source.load()?;
        let catalog = Self::from_apps(apps)?;

        info!(
            "Catalog loaded from {}: {} apps, {} screens",
            source.describe(),
            catalog.len(),
            catalog.screen_count()
        );
        Ok(catalog)
    }

    /// Build a catalog directly from app records
    pub fn from_apps(apps: Vec<App>) -> Result<Self> {
        let mut seen = HashSet::new();
        for app in &apps {
            if !seen.insert(app.slug.as_str()) {
                return Err(CatalogError::DuplicateSlug(app.slug.clone()));
            }

            let undeclared = app.undeclared_flows();
            if !undeclared.is_empty() {
                warn!(
                    "App '{}' has screens in flows it does not declare: {:?}",
                    app.slug, undeclared
                );
            }
        }

        Ok(Self { apps })
    }

    /// All apps, in source order
    pub fn apps(&self) -> &[App] {
        &self.apps
    }

    /// Look up an app by slug
    pub fn app(&self, slug: &str) -> Option<&App> {
        self.apps.iter().find(|a| a.slug == slug)
    }

    /// Apps in one category, in source order
    pub fn apps_in_category(&self, category: Category) -> Vec<&App> {
        self.apps.iter().filter(|a| a.category == category).collect()
    }

    /// Categories with at least one app, in taxonomy order
    pub fn categories_present(&self) -> Vec<Category> {
        let present: BTreeSet<Category> = self.apps.iter().map(|a| a.category).collect();
        present.into_iter().collect()
    }

    /// Every screen joined with its app, app order then screen order
    pub fn enriched_screens(&self) -> Vec<EnrichedScreen> {
        self.apps
            .iter()
            .flat_map(|app| app.screens.iter().map(move |s| EnrichedScreen::new(app, s)))
            .collect()
    }

    /// Screens carrying a given element tag
    pub fn screens_with_tag(&self, tag: ElementTag) -> Vec<EnrichedScreen> {
        self.apps
            .iter()
            .flat_map(|app| {
                app.screens
                    .iter()
                    .filter(move |s| s.tags.contains(&tag))
                    .map(move |s| EnrichedScreen::new(app, s))
            })
            .collect()
    }

    /// Total number of screens
    pub fn screen_count(&self) -> usize {
        self.apps.iter().map(|a| a.screens.len()).sum()
    }

    /// Number of apps
    pub fn len(&self) -> usize {
        self.apps.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}
