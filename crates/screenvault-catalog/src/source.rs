//! Data sources the catalog can be loaded from

use crate::error::{CatalogError, Result};
use screenvault_types::App;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Anything that can produce the list of apps
pub trait CatalogSource {
    /// Human-readable origin, used in log lines
    fn describe(&self) -> String;

    /// Produce every app record
    fn load(&self) -> Result<Vec<App>>;
}

/// Apps held in memory, used by tests and embedders
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    apps: Vec<App>,
}

impl InMemorySource {
    pub fn new(apps: Vec<App>) -> Self {
        Self { apps }
    }
}

impl CatalogSource for InMemorySource {
    fn describe(&self) -> String {
        format!("in-memory ({} apps)", self.apps.len())
    }

    fn load(&self) -> Result<Vec<App>> {
        Ok(self.apps.clone())
    }
}

/// Catalog document layouts accepted on disk
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    /// Bare array of apps
    List(Vec<App>),
    /// `{ "apps": [...] }`
    Wrapped { apps: Vec<App> },
}

/// Apps read from a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<App>> {
        let path = self.describe();
        let content = fs::read_to_string(&self.path).map_err(|source| CatalogError::Read {
            path: path.clone(),
            source,
        })?;

        let document: CatalogDocument = serde_json::from_str(&content)
            .map_err(|source| CatalogError::Parse { path, source })?;

        let apps = match document {
            CatalogDocument::List(apps) => apps,
            CatalogDocument::Wrapped { apps } => apps,
        };
        debug!("Read {} apps from {:?}", apps.len(), self.path);
        Ok(apps)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;

    const ONE_APP: &str = r#"{"slug": "uniswap", "name": "Uniswap", "category": "Exchange"}"#;

    #[test]
    fn test_json_source_accepts_bare_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{ONE_APP}]").unwrap();

        let apps = JsonFileSource::new(file.path()).load().unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].slug, "uniswap");
    }

    #[test]
    fn test_json_source_accepts_wrapped_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"apps\": [{ONE_APP}]}}").unwrap();

        let apps = JsonFileSource::new(file.path()).load().unwrap();
        assert_eq!(apps[0].name, "Uniswap");
    }

    #[test]
    fn test_json_source_missing_file() {
        let err = JsonFileSource::new("/nonexistent/catalog.json")
            .load()
            .unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn test_json_source_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"apps\": 12}}").unwrap();

        let err = JsonFileSource::new(file.path()).load().unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }
}
