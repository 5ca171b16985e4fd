use anyhow::{anyhow, Result};
use screenvault_skills::BundleLimits;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default config template created when no config exists
pub const DEFAULT_CONFIG: &str = r#"
[catalog]
path = "data/catalog.json"  # Set via SCREENVAULT_CATALOG env var
patterns = ""  # Optional YAML pattern library; empty uses the built-in set

[packager]
intelligence_dir = "intelligence"
output_dir = "skill"
max_lines = 500
min_chars = 50

[directory]
database = "screenvault.db"  # Set via SCREENVAULT_DB env var
page_size = 20

[logging]
level = "info"  # trace, debug, info, warn, error
json = false
"#;

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub path: String,
    #[serde(default)]
    pub patterns: Option<String>,
}

impl CatalogConfig {
    /// Custom pattern library path, if one is configured
    pub fn patterns_path(&self) -> Option<PathBuf> {
        self.patterns
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PackagerConfig {
    pub intelligence_dir: String,
    pub output_dir: String,
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

impl PackagerConfig {
    pub fn limits(&self) -> BundleLimits {
        BundleLimits {
            max_lines: self.max_lines,
            min_chars: self.min_chars,
        }
    }
}

fn default_max_lines() -> usize {
    BundleLimits::default().max_lines
}

fn default_min_chars() -> usize {
    BundleLimits::default().min_chars
}

#[derive(Debug, Deserialize, Clone)]
pub struct DirectoryConfig {
    pub database: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    screenvault_directory::DEFAULT_PAGE_SIZE
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub packager: PackagerConfig,
    pub directory: DirectoryConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Get the global config path: ~/.screenvault/screenvault.toml
    fn global_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
        Ok(home.join(".screenvault").join("screenvault.toml"))
    }

    /// Ensure global config directory and file exist, creating defaults if needed
    fn ensure_global_config() -> Result<PathBuf> {
        let config_path = Self::global_config_path()?;

        if let Some(config_dir) = config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir)?;
                eprintln!("Created config directory: {}", config_dir.display());
            }
        }

        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG.trim())?;
            eprintln!("Created default config: {}", config_path.display());
        }

        Ok(config_path)
    }

    /// Load configuration with layered approach:
    /// 1. Global config: ~/.screenvault/screenvault.toml (auto-created if missing)
    /// 2. Local override: ./screenvault.toml (optional)
    /// 3. Environment variables with the SCREENVAULT__ prefix
    /// 4. SCREENVAULT_CATALOG / SCREENVAULT_DB (highest priority)
    pub fn load() -> Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        let global_config_path = Self::ensure_global_config()?;

        let mut config_builder = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .add_source(config::File::from(global_config_path))
            .add_source(config::File::with_name("screenvault").required(false))
            .add_source(config::Environment::with_prefix("SCREENVAULT").separator("__"));

        if let Ok(path) = env::var("SCREENVAULT_CATALOG") {
            config_builder = config_builder.set_override("catalog.path", path)?;
        }

        if let Ok(path) = env::var("SCREENVAULT_DB") {
            config_builder = config_builder.set_override("directory.database", path)?;
        }

        let config = config_builder.build()?;

        let config: Self = config.try_deserialize()?;
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.catalog.path, "data/catalog.json");
        assert_eq!(config.catalog.patterns_path(), None);
        assert_eq!(config.packager.limits(), BundleLimits::default());
        assert_eq!(config.directory.page_size, 20);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config: Config = toml::from_str(
            r#"
            [catalog]
            path = "apps.json"
            patterns = "custom.yaml"

            [packager]
            intelligence_dir = "in"
            output_dir = "out"
            max_lines = 300

            [directory]
            database = ":memory:"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.patterns_path(), Some(PathBuf::from("custom.yaml")));
        assert_eq!(config.packager.limits().max_lines, 300);
        assert_eq!(config.packager.limits().min_chars, 50);
        assert_eq!(config.directory.page_size, 20);
    }
}
