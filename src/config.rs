use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Database file used when the config does not name one
pub const DEFAULT_DB_PATH: &str = "music_catalog.db";
/// Characters of an artist description shown in list rows
pub const DEFAULT_DESCRIPTION_PREVIEW: usize = 60;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: u32,
    pub database: Database,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.to_string_lossy()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }

    /// Loads `path` when it exists, otherwise falls back to the defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Config> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!(
                "config {} not found, using defaults",
                path.to_string_lossy()
            );
            Ok(Config::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            database: Database::default(),
            display: DisplayConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Database {
    #[serde(default)]
    pub in_memory: bool,
    pub path: Option<PathBuf>,
}

impl Database {
    pub fn in_memory() -> Self {
        Self {
            in_memory: true,
            path: None,
        }
    }

    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_description_preview")]
    pub description_preview: usize,
}

fn default_description_preview() -> usize {
    DEFAULT_DESCRIPTION_PREVIEW
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            description_preview: DEFAULT_DESCRIPTION_PREVIEW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_parse_config_toml() -> anyhow::Result<()> {
        let toml_str = r#"
version = 1

[database]
in_memory = true

[display]
description_preview = 30
"#;

        let cfg: Config = toml::from_str(toml_str)?;

        assert_eq!(cfg.version, 1);
        assert!(cfg.database.in_memory);
        assert_eq!(cfg.display.description_preview, 30);

        Ok(())
    }

    #[test]
    fn test_parse_file_database_config() -> anyhow::Result<()> {
        let toml_str = r#"
version = 1

[database]
path = "/tmp/catalog.db"
"#;

        let cfg: Config = toml::from_str(toml_str)?;

        assert!(!cfg.database.in_memory);
        assert_eq!(cfg.database.path, Some(PathBuf::from("/tmp/catalog.db")));
        assert_eq!(cfg.database.resolved_path(), PathBuf::from("/tmp/catalog.db"));
        assert_eq!(cfg.display.description_preview, DEFAULT_DESCRIPTION_PREVIEW);

        Ok(())
    }

    #[test]
    fn test_missing_config_uses_defaults() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let cfg = Config::load_or_default(&dir.path().join("absent.toml"))?;

        assert!(!cfg.database.in_memory);
        assert_eq!(cfg.database.resolved_path(), PathBuf::from(DEFAULT_DB_PATH));
        Ok(())
    }

    #[test]
    fn test_invalid_config_is_an_error() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "version = \"one\"")?;

        assert!(Config::load_or_default(&path).is_err());
        Ok(())
    }
}
