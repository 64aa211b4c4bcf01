//! Configuration management for reqprio
//!
//! Looks for `--config`, then `<requirements dir>/.reqprio.toml`, then
//! `~/.reqprio/config.toml`, and falls back to built-in defaults.
//!
//! Keys are camelCase in every section, matching the requirement frontmatter
//! and the `[scoring]` table.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use prioritizer::ScoringConfig;
use serde::{Deserialize, Serialize};

/// File name looked up inside the requirements directory
pub const PROJECT_CONFIG_FILE: &str = ".reqprio.toml";

/// Configuration for reqprio
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathsConfig {
    /// Requirements directory when `--dir` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements_dir: Option<PathBuf>,

    /// Summary document, relative to the requirements directory
    #[serde(default = "default_summary_file")]
    pub summary_file: String,
}

fn default_summary_file() -> String {
    "PRIORITIES.md".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            requirements_dir: None,
            summary_file: default_summary_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub color: bool,

    #[serde(default = "default_true")]
    pub show_indicators: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_indicators: true,
        }
    }
}

impl Config {
    /// Get the path to the user-level config file
    pub fn user_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".reqprio")
            .join("config.toml")
    }

    /// Resolve which config file applies, if any
    pub fn locate(explicit: Option<&Path>, requirements_dir: &Path) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        let project = requirements_dir.join(PROJECT_CONFIG_FILE);
        if project.exists() {
            return Some(project);
        }

        let user = Self::user_config_path();
        user.exists().then_some(user)
    }

    /// Load configuration from the located file, or return defaults if there is none
    pub fn load(explicit: Option<&Path>, requirements_dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        let Some(path) = Self::locate(explicit, requirements_dir) else {
            return Ok((Config::default(), None));
        };

        let config = Self::load_from(&path)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok((config, Some(path)))
    }

    /// Load and check a single config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.scoring.validate()?;
        Ok(config)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Summary document path for a requirements directory
    pub fn summary_path(&self, requirements_dir: &Path) -> PathBuf {
        requirements_dir.join(&self.paths.summary_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_any_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Config::locate(None, dir.path());
        // Only a user-level file could be found here
        assert!(path.is_none() || path == Some(Config::user_config_path()));
    }

    #[test]
    fn test_project_file_is_found_and_merged_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            r#"
[scoring]
maxScore = 20.0

[scoring.tiers]
critical = 12.0

[paths]
summaryFile = "docs/PRIORITY.md"

[display]
showIndicators = false
"#,
        )
        .unwrap();

        let (config, path) = Config::load(None, dir.path()).unwrap();
        assert_eq!(path, Some(dir.path().join(PROJECT_CONFIG_FILE)));
        assert_eq!(config.scoring.max_score, 20.0);
        assert_eq!(config.scoring.tiers.critical, 12.0);
        assert_eq!(config.scoring.tiers.low, 4.0);
        assert_eq!(config.paths.summary_file, "docs/PRIORITY.md");
        assert!(config.display.color);
        assert!(!config.display.show_indicators);
    }

    #[test]
    fn test_invalid_scoring_section_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[scoring.tiers]\nhigh = 50.0\n").unwrap();

        assert!(Config::load(Some(&path), dir.path()).is_err());
    }

    #[test]
    fn test_rendered_keys_are_camel_case() {
        let mut config = Config::default();
        config.paths.requirements_dir = Some(PathBuf::from("docs/requirements"));
        let rendered = config.to_toml().unwrap();

        assert!(rendered.contains("maxScore"));
        assert!(rendered.contains("requirementsDir"));
        assert!(rendered.contains("summaryFile"));
        assert!(rendered.contains("showIndicators"));
        assert!(!rendered.contains("summary_file"));
        assert!(!rendered.contains("show_indicators"));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let rendered = Config::default().to_toml().unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.scoring, ScoringConfig::default());
    }
}
