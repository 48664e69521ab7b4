use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, VerstampError};

/// Name of the configuration file looked up in the repository root and the
/// user config directory.
pub const CONFIG_FILE_NAME: &str = "verstamp.toml";

/// Represents the complete configuration for verstamp.
///
/// Contains the template location, the files to generate and the options
/// passed to `git describe`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,

    #[serde(default = "default_bump_position")]
    pub bump_position: usize,

    #[serde(default)]
    pub describe: DescribeConfig,

    #[serde(default = "default_templates")]
    pub templates: Vec<TemplateEntry>,
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("Templates")
}

fn default_bump_position() -> usize {
    2
}

/// Returns the files generated when no template list is configured.
fn default_templates() -> Vec<TemplateEntry> {
    vec![
        TemplateEntry::new("Assets/Shabby.version"),
        TemplateEntry::new("Source/assembly/AssemblyInfo.cs"),
    ]
}

/// One template to render.
///
/// `path` is relative to the template directory. The rendered file goes to
/// `output` when set, otherwise to `path` relative to the repository root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TemplateEntry {
    pub path: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl TemplateEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TemplateEntry {
            path: path.into(),
            output: None,
        }
    }
}

/// Which implementation answers `git describe`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DescribeBackend {
    /// In-process through libgit2
    #[default]
    Git2,
    /// The `git` executable on PATH
    Command,
}

/// Options for `git describe`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DescribeConfig {
    #[serde(default)]
    pub backend: DescribeBackend,

    /// Consider lightweight tags, not only annotated ones
    #[serde(default)]
    pub tags: bool,

    /// Only consider tags matching this glob
    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_pattern: Option<String>,

    #[serde(default = "default_abbrev")]
    pub abbrev: u32,
}

fn default_abbrev() -> u32 {
    7
}

impl Default for DescribeConfig {
    fn default() -> Self {
        DescribeConfig {
            backend: DescribeBackend::default(),
            tags: false,
            match_pattern: None,
            abbrev: default_abbrev(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            template_dir: default_template_dir(),
            bump_position: default_bump_position(),
            describe: DescribeConfig::default(),
            templates: default_templates(),
        }
    }
}

impl Config {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)
            .map_err(|e| VerstampError::config(format!("Invalid {}: {}", CONFIG_FILE_NAME, e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot reject on its own.
    pub fn validate(&self) -> Result<()> {
        if self.templates.is_empty() {
            return Err(VerstampError::config("At least one template must be configured"));
        }
        if self.describe.abbrev == 0 {
            return Err(VerstampError::config("describe.abbrev must be greater than 0"));
        }
        if let Some(entry) = self.templates.iter().find(|t| t.path.is_absolute()) {
            return Err(VerstampError::config(format!(
                "Template path '{}' must be relative to the template directory",
                entry.path.display()
            )));
        }
        Ok(())
    }

    /// Absolute template directory for a repository root.
    pub fn template_root(&self, repo_root: &Path) -> PathBuf {
        repo_root.join(&self.template_dir)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `verstamp.toml` in the repository root
/// 3. `verstamp.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `repo_root` - Root of the repository being stamped
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>, repo_root: &Path) -> Result<Config> {
    let candidate = if let Some(path) = config_path {
        Some(path.to_path_buf())
    } else if repo_root.join(CONFIG_FILE_NAME).exists() {
        Some(repo_root.join(CONFIG_FILE_NAME))
    } else {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    };

    let Some(path) = candidate else {
        debug!("No {} found, using defaults", CONFIG_FILE_NAME);
        return Ok(Config::default());
    };

    debug!("Loading configuration from {}", path.display());
    let text = fs::read_to_string(&path).map_err(|e| {
        VerstampError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    Config::from_toml(&text)
}
