//! Configuration management for gascheck.
//!
//! Settings live in the YAML frontmatter of `.gascheck/config.md`. Every
//! section is optional; missing sections and fields fall back to the
//! defaults in [`defaults`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::frontmatter::split_frontmatter;
use crate::paths::CONFIG_PATH;
use crate::properties::ReferenceConditions;

pub mod defaults;
pub mod validation;

pub use defaults::*;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub spc: SpcConfig,
    #[serde(default)]
    pub deadlines: DeadlineConfig,
    #[serde(default)]
    pub reference: ReferenceConfig,
    #[serde(default)]
    pub composition: CompositionConfig,
}

impl Config {
    /// Load configuration with merge semantics.
    /// Merge order (later overrides earlier, per section):
    /// 1. Global config (~/.config/gascheck/config.md)
    /// 2. Project config (.gascheck/config.md)
    ///
    /// Missing files are skipped; with neither present the defaults apply.
    pub fn load() -> Result<Self> {
        Self::load_merged_from(global_config_path().as_deref(), Path::new(CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let (frontmatter, _body) = split_frontmatter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        let config: Config =
            serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")?;

        config.validate()?;

        Ok(config)
    }

    /// Load merged configuration from the given global and project paths.
    pub fn load_merged_from(global_path: Option<&Path>, project_path: &Path) -> Result<Self> {
        let global_config = global_path
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let project_config = Some(project_path)
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let config = global_config.merge_with(project_config);
        config.validate()?;

        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.spc.validate()?;
        self.deadlines.validate()?;
        self.reference.validate()?;
        self.composition.validate()?;
        Ok(())
    }

    pub fn reference_conditions(&self) -> ReferenceConditions {
        ReferenceConditions {
            pressure_kpa: self.reference.pressure_kpa,
            temperature_k: self.reference.temperature_k,
        }
    }
}

/// Returns the path to the global config file at ~/.config/gascheck/config.md
pub fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config/gascheck/config.md"))
}

/// Partial config for merging - every section optional
#[derive(Debug, Deserialize, Default)]
struct PartialConfig {
    pub spc: Option<SpcConfig>,
    pub deadlines: Option<DeadlineConfig>,
    pub reference: Option<ReferenceConfig>,
    pub composition: Option<CompositionConfig>,
}

impl PartialConfig {
    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        let (frontmatter, _body) = split_frontmatter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")
    }

    /// Project sections replace global sections wholesale.
    fn merge_with(self, project: PartialConfig) -> Config {
        Config {
            spc: project.spc.or(self.spc).unwrap_or_default(),
            deadlines: project.deadlines.or(self.deadlines).unwrap_or_default(),
            reference: project.reference.or(self.reference).unwrap_or_default(),
            composition: project.composition.or(self.composition).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests;
