//! Configuration management for the resume matcher

use crate::error::{Result, ResumeMatcherError};
use crate::processing::{
    ExtractionLimits, NoiseWords, RoleCatalog, SkillCatalog, TierThresholds,
};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub matching: MatchingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub name_scan_lines: usize,
    pub max_education_entries: usize,
    pub max_experience_entries: usize,
    #[serde(default)]
    pub extra_skills: Vec<String>,
    #[serde(default)]
    pub extra_noise_words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles_file: Option<PathBuf>,
    pub best_match_threshold: u8,
    pub strong_threshold: u8,
    pub moderate_threshold: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let limits = ExtractionLimits::default();
        let tiers = TierThresholds::default();

        Self {
            extraction: ExtractionConfig {
                name_scan_lines: limits.name_scan_lines,
                max_education_entries: limits.max_education_entries,
                max_experience_entries: limits.max_experience_entries,
                extra_skills: Vec::new(),
                extra_noise_words: Vec::new(),
            },
            matching: MatchingConfig {
                roles_file: None,
                best_match_threshold: 50,
                strong_threshold: tiers.strong,
                moderate_threshold: tiers.moderate,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            warn!(
                "No configuration found, writing defaults to {}",
                config_path.display()
            );
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load an explicit config file. A missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResumeMatcherError::Configuration(format!(
                "Failed to read config {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            ResumeMatcherError::Configuration(format!("Failed to parse config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let matching = &self.matching;
        for (name, value) in [
            ("best_match_threshold", matching.best_match_threshold),
            ("strong_threshold", matching.strong_threshold),
            ("moderate_threshold", matching.moderate_threshold),
        ] {
            if value > 100 {
                return Err(ResumeMatcherError::Configuration(format!(
                    "matching.{} must be between 0 and 100, got {}",
                    name, value
                )));
            }
        }

        if matching.moderate_threshold > matching.strong_threshold {
            return Err(ResumeMatcherError::Configuration(
                "matching.moderate_threshold cannot exceed matching.strong_threshold".to_string(),
            ));
        }

        if self.extraction.name_scan_lines == 0 {
            return Err(ResumeMatcherError::Configuration(
                "extraction.name_scan_lines must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn extraction_limits(&self) -> ExtractionLimits {
        ExtractionLimits {
            name_scan_lines: self.extraction.name_scan_lines,
            max_education_entries: self.extraction.max_education_entries,
            max_experience_entries: self.extraction.max_experience_entries,
        }
    }

    pub fn tier_thresholds(&self) -> TierThresholds {
        TierThresholds {
            strong: self.matching.strong_threshold,
            moderate: self.matching.moderate_threshold,
        }
    }

    pub fn skill_catalog(&self) -> SkillCatalog {
        SkillCatalog::default_catalog().with_extra(self.extraction.extra_skills.iter().cloned())
    }

    pub fn noise_words(&self) -> NoiseWords {
        NoiseWords::default_words().with_extra(self.extraction.extra_noise_words.iter().cloned())
    }

    /// Role catalog from `matching.roles_file`, or the built-in one
    pub fn role_catalog(&self) -> Result<RoleCatalog> {
        match &self.matching.roles_file {
            Some(path) => RoleCatalog::from_path(path),
            None => RoleCatalog::default_catalog(),
        }
    }
}
