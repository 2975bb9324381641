//! markwise configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analytics::{SummaryOptions, DEFAULT_ASSISTANCE_THRESHOLD};
use crate::analyzer::DEFAULT_TOP_N;
use crate::compose::ReportStyle;
use crate::merge::{MergeGroup, TopicMerger};

/// Top-level markwise configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkwiseConfig {
    /// Weak topics reported per student.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Overall percentage below which a student is flagged for assistance.
    #[serde(default = "default_threshold")]
    pub assistance_threshold: f64,
    /// Default report body.
    #[serde(default)]
    pub report_style: ReportStyle,
    /// Output directory for exports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Topic merge groups used when a class file defines none.
    #[serde(default = "default_merge")]
    pub merge: Vec<MergeGroup>,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}
fn default_threshold() -> f64 {
    DEFAULT_ASSISTANCE_THRESHOLD
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./markwise-results")
}
fn default_merge() -> Vec<MergeGroup> {
    vec![MergeGroup::area()]
}

impl Default for MarkwiseConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            assistance_threshold: default_threshold(),
            report_style: ReportStyle::default(),
            output_dir: default_output_dir(),
            merge: default_merge(),
        }
    }
}

impl MarkwiseConfig {
    /// Build the configured topic merger.
    pub fn merger(&self) -> Result<TopicMerger> {
        TopicMerger::new(self.merge.clone()).context("invalid merge groups in config")
    }

    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            assistance_threshold: self.assistance_threshold,
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `markwise.toml` in the current directory
/// 2. `~/.config/markwise/config.toml`
///
/// Environment variable overrides: `MARKWISE_TOP_N`, `MARKWISE_ASSISTANCE_THRESHOLD`.
pub fn load_config() -> Result<MarkwiseConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<MarkwiseConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("markwise.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<MarkwiseConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => MarkwiseConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut MarkwiseConfig) -> Result<()> {
    if let Ok(raw) = std::env::var("MARKWISE_TOP_N") {
        config.top_n = raw
            .trim()
            .parse()
            .with_context(|| format!("MARKWISE_TOP_N is not a whole number: {raw}"))?;
    }
    if let Ok(raw) = std::env::var("MARKWISE_ASSISTANCE_THRESHOLD") {
        config.assistance_threshold = raw
            .trim()
            .parse()
            .with_context(|| format!("MARKWISE_ASSISTANCE_THRESHOLD is not a number: {raw}"))?;
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("markwise"))
}
