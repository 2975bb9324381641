//! Subcommand implementations.

pub mod analyze;
pub mod export;
pub mod init;
pub mod presets;
pub mod report;
pub mod summary;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;

use markwise_core::config::{load_config_from, MarkwiseConfig};
use markwise_core::parser::parse_class_file;
use markwise_core::roster::ClassState;

/// Load the config and the class file it applies to.
pub(crate) fn load_class(
    class_path: &Path,
    config_path: Option<PathBuf>,
) -> Result<(MarkwiseConfig, ClassState)> {
    let config = load_config_from(config_path.as_deref())?;
    let merger = config.merger()?;
    let state = parse_class_file(class_path, &merger)?;
    Ok((config, state))
}
