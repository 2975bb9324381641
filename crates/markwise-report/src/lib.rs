//! markwise-report: export formats for a class.
//!
//! CSV score sheets, plain-text report bodies and a self-contained HTML
//! class summary. Every export is regenerated from a `ClassState` on demand.

pub mod csv;
pub mod html;
pub mod text;

use std::path::Path;

use anyhow::{Context, Result};

/// Write an export to `path`, creating parent directories.
pub(crate) fn write_export(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
