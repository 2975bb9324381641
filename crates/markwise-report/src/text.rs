//! Plain-text report export: one block per student, blocks separated by a
//! blank line.

use std::path::Path;

use anyhow::Result;

use markwise_core::compose::ReportStyle;
use markwise_core::roster::ClassState;

/// Generate report bodies for the whole roster.
///
/// A student whose scores do not fit the scheme gets a notice block instead
/// of a report.
pub fn generate_text_reports(state: &ClassState, style: ReportStyle, top_n: usize) -> String {
    let blocks: Vec<String> = state
        .records()
        .iter()
        .map(|record| match state.compose_report(record.id, style, top_n) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(student = %record.name, "no report: {e}");
                format!("{}: {e}.", record.name)
            }
        })
        .collect();

    blocks.join("\n\n")
}

/// Write report bodies to a file.
pub fn write_text_reports(
    state: &ClassState,
    style: ReportStyle,
    top_n: usize,
    path: &Path,
) -> Result<()> {
    let mut content = generate_text_reports(state, style, top_n);
    if !content.is_empty() {
        content.push('\n');
    }
    crate::write_export(path, &content)
}
