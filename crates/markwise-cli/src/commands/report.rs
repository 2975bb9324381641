//! The `markwise report` command.

use std::path::PathBuf;

use anyhow::Result;

use markwise_core::compose::ReportStyle;
use markwise_report::text::{generate_text_reports, write_text_reports};

pub fn execute(
    class_path: PathBuf,
    style: Option<String>,
    top_n: Option<usize>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, state) = super::load_class(&class_path, config_path)?;
    let style = match style {
        Some(s) => s.parse::<ReportStyle>().map_err(|e| anyhow::anyhow!("{}", e))?,
        None => config.report_style,
    };
    let top_n = top_n.unwrap_or(config.top_n);

    match output {
        Some(path) => {
            write_text_reports(&state, style, top_n, &path)?;
            eprintln!(
                "{} {} report(s) written to: {}",
                state.len(),
                style,
                path.display()
            );
        }
        None => {
            let text = generate_text_reports(&state, style, top_n);
            if text.is_empty() {
                println!("No students in {}.", class_path.display());
            } else {
                println!("{text}");
            }
        }
    }

    Ok(())
}
