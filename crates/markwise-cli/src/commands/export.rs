//! The `markwise export` command.

use std::path::PathBuf;

use anyhow::Result;

use markwise_report::csv::write_csv;

pub fn execute(
    class_path: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, state) = super::load_class(&class_path, config_path)?;

    let path = output.unwrap_or_else(|| {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        config.output_dir.join(format!("class-results-{timestamp}.csv"))
    });

    write_csv(&state, &path)?;
    let skipped = state.len() - state.compatible_records().count();
    if skipped > 0 {
        eprintln!("{skipped} student(s) skipped: scores do not match the exam scheme");
    }
    println!("CSV written to: {}", path.display());

    Ok(())
}
