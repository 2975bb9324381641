//! The `markwise analyze` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use markwise_core::compose::{format_number, TOPIC_SEPARATOR};

pub fn execute(
    class_path: PathBuf,
    top_n: Option<usize>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, state) = super::load_class(&class_path, config_path)?;
    let top_n = top_n.unwrap_or(config.top_n);

    if state.is_empty() {
        println!("No students in {}.", class_path.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Student", "%", "Weakest topics"]);

    for record in state.records() {
        match state.preview(record.id, top_n) {
            Ok(analysis) => {
                table.add_row(vec![
                    Cell::new(&record.name),
                    Cell::new(format!("{}%", format_number(analysis.overall_percentage))),
                    Cell::new(analysis.ranked_weak_topics.join(TOPIC_SEPARATOR)),
                ]);
            }
            Err(e) if e.is_mismatch() => {
                table.add_row(vec![Cell::new(&record.name), Cell::new("-"), Cell::new(e)]);
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("{table}");
    Ok(())
}
