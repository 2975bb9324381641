//! The `markwise presets` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use markwise_core::compose::format_number;
use markwise_core::scheme::ExamScheme;

pub fn execute() -> Result<()> {
    for name in ExamScheme::preset_names() {
        let scheme = ExamScheme::preset(name)?;
        println!(
            "{} ({} questions, {} marks, {} recommendations)",
            scheme.name(),
            scheme.len(),
            format_number(scheme.total_max_score()),
            scheme.track_scale()
        );

        let mut table = Table::new();
        table.set_header(vec!["Question", "Max", "Topic"]);
        for q in scheme.questions() {
            table.add_row(vec![
                Cell::new(format!("Q{}", q.index)),
                Cell::new(format_number(q.max_score)),
                Cell::new(&q.topic),
            ]);
        }
        println!("{table}\n");
    }

    Ok(())
}
