//! The `markwise summary` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use markwise_core::analytics::ClassSummary;
use markwise_core::compose::format_number;
use markwise_report::html::write_html_report;

pub fn execute(
    class_path: PathBuf,
    format: String,
    html: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, state) = super::load_class(&class_path, config_path)?;

    let summary = match state.summarize(&config.summary_options()) {
        Ok(summary) => Some(summary),
        Err(e) if e.is_no_data() => None,
        Err(e) => return Err(e.into()),
    };

    match (format.as_str(), &summary) {
        ("json", Some(summary)) => println!("{}", serde_json::to_string_pretty(summary)?),
        ("json", None) => println!("{}", serde_json::json!({ "status": "no_data" })),
        (_, Some(summary)) => print_summary(summary),
        (_, None) => println!("No data: no students with scores matching the exam scheme."),
    }

    if let Some(path) = html {
        write_html_report(&state, summary.as_ref(), config.top_n, &path)?;
        eprintln!("HTML summary: {}", path.display());
    }

    Ok(())
}

fn print_summary(summary: &ClassSummary) {
    println!("Students: {}", summary.students.len());
    println!(
        "Mean: {}%  Median: {}%  Highest: {}%  Lowest: {}%",
        format_number(summary.mean),
        format_number(summary.median),
        format_number(summary.max),
        format_number(summary.min)
    );

    if summary.needs_assistance.is_empty() {
        println!(
            "\nNo students below {}%.",
            format_number(summary.assistance_threshold)
        );
    } else {
        println!(
            "\nNeeding additional assistance (below {}%):",
            format_number(summary.assistance_threshold)
        );
        for s in &summary.needs_assistance {
            println!("  {} ({}%)", s.name, format_number(s.overall_percentage));
        }
    }

    if !summary.topic_ranks.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Topic", "First", "Second", "Third", "Total"]);
        for entry in &summary.topic_ranks {
            table.add_row(vec![
                Cell::new(&entry.topic),
                Cell::new(entry.first),
                Cell::new(entry.second),
                Cell::new(entry.third),
                Cell::new(entry.total),
            ]);
        }
        println!("\nWeakest topic rankings:\n{table}");
    }

    if !summary.excluded.is_empty() {
        println!("\nExcluded (scores do not match the exam scheme):");
        for x in &summary.excluded {
            println!("  {} ({} of {} scores)", x.name, x.actual, x.expected);
        }
    }
}
