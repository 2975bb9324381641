//! The `markwise validate` command.

use std::path::PathBuf;

use anyhow::Result;

use markwise_core::parser::validate_class;

pub fn execute(class_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let (_, state) = super::load_class(&class_path, config_path)?;

    println!(
        "Class file: {} ({} students, exam: {})",
        class_path.display(),
        state.len(),
        state.scheme().name()
    );

    let warnings = validate_class(&state);
    for w in &warnings {
        let prefix = w
            .student
            .as_ref()
            .map(|name| format!("  [{name}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Class file valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
