//! The `markwise init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create markwise.toml
    if std::path::Path::new("markwise.toml").exists() {
        println!("markwise.toml already exists, skipping.");
    } else {
        std::fs::write("markwise.toml", SAMPLE_CONFIG)?;
        println!("Created markwise.toml");
    }

    // Create example class file
    std::fs::create_dir_all("classes")?;
    let example_path = std::path::Path::new("classes/example.toml");
    if example_path.exists() {
        println!("classes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CLASS)?;
        println!("Created classes/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Enter your students' scores in classes/example.toml");
    println!("  2. Run: markwise validate --class classes/example.toml");
    println!("  3. Run: markwise report --class classes/example.toml --style detailed");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# markwise configuration

top_n = 3
assistance_threshold = 40.0
report_style = "basic"
output_dir = "./markwise-results"

[[merge]]
canonical = "Area, perimeter and volume"
topics = ["Area and Volume", "Area and perimeter"]
"#;

const EXAMPLE_CLASS: &str = r#"[exam]
preset = "2nd Year Higher"

[[students]]
name = "Aoife Byrne"
scores = [18, 20, 30, 31, 20, 20, 15, 25, 9, 12]
judgement = "Very good"
track = "Higher-confident"

[[students]]
name = "Brian Walsh"
scores = [8, 10, 20, 11, 5, 10, 9, 12, 3, 7]
judgement = "Disappointing"
track = "Ordinary"

[[students]]
name = "Ciara Nolan"
scores = [15, 18, 25, 20, 22, 16, 12, 20, 6, 11]
judgement = "Good"
track = "Higher-borderline"
"#;
