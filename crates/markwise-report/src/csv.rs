//! CSV score sheet: one row per student, `Name, Q1..Qn, Total, %`.

use std::path::Path;

use anyhow::Result;

use markwise_core::analyzer::overall_percentage;
use markwise_core::compose::format_number;
use markwise_core::roster::ClassState;

/// Quote a field when it contains a delimiter, quote or line break.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Generate the class score sheet.
///
/// Students whose score count does not match the scheme are skipped.
pub fn generate_csv(state: &ClassState) -> String {
    let scheme = state.scheme();
    let mut out = String::new();

    let mut header = vec!["Name".to_string()];
    header.extend((1..=scheme.len()).map(|i| format!("Q{i}")));
    header.push("Total".into());
    header.push("%".into());
    out.push_str(&header.join(","));
    out.push('\n');

    for record in state.records() {
        if record.scores.len() != scheme.len() {
            tracing::warn!(
                student = %record.name,
                "skipping CSV row: scores do not match the exam scheme"
            );
            continue;
        }
        let mut row = vec![csv_field(&record.name)];
        row.extend(record.scores.iter().map(|s| format_number(*s)));
        row.push(format_number(record.total()));
        row.push(format_number(overall_percentage(&record.scores, scheme)));
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Write the class score sheet to a file.
pub fn write_csv(state: &ClassState, path: &Path) -> Result<()> {
    crate::write_export(path, &generate_csv(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use markwise_core::merge::TopicMerger;
    use markwise_core::scheme::ExamScheme;

    fn class() -> ClassState {
        let scheme = ExamScheme::builder("Quiz")
            .question(10.0, "Algebra")
            .question(20.0, "Number")
            .question(30.0, "Geometry")
            .build()
            .unwrap();
        let mut state = ClassState::new(scheme, TopicMerger::identity());
        state.add_student("Ann", vec![10.0, 15.5, 20.0]).unwrap();
        state.add_student("O'Brien, Sean", vec![1.0, 2.0, 3.0]).unwrap();
        state.add_student("Short", vec![1.0]).unwrap();
        state
    }

    #[test]
    fn header_and_rows() {
        let csv = generate_csv(&class());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Name,Q1,Q2,Q3,Total,%");
        assert_eq!(lines[1], "Ann,10.0,15.5,20.0,45.5,75.83");
        assert_eq!(lines[2], "\"O'Brien, Sean\",1.0,2.0,3.0,6.0,10.0");
        assert_eq!(lines.len(), 3, "mismatched student must be skipped");
    }

    #[test]
    fn total_column_round_trips_score_sum() {
        let state = class();
        let csv = generate_csv(&state);
        let totals: Vec<f64> = csv
            .lines()
            .skip(1)
            .map(|line| {
                let fields: Vec<&str> = line.rsplitn(3, ',').collect();
                fields[1].parse().unwrap()
            })
            .collect();
        let expected: Vec<f64> = state.compatible_records().map(|r| r.total()).collect();
        assert_eq!(totals, expected);
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("plain"), "plain");
    }

    #[test]
    fn write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("class.csv");
        write_csv(&class(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Name,Q1"));
    }
}
