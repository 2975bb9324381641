//! TOML class file parser.
//!
//! Loads an exam scheme, optional merge groups and the student roster from a
//! class file, and validates the result.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::merge::{MergeGroup, TopicMerger};
use crate::model::{Judgement, TrackScale};
use crate::roster::ClassState;
use crate::scheme::ExamScheme;

/// Intermediate TOML structure for parsing class files.
#[derive(Debug, Deserialize)]
struct TomlClassFile {
    exam: TomlExam,
    #[serde(default)]
    merge: Option<Vec<MergeGroup>>,
    #[serde(default)]
    students: Vec<TomlStudent>,
}

#[derive(Debug, Deserialize)]
struct TomlExam {
    #[serde(default)]
    preset: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    track_scale: Option<TrackScale>,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    max_score: f64,
    topic: String,
}

#[derive(Debug, Deserialize)]
struct TomlStudent {
    name: String,
    #[serde(default)]
    scores: Vec<f64>,
    #[serde(default)]
    judgement: Option<String>,
    #[serde(default)]
    track: Option<String>,
}

/// Parse a class file. `fallback_merger` is used when the file has no `[[merge]]` tables.
pub fn parse_class_file(path: &Path, fallback_merger: &TopicMerger) -> Result<ClassState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read class file: {}", path.display()))?;

    parse_class_str(&content, path, fallback_merger)
}

/// Parse a TOML string into a `ClassState` (useful for testing).
pub fn parse_class_str(
    content: &str,
    source_path: &Path,
    fallback_merger: &TopicMerger,
) -> Result<ClassState> {
    let parsed: TomlClassFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let scheme = build_scheme(parsed.exam)
        .with_context(|| format!("invalid [exam] in {}", source_path.display()))?;

    let merger = match parsed.merge {
        Some(groups) => TopicMerger::new(groups)
            .with_context(|| format!("invalid [[merge]] in {}", source_path.display()))?,
        None => fallback_merger.clone(),
    };

    let scale = scheme.track_scale();
    let mut state = ClassState::new(scheme, merger);

    for (i, student) in parsed.students.into_iter().enumerate() {
        let label = format!("student #{} ({})", i + 1, student.name.trim());
        let judgement = student
            .judgement
            .as_deref()
            .map(str::parse::<Judgement>)
            .transpose()
            .with_context(|| label.clone())?;
        let track = student
            .track
            .as_deref()
            .map(|t| scale.parse(t))
            .transpose()
            .with_context(|| label.clone())?;

        let id = state
            .add_student(&student.name, student.scores)
            .with_context(|| label.clone())?;
        state.set_judgement(id, judgement)?;
        state.set_track(id, track)?;
    }

    tracing::debug!(
        scheme = state.scheme().name(),
        students = state.len(),
        "parsed class file"
    );

    Ok(state)
}

fn build_scheme(exam: TomlExam) -> Result<ExamScheme> {
    match (exam.preset, exam.questions.is_empty()) {
        (Some(_), false) => {
            anyhow::bail!("set either `preset` or `questions`, not both")
        }
        (Some(preset), true) => Ok(ExamScheme::preset(&preset)?),
        (None, true) => anyhow::bail!("no `preset` and no `questions` given"),
        (None, false) => {
            let mut builder = ExamScheme::builder(exam.name.unwrap_or_default())
                .track_scale(exam.track_scale.unwrap_or_default());
            for q in exam.questions {
                builder = builder.question(q.max_score, q.topic);
            }
            Ok(builder.build()?)
        }
    }
}

/// A warning from class validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The student name (if applicable).
    pub student: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a parsed class for common data-entry issues.
pub fn validate_class(state: &ClassState) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let scheme = state.scheme();

    // Score counts that do not match the scheme
    for record in state.records() {
        if record.scores.len() != scheme.len() {
            warnings.push(ValidationWarning {
                student: Some(record.name.clone()),
                message: format!(
                    "has {} scores but the scheme has {} questions; excluded from analytics",
                    record.scores.len(),
                    scheme.len()
                ),
            });
        }
    }

    // Scores above the question maximum
    for record in state.records() {
        for (score, q) in record.scores.iter().zip(scheme.questions()) {
            if *score > q.max_score {
                warnings.push(ValidationWarning {
                    student: Some(record.name.clone()),
                    message: format!("Q{} score {} exceeds max {}", q.index, score, q.max_score),
                });
            }
        }
    }

    // Duplicate names
    let mut seen = HashSet::new();
    for record in state.records() {
        if !seen.insert(record.name.to_lowercase()) {
            warnings.push(ValidationWarning {
                student: Some(record.name.clone()),
                message: format!("duplicate student name: {}", record.name),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::AREA_CANONICAL;
    use crate::model::TrackRecommendation;
    use std::path::PathBuf;

    const PRESET_CLASS: &str = r#"
[exam]
preset = "2nd Year Higher"

[[students]]
name = "Aoife"
scores = [18, 20, 30, 31, 20, 20, 15, 25, 9, 12]
judgement = "Very good"
track = "Higher-confident"

[[students]]
name = "Brian"
scores = [8, 10, 20, 11, 5, 10, 9, 12, 3, 7]
"#;

    fn parse(toml: &str) -> Result<ClassState> {
        parse_class_str(toml, &PathBuf::from("class.toml"), &TopicMerger::standard())
    }

    #[test]
    fn parse_preset_class() {
        let state = parse(PRESET_CLASS).unwrap();
        assert_eq!(state.scheme().name(), "2nd Year Higher");
        assert_eq!(state.len(), 2);
        let aoife = &state.records()[0];
        let annotation = state.annotation(aoife.id);
        assert_eq!(annotation.judgement, Some(Judgement::VeryGood));
        assert_eq!(annotation.track, Some(TrackRecommendation::HigherConfident));
        assert_eq!(state.merger().merge("Area and perimeter"), AREA_CANONICAL);
        assert!(validate_class(&state).is_empty());
    }

    #[test]
    fn parse_custom_class_with_merge() {
        let toml = r#"
[exam]
name = "Mock"
track_scale = "next-year-level"

[[exam.questions]]
max_score = 10
topic = "Algebra"

[[exam.questions]]
max_score = 10
topic = "Algebra II"

[[merge]]
canonical = "Algebra"
topics = ["Algebra II"]

[[students]]
name = "Cara"
scores = [5, 7]
track = "Ordinary"
"#;
        let state = parse(toml).unwrap();
        assert_eq!(state.scheme().name(), "Mock");
        assert_eq!(state.merger().merge("Algebra II"), "Algebra");
        assert_eq!(state.merger().merge("Area and Volume"), "Area and Volume");
        let id = state.records()[0].id;
        assert_eq!(state.annotation(id).track, Some(TrackRecommendation::Ordinary));
    }

    #[test]
    fn unknown_judgement_is_an_error() {
        let toml = r#"
[exam]
preset = "5th Year"

[[students]]
name = "Dara"
scores = [1, 1, 1, 1, 1, 1, 1, 1, 1, 1]
judgement = "Stellar"
"#;
        let err = parse(toml).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Dara"), "{msg}");
        assert!(msg.contains("Stellar"), "{msg}");
    }

    #[test]
    fn track_outside_scale_is_an_error() {
        let toml = r#"
[exam]
preset = "5th Year"

[[students]]
name = "Dara"
scores = [1, 1, 1, 1, 1, 1, 1, 1, 1, 1]
track = "Higher-confident"
"#;
        assert!(parse(toml).is_err());
    }

    #[test]
    fn preset_and_questions_conflict() {
        let toml = r#"
[exam]
preset = "5th Year"

[[exam.questions]]
max_score = 10
topic = "Algebra"
"#;
        assert!(parse(toml).is_err());
        assert!(parse("[exam]\n").is_err());
    }

    #[test]
    fn invalid_custom_scheme() {
        let toml = r#"
[exam]
[[exam.questions]]
max_score = 0
topic = "Algebra"
"#;
        let err = parse(toml).unwrap_err();
        assert!(format!("{err:#}").contains("non-positive"));
    }

    #[test]
    fn validation_warnings() {
        let toml = r#"
[exam]
[[exam.questions]]
max_score = 10
topic = "Algebra"

[[exam.questions]]
max_score = 10
topic = "Number"

[[students]]
name = "Eoin"
scores = [11, 5]

[[students]]
name = "eoin"
scores = [1, 2, 3]
"#;
        let state = parse(toml).unwrap();
        let warnings = validate_class(&state);
        assert!(warnings.iter().any(|w| w.message.contains("exceeds max")));
        assert!(warnings.iter().any(|w| w.message.contains("excluded from analytics")));
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
    }

    #[test]
    fn parse_malformed_toml() {
        assert!(parse("this is not [valid toml }{").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("class.toml");
        std::fs::write(&path, PRESET_CLASS).unwrap();
        let state = parse_class_file(&path, &TopicMerger::identity()).unwrap();
        assert_eq!(state.len(), 2);
    }
}
