//! Exam schemes: per-question maximum scores and topic labels.
//!
//! A scheme is either one of the built-in presets or assembled question by
//! question with [`ExamSchemeBuilder`]. Both paths go through the same
//! validation, so a constructed [`ExamScheme`] always has at least one
//! question and strictly positive maximum scores.

use serde::Serialize;

use crate::error::{MarkwiseError, Result};
use crate::model::{Question, TrackScale};

/// Upper bound on the number of questions in a custom scheme.
pub const MAX_CUSTOM_QUESTIONS: usize = 50;

struct Preset {
    name: &'static str,
    max_scores: &'static [f64],
    topics: &'static [&'static str],
    track_scale: TrackScale,
}

const PRESETS: &[Preset] = &[
    Preset {
        name: "5th Year",
        max_scores: &[10.0; 10],
        topics: &[
            "Algebra",
            "Functions",
            "Trigonometry",
            "Statistics",
            "Calculus",
            "Geometry",
            "Probability",
            "Vectors",
            "Sequences",
            "Complex Numbers",
        ],
        track_scale: TrackScale::DropLevel,
    },
    Preset {
        name: "2nd Year Higher",
        max_scores: &[20.0, 25.0, 35.0, 35.0, 35.0, 20.0, 20.0, 25.0, 10.0, 15.0],
        topics: &[
            "Averages",
            "Factorising and inequalities",
            "Statistical charts",
            "Coordinate Geometry",
            "Area and Volume",
            "Financial Maths",
            "Factorising and solving equations",
            "Writing equations",
            "Area and perimeter",
            "Number",
        ],
        track_scale: TrackScale::NextYearLevel,
    },
];

/// An ordered, validated list of exam questions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamScheme {
    name: String,
    questions: Vec<Question>,
    track_scale: TrackScale,
}

impl ExamScheme {
    /// Load a built-in scheme by name (case-insensitive).
    pub fn preset(name: &str) -> Result<Self> {
        let wanted = name.trim().to_lowercase();
        let preset = PRESETS
            .iter()
            .find(|p| p.name.to_lowercase() == wanted)
            .ok_or_else(|| MarkwiseError::UnknownPreset(name.to_string()))?;

        let mut builder = ExamSchemeBuilder::new(preset.name).track_scale(preset.track_scale);
        for (max_score, topic) in preset.max_scores.iter().zip(preset.topics) {
            builder = builder.question(*max_score, *topic);
        }
        builder.validate(usize::MAX)
    }

    /// Names of all built-in schemes.
    pub fn preset_names() -> Vec<&'static str> {
        PRESETS.iter().map(|p| p.name).collect()
    }

    /// Start a custom scheme.
    pub fn builder(name: impl Into<String>) -> ExamSchemeBuilder {
        ExamSchemeBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn track_scale(&self) -> TrackScale {
        self.track_scale
    }

    /// Sum of per-question maximum scores.
    pub fn total_max_score(&self) -> f64 {
        self.questions.iter().map(|q| q.max_score).sum()
    }

    /// Raw topic labels in question order.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(|q| q.topic.as_str())
    }
}

/// Builder for custom schemes, one `(max_score, topic)` pair per question.
#[derive(Debug, Clone)]
pub struct ExamSchemeBuilder {
    name: String,
    entries: Vec<(f64, String)>,
    track_scale: TrackScale,
}

impl ExamSchemeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            track_scale: TrackScale::default(),
        }
    }

    /// Append the next question.
    pub fn question(mut self, max_score: f64, topic: impl Into<String>) -> Self {
        self.entries.push((max_score, topic.into()));
        self
    }

    pub fn track_scale(mut self, scale: TrackScale) -> Self {
        self.track_scale = scale;
        self
    }

    /// Validate and produce the scheme.
    pub fn build(self) -> Result<ExamScheme> {
        self.validate(MAX_CUSTOM_QUESTIONS)
    }

    fn validate(self, max_questions: usize) -> Result<ExamScheme> {
        if self.entries.is_empty() {
            return Err(MarkwiseError::InvalidScheme(
                "a scheme needs at least one question".into(),
            ));
        }
        if self.entries.len() > max_questions {
            return Err(MarkwiseError::InvalidScheme(format!(
                "{} questions exceeds the limit of {max_questions}",
                self.entries.len()
            )));
        }

        let mut questions = Vec::with_capacity(self.entries.len());
        for (i, (max_score, topic)) in self.entries.into_iter().enumerate() {
            let index = i + 1;
            if !max_score.is_finite() || max_score <= 0.0 {
                return Err(MarkwiseError::InvalidScheme(format!(
                    "Q{index} has non-positive max score {max_score}"
                )));
            }
            let topic = topic.trim().to_string();
            if topic.is_empty() {
                return Err(MarkwiseError::InvalidScheme(format!(
                    "Q{index} has no topic"
                )));
            }
            questions.push(Question {
                index,
                max_score,
                topic,
            });
        }

        let name = match self.name.trim() {
            "" => "Custom".to_string(),
            trimmed => trimmed.to_string(),
        };

        Ok(ExamScheme {
            name,
            questions,
            track_scale: self.track_scale,
        })
    }
}
