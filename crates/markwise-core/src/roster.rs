//! Explicit class session state: the active scheme, topic merger, roster
//! and per-student annotations.
//!
//! The core algorithms are free functions over borrowed data; `ClassState`
//! is the one owner the calling context passes around.

use std::collections::HashMap;

use uuid::Uuid;

use crate::analytics::{summarize_with, ClassSummary, SummaryOptions};
use crate::analyzer::{analyze, AnalysisResult};
use crate::compose::{compose, ReportStyle};
use crate::error::{MarkwiseError, Result};
use crate::merge::TopicMerger;
use crate::model::{Annotation, Judgement, StudentRecord, TrackRecommendation};
use crate::scheme::ExamScheme;

/// The roster and its exam scheme.
#[derive(Debug, Clone)]
pub struct ClassState {
    scheme: ExamScheme,
    merger: TopicMerger,
    records: Vec<StudentRecord>,
    annotations: HashMap<Uuid, Annotation>,
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(MarkwiseError::InvalidStudent("name is empty".into()));
    }
    Ok(trimmed.to_string())
}

fn validate_scores(scores: &[f64]) -> Result<()> {
    if let Some((i, s)) = scores
        .iter()
        .enumerate()
        .find(|(_, s)| !s.is_finite() || **s < 0.0)
    {
        return Err(MarkwiseError::InvalidStudent(format!(
            "Q{} score {s} must be a non-negative number",
            i + 1
        )));
    }
    Ok(())
}

impl ClassState {
    pub fn new(scheme: ExamScheme, merger: TopicMerger) -> Self {
        Self {
            scheme,
            merger,
            records: Vec::new(),
            annotations: HashMap::new(),
        }
    }

    pub fn scheme(&self) -> &ExamScheme {
        &self.scheme
    }

    pub fn merger(&self) -> &TopicMerger {
        &self.merger
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Records whose score count matches the active scheme.
    pub fn compatible_records(&self) -> impl Iterator<Item = &StudentRecord> {
        let expected = self.scheme.len();
        self.records.iter().filter(move |r| r.scores.len() == expected)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn student(&self, id: Uuid) -> Result<&StudentRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or(MarkwiseError::StudentNotFound(id))
    }

    fn student_mut(&mut self, id: Uuid) -> Result<&mut StudentRecord> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(MarkwiseError::StudentNotFound(id))
    }

    /// Add a student. A score count that differs from the scheme is accepted;
    /// such records are left out of aggregates.
    pub fn add_student(&mut self, name: &str, scores: Vec<f64>) -> Result<Uuid> {
        let name = validate_name(name)?;
        validate_scores(&scores)?;
        if scores.len() != self.scheme.len() {
            tracing::warn!(
                student = %name,
                expected = self.scheme.len(),
                actual = scores.len(),
                "student added with a score count that does not match the scheme"
            );
        }
        let record = StudentRecord::new(name, scores);
        let id = record.id;
        self.records.push(record);
        Ok(id)
    }

    pub fn rename(&mut self, id: Uuid, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        self.student_mut(id)?.name = name;
        Ok(())
    }

    pub fn update_scores(&mut self, id: Uuid, scores: Vec<f64>) -> Result<()> {
        validate_scores(&scores)?;
        self.student_mut(id)?.scores = scores;
        Ok(())
    }

    /// Remove a student and their annotation.
    pub fn remove(&mut self, id: Uuid) -> Result<StudentRecord> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(MarkwiseError::StudentNotFound(id))?;
        self.annotations.remove(&id);
        Ok(self.records.remove(pos))
    }

    pub fn set_judgement(&mut self, id: Uuid, judgement: Option<Judgement>) -> Result<()> {
        self.student(id)?;
        self.annotations.entry(id).or_default().judgement = judgement;
        Ok(())
    }

    pub fn set_track(&mut self, id: Uuid, track: Option<TrackRecommendation>) -> Result<()> {
        self.student(id)?;
        self.annotations.entry(id).or_default().track = track;
        Ok(())
    }

    /// Annotation for a student; default (both unset) when none was chosen.
    pub fn annotation(&self, id: Uuid) -> Annotation {
        self.annotations.get(&id).copied().unwrap_or_default()
    }

    /// Replace the scheme. Scores entered against the old scheme are
    /// meaningless under the new one, so the roster is cleared.
    /// Returns the number of records dropped.
    pub fn switch_scheme(&mut self, scheme: ExamScheme) -> usize {
        let dropped = self.records.len();
        tracing::info!(
            from = self.scheme.name(),
            to = scheme.name(),
            dropped,
            "switching exam scheme"
        );
        self.scheme = scheme;
        self.records.clear();
        self.annotations.clear();
        dropped
    }

    pub fn set_merger(&mut self, merger: TopicMerger) {
        self.merger = merger;
    }

    /// Single-student analysis for live preview.
    pub fn preview(&self, id: Uuid, top_n: usize) -> Result<AnalysisResult> {
        analyze(self.student(id)?, &self.scheme, &self.merger, top_n)
    }

    /// Report body for one student.
    pub fn compose_report(&self, id: Uuid, style: ReportStyle, top_n: usize) -> Result<String> {
        let record = self.student(id)?;
        let analysis = analyze(record, &self.scheme, &self.merger, top_n)?;
        let annotation = self.annotation(id);
        Ok(compose(
            style,
            &record.name,
            &analysis,
            annotation.judgement,
            annotation.track,
        ))
    }

    /// Class summary with the given assistance threshold.
    pub fn summarize(&self, options: &SummaryOptions) -> Result<ClassSummary> {
        summarize_with(&self.records, &self.scheme, &self.merger, options)
    }
}
