//! Class-wide aggregate statistics and the weak-topic rank distribution.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analyzer::{analyze, check_length, round2};
use crate::error::{MarkwiseError, Result};
use crate::merge::TopicMerger;
use crate::model::StudentRecord;
use crate::scheme::ExamScheme;

/// Students strictly below this overall percentage need additional assistance.
pub const DEFAULT_ASSISTANCE_THRESHOLD: f64 = 40.0;

/// How many weak topics per student feed the rank distribution.
const RANK_DEPTH: usize = 3;

/// Tunables for [`summarize_with`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryOptions {
    pub assistance_threshold: f64,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            assistance_threshold: DEFAULT_ASSISTANCE_THRESHOLD,
        }
    }
}

/// Position of a topic in a student's weak-topic ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankPosition {
    First,
    Second,
    Third,
}

impl RankPosition {
    pub const ALL: [RankPosition; 3] = [RankPosition::First, RankPosition::Second, RankPosition::Third];

    fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }
}

impl fmt::Display for RankPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankPosition::First => write!(f, "First"),
            RankPosition::Second => write!(f, "Second"),
            RankPosition::Third => write!(f, "Third"),
        }
    }
}

/// How often a canonical topic was ranked 1st/2nd/3rd weakest across the class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRankEntry {
    pub topic: String,
    pub first: u32,
    pub second: u32,
    pub third: u32,
    pub total: u32,
}

impl TopicRankEntry {
    pub fn count(&self, position: RankPosition) -> u32 {
        match position {
            RankPosition::First => self.first,
            RankPosition::Second => self.second,
            RankPosition::Third => self.third,
        }
    }

    fn bump(&mut self, position: RankPosition) {
        match position {
            RankPosition::First => self.first += 1,
            RankPosition::Second => self.second += 1,
            RankPosition::Third => self.third += 1,
        }
        self.total += 1;
    }
}

/// One student's overall result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentOverall {
    pub id: Uuid,
    pub name: String,
    pub overall_percentage: f64,
}

/// A record left out of the aggregates because it does not fit the scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedRecord {
    pub id: Uuid,
    pub name: String,
    pub expected: usize,
    pub actual: usize,
}

/// Aggregate view of a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSummary {
    pub students: Vec<StudentOverall>,
    pub mean: f64,
    pub median: f64,
    pub max: f64,
    pub min: f64,
    pub assistance_threshold: f64,
    /// Students strictly below the assistance threshold, in roster order.
    pub needs_assistance: Vec<StudentOverall>,
    /// Sorted by total descending, then topic.
    pub topic_ranks: Vec<TopicRankEntry>,
    pub excluded: Vec<ExcludedRecord>,
}

impl ClassSummary {
    /// Long-form `(topic, position, count)` rows for charting; zero counts omitted.
    pub fn rank_chart_rows(&self) -> Vec<(&str, RankPosition, u32)> {
        self.topic_ranks
            .iter()
            .flat_map(|entry| {
                RankPosition::ALL
                    .into_iter()
                    .map(move |pos| (entry.topic.as_str(), pos, entry.count(pos)))
            })
            .filter(|(_, _, count)| *count > 0)
            .collect()
    }
}

fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Summarise a class with the default options.
pub fn summarize(
    records: &[StudentRecord],
    scheme: &ExamScheme,
    merger: &TopicMerger,
) -> Result<ClassSummary> {
    summarize_with(records, scheme, merger, &SummaryOptions::default())
}

/// Summarise a class.
///
/// Records whose score count does not match the scheme are excluded and
/// listed in [`ClassSummary::excluded`]. Returns [`MarkwiseError::NoData`]
/// when no record is eligible.
pub fn summarize_with(
    records: &[StudentRecord],
    scheme: &ExamScheme,
    merger: &TopicMerger,
    options: &SummaryOptions,
) -> Result<ClassSummary> {
    let mut students = Vec::new();
    let mut excluded = Vec::new();
    let mut ranks: HashMap<String, TopicRankEntry> = HashMap::new();

    for record in records {
        if let Err(MarkwiseError::ScoreLengthMismatch { expected, actual }) =
            check_length(record, scheme)
        {
            tracing::warn!(
                student = %record.name,
                expected,
                actual,
                "excluding record that does not match the exam scheme"
            );
            excluded.push(ExcludedRecord {
                id: record.id,
                name: record.name.clone(),
                expected,
                actual,
            });
            continue;
        }

        let analysis = analyze(record, scheme, merger, RANK_DEPTH)?;
        for (i, topic) in analysis.ranked_weak_topics.iter().enumerate() {
            if let Some(position) = RankPosition::from_index(i) {
                ranks
                    .entry(topic.clone())
                    .or_insert_with(|| TopicRankEntry {
                        topic: topic.clone(),
                        ..Default::default()
                    })
                    .bump(position);
            }
        }

        students.push(StudentOverall {
            id: record.id,
            name: record.name.clone(),
            overall_percentage: analysis.overall_percentage,
        });
    }

    if students.is_empty() {
        return Err(MarkwiseError::NoData);
    }

    let mut sorted: Vec<f64> = students.iter().map(|s| s.overall_percentage).collect();
    sorted.sort_by(f64::total_cmp);
    let mean = round2(sorted.iter().sum::<f64>() / sorted.len() as f64);
    let median = round2(median(&sorted));
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];

    let needs_assistance: Vec<StudentOverall> = students
        .iter()
        .filter(|s| s.overall_percentage < options.assistance_threshold)
        .cloned()
        .collect();

    let mut topic_ranks: Vec<TopicRankEntry> = ranks.into_values().collect();
    topic_ranks.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.topic.cmp(&b.topic)));

    tracing::info!(
        students = students.len(),
        excluded = excluded.len(),
        mean,
        "class summary computed"
    );

    Ok(ClassSummary {
        students,
        mean,
        median,
        max,
        min,
        assistance_threshold: options.assistance_threshold,
        needs_assistance,
        topic_ranks,
        excluded,
    })
}
