//! Per-student score analysis: percentages, merged topic means and the
//! ranked list of weakest topics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{MarkwiseError, Result};
use crate::merge::TopicMerger;
use crate::model::StudentRecord;
use crate::scheme::ExamScheme;

/// Default number of weak topics reported per student.
pub const DEFAULT_TOP_N: usize = 3;

/// Mean percentage of one canonical topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicMean {
    pub topic: String,
    pub mean_percentage: f64,
    /// Number of questions merged into this topic.
    pub questions: usize,
}

/// Outcome of analysing one student against a scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall percentage, rounded to two decimals (half to even).
    pub overall_percentage: f64,
    /// Weakest canonical topics, weakest first, at most `top_n` long.
    pub ranked_weak_topics: Vec<String>,
    /// Percentage per question in scheme order.
    pub per_question_percentages: Vec<f64>,
    /// Every canonical topic in ranking order.
    pub topic_means: Vec<TopicMean>,
}

/// Round to two decimals, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Percentage of `score` out of `max_score`; zero when `max_score` is not positive.
pub fn percentage(score: f64, max_score: f64) -> f64 {
    if max_score > 0.0 {
        score / max_score * 100.0
    } else {
        0.0
    }
}

/// Topic means compared at nine decimals, so equal fractions reached by
/// different sums still tie and fall through to the label.
fn ranking_key(mean: f64) -> f64 {
    (mean * 1e9).round()
}

/// Overall percentage of a record, rounded to two decimals.
///
/// Callers must have checked the record against the scheme length.
pub fn overall_percentage(scores: &[f64], scheme: &ExamScheme) -> f64 {
    let total: f64 = scores.iter().sum();
    round2(percentage(total, scheme.total_max_score()))
}

/// Check that a record has one score per question.
pub fn check_length(record: &StudentRecord, scheme: &ExamScheme) -> Result<()> {
    if record.scores.len() != scheme.len() {
        return Err(MarkwiseError::ScoreLengthMismatch {
            expected: scheme.len(),
            actual: record.scores.len(),
        });
    }
    Ok(())
}

/// Analyse one student.
///
/// Topics are merged before grouping, each canonical topic scores the
/// arithmetic mean of its question percentages, and topics are ranked by
/// ascending mean with ties broken by label.
pub fn analyze(
    record: &StudentRecord,
    scheme: &ExamScheme,
    merger: &TopicMerger,
    top_n: usize,
) -> Result<AnalysisResult> {
    check_length(record, scheme)?;

    let per_question_percentages: Vec<f64> = record
        .scores
        .iter()
        .zip(scheme.questions())
        .map(|(score, q)| percentage(*score, q.max_score))
        .collect();

    // canonical topic -> (sum of percentages, question count)
    let mut grouped: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for (q, pct) in scheme.questions().iter().zip(&per_question_percentages) {
        let entry = grouped.entry(merger.merge(&q.topic)).or_insert((0.0, 0));
        entry.0 += pct;
        entry.1 += 1;
    }

    let mut topic_means: Vec<TopicMean> = grouped
        .into_iter()
        .map(|(topic, (sum, count))| TopicMean {
            topic: topic.to_string(),
            mean_percentage: sum / count as f64,
            questions: count,
        })
        .collect();
    topic_means.sort_by(|a, b| {
        ranking_key(a.mean_percentage)
            .total_cmp(&ranking_key(b.mean_percentage))
            .then_with(|| a.topic.cmp(&b.topic))
    });

    let mut ranked_weak_topics: Vec<String> = Vec::with_capacity(top_n);
    for tm in &topic_means {
        if ranked_weak_topics.len() >= top_n {
            break;
        }
        if !ranked_weak_topics.contains(&tm.topic) {
            ranked_weak_topics.push(tm.topic.clone());
        }
    }

    let result = AnalysisResult {
        overall_percentage: overall_percentage(&record.scores, scheme),
        ranked_weak_topics,
        per_question_percentages,
        topic_means,
    };

    tracing::debug!(
        student = %record.name,
        overall = result.overall_percentage,
        weakest = ?result.ranked_weak_topics,
        "analysed student"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::{MergeGroup, AREA_CANONICAL};

    fn two_question_scheme(a: &str, b: &str) -> ExamScheme {
        ExamScheme::builder("Two")
            .question(10.0, a)
            .question(10.0, b)
            .build()
            .unwrap()
    }

    #[test]
    fn duplicate_topics_collapse() {
        let scheme = two_question_scheme("Algebra", "Algebra");
        let record = StudentRecord::new("Ann", vec![10.0, 10.0]);
        let result = analyze(&record, &scheme, &TopicMerger::identity(), 3).unwrap();
        assert_eq!(result.overall_percentage, 100.0);
        assert_eq!(result.ranked_weak_topics, vec!["Algebra"]);
        assert_eq!(result.topic_means[0].questions, 2);
    }

    #[test]
    fn merged_topics_average() {
        let scheme = two_question_scheme("Area and Volume", "Area and perimeter");
        let merger = TopicMerger::new(vec![MergeGroup::area()]).unwrap();
        let record = StudentRecord::new("Ben", vec![5.0, 7.0]);
        let result = analyze(&record, &scheme, &merger, 3).unwrap();
        assert_eq!(result.per_question_percentages, vec![50.0, 70.0]);
        assert_eq!(result.topic_means.len(), 1);
        assert!((result.topic_means[0].mean_percentage - 60.0).abs() < 1e-9);
        assert_eq!(result.ranked_weak_topics, vec![AREA_CANONICAL]);
    }

    #[test]
    fn ties_break_on_label() {
        let scheme = ExamScheme::builder("Ties")
            .question(10.0, "Vectors")
            .question(10.0, "Algebra")
            .question(10.0, "Calculus")
            .build()
            .unwrap();
        let record = StudentRecord::new("Cat", vec![5.0, 5.0, 2.0]);
        let result = analyze(&record, &scheme, &TopicMerger::identity(), 3).unwrap();
        assert_eq!(result.ranked_weak_topics, vec!["Calculus", "Algebra", "Vectors"]);
    }

    #[test]
    fn equal_fractions_tie_on_label_after_merging() {
        let scheme = ExamScheme::builder("Ninths")
            .question(9.0, "Algebra")
            .question(9.0, "Z1")
            .question(9.0, "Z2")
            .question(9.0, "Z3")
            .build()
            .unwrap();
        let merger = TopicMerger::new(vec![MergeGroup::new("Zeta", ["Z1", "Z2", "Z3"])]).unwrap();
        let record = StudentRecord::new("Jo", vec![1.0, 1.0, 1.0, 1.0]);
        let result = analyze(&record, &scheme, &merger, 3).unwrap();
        assert_eq!(result.ranked_weak_topics, vec!["Algebra", "Zeta"]);
        assert_eq!(result.topic_means[1].questions, 3);
    }

    #[test]
    fn top_n_limits_and_dedupes() {
        let scheme = ExamScheme::preset("2nd Year Higher").unwrap();
        let record = StudentRecord::new(
            "Dan",
            vec![10.0, 20.0, 30.0, 30.0, 5.0, 20.0, 10.0, 25.0, 2.0, 15.0],
        );
        let result = analyze(&record, &scheme, &TopicMerger::standard(), 3).unwrap();
        assert_eq!(result.ranked_weak_topics.len(), 3);
        assert_eq!(result.ranked_weak_topics[0], AREA_CANONICAL);
        let mut deduped = result.ranked_weak_topics.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), 3);
        // 9 canonical topics once the two area questions merge
        assert_eq!(result.topic_means.len(), 9);
    }

    #[test]
    fn top_n_larger_than_topics() {
        let scheme = two_question_scheme("Algebra", "Number");
        let record = StudentRecord::new("Eve", vec![1.0, 2.0]);
        let result = analyze(&record, &scheme, &TopicMerger::identity(), 10).unwrap();
        assert_eq!(result.ranked_weak_topics, vec!["Algebra", "Number"]);
    }

    #[test]
    fn top_n_zero_gives_empty_ranking() {
        let scheme = two_question_scheme("Algebra", "Number");
        let record = StudentRecord::new("Fay", vec![1.0, 2.0]);
        let result = analyze(&record, &scheme, &TopicMerger::identity(), 0).unwrap();
        assert!(result.ranked_weak_topics.is_empty());
    }

    #[test]
    fn length_mismatch_rejected() {
        let scheme = two_question_scheme("Algebra", "Number");
        let record = StudentRecord::new("Gus", vec![1.0]);
        let err = analyze(&record, &scheme, &TopicMerger::identity(), 3).unwrap_err();
        assert_eq!(
            err,
            MarkwiseError::ScoreLengthMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn overall_within_bounds() {
        let scheme = ExamScheme::preset("2nd Year Higher").unwrap();
        let maxes: Vec<f64> = scheme.questions().iter().map(|q| q.max_score).collect();
        for fraction in [0.0, 0.13, 0.5, 0.77, 1.0] {
            let scores = maxes.iter().map(|m| m * fraction).collect();
            let record = StudentRecord::new("Hal", scores);
            let result = analyze(&record, &scheme, &TopicMerger::standard(), 3).unwrap();
            assert!((0.0..=100.0).contains(&result.overall_percentage));
        }
    }

    #[test]
    fn rounding_is_two_decimals() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(12.5), 12.5);
        assert_eq!(round2(0.0), 0.0);
        // 2/3 of 100
        let scheme = ExamScheme::builder("Thirds")
            .question(3.0, "Number")
            .build()
            .unwrap();
        let record = StudentRecord::new("Ivy", vec![2.0]);
        let result = analyze(&record, &scheme, &TopicMerger::identity(), 1).unwrap();
        assert_eq!(result.overall_percentage, 66.67);
    }

    #[test]
    fn zero_max_score_is_zero_percent() {
        assert_eq!(percentage(5.0, 0.0), 0.0);
        assert_eq!(percentage(5.0, -1.0), 0.0);
    }
}
