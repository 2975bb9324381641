//! Report text composition.
//!
//! Two variants: a fixed basic template, and a detailed report built from a
//! judgement sentence, a track sentence and a topic-focus sentence whose
//! wording depends on the judgement band.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analyzer::AnalysisResult;
use crate::model::{Judgement, TrackRecommendation};

/// Separator between topics in every report sentence.
pub const TOPIC_SEPARATOR: &str = "; ";

/// Which report body to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStyle {
    #[default]
    Basic,
    Detailed,
}

impl fmt::Display for ReportStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportStyle::Basic => write!(f, "basic"),
            ReportStyle::Detailed => write!(f, "detailed"),
        }
    }
}

impl FromStr for ReportStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(ReportStyle::Basic),
            "detailed" => Ok(ReportStyle::Detailed),
            other => Err(format!("unknown report style: {other}")),
        }
    }
}

/// Render a score or percentage the way reports show it: `100.0`, `62.5`, `66.67`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn join_topics(analysis: &AnalysisResult) -> String {
    analysis.ranked_weak_topics.join(TOPIC_SEPARATOR)
}

/// Basic two-line report.
pub fn compose_basic(name: &str, analysis: &AnalysisResult) -> String {
    format!(
        "Name: {name} | Percentage: {}%\nTo improve this grade {name} needs to work on the following topics: {}.",
        format_number(analysis.overall_percentage),
        join_topics(analysis)
    )
}

/// Sentence describing the judgement band; empty when unset.
pub fn judgement_sentence(name: &str, judgement: Option<Judgement>) -> String {
    let Some(judgement) = judgement else {
        return String::new();
    };
    match judgement {
        Judgement::Perfect => {
            format!("{name} achieved full marks in this exam, an outstanding result.")
        }
        Judgement::Excellent => format!("{name} achieved an excellent result in this exam."),
        Judgement::VeryGood => format!("{name} achieved a very good result in this exam."),
        Judgement::Good => format!("{name} achieved a good result in this exam."),
        Judgement::Solid => format!("{name} produced a solid performance in this exam."),
        Judgement::Ok => format!(
            "{name}'s result in this exam was OK, but there is clear room for improvement."
        ),
        Judgement::Disappointing => {
            format!("{name}'s result in this exam was disappointing.")
        }
        Judgement::Awful => format!(
            "{name}'s result in this exam was very poor and a significant improvement is needed."
        ),
    }
}

/// Sentence describing the track recommendation; empty when unset.
pub fn track_sentence(name: &str, track: Option<TrackRecommendation>) -> String {
    let Some(track) = track else {
        return String::new();
    };
    match track {
        TrackRecommendation::StayHigher => {
            format!("{name} should continue studying at Higher level.")
        }
        TrackRecommendation::DropToOrdinary => {
            format!("{name} should consider moving to Ordinary level.")
        }
        TrackRecommendation::DropToFoundation => {
            format!("{name} should consider moving to Foundation level.")
        }
        TrackRecommendation::Ordinary => {
            format!("{name} is recommended to take Ordinary level next year.")
        }
        TrackRecommendation::HigherBorderline => format!(
            "{name} is borderline for Higher level next year and will need to work consistently to stay there."
        ),
        TrackRecommendation::HigherConfident => {
            format!("{name} can confidently take Higher level next year.")
        }
    }
}

/// Sentence naming the topics to focus on, worded by judgement band.
pub fn topic_sentence(name: &str, judgement: Option<Judgement>, topics: &str) -> String {
    match judgement {
        Some(Judgement::Perfect) => {
            format!("The only areas where marks were lost in this exam were: {topics}.")
        }
        Some(Judgement::Excellent | Judgement::VeryGood) => format!(
            "To further improve this grade, {name} should focus on the following topics: {topics}."
        ),
        _ => format!("To improve this grade {name} needs to work on the following topics: {topics}."),
    }
}

/// Detailed report: judgement, track and topic sentences, empty parts omitted.
pub fn compose_detailed(
    name: &str,
    analysis: &AnalysisResult,
    judgement: Option<Judgement>,
    track: Option<TrackRecommendation>,
) -> String {
    let parts = [
        judgement_sentence(name, judgement),
        track_sentence(name, track),
        topic_sentence(name, judgement, &join_topics(analysis)),
    ];
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compose in the requested style.
pub fn compose(
    style: ReportStyle,
    name: &str,
    analysis: &AnalysisResult,
    judgement: Option<Judgement>,
    track: Option<TrackRecommendation>,
) -> String {
    match style {
        ReportStyle::Basic => compose_basic(name, analysis),
        ReportStyle::Detailed => compose_detailed(name, analysis, judgement, track),
    }
}
