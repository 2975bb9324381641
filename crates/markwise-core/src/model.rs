//! Core data model types for markwise.
//!
//! Questions, student records and the two closed label sets (judgement
//! bands and track recommendations) that drive report wording.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::MarkwiseError;

/// A single exam question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// 1-based position in the scheme.
    pub index: usize,
    /// Maximum attainable score, always > 0 in a built scheme.
    pub max_score: f64,
    /// Raw topic label as written in the scheme.
    pub topic: String,
}

/// One student's raw scores, one per question of the scheme they were entered against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Stable identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Raw per-question scores.
    pub scores: Vec<f64>,
}

impl StudentRecord {
    /// Create a record with a fresh id.
    pub fn new(name: impl Into<String>, scores: Vec<f64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            scores,
        }
    }

    /// Sum of all raw scores.
    pub fn total(&self) -> f64 {
        self.scores.iter().sum()
    }
}

/// Qualitative rating of a student's overall performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Judgement {
    Perfect,
    Excellent,
    #[serde(rename = "Very good")]
    VeryGood,
    Good,
    Solid,
    #[serde(rename = "OK")]
    Ok,
    Disappointing,
    Awful,
}

impl Judgement {
    /// All bands, best first.
    pub const ALL: [Judgement; 8] = [
        Judgement::Perfect,
        Judgement::Excellent,
        Judgement::VeryGood,
        Judgement::Good,
        Judgement::Solid,
        Judgement::Ok,
        Judgement::Disappointing,
        Judgement::Awful,
    ];
}

impl fmt::Display for Judgement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Judgement::Perfect => write!(f, "Perfect"),
            Judgement::Excellent => write!(f, "Excellent"),
            Judgement::VeryGood => write!(f, "Very good"),
            Judgement::Good => write!(f, "Good"),
            Judgement::Solid => write!(f, "Solid"),
            Judgement::Ok => write!(f, "OK"),
            Judgement::Disappointing => write!(f, "Disappointing"),
            Judgement::Awful => write!(f, "Awful"),
        }
    }
}

impl FromStr for Judgement {
    type Err = MarkwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "perfect" => Ok(Judgement::Perfect),
            "excellent" => Ok(Judgement::Excellent),
            "very good" | "verygood" => Ok(Judgement::VeryGood),
            "good" => Ok(Judgement::Good),
            "solid" => Ok(Judgement::Solid),
            "ok" => Ok(Judgement::Ok),
            "disappointing" => Ok(Judgement::Disappointing),
            "awful" => Ok(Judgement::Awful),
            _ => Err(MarkwiseError::UnknownLabel {
                kind: "judgement",
                label: s.to_string(),
            }),
        }
    }
}

/// Which recommendation vocabulary a scheme uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackScale {
    /// Should the student drop level: No / Ordinary / Foundation.
    #[default]
    DropLevel,
    /// Which level to take next year: Ordinary / Higher-borderline / Higher-confident.
    NextYearLevel,
}

impl TrackScale {
    /// The recommendations valid on this scale.
    pub fn options(&self) -> &'static [TrackRecommendation] {
        match self {
            TrackScale::DropLevel => &[
                TrackRecommendation::StayHigher,
                TrackRecommendation::DropToOrdinary,
                TrackRecommendation::DropToFoundation,
            ],
            TrackScale::NextYearLevel => &[
                TrackRecommendation::Ordinary,
                TrackRecommendation::HigherBorderline,
                TrackRecommendation::HigherConfident,
            ],
        }
    }

    /// Parse a recommendation label in the context of this scale.
    ///
    /// `Ordinary` means "drop to Ordinary" on the drop scale and "take
    /// Ordinary next year" on the next-year scale.
    pub fn parse(&self, label: &str) -> Result<TrackRecommendation, MarkwiseError> {
        let normalized = label.trim().to_lowercase().replace(['_', ' '], "-");
        let found = match (self, normalized.as_str()) {
            (TrackScale::DropLevel, "no") => Some(TrackRecommendation::StayHigher),
            (TrackScale::DropLevel, "ordinary") => Some(TrackRecommendation::DropToOrdinary),
            (TrackScale::DropLevel, "foundation") => Some(TrackRecommendation::DropToFoundation),
            (TrackScale::NextYearLevel, "ordinary") => Some(TrackRecommendation::Ordinary),
            (TrackScale::NextYearLevel, "higher-borderline") => {
                Some(TrackRecommendation::HigherBorderline)
            }
            (TrackScale::NextYearLevel, "higher-confident") => {
                Some(TrackRecommendation::HigherConfident)
            }
            _ => None,
        };
        found.ok_or_else(|| MarkwiseError::UnknownLabel {
            kind: "track recommendation",
            label: label.to_string(),
        })
    }
}

impl fmt::Display for TrackScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackScale::DropLevel => write!(f, "drop-level"),
            TrackScale::NextYearLevel => write!(f, "next-year-level"),
        }
    }
}

/// A suggested level change attached to a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackRecommendation {
    StayHigher,
    DropToOrdinary,
    DropToFoundation,
    Ordinary,
    HigherBorderline,
    HigherConfident,
}

impl TrackRecommendation {
    /// The scale this recommendation belongs to.
    pub fn scale(&self) -> TrackScale {
        match self {
            TrackRecommendation::StayHigher
            | TrackRecommendation::DropToOrdinary
            | TrackRecommendation::DropToFoundation => TrackScale::DropLevel,
            TrackRecommendation::Ordinary
            | TrackRecommendation::HigherBorderline
            | TrackRecommendation::HigherConfident => TrackScale::NextYearLevel,
        }
    }
}

impl fmt::Display for TrackRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackRecommendation::StayHigher => write!(f, "No"),
            TrackRecommendation::DropToOrdinary | TrackRecommendation::Ordinary => {
                write!(f, "Ordinary")
            }
            TrackRecommendation::DropToFoundation => write!(f, "Foundation"),
            TrackRecommendation::HigherBorderline => write!(f, "Higher-borderline"),
            TrackRecommendation::HigherConfident => write!(f, "Higher-confident"),
        }
    }
}

/// Transient per-student annotations chosen when writing reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub judgement: Option<Judgement>,
    #[serde(default)]
    pub track: Option<TrackRecommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judgement_display_and_parse() {
        for band in Judgement::ALL {
            assert_eq!(band.to_string().parse::<Judgement>().unwrap(), band);
        }
        assert_eq!("very_good".parse::<Judgement>().unwrap(), Judgement::VeryGood);
        assert_eq!("ok".parse::<Judgement>().unwrap(), Judgement::Ok);
        assert!("brilliant".parse::<Judgement>().is_err());
    }

    #[test]
    fn ordinary_depends_on_scale() {
        assert_eq!(
            TrackScale::DropLevel.parse("Ordinary").unwrap(),
            TrackRecommendation::DropToOrdinary
        );
        assert_eq!(
            TrackScale::NextYearLevel.parse("Ordinary").unwrap(),
            TrackRecommendation::Ordinary
        );
        assert!(TrackScale::NextYearLevel.parse("Foundation").is_err());
        assert_eq!(
            TrackScale::NextYearLevel.parse("higher confident").unwrap(),
            TrackRecommendation::HigherConfident
        );
    }

    #[test]
    fn options_belong_to_their_scale() {
        for scale in [TrackScale::DropLevel, TrackScale::NextYearLevel] {
            for rec in scale.options() {
                assert_eq!(rec.scale(), scale);
                assert_eq!(scale.parse(&rec.to_string()).unwrap(), *rec);
            }
        }
    }

    #[test]
    fn judgement_serde_uses_labels() {
        let json = serde_json::to_string(&Judgement::VeryGood).unwrap();
        assert_eq!(json, "\"Very good\"");
        let back: Judgement = serde_json::from_str("\"OK\"").unwrap();
        assert_eq!(back, Judgement::Ok);
    }
}
