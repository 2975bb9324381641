//! Topic merging: synonymous raw topic labels collapse to one canonical label.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{MarkwiseError, Result};

/// Canonical label of the built-in area group.
pub const AREA_CANONICAL: &str = "Area, perimeter and volume";

/// A set of raw labels that report as one canonical topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeGroup {
    /// Label used for ranking and reporting.
    pub canonical: String,
    /// Raw labels that merge into `canonical`.
    pub topics: Vec<String>,
}

impl MergeGroup {
    pub fn new<I, S>(canonical: impl Into<String>, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            canonical: canonical.into(),
            topics: topics.into_iter().map(Into::into).collect(),
        }
    }

    /// The area/perimeter/volume group shared by the built-in schemes.
    pub fn area() -> Self {
        Self::new(AREA_CANONICAL, ["Area and Volume", "Area and perimeter"])
    }
}

/// Maps raw topic labels to canonical labels.
#[derive(Debug, Clone, Default)]
pub struct TopicMerger {
    canonical_of: HashMap<String, String>,
    groups: Vec<MergeGroup>,
}

impl TopicMerger {
    /// Build a merger from disjoint groups.
    ///
    /// Fails with [`MarkwiseError::AmbiguousMerge`] if a raw label (or a
    /// group's canonical label) would map to two different canonical labels.
    pub fn new(groups: Vec<MergeGroup>) -> Result<Self> {
        let mut canonical_of: HashMap<String, String> = HashMap::new();

        for group in &groups {
            let members = group
                .topics
                .iter()
                .chain(std::iter::once(&group.canonical));
            for raw in members {
                match canonical_of.get(raw) {
                    Some(existing) if existing != &group.canonical => {
                        return Err(MarkwiseError::AmbiguousMerge {
                            topic: raw.clone(),
                            first: existing.clone(),
                            second: group.canonical.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        canonical_of.insert(raw.clone(), group.canonical.clone());
                    }
                }
            }
        }

        tracing::debug!(groups = groups.len(), "topic merger configured");
        Ok(Self {
            canonical_of,
            groups,
        })
    }

    /// A merger that leaves every topic unchanged.
    pub fn identity() -> Self {
        Self::default()
    }

    /// The merger with the built-in area group.
    pub fn standard() -> Self {
        let group = MergeGroup::area();
        let canonical_of = group
            .topics
            .iter()
            .chain(std::iter::once(&group.canonical))
            .map(|raw| (raw.clone(), group.canonical.clone()))
            .collect();
        Self {
            canonical_of,
            groups: vec![group],
        }
    }

    /// Canonical label for `raw`, or `raw` itself when it belongs to no group.
    pub fn merge<'a>(&'a self, raw: &'a str) -> &'a str {
        self.canonical_of.get(raw).map(String::as_str).unwrap_or(raw)
    }

    pub fn groups(&self) -> &[MergeGroup] {
        &self.groups
    }
}
