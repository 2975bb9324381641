//! markwise-core: exam schemes, topic ranking, report text and class analytics.
//!
//! This crate holds every algorithm markwise runs: mapping raw scores to
//! percentages, merging synonymous topics, ranking each student's weakest
//! topics, composing report bodies and aggregating the class.

pub mod analytics;
pub mod analyzer;
pub mod compose;
pub mod config;
pub mod error;
pub mod merge;
pub mod model;
pub mod parser;
pub mod roster;
pub mod scheme;

pub use error::{MarkwiseError, Result};
