//! Express digital diagnostic.
//!
//! Scores questionnaire answers against a vertical's weighted criteria,
//! classifies the result, points at the weakest criterion and, for verticals
//! with an economic model, estimates what the gaps cost per year.

pub mod config;
pub mod history;
pub mod output;
pub mod progress;
pub mod questionnaire;
pub mod scoring;
pub mod telemetry;
