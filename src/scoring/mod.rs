pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod impact;
pub mod range;
pub mod validation;

pub use catalog::Catalog;
pub use config::*;
pub use engine::{score, Answers, ScoreResult, Tier, FALLBACK_ACTION};
pub use error::ScoringError;
pub use impact::{estimate_impact, revenue_factor, EconomicImpact, ImpactLine, DEFAULT_MONTHLY_REVENUE};
pub use range::ScoreRange;
pub use validation::{validate_catalog, validate_vertical};
