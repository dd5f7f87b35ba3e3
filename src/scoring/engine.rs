use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::config::{Criterion, Profile, VerticalConfig};
use super::error::ScoringError;
use super::impact::{estimate_impact, EconomicImpact, DEFAULT_MONTHLY_REVENUE};

/// Raw questionnaire answers, keyed by criterion.
pub type Answers = HashMap<String, u32>;

/// Shown when the primary gap has no action for the tier.
pub const FALLBACK_ACTION: &str = "Completa tu diagnóstico para recomendaciones";

/// Score bucket used to pick a suggested action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    /// `low` up to 3, `medium` up to 6, `high` above.
    pub fn from_score(score: u32) -> Self {
        if score <= 3 {
            Tier::Low
        } else if score <= 6 {
            Tier::Medium
        } else {
            Tier::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub vertical: String,
    /// Integer score from 0 to 10
    pub score: u32,
    pub tier: Tier,
    pub profile: Profile,
    /// Criterion with the lowest answer relative to its maximum
    pub primary_gap: String,
    pub primary_gap_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_note: Option<String>,
    pub suggested_action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economic_impact: Option<EconomicImpact>,
}

struct CriterionScore<'a> {
    criterion: &'a Criterion,
    value: u32,
    ratio: f64,
}

/// Score a complete answer set against a vertical.
///
/// `monthly_revenue` only matters for verticals with an economic model and
/// defaults to 5000 there. Answers above a criterion's maximum are clamped.
pub fn score(
    config: &VerticalConfig,
    answers: &Answers,
    monthly_revenue: Option<f64>,
) -> Result<ScoreResult, ScoringError> {
    let scored = normalize(config, answers)?;

    let total: f64 = scored.iter().map(|s| s.ratio * s.criterion.weight).sum();
    let score = (total * 10.0).round().max(0.0) as u32;

    let profile = config
        .profile_for(score)
        .cloned()
        .ok_or_else(|| ScoringError::Configuration {
            vertical: config.id.clone(),
            detail: format!("no classification band covers score {}", score),
        })?;

    let gap = primary_gap(&scored).ok_or_else(|| ScoringError::Configuration {
        vertical: config.id.clone(),
        detail: "vertical has no criteria".to_string(),
    })?;

    let tier = Tier::from_score(score);
    let suggested_action = suggested_action(gap, tier);

    let economic_impact = if config.has_economic_model() {
        let revenue = monthly_revenue.unwrap_or(DEFAULT_MONTHLY_REVENUE);
        if !revenue.is_finite() || revenue < 0.0 {
            return Err(ScoringError::InvalidRevenue(revenue));
        }
        Some(estimate_impact(
            scored.iter().map(|s| (s.criterion, s.value)),
            revenue,
        ))
    } else {
        None
    };

    debug!(
        vertical = %config.id,
        total,
        score,
        primary_gap = %gap.key,
        tier = tier.as_str(),
        "diagnostic scored"
    );

    Ok(ScoreResult {
        vertical: config.id.clone(),
        score,
        tier,
        profile,
        primary_gap: gap.key.clone(),
        primary_gap_label: gap.label.clone(),
        impact_note: gap.impact_note.clone(),
        suggested_action,
        economic_impact,
    })
}

/// Pair every criterion, in declared order, with its clamped answer and ratio.
fn normalize<'a>(
    config: &'a VerticalConfig,
    answers: &Answers,
) -> Result<Vec<CriterionScore<'a>>, ScoringError> {
    for key in answers.keys() {
        if config.criterion(key).is_none() {
            debug!(vertical = %config.id, answer = %key, "ignoring answer for unknown criterion");
        }
    }

    config
        .criteria
        .iter()
        .map(|criterion| {
            let raw = *answers
                .get(&criterion.key)
                .ok_or_else(|| ScoringError::MissingAnswer {
                    vertical: config.id.clone(),
                    criterion: criterion.key.clone(),
                })?;

            if criterion.max_score == 0 {
                return Err(ScoringError::Configuration {
                    vertical: config.id.clone(),
                    detail: format!("criterion '{}' has a max_score of 0", criterion.key),
                });
            }

            let value = if raw > criterion.max_score {
                warn!(
                    criterion = %criterion.key,
                    raw,
                    max = criterion.max_score,
                    "answer above maximum, clamping"
                );
                criterion.max_score
            } else {
                raw
            };

            Ok(CriterionScore {
                criterion,
                value,
                ratio: value as f64 / criterion.max_score as f64,
            })
        })
        .collect()
}

/// Lowest ratio wins; on a tie the criterion declared first is kept.
fn primary_gap<'a>(scored: &[CriterionScore<'a>]) -> Option<&'a Criterion> {
    let (first, rest) = scored.split_first()?;
    let lowest = rest
        .iter()
        .fold(first, |best, next| if next.ratio < best.ratio { next } else { best });
    Some(lowest.criterion)
}

fn suggested_action(gap: &Criterion, tier: Tier) -> String {
    let action = gap.actions.as_ref().and_then(|actions| match tier {
        Tier::Low => actions.low.as_ref(),
        Tier::Medium => actions.medium.as_ref(),
        Tier::High => actions.high.as_ref(),
    });

    match action {
        Some(action) => action.clone(),
        None => {
            warn!(criterion = %gap.key, tier = tier.as_str(), "no suggested action configured");
            FALLBACK_ACTION.to_string()
        }
    }
}
