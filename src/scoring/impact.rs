use serde::{Deserialize, Serialize};

use super::config::Criterion;

/// Revenue assumed when the caller does not provide one.
pub const DEFAULT_MONTHLY_REVENUE: f64 = 5000.0;

/// Estimated money left on the table because of digital gaps.
///
/// Amounts are whole euros. Formatting as currency is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicImpact {
    pub monthly_revenue: f64,
    pub revenue_factor: f64,
    pub total_monthly: i64,
    pub total_annual: i64,
    /// One line per criterion with a multiplier, in declared order
    pub breakdown: Vec<ImpactLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactLine {
    pub criterion: String,
    /// Human-readable criterion label, e.g. "Tu presencia digital"
    pub label: String,
    pub gap: u32,
    pub monthly_loss: i64,
    pub annual_loss: i64,
    pub message: String,
}

/// Damped revenue scaling: `log10(revenue + 1) / 4`.
pub fn revenue_factor(monthly_revenue: f64) -> f64 {
    (monthly_revenue + 1.0).log10() / 4.0
}

/// Estimate the economic impact for already clamped answer values.
///
/// Criteria without an economic multiplier are skipped. Per-criterion losses
/// are rounded first and the monthly total is derived from the annual sum,
/// so totals match what the per-line figures add up to.
pub fn estimate_impact<'a, I>(entries: I, monthly_revenue: f64) -> EconomicImpact
where
    I: IntoIterator<Item = (&'a Criterion, u32)>,
{
    let factor = revenue_factor(monthly_revenue);
    let mut breakdown = Vec::new();
    let mut total_annual: i64 = 0;

    for (criterion, value) in entries {
        let Some(ref multiplier) = criterion.economic else {
            continue;
        };
        let gap = criterion.max_score.saturating_sub(value);
        let cost = gap as f64 * multiplier.base * factor;
        let annual_loss = (cost * 12.0).round() as i64;

        breakdown.push(ImpactLine {
            criterion: criterion.key.clone(),
            label: criterion.label.clone(),
            gap,
            monthly_loss: cost.round() as i64,
            annual_loss,
            message: multiplier.message.clone(),
        });
        total_annual += annual_loss;
    }

    EconomicImpact {
        monthly_revenue,
        revenue_factor: factor,
        total_monthly: (total_annual as f64 / 12.0).round() as i64,
        total_annual,
        breakdown,
    }
}
