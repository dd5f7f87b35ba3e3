use std::collections::HashSet;

use tracing::warn;

use super::catalog::Catalog;
use super::config::VerticalConfig;
use super::range::ScoreRange;

const WEIGHT_EPSILON: f64 = 1e-6;

/// Validate one vertical at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_vertical(config: &VerticalConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.id.trim().is_empty() {
        errors.push("id: must not be empty".to_string());
    }

    if config.criteria.is_empty() {
        errors.push("criteria: at least one criterion is required".to_string());
    }

    let mut seen = HashSet::new();
    for (i, criterion) in config.criteria.iter().enumerate() {
        if !seen.insert(criterion.key.as_str()) {
            errors.push(format!(
                "criteria[{}].key: duplicate criterion '{}'",
                i, criterion.key
            ));
        }
        if criterion.max_score == 0 {
            errors.push(format!("criteria[{}].max_score: must be positive", i));
        }
        if !criterion.weight.is_finite() || criterion.weight < 0.0 {
            errors.push(format!(
                "criteria[{}].weight: must be a non-negative number (got {})",
                i, criterion.weight
            ));
        }
        if let Some(ref economic) = criterion.economic {
            if !economic.base.is_finite() || economic.base <= 0.0 {
                errors.push(format!(
                    "criteria[{}].economic.base: must be positive (got {})",
                    i, economic.base
                ));
            }
        }

        match criterion.actions {
            Some(ref actions) => {
                let tiers = [
                    ("low", &actions.low),
                    ("medium", &actions.medium),
                    ("high", &actions.high),
                ];
                for (tier, action) in tiers {
                    if action.is_none() {
                        warn!(vertical = %config.id, criterion = %criterion.key, tier, "no suggested action for tier");
                    }
                }
            }
            None => {
                warn!(vertical = %config.id, criterion = %criterion.key, "no suggested actions configured");
            }
        }
    }

    if !config.criteria.is_empty() {
        let sum = config.weight_sum();
        if (sum - 1.0).abs() > WEIGHT_EPSILON {
            errors.push(format!("criteria: weights must sum to 1.0 (got {})", sum));
        }
    }

    let mut ranges = Vec::new();
    for (i, band) in config.classification.iter().enumerate() {
        match ScoreRange::parse(&band.range) {
            Ok(range) => ranges.push(range),
            Err(e) => errors.push(format!(
                "classification[{}].range: invalid '{}' - {}",
                i, band.range, e
            )),
        }
        if band.profile.label.trim().is_empty() {
            errors.push(format!("classification[{}].profile.label: must not be empty", i));
        }
    }

    let uncovered: Vec<String> = (0..=10)
        .filter(|score| !ranges.iter().any(|range| range.matches(*score)))
        .map(|score| score.to_string())
        .collect();
    if !uncovered.is_empty() {
        errors.push(format!(
            "classification: no band covers score(s) {}",
            uncovered.join(", ")
        ));
    }

    if config.loading_messages.iter().any(|m| m.trim().is_empty()) {
        errors.push("loading_messages: messages must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate every vertical in a catalog, prefixing errors with the vertical id.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), Vec<String>> {
    let errors: Vec<String> = catalog
        .iter()
        .filter_map(|config| validate_vertical(config).err().map(|errs| (config, errs)))
        .flat_map(|(config, errs)| {
            errs.into_iter()
                .map(move |e| format!("verticals.{}.{}", config.id, e))
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_verticals_are_valid() {
        assert!(validate_vertical(&VerticalConfig::empleabilidad()).is_ok());
        assert!(validate_vertical(&VerticalConfig::emprendimiento()).is_ok());
        assert!(validate_catalog(&Catalog::builtin()).is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut config = VerticalConfig::empleabilidad();
        config.criteria[0].weight = 0.5;
        let errors = validate_vertical(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("weights must sum to 1.0"));
    }

    #[test]
    fn test_zero_max_score() {
        let mut config = VerticalConfig::empleabilidad();
        config.criteria[1].max_score = 0;
        let errors = validate_vertical(&config).unwrap_err();
        assert!(errors[0].contains("criteria[1].max_score"));
    }

    #[test]
    fn test_duplicate_criterion() {
        let mut config = VerticalConfig::empleabilidad();
        config.criteria[2].key = "linkedin".to_string();
        let errors = validate_vertical(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("duplicate criterion 'linkedin'")));
    }

    #[test]
    fn test_uncovered_scores_reported() {
        let mut config = VerticalConfig::emprendimiento();
        config.classification.retain(|band| band.range != "8-9");
        let errors = validate_vertical(&config).unwrap_err();
        assert_eq!(errors, vec!["classification: no band covers score(s) 8, 9".to_string()]);
    }

    #[test]
    fn test_invalid_band_range() {
        let mut config = VerticalConfig::emprendimiento();
        config.classification[0].range = "zero".to_string();
        let errors = validate_vertical(&config).unwrap_err();
        assert!(errors[0].contains("classification[0].range: invalid 'zero'"));
        // the band's scores are no longer covered either
        assert!(errors.iter().any(|e| e.contains("0, 1")));
    }

    #[test]
    fn test_non_positive_economic_base() {
        let mut config = VerticalConfig::emprendimiento();
        if let Some(ref mut economic) = config.criteria[3].economic {
            economic.base = 0.0;
        }
        let errors = validate_vertical(&config).unwrap_err();
        assert!(errors[0].contains("criteria[3].economic.base"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = VerticalConfig::empleabilidad();
        config.criteria[0].max_score = 0; // Error 1
        config.criteria[1].weight = -0.3; // Error 2, and the sum is off (Error 3)
        config.classification.clear(); // Error 4
        let errors = validate_vertical(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_catalog_errors_are_prefixed() {
        let mut broken = VerticalConfig::empleabilidad();
        broken.criteria.clear();
        let catalog = Catalog::builtin().with_overrides(vec![broken]);
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .all(|e| e.starts_with("verticals.empleabilidad.")));
    }
}
