use thiserror::Error;

/// Errors raised by the scoring engine.
///
/// `MissingAnswer`, `UnknownVertical` and `InvalidRevenue` are caller
/// mistakes. `Configuration` means the static tables are broken and should
/// never surface once a catalog has passed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("missing answer for criterion '{criterion}' in vertical '{vertical}'")]
    MissingAnswer { vertical: String, criterion: String },

    #[error("configuration error in vertical '{vertical}': {detail}")]
    Configuration { vertical: String, detail: String },

    #[error("unknown vertical '{0}'")]
    UnknownVertical(String),

    #[error("monthly revenue must be a finite, non-negative number (got {0})")]
    InvalidRevenue(f64),
}

impl ScoringError {
    /// True when the error points at broken configuration rather than input.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ScoringError::Configuration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_answer_message() {
        let err = ScoringError::MissingAnswer {
            vertical: "empleabilidad".to_string(),
            criterion: "cv".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "missing answer for criterion 'cv' in vertical 'empleabilidad'"
        );
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_configuration_flag() {
        let err = ScoringError::Configuration {
            vertical: "emprendimiento".to_string(),
            detail: "no profile for score 7".to_string(),
        };
        assert!(err.is_configuration());
        assert!(err.to_string().contains("no profile for score 7"));
    }
}
