use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::ScoreResult;

pub const CURRENT_VERSION: u32 = 1;

/// A completed diagnostic as persisted for session recovery.
///
/// The completion time lives here rather than on `ScoreResult` so that
/// scoring stays deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDiagnostic {
    pub version: u32,
    pub completed_at: DateTime<Utc>,
    pub result: ScoreResult,
}

impl SavedDiagnostic {
    pub fn new(result: ScoreResult) -> Self {
        Self::with_timestamp(result, Utc::now())
    }

    pub fn with_timestamp(result: ScoreResult, completed_at: DateTime<Utc>) -> Self {
        Self {
            version: CURRENT_VERSION,
            completed_at,
            result,
        }
    }

    /// Human-friendly age, e.g. "3h ago"
    pub fn format_age(&self, now: DateTime<Utc>) -> String {
        let elapsed = now - self.completed_at;
        let minutes = elapsed.num_minutes();
        let hours = elapsed.num_hours();
        let days = elapsed.num_days();

        if days >= 1 {
            format!("{}d ago", days)
        } else if hours >= 1 {
            format!("{}h ago", hours)
        } else if minutes >= 1 {
            format!("{}m ago", minutes)
        } else {
            "just now".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Answers, VerticalConfig};
    use chrono::Duration;

    fn sample() -> SavedDiagnostic {
        let answers: Answers = [("linkedin", 1), ("cv", 1), ("search", 1)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let result = crate::scoring::score(&VerticalConfig::empleabilidad(), &answers, None).unwrap();
        SavedDiagnostic::new(result)
    }

    #[test]
    fn test_new_uses_current_version() {
        assert_eq!(sample().version, CURRENT_VERSION);
    }

    #[test]
    fn test_format_age() {
        let saved = sample();
        let at = saved.completed_at;
        assert_eq!(saved.format_age(at), "just now");
        assert_eq!(saved.format_age(at + Duration::minutes(5)), "5m ago");
        assert_eq!(saved.format_age(at + Duration::hours(3)), "3h ago");
        assert_eq!(saved.format_age(at + Duration::days(2)), "2d ago");
    }
}
