use anyhow::{bail, Result};

/// Range expression over an integer score.
///
/// Accepted forms: `"<N"`, `"<=N"`, `">N"`, `">=N"`, `"N-M"` (inclusive) and
/// a bare `"N"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreRange {
    LessThan(u32),
    LessEqual(u32),
    GreaterThan(u32),
    GreaterEqual(u32),
    Equal(u32),
    Between(u32, u32),
}

impl ScoreRange {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            bail!("empty range");
        }
        if let Some(val) = s.strip_prefix(">=") {
            Ok(ScoreRange::GreaterEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(ScoreRange::LessEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('>') {
            Ok(ScoreRange::GreaterThan(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('<') {
            Ok(ScoreRange::LessThan(val.trim().parse()?))
        } else if let Some((low, high)) = s.split_once('-') {
            let low: u32 = low.trim().parse()?;
            let high: u32 = high.trim().parse()?;
            if low > high {
                bail!("range start {} is greater than end {}", low, high);
            }
            Ok(ScoreRange::Between(low, high))
        } else {
            Ok(ScoreRange::Equal(s.parse()?))
        }
    }

    pub fn matches(&self, value: u32) -> bool {
        match *self {
            ScoreRange::LessThan(n) => value < n,
            ScoreRange::LessEqual(n) => value <= n,
            ScoreRange::GreaterThan(n) => value > n,
            ScoreRange::GreaterEqual(n) => value >= n,
            ScoreRange::Equal(n) => value == n,
            ScoreRange::Between(low, high) => value >= low && value <= high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_less_than() {
        let range = ScoreRange::parse("<3").unwrap();
        assert!(range.matches(2));
        assert!(!range.matches(3));
    }

    #[test]
    fn test_parse_less_equal() {
        let range = ScoreRange::parse("<=3").unwrap();
        assert!(range.matches(3));
        assert!(!range.matches(4));
    }

    #[test]
    fn test_parse_greater_than() {
        let range = ScoreRange::parse(">9").unwrap();
        assert!(!range.matches(9));
        assert!(range.matches(10));
    }

    #[test]
    fn test_parse_greater_equal() {
        let range = ScoreRange::parse(">= 8").unwrap();
        assert!(!range.matches(7));
        assert!(range.matches(8));
    }

    #[test]
    fn test_parse_equal() {
        let range = ScoreRange::parse("10").unwrap();
        assert!(range.matches(10));
        assert!(!range.matches(9));
    }

    #[test]
    fn test_parse_between() {
        let range = ScoreRange::parse("0-2").unwrap();
        assert!(range.matches(0));
        assert!(range.matches(2));
        assert!(!range.matches(3));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(ScoreRange::parse("").is_err());
        assert!(ScoreRange::parse("abc").is_err());
        assert!(ScoreRange::parse("5-2").is_err());
        assert!(ScoreRange::parse("-3").is_err());
    }
}
