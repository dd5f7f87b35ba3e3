use super::config::VerticalConfig;
use super::engine::{score, Answers, ScoreResult};
use super::error::ScoringError;

/// The set of verticals a diagnostic can be run against.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    verticals: Vec<VerticalConfig>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// `empleabilidad` and `emprendimiento`.
    pub fn builtin() -> Self {
        Self {
            verticals: vec![
                VerticalConfig::empleabilidad(),
                VerticalConfig::emprendimiento(),
            ],
        }
    }

    /// Replace verticals that share an id and append the rest.
    pub fn with_overrides(mut self, overrides: Vec<VerticalConfig>) -> Self {
        for config in overrides {
            match self.verticals.iter_mut().find(|v| v.id == config.id) {
                Some(existing) => *existing = config,
                None => self.verticals.push(config),
            }
        }
        self
    }

    pub fn get(&self, id: &str) -> Result<&VerticalConfig, ScoringError> {
        self.verticals
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| ScoringError::UnknownVertical(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &VerticalConfig> {
        self.verticals.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.verticals.iter().map(|v| v.id.as_str()).collect()
    }

    /// Look up a vertical by id and score the answers against it.
    pub fn score(
        &self,
        vertical: &str,
        answers: &Answers,
        monthly_revenue: Option<f64>,
    ) -> Result<ScoreResult, ScoringError> {
        score(self.get(vertical)?, answers, monthly_revenue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids() {
        assert_eq!(Catalog::builtin().ids(), ["empleabilidad", "emprendimiento"]);
    }

    #[test]
    fn test_unknown_vertical() {
        let err = Catalog::builtin().get("turismo").unwrap_err();
        assert_eq!(err, ScoringError::UnknownVertical("turismo".to_string()));
    }

    #[test]
    fn test_override_replaces_in_place() {
        let mut custom = VerticalConfig::empleabilidad();
        custom.name = Some("Empleo".to_string());
        let catalog = Catalog::builtin().with_overrides(vec![custom]);
        assert_eq!(catalog.ids(), ["empleabilidad", "emprendimiento"]);
        assert_eq!(
            catalog.get("empleabilidad").unwrap().display_name(),
            "Empleo"
        );
    }

    #[test]
    fn test_new_vertical_is_appended() {
        let mut extra = VerticalConfig::emprendimiento();
        extra.id = "comercio".to_string();
        let catalog = Catalog::builtin().with_overrides(vec![extra]);
        assert_eq!(catalog.ids(), ["empleabilidad", "emprendimiento", "comercio"]);
    }

    #[test]
    fn test_score_by_id() {
        let answers: Answers = [("linkedin", 2), ("cv", 1), ("search", 2)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let result = Catalog::builtin()
            .score("empleabilidad", &answers, None)
            .unwrap();
        assert_eq!(result.score, 6);
        assert_eq!(result.vertical, "empleabilidad");
    }
}
