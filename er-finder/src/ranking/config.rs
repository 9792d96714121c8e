//! Ranking configuration.

use crate::hospital::{DepartmentRules, FieldCandidates, NormalizeOptions};

/// Default name for facilities published without one.
const DEFAULT_UNNAMED_LABEL: &str = "이름 없음";

/// Configuration for the ranking pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    /// Candidate coordinate field names, in priority order.
    pub candidates: FieldCandidates,

    /// Classification → departments vocabulary.
    pub departments: DepartmentRules,

    /// Name used when a facility has none.
    pub unnamed_label: String,
}

impl RankingConfig {
    /// Replace the department vocabulary.
    pub fn with_departments(mut self, departments: DepartmentRules) -> Self {
        self.departments = departments;
        self
    }

    /// Replace the coordinate candidates.
    pub fn with_candidates(mut self, candidates: FieldCandidates) -> Self {
        self.candidates = candidates;
        self
    }

    /// Set the placeholder name.
    pub fn with_unnamed_label(mut self, label: impl Into<String>) -> Self {
        self.unnamed_label = label.into();
        self
    }

    pub(crate) fn normalize_options(&self) -> NormalizeOptions<'_> {
        NormalizeOptions {
            candidates: &self.candidates,
            unnamed_label: &self.unnamed_label,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            candidates: FieldCandidates::default(),
            departments: DepartmentRules::default(),
            unnamed_label: DEFAULT_UNNAMED_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RankingConfig::default();

        assert_eq!(config.candidates.latitude[0], "wgs84Lat");
        assert_eq!(config.candidates.longitude[0], "wgs84Lon");
        assert_eq!(config.departments.default_label, "내과");
        assert_eq!(config.unnamed_label, "이름 없음");
    }

    #[test]
    fn custom_config() {
        let rules = DepartmentRules {
            rules: Vec::new(),
            default_label: "General".to_string(),
        };
        let config = RankingConfig::default()
            .with_departments(rules.clone())
            .with_unnamed_label("Unnamed");

        assert_eq!(config.departments, rules);
        assert_eq!(config.unnamed_label, "Unnamed");
        assert_eq!(config.normalize_options().unnamed_label, "Unnamed");
    }
}
