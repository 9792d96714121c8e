//! Department labels derived from the emergency classification.
//!
//! The vocabulary is data so it can be replaced per locale, either in code
//! or from a JSON file:
//!
//! ```json
//! {
//!   "rules": [
//!     { "contains_any": ["Regional Emergency Center"], "label": "IM, Surgery, Pediatrics" }
//!   ],
//!   "default_label": "IM"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors loading department rules.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid department rules: {0}")]
    Json(#[from] serde_json::Error),
}

/// One rule: any listed substring in the classification selects `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentRule {
    pub contains_any: Vec<String>,
    pub label: String,
}

/// Ordered rules; the first match wins, otherwise `default_label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentRules {
    pub rules: Vec<DepartmentRule>,
    pub default_label: String,
}

impl Default for DepartmentRules {
    fn default() -> Self {
        Self {
            rules: vec![
                DepartmentRule {
                    contains_any: vec![
                        "지역응급의료센터".to_string(),
                        "권역응급의료센터".to_string(),
                    ],
                    label: "내과, 외과, 소아과".to_string(),
                },
                DepartmentRule {
                    contains_any: vec!["응급실운영신고기관".to_string()],
                    label: "내과, 외과".to_string(),
                },
            ],
            default_label: "내과".to_string(),
        }
    }
}

impl DepartmentRules {
    /// Load rules from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Label for a classification (absent classification gets the default).
    pub fn label_for(&self, classification: Option<&str>) -> &str {
        let Some(class) = classification else {
            return &self.default_label;
        };

        self.rules
            .iter()
            .find(|rule| rule.contains_any.iter().any(|needle| class.contains(needle.as_str())))
            .map_or(self.default_label.as_str(), |rule| rule.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_vocabulary() {
        let rules = DepartmentRules::default();

        assert_eq!(rules.label_for(Some("권역응급의료센터")), "내과, 외과, 소아과");
        assert_eq!(rules.label_for(Some("지역응급의료센터")), "내과, 외과, 소아과");
        assert_eq!(rules.label_for(Some("응급실운영신고기관")), "내과, 외과");
        assert_eq!(rules.label_for(Some("지역응급의료기관")), "내과");
        assert_eq!(rules.label_for(None), "내과");
    }

    #[test]
    fn substring_match() {
        let rules = DepartmentRules::default();
        assert_eq!(
            rules.label_for(Some("(권역응급의료센터) 외상")),
            "내과, 외과, 소아과"
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = DepartmentRules {
            rules: vec![
                DepartmentRule {
                    contains_any: vec!["Center".to_string()],
                    label: "first".to_string(),
                },
                DepartmentRule {
                    contains_any: vec!["Regional Center".to_string()],
                    label: "second".to_string(),
                },
            ],
            default_label: "default".to_string(),
        };
        assert_eq!(rules.label_for(Some("Regional Center")), "first");
        assert_eq!(rules.label_for(Some("Clinic")), "default");
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(
            &path,
            concat!(
                r#"{"rules":[{"contains_any":["Regional"],"label":"IM, Surgery, Pediatrics"}],"#,
                r#""default_label":"IM"}"#,
            ),
        )
        .unwrap();

        let rules = DepartmentRules::from_json_file(&path).unwrap();
        assert_eq!(rules.label_for(Some("Regional Emergency Center")), "IM, Surgery, Pediatrics");
        assert_eq!(rules.label_for(Some("Clinic")), "IM");
    }

    #[test]
    fn load_errors() {
        let dir = tempdir().unwrap();

        let missing = DepartmentRules::from_json_file(dir.path().join("none.json")).unwrap_err();
        assert!(matches!(missing, RulesError::Io { .. }));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{").unwrap();
        let bad = DepartmentRules::from_json_file(&path).unwrap_err();
        assert!(matches!(bad, RulesError::Json(_)));
    }
}
