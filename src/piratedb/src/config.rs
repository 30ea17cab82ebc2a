//! Pipeline configuration
//!
//! Everything the engine would otherwise hard-code as deployment policy:
//! which archive paths are scanned for which kinds, how strictly units and
//! powers are classified, and the class-file suffixes that identify schools.

use crate::classify::Kind;
use crate::reference::{EPIC_ABILITY_ADJECTIVE, SCHOOL_SUFFIXES};
use serde::{Deserialize, Serialize};

/// Complete configuration for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub scans: Vec<ScanSpec>,
    pub policy: ClassifyPolicy,
    pub schools: SchoolTable,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scans: vec![
                ScanSpec::new(
                    "ObjectData/**/*.xml",
                    &[
                        Kind::Curve,
                        Kind::Item,
                        Kind::Unit,
                        Kind::Companion,
                        Kind::CompanionTalent,
                        Kind::CompanionPower,
                    ],
                ),
                ScanSpec::new("Talents/*.xml", &[Kind::Talent]),
                ScanSpec::new("Abilities/*.xml", &[Kind::Power]),
            ],
            policy: ClassifyPolicy::default(),
            schools: SchoolTable::default(),
        }
    }
}

/// One glob pattern and the kinds accepted from files matching it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSpec {
    pub pattern: String,
    pub kinds: Vec<Kind>,
}

impl ScanSpec {
    pub fn new(pattern: &str, kinds: &[Kind]) -> Self {
        Self {
            pattern: pattern.to_string(),
            kinds: kinds.to_vec(),
        }
    }
}

/// Classification switches that differ between deployments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClassifyPolicy {
    /// Units must carry a recognized primary attack code
    pub require_attack_code: bool,
    pub power_filter: PowerFilter,
}

/// Which combat abilities count as powers
///
/// An ability is accepted when its category is listed or it carries one of
/// the listed adjectives. With both lists empty, every combat ability is
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerFilter {
    pub categories: Vec<i64>,
    pub adjectives: Vec<String>,
}

impl Default for PowerFilter {
    fn default() -> Self {
        Self {
            categories: vec![3],
            adjectives: vec![EPIC_ABILITY_ADJECTIVE.to_string()],
        }
    }
}

impl PowerFilter {
    /// Filter that accepts every combat ability
    pub fn any() -> Self {
        Self {
            categories: Vec::new(),
            adjectives: Vec::new(),
        }
    }

    pub fn accepts(&self, category: Option<i64>, has_adjective: impl Fn(&str) -> bool) -> bool {
        if self.categories.is_empty() && self.adjectives.is_empty() {
            return true;
        }
        let category_match = category.is_some_and(|c| self.categories.contains(&c));
        category_match || self.adjectives.iter().any(|adj| has_adjective(adj))
    }
}

/// School rule: class files ending in `suffix` belong to `school`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolRule {
    pub suffix: String,
    pub school: String,
}

/// Ordered suffix table mapping class file names to schools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchoolTable {
    pub rules: Vec<SchoolRule>,
}

impl Default for SchoolTable {
    fn default() -> Self {
        Self {
            rules: SCHOOL_SUFFIXES
                .iter()
                .map(|s| SchoolRule {
                    suffix: s.suffix.to_string(),
                    school: s.school.to_string(),
                })
                .collect(),
        }
    }
}

impl SchoolTable {
    /// School of a class file, first matching rule wins
    pub fn school_for(&self, filename: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| filename.ends_with(&r.suffix))
            .map(|r| r.school.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scans() {
        let config = PipelineConfig::default();
        assert_eq!(config.scans.len(), 3);
        assert_eq!(config.scans[1].kinds, vec![Kind::Talent]);
        assert_eq!(config.scans[2].pattern, "Abilities/*.xml");
    }

    #[test]
    fn test_school_table() {
        let schools = SchoolTable::default();
        assert_eq!(
            schools.school_for("ObjectData/Classes/Class_WIZ.xml"),
            Some("Witchdoctor")
        );
        assert_eq!(
            schools.school_for("ObjectData/Classes/Privateer_Cleric.xml"),
            Some("Privateer")
        );
        assert_eq!(schools.school_for("ObjectData/Classes/Other.xml"), None);
    }

    #[test]
    fn test_power_filter() {
        let filter = PowerFilter::default();
        assert!(filter.accepts(Some(3), |_| false));
        assert!(filter.accepts(Some(1), |adj| adj == "ADJ_Epic_Ability"));
        assert!(!filter.accepts(Some(1), |_| false));
        assert!(!filter.accepts(None, |_| false));
        assert!(PowerFilter::any().accepts(None, |_| false));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = PipelineConfig::default();
        let text = serde_json::to_string(&config).unwrap();
        let back: PipelineConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"policy": {"require_attack_code": true}}"#).unwrap();
        assert!(config.policy.require_attack_code);
        assert_eq!(config.policy.power_filter, PowerFilter::default());
        assert_eq!(config.scans.len(), 3);
    }
}
