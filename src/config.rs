//! Configuration.
//!
//! Load staffing configuration from TOML to change project ordering and
//! scoring policy without code changes. Every section is optional.
//!
//! # Examples
//!
//! ```
//! use u_staffing::config::StaffingConfig;
//! use u_staffing::ordering::RuleKind;
//! use u_staffing::scheduler::FaultPolicy;
//!
//! let config = StaffingConfig::from_toml_str(r#"
//!     [ordering]
//!     rules = ["highest_score", "earliest_deadline"]
//!     tie_break = "by_name"
//!
//!     [scoring]
//!     fault_policy = "schedule"
//! "#).unwrap();
//!
//! assert_eq!(config.ordering.rules, vec![RuleKind::HighestScore, RuleKind::EarliestDeadline]);
//! assert_eq!(config.scoring.fault_policy, FaultPolicy::Schedule);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ordering::{ProjectOrdering, RuleKind, TieBreaker};
use crate::scheduler::{FaultPolicy, Scheduler, Scorer};

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main staffing configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct StaffingConfig {
    /// Initial project ordering.
    #[serde(default)]
    pub ordering: OrderingConfig,

    /// Scoring policy.
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// `[ordering]` section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct OrderingConfig {
    /// Rules applied in sequence. Empty keeps input order.
    #[serde(default = "default_rules")]
    pub rules: Vec<RuleKind>,

    /// Final tie-break.
    #[serde(default)]
    pub tie_break: TieBreaker,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            tie_break: TieBreaker::default(),
        }
    }
}

fn default_rules() -> Vec<RuleKind> {
    vec![RuleKind::HighestScore]
}

/// `[scoring]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct ScoringConfig {
    /// What an inconsistent assignment costs.
    #[serde(default)]
    pub fault_policy: FaultPolicy,
}

impl StaffingConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.ordering.rules;
        if let Some((i, rule)) = rules
            .iter()
            .enumerate()
            .find(|(i, rule)| rules[..*i].contains(*rule))
        {
            return Err(ConfigError::Invalid(format!(
                "ordering rule {rule:?} listed twice (position {})",
                i + 1
            )));
        }
        Ok(())
    }

    /// Sets the ordering rules.
    pub fn with_rules(mut self, rules: Vec<RuleKind>) -> Self {
        self.ordering.rules = rules;
        self
    }

    /// Sets the fault policy.
    pub fn with_fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.scoring.fault_policy = policy;
        self
    }

    /// Builds the configured project ordering.
    pub fn project_ordering(&self) -> ProjectOrdering {
        ProjectOrdering::from_kinds(&self.ordering.rules, self.ordering.tie_break)
    }

    /// Builds the configured scheduler.
    pub fn scheduler(&self) -> Scheduler {
        Scheduler::new().with_ordering(self.project_ordering())
    }

    /// Builds the configured scorer.
    pub fn scorer(&self) -> Scorer {
        Scorer::new().with_policy(self.scoring.fault_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = StaffingConfig::from_toml_str("").unwrap();
        assert_eq!(config, StaffingConfig::default());
        assert_eq!(config.ordering.rules, vec![RuleKind::HighestScore]);
        assert_eq!(config.ordering.tie_break, TieBreaker::InputOrder);
        assert_eq!(config.scoring.fault_policy, FaultPolicy::Project);
    }

    #[test]
    fn test_partial_section() {
        let config = StaffingConfig::from_toml_str("[ordering]\ntie_break = \"by_name\"\n").unwrap();
        assert_eq!(config.ordering.rules, vec![RuleKind::HighestScore]);
        assert_eq!(config.ordering.tie_break, TieBreaker::ByName);
    }

    #[test]
    fn test_input_order() {
        let config = StaffingConfig::from_toml_str("[ordering]\nrules = []\n").unwrap();
        assert!(config.project_ordering().rule_names().is_empty());
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let err = StaffingConfig::from_toml_str("[ordering]\nrules = [\"random\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = StaffingConfig::from_toml_str("[scoring]\npenalty = 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_duplicate_rule_rejected() {
        let err = StaffingConfig::from_toml_str(
            "[ordering]\nrules = [\"highest_score\", \"shortest_duration\", \"highest_score\"]\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("position 3")));
    }

    #[test]
    fn test_builders() {
        let config = StaffingConfig::new()
            .with_rules(vec![RuleKind::ScoreDensity])
            .with_fault_policy(FaultPolicy::Schedule);
        assert_eq!(config.project_ordering().rule_names(), vec!["DENSITY"]);
        assert_eq!(config.scoring.fault_policy, FaultPolicy::Schedule);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staffing.toml");
        std::fs::write(&path, "[scoring]\nfault_policy = \"schedule\"\n").unwrap();

        let config = StaffingConfig::load(&path).unwrap();
        assert_eq!(config.scoring.fault_policy, FaultPolicy::Schedule);
        assert!(matches!(
            StaffingConfig::load(dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
