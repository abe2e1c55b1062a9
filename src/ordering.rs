//! Project ordering rules.
//!
//! Decides the order in which the scheduler first considers projects.
//! Rules are applied sequentially: a later rule only breaks ties left by
//! earlier ones. Remaining ties keep input order (the sort is stable) or
//! fall back to project name.
//!
//! # Score Convention
//! **Lower key = considered earlier.**
//!
//! # Usage
//!
//! ```
//! use u_staffing::ordering::{ProjectOrdering, HighestScore, EarliestDeadline};
//! use u_staffing::models::Project;
//!
//! let projects = vec![
//!     Project::new("A", 5, 10, 20),
//!     Project::new("B", 5, 30, 20),
//! ];
//! let ordering = ProjectOrdering::new()
//!     .with_rule(HighestScore)
//!     .with_rule(EarliestDeadline);
//! assert_eq!(ordering.sort_indices(&projects), vec![1, 0]);
//! ```

use std::cmp::Ordering;
use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::Project;

/// Key returned by an ordering rule. Lower = earlier.
pub type RuleKey = f64;

/// A rule that ranks projects.
pub trait OrderingRule: Send + Sync + Debug {
    /// Short rule name.
    fn name(&self) -> &'static str;

    /// Ranks a project. Lower keys are considered first.
    fn evaluate(&self, project: &Project) -> RuleKey;

    /// Compares two projects. Keys closer than `epsilon` are equal.
    fn compare(&self, a: &Project, b: &Project, epsilon: f64) -> Ordering {
        let (ka, kb) = (self.evaluate(a), self.evaluate(b));
        if (ka - kb).abs() > epsilon {
            ka.partial_cmp(&kb).unwrap_or(Ordering::Equal)
        } else {
            Ordering::Equal
        }
    }
}

/// Highest reward first.
#[derive(Debug, Clone, Copy)]
pub struct HighestScore;

impl OrderingRule for HighestScore {
    fn name(&self) -> &'static str {
        "SCORE"
    }

    fn evaluate(&self, project: &Project) -> RuleKey {
        -(project.score as f64)
    }

    fn compare(&self, a: &Project, b: &Project, _epsilon: f64) -> Ordering {
        b.score.cmp(&a.score)
    }
}

/// Earliest Due Date.
#[derive(Debug, Clone, Copy)]
pub struct EarliestDeadline;

impl OrderingRule for EarliestDeadline {
    fn name(&self) -> &'static str {
        "EDD"
    }

    fn evaluate(&self, project: &Project) -> RuleKey {
        project.best_before as f64
    }

    fn compare(&self, a: &Project, b: &Project, _epsilon: f64) -> Ordering {
        a.best_before.cmp(&b.best_before)
    }
}

/// Shortest Processing Time.
#[derive(Debug, Clone, Copy)]
pub struct ShortestDuration;

impl OrderingRule for ShortestDuration {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, project: &Project) -> RuleKey {
        project.duration as f64
    }

    fn compare(&self, a: &Project, b: &Project, _epsilon: f64) -> Ordering {
        a.duration.cmp(&b.duration)
    }
}

/// Highest score per unit of duration.
#[derive(Debug, Clone, Copy)]
pub struct ScoreDensity;

impl OrderingRule for ScoreDensity {
    fn name(&self) -> &'static str {
        "DENSITY"
    }

    fn evaluate(&self, project: &Project) -> RuleKey {
        if project.duration <= 0 {
            return f64::INFINITY;
        }
        -(project.score as f64 / project.duration as f64)
    }
}

/// Fewest roles first (small teams are easier to staff).
#[derive(Debug, Clone, Copy)]
pub struct FewestRoles;

impl OrderingRule for FewestRoles {
    fn name(&self) -> &'static str {
        "ROLES"
    }

    fn evaluate(&self, project: &Project) -> RuleKey {
        project.roles.len() as f64
    }

    fn compare(&self, a: &Project, b: &Project, _epsilon: f64) -> Ordering {
        a.roles.len().cmp(&b.roles.len())
    }
}

/// Named rule, for configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// [`HighestScore`].
    HighestScore,
    /// [`EarliestDeadline`].
    EarliestDeadline,
    /// [`ShortestDuration`].
    ShortestDuration,
    /// [`ScoreDensity`].
    ScoreDensity,
    /// [`FewestRoles`].
    FewestRoles,
}

impl RuleKind {
    /// Instantiates the rule.
    pub fn rule(self) -> Arc<dyn OrderingRule> {
        match self {
            RuleKind::HighestScore => Arc::new(HighestScore),
            RuleKind::EarliestDeadline => Arc::new(EarliestDeadline),
            RuleKind::ShortestDuration => Arc::new(ShortestDuration),
            RuleKind::ScoreDensity => Arc::new(ScoreDensity),
            RuleKind::FewestRoles => Arc::new(FewestRoles),
        }
    }
}

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreaker {
    /// Keep input order (default).
    #[default]
    InputOrder,
    /// Project name, lexicographic.
    ByName,
}

/// Sequential composition of ordering rules.
#[derive(Clone)]
pub struct ProjectOrdering {
    rules: Vec<Arc<dyn OrderingRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl ProjectOrdering {
    /// Creates an ordering with no rules (input order).
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::InputOrder,
            epsilon: 1e-9,
        }
    }

    /// Highest score first, ties in input order.
    pub fn by_score() -> Self {
        Self::new().with_rule(HighestScore)
    }

    /// Builds an ordering from rule names.
    pub fn from_kinds(kinds: &[RuleKind], tie_breaker: TieBreaker) -> Self {
        Self {
            rules: kinds.iter().map(|k| k.rule()).collect(),
            tie_breaker,
            epsilon: 1e-9,
        }
    }

    /// Appends a rule.
    pub fn with_rule<R: OrderingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Returns project indices in consideration order.
    pub fn sort_indices(&self, projects: &[Project]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..projects.len()).collect();
        // `sort_by` is stable: equal projects keep input order.
        indices.sort_by(|&a, &b| self.compare(&projects[a], &projects[b]));
        indices
    }

    /// Reorders projects in place.
    pub fn sort(&self, projects: Vec<Project>) -> Vec<Project> {
        let order = self.sort_indices(&projects);
        let mut slots: Vec<Option<Project>> = projects.into_iter().map(Some).collect();
        order
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect()
    }

    /// Rule names, in application order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    fn compare(&self, a: &Project, b: &Project) -> Ordering {
        for rule in &self.rules {
            let ord = rule.compare(a, b, self.epsilon);
            if ord != Ordering::Equal {
                return ord;
            }
        }

        match self.tie_breaker {
            TieBreaker::InputOrder => Ordering::Equal,
            TieBreaker::ByName => a.name.cmp(&b.name),
        }
    }
}

impl Default for ProjectOrdering {
    fn default() -> Self {
        Self::by_score()
    }
}

impl Debug for ProjectOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectOrdering")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
