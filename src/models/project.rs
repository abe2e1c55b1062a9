//! Project model.
//!
//! A project is a unit of work with a duration, a reward, a deadline and an
//! ordered list of roles. Role order is significant: it is the matching
//! order and decides which roles can be mentored by whom.
//!
//! # Time Representation
//! Durations and deadlines are abstract work units (days) relative to t=0.

use serde::{Deserialize, Serialize};

use super::{ContributorId, Role};

/// A project competing for contributors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project name.
    pub name: String,
    /// Work units needed when run without contention (> 0).
    pub duration: i64,
    /// Reward when finished by the deadline (>= 0).
    pub score: i64,
    /// Deadline. Each unit late costs one point of score.
    pub best_before: i64,
    /// Roles in matching order.
    pub roles: Vec<Role>,
}

impl Project {
    /// Creates a project with no roles.
    pub fn new(name: impl Into<String>, duration: i64, score: i64, best_before: i64) -> Self {
        Self {
            name: name.into(),
            duration,
            score,
            best_before,
            roles: Vec::new(),
        }
    }

    /// Adds a role.
    pub fn with_role(mut self, name: impl Into<String>, level: u32) -> Self {
        self.roles.push(Role::new(name, level));
        self
    }

    /// Number of roles.
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// Whether every role has an assignee.
    pub fn is_fully_assigned(&self) -> bool {
        self.roles.iter().all(Role::is_assigned)
    }

    /// Assignees in role order. Unassigned roles are skipped.
    pub fn assignees(&self) -> Vec<ContributorId> {
        self.roles.iter().filter_map(Role::assignee).collect()
    }

    /// Score earned when finishing at `finish`.
    ///
    /// Full score up to the deadline, then one point less per unit late,
    /// never below zero.
    pub fn score_at(&self, finish: i64) -> i64 {
        if finish <= self.best_before {
            self.score
        } else {
            self.score
                .saturating_sub(finish.saturating_sub(self.best_before))
                .max(0)
        }
    }
}
