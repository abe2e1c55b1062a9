//! Role model.
//!
//! A role is a leveled skill requirement inside a project. Its requirement
//! is fixed at load time; only its assignment slot is filled in later.

use serde::{Deserialize, Serialize};

use super::{ContributorId, Skill};

/// A skill requirement within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Required skill name.
    pub name: String,
    /// Minimum level required.
    pub level: u32,
    /// Assignment slot. `None` until the role is filled.
    pub assignment: Option<RoleAssignment>,
}

/// Who fills a role and with which skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// Assigned contributor.
    pub contributor: ContributorId,
    /// The skill used, at its level before progression.
    pub skill: Skill,
    /// Mentor backing this assignment, when the assignee was one level short.
    pub mentor: Option<Mentorship>,
}

/// A mentor engaged for a mentored role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentorship {
    /// The mentoring contributor (assigned to another role of the same project).
    pub mentor: ContributorId,
    /// Mentor's level in the role's skill when the role was filled.
    pub level: u32,
}

impl Role {
    /// Creates an unassigned role.
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            level,
            assignment: None,
        }
    }

    /// Whether the slot is filled.
    pub fn is_assigned(&self) -> bool {
        self.assignment.is_some()
    }

    /// The assigned contributor, if any.
    pub fn assignee(&self) -> Option<ContributorId> {
        self.assignment.as_ref().map(|a| a.contributor)
    }

    /// Whether the role was filled through mentoring.
    pub fn is_mentored(&self) -> bool {
        self.assignment
            .as_ref()
            .is_some_and(|a| a.mentor.is_some())
    }
}

impl RoleAssignment {
    /// Creates a direct (unmentored) assignment.
    pub fn direct(contributor: ContributorId, skill: Skill) -> Self {
        Self {
            contributor,
            skill,
            mentor: None,
        }
    }

    /// Sets the mentor.
    pub fn with_mentor(mut self, mentor: ContributorId, level: u32) -> Self {
        self.mentor = Some(Mentorship { mentor, level });
        self
    }
}
