//! Problem container.

use serde::{Deserialize, Serialize};

use super::{Contributor, Project, Roster};

/// A full snapshot of contributors and projects for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Problem {
    /// Contributors in pool order.
    pub roster: Roster,
    /// Projects in input order.
    pub projects: Vec<Project>,
}

impl Problem {
    /// Creates a problem.
    pub fn new(contributors: Vec<Contributor>, projects: Vec<Project>) -> Self {
        Self {
            roster: Roster::new(contributors),
            projects,
        }
    }

    /// Number of contributors.
    pub fn contributor_count(&self) -> usize {
        self.roster.len()
    }

    /// Number of projects.
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }
}
