//! Plan (solution) model.
//!
//! The read-only view of a staffing result: which projects run, in which
//! order, and who fills each role. This is what gets reported, and what a
//! submitted plan is parsed back into.

use serde::{Deserialize, Serialize};

use super::{Project, Roster};

/// Ordered list of staffed projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Entries in execution order.
    pub entries: Vec<PlanEntry>,
}

/// One staffed project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Project name.
    pub project: String,
    /// Contributor names, one per role, in role order.
    pub assignees: Vec<String>,
}

impl PlanEntry {
    /// Creates an entry.
    pub fn new(project: impl Into<String>, assignees: Vec<String>) -> Self {
        Self {
            project: project.into(),
            assignees,
        }
    }
}

impl Plan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the view of assigned projects, in the given order.
    pub fn from_projects(projects: &[Project], roster: &Roster) -> Self {
        let entries = projects
            .iter()
            .map(|p| {
                let assignees = p
                    .assignees()
                    .into_iter()
                    .map(|id| roster.name_of(id).to_string())
                    .collect();
                PlanEntry::new(p.name.clone(), assignees)
            })
            .collect();
        Self { entries }
    }

    /// Adds an entry.
    pub fn add_entry(&mut self, entry: PlanEntry) {
        self.entries.push(entry);
    }

    /// Finds the entry for a project.
    pub fn entry_for(&self, project: &str) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.project == project)
    }

    /// Number of staffed projects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no project is staffed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
