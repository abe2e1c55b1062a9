//! Fixpoint pass scheduler.
//!
//! # Algorithm
//!
//! 1. Order projects with a [`ProjectOrdering`] (highest score first by
//!    default). This is the Remaining list.
//! 2. One pass walks Remaining in order. Every project that can be staffed
//!    right now is assigned, appended to Assigned and removed from
//!    Remaining.
//! 3. Passes repeat from the start of Remaining until it is empty or a
//!    pass assigns nothing. Projects still remaining at that point are
//!    dropped.
//!
//! Skill progression from a project assigned earlier in a pass is visible
//! to every project evaluated after it, in that pass and later ones. A
//! project rejected earlier in the pass is only reconsidered on the next
//! pass.
//!
//! # Complexity
//! O(p² * r * c) worst case, where p = projects, r = roles/project,
//! c = contributors.

use tracing::{debug, info, trace};

use crate::assigner::{assign, Unsatisfiable};
use crate::models::{Plan, Problem, Project, Roster};
use crate::ordering::ProjectOrdering;

/// Result of a scheduling run.
#[derive(Debug, Clone, Default)]
pub struct ScheduleOutcome {
    /// Staffed projects, in assignment order.
    pub assigned: Vec<Project>,
    /// Projects never staffed, in their final Remaining order.
    pub dropped: Vec<Project>,
    /// Number of passes run.
    pub passes: usize,
}

impl ScheduleOutcome {
    /// Number of staffed projects.
    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }

    /// Number of dropped projects.
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    /// Read-only report view of the staffed projects.
    pub fn plan(&self, roster: &Roster) -> Plan {
        Plan::from_projects(&self.assigned, roster)
    }
}

/// Greedy multi-pass project scheduler.
///
/// Not optimal, but deterministic: identical inputs give identical
/// assignment order and final skill levels.
///
/// # Example
///
/// ```
/// use u_staffing::models::{Contributor, Project, Roster};
/// use u_staffing::scheduler::Scheduler;
///
/// let mut roster = Roster::new(vec![Contributor::new("Anna").with_skill("backend", 3)]);
/// let projects = vec![Project::new("Api", 5, 10, 5).with_role("backend", 3)];
///
/// let outcome = Scheduler::new().schedule(&mut roster, projects);
/// assert_eq!(outcome.assigned_count(), 1);
/// assert_eq!(roster.contributors()[0].skill_level("backend"), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    ordering: ProjectOrdering,
}

impl Scheduler {
    /// Creates a scheduler ordering projects by score, descending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial project ordering.
    pub fn with_ordering(mut self, ordering: ProjectOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Staffs as many projects as possible from `roster`.
    ///
    /// Contributor skills in `roster` are raised in place as projects are
    /// assigned.
    pub fn schedule(&self, roster: &mut Roster, projects: Vec<Project>) -> ScheduleOutcome {
        let total = projects.len();
        let mut remaining = self.ordering.sort(projects);
        let mut assigned: Vec<Project> = Vec::with_capacity(total);
        let mut passes = 0;

        info!(
            event = "schedule_start",
            projects = total,
            contributors = roster.len(),
            ordering = ?self.ordering.rule_names(),
        );

        while !remaining.is_empty() {
            passes += 1;
            let before = assigned.len();
            let mut rejected: Vec<Project> = Vec::with_capacity(remaining.len());

            for mut project in remaining.drain(..) {
                match assign(&mut project, roster) {
                    Ok(_) => assigned.push(project),
                    Err(Unsatisfiable {
                        role, role_index, ..
                    }) => {
                        trace!(
                            event = "project_rejected",
                            pass = passes,
                            project = %project.name,
                            role = %role,
                            role_index = role_index,
                        );
                        rejected.push(project);
                    }
                }
            }
            remaining = rejected;

            let progress = assigned.len() - before;
            debug!(
                event = "pass_end",
                pass = passes,
                assigned = progress,
                remaining = remaining.len(),
            );

            if progress == 0 {
                break;
            }
        }

        info!(
            event = "schedule_end",
            passes = passes,
            assigned = assigned.len(),
            dropped = remaining.len(),
        );

        ScheduleOutcome {
            assigned,
            dropped: remaining,
            passes,
        }
    }

    /// Schedules a loaded problem, consuming its projects.
    pub fn schedule_problem(&self, problem: &mut Problem) -> ScheduleOutcome {
        let projects = std::mem::take(&mut problem.projects);
        self.schedule(&mut problem.roster, projects)
    }
}
