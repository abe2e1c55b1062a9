//! Schedule scoring.
//!
//! Replays staffed projects in assignment order to compute when each one
//! finishes and how much of its reward it earns.
//!
//! # Timing
//!
//! A contributor works on one project at a time. A project starts once the
//! last of its contributors has finished their previous project:
//!
//! ```text
//! start  = max(finish(previous project of c) for c in assignees), or 0
//! finish = start + duration
//! ```
//!
//! # Reward
//!
//! | Finish | Contribution |
//! |--------|--------------|
//! | `<= best_before` | `score` |
//! | `> best_before` | `max(0, score - (finish - best_before))` |
//!
//! # Consistency
//!
//! Before crediting a project, each role is checked against what the
//! assigner recorded: assignees must be at most one level short, and every
//! one-level-short assignee must be backed by a qualified mentor on the
//! same project. A faulty project contributes 0 (or zeroes the total, per
//! [`FaultPolicy`]).

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::matching::{can_mentor, match_level};
use crate::models::{ContributorId, Project, Roster};

/// What an inconsistent assignment costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// The faulty project contributes 0 (default).
    #[default]
    Project,
    /// Any fault zeroes the whole schedule.
    Schedule,
}

/// An inconsistency found in a staffed project.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssignmentFault {
    /// A role has no assignee.
    #[error("role #{role_index} ({role}) is not assigned")]
    Unassigned {
        /// Role index.
        role_index: usize,
        /// Required skill.
        role: String,
    },

    /// An assignee is more than one level below the requirement.
    #[error("role #{role_index} ({role}): {contributor} has level {level}, {required} required")]
    SkillTooLow {
        /// Role index.
        role_index: usize,
        /// Required skill.
        role: String,
        /// Assignee name.
        contributor: String,
        /// Assignee level when assigned.
        level: u32,
        /// Required level.
        required: u32,
    },

    /// A one-level-short assignee has no qualified mentor on the project.
    #[error("role #{role_index} ({role}): no mentor for {contributor} at level {required}")]
    MissingMentor {
        /// Role index.
        role_index: usize,
        /// Required skill.
        role: String,
        /// Mentee name.
        contributor: String,
        /// Required level.
        required: u32,
    },

    /// The same contributor fills two roles of one project.
    #[error("{contributor} fills more than one role")]
    DoubleBooked {
        /// Contributor name.
        contributor: String,
    },
}

/// Scoring details of one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectScore {
    /// Project name.
    pub name: String,
    /// Start time.
    pub start: i64,
    /// Finish time.
    pub finish: i64,
    /// Points earned (0..=score).
    pub contribution: i64,
    /// Consistency fault, if any.
    pub fault: Option<AssignmentFault>,
}

impl ProjectScore {
    /// Units past the deadline (0 if on time).
    pub fn lateness(&self, best_before: i64) -> i64 {
        self.finish.saturating_sub(best_before).max(0)
    }
}

/// Scoring result of a whole schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Total score.
    pub total: i64,
    /// Per-project details, in assignment order.
    pub projects: Vec<ProjectScore>,
    /// Latest finish time.
    pub makespan: i64,
    /// Projects finished by their deadline.
    pub on_time: usize,
    /// Projects finished after their deadline.
    pub late: usize,
    /// Sum of lateness over late projects.
    pub total_lateness: i64,
    /// Projects each contributor worked on, in order.
    pub history: BTreeMap<String, Vec<String>>,
}

impl ScoreReport {
    /// Projects with a consistency fault.
    pub fn faults(&self) -> impl Iterator<Item = &ProjectScore> {
        self.projects.iter().filter(|p| p.fault.is_some())
    }

    /// Whether every project passed the consistency check.
    pub fn is_consistent(&self) -> bool {
        self.faults().next().is_none()
    }

    /// Details for a project.
    pub fn project(&self, name: &str) -> Option<&ProjectScore> {
        self.projects.iter().find(|p| p.name == name)
    }
}

/// Computes finish times and deadline-adjusted scores.
///
/// # Example
///
/// ```
/// use u_staffing::models::{Contributor, Project, Roster};
/// use u_staffing::scheduler::{Scheduler, Scorer};
///
/// let mut roster = Roster::new(vec![Contributor::new("Anna").with_skill("backend", 3)]);
/// let projects = vec![
///     Project::new("First", 4, 10, 20).with_role("backend", 1),
///     Project::new("Second", 6, 5, 20).with_role("backend", 1),
/// ];
/// let outcome = Scheduler::new().schedule(&mut roster, projects);
/// let report = Scorer::new().score(&outcome.assigned, &roster);
///
/// assert_eq!(report.project("Second").unwrap().finish, 10);
/// assert_eq!(report.total, 15);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    policy: FaultPolicy,
}

impl Scorer {
    /// Creates a scorer with [`FaultPolicy::Project`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fault policy.
    pub fn with_policy(mut self, policy: FaultPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Scores staffed projects in assignment order.
    pub fn score(&self, assigned: &[Project], roster: &Roster) -> ScoreReport {
        let mut finish_times: HashMap<&str, i64> = HashMap::new();
        let mut history: HashMap<ContributorId, Vec<&str>> = HashMap::new();
        let mut report = ScoreReport::default();

        for project in assigned {
            let assignees = project.assignees();

            let start = assignees
                .iter()
                .filter_map(|id| history.get(id).and_then(|h| h.last()))
                .filter_map(|prev| finish_times.get(prev).copied())
                .max()
                .unwrap_or(0);
            let finish = start.saturating_add(project.duration);

            let fault = check_assignment(project, roster).err();
            let contribution = match &fault {
                Some(fault) => {
                    warn!(
                        event = "assignment_fault",
                        project = %project.name,
                        fault = %fault,
                    );
                    0
                }
                None => project.score_at(finish),
            };

            finish_times.insert(project.name.as_str(), finish);
            for id in &assignees {
                history.entry(*id).or_default().push(project.name.as_str());
            }

            let scored = ProjectScore {
                name: project.name.clone(),
                start,
                finish,
                contribution,
                fault,
            };
            let lateness = scored.lateness(project.best_before);
            if lateness == 0 {
                report.on_time += 1;
            } else {
                report.late += 1;
                report.total_lateness = report.total_lateness.saturating_add(lateness);
            }
            report.makespan = report.makespan.max(finish);
            report.total = report.total.saturating_add(contribution);
            report.projects.push(scored);
        }

        if self.policy == FaultPolicy::Schedule && !report.is_consistent() {
            report.total = 0;
        }

        report.history = history
            .into_iter()
            .map(|(id, projects)| {
                (
                    roster.name_of(id).to_string(),
                    projects.into_iter().map(str::to_string).collect(),
                )
            })
            .collect();

        info!(
            event = "score_end",
            projects = report.projects.len(),
            total = report.total,
            late = report.late,
            faults = report.faults().count(),
        );

        report
    }
}

/// Checks one staffed project against the matching and mentoring rules.
///
/// Works on the levels recorded at assignment time, not on current skill
/// levels, which may have risen since.
pub fn check_assignment(project: &Project, roster: &Roster) -> Result<(), AssignmentFault> {
    let mut seen: HashSet<ContributorId> = HashSet::new();
    for id in project.assignees() {
        if !seen.insert(id) {
            return Err(AssignmentFault::DoubleBooked {
                contributor: roster.name_of(id).to_string(),
            });
        }
    }

    for (role_index, role) in project.roles.iter().enumerate() {
        let Some(assignment) = &role.assignment else {
            return Err(AssignmentFault::Unassigned {
                role_index,
                role: role.name.clone(),
            });
        };
        let level = assignment.skill.level;
        let contributor = roster.name_of(assignment.contributor).to_string();

        if match_level(level, role.level).is_none() {
            return Err(AssignmentFault::SkillTooLow {
                role_index,
                role: role.name.clone(),
                contributor,
                level,
                required: role.level,
            });
        }

        if level < role.level && !has_mentor(project, role_index) {
            return Err(AssignmentFault::MissingMentor {
                role_index,
                role: role.name.clone(),
                contributor,
                required: role.level,
            });
        }
    }

    Ok(())
}

/// Whether the mentored role at `role_index` is backed by a qualified
/// co-assignee.
///
/// A recorded mentor must be another assignee of the project at or above
/// the required level. Without a recorded mentor, the most skilled other
/// assignee that filled a role with the same skill is used.
fn has_mentor(project: &Project, role_index: usize) -> bool {
    let role = &project.roles[role_index];
    let Some(assignment) = &role.assignment else {
        return false;
    };
    let assignees = project.assignees();

    if let Some(mentorship) = assignment.mentor {
        return mentorship.mentor != assignment.contributor
            && assignees.contains(&mentorship.mentor)
            && can_mentor(mentorship.level, role.level);
    }

    project
        .roles
        .iter()
        .filter_map(|r| r.assignment.as_ref())
        .filter(|a| a.contributor != assignment.contributor && a.skill.name == role.name)
        .map(|a| a.skill.level)
        .max()
        .is_some_and(|best| can_mentor(best, role.level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Contributor, RoleAssignment, Skill};

    fn roster() -> Roster {
        Roster::new(vec![
            Contributor::new("Anna"),
            Contributor::new("Bob"),
            Contributor::new("Carl"),
        ])
    }

    // roles: (skill, required level, assignee index, level used)
    fn staffed(
        name: &str,
        duration: i64,
        score: i64,
        best_before: i64,
        roles: &[(&str, u32, usize, u32)],
    ) -> Project {
        let mut p = Project::new(name, duration, score, best_before);
        for &(skill, level, who, used) in roles {
            p = p.with_role(skill, level);
            let idx = p.roles.len() - 1;
            p.roles[idx].assignment = Some(RoleAssignment::direct(
                ContributorId(who),
                Skill::new(skill, used),
            ));
        }
        p
    }

    #[test]
    fn test_single_project_on_time() {
        let p = staffed("P", 5, 10, 5, &[("backend", 3, 0, 3)]);
        let report = Scorer::new().score(&[p], &roster());

        assert_eq!(report.total, 10);
        let ps = report.project("P").unwrap();
        assert_eq!(ps.start, 0);
        assert_eq!(ps.finish, 5);
        assert_eq!(ps.contribution, 10);
        assert_eq!(report.on_time, 1);
        assert_eq!(report.late, 0);
    }

    #[test]
    fn test_shared_contributor_serializes() {
        let p1 = staffed("P1", 4, 10, 20, &[("x", 1, 0, 1)]);
        let p2 = staffed("P2", 6, 10, 20, &[("x", 1, 0, 2)]);
        let report = Scorer::new().score(&[p1, p2], &roster());

        assert_eq!(report.project("P2").unwrap().start, 4);
        assert_eq!(report.project("P2").unwrap().finish, 10);
        assert_eq!(report.makespan, 10);
        assert_eq!(report.history["Anna"], vec!["P1".to_string(), "P2".to_string()]);
    }

    #[test]
    fn test_independent_contributors_run_in_parallel() {
        let p1 = staffed("P1", 4, 10, 20, &[("x", 1, 0, 1)]);
        let p2 = staffed("P2", 6, 10, 20, &[("x", 1, 1, 1)]);
        let report = Scorer::new().score(&[p1, p2], &roster());

        assert_eq!(report.project("P2").unwrap().start, 0);
        assert_eq!(report.makespan, 6);
    }

    #[test]
    fn test_start_is_latest_previous_finish() {
        let p1 = staffed("P1", 3, 10, 50, &[("x", 1, 0, 1)]);
        let p2 = staffed("P2", 7, 10, 50, &[("x", 1, 1, 1)]);
        let p3 = staffed("P3", 2, 10, 50, &[("x", 1, 0, 2), ("y", 1, 1, 1)]);
        let report = Scorer::new().score(&[p1, p2, p3], &roster());

        assert_eq!(report.project("P3").unwrap().start, 7);
        assert_eq!(report.project("P3").unwrap().finish, 9);
    }

    #[test]
    fn test_previous_project_is_most_recent() {
        // Anna: P1 (0..10), P2 (10..11). Bob joins P3 after Anna's latest (P2).
        let p1 = staffed("P1", 10, 1, 50, &[("x", 1, 0, 1)]);
        let p2 = staffed("P2", 1, 1, 50, &[("x", 1, 0, 2)]);
        let p3 = staffed("P3", 1, 1, 50, &[("x", 1, 0, 3), ("y", 1, 1, 1)]);
        let report = Scorer::new().score(&[p1, p2, p3], &roster());
        assert_eq!(report.project("P2").unwrap().finish, 11);
        assert_eq!(report.project("P3").unwrap().start, 11);
    }

    #[test]
    fn test_late_penalty_and_floor() {
        let p1 = staffed("P1", 5, 10, 2, &[("x", 1, 0, 1)]);
        let p2 = staffed("P2", 20, 10, 5, &[("x", 1, 1, 1)]);
        let report = Scorer::new().score(&[p1, p2], &roster());

        assert_eq!(report.project("P1").unwrap().contribution, 7);
        assert_eq!(report.project("P2").unwrap().contribution, 0);
        assert_eq!(report.total, 7);
        assert_eq!(report.late, 2);
        assert_eq!(report.total_lateness, 3 + 15);
    }

    #[test]
    fn test_contribution_bounds() {
        let ps: Vec<Project> = (0..5)
            .map(|i| staffed(&format!("P{i}"), 3, 4, 6, &[("x", 1, 0, 1)]))
            .collect();
        let report = Scorer::new().score(&ps, &roster());
        for (p, s) in ps.iter().zip(&report.projects) {
            assert!(s.contribution >= 0 && s.contribution <= p.score);
        }
    }

    #[test]
    fn test_skill_too_low_fault() {
        let p = staffed("P", 1, 10, 5, &[("x", 3, 0, 1)]);
        let report = Scorer::new().score(&[p], &roster());

        let ps = report.project("P").unwrap();
        assert_eq!(ps.contribution, 0);
        assert!(matches!(
            ps.fault,
            Some(AssignmentFault::SkillTooLow { level: 1, required: 3, .. })
        ));
        assert!(!report.is_consistent());
    }

    #[test]
    fn test_missing_mentor_fault() {
        let p = staffed("P", 1, 10, 5, &[("x", 3, 0, 2)]);
        let report = Scorer::new().score(&[p], &roster());
        assert!(matches!(
            report.projects[0].fault,
            Some(AssignmentFault::MissingMentor { .. })
        ));
    }

    #[test]
    fn test_recorded_mentor_accepted() {
        let mut p = staffed("P", 1, 10, 5, &[("cpp", 5, 1, 5), ("python", 3, 0, 2)]);
        p.roles[1].assignment = Some(
            RoleAssignment::direct(ContributorId(0), Skill::new("python", 2))
                .with_mentor(ContributorId(1), 3),
        );
        assert_eq!(check_assignment(&p, &roster()), Ok(()));
    }

    #[test]
    fn test_recorded_mentor_not_on_project() {
        let mut p = staffed("P", 1, 10, 5, &[("cpp", 5, 1, 5), ("python", 3, 0, 2)]);
        p.roles[1].assignment = Some(
            RoleAssignment::direct(ContributorId(0), Skill::new("python", 2))
                .with_mentor(ContributorId(2), 9),
        );
        assert!(matches!(
            check_assignment(&p, &roster()),
            Err(AssignmentFault::MissingMentor { .. })
        ));
    }

    #[test]
    fn test_mentor_derived_from_same_skill_role() {
        let p = staffed("P", 1, 10, 5, &[("python", 4, 1, 4), ("python", 3, 0, 2)]);
        assert_eq!(check_assignment(&p, &roster()), Ok(()));
    }

    #[test]
    fn test_double_booked_fault() {
        let p = staffed("P", 1, 10, 5, &[("x", 1, 0, 1), ("y", 1, 0, 1)]);
        assert!(matches!(
            check_assignment(&p, &roster()),
            Err(AssignmentFault::DoubleBooked { .. })
        ));
    }

    #[test]
    fn test_unassigned_fault() {
        let p = Project::new("P", 1, 10, 5).with_role("x", 1);
        assert!(matches!(
            check_assignment(&p, &roster()),
            Err(AssignmentFault::Unassigned { role_index: 0, .. })
        ));
    }

    #[test]
    fn test_schedule_fault_policy() {
        let good = staffed("Good", 1, 10, 5, &[("x", 1, 1, 1)]);
        let bad = staffed("Bad", 1, 10, 5, &[("x", 3, 0, 1)]);

        let per_project = Scorer::new().score(&[good.clone(), bad.clone()], &roster());
        assert_eq!(per_project.total, 10);

        let whole = Scorer::new()
            .with_policy(FaultPolicy::Schedule)
            .score(&[good, bad], &roster());
        assert_eq!(whole.total, 0);
        assert_eq!(whole.project("Good").unwrap().contribution, 10);
    }

    #[test]
    fn test_empty_schedule() {
        let report = Scorer::new().score(&[], &roster());
        assert_eq!(report.total, 0);
        assert_eq!(report.makespan, 0);
        assert!(report.is_consistent());
    }

    #[test]
    fn test_huge_durations_saturate() {
        let d = i64::MAX / 2 + 1;
        let p1 = staffed("P1", d, 10, 0, &[("x", 1, 0, 1)]);
        let p2 = staffed("P2", d, 10, 0, &[("x", 1, 0, 2)]);
        let report = Scorer::new().score(&[p1, p2], &roster());

        let ps = report.project("P2").unwrap();
        assert_eq!(ps.start, d);
        assert_eq!(ps.finish, i64::MAX);
        assert_eq!(ps.contribution, 0);
        assert_eq!(report.makespan, i64::MAX);
        assert_eq!(report.total_lateness, i64::MAX);
        assert_eq!(report.late, 2);
    }

    #[test]
    fn test_max_level_role_is_consistent() {
        let p = staffed("P", 1, 10, 5, &[("x", u32::MAX, 0, u32::MAX)]);
        assert_eq!(check_assignment(&p, &roster()), Ok(()));

        let p = staffed("P", 1, 10, 5, &[("x", u32::MAX, 0, 0)]);
        assert!(matches!(
            check_assignment(&p, &roster()),
            Err(AssignmentFault::SkillTooLow { .. })
        ));
    }
}
