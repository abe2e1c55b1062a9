//! Replay of a submitted plan.
//!
//! Rebuilds role assignments from a [`Plan`] produced elsewhere (e.g. a
//! report file), so it can be checked and scored like the scheduler's own
//! output.
//!
//! # Rules
//!
//! Projects are replayed in plan order. Within a project, every role is
//! evaluated against skill levels as they stand when the project starts:
//! - the assignee's level is recorded (a missing skill counts as 0);
//! - when the assignee is below the requirement, the most skilled other
//!   assignee of the project in that skill is recorded as mentor;
//! - afterwards, every assignee at or one below the requirement gains a
//!   level.
//!
//! The plan is fully resolved before the roster is touched: on error,
//! nothing is mutated.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::debug;

use crate::models::{ContributorId, Plan, Project, RoleAssignment, Roster, Skill};

/// A plan that does not fit the problem it is replayed against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// The plan names a project that does not exist.
    #[error("unknown project '{0}'")]
    UnknownProject(String),

    /// The plan lists a project twice.
    #[error("project '{0}' is listed more than once")]
    DuplicateProject(String),

    /// The plan names a contributor that does not exist.
    #[error("project '{project}': unknown contributor '{contributor}'")]
    UnknownContributor {
        /// Project name.
        project: String,
        /// Contributor name.
        contributor: String,
    },

    /// The plan lists the wrong number of assignees.
    #[error("project '{project}' has {expected} roles, plan lists {found} assignees")]
    RoleCountMismatch {
        /// Project name.
        project: String,
        /// Roles in the project.
        expected: usize,
        /// Assignees in the plan.
        found: usize,
    },
}

/// Replays `plan`, filling role slots and raising skills in `roster`.
///
/// Returns the planned projects in plan order with their slots filled.
/// Projects the plan does not mention are discarded.
pub fn replay(
    plan: &Plan,
    roster: &mut Roster,
    projects: Vec<Project>,
) -> Result<Vec<Project>, ReplayError> {
    let mut by_name: HashMap<String, Project> = projects
        .into_iter()
        .map(|p| (p.name.clone(), p))
        .collect();

    let mut resolved: Vec<(Project, Vec<ContributorId>)> = Vec::with_capacity(plan.len());
    let mut seen: HashSet<&str> = HashSet::new();
    for entry in &plan.entries {
        if !seen.insert(entry.project.as_str()) {
            return Err(ReplayError::DuplicateProject(entry.project.clone()));
        }
        let project = by_name
            .remove(&entry.project)
            .ok_or_else(|| ReplayError::UnknownProject(entry.project.clone()))?;
        if project.roles.len() != entry.assignees.len() {
            return Err(ReplayError::RoleCountMismatch {
                project: project.name.clone(),
                expected: project.roles.len(),
                found: entry.assignees.len(),
            });
        }
        let ids = entry
            .assignees
            .iter()
            .map(|name| {
                roster
                    .find(name)
                    .ok_or_else(|| ReplayError::UnknownContributor {
                        project: project.name.clone(),
                        contributor: name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        resolved.push((project, ids));
    }

    let mut staffed = Vec::with_capacity(resolved.len());
    for (mut project, ids) in resolved {
        replay_project(&mut project, &ids, roster);
        staffed.push(project);
    }
    Ok(staffed)
}

fn replay_project(project: &mut Project, ids: &[ContributorId], roster: &mut Roster) {
    let level = |roster: &Roster, id: ContributorId, skill: &str| {
        roster.get(id).map_or(0, |c| c.skill_level(skill))
    };

    let mut improved: Vec<(ContributorId, String)> = Vec::new();
    for (role, &id) in project.roles.iter_mut().zip(ids) {
        let own = level(roster, id, &role.name);
        let mut assignment = RoleAssignment::direct(id, Skill::new(role.name.clone(), own));

        if own < role.level {
            let mut best: Option<(ContributorId, u32)> = None;
            for &other in ids.iter().filter(|&&other| other != id) {
                let l = level(roster, other, &role.name);
                if best.map_or(true, |(_, b)| l > b) {
                    best = Some((other, l));
                }
            }
            if let Some((mentor, mentor_level)) = best {
                assignment = assignment.with_mentor(mentor, mentor_level);
            }
        }

        if own <= role.level && own.saturating_add(1) >= role.level {
            improved.push((id, role.name.clone()));
        }
        role.assignment = Some(assignment);
    }

    for (id, skill) in improved {
        if let Some(contributor) = roster.get_mut(id) {
            contributor.improve(&skill);
        }
    }

    debug!(event = "project_replayed", project = %project.name, roles = ids.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Contributor, PlanEntry};
    use crate::scheduler::{check_assignment, AssignmentFault};

    fn problem() -> (Roster, Vec<Project>) {
        (
            Roster::new(vec![
                Contributor::new("Anna").with_skill("c++", 2),
                Contributor::new("Bob").with_skill("html", 5).with_skill("css", 5),
                Contributor::new("Maria").with_skill("python", 3),
            ]),
            vec![
                Project::new("Logging", 5, 10, 5).with_role("c++", 3),
                Project::new("WebServer", 7, 10, 7)
                    .with_role("html", 3)
                    .with_role("c++", 2),
                Project::new("WebChat", 10, 20, 20)
                    .with_role("python", 3)
                    .with_role("html", 3),
            ],
        )
    }

    fn plan(entries: &[(&str, Vec<&str>)]) -> Plan {
        Plan {
            entries: entries
                .iter()
                .map(|(p, a)| PlanEntry::new(*p, a.iter().map(|s| s.to_string()).collect()))
                .collect(),
        }
    }

    #[test]
    fn test_replay_valid_plan() {
        let (mut roster, projects) = problem();
        let submitted = plan(&[
            ("WebServer", vec!["Bob", "Anna"]),
            ("Logging", vec!["Anna"]),
            ("WebChat", vec!["Maria", "Bob"]),
        ]);

        let staffed = replay(&submitted, &mut roster, projects).unwrap();
        let names: Vec<&str> = staffed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["WebServer", "Logging", "WebChat"]);

        // Anna rose to c++ 3 on WebServer, then to 4 on Logging.
        assert_eq!(roster.get(ContributorId(0)).unwrap().skill_level("c++"), 4);
        assert_eq!(staffed[1].roles[0].assignment.as_ref().unwrap().skill.level, 3);
        // Maria rose on WebChat; Bob was overqualified.
        assert_eq!(roster.get(ContributorId(2)).unwrap().skill_level("python"), 4);
        assert_eq!(roster.get(ContributorId(1)).unwrap().skill_level("html"), 5);

        for p in &staffed {
            assert_eq!(check_assignment(p, &roster), Ok(()));
        }
    }

    #[test]
    fn test_replay_records_mentor() {
        let mut roster = Roster::new(vec![
            Contributor::new("Anna").with_skill("python", 2),
            Contributor::new("Bob").with_skill("python", 4).with_skill("cpp", 1),
        ]);
        let projects = vec![Project::new("P", 1, 1, 1)
            .with_role("cpp", 1)
            .with_role("python", 3)];

        let staffed = replay(&plan(&[("P", vec!["Bob", "Anna"])]), &mut roster, projects).unwrap();
        let mentored = staffed[0].roles[1].assignment.as_ref().unwrap();
        assert_eq!(mentored.mentor.unwrap().mentor, ContributorId(1));
        assert_eq!(mentored.mentor.unwrap().level, 4);
        assert_eq!(check_assignment(&staffed[0], &roster), Ok(()));
        assert_eq!(roster.get(ContributorId(0)).unwrap().skill_level("python"), 3);
    }

    #[test]
    fn test_replay_missing_skill_can_be_mentored() {
        let mut roster = Roster::new(vec![
            Contributor::new("Anna"),
            Contributor::new("Bob").with_skill("go", 1).with_skill("rust", 1),
        ]);
        let projects = vec![Project::new("P", 1, 1, 1)
            .with_role("rust", 1)
            .with_role("go", 1)];

        // Anna has no go at all: level 0, mentored by Bob.
        let staffed = replay(&plan(&[("P", vec!["Bob", "Anna"])]), &mut roster, projects).unwrap();
        assert_eq!(check_assignment(&staffed[0], &roster), Ok(()));
        assert_eq!(roster.get(ContributorId(0)).unwrap().skill_level("go"), 1);
    }

    #[test]
    fn test_replay_unqualified_assignee_is_faulted() {
        let (mut roster, projects) = problem();
        let staffed = replay(&plan(&[("Logging", vec!["Maria"])]), &mut roster, projects).unwrap();
        assert!(matches!(
            check_assignment(&staffed[0], &roster),
            Err(AssignmentFault::SkillTooLow { .. })
        ));
        assert_eq!(roster.get(ContributorId(2)).unwrap().skill_level("c++"), 0);
    }

    #[test]
    fn test_replay_unknown_project() {
        let (mut roster, projects) = problem();
        let err = replay(&plan(&[("Nope", vec![])]), &mut roster, projects).unwrap_err();
        assert_eq!(err, ReplayError::UnknownProject("Nope".into()));
    }

    #[test]
    fn test_replay_duplicate_project() {
        let (mut roster, projects) = problem();
        let err = replay(
            &plan(&[("Logging", vec!["Anna"]), ("Logging", vec!["Anna"])]),
            &mut roster,
            projects,
        )
        .unwrap_err();
        assert_eq!(err, ReplayError::DuplicateProject("Logging".into()));
    }

    #[test]
    fn test_replay_errors_leave_roster_untouched() {
        let (mut roster, projects) = problem();
        let err = replay(
            &plan(&[("WebServer", vec!["Bob", "Anna"]), ("Logging", vec!["Zed"])]),
            &mut roster,
            projects,
        )
        .unwrap_err();
        assert!(matches!(err, ReplayError::UnknownContributor { .. }));
        assert_eq!(roster.get(ContributorId(0)).unwrap().skill_level("c++"), 2);
    }

    #[test]
    fn test_replay_role_count_mismatch() {
        let (mut roster, projects) = problem();
        let err = replay(&plan(&[("WebServer", vec!["Bob"])]), &mut roster, projects).unwrap_err();
        assert_eq!(
            err,
            ReplayError::RoleCountMismatch {
                project: "WebServer".into(),
                expected: 2,
                found: 1
            }
        );
    }
}
