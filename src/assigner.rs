//! Project assignment.
//!
//! Fills every role of one project from the shared roster, or reports the
//! first role that cannot be filled.
//!
//! # Algorithm
//!
//! 1. Walk roles in project order.
//! 2. For each role, scan the roster in pool order, skipping contributors
//!    already claimed by an earlier role of this project.
//! 3. The first contributor that matches directly, or that is one level
//!    short while a claimed contributor can mentor the role, is claimed.
//! 4. A role filled at or below its required level raises the assignee's
//!    skill by one. Later roles of the same project see the raised level
//!    when looking for mentors.
//!
//! Checking and committing share one routine ([`plan`]), so
//! [`can_assign`] and [`assign`] cannot disagree, and a failed [`assign`]
//! leaves the roster and project untouched.
//!
//! # Complexity
//! O(r * c) where r = roles, c = contributors.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::debug;

use crate::matching::{can_mentor, match_role};
use crate::models::{ContributorId, Mentorship, Project, RoleAssignment, Roster, Skill};

/// A project role that no contributor can currently fill.
///
/// Expected during scheduling: the project may become assignable in a
/// later pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("project '{project}': no contributor for role #{role_index} ({role} level {level})")]
pub struct Unsatisfiable {
    /// Project name.
    pub project: String,
    /// Index of the failing role.
    pub role_index: usize,
    /// Required skill name.
    pub role: String,
    /// Required level.
    pub level: u32,
}

/// How one role would be filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRole {
    /// Index of the role in the project.
    pub role_index: usize,
    /// Claimed contributor.
    pub contributor: ContributorId,
    /// Skill used, at its level before progression.
    pub skill: Skill,
    /// Mentor, when the contributor is one level short.
    pub mentor: Option<Mentorship>,
    /// Whether the contributor's skill rises after the assignment.
    pub improves: bool,
}

/// A complete, not yet committed, assignment of one project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffingPlan {
    /// One entry per role, in role order.
    pub roles: Vec<PlannedRole>,
}

impl StaffingPlan {
    /// Claimed contributors in role order.
    pub fn contributors(&self) -> Vec<ContributorId> {
        self.roles.iter().map(|r| r.contributor).collect()
    }

    /// Number of roles filled through mentoring.
    pub fn mentored_count(&self) -> usize {
        self.roles.iter().filter(|r| r.mentor.is_some()).count()
    }
}

/// Computes how `project` would be staffed from `roster`, without mutating
/// anything.
///
/// Skill progression of contributors claimed earlier in the project is
/// simulated, so the plan is exactly what [`assign`] will commit.
pub fn plan(project: &Project, roster: &Roster) -> Result<StaffingPlan, Unsatisfiable> {
    let mut busy: HashSet<ContributorId> = HashSet::new();
    // Claim order; mentors are searched in this order.
    let mut claimed: Vec<ContributorId> = Vec::new();
    // Simulated levels of claimed contributors whose skill has risen.
    let mut raised: HashMap<(ContributorId, &str), u32> = HashMap::new();
    let mut planned = Vec::with_capacity(project.roles.len());

    for (role_index, role) in project.roles.iter().enumerate() {
        let level_of = |id: ContributorId| -> u32 {
            raised
                .get(&(id, role.name.as_str()))
                .copied()
                .unwrap_or_else(|| roster.get(id).map_or(0, |c| c.skill_level(&role.name)))
        };

        let choice = roster
            .iter()
            .filter(|(id, _)| !busy.contains(id))
            .find_map(|(id, contributor)| {
                let found = match_role(contributor, role)?;
                if found.is_direct() {
                    return Some((id, found.skill, None));
                }
                claimed
                    .iter()
                    .map(|&m| (m, level_of(m)))
                    .find(|&(m, level)| m != id && can_mentor(level, role.level))
                    .map(|(mentor, level)| (id, found.skill, Some(Mentorship { mentor, level })))
            });

        let Some((contributor, skill, mentor)) = choice else {
            return Err(Unsatisfiable {
                project: project.name.clone(),
                role_index,
                role: role.name.clone(),
                level: role.level,
            });
        };

        let improves = skill.level <= role.level;
        if improves {
            raised.insert((contributor, role.name.as_str()), skill.level.saturating_add(1));
        }
        busy.insert(contributor);
        claimed.push(contributor);
        planned.push(PlannedRole {
            role_index,
            contributor,
            skill,
            mentor,
            improves,
        });
    }

    Ok(StaffingPlan { roles: planned })
}

/// Whether every role of `project` can currently be filled.
pub fn can_assign(project: &Project, roster: &Roster) -> bool {
    plan(project, roster).is_ok()
}

/// Staffs `project` from `roster`: fills every role slot and applies skill
/// progression.
///
/// On `Err`, nothing is mutated.
pub fn assign(project: &mut Project, roster: &mut Roster) -> Result<StaffingPlan, Unsatisfiable> {
    let staffing = plan(project, roster)?;
    commit(project, roster, &staffing);
    Ok(staffing)
}

/// Writes a plan into the project's role slots and raises skills.
fn commit(project: &mut Project, roster: &mut Roster, staffing: &StaffingPlan) {
    for planned in &staffing.roles {
        let Some(role) = project.roles.get_mut(planned.role_index) else {
            continue;
        };
        role.assignment = Some(RoleAssignment {
            contributor: planned.contributor,
            skill: planned.skill.clone(),
            mentor: planned.mentor,
        });

        if planned.improves {
            if let Some(contributor) = roster.get_mut(planned.contributor) {
                let level = contributor.improve(&role.name);
                debug!(
                    event = "skill_up",
                    contributor = %contributor.name,
                    skill = %role.name,
                    level = level,
                );
            }
        }
    }

    debug!(
        event = "project_assigned",
        project = %project.name,
        roles = staffing.roles.len(),
        mentored = staffing.mentored_count(),
    );
}
