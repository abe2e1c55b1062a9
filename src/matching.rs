//! Role matching.
//!
//! Decides whether a single contributor can fill a single role, and whether
//! doing so requires a mentor. Pure: reads current skill state only.
//!
//! # Rule
//!
//! | Contributor level | Outcome |
//! |-------------------|---------|
//! | no skill entry | no match |
//! | `< required - 1` | no match |
//! | `== required - 1` | match, needs mentor |
//! | `>= required` | direct match |

use crate::models::{Contributor, Role, Skill};

/// A successful role match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMatch {
    /// The contributor's skill entry used to fill the role.
    pub skill: Skill,
    /// Whether the contributor is one level short and needs a mentor.
    pub needs_mentor: bool,
}

impl RoleMatch {
    /// Whether this is a direct (unmentored) fit.
    pub fn is_direct(&self) -> bool {
        !self.needs_mentor
    }
}

/// Matches a contributor against a role.
///
/// Returns `None` when the contributor has no entry for the role's skill or
/// is more than one level below the requirement.
pub fn match_role(contributor: &Contributor, role: &Role) -> Option<RoleMatch> {
    let skill = contributor.skill(&role.name)?;
    match_level(skill.level, role.level).map(|needs_mentor| RoleMatch {
        skill: skill.clone(),
        needs_mentor,
    })
}

/// The matching rule on raw levels.
///
/// `Some(false)` for a direct fit, `Some(true)` when a mentor is needed,
/// `None` when the level is too low.
pub fn match_level(level: u32, required: u32) -> Option<bool> {
    if level >= required {
        Some(false)
    } else if level.saturating_add(1) == required {
        Some(true)
    } else {
        None
    }
}

/// Whether `level` can mentor a role requiring `required`.
#[inline]
pub fn can_mentor(level: u32, required: u32) -> bool {
    level >= required
}
