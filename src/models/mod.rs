//! Staffing domain models.
//!
//! Provides the core data types for representing staffing problems and
//! their solutions: contributors with leveled skills, and projects made of
//! leveled roles.
//!
//! # Domain Mappings
//!
//! | u-staffing | Software | Healthcare | Film |
//! |------------|----------|------------|------|
//! | Contributor | Engineer | Nurse | Crew member |
//! | Skill | Language/stack | Certification | Craft |
//! | Project | Feature | Procedure | Shoot |
//! | Role | Seat on the team | Staffing slot | Crew position |

mod contributor;
mod plan;
mod problem;
mod project;
mod role;
mod skill;

pub use contributor::{Contributor, ContributorId, Roster};
pub use plan::{Plan, PlanEntry};
pub use problem::Problem;
pub use project::Project;
pub use role::{Mentorship, Role, RoleAssignment};
pub use skill::Skill;
