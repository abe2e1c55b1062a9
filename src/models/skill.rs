//! Skill model.
//!
//! A skill is a named proficiency with an integer level. Contributors own
//! skills; roles require them.

use serde::{Deserialize, Serialize};

/// A named skill at a given level.
///
/// Two skills are equal iff both name and level match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Skill {
    /// Skill identifier (e.g., "backend", "design").
    pub name: String,
    /// Proficiency level (0 = none).
    pub level: u32,
}

impl Skill {
    /// Creates a new skill.
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}
