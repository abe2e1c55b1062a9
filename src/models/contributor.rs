//! Contributor and roster models.
//!
//! Contributors are the scarce, shared resource that projects compete for.
//! Each contributor holds at most one skill per skill name. The [`Roster`]
//! owns every contributor of a run; everything else refers to contributors
//! by [`ContributorId`], so skill progression applied through the roster is
//! visible to every later evaluation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::Skill;

/// Index of a contributor in its [`Roster`].
///
/// Ids follow pool order: id 0 is scanned first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContributorId(pub usize);

impl fmt::Display for ContributorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A person who can fill project roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    /// Unique contributor name.
    pub name: String,
    /// Current skills, keyed by skill name.
    pub skills: HashMap<String, Skill>,
}

impl Contributor {
    /// Creates a contributor with no skills.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            skills: HashMap::new(),
        }
    }

    /// Adds (or replaces) a skill.
    pub fn with_skill(mut self, name: impl Into<String>, level: u32) -> Self {
        let skill = Skill::new(name, level);
        self.skills.insert(skill.name.clone(), skill);
        self
    }

    /// Returns the skill entry for `name`, if any.
    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills.get(name)
    }

    /// Whether this contributor has an entry for `name`.
    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.contains_key(name)
    }

    /// Returns the level for a skill (0 if not found).
    pub fn skill_level(&self, name: &str) -> u32 {
        self.skills.get(name).map(|s| s.level).unwrap_or(0)
    }

    /// Raises a skill by one level, creating it at level 1 if absent.
    ///
    /// Returns the new level.
    pub fn improve(&mut self, name: &str) -> u32 {
        let skill = self
            .skills
            .entry(name.to_string())
            .or_insert_with(|| Skill::new(name, 0));
        skill.level = skill.level.saturating_add(1);
        skill.level
    }
}

/// Indexed registry of all contributors in a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    contributors: Vec<Contributor>,
}

impl Roster {
    /// Creates a roster in the given pool order.
    pub fn new(contributors: Vec<Contributor>) -> Self {
        Self { contributors }
    }

    /// Appends a contributor and returns its id.
    pub fn push(&mut self, contributor: Contributor) -> ContributorId {
        self.contributors.push(contributor);
        ContributorId(self.contributors.len() - 1)
    }

    /// Number of contributors.
    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }

    /// Looks up a contributor by id.
    pub fn get(&self, id: ContributorId) -> Option<&Contributor> {
        self.contributors.get(id.0)
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: ContributorId) -> Option<&mut Contributor> {
        self.contributors.get_mut(id.0)
    }

    /// Finds a contributor id by name.
    pub fn find(&self, name: &str) -> Option<ContributorId> {
        self.contributors
            .iter()
            .position(|c| c.name == name)
            .map(ContributorId)
    }

    /// Name of a contributor, or `"?"` for an unknown id.
    pub fn name_of(&self, id: ContributorId) -> &str {
        self.get(id).map(|c| c.name.as_str()).unwrap_or("?")
    }

    /// Iterates contributors in pool order.
    pub fn iter(&self) -> impl Iterator<Item = (ContributorId, &Contributor)> {
        self.contributors
            .iter()
            .enumerate()
            .map(|(i, c)| (ContributorId(i), c))
    }

    /// All contributors in pool order.
    pub fn contributors(&self) -> &[Contributor] {
        &self.contributors
    }
}
