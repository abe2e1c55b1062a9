//! Input validation for staffing problems.
//!
//! Checks structural integrity of contributors and projects before
//! scheduling. Detects:
//! - Duplicate contributor or project names
//! - Non-positive project durations
//! - Negative project scores
//! - Projects without roles
//!
//! Projects that can never be staffed (e.g. a role no one has the skill
//! for) are not errors: the scheduler drops them.

use crate::models::{Project, Roster};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two contributors or two projects share a name.
    DuplicateName,
    /// A project's duration is zero or negative.
    InvalidDuration,
    /// A project's score is negative.
    NegativeScore,
    /// A project has no roles.
    EmptyProject,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the input data for a staffing problem.
///
/// Checks:
/// 1. No duplicate contributor names
/// 2. No duplicate project names
/// 3. Every project has a positive duration
/// 4. Every project has a non-negative score
/// 5. Every project has at least one role
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(roster: &Roster, projects: &[Project]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut contributor_names = HashSet::new();
    for c in roster.contributors() {
        if !contributor_names.insert(c.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate contributor name: {}", c.name),
            ));
        }
    }

    let mut project_names = HashSet::new();
    for p in projects {
        if !project_names.insert(p.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate project name: {}", p.name),
            ));
        }

        if p.duration <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Project '{}' has non-positive duration {}", p.name, p.duration),
            ));
        }

        if p.score < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeScore,
                format!("Project '{}' has negative score {}", p.name, p.score),
            ));
        }

        if p.roles.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyProject,
                format!("Project '{}' has no roles", p.name),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
