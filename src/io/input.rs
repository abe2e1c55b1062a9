//! Problem loader.
//!
//! Reads the plain-text problem description:
//!
//! ```text
//! C P
//! <contributor name> N        (C times)
//! <skill> <level>             (N times)
//! <project> <duration> <score> <best_before> R   (P times)
//! <skill> <level>             (R times)
//! ```
//!
//! Fields are whitespace separated. Blank lines are skipped. Role order is
//! preserved.

use std::path::Path;

use thiserror::Error;

use crate::error::StaffingError;
use crate::models::{Contributor, Problem, Project, Role};

/// A malformed problem or plan file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input ended early.
    #[error("line {line}: unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// Line where more input was expected.
        line: usize,
        /// What was expected.
        expected: &'static str,
    },

    /// A line has the wrong number of fields.
    #[error("line {line}: expected {expected}, found '{found}'")]
    Malformed {
        /// Offending line.
        line: usize,
        /// What was expected.
        expected: &'static str,
        /// Line content.
        found: String,
    },

    /// A numeric field does not parse.
    #[error("line {line}: invalid number '{value}'")]
    InvalidNumber {
        /// Offending line.
        line: usize,
        /// Field content.
        value: String,
    },

    /// A contributor lists the same skill twice.
    #[error("line {line}: contributor '{contributor}' lists skill '{skill}' twice")]
    DuplicateSkill {
        /// Offending line.
        line: usize,
        /// Contributor name.
        contributor: String,
        /// Skill name.
        skill: String,
    },
}

/// Line cursor shared by the problem and plan parsers.
pub(crate) struct LineReader<'a> {
    lines: std::str::Lines<'a>,
    line: usize,
}

impl<'a> LineReader<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
        }
    }

    /// Current 1-based line number.
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// Next non-blank line, split into fields.
    pub(crate) fn fields(&mut self, expected: &'static str) -> Result<Vec<&'a str>, ParseError> {
        for raw in self.lines.by_ref() {
            self.line += 1;
            let fields: Vec<&str> = raw.split_whitespace().collect();
            if !fields.is_empty() {
                return Ok(fields);
            }
        }
        Err(ParseError::UnexpectedEof {
            line: self.line + 1,
            expected,
        })
    }

    /// Next non-blank line with exactly `n` fields.
    pub(crate) fn exact(
        &mut self,
        n: usize,
        expected: &'static str,
    ) -> Result<Vec<&'a str>, ParseError> {
        let fields = self.fields(expected)?;
        if fields.len() != n {
            return Err(ParseError::Malformed {
                line: self.line,
                expected,
                found: fields.join(" "),
            });
        }
        Ok(fields)
    }

    pub(crate) fn number<T: std::str::FromStr>(&self, value: &str) -> Result<T, ParseError> {
        value.parse().map_err(|_| ParseError::InvalidNumber {
            line: self.line,
            value: value.to_string(),
        })
    }
}

/// Parses a problem description.
///
/// # Example
///
/// ```
/// use u_staffing::io::parse_problem;
///
/// let problem = parse_problem("1 1\nAnna 1\nc++ 2\nLogging 5 10 5 1\nc++ 3\n").unwrap();
/// assert_eq!(problem.contributor_count(), 1);
/// assert_eq!(problem.projects[0].roles[0].level, 3);
/// ```
pub fn parse_problem(text: &str) -> Result<Problem, ParseError> {
    let mut reader = LineReader::new(text);

    let header = reader.exact(2, "'<contributors> <projects>'")?;
    let n_contributors: usize = reader.number(header[0])?;
    let n_projects: usize = reader.number(header[1])?;

    let mut contributors = Vec::new();
    for _ in 0..n_contributors {
        let head = reader.exact(2, "'<name> <skill count>'")?;
        let mut contributor = Contributor::new(head[0]);
        let n_skills: usize = reader.number(head[1])?;

        for _ in 0..n_skills {
            let (name, level) = skill_line(&mut reader)?;
            if contributor.has_skill(name) {
                return Err(ParseError::DuplicateSkill {
                    line: reader.line(),
                    contributor: contributor.name.clone(),
                    skill: name.to_string(),
                });
            }
            contributor = contributor.with_skill(name, level);
        }
        contributors.push(contributor);
    }

    let mut projects = Vec::new();
    for _ in 0..n_projects {
        let head = reader.exact(5, "'<name> <duration> <score> <best before> <role count>'")?;
        let mut project = Project::new(
            head[0],
            reader.number(head[1])?,
            reader.number(head[2])?,
            reader.number(head[3])?,
        );
        let n_roles: usize = reader.number(head[4])?;

        for _ in 0..n_roles {
            let (name, level) = skill_line(&mut reader)?;
            project.roles.push(Role::new(name, level));
        }
        projects.push(project);
    }

    Ok(Problem::new(contributors, projects))
}

fn skill_line<'a>(reader: &mut LineReader<'a>) -> Result<(&'a str, u32), ParseError> {
    let fields = reader.exact(2, "'<skill> <level>'")?;
    Ok((fields[0], reader.number(fields[1])?))
}

/// Reads and parses a problem file.
pub fn load_problem(path: impl AsRef<Path>) -> Result<Problem, StaffingError> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_problem(&text)?)
}
