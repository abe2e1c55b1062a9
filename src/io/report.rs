//! Plan reports.
//!
//! The text format is the plan submission format:
//!
//! ```text
//! <number of projects>
//! <project name>
//! <assignee> <assignee> ...   (one per role, in role order)
//! ...
//! ```
//!
//! The JSON format additionally carries scoring details and dropped
//! projects.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::input::{LineReader, ParseError};
use crate::error::StaffingError;
use crate::models::{Plan, PlanEntry};
use crate::scheduler::ScoreReport;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Plan submission text.
    #[default]
    Text,
    /// Pretty JSON.
    Json,
}

/// Everything a run produces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Staffed projects in execution order.
    pub plan: Plan,
    /// Scoring of the plan.
    pub score: Option<ScoreReport>,
    /// Projects never staffed.
    pub dropped: Vec<String>,
    /// Scheduler passes.
    pub passes: usize,
}

impl RunReport {
    /// Creates a report for a plan.
    pub fn new(plan: Plan) -> Self {
        Self {
            plan,
            ..Default::default()
        }
    }

    /// Attaches scoring details.
    pub fn with_score(mut self, score: ScoreReport) -> Self {
        self.score = Some(score);
        self
    }

    /// Sets the dropped project names.
    pub fn with_dropped(mut self, dropped: Vec<String>) -> Self {
        self.dropped = dropped;
        self
    }

    /// Sets the number of passes.
    pub fn with_passes(mut self, passes: usize) -> Self {
        self.passes = passes;
        self
    }
}

/// Renders a plan in the submission format.
pub fn render_plan(plan: &Plan) -> String {
    let mut out = format!("{}\n", plan.len());
    for entry in &plan.entries {
        out.push_str(&entry.project);
        out.push('\n');
        out.push_str(&entry.assignees.join(" "));
        out.push('\n');
    }
    out
}

/// Writes a report in the given format.
pub fn write_report(
    report: &RunReport,
    format: ReportFormat,
    mut writer: impl Write,
) -> Result<(), StaffingError> {
    match format {
        ReportFormat::Text => writer.write_all(render_plan(&report.plan).as_bytes())?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, report)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

/// Writes a report to a file.
pub fn save_report(
    report: &RunReport,
    format: ReportFormat,
    path: impl AsRef<Path>,
) -> Result<(), StaffingError> {
    let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_report(report, format, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Parses a plan in the submission format.
pub fn parse_plan(text: &str) -> Result<Plan, ParseError> {
    let mut reader = LineReader::new(text);
    let header = reader.exact(1, "'<project count>'")?;
    let count: usize = reader.number(header[0])?;

    let mut plan = Plan::new();
    for _ in 0..count {
        let name = reader.exact(1, "'<project name>'")?;
        let assignees = reader.fields("'<assignee> ...'")?;
        plan.add_entry(PlanEntry::new(
            name[0],
            assignees.into_iter().map(str::to_string).collect(),
        ));
    }
    Ok(plan)
}

/// Reads and parses a plan file.
pub fn load_plan(path: impl AsRef<Path>) -> Result<Plan, StaffingError> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_plan(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> Plan {
        let mut plan = Plan::new();
        plan.add_entry(PlanEntry::new("WebServer", vec!["Bob".into(), "Anna".into()]));
        plan.add_entry(PlanEntry::new("Logging", vec!["Anna".into()]));
        plan
    }

    #[test]
    fn test_render_plan() {
        assert_eq!(
            render_plan(&sample_plan()),
            "2\nWebServer\nBob Anna\nLogging\nAnna\n"
        );
    }

    #[test]
    fn test_render_empty_plan() {
        assert_eq!(render_plan(&Plan::new()), "0\n");
    }

    #[test]
    fn test_parse_rendered_plan() {
        let plan = parse_plan(&render_plan(&sample_plan())).unwrap();
        assert_eq!(plan, sample_plan());
    }

    #[test]
    fn test_parse_plan_truncated() {
        let err = parse_plan("2\nWebServer\nBob Anna\n").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_parse_plan_name_with_spaces() {
        let err = parse_plan("1\nWeb Server\nBob\n").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_write_json_report() {
        let report = RunReport::new(sample_plan())
            .with_dropped(vec!["WebChat".into()])
            .with_passes(2);

        let mut buf = Vec::new();
        write_report(&report, ReportFormat::Json, &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["plan"]["entries"][0]["project"], "WebServer");
        assert_eq!(value["dropped"][0], "WebChat");
        assert_eq!(value["passes"], 2);
        assert!(value["score"].is_null());
    }

    #[test]
    fn test_write_text_report() {
        let mut buf = Vec::new();
        write_report(&RunReport::new(sample_plan()), ReportFormat::Text, &mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().starts_with("2\nWebServer\n"));
    }

    #[test]
    fn test_save_and_load_plan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        save_report(&RunReport::new(sample_plan()), ReportFormat::Text, &path).unwrap();

        assert_eq!(load_plan(&path).unwrap(), sample_plan());
    }

    #[test]
    fn test_parse_plan_oversized_count() {
        let err = parse_plan("18446744073709551615\nWebServer\nBob\n").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { line: 4, .. }));
    }
}
