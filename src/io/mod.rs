//! Problem loading and plan reporting.
//!
//! Plain-text encodings only; the scheduling core never performs I/O.

mod input;
mod report;

pub use input::{load_problem, parse_problem, ParseError};
pub use report::{
    load_plan, parse_plan, render_plan, save_report, write_report, ReportFormat, RunReport,
};
