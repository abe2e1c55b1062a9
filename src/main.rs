//! u-staffing - skill-based project staffing
//!
//! Staffs projects from a contributor pool and scores the result, or
//! scores a plan produced elsewhere.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use u_staffing::config::StaffingConfig;
use u_staffing::io::{load_plan, load_problem, save_report, write_report, ReportFormat, RunReport};
use u_staffing::replay::replay;
use u_staffing::scheduler::ScoreReport;
use u_staffing::validation::validate_input;
use u_staffing::StaffingError;

/// Skill-based project staffing
#[derive(Parser, Debug)]
#[command(name = "u-staffing")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "U_STAFFING_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Staff projects and write the plan
    Plan {
        /// Problem file
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: Format,
    },

    /// Score a submitted plan against a problem
    Score {
        /// Problem file
        input: PathBuf,

        /// Plan file in submission format
        plan: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Plan submission text
    Text,
    /// JSON with scoring details
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ReportFormat::Text,
            Format::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("u_staffing={}", log_level).into()),
        )
        .init();

    let config = match &cli.config {
        Some(path) => StaffingConfig::load(path)
            .map_err(StaffingError::from)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => StaffingConfig::default(),
    };

    match cli.command {
        Commands::Plan {
            input,
            output,
            format,
        } => run_plan(&config, &input, output.as_deref(), format.into()),
        Commands::Score {
            input,
            plan,
            format,
        } => {
            let consistent = run_score(&config, &input, &plan, format.into())?;
            if !consistent {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn run_plan(
    config: &StaffingConfig,
    input: &Path,
    output: Option<&Path>,
    format: ReportFormat,
) -> Result<()> {
    let mut problem =
        load_problem(input).with_context(|| format!("loading problem {}", input.display()))?;
    validate_input(&problem.roster, &problem.projects).map_err(StaffingError::from)?;
    info!(
        "Loaded {} contributors, {} projects from {}",
        problem.contributor_count(),
        problem.project_count(),
        input.display()
    );

    let outcome = config.scheduler().schedule_problem(&mut problem);
    let score = config.scorer().score(&outcome.assigned, &problem.roster);
    info!(
        "Staffed {} projects, dropped {}, score {}",
        outcome.assigned_count(),
        outcome.dropped_count(),
        score.total
    );

    let report = RunReport::new(outcome.plan(&problem.roster))
        .with_dropped(outcome.dropped.iter().map(|p| p.name.clone()).collect())
        .with_passes(outcome.passes)
        .with_score(score);

    match output {
        Some(path) => {
            save_report(&report, format, path)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Plan written to {}", path.display());
        }
        None => write_report(&report, format, std::io::stdout().lock())?,
    }
    Ok(())
}

fn run_score(
    config: &StaffingConfig,
    input: &Path,
    plan_path: &Path,
    format: ReportFormat,
) -> Result<bool> {
    let problem =
        load_problem(input).with_context(|| format!("loading problem {}", input.display()))?;
    validate_input(&problem.roster, &problem.projects).map_err(StaffingError::from)?;
    let plan =
        load_plan(plan_path).with_context(|| format!("loading plan {}", plan_path.display()))?;

    let mut roster = problem.roster;
    let staffed = replay(&plan, &mut roster, problem.projects).map_err(StaffingError::from)?;
    let score = config.scorer().score(&staffed, &roster);
    let consistent = score.is_consistent();

    match format {
        ReportFormat::Text => print_score(&score, std::io::stdout().lock())?,
        ReportFormat::Json => {
            let report = RunReport::new(plan).with_score(score);
            write_report(&report, format, std::io::stdout().lock())?;
        }
    }
    Ok(consistent)
}

fn print_score(score: &ScoreReport, mut out: impl Write) -> Result<()> {
    for p in &score.projects {
        write!(
            out,
            "{:<24} start {:>6}  finish {:>6}  score {:>6}",
            p.name, p.start, p.finish, p.contribution
        )?;
        match &p.fault {
            Some(fault) => writeln!(out, "  FAULT: {fault}")?,
            None => writeln!(out)?,
        }
    }
    writeln!(
        out,
        "total {} ({} on time, {} late, makespan {})",
        score.total, score.on_time, score.late, score.makespan
    )?;
    Ok(())
}
