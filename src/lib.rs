//! Skill-based staffing for the U-Engine ecosystem.
//!
//! Assigns contributors with leveled skills to the roles projects require,
//! with one-level-short contributors allowed in when a qualified mentor is
//! on the same project, then scores the resulting schedule against
//! deadlines.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Skill`, `Role`, `Contributor`, `Roster`,
//!   `Project`, `Plan`
//! - **`matching`**: Contributor-vs-role eligibility (direct or mentored)
//! - **`assigner`**: Staffing of a single project, with skill progression
//! - **`ordering`**: Rules for the initial project order
//! - **`scheduler`**: Fixpoint multi-pass scheduler and deadline-aware scorer
//! - **`replay`**: Rebuilds assignments from a submitted plan
//! - **`validation`**: Input integrity checks (duplicate names, bad durations)
//! - **`io`**: Plain-text problem loader and plan reports
//! - **`config`**: TOML configuration
//!
//! # Example
//!
//! ```
//! use u_staffing::io::parse_problem;
//! use u_staffing::scheduler::{Scheduler, Scorer};
//!
//! let mut problem = parse_problem("\
//! 1 1
//! Anna 1
//! backend 3
//! Api 5 10 5 1
//! backend 3
//! ").unwrap();
//!
//! let outcome = Scheduler::new().schedule_problem(&mut problem);
//! let report = Scorer::new().score(&outcome.assigned, &problem.roster);
//! assert_eq!(report.total, 10);
//! ```
//!
//! # Architecture
//!
//! Everything is single-threaded and synchronous. Contributors live in one
//! `Roster` and are referenced by id, so skill progression from one project
//! is visible to every project evaluated after it.

pub mod assigner;
pub mod config;
pub mod error;
pub mod io;
pub mod matching;
pub mod models;
pub mod ordering;
pub mod replay;
pub mod scheduler;
pub mod validation;

pub use error::{Result, StaffingError};
