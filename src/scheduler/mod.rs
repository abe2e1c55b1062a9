//! Multi-pass scheduler and schedule scoring.
//!
//! # Algorithm
//!
//! `Scheduler` repeatedly sweeps the projects not yet staffed, assigning
//! every project whose roles can currently be filled, until a sweep makes
//! no progress. It is greedy, not optimal.
//!
//! # Scoring
//!
//! `Scorer` replays the staffed projects in assignment order, serializing
//! work of shared contributors, and credits each project its score minus
//! its lateness. It also checks the recorded assignment for consistency.

mod passes;
mod score;

pub use passes::{ScheduleOutcome, Scheduler};
pub use score::{check_assignment, AssignmentFault, FaultPolicy, ProjectScore, ScoreReport, Scorer};
