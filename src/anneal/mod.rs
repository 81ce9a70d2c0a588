//! Simulated annealing over task schedules.
//!
//! Each temperature round runs a fixed number of proposals. A proposal
//! draws one uniform value, maps it to a [`MoveKind`] through the
//! configured [`MoveWeights`], and retries that move on a copy of the
//! incumbent until it succeeds or the attempt limit is reached. The
//! best schedule seen is kept apart from the incumbent, and the run
//! stops early once it has gone too long without improving.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Tsiligirides (1984), "Heuristic Methods Applied to Orienteering"

mod config;
mod runner;
mod types;

pub use config::{AnnealConfig, MoveWeights};
pub use runner::{AnnealResult, AnnealRunner};
pub use types::{acceptance_probability, AcceptanceRule, HistorySample, MoveKind, Termination};
