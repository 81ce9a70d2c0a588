//! Move kinds, acceptance rules, and run records.

use super::config::MoveWeights;
use crate::schedule::Schedule;
use rand::Rng;

/// The three structural changes a proposal can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Remove,
    Move,
    Add,
}

impl MoveKind {
    /// Maps one uniform draw in `[0, 1)` onto a move kind.
    ///
    /// The unit interval is split as `[0, remove]` → `Remove`,
    /// `(remove, remove + move]` → `Move`, and the rest → `Add`.
    pub fn select(draw: f64, weights: &MoveWeights) -> Self {
        let remove_bound = weights.remove();
        let move_bound = remove_bound + weights.relocate();
        if draw <= remove_bound {
            MoveKind::Remove
        } else if draw <= move_bound {
            MoveKind::Move
        } else {
            MoveKind::Add
        }
    }

    /// Applies the matching move primitive to `schedule`.
    pub fn apply<R: Rng>(self, schedule: &mut Schedule, rng: &mut R) -> bool {
        match self {
            MoveKind::Remove => schedule.remove_random_task(rng),
            MoveKind::Move => schedule.move_random_task(rng),
            MoveKind::Add => schedule.add_random_task(rng),
        }
    }
}

/// How a candidate that does not beat the incumbent may still be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcceptanceRule {
    /// `min(1, exp(|Δ| / T))`.
    ///
    /// The exponent is never negative, so this always evaluates to 1:
    /// every successful proposal is accepted and the search is driven
    /// by best-tracking alone.
    #[default]
    Literal,

    /// The Metropolis criterion `exp(-|Δ| / T)`.
    Metropolis,
}

impl AcceptanceRule {
    /// Probability of accepting `candidate` over `incumbent` at `temperature`.
    pub fn probability(self, candidate: f64, incumbent: f64, temperature: f64) -> f64 {
        match self {
            AcceptanceRule::Literal => acceptance_probability(candidate, incumbent, temperature),
            AcceptanceRule::Metropolis => {
                let delta = (candidate - incumbent).abs();
                (-delta / temperature).exp().min(1.0)
            }
        }
    }
}

/// `min(1, exp(|first - second| / temperature))`.
pub fn acceptance_probability(first: f64, second: f64, temperature: f64) -> f64 {
    let rate = (first - second).abs() / temperature;
    rate.exp().min(1.0)
}

/// One point of the incumbent's trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistorySample {
    pub score: f64,
    pub total_time: f64,
}

impl HistorySample {
    pub fn of(schedule: &Schedule) -> Self {
        Self {
            score: schedule.score(),
            total_time: schedule.total_time(),
        }
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// The temperature fell to the final temperature.
    Cooled,

    /// Too many iterations passed without a new best.
    Stagnated,
}
