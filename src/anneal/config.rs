//! Annealer configuration and move weights.

use super::types::AcceptanceRule;
use crate::error::{OrienteerError, Result};

/// Probabilities of proposing a remove or a move. Whatever is left
/// over (`1 - remove - move`) goes to adding a task.
///
/// Constructed through [`MoveWeights::new`], which rejects weights
/// outside `[0, 1]` and pairs summing past 1.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveWeights {
    remove: f64,
    relocate: f64,
}

impl MoveWeights {
    /// # Errors
    ///
    /// [`OrienteerError::InvalidConfig`] if either weight is outside
    /// `[0, 1]` or their sum exceeds 1.
    pub fn new(remove: f64, relocate: f64) -> Result<Self> {
        let weights = Self { remove, relocate };
        weights.validate()?;
        Ok(weights)
    }

    pub fn remove(&self) -> f64 {
        self.remove
    }

    /// Weight of the "move" proposal.
    pub fn relocate(&self) -> f64 {
        self.relocate
    }

    /// Weight left for the "add" proposal.
    pub fn add(&self) -> f64 {
        1.0 - self.remove - self.relocate
    }

    fn validate(&self) -> Result<()> {
        for (name, w) in [("remove", self.remove), ("move", self.relocate)] {
            if !(0.0..=1.0).contains(&w) {
                return Err(OrienteerError::InvalidConfig(format!(
                    "{name} weight must be in [0, 1], got {w}"
                )));
            }
        }
        if self.remove + self.relocate > 1.0 {
            return Err(OrienteerError::InvalidConfig(format!(
                "remove + move weights must not exceed 1, got {}",
                self.remove + self.relocate
            )));
        }
        Ok(())
    }
}

impl Default for MoveWeights {
    fn default() -> Self {
        Self {
            remove: 0.25,
            relocate: 0.15,
        }
    }
}

/// Configuration for the annealer.
///
/// # Examples
///
/// ```
/// use u_orienteer::anneal::{AnnealConfig, MoveWeights};
///
/// let config = AnnealConfig::default()
///     .with_temperatures(80.0, 0.5)
///     .with_cooling_rate(0.95)
///     .with_iterations_per_temperature(300)
///     .with_weights(MoveWeights::new(0.3, 0.2).unwrap())
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AnnealConfig {
    /// Temperature of the first round.
    pub starting_temperature: f64,

    /// The outer loop runs while the temperature is above this.
    pub final_temperature: f64,

    /// Geometric cooling factor in (0, 1), applied after each round.
    pub cooling_rate: f64,

    /// Inner iterations per temperature round.
    pub iterations_per_temperature: usize,

    /// Retries of the drawn move type before a proposal counts as failed.
    pub max_attempts_per_proposal: usize,

    /// Iterations without a new best after which the search stops early.
    pub diminishing_iterations: usize,

    /// Remove/move/add proposal weights.
    pub weights: MoveWeights,

    /// How non-improving candidates are accepted.
    pub acceptance: AcceptanceRule,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            starting_temperature: 50.0,
            final_temperature: 0.1,
            cooling_rate: 0.90,
            iterations_per_temperature: 500,
            max_attempts_per_proposal: 30,
            diminishing_iterations: 200,
            weights: MoveWeights::default(),
            acceptance: AcceptanceRule::default(),
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_temperatures(mut self, starting: f64, final_temperature: f64) -> Self {
        self.starting_temperature = starting;
        self.final_temperature = final_temperature;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_attempts_per_proposal(mut self, n: usize) -> Self {
        self.max_attempts_per_proposal = n;
        self
    }

    pub fn with_diminishing_iterations(mut self, n: usize) -> Self {
        self.diminishing_iterations = n;
        self
    }

    pub fn with_weights(mut self, weights: MoveWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_acceptance(mut self, rule: AcceptanceRule) -> Self {
        self.acceptance = rule;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(OrienteerError::InvalidConfig(msg)) };

        if !(self.starting_temperature.is_finite() && self.starting_temperature > 0.0) {
            return invalid(format!(
                "starting_temperature must be positive and finite, got {}",
                self.starting_temperature
            ));
        }
        if !(self.final_temperature.is_finite() && self.final_temperature > 0.0) {
            return invalid(format!(
                "final_temperature must be positive and finite, got {}",
                self.final_temperature
            ));
        }
        if self.final_temperature >= self.starting_temperature {
            return invalid("final_temperature must be less than starting_temperature".into());
        }
        if self.cooling_rate <= 0.0 || self.cooling_rate >= 1.0 || self.cooling_rate.is_nan() {
            return invalid(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            ));
        }
        if self.iterations_per_temperature == 0 {
            return invalid("iterations_per_temperature must be positive".into());
        }
        if self.max_attempts_per_proposal == 0 {
            return invalid("max_attempts_per_proposal must be positive".into());
        }
        self.weights.validate()
    }
}
