//! Annealing loop.

use super::config::AnnealConfig;
use super::types::{HistorySample, MoveKind, Termination};
use crate::error::Result;
use crate::random::rng_from_seed;
use crate::schedule::Schedule;
use rand::Rng;

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult {
    /// The best schedule found.
    pub best: Schedule,

    /// Score of the best schedule.
    pub best_score: f64,

    /// Inner iterations executed, failed proposals included.
    pub iterations: usize,

    /// Proposals whose move type failed on every attempt.
    pub failed_proposals: usize,

    /// Candidates that replaced the incumbent.
    pub accepted_moves: usize,

    /// Candidates that strictly beat the incumbent.
    pub improving_moves: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Whether the run cooled down or stopped on stagnation.
    pub termination: Termination,

    /// `(score, total_time)` of the incumbent, starting with the seed and
    /// appended only when the incumbent's score changes.
    pub history: Vec<HistorySample>,
}

/// Executes the annealing search over a [`Schedule`].
pub struct AnnealRunner;

impl AnnealRunner {
    /// Runs the search with an RNG seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` is invalid.
    pub fn run(schedule: Schedule, config: &AnnealConfig) -> Result<AnnealResult> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(schedule, config, &mut rng)
    }

    /// Runs the search with a caller-supplied RNG. `config.seed` is ignored.
    ///
    /// Each inner iteration proposes one move on a copy of the incumbent.
    /// A candidate that beats the incumbent is always taken, any other is
    /// taken with the configured acceptance probability. After every
    /// temperature round the incumbent and the best schedule are repaired
    /// and the temperature is multiplied by the cooling rate.
    pub fn run_with_rng<R: Rng>(
        schedule: Schedule,
        config: &AnnealConfig,
        rng: &mut R,
    ) -> Result<AnnealResult> {
        config.validate()?;

        let mut incumbent = schedule;
        let mut incumbent_score = incumbent.score();
        let mut best = incumbent.clone();
        let mut best_score = incumbent_score;

        let mut temperature = config.starting_temperature;
        let mut iterations = 0usize;
        let mut failed_proposals = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut since_best = 0usize;

        let mut history = vec![HistorySample::of(&incumbent)];

        while temperature > config.final_temperature {
            for _ in 0..config.iterations_per_temperature {
                iterations += 1;

                match propose(&incumbent, config, rng) {
                    None => {
                        failed_proposals += 1;
                        since_best += 1;
                    }
                    Some(candidate) => {
                        let candidate_score = candidate.score();
                        let accept = if candidate_score > incumbent_score {
                            improving_moves += 1;
                            true
                        } else {
                            let p = config.acceptance.probability(
                                candidate_score,
                                incumbent_score,
                                temperature,
                            );
                            rng.random::<f64>() < p
                        };

                        if accept {
                            incumbent = candidate;
                            incumbent_score = candidate_score;
                            accepted_moves += 1;
                        }

                        if accept && incumbent_score > best_score {
                            best = incumbent.clone();
                            best_score = incumbent_score;
                            since_best = 0;
                        } else {
                            since_best += 1;
                        }

                        if history.last().is_none_or(|s| s.score != incumbent_score) {
                            history.push(HistorySample::of(&incumbent));
                        }
                    }
                }

                if since_best > config.diminishing_iterations {
                    log::info!(
                        "stopping after {iterations} iterations without improvement for {since_best}, best score {best_score:.3}"
                    );
                    return Ok(AnnealResult {
                        best,
                        best_score,
                        iterations,
                        failed_proposals,
                        accepted_moves,
                        improving_moves,
                        final_temperature: temperature,
                        termination: Termination::Stagnated,
                        history,
                    });
                }
            }

            incumbent.ensure_consistency();
            incumbent_score = incumbent.score();
            best.ensure_consistency();
            best_score = best.score();

            log::debug!(
                "T={temperature:.4} incumbent={incumbent_score:.3} best={best_score:.3} tasks={}",
                best.len()
            );
            temperature *= config.cooling_rate;
        }

        best.ensure_consistency();
        best_score = best.score();
        log::info!("cooled after {iterations} iterations, best score {best_score:.3}");

        Ok(AnnealResult {
            best,
            best_score,
            iterations,
            failed_proposals,
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
            termination: Termination::Cooled,
            history,
        })
    }
}

/// Draws one move kind and retries it on a copy of `incumbent` until it
/// succeeds or the attempts run out.
fn propose<R: Rng>(incumbent: &Schedule, config: &AnnealConfig, rng: &mut R) -> Option<Schedule> {
    let kind = MoveKind::select(rng.random::<f64>(), &config.weights);
    let mut candidate = incumbent.clone();
    // A failed primitive leaves the candidate untouched, so one copy serves every attempt.
    for _ in 0..config.max_attempts_per_proposal {
        if kind.apply(&mut candidate, rng) {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anneal::{AcceptanceRule, MoveWeights};
    use crate::error::OrienteerError;
    use crate::random::create_rng;
    use crate::schedule::fixtures::{anchor_only_pool, five_task_pool};
    use crate::task::TaskPool;
    use std::sync::Arc;

    fn quick_config() -> AnnealConfig {
        AnnealConfig::default()
            .with_temperatures(10.0, 1.0)
            .with_cooling_rate(0.5)
            .with_iterations_per_temperature(20)
            .with_diminishing_iterations(usize::MAX)
    }

    #[test]
    fn test_cooled_run_counts_rounds() {
        let schedule = Schedule::seed(five_task_pool()).unwrap();
        let result = AnnealRunner::run_with_rng(schedule, &quick_config(), &mut create_rng(1)).unwrap();

        // 10, 5, 2.5, 1.25 are above 1.0: four rounds.
        assert_eq!(result.termination, Termination::Cooled);
        assert_eq!(result.iterations, 80);
        assert!((result.final_temperature - 0.625).abs() < 1e-12);
    }

    #[test]
    fn test_best_is_consistent_and_not_worse_than_seed() {
        let pool = Arc::new(TaskPool::random(30, &mut create_rng(3)).unwrap());
        let schedule = Schedule::seed(pool).unwrap();
        let seed_score = schedule.score();

        let config = AnnealConfig::default()
            .with_iterations_per_temperature(100)
            .with_seed(8);
        let result = AnnealRunner::run(schedule, &config).unwrap();

        assert!(result.best.is_consistent());
        assert!(result.best.total_time() <= result.best.budget());
        assert!(result.best_score >= seed_score);
        assert!((result.best_score - result.best.score()).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = AnnealConfig::default()
            .with_iterations_per_temperature(50)
            .with_seed(42);

        let a = AnnealRunner::run(Schedule::seed(five_task_pool()).unwrap(), &config).unwrap();
        let b = AnnealRunner::run(Schedule::seed(five_task_pool()).unwrap(), &config).unwrap();

        assert_eq!(a.best_score, b.best_score);
        assert_eq!(a.best.total_time(), b.best.total_time());
        assert_eq!(a.best.active_tasks(), b.best.active_tasks());
        assert_eq!(a.history, b.history);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_stagnation_stops_early() {
        let config = AnnealConfig::default()
            .with_iterations_per_temperature(1000)
            .with_diminishing_iterations(5)
            .with_seed(4);
        let result = AnnealRunner::run(Schedule::seed(five_task_pool()).unwrap(), &config).unwrap();

        assert_eq!(result.termination, Termination::Stagnated);
        assert!(result.final_temperature > config.final_temperature);
        assert!(result.best.is_consistent());
    }

    #[test]
    fn test_history_records_only_changes() {
        let pool = Arc::new(TaskPool::random(25, &mut create_rng(12)).unwrap());
        let schedule = Schedule::seed(pool).unwrap();
        let seed_sample = HistorySample::of(&schedule);

        let result = AnnealRunner::run_with_rng(schedule, &quick_config(), &mut create_rng(6)).unwrap();

        assert_eq!(result.history[0], seed_sample);
        for pair in result.history.windows(2) {
            assert_ne!(pair[0].score, pair[1].score);
        }
        assert!(result.history.len() <= result.accepted_moves + 1);
    }

    #[test]
    fn test_anchor_only_pool_fails_every_proposal_but_add() {
        // Removing fails on the anchor, adding has nothing left to add.
        let weights = MoveWeights::new(0.5, 0.0).unwrap();
        let config = quick_config().with_weights(weights);
        let schedule = Schedule::seed(anchor_only_pool()).unwrap();

        let result = AnnealRunner::run_with_rng(schedule, &config, &mut create_rng(2)).unwrap();

        assert_eq!(result.failed_proposals, result.iterations);
        assert_eq!(result.accepted_moves, 0);
        assert_eq!(result.history.len(), 1);
        assert_eq!(result.best.len(), 1);
    }

    #[test]
    fn test_metropolis_rule_runs() {
        let pool = Arc::new(TaskPool::random(20, &mut create_rng(21)).unwrap());
        let config = quick_config().with_acceptance(AcceptanceRule::Metropolis);
        let result =
            AnnealRunner::run_with_rng(Schedule::seed(pool).unwrap(), &config, &mut create_rng(5))
                .unwrap();
        assert!(result.best.is_consistent());
        assert!(result.accepted_moves <= result.iterations);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnnealConfig::default().with_cooling_rate(1.5);
        let err = AnnealRunner::run(Schedule::seed(five_task_pool()).unwrap(), &config).unwrap_err();
        assert!(matches!(err, OrienteerError::InvalidConfig(_)));
    }
}
