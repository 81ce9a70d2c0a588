//! The mutable route: active tasks, per-edge distances, and timeline.

use super::timeline::{Event, DEFAULT_TIME_BUDGET};
use crate::error::{OrienteerError, Result};
use crate::task::{Position, TaskId, TaskPool};
use std::collections::HashSet;
use std::sync::Arc;

/// Absolute tolerance used when comparing cached distances.
const DISTANCE_TOLERANCE: f64 = 1e-9;

/// An ordered route over a subset of a [`TaskPool`].
///
/// Three collections move together:
///
/// - `active`: the visiting order, no repeats, always containing the anchor
/// - `distances`: `distances[i]` is the length of the edge arriving at
///   `active[i]` (from the origin when `i == 0`)
/// - `timeline`: `[Travel, Task, Travel, Task, ...]` derived from the two above
///
/// Every mutation that can violate the time budget saves all three
/// first and puts them back verbatim on failure.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub(super) pool: Arc<TaskPool>,
    pub(super) active: Vec<TaskId>,
    pub(super) distances: Vec<f64>,
    pub(super) timeline: Vec<Event>,
    pub(super) budget: f64,
}

/// Saved copy of a schedule's mutable collections.
#[derive(Debug, Clone)]
pub(super) struct Snapshot {
    active: Vec<TaskId>,
    distances: Vec<f64>,
    timeline: Vec<Event>,
}

/// Outcome of [`Schedule::ensure_consistency`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repair {
    /// Distances and timeline were recomputed and fit the budget.
    WithinBudget,

    /// The recomputed route was over budget. These tasks were active but
    /// missing from the timeline, and were dropped.
    Pruned(Vec<TaskId>),
}

impl Schedule {
    /// Builds the greedy starting route with the default budget.
    pub fn seed(pool: Arc<TaskPool>) -> Result<Self> {
        Self::seed_with_budget(pool, DEFAULT_TIME_BUDGET)
    }

    /// Builds the greedy starting route.
    ///
    /// Starts from the anchor, then walks the pool in order and tries a
    /// shortest-distance insertion of every other task. Tasks that would
    /// push the total time over `budget` are skipped.
    ///
    /// # Errors
    ///
    /// Fails if `budget` is not positive and finite, or if the anchor
    /// alone does not fit.
    pub fn seed_with_budget(pool: Arc<TaskPool>, budget: f64) -> Result<Self> {
        let mut schedule = Self::with_anchor(pool, budget)?;
        let pool = Arc::clone(&schedule.pool);
        let anchor = pool.anchor();
        let mut skipped = 0usize;
        for id in pool.ids().filter(|&id| id != anchor) {
            if !schedule.insert_shortest_distance(id, None) {
                skipped += 1;
            }
        }
        log::debug!(
            "seeded schedule with {} of {} tasks ({} skipped), score {:.3}, time {:.3}",
            schedule.len(),
            pool.len(),
            skipped,
            schedule.score(),
            schedule.total_time()
        );
        Ok(schedule)
    }

    /// A schedule holding only the anchor.
    pub(crate) fn with_anchor(pool: Arc<TaskPool>, budget: f64) -> Result<Self> {
        if !(budget.is_finite() && budget > 0.0) {
            return Err(OrienteerError::InvalidBudget(budget));
        }
        let anchor = pool.anchor();
        let mut schedule = Self {
            pool,
            active: vec![anchor],
            distances: Vec::new(),
            timeline: Vec::new(),
            budget,
        };
        schedule.rebuild_from(0);

        let required = schedule.total_time();
        if required > budget {
            return Err(OrienteerError::AnchorOverBudget { required, budget });
        }
        Ok(schedule)
    }

    /// Net value: `sum(value[i] - distances[i])` over the active tasks.
    pub fn score(&self) -> f64 {
        self.active
            .iter()
            .zip(&self.distances)
            .map(|(&id, d)| self.pool.get(id).value - d)
            .sum()
    }

    /// Sum of every timeline event's duration.
    pub fn total_time(&self) -> f64 {
        self.timeline.iter().map(|e| e.duration(&self.pool)).sum()
    }

    /// Value of every task in the pool, scheduled or not.
    pub fn total_pool_value(&self) -> f64 {
        self.pool.total_value()
    }

    pub fn active_tasks(&self) -> &[TaskId] {
        &self.active
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn timeline(&self) -> &[Event] {
        &self.timeline
    }

    pub fn pool(&self) -> &Arc<TaskPool> {
        &self.pool
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.active.contains(&id)
    }

    /// Number of scheduled tasks.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Checks every structural invariant: anchor present, no repeats,
    /// distances and timeline in sync with the visiting order, and the
    /// total time within budget.
    pub fn is_consistent(&self) -> bool {
        if !self.contains(self.pool.anchor()) {
            return false;
        }
        let mut seen = HashSet::with_capacity(self.active.len());
        if !self
            .active
            .iter()
            .all(|id| id.index() < self.pool.len() && seen.insert(*id))
        {
            return false;
        }
        if self.distances.len() != self.active.len()
            || self.timeline.len() != 2 * self.active.len()
        {
            return false;
        }

        let mut from = Position::ORIGIN;
        for (i, &id) in self.active.iter().enumerate() {
            let here = self.pool.get(id).position;
            let expected = from.distance(&here);
            if (self.distances[i] - expected).abs() > DISTANCE_TOLERANCE {
                return false;
            }
            match self.timeline[2 * i] {
                Event::Travel { distance } if (distance - expected).abs() <= DISTANCE_TOLERANCE => {}
                _ => return false,
            }
            if self.timeline[2 * i + 1] != Event::Task(id) {
                return false;
            }
            from = here;
        }

        self.total_time() <= self.budget
    }

    /// Recomputes distances and timeline from scratch.
    ///
    /// If the recomputed route no longer fits the budget, the pre-repair
    /// state is restored instead and only the tasks that were active but
    /// absent from its timeline are dropped. Tasks the timeline already
    /// accounted for are never removed.
    pub fn ensure_consistency(&mut self) -> Repair {
        let scheduled: HashSet<TaskId> = self.timeline.iter().filter_map(Event::task).collect();
        let orphaned: Vec<TaskId> = self
            .active
            .iter()
            .copied()
            .filter(|id| !scheduled.contains(id) && self.pool.get(*id).removable)
            .collect();

        let before = self.snapshot();
        self.rebuild_from(0);
        if self.total_time() <= self.budget {
            return Repair::WithinBudget;
        }

        self.restore(before);
        self.active.retain(|id| !orphaned.contains(id));
        self.rebuild_from(0);
        if self.total_time() > self.budget {
            log::warn!(
                "repaired schedule still over budget: {:.3} > {:.3}",
                self.total_time(),
                self.budget
            );
        }
        log::debug!("repair dropped {} orphaned tasks", orphaned.len());
        Repair::Pruned(orphaned)
    }

    /// Recomputes `distances` and `timeline` for `active[start..]`.
    ///
    /// Entries before `start` are kept as they are.
    pub(super) fn rebuild_from(&mut self, start: usize) {
        let start = start.min(self.active.len());
        self.distances.truncate(start);
        self.timeline.truncate(2 * start);

        let mut from = match start {
            0 => Position::ORIGIN,
            i => self.pool.get(self.active[i - 1]).position,
        };
        for &id in &self.active[start..] {
            let here = self.pool.get(id).position;
            let distance = from.distance(&here);
            self.distances.push(distance);
            self.timeline.push(Event::travel(distance));
            self.timeline.push(Event::Task(id));
            from = here;
        }
    }

    pub(super) fn snapshot(&self) -> Snapshot {
        Snapshot {
            active: self.active.clone(),
            distances: self.distances.clone(),
            timeline: self.timeline.clone(),
        }
    }

    pub(super) fn restore(&mut self, snapshot: Snapshot) {
        self.active = snapshot.active;
        self.distances = snapshot.distances;
        self.timeline = snapshot.timeline;
    }

    pub(super) fn over_budget(&self) -> bool {
        self.total_time() > self.budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::fixtures::{five_task_pool, ids};

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_seed_inserts_by_nearest_neighbor() {
        let schedule = Schedule::seed(five_task_pool()).unwrap();

        assert_eq!(schedule.active_tasks(), ids(&[0, 2, 1, 3, 4]).as_slice());
        let expected = [1.0, 1.0, 20f64.sqrt(), 52f64.sqrt(), 4100f64.sqrt()];
        for (got, want) in schedule.distances().iter().zip(expected) {
            assert_close(*got, want);
        }
        assert!(schedule.is_consistent());
    }

    #[test]
    fn test_seed_skips_tasks_over_budget() {
        let schedule = Schedule::seed_with_budget(five_task_pool(), 50.0).unwrap();
        assert_eq!(schedule.active_tasks(), ids(&[0, 2, 1, 3]).as_slice());
        assert!(schedule.total_time() <= 50.0);
        assert!(schedule.is_consistent());
    }

    #[test]
    fn test_seed_rejects_bad_budget() {
        assert_eq!(
            Schedule::seed_with_budget(five_task_pool(), 0.0).unwrap_err(),
            OrienteerError::InvalidBudget(0.0)
        );
        assert!(Schedule::seed_with_budget(five_task_pool(), f64::NAN).is_err());
    }

    #[test]
    fn test_seed_rejects_anchor_over_budget() {
        // Anchor needs 1.5 (travel) + 1.0 (task).
        let err = Schedule::seed_with_budget(five_task_pool(), 2.0).unwrap_err();
        assert_eq!(
            err,
            OrienteerError::AnchorOverBudget {
                required: 2.5,
                budget: 2.0
            }
        );
    }

    #[test]
    fn test_score_and_total_time() {
        let schedule = Schedule::seed(five_task_pool()).unwrap();
        let travelled = 1.0 + 1.0 + 20f64.sqrt() + 52f64.sqrt() + 4100f64.sqrt();

        assert_close(schedule.score(), 165.0 - travelled);
        assert_close(schedule.total_time(), travelled * 1.5 + 12.0);
        assert_close(schedule.total_pool_value(), 165.0);
    }

    #[test]
    fn test_timeline_alternates() {
        let schedule = Schedule::seed(five_task_pool()).unwrap();
        for (i, event) in schedule.timeline().iter().enumerate() {
            match event {
                Event::Travel { .. } => assert_eq!(i % 2, 0),
                Event::Task(id) => assert_eq!(*id, schedule.active_tasks()[i / 2]),
            }
        }
    }

    #[test]
    fn test_ensure_consistency_fixes_corrupted_distances() {
        let mut schedule = Schedule::seed(five_task_pool()).unwrap();
        let clean = schedule.distances().to_vec();
        schedule.distances[1] = 99.0;
        schedule.distances[3] = -4.0;
        assert!(!schedule.is_consistent());

        assert_eq!(schedule.ensure_consistency(), Repair::WithinBudget);
        assert_eq!(schedule.distances(), clean.as_slice());
        assert!(schedule.is_consistent());
    }

    #[test]
    fn test_ensure_consistency_keeps_orphan_that_fits() {
        let mut schedule = Schedule::with_anchor(five_task_pool(), 1000.0).unwrap();
        schedule.active.push(TaskId(2));

        assert_eq!(schedule.ensure_consistency(), Repair::WithinBudget);
        assert_eq!(schedule.active_tasks(), ids(&[0, 2]).as_slice());
        assert!(schedule.is_consistent());
    }

    #[test]
    fn test_ensure_consistency_prunes_only_orphans() {
        let mut schedule = Schedule::seed_with_budget(five_task_pool(), 50.0).unwrap();
        let scheduled = schedule.active_tasks().to_vec();
        schedule.active.push(TaskId(4));
        schedule.distances.push(0.0);

        assert_eq!(schedule.ensure_consistency(), Repair::Pruned(vec![TaskId(4)]));
        assert_eq!(schedule.active_tasks(), scheduled.as_slice());
        assert!(schedule.total_time() <= 50.0);
        assert!(schedule.is_consistent());
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut schedule = Schedule::seed(five_task_pool()).unwrap();
        let saved = schedule.snapshot();
        let (active, distances, timeline) = (
            schedule.active.clone(),
            schedule.distances.clone(),
            schedule.timeline.clone(),
        );

        schedule.active.truncate(1);
        schedule.rebuild_from(0);
        schedule.restore(saved);

        assert_eq!(schedule.active, active);
        assert_eq!(schedule.distances, distances);
        assert_eq!(schedule.timeline, timeline);
    }
}
