//! Move primitives: remove, move, and add one task.
//!
//! Each primitive reports success as a `bool`. A `false` return always
//! means the schedule is exactly as it was before the call.

use super::route::Schedule;
use crate::task::TaskId;
use rand::Rng;

impl Schedule {
    /// Removes a uniformly chosen active task.
    ///
    /// Returns `false` without touching the schedule when the choice
    /// lands on the anchor.
    pub fn remove_random_task<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.active.is_empty() {
            return false;
        }
        let index = rng.random_range(0..self.active.len());
        if !self.pool.get(self.active[index]).removable {
            return false;
        }

        let before = self.snapshot();
        self.active.remove(index);
        self.rebuild_from(index.saturating_sub(1));
        // Dropping a stop cannot lengthen a Euclidean route, but rounding can.
        if self.over_budget() {
            self.restore(before);
            return false;
        }
        true
    }

    /// Takes a uniformly chosen active task out and re-inserts it next
    /// to its nearest remaining neighbor.
    ///
    /// If the new position breaks the budget, the route is restored to
    /// its pre-move state and `false` is returned.
    pub fn move_random_task<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.active.is_empty() {
            return false;
        }
        let before = self.snapshot();
        let index = rng.random_range(0..self.active.len());
        let id = self.active.remove(index);
        // Everything from `index` on is recomputed by the insertion.
        self.distances.truncate(index);
        self.timeline.truncate(2 * index);

        if self.insert_shortest_distance(id, Some(index)) {
            true
        } else {
            log::trace!("move of {id:?} from {index} rolled back");
            self.restore(before);
            false
        }
    }

    /// Inserts a uniformly chosen task that is not yet scheduled.
    ///
    /// Returns `false` when every pool task is already active or the
    /// chosen one does not fit.
    pub fn add_random_task<R: Rng>(&mut self, rng: &mut R) -> bool {
        let candidates: Vec<TaskId> = self.pool.ids().filter(|&id| !self.contains(id)).collect();
        if candidates.is_empty() {
            return false;
        }
        let id = candidates[rng.random_range(0..candidates.len())];
        self.insert_shortest_distance(id, None)
    }

    /// Inserts `task` right after the active task nearest to it.
    ///
    /// Ties go to the earliest task in visiting order. Distances and
    /// timeline are recomputed from the insertion point, or from `hint`
    /// when that is earlier (a move passes the index it removed from).
    ///
    /// Returns `false` and leaves the schedule untouched if `task` is
    /// already active or if the result would exceed the time budget.
    pub fn insert_shortest_distance(&mut self, task: TaskId, hint: Option<usize>) -> bool {
        if self.contains(task) {
            return false;
        }
        let before = self.snapshot();

        let target = self.pool.get(task).position;
        let mut nearest = None;
        let mut nearest_distance = f64::INFINITY;
        for (i, &id) in self.active.iter().enumerate() {
            let d = self.pool.get(id).position.distance(&target);
            if d < nearest_distance {
                nearest_distance = d;
                nearest = Some(i);
            }
        }

        let at = nearest.map_or(0, |i| i + 1);
        self.active.insert(at, task);
        self.rebuild_from(hint.map_or(at, |h| h.min(at)));

        if self.over_budget() {
            log::trace!(
                "insert of {task:?} at {at} rolled back: {:.3} > {:.3}",
                self.total_time(),
                self.budget
            );
            self.restore(before);
            return false;
        }
        true
    }
}
