//! The immutable universe of candidate tasks.

use super::types::{Task, TaskId};
use crate::error::{OrienteerError, Result};
use rand::Rng;

/// Side length of the square grid used by [`TaskPool::random`].
const GRID_SIZE: u32 = 100;

/// Upper bound (exclusive) for task values drawn by [`TaskPool::random`].
const MAX_RANDOM_VALUE: f64 = 1000.0;

/// Generated once and read-only afterwards. Holds every candidate task
/// and remembers which one is the anchor.
#[derive(Debug, Clone)]
pub struct TaskPool {
    tasks: Vec<Task>,
    anchor: TaskId,
}

impl TaskPool {
    /// Builds a pool and selects its anchor.
    ///
    /// The anchor is the task nearest the origin; on ties the first one
    /// in `tasks` wins. It is marked non-removable, every other task is
    /// marked removable.
    ///
    /// # Errors
    ///
    /// Returns [`OrienteerError::EmptyPool`] if `tasks` is empty.
    pub fn new(mut tasks: Vec<Task>) -> Result<Self> {
        let mut anchor = None;
        let mut nearest = f64::INFINITY;
        for (i, task) in tasks.iter().enumerate() {
            let d = task.position.distance_to_origin();
            if d < nearest {
                nearest = d;
                anchor = Some(i);
            }
        }
        // NaN coordinates never compare less, so fall back to the first task.
        let anchor = match anchor {
            Some(i) => i,
            None if tasks.is_empty() => return Err(OrienteerError::EmptyPool),
            None => 0,
        };

        for (i, task) in tasks.iter_mut().enumerate() {
            task.removable = i != anchor;
        }

        Ok(Self {
            tasks,
            anchor: TaskId(anchor),
        })
    }

    /// Samples `count` tasks on a 100x100 integer grid with values in
    /// `[0, 1000)` and integer durations in `[1, 6)`.
    pub fn random<R: Rng>(count: usize, rng: &mut R) -> Result<Self> {
        let tasks = (0..count)
            .map(|_| {
                Task::new(
                    rng.random_range(0..GRID_SIZE) as f64,
                    rng.random_range(0..GRID_SIZE) as f64,
                    MAX_RANDOM_VALUE * rng.random::<f64>(),
                    rng.random_range(1..6u32) as f64,
                )
            })
            .collect();
        Self::new(tasks)
    }

    /// The non-removable task nearest the origin.
    pub fn anchor(&self) -> TaskId {
        self.anchor
    }

    /// Looks up a task. Panics if `id` does not belong to this pool.
    pub fn get(&self, id: TaskId) -> &Task {
        &self.tasks[id.0]
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Iterates over `(id, task)` pairs in pool order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &Task)> {
        self.tasks.iter().enumerate().map(|(i, t)| (TaskId(i), t))
    }

    /// All task ids in pool order.
    pub fn ids(&self) -> impl Iterator<Item = TaskId> {
        (0..self.tasks.len()).map(TaskId)
    }

    /// Sum of every task's value, scheduled or not.
    pub fn total_value(&self) -> f64 {
        self.tasks.iter().map(|t| t.value).sum()
    }
}
