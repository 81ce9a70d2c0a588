//! Shared pools for schedule and annealer tests.

use crate::task::{Task, TaskId, TaskPool};
use std::sync::Arc;

/// Five tasks with hand-checkable geometry.
///
/// | id | position | value | duration |
/// |----|----------|-------|----------|
/// | 0  | (1, 0)   | 10    | 1        |
/// | 1  | (4, 4)   | 20    | 2        |
/// | 2  | (2, 0)   | 5     | 1        |
/// | 3  | (10, 0)  | 30    | 3        |
/// | 4  | (50, 50) | 100   | 5        |
///
/// Task 0 is the anchor.
pub(crate) fn five_task_pool() -> Arc<TaskPool> {
    Arc::new(
        TaskPool::new(vec![
            Task::new(1.0, 0.0, 10.0, 1.0),
            Task::new(4.0, 4.0, 20.0, 2.0),
            Task::new(2.0, 0.0, 5.0, 1.0),
            Task::new(10.0, 0.0, 30.0, 3.0),
            Task::new(50.0, 50.0, 100.0, 5.0),
        ])
        .unwrap(),
    )
}

/// A pool holding only its anchor.
pub(crate) fn anchor_only_pool() -> Arc<TaskPool> {
    Arc::new(TaskPool::new(vec![Task::new(3.0, 4.0, 7.0, 2.0)]).unwrap())
}

pub(crate) fn ids(raw: &[usize]) -> Vec<TaskId> {
    raw.iter().copied().map(TaskId).collect()
}
