//! Timeline events.

use crate::task::{TaskId, TaskPool};

/// Time units needed to cover one unit of distance.
pub const TRAVEL_TIME_PER_UNIT: f64 = 1.5;

/// Default total time a schedule may use.
pub const DEFAULT_TIME_BUDGET: f64 = 1000.0;

/// One entry of a schedule's timeline.
///
/// A timeline always alternates `Travel, Task, Travel, Task, ...`,
/// starting with the leg from the origin to the first task.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// Transit between two consecutive positions.
    Travel { distance: f64 },

    /// Performing a task.
    Task(TaskId),
}

impl Event {
    /// Creates the travel leg covering `distance`.
    pub fn travel(distance: f64) -> Self {
        Event::Travel { distance }
    }

    /// How long the event lasts.
    pub fn duration(&self, pool: &TaskPool) -> f64 {
        match *self {
            Event::Travel { distance } => distance * TRAVEL_TIME_PER_UNIT,
            Event::Task(id) => pool.get(id).duration,
        }
    }

    /// The task performed by this event, if any.
    pub fn task(&self) -> Option<TaskId> {
        match *self {
            Event::Task(id) => Some(id),
            Event::Travel { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    #[test]
    fn test_travel_duration_scales_distance() {
        let pool = TaskPool::new(vec![Task::new(1.0, 1.0, 1.0, 4.0)]).unwrap();
        assert!((Event::travel(10.0).duration(&pool) - 15.0).abs() < 1e-12);
        assert!((Event::Task(TaskId(0)).duration(&pool) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_event_task_accessor() {
        assert_eq!(Event::Task(TaskId(3)).task(), Some(TaskId(3)));
        assert_eq!(Event::travel(2.0).task(), None);
    }
}
