//! Tasks and the task pool.
//!
//! A [`TaskPool`] is the fixed universe a plan draws from. Schedules
//! refer to its tasks by [`TaskId`] and never mutate it.

mod pool;
mod types;

pub use pool::TaskPool;
pub use types::{Position, Task, TaskId};
