//! Schedules: ordered, budgeted routes over a task pool.
//!
//! A [`Schedule`] keeps its visiting order, the cached edge distances,
//! and the derived [`Event`] timeline in sync. The move primitives
//! (`remove_random_task`, `move_random_task`, `add_random_task`,
//! `insert_shortest_distance`) are transactional: on failure the three
//! collections are restored exactly as they were.

mod moves;
mod route;
mod timeline;

#[cfg(test)]
pub(crate) mod fixtures;

pub use route::{Repair, Schedule};
pub use timeline::{Event, DEFAULT_TIME_BUDGET, TRAVEL_TIME_PER_UNIT};
