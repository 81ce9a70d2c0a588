//! Budgeted task route planning.
//!
//! Picks and orders a subset of spatially scattered tasks into a single
//! route that maximizes collected value minus travel distance, without
//! exceeding a total time budget.
//!
//! - **Tasks**: an immutable [`TaskPool`](task::TaskPool) of positioned,
//!   valued, timed tasks. The task nearest the origin is the anchor and
//!   is always scheduled.
//! - **Schedules**: a [`Schedule`](schedule::Schedule) keeps the visiting
//!   order, per-edge distances, and the `Travel`/`Task` timeline in sync.
//!   Its move primitives roll back on any budget violation.
//! - **Annealing**: [`AnnealRunner`](anneal::AnnealRunner) searches over
//!   remove/move/add proposals with a geometric temperature ladder and
//!   best-solution tracking.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use u_orienteer::anneal::{AnnealConfig, AnnealRunner};
//! use u_orienteer::random::create_rng;
//! use u_orienteer::schedule::Schedule;
//! use u_orienteer::task::TaskPool;
//!
//! let pool = Arc::new(TaskPool::random(40, &mut create_rng(1)).unwrap());
//! let schedule = Schedule::seed(pool).unwrap();
//! let config = AnnealConfig::default()
//!     .with_iterations_per_temperature(50)
//!     .with_seed(7);
//!
//! let result = AnnealRunner::run(schedule, &config).unwrap();
//! assert!(result.best.total_time() <= result.best.budget());
//! ```

pub mod anneal;
pub mod error;
pub mod random;
pub mod schedule;
pub mod task;

pub use error::{OrienteerError, Result};
