//! Task records and planar positions.

/// A point on the plane. The collector starts at the origin `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// The collector's starting point.
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Euclidean distance to the origin.
    pub fn distance_to_origin(&self) -> f64 {
        self.distance(&Self::ORIGIN)
    }
}

/// Index of a task inside its [`TaskPool`](super::TaskPool).
///
/// Tasks are identified by their slot, not by their contents: two
/// tasks with identical fields are still different tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskId(pub usize);

impl TaskId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A schedulable unit: a place to visit, a reward for visiting it, and
/// the time spent there.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    /// Where the task is performed.
    pub position: Position,

    /// Reward collected when the task is scheduled.
    pub value: f64,

    /// Time units spent performing the task.
    pub duration: f64,

    /// `false` only for the anchor task, which every schedule keeps.
    pub removable: bool,

    /// Set by renderers while stepping through a finished plan. The
    /// planner never reads it.
    pub collected: bool,
}

impl Task {
    /// Creates a removable, not yet collected task.
    pub fn new(x: f64, y: f64, value: f64, duration: f64) -> Self {
        Self {
            position: Position::new(x, y),
            value,
            duration,
            removable: true,
            collected: false,
        }
    }

    /// Euclidean distance between two tasks.
    pub fn distance(&self, other: &Task) -> f64 {
        self.position.distance(&other.position)
    }
}
