use thiserror::Error;

use crate::grid::Cell;

/// Errors produced by planning, translating and driving.
#[derive(Debug, Error)]
pub enum NavError {
    /// The search frontier ran dry before the goal was reached.
    #[error("could not reach goal {goal} from {start}")]
    PathNotFound { start: Cell, goal: Cell },

    /// Two consecutive path cells are not axis-aligned neighbours.
    #[error("cells {from} and {to} are not neighbours")]
    NonAdjacentCells { from: Cell, to: Cell },

    /// A move would have landed on the obstacle at (x, y), or left the coordinate range
    /// from (x, y).
    #[error("STOPPED")]
    Stopped { x: i32, y: i32 },

    #[error("unknown heading: {0}")]
    UnknownHeading(String),

    #[error("unknown turn direction: {0}")]
    UnknownTurn(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, NavError>;
