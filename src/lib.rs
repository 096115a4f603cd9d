pub mod command;
pub mod config;
pub mod error;
pub mod grid;
pub mod heading;
pub mod pathfinding;
pub mod scenario;
pub mod vehicle;

pub use command::{path_to_command, Motion, Token, TurnDirection};
pub use error::{NavError, Result};
pub use grid::{Cell, Grid};
pub use heading::{Heading, TurnCost};
pub use pathfinding::{find_path, Route};
pub use scenario::Scenario;
pub use vehicle::{DriveReport, ObstacleSet, Vehicle};
