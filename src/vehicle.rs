use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::command::{Motion, Token, TurnDirection};
use crate::error::{NavError, Result};
use crate::grid::{Cell, Grid};
use crate::heading::Heading;

/// Flat set of blocked coordinates, built once per command string
#[derive(Debug, Clone, Default)]
pub struct ObstacleSet {
    cells: HashSet<(i32, i32)>,
}

impl ObstacleSet {
    pub fn new<I: IntoIterator<Item = (i32, i32)>>(coords: I) -> Self {
        ObstacleSet {
            cells: coords.into_iter().collect(),
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.cells.contains(&(x, y))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<&Grid> for ObstacleSet {
    fn from(grid: &Grid) -> Self {
        ObstacleSet::new(grid.obstacles().iter().map(Cell::coords))
    }
}

/// Vehicle driving on the grid one token at a time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub x: i32,
    pub y: i32,
    pub heading: Heading,
}

/// Outcome of running a command string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriveReport {
    /// Last successfully reached position
    pub x: i32,
    pub y: i32,
    pub heading: Heading,
    /// Why execution halted early, if it did
    pub reason: Option<String>,
    /// Tokens applied, including the one that was blocked
    pub consumed: usize,
    /// Characters that were not commands and were ignored
    pub skipped: Vec<char>,
}

impl DriveReport {
    pub fn stopped(&self) -> bool {
        self.reason.is_some()
    }

    pub fn position(&self) -> Cell {
        Cell::new(self.x, self.y)
    }
}

impl fmt::Display for DriveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}", self.x, self.y, self.heading)?;
        if let Some(reason) = &self.reason {
            write!(f, " {}", reason)?;
        }
        Ok(())
    }
}

impl Vehicle {
    pub fn new(x: i32, y: i32, heading: Heading) -> Self {
        Vehicle { x, y, heading }
    }

    pub fn at(cell: Cell, heading: Heading) -> Self {
        Self::new(cell.x, cell.y, heading)
    }

    pub fn position(&self) -> Cell {
        Cell::new(self.x, self.y)
    }

    /// Quarter turn; never fails
    pub fn turn(&mut self, direction: TurnDirection) {
        self.heading = match direction {
            TurnDirection::Left => self.heading.left(),
            TurnDirection::Right => self.heading.right(),
        };
    }

    /// Turn to face `target` with the fewest quarter turns, returning the tokens applied
    pub fn face(&mut self, target: Heading) -> String {
        let turns = self.heading.correction(target);
        self.heading = target;
        turns
    }

    /// Cell the vehicle would occupy after `motion`, or `None` past the edge of the
    /// coordinate range
    pub fn target(&self, motion: Motion) -> Option<(i32, i32)> {
        let (dx, dy) = self.heading.delta();
        let (dx, dy) = match motion {
            Motion::Forward => (dx, dy),
            Motion::Backward => (-dx, -dy),
        };
        Some((self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// Move one cell forward or back.
    ///
    /// A move onto an obstacle, or off the edge of the coordinate range, fails with
    /// `Stopped` and leaves the vehicle untouched.
    pub fn step(&mut self, motion: Motion, obstacles: &ObstacleSet) -> Result<()> {
        let Some((x, y)) = self.target(motion) else {
            debug!(
                "Edge of coordinate range at ({}, {}) heading {}",
                self.x, self.y, self.heading
            );
            return Err(NavError::Stopped { x: self.x, y: self.y });
        };
        if obstacles.contains(x, y) {
            debug!("Blocked at ({}, {}) heading {}", x, y, self.heading);
            return Err(NavError::Stopped { x, y });
        }
        self.x = x;
        self.y = y;
        Ok(())
    }

    /// Apply a single token
    pub fn apply(&mut self, token: Token, obstacles: &ObstacleSet) -> Result<()> {
        match token {
            Token::Turn(direction) => {
                self.turn(direction);
                Ok(())
            }
            Token::Move(motion) => self.step(motion, obstacles),
        }
    }

    /// Run a command string left to right.
    ///
    /// Tokens are case-insensitive. Characters other than F, B, L and R are skipped
    /// without changing state. The first blocked move ends execution.
    pub fn execute(&mut self, commands: &str, obstacles: &ObstacleSet) -> DriveReport {
        let mut consumed = 0;
        let mut skipped = Vec::new();
        let mut reason = None;

        for c in commands.chars() {
            let Some(token) = Token::from_char(c) else {
                debug!("Skipping unknown command character {:?}", c);
                skipped.push(c);
                continue;
            };
            consumed += 1;
            if let Err(err) = self.apply(token, obstacles) {
                reason = Some(err.to_string());
                break;
            }
        }

        DriveReport {
            x: self.x,
            y: self.y,
            heading: self.heading,
            reason,
            consumed,
            skipped,
        }
    }

    /// Run a command string against a grid's obstacles
    pub fn execute_on(&mut self, commands: &str, grid: &Grid) -> DriveReport {
        let obstacles = ObstacleSet::from(grid);
        self.execute(commands, &obstacles)
    }
}
