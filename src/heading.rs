use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NavError;

/// Cardinal direction the vehicle faces
///
/// Right turns cycle NORTH -> EAST -> SOUTH -> WEST -> NORTH, left turns the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Heading {
    North,
    East,
    South,
    West,
}

/// Headings in right-turn order
const CYCLE: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

/// Number of single turns needed in each direction to reach a heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnCost {
    pub left: u8,
    pub right: u8,
}

impl Heading {
    pub const ALL: [Heading; 4] = CYCLE;

    fn index(self) -> usize {
        match self {
            Heading::North => 0,
            Heading::East => 1,
            Heading::South => 2,
            Heading::West => 3,
        }
    }

    pub fn right(self) -> Heading {
        CYCLE[(self.index() + 1) % 4]
    }

    pub fn left(self) -> Heading {
        CYCLE[(self.index() + 3) % 4]
    }

    /// Unit step (dx, dy) taken when moving forward with this heading
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::North => (0, 1),
            Heading::East => (1, 0),
            Heading::South => (0, -1),
            Heading::West => (-1, 0),
        }
    }

    /// Count the turns to `target` going left and going right.
    ///
    /// Both counts are zero when already facing `target`, otherwise they sum to 4.
    pub fn turn_cost(self, target: Heading) -> TurnCost {
        if self == target {
            return TurnCost::default();
        }

        let mut cost = TurnCost::default();

        let mut current = self;
        while current != target {
            current = current.left();
            cost.left += 1;
        }

        let mut current = self;
        while current != target {
            current = current.right();
            cost.right += 1;
        }

        cost
    }

    /// Minimal turn tokens that bring this heading round to `target`.
    ///
    /// Ties go to the left.
    pub fn correction(self, target: Heading) -> String {
        let cost = self.turn_cost(target);
        if cost.left == 0 && cost.right == 0 {
            String::new()
        } else if cost.left <= cost.right {
            "L".repeat(cost.left as usize)
        } else {
            "R".repeat(cost.right as usize)
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Heading::North => "NORTH",
            Heading::East => "EAST",
            Heading::South => "SOUTH",
            Heading::West => "WEST",
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Heading {
    type Err = NavError;

    /// Only the exact upper-case names are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORTH" => Ok(Heading::North),
            "EAST" => Ok(Heading::East),
            "SOUTH" => Ok(Heading::South),
            "WEST" => Ok(Heading::West),
            other => Err(NavError::UnknownHeading(other.to_string())),
        }
    }
}
