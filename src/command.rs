use crate::error::{NavError, Result};
use crate::grid::Cell;
use crate::heading::Heading;

/// Turn direction for a single quarter turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    Right,
}

impl std::str::FromStr for TurnDirection {
    type Err = NavError;

    /// Accepts the single letter or the full word in any case
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(TurnDirection::Left),
            "r" | "right" => Ok(TurnDirection::Right),
            _ => Err(NavError::UnknownTurn(s.to_string())),
        }
    }
}

/// Straight-line motion relative to the current heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Forward,
    Backward,
}

/// One command string token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Turn(TurnDirection),
    Move(Motion),
}

impl Token {
    /// Parse a single command character, case-insensitively.
    ///
    /// Returns `None` for characters outside F, B, L, R.
    pub fn from_char(c: char) -> Option<Token> {
        match c.to_ascii_uppercase() {
            'F' => Some(Token::Move(Motion::Forward)),
            'B' => Some(Token::Move(Motion::Backward)),
            'L' => Some(Token::Turn(TurnDirection::Left)),
            'R' => Some(Token::Turn(TurnDirection::Right)),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Token::Move(Motion::Forward) => 'F',
            Token::Move(Motion::Backward) => 'B',
            Token::Turn(TurnDirection::Left) => 'L',
            Token::Turn(TurnDirection::Right) => 'R',
        }
    }
}

/// Heading needed to step from `from` onto the adjacent cell `to`
pub fn required_heading(from: Cell, to: Cell) -> Result<Heading> {
    match (to.x - from.x, to.y - from.y) {
        (1, 0) => Ok(Heading::East),
        (-1, 0) => Ok(Heading::West),
        (0, 1) => Ok(Heading::North),
        (0, -1) => Ok(Heading::South),
        _ => Err(NavError::NonAdjacentCells { from, to }),
    }
}

/// Commands for one step of a path: turns to face `to`, then `F`.
///
/// Returns the heading after the step together with the emitted tokens.
pub fn segment_command(heading: Heading, from: Cell, to: Cell) -> Result<(Heading, String)> {
    let target = required_heading(from, to)?;
    let mut command = heading.correction(target);
    command.push('F');
    Ok((target, command))
}

/// Translate an ordered path of adjacent cells into a command string
pub fn path_to_command(heading: Heading, path: &[Cell]) -> Result<String> {
    let mut command = String::new();
    let mut current = heading;
    for pair in path.windows(2) {
        let (next_heading, segment) = segment_command(current, pair[0], pair[1])?;
        command.push_str(&segment);
        current = next_heading;
    }
    Ok(command)
}
