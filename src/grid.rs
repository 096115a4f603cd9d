use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{PoisonError, RwLock};

/// Offsets of the four axis-aligned neighbours, in search order
const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(0, -1), (-1, 0), (0, 1), (1, 0)];

/// A grid coordinate
///
/// The obstacle flag only records how the cell was created; equality and hashing use x and y alone.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub obstacle: bool,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y, obstacle: false }
    }

    pub fn obstacle(x: i32, y: i32) -> Self {
        Cell { x, y, obstacle: true }
    }

    /// Squared Euclidean distance, used as the search heuristic
    pub fn distance_squared(&self, other: &Cell) -> i128 {
        let dx = i128::from(other.x) - i128::from(self.x);
        let dy = i128::from(other.y) - i128::from(self.y);
        dx * dx + dy * dy
    }

    pub fn manhattan_distance(&self, other: &Cell) -> u64 {
        u64::from(self.x.abs_diff(other.x)) + u64::from(self.y.abs_diff(other.y))
    }

    /// Cell offset by (dx, dy), or `None` past the edge of the coordinate range
    pub fn offset(&self, dx: i32, dy: i32) -> Option<Cell> {
        Some(Cell::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    pub fn coords(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Grid holding point obstacles
///
/// Width and height are advisory: cells outside them are free unless listed as obstacles.
/// Obstacle lookups are memoized; the cache sits behind a lock so a finished grid can be
/// shared between threads.
#[derive(Debug)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    obstacles: Vec<Cell>,
    cache: RwLock<HashMap<Cell, bool>>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: i32, height: i32) -> Self {
        Grid {
            width,
            height,
            obstacles: Vec::new(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Create a grid with the given obstacle coordinates
    pub fn with_obstacles(width: i32, height: i32, obstacles: &[(i32, i32)]) -> Self {
        let mut grid = Self::new(width, height);
        for &(x, y) in obstacles {
            grid.add_obstacle(Cell::obstacle(x, y));
        }
        grid
    }

    /// Add an obstacle.
    ///
    /// The cached answer for this cell is overwritten, so adding after a query stays consistent.
    pub fn add_obstacle(&mut self, cell: Cell) {
        self.obstacles.push(cell);
        self.cache
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(cell, true);
    }

    pub fn obstacles(&self) -> &[Cell] {
        &self.obstacles
    }

    /// Check whether a cell is an obstacle, memoizing the answer
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        if let Some(&blocked) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&cell)
        {
            return blocked;
        }

        let blocked = self.obstacles.iter().any(|o| *o == cell);
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(cell, blocked);
        blocked
    }

    /// Free axis-aligned neighbours in the fixed order (0,-1), (-1,0), (0,1), (1,0).
    ///
    /// Offsets past the edge of the `i32` range are left out.
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| cell.offset(dx, dy))
            .filter(|n| !self.is_obstacle(*n))
            .collect()
    }

    /// Number of memoized lookups
    pub fn cached_len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Draw the grid as text, top row first (y grows upward).
    ///
    /// `S` start, `G` goal, `*` path, `#` obstacle, `.` free.
    pub fn render(&self, path: &[Cell], start: Cell, goal: Cell) -> String {
        let mut result = String::new();
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let cell = Cell::new(x, y);
                let symbol = if cell == start {
                    'S'
                } else if cell == goal {
                    'G'
                } else if path.contains(&cell) {
                    '*'
                } else if self.is_obstacle(cell) {
                    '#'
                } else {
                    '.'
                };
                result.push(symbol);
            }
            result.push('\n');
        }
        result
    }
}
