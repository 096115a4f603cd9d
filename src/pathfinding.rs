use crate::command::path_to_command;
use crate::error::{NavError, Result};
use crate::grid::{Cell, Grid};
use crate::heading::Heading;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// A planned route and the commands that drive it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Turn/forward tokens for a vehicle starting at the first cell
    pub commands: String,
    /// Cells from start to goal, both included
    pub path: Vec<Cell>,
    /// Cells finalized by the search
    pub expanded: usize,
}

impl Route {
    /// Number of unit moves along the path
    pub fn len(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An entry in the open set
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    cell: Cell,
    f_score: i128,
    /// Admission counter, breaks f-score ties in favour of the earliest admitted cell
    seq: u64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score && self.seq == other.seq
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Rectangle the search may enter.
///
/// It covers the grid's nominal bounds, the start, the goal and every obstacle, plus a
/// one-cell ring around all of them. The ring is always free, so any route that exists
/// on the open plane also exists inside the region, and an unreachable goal still ends
/// the search once the region is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SearchRegion {
    min_x: i64,
    min_y: i64,
    max_x: i64,
    max_y: i64,
}

impl SearchRegion {
    fn new(grid: &Grid, start: Cell, goal: Cell) -> Self {
        // Widened to i64 so the ring fits past the edge of the i32 range
        let mut region = SearchRegion {
            min_x: i64::from(start.x.min(goal.x).min(0)),
            min_y: i64::from(start.y.min(goal.y).min(0)),
            max_x: i64::from(start.x.max(goal.x)).max(i64::from(grid.width) - 1),
            max_y: i64::from(start.y.max(goal.y)).max(i64::from(grid.height) - 1),
        };
        for o in grid.obstacles() {
            region.min_x = region.min_x.min(i64::from(o.x));
            region.min_y = region.min_y.min(i64::from(o.y));
            region.max_x = region.max_x.max(i64::from(o.x));
            region.max_y = region.max_y.max(i64::from(o.y));
        }
        region.min_x -= 1;
        region.min_y -= 1;
        region.max_x += 1;
        region.max_y += 1;
        region
    }

    fn contains(&self, cell: Cell) -> bool {
        let (x, y) = (i64::from(cell.x), i64::from(cell.y));
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Find a route from `start` to `goal` and translate it into commands for a vehicle
/// facing `heading`.
///
/// Best-first search ordered by g + squared Euclidean distance to the goal. Cells with
/// equal scores are expanded in the order they were (re)admitted to the open set, which
/// keeps the resulting command string reproducible.
pub fn find_path(grid: &Grid, start: Cell, goal: Cell, heading: Heading) -> Result<Route> {
    trace!("[find_path] start={} goal={} heading={}", start, goal, heading);

    let region = SearchRegion::new(grid, start, goal);
    let mut open_set = BinaryHeap::new();
    let mut closed_set: HashSet<Cell> = HashSet::new();
    let mut came_from: HashMap<Cell, Cell> = HashMap::new();
    let mut g_scores: HashMap<Cell, i128> = HashMap::new();
    let mut seq = 0u64;

    open_set.push(OpenNode {
        cell: start,
        f_score: 0,
        seq,
    });
    g_scores.insert(start, 0);

    while let Some(current) = open_set.pop() {
        // Superseded entry for a cell already finalized
        if !closed_set.insert(current.cell) {
            continue;
        }

        if current.cell == goal {
            let path = reconstruct_path(&came_from, goal);
            debug!(
                "[find_path] FOUND PATH: {} steps after expanding {} cells",
                path.len() - 1,
                closed_set.len()
            );
            let commands = path_to_command(heading, &path)?;
            return Ok(Route {
                commands,
                path,
                expanded: closed_set.len(),
            });
        }

        let current_g = g_scores.get(&current.cell).copied().unwrap_or_default();

        for neighbor in grid.neighbors(current.cell) {
            if closed_set.contains(&neighbor) || !region.contains(neighbor) {
                continue;
            }

            let tentative_g = current_g + 1;
            let improves = g_scores
                .get(&neighbor)
                .map_or(true, |&known| tentative_g < known);

            if improves {
                seq += 1;
                came_from.insert(neighbor, current.cell);
                g_scores.insert(neighbor, tentative_g);
                open_set.push(OpenNode {
                    cell: neighbor,
                    f_score: tentative_g + neighbor.distance_squared(&goal),
                    seq,
                });
            }
        }
    }

    debug!(
        "[find_path] NO PATH FOUND after expanding {} cells",
        closed_set.len()
    );
    Err(NavError::PathNotFound { start, goal })
}

/// Follow back-pointers from `goal` to the start and return the path start-first
fn reconstruct_path(came_from: &HashMap<Cell, Cell>, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

/// Format path for display
pub fn format_path(path: &[Cell]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    path.iter()
        .map(|c| format!("({},{})", c.x, c.y))
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_grid() -> Grid {
        Grid::with_obstacles(5, 5, &[(3, 3), (1, 4), (2, 4), (3, 1)])
    }

    #[test]
    fn test_reference_route() {
        let grid = reference_grid();
        let route = find_path(&grid, Cell::new(2, 1), Cell::new(3, 4), Heading::South).unwrap();
        assert_eq!(route.commands, "LLFRFFLFFLF");
        let expected: Vec<Cell> = [(2, 1), (2, 2), (3, 2), (4, 2), (4, 3), (4, 4), (3, 4)]
            .iter()
            .map(|&c| Cell::from(c))
            .collect();
        assert_eq!(route.path, expected);
        assert_eq!(route.len(), 6);
    }

    #[test]
    fn test_start_is_goal() {
        let grid = reference_grid();
        let route = find_path(&grid, Cell::new(0, 0), Cell::new(0, 0), Heading::East).unwrap();
        assert_eq!(route.path, vec![Cell::new(0, 0)]);
        assert_eq!(route.commands, "");
        assert!(route.is_empty());
    }

    #[test]
    fn test_straight_line() {
        let grid = Grid::new(10, 10);
        let route = find_path(&grid, Cell::new(1, 1), Cell::new(1, 6), Heading::North).unwrap();
        assert_eq!(route.commands, "FFFFF");
        assert_eq!(route.len(), 5);
    }

    #[test]
    fn test_enclosed_goal() {
        let grid = Grid::with_obstacles(5, 5, &[(2, 1), (1, 2), (2, 3), (3, 2)]);
        let result = find_path(&grid, Cell::new(0, 0), Cell::new(2, 2), Heading::North);
        match result {
            Err(NavError::PathNotFound { start, goal }) => {
                assert_eq!(start, Cell::new(0, 0));
                assert_eq!(goal, Cell::new(2, 2));
            }
            other => panic!("expected PathNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_goal_is_obstacle() {
        let grid = reference_grid();
        let result = find_path(&grid, Cell::new(0, 0), Cell::new(3, 3), Heading::North);
        assert!(matches!(result, Err(NavError::PathNotFound { .. })));
    }

    #[test]
    fn test_detour_outside_nominal_bounds() {
        // Wall across the whole grid width forces a detour through x = -1 or x = 3
        let grid = Grid::with_obstacles(3, 3, &[(0, 1), (1, 1), (2, 1)]);
        let route = find_path(&grid, Cell::new(1, 0), Cell::new(1, 2), Heading::North).unwrap();
        assert_eq!(route.len(), 6);
        assert!(route.path.iter().all(|c| !grid.is_obstacle(*c)));
    }

    #[test]
    fn test_start_is_goal_at_coordinate_edge() {
        let grid = Grid::new(5, 5);
        let corner = Cell::new(i32::MAX, 0);
        let route = find_path(&grid, corner, corner, Heading::North).unwrap();
        assert_eq!(route.path, vec![corner]);
        assert_eq!(route.commands, "");
    }

    #[test]
    fn test_route_along_coordinate_edge() {
        let grid = Grid::with_obstacles(5, 5, &[(i32::MAX - 1, i32::MIN)]);
        let start = Cell::new(i32::MAX - 2, i32::MIN);
        let goal = Cell::new(i32::MAX, i32::MIN);
        let route = find_path(&grid, start, goal, Heading::East).unwrap();
        // The row below i32::MIN does not exist, so the detour goes up
        assert_eq!(route.len(), 4);
        assert_eq!(route.commands, "LFRFFRF");
    }

    #[test]
    fn test_search_region() {
        let grid = Grid::with_obstacles(3, 3, &[(7, -2)]);
        let region = SearchRegion::new(&grid, Cell::new(1, 1), Cell::new(-4, 2));
        assert_eq!(
            region,
            SearchRegion {
                min_x: -5,
                min_y: -3,
                max_x: 8,
                max_y: 3
            }
        );
        assert!(region.contains(Cell::new(-5, 3)));
        assert!(!region.contains(Cell::new(9, 0)));
    }

    #[test]
    fn test_open_node_ordering() {
        let mut heap = BinaryHeap::new();
        heap.push(OpenNode { cell: Cell::new(0, 0), f_score: 5, seq: 1 });
        heap.push(OpenNode { cell: Cell::new(1, 0), f_score: 3, seq: 3 });
        heap.push(OpenNode { cell: Cell::new(2, 0), f_score: 3, seq: 2 });
        assert_eq!(heap.pop().unwrap().cell, Cell::new(2, 0));
        assert_eq!(heap.pop().unwrap().cell, Cell::new(1, 0));
        assert_eq!(heap.pop().unwrap().cell, Cell::new(0, 0));
    }

    #[test]
    fn test_format_path() {
        assert_eq!(format_path(&[]), "No path");
        assert_eq!(
            format_path(&[Cell::new(0, 0), Cell::new(1, 0)]),
            "(0,0) -> (1,0)"
        );
    }
}
