use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::grid::{Cell, Grid};
use crate::heading::Heading;
use crate::pathfinding::{find_path, Route};
use crate::vehicle::{DriveReport, Vehicle};

/// One planning run: a grid, a start pose and a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub width: i32,
    pub height: i32,
    /// Obstacle coordinates
    #[serde(default)]
    pub obstacles: Vec<(i32, i32)>,
    pub start: (i32, i32),
    pub goal: (i32, i32),
    pub heading: Heading,
}

/// Result of planning a scenario and driving the plan
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub route: Route,
    pub report: DriveReport,
}

impl ScenarioOutcome {
    /// Whether the vehicle finished on the goal without being stopped
    pub fn reached_goal(&self) -> bool {
        !self.report.stopped() && self.route.path.last() == Some(&self.report.position())
    }
}

impl Scenario {
    /// Load from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn build_grid(&self) -> Grid {
        Grid::with_obstacles(self.width, self.height, &self.obstacles)
    }

    pub fn start_cell(&self) -> Cell {
        Cell::from(self.start)
    }

    pub fn goal_cell(&self) -> Cell {
        Cell::from(self.goal)
    }

    /// Plan a route from start to goal
    pub fn plan(&self) -> Result<Route> {
        find_path(&self.build_grid(), self.start_cell(), self.goal_cell(), self.heading)
    }

    /// Plan a route and drive a fresh vehicle along its commands
    pub fn run(&self) -> Result<ScenarioOutcome> {
        let grid = self.build_grid();
        let route = find_path(&grid, self.start_cell(), self.goal_cell(), self.heading)?;
        let mut vehicle = Vehicle::at(self.start_cell(), self.heading);
        let report = vehicle.execute_on(&route.commands, &grid);
        Ok(ScenarioOutcome { route, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> Scenario {
        Scenario {
            width: 5,
            height: 5,
            obstacles: vec![(3, 3), (1, 4), (2, 4), (3, 1)],
            start: (2, 1),
            goal: (3, 4),
            heading: Heading::South,
        }
    }

    #[test]
    fn test_parse_json() {
        let scenario = Scenario::from_json(
            r#"{
                "width": 5,
                "height": 5,
                "obstacles": [[3, 3], [1, 4], [2, 4], [3, 1]],
                "start": [2, 1],
                "goal": [3, 4],
                "heading": "SOUTH"
            }"#,
        )
        .unwrap();
        assert_eq!(scenario, reference());
    }

    #[test]
    fn test_obstacles_optional() {
        let scenario = Scenario::from_json(
            r#"{"width": 3, "height": 3, "start": [0, 0], "goal": [2, 2], "heading": "EAST"}"#,
        )
        .unwrap();
        assert!(scenario.obstacles.is_empty());
    }

    #[test]
    fn test_run_reaches_goal() {
        let outcome = reference().run().unwrap();
        assert_eq!(outcome.route.commands, "LLFRFFLFFLF");
        assert!(outcome.reached_goal());
        assert_eq!(outcome.report.to_string(), "(3, 4) WEST");
    }

    #[test]
    fn test_unreachable_scenario() {
        let mut scenario = reference();
        scenario.goal = (3, 3);
        assert!(scenario.run().is_err());
    }
}
