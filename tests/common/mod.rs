use rover_nav::{Cell, Grid, Heading, ObstacleSet, Route, Vehicle};

/// Build cells from coordinate pairs
#[allow(dead_code)]
pub fn cells(coords: &[(i32, i32)]) -> Vec<Cell> {
    coords.iter().map(|&c| Cell::from(c)).collect()
}

/// Grid from the path-planning reference test
#[allow(dead_code)]
pub fn reference_grid() -> Grid {
    Grid::with_obstacles(5, 5, &[(3, 3), (1, 4), (2, 4), (3, 1)])
}

/// Every consecutive pair differs by exactly one unit on exactly one axis
#[allow(dead_code)]
pub fn assert_adjacent(path: &[Cell]) {
    for pair in path.windows(2) {
        let dx = (pair[1].x - pair[0].x).abs();
        let dy = (pair[1].y - pair[0].y).abs();
        assert_eq!(dx + dy, 1, "{} and {} are not adjacent", pair[0], pair[1]);
    }
}

/// Drive a fresh vehicle over a route's commands and check it ends on the goal
#[allow(dead_code)]
pub fn assert_route_drivable(grid: &Grid, route: &Route, heading: Heading) {
    let start = route.path[0];
    let goal = *route.path.last().unwrap();
    let mut vehicle = Vehicle::at(start, heading);
    let report = vehicle.execute(&route.commands, &ObstacleSet::from(grid));
    assert!(!report.stopped(), "vehicle stopped: {}", report);
    assert_eq!(report.position(), goal, "commands {}", route.commands);
}

/// Visualize a path on a grid
#[allow(dead_code)]
pub fn visualize_path(grid: &Grid, route: &Route) -> String {
    let start = route.path[0];
    let goal = *route.path.last().unwrap();
    format!(
        "\nCommands: {}\nLength: {} steps\n\n{}",
        route.commands,
        route.len(),
        grid.render(&route.path, start, goal)
    )
}

/// Unique temp file path for a test
#[allow(dead_code)]
pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("rover_nav_{}_{}", std::process::id(), name))
}
