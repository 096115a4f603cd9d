//! Plan a route on the grid and drive it
//!
//! Usage:
//!   rover_nav <scenario.json>     run a scenario file
//!   rover_nav --goal <x>,<y>      plan from the vehicle in config.toml to the goal
//!   rover_nav --drive <COMMANDS>  drive the configured vehicle directly

use log::info;
use rover_nav::config::{Config, CONFIG_PATH};
use rover_nav::pathfinding::{find_path, format_path};
use rover_nav::{Cell, Grid, NavError, Route, Scenario};
use std::env;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("rover_nav", String::as_str);

    // Logging has to be up before the config fallback is reported
    let loaded = Config::read_from(CONFIG_PATH);
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level(&loaded)),
    )
    .init();
    let config = Config::or_default(loaded, Path::new(CONFIG_PATH));

    let Some(mode) = args.get(1) else {
        print_usage(program);
        process::exit(1);
    };

    let result = match mode.as_str() {
        "--goal" => match args.get(2).map(|s| parse_cell(s)) {
            Some(Some(goal)) => plan_from_config(&config, goal),
            _ => {
                print_usage(program);
                process::exit(1);
            }
        },
        "--drive" => match args.get(2) {
            Some(commands) => {
                drive_from_config(&config, commands);
                Ok(())
            }
            None => {
                print_usage(program);
                process::exit(1);
            }
        },
        path => run_scenario(path),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Default log filter: the file's `[logging] level`, or the built-in default
fn log_level(loaded: &Result<Config, NavError>) -> String {
    match loaded {
        Ok(config) => config.logging.level.clone(),
        Err(_) => Config::default().logging.level,
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <scenario.json>", program);
    eprintln!("       {} --goal <x>,<y>", program);
    eprintln!("       {} --drive <COMMANDS>", program);
}

fn parse_cell(text: &str) -> Option<Cell> {
    let (x, y) = text.split_once(',')?;
    Some(Cell::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn run_scenario(path: &str) -> Result<(), NavError> {
    let scenario = Scenario::load_from_file(path)?;
    info!("Loaded scenario from {}", path);

    let grid = scenario.build_grid();
    let outcome = scenario.run()?;
    print_route(&grid, &outcome.route, scenario.start_cell(), scenario.goal_cell());
    println!("Drive:    {}", outcome.report);
    if !outcome.reached_goal() {
        eprintln!("Vehicle did not reach the goal");
        process::exit(2);
    }
    Ok(())
}

fn plan_from_config(config: &Config, goal: Cell) -> Result<(), NavError> {
    let grid = config.build_grid();
    let mut vehicle = config.build_vehicle();
    let start = vehicle.position();

    let route = find_path(&grid, start, goal, vehicle.heading)?;
    print_route(&grid, &route, start, goal);

    let report = vehicle.execute_on(&route.commands, &grid);
    println!("Drive:    {}", report);
    Ok(())
}

fn drive_from_config(config: &Config, commands: &str) {
    let grid = config.build_grid();
    let mut vehicle = config.build_vehicle();
    let report = vehicle.execute_on(commands, &grid);
    if !report.skipped.is_empty() {
        info!("Ignored characters: {:?}", report.skipped);
    }
    println!("{}", report);
}

fn print_route(grid: &Grid, route: &Route, start: Cell, goal: Cell) {
    println!("Path:     {}", format_path(&route.path));
    println!("Steps:    {} ({} cells expanded)", route.len(), route.expanded);
    println!("Commands: {}", route.commands);
    println!();
    print!("{}", grid.render(&route.path, start, goal));
    println!();
}
