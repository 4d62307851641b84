//! Maze Roll entry point
//!
//! Carves a maze and prints an ASCII preview plus, with `--json`, the
//! placement list a physics/render collaborator would install. The game
//! loop itself lives with that collaborator; this binary is the headless
//! equivalent of the browser page.
//!
//! Usage: `maze-roll [rows columns [seed]] [--json]`

use std::env;
use std::path::Path;
use std::process;

use maze_roll::maze::{Maze, ObstacleKind};
use maze_roll::Settings;

const SETTINGS_FILE: &str = "maze-roll.json";

fn main() {
    env_logger::init();

    let mut settings = Settings::load(Path::new(SETTINGS_FILE));
    let json = match apply_args(&mut settings) {
        Ok(json) => json,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: maze-roll [rows columns [seed]] [--json]");
            process::exit(2);
        }
    };
    if let Err(err) = settings.validate() {
        eprintln!("invalid settings: {err}");
        process::exit(2);
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    let maze = match Maze::generate(settings.rows, settings.columns, seed) {
        Ok(maze) => maze,
        Err(err) => {
            eprintln!("maze generation failed: {err}");
            process::exit(1);
        }
    };

    println!("seed {seed}");
    print!("{}", ascii_preview(&maze));

    let layout = settings.layout();
    let mut placements = layout.border(maze.rows(), maze.columns()).to_vec();
    placements.extend(layout.placements(maze.grid()));
    let wall_count = placements
        .iter()
        .filter(|p| p.kind == ObstacleKind::Wall)
        .count();
    log::info!(
        "{} placements ({wall_count} wall rectangles, ball radius {})",
        placements.len(),
        layout.ball_radius()
    );

    if json {
        match serde_json::to_string_pretty(&placements) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                eprintln!("could not serialize placements: {err}");
                process::exit(1);
            }
        }
    }
}

/// Fold command-line overrides into the settings. Returns whether the
/// placement list should be dumped as JSON.
fn apply_args(settings: &mut Settings) -> Result<bool, String> {
    let mut json = false;
    let mut positional = Vec::new();
    for arg in env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            positional.push(arg);
        }
    }
    match positional.len() {
        0 => {}
        2 | 3 => {
            settings.rows = parse(&positional[0], "rows")?;
            settings.columns = parse(&positional[1], "columns")?;
            if let Some(seed) = positional.get(2) {
                settings.seed = Some(parse(seed, "seed")?);
            }
        }
        _ => return Err("expected rows and columns together".into()),
    }
    Ok(json)
}

fn parse<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("could not parse {name} from {value:?}"))
}

/// Walk the wall matrices into the usual +--+ box drawing
fn ascii_preview(maze: &Maze) -> String {
    let grid = maze.grid();
    let horizontal: Vec<&[bool]> = grid.horizontal_rows().collect();
    let vertical: Vec<&[bool]> = grid.vertical_rows().collect();

    let mut out = String::new();
    out.push('+');
    for _ in 0..grid.columns() {
        out.push_str("--+");
    }
    out.push('\n');
    for row in 0..grid.rows() {
        out.push('|');
        for column in 0..grid.columns() {
            out.push_str("  ");
            let open = column + 1 < grid.columns() && vertical[row][column];
            out.push(if open { ' ' } else { '|' });
        }
        out.push('\n');
        out.push('+');
        for column in 0..grid.columns() {
            let open = row + 1 < grid.rows() && horizontal[row][column];
            out.push_str(if open { "  " } else { "--" });
            out.push('+');
        }
        out.push('\n');
    }
    out
}
