//! Maze Roll - carve a maze, roll a ball to the goal
//!
//! Core modules:
//! - `maze`: Deterministic maze core (grid model, carve algorithm,
//!   collision geometry)
//! - `session`: Glue between the core and an external physics/render
//!   engine
//! - `settings`: Data-driven run configuration
//! - `error`: Crate-wide error and result types

pub mod error;
pub mod maze;
pub mod session;
pub mod settings;

pub use error::{MazeError, Result};
pub use maze::{Cell, Direction, Grid, Layout, Maze, ObstacleKind, Placement};
pub use session::{BodyTag, KeyBindings, Phase, PhysicsWorld, Session};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default arena: 10 rows of 15 columns
    pub const DEFAULT_ROWS: usize = 10;
    pub const DEFAULT_COLUMNS: usize = 15;

    /// Default cell size in world units (pixels for a browser collaborator)
    pub const DEFAULT_CELL_WIDTH: f32 = 40.0;
    pub const DEFAULT_CELL_HEIGHT: f32 = 40.0;

    /// Thin axis of every interior wall rectangle
    pub const WALL_THICKNESS: f32 = 5.0;
    /// Thin axis of the four arena border rectangles
    pub const BORDER_THICKNESS: f32 = 2.0;

    /// Goal rectangle size as a fraction of one cell
    pub const GOAL_SCALE: f32 = 0.7;
    /// Ball radius is `min(cell_width, cell_height) / BALL_RADIUS_DIVISOR`
    pub const BALL_RADIUS_DIVISOR: f32 = 4.0;

    /// Velocity delta added per directional key press
    pub const IMPULSE_SPEED: f32 = 5.0;
    /// Downward gravity restored when the goal is reached
    pub const WIN_GRAVITY_Y: f32 = 1.0;
}

/// Center of a cell in world coordinates
#[inline]
pub fn cell_center(cell: Cell, cell_width: f32, cell_height: f32) -> Vec2 {
    Vec2::new(
        cell.column as f32 * cell_width + cell_width / 2.0,
        cell.row as f32 * cell_height + cell_height / 2.0,
    )
}
