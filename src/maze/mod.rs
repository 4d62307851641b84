//! Deterministic maze core
//!
//! Everything in this module is pure and deterministic:
//! - Seeded RNG only (a maze is a function of its seed)
//! - Wall matrices are mutated during the carve, then read-only
//! - No rendering or platform dependencies

pub mod carve;
pub mod geometry;
pub mod grid;

pub use carve::{Maze, carve, shuffle};
pub use geometry::{Layout, ObstacleKind, Placement};
pub use grid::{Cell, Direction, Grid};
