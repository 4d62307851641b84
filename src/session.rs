//! Session glue between the maze core and an external physics engine
//!
//! The engine itself (integration, rendering, the event loop) is a
//! collaborator behind the [`PhysicsWorld`] trait. The session owns the
//! thin layer on top: installing the generated geometry, turning bound
//! key presses into velocity impulses, and flipping to the won state
//! exactly once when the ball reaches the goal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts;
use crate::maze::grid::Direction;
use crate::maze::{Layout, Maze, ObstacleKind, Placement};

/// Key identifiers bound to each roll direction, in UI `KeyboardEvent.code`
/// style. Defaults to WASD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub up: String,
    pub right: String,
    pub down: String,
    pub left: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: "KeyW".into(),
            right: "KeyD".into(),
            down: "KeyS".into(),
            left: "KeyA".into(),
        }
    }
}

impl KeyBindings {
    /// The direction bound to `key`, if any
    pub fn direction_for(&self, key: &str) -> Option<Direction> {
        if key == self.up {
            Some(Direction::Up)
        } else if key == self.right {
            Some(Direction::Right)
        } else if key == self.down {
            Some(Direction::Down)
        } else if key == self.left {
            Some(Direction::Left)
        } else {
            None
        }
    }
}

/// Tag the collaborator attaches to bodies and reports contacts with.
/// Border rectangles stay [`BodyTag::Border`] so the win effect releases
/// only the maze interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyTag {
    Ball,
    Goal,
    Wall,
    Border,
}

/// Phase of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Steering the ball toward the goal
    Rolling,
    /// Goal reached; the maze has been released
    Won,
}

/// Required surface of the external physics/render collaborator
pub trait PhysicsWorld {
    /// Add a static rectangular body
    fn add_static_rect(&mut self, placement: &Placement, tag: BodyTag);
    /// Add the dynamic player ball
    fn add_ball(&mut self, center: Vec2, radius: f32);
    /// Current ball velocity
    fn ball_velocity(&self) -> Vec2;
    /// Replace the ball velocity
    fn set_ball_velocity(&mut self, velocity: Vec2);
    /// World gravity (zeroed while rolling, restored on win)
    fn set_gravity(&mut self, gravity: Vec2);
    /// Drop the static constraint from every body tagged [`BodyTag::Wall`]
    fn release_walls(&mut self);
}

/// One playthrough of one maze
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    bindings: KeyBindings,
    impulse_speed: f32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(KeyBindings::default(), consts::IMPULSE_SPEED)
    }
}

impl Session {
    pub fn new(bindings: KeyBindings, impulse_speed: f32) -> Self {
        Self {
            phase: Phase::Rolling,
            bindings,
            impulse_speed,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn won(&self) -> bool {
        self.phase == Phase::Won
    }

    /// Install a generated maze into the world: gravity off, border and
    /// walls and goal static, ball dynamic in the first cell.
    pub fn install<W: PhysicsWorld>(&self, maze: &Maze, layout: &Layout, world: &mut W) {
        world.set_gravity(Vec2::ZERO);
        for placement in layout.border(maze.rows(), maze.columns()) {
            world.add_static_rect(&placement, BodyTag::Border);
        }
        for placement in layout.placements(maze.grid()) {
            match placement.kind {
                ObstacleKind::Wall => world.add_static_rect(&placement, BodyTag::Wall),
                ObstacleKind::Goal => world.add_static_rect(&placement, BodyTag::Goal),
                ObstacleKind::BallStart => world.add_ball(placement.center, layout.ball_radius()),
            }
        }
        log::debug!(
            "installed {}x{} maze into world",
            maze.rows(),
            maze.columns()
        );
    }

    /// A key went down. Adds a fixed-magnitude velocity delta along the
    /// bound direction; unbound keys and presses after the win are ignored.
    /// Returns the direction applied, if any.
    pub fn handle_key<W: PhysicsWorld>(&self, key: &str, world: &mut W) -> Option<Direction> {
        if self.phase == Phase::Won {
            return None;
        }
        let direction = self.bindings.direction_for(key)?;
        let velocity = world.ball_velocity() + direction.as_vec2() * self.impulse_speed;
        world.set_ball_velocity(velocity);
        Some(direction)
    }

    /// The collaborator reported a contact between two tagged bodies.
    ///
    /// A ball/goal pair (in either order) ends the run: gravity comes back
    /// and the maze walls lose their static constraint so the maze falls
    /// apart. The transition fires exactly once; every contact reported
    /// while already won is a no-op. Returns whether this contact won.
    pub fn notify_contact<W: PhysicsWorld>(&mut self, a: BodyTag, b: BodyTag, world: &mut W) -> bool {
        if self.phase == Phase::Won {
            return false;
        }
        let is_win = matches!(
            (a, b),
            (BodyTag::Ball, BodyTag::Goal) | (BodyTag::Goal, BodyTag::Ball)
        );
        if !is_win {
            return false;
        }
        self.phase = Phase::Won;
        world.set_gravity(Vec2::new(0.0, consts::WIN_GRAVITY_Y));
        world.release_walls();
        log::info!("goal reached, releasing the maze");
        true
    }

    /// Back to a fresh rolling phase. The collaborator is expected to
    /// reinstall bodies for the next maze.
    pub fn reset(&mut self) {
        self.phase = Phase::Rolling;
    }
}
