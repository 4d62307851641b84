//! Collision geometry derived from the finished wall matrices
//!
//! A pure mapping: every closed passage entry becomes one axis-aligned
//! wall rectangle in world coordinates, the far corner cell gets the goal,
//! the first cell gets the ball spawn. Open entries emit nothing, which is
//! how the carved spanning tree becomes traversable free space.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::maze::grid::{Cell, Grid};
use crate::{cell_center, consts};

/// What a placement represents to the physics/render collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Wall,
    Goal,
    BallStart,
}

/// An axis-aligned rectangle in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: ObstacleKind,
}

/// World-space sizing for one maze
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Cell extent along x
    pub cell_width: f32,
    /// Cell extent along y
    pub cell_height: f32,
    /// Thin axis of every interior wall rectangle
    pub wall_thickness: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            cell_width: consts::DEFAULT_CELL_WIDTH,
            cell_height: consts::DEFAULT_CELL_HEIGHT,
            wall_thickness: consts::WALL_THICKNESS,
        }
    }
}

impl Layout {
    pub fn new(cell_width: f32, cell_height: f32, wall_thickness: f32) -> Self {
        Self {
            cell_width,
            cell_height,
            wall_thickness,
        }
    }

    /// Arena extent along x for a `columns`-wide grid
    pub fn total_width(&self, columns: usize) -> f32 {
        columns as f32 * self.cell_width
    }

    /// Arena extent along y for a `rows`-tall grid
    pub fn total_height(&self, rows: usize) -> f32 {
        rows as f32 * self.cell_height
    }

    /// Radius of the player ball: a quarter of the smaller cell axis
    pub fn ball_radius(&self) -> f32 {
        self.cell_width.min(self.cell_height) / consts::BALL_RADIUS_DIVISOR
    }

    /// Map the wall matrices to obstacle placements: one rectangle per
    /// closed passage entry, then the goal and the ball spawn.
    ///
    /// Deterministic and side-effect free: the same grid and layout always
    /// produce the same list in the same order.
    pub fn placements(&self, grid: &Grid) -> Vec<Placement> {
        let (w, h) = (self.cell_width, self.cell_height);
        let mut out = Vec::new();

        for (row, open_row) in grid.horizontal_rows().enumerate() {
            for (column, &open) in open_row.iter().enumerate() {
                if open {
                    continue;
                }
                out.push(Placement {
                    center: Vec2::new(column as f32 * w + w / 2.0, (row as f32 + 1.0) * h),
                    width: w,
                    height: self.wall_thickness,
                    kind: ObstacleKind::Wall,
                });
            }
        }

        for (row, open_row) in grid.vertical_rows().enumerate() {
            for (column, &open) in open_row.iter().enumerate() {
                if open {
                    continue;
                }
                out.push(Placement {
                    center: Vec2::new((column as f32 + 1.0) * w, row as f32 * h + h / 2.0),
                    width: self.wall_thickness,
                    height: h,
                    kind: ObstacleKind::Wall,
                });
            }
        }

        out.push(self.goal(grid.rows(), grid.columns()));
        out.push(self.ball_start());
        out
    }

    /// Goal rectangle centered in the far corner cell, sized at 70% of one
    /// cell so it scales with the arena
    pub fn goal(&self, rows: usize, columns: usize) -> Placement {
        Placement {
            center: Vec2::new(
                self.total_width(columns) - self.cell_width / 2.0,
                self.total_height(rows) - self.cell_height / 2.0,
            ),
            width: self.cell_width * consts::GOAL_SCALE,
            height: self.cell_height * consts::GOAL_SCALE,
            kind: ObstacleKind::Goal,
        }
    }

    /// Ball spawn centered in the first cell, recorded as the circle's
    /// bounding square (the circle radius is [`Layout::ball_radius`])
    pub fn ball_start(&self) -> Placement {
        let diameter = 2.0 * self.ball_radius();
        Placement {
            center: cell_center(Cell::new(0, 0), self.cell_width, self.cell_height),
            width: diameter,
            height: diameter,
            kind: ObstacleKind::BallStart,
        }
    }

    /// Four static rectangles boxing the arena, one per edge
    pub fn border(&self, rows: usize, columns: usize) -> [Placement; 4] {
        let total_w = self.total_width(columns);
        let total_h = self.total_height(rows);
        let t = consts::BORDER_THICKNESS;
        let edge = |center: Vec2, width: f32, height: f32| Placement {
            center,
            width,
            height,
            kind: ObstacleKind::Wall,
        };
        [
            edge(Vec2::new(total_w / 2.0, 0.0), total_w, t),
            edge(Vec2::new(total_w / 2.0, total_h), total_w, t),
            edge(Vec2::new(0.0, total_h / 2.0), t, total_h),
            edge(Vec2::new(total_w, total_h / 2.0), t, total_h),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::grid::{Cell, Direction};
    use crate::maze::Maze;

    fn layout_100_50() -> Layout {
        Layout::new(100.0, 50.0, 5.0)
    }

    fn walls(placements: &[Placement]) -> Vec<Placement> {
        placements
            .iter()
            .filter(|p| p.kind == ObstacleKind::Wall)
            .copied()
            .collect()
    }

    #[test]
    fn test_closed_horizontal_wall_coordinates() {
        // Untouched 2x2 grid: every passage closed. The horizontal entry
        // [0][1] must land centered between its two cells.
        let grid = Grid::new(2, 2).unwrap();
        let placements = layout_100_50().placements(&grid);
        let expected = Placement {
            center: Vec2::new(150.0, 50.0),
            width: 100.0,
            height: 5.0,
            kind: ObstacleKind::Wall,
        };
        assert!(walls(&placements).contains(&expected));
    }

    #[test]
    fn test_closed_vertical_wall_coordinates() {
        let grid = Grid::new(2, 2).unwrap();
        let placements = layout_100_50().placements(&grid);
        let expected = Placement {
            center: Vec2::new(100.0, 75.0),
            width: 5.0,
            height: 50.0,
            kind: ObstacleKind::Wall,
        };
        assert!(walls(&placements).contains(&expected));
    }

    #[test]
    fn test_open_passages_emit_nothing() {
        let mut grid = Grid::new(1, 2).unwrap();
        grid.open_passage(Cell::new(0, 0), Cell::new(0, 1), Direction::Right)
            .unwrap();
        let placements = layout_100_50().placements(&grid);
        assert!(walls(&placements).is_empty());
        assert_eq!(placements.len(), 2); // goal + ball only
    }

    #[test]
    fn test_wall_count_matches_closed_entries() {
        // 2x2 grid with 3 opened passages leaves 4 - 3 = 1 interior wall.
        let maze = Maze::generate(2, 2, 41).unwrap();
        let placements = layout_100_50().placements(maze.grid());
        assert_eq!(walls(&placements).len(), 1);
    }

    #[test]
    fn test_goal_centers_in_far_corner() {
        let layout = Layout::new(64.0, 48.0, 5.0);
        for (rows, columns) in [(15, 10), (10, 15), (3, 7)] {
            let goal = layout.goal(rows, columns);
            assert_eq!(
                goal.center,
                Vec2::new(
                    layout.total_width(columns) - 32.0,
                    layout.total_height(rows) - 24.0
                )
            );
            assert_eq!(goal.width, 64.0 * 0.7);
            assert_eq!(goal.height, 48.0 * 0.7);
        }
    }

    #[test]
    fn test_ball_start_in_first_cell() {
        let layout = layout_100_50();
        let ball = layout.ball_start();
        assert_eq!(ball.center, Vec2::new(50.0, 25.0));
        assert_eq!(layout.ball_radius(), 12.5);
        assert_eq!(ball.width, 25.0);
        assert_eq!(ball.kind, ObstacleKind::BallStart);
    }

    #[test]
    fn test_mapper_is_pure() {
        let maze = Maze::generate(6, 9, 2024).unwrap();
        let layout = Layout::default();
        assert_eq!(layout.placements(maze.grid()), layout.placements(maze.grid()));
    }

    #[test]
    fn test_border_boxes_the_arena() {
        let border = layout_100_50().border(2, 3);
        assert_eq!(border.len(), 4);
        assert_eq!(border[0].center, Vec2::new(150.0, 0.0));
        assert_eq!(border[1].center, Vec2::new(150.0, 100.0));
        assert_eq!(border[2].center, Vec2::new(0.0, 50.0));
        assert_eq!(border[3].center, Vec2::new(300.0, 50.0));
        assert!(border.iter().all(|p| p.kind == ObstacleKind::Wall));
    }
}
