//! Randomized depth-first carve
//!
//! Turns a freshly created [`Grid`] into a perfect maze: the opened
//! passages form a spanning tree over the cells, so every cell is
//! reachable from every other and no route contains a cycle.
//!
//! The traversal is the classic recursive backtracker, run on an explicit
//! stack so grid size is bounded by memory rather than call-stack depth.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};
use crate::maze::grid::{Cell, Direction, Grid};

/// Uniform draws for the carve, abstracted so tests can swap the PRNG for
/// a bounded scripted source.
trait DrawSource {
    /// A uniform value in `[0, bound)`
    fn draw(&mut self, bound: usize) -> Result<usize>;
}

struct RngDraws<'a, R: Rng + ?Sized>(&'a mut R);

impl<R: Rng + ?Sized> DrawSource for RngDraws<'_, R> {
    fn draw(&mut self, bound: usize) -> Result<usize> {
        Ok(self.0.random_range(0..bound))
    }
}

/// Replays a fixed script of draw values, reduced modulo the requested
/// bound. Runs that need more values than the script holds fail with
/// `RandomSourceExhausted`.
struct ScriptedDraws<'a> {
    values: &'a [usize],
    cursor: usize,
}

impl DrawSource for ScriptedDraws<'_> {
    fn draw(&mut self, bound: usize) -> Result<usize> {
        debug_assert!(bound > 0);
        let value = self
            .values
            .get(self.cursor)
            .copied()
            .ok_or(MazeError::RandomSourceExhausted { drawn: self.cursor })?;
        self.cursor += 1;
        Ok(value % bound)
    }
}

/// In-place Fisher-Yates shuffle.
///
/// Walks the slice from the last index down to 1, drawing a uniform index
/// in `[0, i + 1)` and swapping it into position `i`. Given an unbiased
/// source, every permutation of the slice is equally likely.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    shuffle_with(items, &mut RngDraws(rng)).expect("rng draws are infallible");
}

fn shuffle_with<T, S: DrawSource>(items: &mut [T], source: &mut S) -> Result<()> {
    for i in (1..items.len()).rev() {
        let j = source.draw(i + 1)?;
        items.swap(i, j);
    }
    Ok(())
}

/// A pending visit: the cell to enter and the passage leading into it
/// (`None` only for the start cell).
struct Pending {
    cell: Cell,
    entered_via: Option<(Cell, Direction)>,
}

/// Carve a spanning tree of open passages into `grid`.
///
/// Visiting a cell marks it and pushes its in-bounds neighbors in shuffled
/// order; a pending visit whose target was reached first along another
/// route is popped as a no-op without opening its passage. That skip is
/// the backtrack condition of the recursive formulation, so the carve
/// opens exactly one passage per cell beyond the start.
pub fn carve<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Result<()> {
    carve_with(grid, &mut RngDraws(rng))
}

fn carve_with<S: DrawSource>(grid: &mut Grid, source: &mut S) -> Result<()> {
    let start = Cell::new(source.draw(grid.rows())?, source.draw(grid.columns())?);
    let mut stack = vec![Pending {
        cell: start,
        entered_via: None,
    }];

    while let Some(Pending { cell, entered_via }) = stack.pop() {
        if grid.visited(cell)? {
            continue;
        }
        if let Some((from, direction)) = entered_via {
            grid.open_passage(from, cell, direction)?;
        }
        grid.mark_visited(cell)?;

        let mut neighbors: Vec<(Cell, Direction)> = Direction::ALL
            .iter()
            .filter_map(|&direction| grid.neighbor(cell, direction).map(|next| (next, direction)))
            .collect();
        shuffle_with(&mut neighbors, source)?;

        // LIFO stack: push in reverse so the first shuffled neighbor is
        // carved first
        for (next, direction) in neighbors.into_iter().rev() {
            if !grid.visited(next)? {
                stack.push(Pending {
                    cell: next,
                    entered_via: Some((cell, direction)),
                });
            }
        }
    }
    Ok(())
}

/// A finished maze: the carved grid plus the seed that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    seed: Option<u64>,
    grid: Grid,
}

impl Maze {
    /// Carve a `rows x columns` maze from `seed`. The same seed always
    /// produces the same maze.
    pub fn generate(rows: usize, columns: usize, seed: u64) -> Result<Self> {
        let mut grid = Grid::new(rows, columns)?;
        let mut rng = Pcg32::seed_from_u64(seed);
        carve(&mut grid, &mut rng)?;
        log::info!(
            "carved {rows}x{columns} maze from seed {seed}: {} open passages",
            grid.open_passages()
        );
        Ok(Self {
            seed: Some(seed),
            grid,
        })
    }

    /// Carve from an explicit list of draw values instead of a PRNG, for
    /// reproducing exact carve decisions. Fails with
    /// `RandomSourceExhausted` when the script runs out mid-carve.
    pub fn generate_scripted(rows: usize, columns: usize, draws: &[usize]) -> Result<Self> {
        let mut grid = Grid::new(rows, columns)?;
        let mut source = ScriptedDraws {
            values: draws,
            cursor: 0,
        };
        carve_with(&mut grid, &mut source)?;
        Ok(Self { seed: None, grid })
    }

    /// Seed the maze was carved from; `None` for scripted carves
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn columns(&self) -> usize {
        self.grid.columns()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, VecDeque};

    use proptest::prelude::*;

    use super::*;

    /// Cells reachable from (0, 0) through open passages
    fn reachable_cells(grid: &Grid) -> usize {
        let mut seen = vec![false; grid.cell_count()];
        let mut queue = VecDeque::from([Cell::new(0, 0)]);
        seen[0] = true;
        let mut count = 0;
        while let Some(cell) = queue.pop_front() {
            count += 1;
            for direction in Direction::ALL {
                if grid.passage_open(cell, direction).unwrap() {
                    let next = grid.neighbor(cell, direction).unwrap();
                    let index = next.row * grid.columns() + next.column;
                    if !seen[index] {
                        seen[index] = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        count
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut items = vec![1, 2, 3, 4, 5, 6, 7];
        shuffle(&mut items, &mut rng);
        items.sort();
        assert_eq!(items, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_shuffle_single_and_empty() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut empty: Vec<u8> = vec![];
        shuffle(&mut empty, &mut rng);
        let mut one = vec![9];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![9]);
    }

    #[test]
    fn test_shuffle_uniformity_chi_square() {
        // 4! = 24 permutations over 10_000 trials; the chi-square statistic
        // against the uniform expectation has 23 degrees of freedom, so
        // values far above ~50 would mean a biased shuffle.
        const TRIALS: usize = 10_000;
        let mut rng = Pcg32::seed_from_u64(7);
        let mut counts: HashMap<[u8; 4], usize> = HashMap::new();
        for _ in 0..TRIALS {
            let mut items = [0u8, 1, 2, 3];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 24, "every permutation should appear");
        let expected = TRIALS as f64 / 24.0;
        let statistic: f64 = counts
            .values()
            .map(|&n| {
                let delta = n as f64 - expected;
                delta * delta / expected
            })
            .sum();
        assert!(
            statistic < 80.0,
            "chi-square statistic {statistic} too far from uniform"
        );
    }

    #[test]
    fn test_single_cell_maze() {
        let maze = Maze::generate(1, 1, 3).unwrap();
        assert!(maze.grid().all_visited());
        assert_eq!(maze.grid().open_passages(), 0);
    }

    #[test]
    fn test_one_by_two_opens_the_only_passage() {
        // A spanning tree over 2 cells has exactly 1 edge, and the only
        // candidate is the vertical passage between them.
        let maze = Maze::generate(1, 2, 99).unwrap();
        assert!(maze.grid().vertical_open(0, 0).unwrap());
        assert_eq!(maze.grid().open_passages(), 1);
    }

    #[test]
    fn test_two_by_two_spanning_tree() {
        let maze = Maze::generate(2, 2, 5).unwrap();
        assert!(maze.grid().all_visited());
        assert_eq!(maze.grid().open_passages(), 3);
        assert_eq!(reachable_cells(maze.grid()), 4);
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let a = Maze::generate(8, 12, 1234).unwrap();
        let b = Maze::generate(8, 12, 1234).unwrap();
        assert_eq!(a, b);
        let c = Maze::generate(8, 12, 1235).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_large_maze_does_not_overflow() {
        // Deep single-corridor recursion would blow the call stack on a
        // grid this size; the explicit stack keeps it flat.
        let maze = Maze::generate(200, 200, 77).unwrap();
        assert!(maze.grid().all_visited());
        assert_eq!(maze.grid().open_passages(), 200 * 200 - 1);
    }

    #[test]
    fn test_scripted_two_by_two_carve() {
        // Every 2x2 carve consumes exactly 6 draws: 2 for the start cell
        // and 1 per visited cell's two-neighbor shuffle. All-zero draws
        // start at (0,0) and reverse each neighbor pair, giving the route
        // (0,0) -> down -> right -> up and leaving only vertical[0][0]
        // closed.
        let maze = Maze::generate_scripted(2, 2, &[0; 6]).unwrap();
        let grid = maze.grid();
        assert!(grid.all_visited());
        assert_eq!(grid.open_passages(), 3);
        assert!(grid.horizontal_open(0, 0).unwrap());
        assert!(grid.horizontal_open(0, 1).unwrap());
        assert!(grid.vertical_open(1, 0).unwrap());
        assert!(!grid.vertical_open(0, 0).unwrap());
    }

    #[test]
    fn test_scripted_source_exhaustion() {
        assert_eq!(
            Maze::generate_scripted(2, 2, &[0; 5]),
            Err(MazeError::RandomSourceExhausted { drawn: 5 })
        );
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        assert_eq!(
            Maze::generate(0, 10, 1),
            Err(MazeError::InvalidDimensions {
                rows: 0,
                columns: 10
            })
        );
    }

    proptest! {
        #[test]
        fn carve_spans_every_grid(
            rows in 1usize..12,
            columns in 1usize..12,
            seed in any::<u64>(),
        ) {
            let maze = Maze::generate(rows, columns, seed).unwrap();
            prop_assert!(maze.grid().all_visited());
            prop_assert_eq!(maze.grid().open_passages(), rows * columns - 1);
            prop_assert_eq!(reachable_cells(maze.grid()), rows * columns);
        }
    }
}
