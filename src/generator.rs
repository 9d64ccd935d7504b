use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::error::MazeError;
use crate::grid::{Grid, Pos};
use crate::settings::{Algorithm, MazeSize, Settings};
use crate::solver::is_solvable;

pub const MAX_ATTEMPTS: u32 = 10_000;

pub fn generate(settings: &Settings, rng: &mut impl Rng) -> Result<Grid, MazeError> {
    let size = settings.maze_size();
    let grid = match settings.algorithm {
        Algorithm::Random => generate_random(size, settings.wall_chance, rng)?,
        Algorithm::Perfect => {
            let mut attempts = 0;
            loop {
                attempts += 1;
                let grid = generate_perfect(size, rng);
                if is_solvable(&grid) {
                    break grid;
                }
                if attempts >= MAX_ATTEMPTS {
                    return Err(MazeError::Unsolvable(attempts));
                }
            }
        }
    };
    info!(
        rows = size.rows,
        cols = size.cols,
        algorithm = %settings.algorithm,
        walls = grid.wall_count(),
        "generated maze"
    );
    Ok(grid)
}

/// Scatters walls independently and retries until the end is reachable.
/// The 2x2 blocks around both corners are never walled.
pub fn generate_random(
    size: MazeSize,
    wall_chance: f64,
    rng: &mut impl Rng,
) -> Result<Grid, MazeError> {
    let MazeSize { rows, cols } = size;
    for attempt in 1..=MAX_ATTEMPTS {
        let mut grid = Grid::open(rows, cols);
        for r in 0..rows {
            for c in 0..cols {
                let near_start = r <= 1 && c <= 1;
                let near_end = r + 2 >= rows && c + 2 >= cols;
                if !near_start && !near_end && rng.gen::<f64>() < wall_chance {
                    grid.set_wall(Pos::new(r, c), true);
                }
            }
        }
        grid.clear_endpoints();

        if is_solvable(&grid) {
            debug!(attempt, "random maze is solvable");
            return Ok(grid);
        }
        debug!(attempt, "random maze unsolvable, retrying");
    }
    Err(MazeError::Unsolvable(MAX_ATTEMPTS))
}

/// Iterative backtracker carving two cells at a time from the top-left
/// corner, so every even-indexed cell ends up connected by exactly one route.
pub fn generate_perfect(size: MazeSize, rng: &mut impl Rng) -> Grid {
    let MazeSize { rows, cols } = size;
    let mut grid = Grid::filled(rows, cols);
    let mut visited = vec![vec![false; cols]; rows];
    let mut stack = vec![Pos::new(0, 0)];
    visited[0][0] = true;

    while let Some(pos) = stack.pop() {
        grid.set_wall(pos, false);

        let (r, c) = (pos.r as isize, pos.c as isize);
        let mut neighbors = [(r - 2, c), (r + 2, c), (r, c - 2), (r, c + 2)];
        neighbors.shuffle(rng);

        for (nr, nc) in neighbors {
            if !grid.in_bounds(nr, nc) {
                continue;
            }
            let next = Pos::new(nr as usize, nc as usize);
            if visited[next.r][next.c] {
                continue;
            }
            visited[next.r][next.c] = true;
            grid.set_wall(Pos::new((pos.r + next.r) / 2, (pos.c + next.c) / 2), false);
            stack.push(next);
        }
    }

    grid.clear_endpoints();
    grid
}
