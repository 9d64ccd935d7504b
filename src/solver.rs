use std::collections::VecDeque;

use crate::grid::{Dir, Grid, Pos};

pub fn is_solvable(grid: &Grid) -> bool {
    bfs_parents(grid, grid.start()).is_some()
}

/// Shortest walk from the start corner to the end corner, both included.
pub fn shortest_path(grid: &Grid) -> Option<Vec<Pos>> {
    path_from(grid, grid.start())
}

pub fn path_from(grid: &Grid, from: Pos) -> Option<Vec<Pos>> {
    let parents = bfs_parents(grid, from)?;
    let cols = grid.cols();
    let mut path = vec![grid.end()];
    let mut cur = grid.end();
    while cur != from {
        cur = parents[cur.r * cols + cur.c]?;
        path.push(cur);
    }
    path.reverse();
    Some(path)
}

/// Breadth-first search over open cells. Returns the parent table once the
/// end is dequeued, `None` if it is unreachable.
fn bfs_parents(grid: &Grid, from: Pos) -> Option<Vec<Option<Pos>>> {
    if grid.is_wall(from) {
        return None;
    }
    let cols = grid.cols();
    let end = grid.end();
    let mut seen = vec![false; grid.rows() * cols];
    let mut parents = vec![None; grid.rows() * cols];
    let mut q = VecDeque::new();
    seen[from.r * cols + from.c] = true;
    q.push_back(from);

    while let Some(pos) = q.pop_front() {
        if pos == end {
            return Some(parents);
        }
        for dir in Dir::ALL {
            let Some(next) = grid.step(pos, dir) else {
                continue;
            };
            let idx = next.r * cols + next.c;
            if seen[idx] || grid.is_wall(next) {
                continue;
            }
            seen[idx] = true;
            parents[idx] = Some(pos);
            q.push_back(next);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(rows: &[&str]) -> Grid {
        let mut grid = Grid::open(rows.len(), rows[0].len());
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                grid.set_wall(Pos::new(r, c), ch == '#');
            }
        }
        grid
    }

    #[test]
    fn open_grid_is_solvable() {
        let grid = Grid::open(4, 4);
        assert!(is_solvable(&grid));
        // Manhattan distance plus the start cell.
        assert_eq!(shortest_path(&grid).map(|p| p.len()), Some(7));
    }

    #[test]
    fn blocked_grid_is_not_solvable() {
        let grid = parse(&["..#", ".#.", "#.."]);
        assert!(!is_solvable(&grid));
        assert_eq!(shortest_path(&grid), None);
    }

    #[test]
    fn path_follows_corridor() {
        let grid = parse(&[".##", "..#", "#.."]);
        let path = shortest_path(&grid).unwrap();
        assert_eq!(
            path,
            vec![
                Pos::new(0, 0),
                Pos::new(1, 0),
                Pos::new(1, 1),
                Pos::new(2, 1),
                Pos::new(2, 2),
            ]
        );
    }

    #[test]
    fn path_from_end_is_single_cell() {
        let grid = Grid::open(3, 3);
        assert_eq!(path_from(&grid, grid.end()), Some(vec![Pos::new(2, 2)]));
    }

    #[test]
    fn walled_start_is_not_solvable() {
        let grid = parse(&["#..", "...", "..."]);
        assert!(!is_solvable(&grid));
    }
}
