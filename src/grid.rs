use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub r: usize,
    pub c: usize,
}

impl Pos {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Neighbour order used by the search: right, down, left, up.
    pub const ALL: [Dir; 4] = [Dir::Right, Dir::Down, Dir::Left, Dir::Up];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }
}

/// Row-major wall flags. `true` means the cell is a wall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    walls: Vec<bool>,
}

impl Grid {
    pub fn open(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            walls: vec![false; rows * cols],
        }
    }

    pub fn filled(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            walls: vec![true; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Pos {
        Pos::new(0, 0)
    }

    pub fn end(&self) -> Pos {
        Pos::new(self.rows - 1, self.cols - 1)
    }

    pub fn in_bounds(&self, r: isize, c: isize) -> bool {
        r >= 0 && c >= 0 && (r as usize) < self.rows && (c as usize) < self.cols
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.walls[pos.r * self.cols + pos.c]
    }

    pub fn set_wall(&mut self, pos: Pos, wall: bool) {
        self.walls[pos.r * self.cols + pos.c] = wall;
    }

    /// Opens both corners the player travels between.
    pub fn clear_endpoints(&mut self) {
        let (start, end) = (self.start(), self.end());
        self.set_wall(start, false);
        self.set_wall(end, false);
    }

    pub fn step(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let r = pos.r as isize + dr;
        let c = pos.c as isize + dc;
        if !self.in_bounds(r, c) {
            return None;
        }
        Some(Pos::new(r as usize, c as usize))
    }

    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|w| **w).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            let line: String = (0..self.cols)
                .map(|c| if self.is_wall(Pos::new(r, c)) { '#' } else { '.' })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
