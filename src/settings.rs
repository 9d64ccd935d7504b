use std::fmt;

use clap::ValueEnum;

use crate::error::MazeError;

pub const DEFAULT_WALL_CHANCE: f64 = 0.2;

/// Terminal coordinates are u16: two rows go to the HUD and footer, and every
/// cell takes two columns.
pub const MAX_ROWS: usize = u16::MAX as usize - 2;
pub const MAX_COLS: usize = u16::MAX as usize / 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn side(self) -> usize {
        match self {
            Difficulty::Easy => 11,
            Difficulty::Medium => 21,
            Difficulty::Hard => 31,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Recursive backtracker, exactly one route between any two cells
    Perfect,
    /// Independent random walls, regenerated until solvable
    Random,
}

impl Algorithm {
    pub fn toggled(self) -> Self {
        match self {
            Algorithm::Perfect => Algorithm::Random,
            Algorithm::Random => Algorithm::Perfect,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Perfect => "perfect",
            Algorithm::Random => "random",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeSize {
    pub rows: usize,
    pub cols: usize,
}

impl MazeSize {
    /// Even dimensions are bumped to the next odd value so the backtracker's
    /// two-cell stride ends on the last row and column.
    pub fn normalized(rows: usize, cols: usize) -> Result<Self, MazeError> {
        if rows < 2 || cols < 2 {
            return Err(MazeError::TooSmall { rows, cols });
        }
        let (rows, cols) = (rows | 1, cols | 1);
        if rows > MAX_ROWS || cols > MAX_COLS {
            return Err(MazeError::TooLarge {
                rows,
                cols,
                max_rows: MAX_ROWS,
                max_cols: MAX_COLS,
            });
        }
        Ok(Self { rows, cols })
    }
}

/// Where the maze size comes from: a difficulty preset or explicit rows/cols.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeChoice {
    Preset(Difficulty),
    Custom(MazeSize),
}

impl fmt::Display for SizeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeChoice::Preset(d) => write!(f, "{}", d),
            SizeChoice::Custom(size) => write!(f, "{}x{}", size.rows, size.cols),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    pub size: SizeChoice,
    pub algorithm: Algorithm,
    pub wall_chance: f64,
}

impl Settings {
    pub fn new(size: SizeChoice, algorithm: Algorithm, wall_chance: f64) -> Result<Self, MazeError> {
        if !(0.0..1.0).contains(&wall_chance) {
            return Err(MazeError::WallChance(wall_chance));
        }
        Ok(Self {
            size,
            algorithm,
            wall_chance,
        })
    }

    pub fn maze_size(&self) -> MazeSize {
        match self.size {
            SizeChoice::Preset(d) => MazeSize {
                rows: d.side(),
                cols: d.side(),
            },
            SizeChoice::Custom(size) => size,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: SizeChoice::Preset(Difficulty::Medium),
            algorithm: Algorithm::Perfect,
            wall_chance: DEFAULT_WALL_CHANCE,
        }
    }
}
