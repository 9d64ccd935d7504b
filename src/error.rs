use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MazeError {
    #[error("maze must be at least 2x2, got {rows}x{cols}")]
    TooSmall { rows: usize, cols: usize },
    #[error("maze of {rows}x{cols} cannot fit on a terminal (at most {max_rows}x{max_cols})")]
    TooLarge {
        rows: usize,
        cols: usize,
        max_rows: usize,
        max_cols: usize,
    },
    #[error("wall chance must be in [0, 1), got {0}")]
    WallChance(f64),
    #[error("no solvable maze after {0} attempts")]
    Unsolvable(u32),
}
