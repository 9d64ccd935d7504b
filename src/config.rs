use std::path::PathBuf;

use clap::Parser;

use crate::error::MazeError;
use crate::settings::{Algorithm, Difficulty, MazeSize, Settings, SizeChoice, DEFAULT_WALL_CHANCE};

pub const DEFAULT_FPS: u64 = 60;

/// Walk a generated maze from the top-left corner to the bottom-right one
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Maze size preset
    #[arg(short, long, value_enum, default_value_t = Difficulty::Medium, env = "MAZE_DIFFICULTY")]
    pub difficulty: Difficulty,

    /// Custom row count (even values are rounded up); overrides --difficulty
    #[arg(long, requires = "cols")]
    pub rows: Option<usize>,

    /// Custom column count (even values are rounded up)
    #[arg(long, requires = "rows")]
    pub cols: Option<usize>,

    /// Maze generator
    #[arg(short, long, value_enum, default_value_t = Algorithm::Perfect)]
    pub algorithm: Algorithm,

    /// Probability of each cell becoming a wall with the random generator
    #[arg(long, default_value_t = DEFAULT_WALL_CHANCE)]
    pub wall_chance: f64,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Redraw rate of the interactive screen
    #[arg(long, default_value_t = DEFAULT_FPS, env = "MAZE_FPS",
          value_parser = clap::value_parser!(u64).range(1..))]
    pub fps: u64,

    /// Write logs to this file while playing
    #[arg(long, env = "MAZE_LOG")]
    pub log_file: Option<PathBuf>,

    /// Print one maze as text and exit
    #[arg(long)]
    pub print: bool,

    /// With --print, mark the shortest route with `*`
    #[arg(long, requires = "print")]
    pub solve: bool,
}

impl Args {
    pub fn settings(&self) -> Result<Settings, MazeError> {
        let size = match (self.rows, self.cols) {
            (Some(rows), Some(cols)) => SizeChoice::Custom(MazeSize::normalized(rows, cols)?),
            _ => SizeChoice::Preset(self.difficulty),
        };
        Settings::new(size, self.algorithm, self.wall_chance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("maze").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_to_medium_perfect() {
        let args = parse(&[]).unwrap();
        let settings = args.settings().unwrap();
        assert_eq!(settings.size, SizeChoice::Preset(Difficulty::Medium));
        assert_eq!(settings.algorithm, Algorithm::Perfect);
        assert_eq!(args.fps, DEFAULT_FPS);
        assert!(!args.print);
    }

    #[test]
    fn custom_size_overrides_preset() {
        let args = parse(&["--difficulty", "easy", "--rows", "8", "--cols", "13"]).unwrap();
        assert_eq!(
            args.settings().unwrap().maze_size(),
            MazeSize { rows: 9, cols: 13 }
        );
    }

    #[test]
    fn rows_need_cols() {
        assert!(parse(&["--rows", "9"]).is_err());
    }

    #[test]
    fn solve_needs_print() {
        assert!(parse(&["--solve"]).is_err());
        assert!(parse(&["--print", "--solve"]).is_ok());
    }

    #[test]
    fn zero_fps_is_rejected() {
        assert!(parse(&["--fps", "0"]).is_err());
    }

    #[test]
    fn bad_wall_chance_surfaces_from_settings() {
        let args = parse(&["--algorithm", "random", "--wall-chance", "1.5"]).unwrap();
        assert_eq!(args.settings(), Err(MazeError::WallChance(1.5)));
    }
}
