use rand::Rng;
use tracing::{debug, info};

use crate::error::MazeError;
use crate::generator::generate;
use crate::grid::{Dir, Grid, Pos};
use crate::settings::{Difficulty, Settings, SizeChoice};
use crate::solver::path_from;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Blocked,
    Won,
    /// The maze is already solved; input is ignored until a new one starts.
    Finished,
}

pub struct Game {
    grid: Grid,
    settings: Settings,
    player: Pos,
    moves: u32,
    elapsed_secs: u64,
    status: Status,
    solution: Option<Vec<Pos>>,
    /// Row-major flags for cells on `solution`, empty while hidden.
    hint_mask: Vec<bool>,
}

impl Game {
    pub fn new(settings: Settings, rng: &mut impl Rng) -> Result<Self, MazeError> {
        let grid = generate(&settings, rng)?;
        Ok(Self::with_grid(settings, grid))
    }

    pub fn with_grid(settings: Settings, mut grid: Grid) -> Self {
        grid.clear_endpoints();
        let player = grid.start();
        Self {
            grid,
            settings,
            player,
            moves: 0,
            elapsed_secs: 0,
            status: Status::Playing,
            solution: None,
            hint_mask: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn status(&self) -> Status {
        self.status
    }

    #[cfg(test)]
    pub fn solution(&self) -> Option<&[Pos]> {
        self.solution.as_deref()
    }

    pub fn is_hinted(&self, pos: Pos) -> bool {
        self.hint_mask
            .get(pos.r * self.grid.cols() + pos.c)
            .copied()
            .unwrap_or(false)
    }

    pub fn regenerate(&mut self, rng: &mut impl Rng) -> Result<(), MazeError> {
        self.apply_settings(self.settings, rng)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty, rng: &mut impl Rng) -> Result<(), MazeError> {
        let settings = Settings {
            size: SizeChoice::Preset(difficulty),
            ..self.settings
        };
        self.apply_settings(settings, rng)
    }

    pub fn toggle_algorithm(&mut self, rng: &mut impl Rng) -> Result<(), MazeError> {
        let settings = Settings {
            algorithm: self.settings.algorithm.toggled(),
            ..self.settings
        };
        self.apply_settings(settings, rng)
    }

    /// Generates with `settings` and only replaces the current maze on success.
    fn apply_settings(&mut self, settings: Settings, rng: &mut impl Rng) -> Result<(), MazeError> {
        let grid = generate(&settings, rng)?;
        *self = Self::with_grid(settings, grid);
        Ok(())
    }

    /// Restarts the current maze from the start corner with fresh counters.
    pub fn reset(&mut self) {
        self.player = self.grid.start();
        self.moves = 0;
        self.elapsed_secs = 0;
        self.status = Status::Playing;
        self.set_solution(None);
        debug!("maze reset");
    }

    pub fn move_player(&mut self, dir: Dir) -> MoveOutcome {
        if self.status == Status::Won {
            return MoveOutcome::Finished;
        }
        let Some(next) = self.grid.step(self.player, dir) else {
            return MoveOutcome::Blocked;
        };
        if self.grid.is_wall(next) {
            return MoveOutcome::Blocked;
        }

        self.player = next;
        self.moves += 1;
        if self.solution.is_some() {
            self.set_solution(path_from(&self.grid, self.player));
        }

        if next == self.grid.end() {
            self.status = Status::Won;
            info!(
                moves = self.moves,
                seconds = self.elapsed_secs,
                "maze solved"
            );
            return MoveOutcome::Won;
        }
        MoveOutcome::Moved
    }

    pub fn tick_second(&mut self) {
        if self.status == Status::Playing {
            self.elapsed_secs += 1;
        }
    }

    pub fn toggle_solution(&mut self) {
        let solution = match self.solution {
            Some(_) => None,
            None => path_from(&self.grid, self.player),
        };
        self.set_solution(solution);
    }

    fn set_solution(&mut self, solution: Option<Vec<Pos>>) {
        self.hint_mask.clear();
        if let Some(path) = &solution {
            let cols = self.grid.cols();
            self.hint_mask.resize(self.grid.rows() * cols, false);
            for pos in path {
                self.hint_mask[pos.r * cols + pos.c] = true;
            }
        }
        self.solution = solution;
    }

    pub fn win_message(&self) -> String {
        format!(
            "You won in {} moves and {} seconds!",
            self.moves, self.elapsed_secs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::MAX_ATTEMPTS;
    use crate::settings::{Algorithm, MazeSize};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // . . #
    // # . #
    // # . .
    fn corridor() -> Game {
        let mut grid = Grid::open(3, 3);
        for (r, c) in [(0, 2), (1, 0), (1, 2), (2, 0)] {
            grid.set_wall(Pos::new(r, c), true);
        }
        Game::with_grid(Settings::default(), grid)
    }

    #[test]
    fn walls_and_edges_block() {
        let mut game = corridor();
        assert_eq!(game.move_player(Dir::Up), MoveOutcome::Blocked);
        assert_eq!(game.move_player(Dir::Left), MoveOutcome::Blocked);
        assert_eq!(game.move_player(Dir::Down), MoveOutcome::Blocked);
        assert_eq!(game.player(), Pos::new(0, 0));
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn reaching_the_end_wins_and_stops_the_clock() {
        let mut game = corridor();
        game.tick_second();
        assert_eq!(game.move_player(Dir::Right), MoveOutcome::Moved);
        assert_eq!(game.move_player(Dir::Down), MoveOutcome::Moved);
        game.tick_second();
        assert_eq!(game.move_player(Dir::Down), MoveOutcome::Moved);
        assert_eq!(game.move_player(Dir::Right), MoveOutcome::Won);
        assert_eq!(game.status(), Status::Won);

        game.tick_second();
        assert_eq!(game.elapsed_secs(), 2);
        assert_eq!(game.move_player(Dir::Left), MoveOutcome::Finished);
        assert_eq!(game.moves(), 4);
        assert_eq!(game.win_message(), "You won in 4 moves and 2 seconds!");
    }

    #[test]
    fn reset_keeps_maze_and_clears_counters() {
        let mut game = corridor();
        let before = game.grid().clone();
        game.move_player(Dir::Right);
        game.tick_second();
        game.reset();
        assert_eq!(game.player(), Pos::new(0, 0));
        assert_eq!(game.moves(), 0);
        assert_eq!(game.elapsed_secs(), 0);
        assert_eq!(game.grid(), &before);
    }

    #[test]
    fn solution_tracks_player() {
        let mut game = corridor();
        game.toggle_solution();
        assert_eq!(game.solution().map(|p| p.len()), Some(5));
        assert!(game.is_hinted(Pos::new(0, 0)));
        assert!(game.is_hinted(Pos::new(2, 1)));
        assert!(!game.is_hinted(Pos::new(1, 0)));
        game.move_player(Dir::Right);
        assert_eq!(game.solution().map(|p| p.len()), Some(4));
        assert!(!game.is_hinted(Pos::new(0, 0)));
        game.toggle_solution();
        assert!(game.solution().is_none());
        assert!(!game.is_hinted(Pos::new(2, 1)));
    }

    #[test]
    fn difficulty_change_regenerates() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut game = Game::new(Settings::default(), &mut rng).unwrap();
        assert_eq!(game.grid().rows(), 21);
        game.move_player(Dir::Right);
        game.set_difficulty(Difficulty::Hard, &mut rng).unwrap();
        assert_eq!(game.grid().rows(), 31);
        assert_eq!(game.moves(), 0);
        assert_eq!(game.player(), Pos::new(0, 0));
    }

    #[test]
    fn toggle_algorithm_switches_generator() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = Game::new(Settings::default(), &mut rng).unwrap();
        game.toggle_algorithm(&mut rng).unwrap();
        assert_eq!(game.settings().algorithm, Algorithm::Random);
    }

    #[test]
    fn failed_regeneration_keeps_current_maze() {
        let mut rng = StdRng::seed_from_u64(4);
        let settings = Settings::new(
            SizeChoice::Custom(MazeSize::normalized(5, 5).unwrap()),
            Algorithm::Random,
            0.999_999,
        )
        .unwrap();
        let mut game = Game::with_grid(settings, Grid::open(5, 5));
        game.move_player(Dir::Right);
        let before = game.grid().clone();

        assert_eq!(
            game.set_difficulty(Difficulty::Easy, &mut rng),
            Err(MazeError::Unsolvable(MAX_ATTEMPTS))
        );
        assert_eq!(game.settings(), &settings);
        assert_eq!(game.grid(), &before);
        assert_eq!(game.player(), Pos::new(0, 1));
        assert_eq!(game.moves(), 1);
    }
}
