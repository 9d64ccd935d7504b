mod config;
mod error;
mod game;
mod generator;
mod grid;
mod input;
mod render;
mod settings;
mod solver;

use std::fs::File;
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Args;
use crate::game::{Game, MoveOutcome};
use crate::input::{command_for, Command};
use crate::render::Renderer;
use crate::solver::shortest_path;

const SECOND: Duration = Duration::from_secs(1);

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref(), args.print)?;

    let settings = args.settings()?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let game = Game::new(settings, &mut rng)?;

    if args.print {
        let path = if args.solve {
            shortest_path(game.grid())
        } else {
            None
        };
        print!("{}", render::to_text(&game, path.as_deref()));
        return Ok(());
    }

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, game, &mut rng, args.fps);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

/// Logs go to a file while the terminal belongs to the game, or to stderr
/// when only printing a maze.
fn init_tracing(log_file: Option<&Path>, print: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if print => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

fn run(stdout: &mut Stdout, mut game: Game, rng: &mut StdRng, fps: u64) -> Result<()> {
    let mut renderer = Renderer::new();
    let frame_time = Duration::from_micros(1_000_000 / fps);
    let mut last_second = Instant::now();
    info!(
        rows = game.grid().rows(),
        cols = game.grid().cols(),
        "game started"
    );

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => {
                    let Some(command) = command_for(key) else {
                        continue;
                    };
                    renderer.set_notice(None);
                    let restart_clock = match command {
                        Command::Quit => return Ok(()),
                        Command::Move(dir) => {
                            let outcome = game.move_player(dir);
                            debug!(?dir, ?outcome, moves = game.moves(), "move");
                            if outcome == MoveOutcome::Won {
                                render::ring_bell(stdout)?;
                            }
                            Ok(false)
                        }
                        Command::NewMaze => game.regenerate(rng).map(|_| true),
                        Command::Reset => {
                            game.reset();
                            Ok(true)
                        }
                        Command::SetDifficulty(difficulty) => {
                            game.set_difficulty(difficulty, rng).map(|_| true)
                        }
                        Command::ToggleAlgorithm => game.toggle_algorithm(rng).map(|_| true),
                        Command::ToggleSolution => {
                            game.toggle_solution();
                            Ok(false)
                        }
                    };
                    match restart_clock {
                        Ok(true) => last_second = Instant::now(),
                        Ok(false) => {}
                        Err(err) => {
                            warn!(%err, "keeping current maze");
                            renderer.set_notice(Some(format!("{} (keeping current maze)", err)));
                        }
                    }
                }
                Event::Resize(_, _) => renderer.invalidate(),
                _ => {}
            }
        }

        while last_second.elapsed() >= SECOND {
            last_second += SECOND;
            game.tick_second();
        }

        renderer.render(stdout, &game)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
