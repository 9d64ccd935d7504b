use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::game::{Game, Status};
use crate::grid::Pos;

const CELL_W: usize = 2;
const HELP: &str = "arrows/wasd move  n new  r reset  1-3 size  g generator  ? hint  q quit";

#[derive(Clone, Copy, Debug, PartialEq)]
enum Glyph {
    Player,
    Start,
    End,
    Wall,
    Open,
    Hint,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: Glyph::Open,
    color: Color::Reset,
};

pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    last_footer: String,
    notice: Option<String>,
    dims: (usize, usize),
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            last: Vec::new(),
            last_hud: String::new(),
            last_footer: String::new(),
            notice: None,
            dims: (0, 0),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    /// Forces the next frame to repaint everything.
    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    /// Message shown in place of the help line until cleared.
    pub fn set_notice(&mut self, notice: Option<String>) {
        self.notice = notice;
    }

    pub fn render<W: Write>(&mut self, out: &mut W, game: &Game) -> io::Result<usize> {
        let term = terminal::size()?;
        self.render_sized(out, game, term)
    }

    /// Draws one frame for a terminal of `term` (cols, rows) and returns how
    /// many maze cells were repainted.
    pub fn render_sized<W: Write>(
        &mut self,
        out: &mut W,
        game: &Game,
        (term_w, term_h): (u16, u16),
    ) -> io::Result<usize> {
        let grid = game.grid();
        let (rows, cols) = (grid.rows(), grid.cols());
        if self.dims != (rows, cols) {
            self.dims = (rows, cols);
            self.last = vec![BLANK; rows * cols];
            self.needs_full = true;
        }

        let needed_h = u16::try_from(rows + 2).unwrap_or(u16::MAX);
        let needed_w = u16::try_from(cols * CELL_W).unwrap_or(u16::MAX);
        if term_w < needed_w || term_h < needed_h {
            out.queue(MoveTo(0, 0))?;
            out.queue(Clear(ClearType::All))?;
            out.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            )))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(0);
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        let hud = format!(
            "Time: {}s  Moves: {}  Maze: {} ({})",
            game.elapsed_secs(),
            game.moves(),
            game.settings().size,
            game.settings().algorithm
        );
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(0, self.origin_y - 1))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(MoveTo(centered(term_w, &hud), self.origin_y - 1))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Print(&hud))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        let mut drawn = 0;
        for r in 0..rows {
            for c in 0..cols {
                let cell = cell_for(game, Pos::new(r, c));
                let idx = r * cols + c;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(out, r, c, cell)?;
                    drawn += 1;
                }
            }
        }

        let (footer, color) = match (&self.notice, game.status()) {
            (Some(notice), _) => (notice.clone(), Color::Red),
            (None, Status::Won) => (
                format!("{}  (n: new maze, q: quit)", game.win_message()),
                Color::Green,
            ),
            (None, Status::Playing) => (HELP.to_string(), Color::DarkGrey),
        };
        if self.needs_full || footer != self.last_footer {
            let y = self.origin_y + rows as u16;
            out.queue(MoveTo(0, y))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(MoveTo(centered(term_w, &footer), y))?;
            out.queue(SetForegroundColor(color))?;
            out.queue(Print(&footer))?;
            out.queue(ResetColor)?;
            self.last_footer = footer;
        }
        self.needs_full = false;

        out.flush()?;
        Ok(drawn)
    }

    fn draw_cell<W: Write>(&self, out: &mut W, r: usize, c: usize, cell: Cell) -> io::Result<()> {
        let text = glyph_text(cell.glyph);
        let x_pos = self.origin_x + (c * CELL_W) as u16;
        let y_pos = self.origin_y + r as u16;
        out.queue(MoveTo(x_pos, y_pos))?;
        out.queue(SetForegroundColor(cell.color))?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                out.queue(Print(' '))?;
            }
        }
        out.queue(ResetColor)?;
        Ok(())
    }
}

/// Terminal bell, standing in for a victory sound.
pub fn ring_bell<W: Write>(out: &mut W) -> io::Result<()> {
    out.queue(Print('\u{7}'))?;
    out.flush()
}

fn centered(term_w: u16, text: &str) -> u16 {
    let w = UnicodeWidthStr::width(text) as u16;
    term_w.saturating_sub(w) / 2
}

fn glyph_text(glyph: Glyph) -> &'static str {
    match glyph {
        Glyph::Player => "😃",
        Glyph::Start => "S",
        Glyph::End => "🏁",
        Glyph::Wall => "██",
        Glyph::Open => "",
        Glyph::Hint => "·",
    }
}

fn cell_for(game: &Game, pos: Pos) -> Cell {
    let grid = game.grid();
    if pos == game.player() {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if pos == grid.end() {
        return Cell {
            glyph: Glyph::End,
            color: Color::Green,
        };
    }
    if pos == grid.start() {
        return Cell {
            glyph: Glyph::Start,
            color: Color::Cyan,
        };
    }
    if grid.is_wall(pos) {
        return Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        };
    }
    if game.is_hinted(pos) {
        return Cell {
            glyph: Glyph::Hint,
            color: Color::Magenta,
        };
    }
    BLANK
}

/// Plain-text rendering used by `--print`: `#` wall, `.` open, `S`/`E` for
/// the corners and `*` for cells on the given path.
pub fn to_text(game: &Game, path: Option<&[Pos]>) -> String {
    let grid = game.grid();
    let mut text = String::with_capacity(grid.rows() * (grid.cols() + 1));
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            let pos = Pos::new(r, c);
            let ch = if pos == grid.start() {
                'S'
            } else if pos == grid.end() {
                'E'
            } else if grid.is_wall(pos) {
                '#'
            } else if path.is_some_and(|p| p.contains(&pos)) {
                '*'
            } else {
                '.'
            };
            text.push(ch);
        }
        text.push('\n');
    }
    text
}
