use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use crossterm::{cursor, execute, queue, Result};

use crate::grid::{CELL_SIZE, GRID_HEIGHT, GRID_WIDTH};
use crate::Cell;

const BACKGROUND_COLOR: Color = Color::Black;
const BORDER_COLOR: Color = Color::Rgb {
    r: 93,
    g: 216,
    b: 228,
};
const CELL_CHAR: char = '█';

/// Anything the terminal can put on the playfield: a set of grid cells and
/// the color to paint them in.
pub trait Drawable {
    fn cells(&self) -> &[Cell];
    fn body_color(&self) -> Color;
}

pub struct TermManager {
    stdout: Stdout,
}

impl TermManager {
    /// Fails when the terminal cannot fit the playfield plus its border.
    pub fn new() -> anyhow::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let (needed_cols, needed_rows) = (GRID_WIDTH as u16 + 2, GRID_HEIGHT as u16 + 2);

        if cols < needed_cols || rows < needed_rows {
            anyhow::bail!(
                "terminal is {}x{}, the playfield needs at least {}x{}",
                cols,
                rows,
                needed_cols,
                needed_rows
            );
        }

        Ok(TermManager { stdout: stdout() })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, SetTitle("wrapsnake"))?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        execute!(
            self.stdout,
            SetBackgroundColor(BACKGROUND_COLOR),
            terminal::Clear(ClearType::All)
        )
    }

    pub fn restore(&mut self) -> Result<()> {
        execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking)?;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, LeaveAlternateScreen)
    }

    /// Returns every key event queued up since the last tick without
    /// blocking the loop.
    pub fn drain_key_events(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn draw_borders(&mut self) -> Result<()> {
        let end_x = GRID_WIDTH as u16 + 1;
        let end_y = GRID_HEIGHT as u16 + 1;

        queue!(self.stdout, SetForegroundColor(BORDER_COLOR))?;

        for x in 0..=end_x {
            let ch = if x == 0 || x == end_x { '+' } else { '-' };
            self.put(x, 0, ch)?;
            self.put(x, end_y, ch)?;
        }

        for y in 1..end_y {
            self.put(0, y, '|')?;
            self.put(end_x, y, '|')?;
        }

        Ok(())
    }

    pub fn draw(&mut self, object: &impl Drawable) -> Result<()> {
        queue!(self.stdout, SetForegroundColor(object.body_color()))?;

        for &cell in object.cells() {
            let (col, row) = Self::cell_to_char(cell);
            self.put(col, row, CELL_CHAR)?;
        }

        Ok(())
    }

    pub fn erase_cell(&mut self, cell: Cell) -> Result<()> {
        let (col, row) = Self::cell_to_char(cell);
        self.put(col, row, ' ')
    }

    pub fn clear_playfield(&mut self) -> Result<()> {
        for row in 1..=GRID_HEIGHT as u16 {
            for col in 1..=GRID_WIDTH as u16 {
                self.put(col, row, ' ')?;
            }
        }

        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    // Pixel-space cells map to one character each, shifted past the border.
    fn cell_to_char((x, y): Cell) -> (u16, u16) {
        ((x / CELL_SIZE) as u16 + 1, (y / CELL_SIZE) as u16 + 1)
    }

    fn put(&mut self, col: u16, row: u16, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(col, row), Print(ch))
    }
}
