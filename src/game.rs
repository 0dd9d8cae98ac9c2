use std::thread::sleep;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::food::Food;
use crate::grid::{CELL_SIZE, GRID_HEIGHT, GRID_WIDTH};
use crate::snake::{Direction::*, Snake};
use crate::term::TermManager;
use crate::Cell;

const TICK_INTERVAL_MS: u64 = 100;
const MAX_PLACEMENT_ATTEMPTS: u32 = 16;

/// What a single tick did to the world, for the renderer's benefit.
#[derive(Default)]
struct TickOutcome {
    ate: bool,
    collided: bool,
}

struct GameState {
    snake: Snake,
    food: Food,
    rng: StdRng,
}

impl GameState {
    fn new(mut rng: StdRng) -> Self {
        let snake = Snake::new();
        let mut food = Food::new(&mut rng);
        relocate_food(&mut food, snake.body(), &mut rng);

        GameState { snake, food, rng }
    }

    /// Runs one simulation tick: apply the buffered heading, advance the
    /// snake, handle food, then the self-collision rule.
    fn advance(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        self.snake.update_direction();
        self.snake.move_step();

        if self.food.position() == self.snake.head() {
            self.snake.grow();
            relocate_food(&mut self.food, self.snake.body(), &mut self.rng);
            debug!(length = self.snake.length(), "food eaten");
            outcome.ate = true;
        }

        if has_duplicate_cells(self.snake.body()) {
            info!(length = self.snake.length(), "self collision, resetting");
            self.snake.reset();
            relocate_food(&mut self.food, self.snake.body(), &mut self.rng);
            outcome.collided = true;
        }

        outcome
    }
}

pub struct SnakeGame {
    term: TermManager,
    state: GameState,
}

impl SnakeGame {
    pub fn new() -> Result<Self> {
        let term = TermManager::new()?;
        let state = GameState::new(StdRng::from_entropy());

        Ok(SnakeGame { term, state })
    }

    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        self.term.draw_borders()?;
        self.term.draw(&self.state.snake)?;
        self.term.draw(&self.state.food)?;
        self.term.flush()?;
        info!("game started");

        'game: loop {
            sleep(Duration::from_millis(TICK_INTERVAL_MS));

            for key_ev in self.term.drain_key_events()? {
                match &key_ev {
                    ev if is_quit(ev) => break 'game,
                    KeyEvent { code, modifiers: _ } => match code {
                        KeyCode::Char('w') | KeyCode::Up => self.state.snake.queue_direction(Up),
                        KeyCode::Char('a') | KeyCode::Left => self.state.snake.queue_direction(Left),
                        KeyCode::Char('s') | KeyCode::Down => self.state.snake.queue_direction(Down),
                        KeyCode::Char('d') | KeyCode::Right => self.state.snake.queue_direction(Right),
                        _ => {}
                    },
                }
            }

            let outcome = self.state.advance();
            if outcome.collided {
                self.term.clear_playfield()?;
            }

            self.term.draw(&self.state.snake)?;
            if let Some(cell) = self.state.snake.trailing() {
                self.term.erase_cell(cell)?;
            }
            // The food only moves on the ticks that relocated it. Drawing it
            // after the tail erasure keeps it visible when it lands on the
            // just-vacated cell.
            if outcome.ate || outcome.collided {
                self.term.draw(&self.state.food)?;
            }
            self.term.flush()?;
        }

        info!("quit requested");
        self.term.restore()?;
        Ok(())
    }
}

/// Collision rule: a counting pass over the whole body. The total of the
/// per-cell occurrence counts matches the body length exactly when every
/// cell is unique.
fn has_duplicate_cells(body: &[Cell]) -> bool {
    let total: usize = body
        .iter()
        .map(|cell| body.iter().filter(|other| *other == cell).count())
        .sum();

    total != body.len()
}

/// Moves the food to a cell the snake does not occupy. Random draws are
/// capped; after that a row-major scan settles for the first free cell, so
/// a long snake cannot stall the loop. A fully occupied grid leaves the
/// food where the last draw put it.
fn relocate_food(food: &mut Food, occupied: &[Cell], rng: &mut impl Rng) {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        if !occupied.contains(&food.position()) {
            return;
        }
        food.randomize_position(rng);
    }

    for y in 0..GRID_HEIGHT {
        for x in 0..GRID_WIDTH {
            let cell = (x * CELL_SIZE, y * CELL_SIZE);
            if !occupied.contains(&cell) {
                food.set_position(cell);
                return;
            }
        }
    }
}

fn is_quit(ev: &KeyEvent) -> bool {
    matches!(
        ev,
        KeyEvent {
            code: KeyCode::Esc,
            ..
        } | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL
        }
    )
}
