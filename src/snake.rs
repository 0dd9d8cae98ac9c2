use crossterm::style::Color;

use crate::grid::{self, CELL_SIZE};
use crate::term::Drawable;
use crate::{Cell, Px};
use Direction::*;

const SNAKE_COLOR: Color = Color::Rgb { r: 0, g: 255, b: 0 };

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn offset(self) -> (Px, Px) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

pub struct Snake {
    body: Vec<Cell>,
    length: usize,
    direction: Direction,
    pending: Option<Direction>,
    trailing: Option<Cell>,
    body_color: Color,
}

impl Snake {
    pub fn new() -> Self {
        Snake {
            body: vec![grid::center()],
            length: 1,
            direction: Right,
            pending: None,
            trailing: None,
            body_color: SNAKE_COLOR,
        }
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Cell vacated by the most recent move, if one was. Only the renderer
    /// cares: it is the single character that needs erasing.
    pub fn trailing(&self) -> Option<Cell> {
        self.trailing
    }

    /// Buffers a heading change for the next tick. A request for the exact
    /// reverse of the current heading is dropped; anything else overwrites
    /// whatever was buffered earlier in the same tick.
    pub fn queue_direction(&mut self, new_direction: Direction) {
        if new_direction != self.direction.opposite() {
            self.pending = Some(new_direction);
        }
    }

    /// Applies the buffered heading change. Runs before every move, so the
    /// heading never flips 180 degrees between two moves.
    pub fn update_direction(&mut self) {
        if let Some(direction) = self.pending.take() {
            self.direction = direction;
        }
    }

    /// Advances one cell along the current heading, wrapping at the screen
    /// edges. The tail is trimmed back to the target length and the dropped
    /// cell kept around for erasure.
    pub fn move_step(&mut self) {
        let (dx, dy) = self.direction.offset();
        let (x, y) = self.head();
        let new_head = grid::wrap(x + dx * CELL_SIZE, y + dy * CELL_SIZE);

        self.body.insert(0, new_head);
        self.trailing = None;
        while self.body.len() > self.length {
            self.trailing = self.body.pop();
        }
    }

    /// Raises the target length; the body catches up on the next move.
    pub fn grow(&mut self) {
        self.length += 1;
    }

    pub fn reset(&mut self) {
        *self = Snake::new();
    }
}

impl Drawable for Snake {
    fn cells(&self) -> &[Cell] {
        &self.body
    }

    fn body_color(&self) -> Color {
        self.body_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_at(head: Cell, direction: Direction) -> Snake {
        Snake {
            body: vec![head],
            direction,
            ..Snake::new()
        }
    }

    #[test]
    fn moves_one_cell_along_the_heading() {
        let mut snake = snake_at((300, 200), Right);
        snake.move_step();

        assert_eq!(snake.head(), (320, 200));
        assert_eq!(snake.body(), &[(320, 200)]);
        assert_eq!(snake.trailing(), Some((300, 200)));
    }

    #[test]
    fn wraps_around_every_screen_edge() {
        let cases = [
            ((620, 200), Right, (0, 200)),
            ((0, 200), Left, (620, 200)),
            ((300, 460), Down, (300, 0)),
            ((300, 0), Up, (300, 460)),
        ];

        for &(start, direction, expected) in cases.iter() {
            let mut snake = snake_at(start, direction);
            snake.move_step();
            assert_eq!(snake.head(), expected);
        }
    }

    #[test]
    fn reversal_requests_are_dropped() {
        let mut snake = snake_at((300, 200), Right);
        snake.queue_direction(Left);
        snake.update_direction();
        snake.move_step();

        // Still heading right, not bounced back.
        assert_eq!(snake.head(), (320, 200));
    }

    #[test]
    fn later_requests_overwrite_earlier_ones_within_a_tick() {
        let mut snake = snake_at((300, 200), Right);
        snake.queue_direction(Up);
        snake.queue_direction(Down);
        snake.update_direction();
        snake.move_step();

        assert_eq!(snake.head(), (300, 220));
    }

    #[test]
    fn reversal_request_leaves_an_earlier_pending_one_alone() {
        let mut snake = snake_at((300, 200), Right);
        snake.queue_direction(Up);
        snake.queue_direction(Left);
        snake.update_direction();
        snake.move_step();

        assert_eq!(snake.head(), (300, 180));
    }

    #[test]
    fn body_catches_up_with_the_target_length() {
        let mut snake = snake_at((100, 100), Right);
        for _ in 0..3 {
            snake.grow();
        }
        assert_eq!(snake.length(), 4);

        for moves in 1..=4 {
            snake.move_step();
            assert!(snake.body().len() <= snake.length());
            assert_eq!(snake.body().len(), (moves + 1).min(4));
        }

        // Growth moves vacate nothing; steady-state moves do.
        snake.grow();
        snake.move_step();
        assert_eq!(snake.trailing(), None);
        snake.move_step();
        assert!(snake.trailing().is_some());
    }

    #[test]
    fn reset_restores_the_startup_state() {
        let mut snake = snake_at((100, 100), Down);
        snake.grow();
        snake.move_step();
        snake.queue_direction(Left);
        snake.reset();

        assert_eq!(snake.head(), grid::center());
        assert_eq!(snake.body().len(), 1);
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.trailing(), None);

        // The pending buffer is gone too: the next move heads right.
        snake.update_direction();
        snake.move_step();
        assert_eq!(snake.head(), (340, 240));
    }
}
