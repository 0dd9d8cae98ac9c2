use crate::{Cell, Px};

pub const SCREEN_WIDTH: Px = 640;
pub const SCREEN_HEIGHT: Px = 480;
pub const CELL_SIZE: Px = 20;

pub const GRID_WIDTH: Px = SCREEN_WIDTH / CELL_SIZE;
pub const GRID_HEIGHT: Px = SCREEN_HEIGHT / CELL_SIZE;

/// The grid-aligned cell in the middle of the screen.
pub const fn center() -> Cell {
    (GRID_WIDTH / 2 * CELL_SIZE, GRID_HEIGHT / 2 * CELL_SIZE)
}

/// Reduces a coordinate pair into the screen rectangle. The playfield is a
/// torus: leaving through one edge re-enters through the opposite one.
pub fn wrap(x: Px, y: Px) -> Cell {
    (x.rem_euclid(SCREEN_WIDTH), y.rem_euclid(SCREEN_HEIGHT))
}
