use crossterm::style::Color;
use rand::Rng;

use crate::grid::{CELL_SIZE, GRID_HEIGHT, GRID_WIDTH};
use crate::term::Drawable;
use crate::Cell;

const FOOD_COLOR: Color = Color::Rgb { r: 255, g: 0, b: 0 };

pub struct Food {
    position: Cell,
    body_color: Color,
}

impl Food {
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut food = Food {
            position: (0, 0),
            body_color: FOOD_COLOR,
        };
        food.randomize_position(rng);
        food
    }

    /// Uniform draw over the whole grid. Keeping the result off the snake
    /// is the caller's job.
    pub fn randomize_position(&mut self, rng: &mut impl Rng) {
        self.position = (
            rng.gen_range(0..GRID_WIDTH) * CELL_SIZE,
            rng.gen_range(0..GRID_HEIGHT) * CELL_SIZE,
        );
    }

    pub fn set_position(&mut self, position: Cell) {
        self.position = position;
    }

    pub fn position(&self) -> Cell {
        self.position
    }
}

impl Drawable for Food {
    fn cells(&self) -> &[Cell] {
        std::slice::from_ref(&self.position)
    }

    fn body_color(&self) -> Color {
        self.body_color
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::grid::{SCREEN_HEIGHT, SCREEN_WIDTH};

    #[test]
    fn randomized_positions_stay_on_the_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut food = Food::new(&mut rng);

        for _ in 0..200 {
            food.randomize_position(&mut rng);
            let (x, y) = food.position();

            assert!(x >= 0 && x < SCREEN_WIDTH);
            assert!(y >= 0 && y < SCREEN_HEIGHT);
            assert_eq!(x % CELL_SIZE, 0);
            assert_eq!(y % CELL_SIZE, 0);
        }
    }
}
