mod food;
mod game;
mod grid;
mod snake;
mod term;

use anyhow::Result;

pub type Px = i32;
pub type Cell = (Px, Px);

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut game = game::SnakeGame::new()?;
    game.run()
}
