use anyhow::Result;

use engine::Game;
use interface::{GameLoop, GameView};

mod engine;
mod interface;

fn main() -> Result<()> {
    let mut view = GameView::new(Game::new());
    GameLoop::new()?.run(&mut view)
}
