use std::time::Duration;

use anyhow::Result;
use sdl2::pixels::Color as SdlColor;
use sdl2::rect::Rect;

use crate::engine::field::Cell;
use crate::engine::piece::{Color, Piece, HOLD_POSITION, PREVIEW_POSITION};
use crate::engine::{Command, Game, Offset};

use super::frame::{Frame, BLOCK_SIZE};
use super::render_traits::ScreenColor;
use super::App;

// score HUD pixel position, zero-padded to nine digits
const SCORE_POSITION: (i32, i32) = (200, 4);
// the preview and hold slots are framed with a 4x4-block outline
const SLOT_SIDE: u32 = 4;

/// Draws the playfield, the live pieces and the HUD, and adapts the core
/// game to the loop driver.
pub struct GameView {
    game: Game,
}

impl GameView {
    pub fn new(game: Game) -> Self {
        Self { game }
    }

    fn draw_cell(frame: &mut Frame<'_, '_>, world: Offset, color: Color) -> Result<()> {
        let rect = Frame::block_rect(world);
        frame.fill_rect(rect, color.screen_color())?;
        frame.outline_rect(rect, SdlColor::WHITE)
    }

    fn draw_piece(frame: &mut Frame<'_, '_>, piece: &Piece) -> Result<()> {
        let color = piece.kind.color();
        for world in piece.cells() {
            Self::draw_cell(frame, world, color)?;
        }
        Ok(())
    }

    fn draw_slot(frame: &mut Frame<'_, '_>, world: Offset) -> Result<()> {
        let rect = Rect::new(
            world.x as i32 * BLOCK_SIZE as i32,
            world.y as i32 * BLOCK_SIZE as i32,
            BLOCK_SIZE * SLOT_SIDE,
            BLOCK_SIZE * SLOT_SIDE,
        );
        frame.outline_rect(rect, SdlColor::WHITE)
    }
}

impl App for GameView {
    fn handle(&mut self, command: Command) {
        self.game.handle(command);
    }

    fn update(&mut self, elapsed: Duration) -> Result<()> {
        let was_over = self.game.is_game_over();
        self.game.update(elapsed)?;
        if self.game.is_game_over() && !was_over {
            println!("GAME OVER");
        }
        Ok(())
    }

    fn running(&self) -> bool {
        self.game.is_running()
    }

    fn draw(&self, frame: &mut Frame<'_, '_>) -> Result<()> {
        frame.text(
            &format!("{:0>9}", self.game.score().points()),
            SCORE_POSITION.0,
            SCORE_POSITION.1,
        )?;

        for (world, cell) in self.game.field().cells() {
            match cell {
                Cell::Empty => {}
                Cell::Wall => Self::draw_cell(frame, world, Color::Grey)?,
                Cell::Block(color) => Self::draw_cell(frame, world, color)?,
            }
        }

        Self::draw_piece(frame, self.game.active_piece())?;
        Self::draw_piece(frame, self.game.next_piece())?;
        if let Some(held) = self.game.held_piece() {
            Self::draw_piece(frame, held)?;
        }

        Self::draw_slot(frame, PREVIEW_POSITION)?;
        Self::draw_slot(frame, HOLD_POSITION)
    }
}
