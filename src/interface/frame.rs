use anyhow::Result;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, TextureQuery};
use sdl2::ttf::Font;
use sdl2::video::Window;

use crate::engine::Offset;

pub const BLOCK_SIZE: u32 = 16;

/// The render surface handed to the game once per frame: filled and
/// outlined rects in block or pixel coordinates, plus text for the HUD.
pub struct Frame<'a, 'ttf> {
    canvas: &'a mut Canvas<Window>,
    font: &'a Font<'ttf, 'static>,
}

impl<'a, 'ttf> Frame<'a, 'ttf> {
    pub fn new(canvas: &'a mut Canvas<Window>, font: &'a Font<'ttf, 'static>) -> Self {
        Self { canvas, font }
    }

    /// Pixel rect of a single block at a playfield coordinate.
    pub fn block_rect(world: Offset) -> Rect {
        Rect::new(
            world.x as i32 * BLOCK_SIZE as i32,
            world.y as i32 * BLOCK_SIZE as i32,
            BLOCK_SIZE,
            BLOCK_SIZE,
        )
    }

    pub fn clear(&mut self) {
        self.canvas.set_draw_color(Color::BLACK);
        self.canvas.clear();
    }

    pub fn present(self) {
        self.canvas.present();
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()> {
        self.canvas.set_draw_color(color);
        self.canvas.fill_rect(rect).map_err(anyhow::Error::msg)
    }

    pub fn outline_rect(&mut self, rect: Rect, color: Color) -> Result<()> {
        self.canvas.set_draw_color(color);
        self.canvas.draw_rect(rect).map_err(anyhow::Error::msg)
    }

    /// Renders `text` in white with its top-left corner at pixel (x, y).
    pub fn text(&mut self, text: &str, x: i32, y: i32) -> Result<()> {
        let surface = self.font.render(text).solid(Color::WHITE)?;
        let creator = self.canvas.texture_creator();
        let texture = creator.create_texture_from_surface(&surface)?;
        let TextureQuery { width, height, .. } = texture.query();
        self.canvas
            .copy(&texture, None, Some(Rect::new(x, y, width, height)))
            .map_err(anyhow::Error::msg)
    }
}
