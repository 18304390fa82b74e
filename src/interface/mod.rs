use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use sdl2::event::Event;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::EventPump;

use crate::engine::Command;

use clock::FrameClock;
use frame::Frame;
use input::KeyRepeat;

mod clock;
mod frame;
mod input;
mod render_traits;
mod view;

pub use view::GameView;

const WINDOW_TITLE: &str = "Tetris";
const WINDOW_WIDTH: u32 = 288; // 18 blocks
const WINDOW_HEIGHT: u32 = 304; // 19 blocks
const TARGET_FPS: u32 = 30;
const FONT_PATH: &str = "assets/fonts/base.ttf";
const FONT_SIZE: u16 = 16;

/// Anything the loop can drive: commands in, elapsed time in, pixels out.
pub trait App {
    fn handle(&mut self, command: Command);
    fn update(&mut self, elapsed: Duration) -> Result<()>;
    fn draw(&self, frame: &mut Frame<'_, '_>) -> Result<()>;
    fn running(&self) -> bool;
}

/// The frame loop: polls input, advances the app, redraws. Holds the app
/// by trait rather than by concrete type.
pub struct GameLoop {
    canvas: Canvas<Window>,
    events: EventPump,
    clock: FrameClock,
    repeat: KeyRepeat,
}

impl GameLoop {
    pub fn new() -> Result<Self> {
        let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
        let video = sdl.video().map_err(anyhow::Error::msg)?;
        let window = video
            .window(WINDOW_TITLE, WINDOW_WIDTH, WINDOW_HEIGHT)
            .position_centered()
            .build()?;
        let canvas = window.into_canvas().accelerated().present_vsync().build()?;
        let events = sdl.event_pump().map_err(anyhow::Error::msg)?;
        Ok(Self {
            canvas,
            events,
            clock: FrameClock::new(),
            repeat: KeyRepeat::new(),
        })
    }

    pub fn run<A: App>(mut self, app: &mut A) -> Result<()> {
        let ttf = sdl2::ttf::init()?;
        let font = ttf
            .load_font(Path::new(FONT_PATH), FONT_SIZE)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("loading {FONT_PATH}"))?;

        while app.running() {
            let elapsed = self.clock.tick(TARGET_FPS);

            for event in self.events.poll_iter() {
                match event {
                    Event::Quit { .. } => app.handle(Command::Quit),
                    Event::KeyDown {
                        keycode: Some(key),
                        repeat: false,
                        ..
                    } => {
                        if let Some(command) = input::map_key(key) {
                            app.handle(command);
                            self.repeat.key_down(key, command);
                        }
                    }
                    Event::KeyUp {
                        keycode: Some(key), ..
                    } => self.repeat.key_up(key),
                    _ => {}
                }
            }
            if let Some(command) = self.repeat.poll(elapsed) {
                app.handle(command);
            }

            app.update(elapsed)?;

            let mut frame = Frame::new(&mut self.canvas, &font);
            frame.clear();
            app.draw(&mut frame)?;
            frame.present();
        }
        Ok(())
    }
}
