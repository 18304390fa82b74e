use std::time::Duration;

use sdl2::keyboard::Keycode;

use crate::engine::Command;

// map keyboard keys to game commands
pub fn map_key(key: Keycode) -> Option<Command> {
    Some(match key {
        Keycode::Left => Command::MoveLeft,
        Keycode::Right => Command::MoveRight,
        Keycode::Down => Command::SoftDrop,
        Keycode::Up => Command::RotateClockwise,
        Keycode::Space => Command::Hold,
        Keycode::Escape => Command::Quit,
        _ => return None,
    })
}

/// Held-key repeat: the first repeat fires after `DELAY`, later ones
/// every `INTERVAL`. Only the most recently pressed key repeats.
pub struct KeyRepeat {
    held: Option<(Keycode, Command)>,
    until_fire: Duration,
}

impl KeyRepeat {
    const DELAY: Duration = Duration::from_millis(40);
    const INTERVAL: Duration = Duration::from_millis(80);

    pub fn new() -> Self {
        Self {
            held: None,
            until_fire: Duration::ZERO,
        }
    }

    pub fn key_down(&mut self, key: Keycode, command: Command) {
        self.held = Some((key, command));
        self.until_fire = Self::DELAY;
    }

    pub fn key_up(&mut self, key: Keycode) {
        if self.held.map_or(false, |(held, _)| held == key) {
            self.held = None;
        }
    }

    /// Called once per frame with the frame's elapsed time; yields the
    /// held command whenever its repeat timer runs out.
    pub fn poll(&mut self, elapsed: Duration) -> Option<Command> {
        let (_, command) = self.held?;
        if let Some(rest) = self.until_fire.checked_sub(elapsed) {
            self.until_fire = rest;
            return None;
        }
        self.until_fire = Self::INTERVAL;
        Some(command)
    }
}
