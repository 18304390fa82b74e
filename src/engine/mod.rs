use std::mem;
use std::time::Duration;

use cgmath::Vector2;
use rand::rngs::ThreadRng;
use rand::{thread_rng, Rng};
use thiserror::Error;

use field::Field;
use piece::{Piece, HOLD_POSITION, PREVIEW_POSITION, SPAWN_POSITION};
use score::Score;

pub use command::Command;

pub mod command;
pub mod field;
pub mod grid;
pub mod piece;
pub mod score;

/// Grid coordinate (always inside a grid).
pub type Coordinate = Vector2<usize>;
/// Signed playfield block coordinate; y is negative above the window.
pub type Offset = Vector2<isize>;

// swapping hold twice cycles back to the starting arrangement, so two
// failed attempts mean no arrangement fits
const HOLD_RETRY_LIMIT: usize = 2;

/// Internal-consistency failures. These are not game outcomes: reaching
/// one means a state-changing move skipped its collision check.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("piece locked into an occupied cell at ({x}, {y})")]
    CellOccupied { x: isize, y: isize },
}

/// The game: playfield, live pieces, score and tick state. Owns
/// everything for the lifetime of one game; commands and elapsed time
/// come in, drawable state is exposed through the accessors.
pub struct Game {
    field: Field,
    active: Piece,
    next: Piece,
    held: Option<Piece>,
    score: Score,
    accumulator: Duration,
    rng: ThreadRng,
    running: bool,
    game_over: bool,
}

impl Game {
    pub fn new() -> Self {
        let mut rng = thread_rng();
        let active = Piece::new(rng.gen(), SPAWN_POSITION);
        let next = Piece::new(rng.gen(), PREVIEW_POSITION);
        Self {
            field: Field::new(),
            active,
            next,
            held: None,
            score: Score::new(),
            accumulator: Duration::ZERO,
            rng,
            running: true,
            game_over: false,
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn active_piece(&self) -> &Piece {
        &self.active
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn held_piece(&self) -> Option<&Piece> {
        self.held.as_ref()
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Applies one input command. Rejected moves and rotations are
    /// absorbed here by reverting; they are never errors.
    pub fn handle(&mut self, command: Command) {
        if self.game_over && command != Command::Quit {
            return;
        }
        match command {
            Command::Quit => self.running = false,
            Command::MoveLeft => {
                self.try_shift(Offset::new(-1, 0));
            }
            Command::MoveRight => {
                self.try_shift(Offset::new(1, 0));
            }
            Command::SoftDrop => {
                self.try_shift(Offset::new(0, 1));
            }
            Command::RotateClockwise => self.rotate_clockwise(),
            Command::Hold => {
                self.try_hold();
            }
        }
    }

    /// Advances game time. Gravity fires once the accumulator crosses the
    /// current tick interval; a blocked gravity step locks the piece and
    /// runs the clear, score and spawn chain in that order.
    pub fn update(&mut self, elapsed: Duration) -> Result<(), GameError> {
        if self.game_over {
            self.running = false;
            return Ok(());
        }
        self.accumulator += elapsed;
        if self.accumulator >= self.score.tick_interval() {
            self.accumulator = Duration::ZERO;
            self.step()?;
        }
        Ok(())
    }

    fn step(&mut self) -> Result<(), GameError> {
        if self.try_shift(Offset::new(0, 1)) {
            return Ok(());
        }
        self.field.lock(&self.active)?;
        let rows = self.field.full_rows();
        let cleared = self.field.clear_rows(&rows);
        self.score.add_cleared(cleared);
        self.promote_next();
        if self.field.top_band_occupied() {
            self.game_over = true;
        }
        Ok(())
    }

    // displace the active piece, reverting on collision
    fn try_shift(&mut self, delta: Offset) -> bool {
        self.active.position += delta;
        if self.field.overlaps(&self.active) {
            self.active.position -= delta;
            return false;
        }
        true
    }

    fn rotate_clockwise(&mut self) {
        self.active.rotate_clockwise();
        if self.field.overlaps(&self.active) {
            self.active.rotate_back();
        }
    }

    /// Sets the active piece aside, pulling in the held piece (or the
    /// preview when nothing is held yet). While the incoming piece
    /// collides the swap is repeated; once the arrangements repeat the
    /// whole operation is rolled back and reported as blocked.
    pub fn try_hold(&mut self) -> bool {
        let snapshot = (self.active.clone(), self.next.clone(), self.held.clone());
        for _ in 0..HOLD_RETRY_LIMIT {
            self.swap_hold();
            if !self.field.overlaps(&self.active) {
                return true;
            }
        }
        (self.active, self.next, self.held) = snapshot;
        false
    }

    fn swap_hold(&mut self) {
        match self.held.take() {
            None => {
                // first hold: the preview piece enters play at the spawn point
                let mut incoming = mem::replace(
                    &mut self.next,
                    Piece::new(self.rng.gen(), PREVIEW_POSITION),
                );
                incoming.position = SPAWN_POSITION;
                let mut outgoing = mem::replace(&mut self.active, incoming);
                outgoing.position = HOLD_POSITION;
                self.held = Some(outgoing);
            }
            Some(mut incoming) => {
                // swap: the incoming piece takes over the play position
                incoming.position = self.active.position;
                let mut outgoing = mem::replace(&mut self.active, incoming);
                outgoing.position = HOLD_POSITION;
                self.held = Some(outgoing);
            }
        }
    }

    fn promote_next(&mut self) {
        let mut piece = mem::replace(
            &mut self.next,
            Piece::new(self.rng.gen(), PREVIEW_POSITION),
        );
        piece.position = SPAWN_POSITION;
        self.active = piece;
    }
}

#[cfg(test)]
mod test {
    use super::field::Cell;
    use super::piece::{Color, Kind};
    use super::*;

    fn game_with(active: Kind, next: Kind) -> Game {
        let mut game = Game::new();
        game.active = Piece::new(active, SPAWN_POSITION);
        game.next = Piece::new(next, PREVIEW_POSITION);
        game.held = None;
        game
    }

    #[test]
    fn gravity_moves_a_spawned_piece_down_one_row() {
        let mut game = game_with(Kind::O, Kind::T);
        game.update(Duration::from_secs(1)).unwrap();
        assert_eq!(game.active_piece().position, Offset::new(4, -1));
        assert!(!game.is_game_over());
    }

    #[test]
    fn gravity_waits_for_the_tick_interval() {
        let mut game = game_with(Kind::O, Kind::T);
        game.update(Duration::from_millis(400)).unwrap();
        assert_eq!(game.active_piece().position, SPAWN_POSITION);
        game.update(Duration::from_millis(600)).unwrap();
        assert_eq!(game.active_piece().position, Offset::new(4, -1));
    }

    #[test]
    fn moves_against_a_wall_are_reverted() {
        let mut game = game_with(Kind::O, Kind::T);
        game.active.position = Offset::new(1, 5);
        game.handle(Command::MoveLeft);
        assert_eq!(game.active.position, Offset::new(1, 5));
        game.handle(Command::MoveRight);
        assert_eq!(game.active.position, Offset::new(2, 5));
    }

    #[test]
    fn soft_drop_stops_on_the_stack() {
        let mut game = game_with(Kind::O, Kind::T);
        game.active.position = Offset::new(4, 15);
        game.field.set(Offset::new(4, 17), Cell::Block(Color::Red));
        game.handle(Command::SoftDrop);
        assert_eq!(game.active.position, Offset::new(4, 15));
    }

    #[test]
    fn rotation_advances_and_wraps() {
        let mut game = game_with(Kind::T, Kind::O);
        game.active.position = Offset::new(4, 5);
        for expected in [1, 2, 3, 0] {
            game.handle(Command::RotateClockwise);
            assert_eq!(game.active.rotation(), expected);
        }
    }

    #[test]
    fn blocked_rotation_reverts_to_the_prior_state() {
        let mut game = game_with(Kind::I, Kind::O);
        // vertical I hugging the right wall: the horizontal pose cannot fit
        game.active.position = Offset::new(9, 5);
        assert!(!game.field.overlaps(&game.active));
        game.handle(Command::RotateClockwise);
        assert_eq!(game.active.rotation(), 0);
        assert_eq!(game.active.position, Offset::new(9, 5));
    }

    #[test]
    fn locking_clears_a_completed_row_and_scores() {
        let mut game = game_with(Kind::O, Kind::T);
        // bottom interior row filled except for the two columns under the O
        for x in (1..=10).filter(|x| *x != 4 && *x != 5) {
            game.field.set(Offset::new(x, 17), Cell::Block(Color::Blue));
        }
        game.active.position = Offset::new(4, 16);
        // gravity is blocked by the bottom wall, so the piece locks
        game.update(Duration::from_secs(1)).unwrap();
        assert_eq!(game.score().points(), 100);
        // the piece's top half dropped into the cleared row
        assert_eq!(game.field.get(Offset::new(4, 17)), Some(Cell::Block(Color::Pink)));
        assert_eq!(game.field.get(Offset::new(4, 16)), Some(Cell::Empty));
        // a fresh piece took over at the spawn point
        assert_eq!(game.active_piece().kind, Kind::T);
        assert_eq!(game.active_piece().position, SPAWN_POSITION);
        assert!(!game.is_game_over());
    }

    #[test]
    fn locking_in_the_spawn_band_ends_the_game() {
        let mut game = game_with(Kind::O, Kind::T);
        // block the cell below so the first gravity step already locks
        game.field.set(Offset::new(4, 0), Cell::Block(Color::Red));
        game.field.set(Offset::new(5, 0), Cell::Block(Color::Red));
        game.update(Duration::from_secs(1)).unwrap();
        assert!(game.is_game_over());
        assert!(game.is_running());
        // the terminal state drains the running flag on the next frame
        game.update(Duration::from_secs(1)).unwrap();
        assert!(!game.is_running());
    }

    #[test]
    fn first_hold_stores_the_active_piece() {
        let mut game = game_with(Kind::O, Kind::T);
        game.active.position = Offset::new(4, 5);
        assert!(game.try_hold());
        let held = game.held_piece().expect("piece should be held");
        assert_eq!(held.kind, Kind::O);
        assert_eq!(held.position, HOLD_POSITION);
        assert_eq!(game.active_piece().kind, Kind::T);
        assert_eq!(game.active_piece().position, SPAWN_POSITION);
    }

    #[test]
    fn second_hold_swaps_and_exchanges_positions() {
        let mut game = game_with(Kind::O, Kind::T);
        assert!(game.try_hold());
        game.active.position = Offset::new(6, 5);
        assert!(game.try_hold());
        assert_eq!(game.active_piece().kind, Kind::O);
        assert_eq!(game.active_piece().position, Offset::new(6, 5));
        let held = game.held_piece().unwrap();
        assert_eq!(held.kind, Kind::T);
        assert_eq!(held.position, HOLD_POSITION);
    }

    #[test]
    fn hold_may_be_invoked_repeatedly() {
        let mut game = game_with(Kind::O, Kind::T);
        assert!(game.try_hold());
        assert!(game.try_hold());
        assert!(game.try_hold());
        assert_eq!(game.active_piece().kind, Kind::T);
        assert_eq!(game.held_piece().unwrap().kind, Kind::O);
    }

    #[test]
    fn blocked_hold_rolls_everything_back() {
        let mut game = game_with(Kind::O, Kind::T);
        game.active.position = Offset::new(4, 10);
        // wall off the spawn band so neither piece fits there
        for x in 1..=10 {
            game.field.set(Offset::new(x, 0), Cell::Block(Color::Red));
            game.field.set(Offset::new(x, 1), Cell::Block(Color::Red));
        }
        game.field.set(Offset::new(4, -1), Cell::Block(Color::Red));
        game.field.set(Offset::new(5, -1), Cell::Block(Color::Red));
        assert!(!game.try_hold());
        assert_eq!(game.active_piece().kind, Kind::O);
        assert_eq!(game.active_piece().position, Offset::new(4, 10));
        assert_eq!(game.next_piece().kind, Kind::T);
        assert!(game.held_piece().is_none());
    }

    #[test]
    fn quit_stops_the_game() {
        let mut game = game_with(Kind::O, Kind::T);
        game.handle(Command::Quit);
        assert!(!game.is_running());
    }

    #[test]
    fn commands_are_ignored_after_game_over() {
        let mut game = game_with(Kind::O, Kind::T);
        game.game_over = true;
        game.handle(Command::MoveRight);
        assert_eq!(game.active_piece().position, SPAWN_POSITION);
        game.handle(Command::Quit);
        assert!(!game.is_running());
    }
}
