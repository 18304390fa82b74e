use std::time::Duration;

/// Cumulative score; level and multiplier are derived from it on demand
/// rather than stored anywhere.
pub struct Score {
    points: u64,
}

impl Score {
    pub fn new() -> Self {
        Self { points: 0 }
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn level(&self) -> u32 {
        band(self.points).0
    }

    pub fn multiplier(&self) -> u64 {
        band(self.points).1
    }

    /// Gravity interval: one second at level 1, shrinking as the level
    /// climbs.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.level()))
    }

    /// Awards 100 points per cleared row, scaled by the multiplier in
    /// effect before the award; the level follows the new total.
    pub fn add_cleared(&mut self, rows: usize) {
        self.points += 100 * rows as u64 * self.multiplier();
    }
}

// level and multiplier bands over cumulative score; 50_000..75_000 and
// 100_000..200_000 are matched by no arm and fall through to the catch-all
fn band(points: u64) -> (u32, u64) {
    match points {
        0..=4_999 => (1, 1),
        5_000..=9_999 => (2, 1),
        10_000..=24_999 => (3, 2),
        25_000..=49_999 => (4, 5),
        75_000..=99_999 => (5, 10),
        200_000..=299_999 => (6, 20),
        300_000..=499_999 => (7, 25),
        _ => (8, 50),
    }
}
