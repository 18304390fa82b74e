use std::thread;
use std::time::{Duration, Instant};

/// Frame clock: caps the frame rate by sleeping out the remainder of each
/// frame and reports the real time elapsed since the previous tick.
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    pub fn tick(&mut self, target_fps: u32) -> Duration {
        let budget = Duration::from_secs(1) / target_fps;
        let busy = self.last.elapsed();
        if busy < budget {
            thread::sleep(budget - busy);
        }
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        elapsed
    }
}
