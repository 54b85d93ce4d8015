//! Sources of per-frame delta time.

use std::time::Instant;

pub trait FrameClock {
    /// Seconds since the previous call.
    fn delta(&mut self) -> f32;
}

/// Measures real elapsed time between frames.
#[derive(Debug, Clone)]
pub struct WallClock { last: Instant }

impl WallClock {
    pub fn new() -> Self { Self { last: Instant::now() } }
}

impl Default for WallClock {
    fn default() -> Self { Self::new() }
}

impl FrameClock for WallClock {
    fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

/// Returns the same step every frame, for headless and reproducible runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStep { pub step: f32 }

impl FrameClock for FixedStep {
    fn delta(&mut self) -> f32 { self.step }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_repeats() {
        let mut clock = FixedStep { step: 0.016 };
        assert_eq!(clock.delta(), 0.016);
        assert_eq!(clock.delta(), 0.016);
    }

    #[test]
    fn wall_clock_is_monotonic() {
        let mut clock = WallClock::new();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let first = clock.delta();
        assert!(first >= 0.004);
        assert!(clock.delta() >= 0.0);
    }
}
