//! Fixed-step game clock
//!
//! Turns variable wall-clock frame times into a whole number of fixed
//! simulation steps, so the sim never sees a variable `dt`.

use crate::consts::{FRAME_RATE, MAX_FRAME_SECS, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct GameClock {
    /// Wall-clock seconds per simulation step
    step_secs: f32,
    /// Frame deltas above this are clamped (stall after a breakpoint, suspend, ...)
    max_frame_secs: f32,
    /// Maximum substeps per frame to prevent spiral of death
    max_substeps: u32,
    accumulator: f32,
    total_steps: u64,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(FRAME_RATE)
    }
}

impl GameClock {
    pub fn new(frame_rate: f32) -> Self {
        Self::with_limits(frame_rate, MAX_FRAME_SECS, MAX_SUBSTEPS)
    }

    pub fn with_limits(frame_rate: f32, max_frame_secs: f32, max_substeps: u32) -> Self {
        assert!(frame_rate > 0.0, "frame rate must be positive");
        Self {
            step_secs: 1.0 / frame_rate,
            max_frame_secs,
            max_substeps,
            accumulator: 0.0,
            total_steps: 0,
        }
    }

    /// Simulation `dt` handed to every tick (frame units)
    #[inline]
    pub fn dt(&self) -> f32 {
        SIM_DT
    }

    /// Add elapsed wall-clock time; returns how many steps to simulate
    pub fn advance(&mut self, elapsed_secs: f32) -> u32 {
        let elapsed = if elapsed_secs.is_finite() {
            elapsed_secs.clamp(0.0, self.max_frame_secs)
        } else {
            0.0
        };
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= self.step_secs && steps < self.max_substeps {
            self.accumulator -= self.step_secs;
            steps += 1;
        }
        if self.accumulator >= self.step_secs {
            log::warn!(
                "Dropping {:.3}s of simulation backlog",
                self.accumulator
            );
            self.accumulator = 0.0;
        }

        self.total_steps += steps as u64;
        steps
    }

    /// Fraction of a step left in the accumulator (for render interpolation)
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step_secs
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_steps() {
        // 1/64 s steps are exact in binary
        let mut clock = GameClock::new(64.0);
        assert_eq!(clock.advance(0.03125), 2);
        assert_eq!(clock.alpha(), 0.0);
        assert_eq!(clock.total_steps(), 2);
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = GameClock::new(64.0);
        assert_eq!(clock.advance(0.0078125), 0);
        assert_eq!(clock.alpha(), 0.5);
        assert_eq!(clock.advance(0.0078125), 1);
        assert_eq!(clock.alpha(), 0.0);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = GameClock::new(64.0);
        // Clamped to 0.1s -> 6.4 steps
        assert_eq!(clock.advance(5.0), 6);
    }

    #[test]
    fn test_substep_cap_drops_backlog() {
        let mut clock = GameClock::with_limits(64.0, 1.0, 4);
        assert_eq!(clock.advance(1.0), 4);
        assert_eq!(clock.alpha(), 0.0);
    }

    #[test]
    fn test_bad_deltas_ignored() {
        let mut clock = GameClock::new(64.0);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(f32::INFINITY), 0);
    }
}
