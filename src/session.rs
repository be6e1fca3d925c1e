//! Frame pump
//!
//! Owns the game state and drives it from the outside world: queues input
//! events, converts wall-clock frame time into fixed ticks, and forwards
//! sim events to audio.

use std::panic::{AssertUnwindSafe, catch_unwind};

use rand_pcg::Pcg32;

use crate::audio::AudioManager;
use crate::sim::{GameClock, GameState, GapSource, InputEvent, Snapshot, TickInput, tick};
use crate::tuning::{ConfigError, Tuning};

/// A running game: state, clock, input queue and audio
#[derive(Debug)]
pub struct Session<S = Pcg32> {
    pub state: GameState<S>,
    pub clock: GameClock,
    pub audio: AudioManager,
    /// Events waiting for the next tick
    pending: Vec<InputEvent>,
    autopilot: bool,
    /// Recover from a panicking tick instead of unwinding
    resilient: bool,
    recoveries: u32,
}

impl Session<Pcg32> {
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self::with_state(GameState::new(tuning, seed)?))
    }
}

impl<S: GapSource> Session<S> {
    pub fn with_state(state: GameState<S>) -> Self {
        Self {
            state,
            clock: GameClock::default(),
            audio: AudioManager::silent(),
            pending: Vec::new(),
            autopilot: false,
            resilient: false,
            recoveries: 0,
        }
    }

    pub fn with_audio(mut self, audio: AudioManager) -> Self {
        self.audio = audio;
        self
    }

    /// Let the sim choose its own flaps
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    /// Opt in to catching a panicking tick and returning to the menu
    pub fn set_resilient(&mut self, enabled: bool) {
        self.resilient = enabled;
    }

    /// Times resilient mode recovered from a failed tick
    pub fn recoveries(&self) -> u32 {
        self.recoveries
    }

    /// Queue an input event for the next tick
    pub fn push_input(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// A quit input was processed; the session is finished
    pub fn quit_requested(&self) -> bool {
        self.state.quit_requested
    }

    /// Advance by elapsed wall-clock time and return the render view
    ///
    /// Queued input goes to the first tick of the frame; if the frame is too
    /// short for a tick, it waits for the next one. After a quit no further
    /// ticks run and every frame returns the final view.
    pub fn frame(&mut self, elapsed_secs: f32) -> Snapshot {
        if self.state.quit_requested {
            return self.state.snapshot();
        }
        let steps = self.clock.advance(elapsed_secs);
        for _ in 0..steps {
            self.step();
            if self.state.quit_requested {
                break;
            }
        }
        self.state.snapshot()
    }

    /// Run exactly one tick with the queued input
    pub fn step(&mut self) {
        let input = TickInput {
            events: std::mem::take(&mut self.pending),
            autopilot: self.autopilot,
        };
        let dt = self.clock.dt();

        if self.resilient {
            let state = &mut self.state;
            let result = catch_unwind(AssertUnwindSafe(|| tick(state, &input, dt)));
            if result.is_err() {
                self.recoveries += 1;
                log::warn!(
                    "Tick {} failed; resetting to menu (recovery #{})",
                    self.state.time_ticks,
                    self.recoveries
                );
                self.state.reset_to_menu();
            }
        } else {
            tick(&mut self.state, &input, dt);
        }

        for event in self.state.drain_events() {
            self.audio.notify(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    /// Gap source that fails on first use
    #[derive(Debug)]
    struct Exploding;

    impl GapSource for Exploding {
        fn gap_center(&mut self, _min: f32, _max: f32) -> f32 {
            panic!("gap source exploded");
        }
    }

    #[test]
    fn test_input_waits_for_a_tick() {
        let mut session = Session::new(Tuning::default(), 3).unwrap();
        session.push_input(InputEvent::Start);

        // Too short for a step: start stays queued
        let snap = session.frame(0.001);
        assert_eq!(snap.phase, GamePhase::Menu);

        let snap = session.frame(1.0 / 30.0);
        assert_eq!(snap.phase, GamePhase::Playing);
    }

    #[test]
    fn test_quit_stops_the_frame() {
        let mut session = Session::new(Tuning::default(), 3).unwrap();
        session.push_input(InputEvent::Quit);
        session.frame(0.1);
        assert!(session.quit_requested());
        assert_eq!(session.state.time_ticks, 1);

        // Finished: later frames stay put whatever arrives
        session.push_input(InputEvent::Start);
        for _ in 0..3 {
            let snap = session.frame(0.1);
            assert_eq!(snap.phase, GamePhase::Menu);
        }
        assert_eq!(session.state.time_ticks, 1);
    }

    #[test]
    #[should_panic(expected = "gap source exploded")]
    fn test_failures_propagate_by_default() {
        let state = GameState::with_source(Tuning::default(), Exploding).unwrap();
        let mut session = Session::with_state(state);
        session.push_input(InputEvent::Start);
        session.step();
        session.step();
    }

    #[test]
    fn test_resilient_mode_recovers() {
        let state = GameState::with_source(Tuning::default(), Exploding).unwrap();
        let mut session = Session::with_state(state);
        session.set_resilient(true);
        session.push_input(InputEvent::Start);
        session.step();
        session.step();

        assert_eq!(session.recoveries(), 1);
        assert_eq!(session.state.phase, GamePhase::Menu);
    }
}
