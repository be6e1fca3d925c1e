//! Fixed timestep simulation tick
//!
//! Core game loop that advances the round deterministically.

use super::autopilot;
use super::collision::check_collision;
use super::obstacles::GapSource;
use super::state::{GameEvent, GamePhase, GameState};

/// Discrete player inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Start from the menu or restart after game over
    Start,
    /// Upward impulse while playing
    Flap,
    /// Ask the frame pump to stop
    Quit,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Events in arrival order
    pub events: Vec<InputEvent>,
    /// Idle/demo mode - the autopilot decides flaps
    pub autopilot: bool,
}

impl TickInput {
    pub fn from_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            autopilot: false,
        }
    }

    pub fn start() -> Self {
        Self::from_events([InputEvent::Start])
    }

    pub fn flap() -> Self {
        Self::from_events([InputEvent::Flap])
    }
}

/// Advance the game state by one fixed timestep
///
/// A tick that starts a round only resets it; simulation begins next tick.
/// Events after the start in the same batch still apply to the new round.
pub fn tick<S: GapSource>(state: &mut GameState<S>, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    let mut started = false;
    for event in &input.events {
        match (*event, state.phase) {
            (InputEvent::Quit, _) => state.quit_requested = true,
            (InputEvent::Start, GamePhase::Menu | GamePhase::GameOver) => {
                state.start_round();
                started = true;
            }
            (InputEvent::Flap, GamePhase::Playing) => flap(state),
            // Start while playing, flap outside a round
            _ => {}
        }
    }

    if started || state.phase != GamePhase::Playing {
        return;
    }

    if input.autopilot
        && autopilot::should_flap(&state.avatar, &state.obstacles, state.tuning.ground_y)
    {
        flap(state);
    }

    state.round_ticks += 1;

    // Physics
    state.avatar.integrate(dt);

    // Obstacles
    state.maybe_spawn();
    state.obstacles.advance(dt);
    state.obstacles.prune();

    // Collision ends the round with everything frozen where it hit
    if let Some(cause) = check_collision(&state.avatar, &state.obstacles, state.tuning.ground_y)
    {
        state.end_round(cause);
        debug_invariants(state);
        return;
    }

    // Scoring
    for pair_id in state.obstacles.take_passed(state.avatar.pos.x) {
        state.score += 1;
        state.events.push(GameEvent::Scored {
            pair_id,
            score: state.score,
        });
        log::debug!("Passed pair {pair_id}, score {}", state.score);
    }
    if state.obstacles.speed_up(state.score) {
        state.events.push(GameEvent::SpeedUp { score: state.score });
    }

    debug_invariants(state);
}

fn flap<S: GapSource>(state: &mut GameState<S>) {
    if state.avatar.apply_impulse() {
        state.events.push(GameEvent::Flapped);
    }
}

fn debug_invariants<S: GapSource>(state: &GameState<S>) {
    if cfg!(debug_assertions) {
        state.check_invariants();
    }
}
