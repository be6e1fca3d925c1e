//! Flappy - a side-scrolling "flap through the gaps" arcade core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, round state)
//! - `tuning`: Data-driven game balance and its validation
//! - `session`: Frame pump tying clock, input queue and audio to the sim
//! - `audio`: One-way sound notifications (optional collaborator)
//! - `highscores`: In-memory leaderboard for the process lifetime

pub mod audio;
pub mod highscores;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use session::Session;
pub use tuning::{ConfigError, Preset, Tuning};

/// Game configuration constants (defaults for `Tuning`)
///
/// Rates are expressed per frame unit: `dt = 1.0` is one 60 Hz frame.
pub mod consts {
    /// Target frame rate of the external frame pump
    pub const FRAME_RATE: f32 = 60.0;
    /// Simulation step in frame units
    pub const SIM_DT: f32 = 1.0;
    /// Largest wall-clock delta accepted per frame (seconds) after a stall
    pub const MAX_FRAME_SECS: f32 = 0.1;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 400.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    /// Top of the ground strip
    pub const GROUND_Y: f32 = 500.0;

    /// Avatar defaults (top-left of the sprite box)
    pub const AVATAR_X: f32 = 100.0;
    pub const AVATAR_Y: f32 = 300.0;
    pub const AVATAR_WIDTH: f32 = 34.0;
    pub const AVATAR_HEIGHT: f32 = 24.0;
    /// Hitbox is this much smaller than the sprite on every side
    pub const HITBOX_INSET: f32 = 5.0;

    /// Downward acceleration (pixels/frame²)
    pub const GRAVITY: f32 = 0.25;
    /// Velocity set by a flap (negative = up)
    pub const FLAP_STRENGTH: f32 = -7.5;
    /// Frames before another flap is accepted (0 = every flap counts)
    pub const FLAP_COOLDOWN: f32 = 0.0;

    /// Obstacle scroll speed (pixels/frame)
    pub const INITIAL_SPEED: f32 = 2.0;
    pub const MAX_SPEED: f32 = 5.0;
    pub const SPEED_INCREMENT: f32 = 0.2;
    /// Points between speed increments
    pub const SPEED_UP_EVERY: u32 = 10;

    /// Obstacle geometry
    pub const PIPE_GAP: f32 = 130.0;
    pub const PIPE_WIDTH: f32 = 52.0;
    pub const MIN_GAP_CENTER: f32 = 200.0;
    pub const MAX_GAP_CENTER: f32 = 400.0;
    /// New pairs appear with their left edge here
    pub const SPAWN_X: f32 = 400.0;
    /// Spawn the next pair once the newest one's left edge is left of this
    pub const SPAWN_THRESHOLD_X: f32 = 250.0;
}
