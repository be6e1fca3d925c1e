//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected gap source only (seeded PCG by default)
//! - Stable iteration order (by pair ID)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod avatar;
pub mod clock;
pub mod collision;
pub mod obstacles;
pub mod rect;
pub mod state;
pub mod tick;

pub use avatar::Avatar;
pub use clock::GameClock;
pub use collision::{CollisionKind, check_collision};
pub use obstacles::{GapSource, ObstaclePair, ObstacleStream};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState, Snapshot};
pub use tick::{InputEvent, TickInput, tick};
