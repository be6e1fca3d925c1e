//! Round state and the render-facing snapshot
//!
//! All mutable game state lives in one [`GameState`] owned by the frame pump.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::collision::CollisionKind;
use super::obstacles::{GapSource, ObstaclePair, ObstacleStream};
use super::rect::Rect;
use crate::highscores::{HighScoreEntry, HighScores};
use crate::tuning::{ConfigError, Tuning};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start input
    Menu,
    /// Active gameplay
    Playing,
    /// Round ended; waiting for a restart input
    GameOver,
}

/// Discrete things that happened during a tick (for audio and UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted { round: u32 },
    Flapped,
    Scored { pair_id: u32, score: u32 },
    SpeedUp { score: u32 },
    Collided { cause: CollisionKind, score: u32 },
}

/// Complete game state
///
/// `S` is the gap source; seeded PCG unless a test injects its own.
#[derive(Debug, Clone)]
pub struct GameState<S = Pcg32> {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    /// Finished rounds this process; its best entry is the high score
    pub high_scores: HighScores,
    pub avatar: Avatar,
    pub obstacles: ObstacleStream,
    /// Simulation tick counter (all phases)
    pub time_ticks: u64,
    /// Ticks spent playing in the current round
    pub round_ticks: u64,
    /// Rounds started so far
    pub rounds: u32,
    /// Cause of the last game over
    pub last_collision: Option<CollisionKind>,
    /// Set by a quit input; the frame pump stops
    pub quit_requested: bool,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    source: S,
}

impl GameState<Pcg32> {
    /// Create a game in the menu with a seeded gap source
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        Self::with_source(tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<S: GapSource> GameState<S> {
    /// Create a game in the menu with a custom gap source
    pub fn with_source(tuning: Tuning, source: S) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self {
            avatar: Avatar::new(&tuning),
            obstacles: ObstacleStream::new(&tuning),
            tuning,
            phase: GamePhase::Menu,
            score: 0,
            high_scores: HighScores::new(),
            time_ticks: 0,
            round_ticks: 0,
            rounds: 0,
            last_collision: None,
            quit_requested: false,
            events: Vec::new(),
            source,
        })
    }

    /// Reset entities and score and enter `Playing`
    pub fn start_round(&mut self) {
        self.score = 0;
        self.round_ticks = 0;
        self.last_collision = None;
        self.avatar = Avatar::new(&self.tuning);
        self.obstacles.reset();
        self.rounds += 1;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::RoundStarted { round: self.rounds });
        log::info!("Round {} started", self.rounds);
    }

    /// Freeze the round and record the result
    pub fn end_round(&mut self, cause: CollisionKind) {
        assert_eq!(
            self.phase,
            GamePhase::Playing,
            "end_round called outside Playing"
        );
        self.phase = GamePhase::GameOver;
        self.last_collision = Some(cause);
        self.high_scores.record(HighScoreEntry {
            score: self.score,
            ticks: self.round_ticks,
            round: self.rounds,
        });
        self.events.push(GameEvent::Collided {
            cause,
            score: self.score,
        });
        log::info!(
            "Round {} over ({:?}): score {}, high score {}",
            self.rounds,
            cause,
            self.score,
            self.high_score()
        );
    }

    /// Abandon the current round and go back to the menu
    ///
    /// High score and leaderboard survive.
    pub fn reset_to_menu(&mut self) {
        self.score = 0;
        self.round_ticks = 0;
        self.last_collision = None;
        self.avatar = Avatar::new(&self.tuning);
        self.obstacles.reset();
        self.events.clear();
        self.phase = GamePhase::Menu;
    }

    /// Spawn a pair if one is due, drawing the gap from the owned source
    pub(crate) fn maybe_spawn(&mut self) -> Option<u32> {
        self.obstacles.maybe_spawn(&mut self.source)
    }

    /// Best finished round this process; never decreases
    pub fn high_score(&self) -> u32 {
        self.high_scores.best()
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ground line y-coordinate
    pub fn ground_y(&self) -> f32 {
        self.tuning.ground_y
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score(),
            speed: self.obstacles.speed,
            avatar: self.avatar.rect(),
            avatar_hitbox: self.avatar.hitbox(),
            avatar_velocity: self.avatar.vel,
            obstacles: self.obstacles.pairs.clone(),
            ground_y: self.tuning.ground_y,
            world_width: self.tuning.world_width,
            world_height: self.tuning.world_height,
        }
    }

    /// Assert state invariants (programming defects if violated)
    pub fn check_invariants(&self) {
        assert!(
            self.high_score() >= self.score || self.phase == GamePhase::Playing,
            "high score {} below finished round score {}",
            self.high_score(),
            self.score
        );
        assert!(
            self.high_scores
                .entries()
                .windows(2)
                .all(|w| w[0].score >= w[1].score),
            "leaderboard out of order"
        );
        assert_eq!(
            self.avatar.pos.x, self.tuning.avatar_x,
            "avatar moved horizontally"
        );
        let passed = self.obstacles.pairs.iter().filter(|p| p.passed).count() as u32;
        assert!(
            passed <= self.score,
            "{passed} passed pairs on screen but score is {}",
            self.score
        );
        self.obstacles.check_invariants();
    }
}

/// Everything the render collaborator reads after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub high_score: u32,
    pub speed: f32,
    pub avatar: Rect,
    pub avatar_hitbox: Rect,
    pub avatar_velocity: f32,
    /// Live pairs in spawn order
    pub obstacles: Vec<ObstaclePair>,
    pub ground_y: f32,
    pub world_width: f32,
    pub world_height: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_in_menu() {
        let state = GameState::new(Tuning::default(), 1).unwrap();
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score(), 0);
        assert!(state.obstacles.pairs.is_empty());
        state.check_invariants();
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            pipe_gap: 0.0,
            ..Default::default()
        };
        assert!(GameState::new(tuning, 1).is_err());
    }

    #[test]
    fn test_end_round_updates_high_score() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        state.start_round();
        state.score = 7;
        state.end_round(CollisionKind::Ground);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score(), 7);

        state.start_round();
        state.score = 3;
        state.end_round(CollisionKind::Ceiling);
        assert_eq!(state.high_score(), 7);
        let rounds: Vec<u32> = state.high_scores.entries().iter().map(|e| e.round).collect();
        assert_eq!(rounds, vec![1, 2]);
        state.check_invariants();
    }

    #[test]
    fn test_reset_to_menu_forgets_the_round() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        state.start_round();
        state.score = 4;
        state.end_round(CollisionKind::Ground);
        assert_eq!(state.last_collision, Some(CollisionKind::Ground));

        state.reset_to_menu();
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.last_collision, None);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score(), 4);
        state.check_invariants();
    }

    #[test]
    #[should_panic(expected = "outside Playing")]
    fn test_end_round_from_menu_is_a_defect() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        state.end_round(CollisionKind::Ground);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        state.start_round();
        state.obstacles.spawn_at(300.0);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Playing\""));
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.obstacles.len(), 1);
    }
}
