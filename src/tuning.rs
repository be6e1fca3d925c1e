//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so variants differ only in
//! data. Tuning is validated once, before a round can start.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Named tuning presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Default balance
    #[default]
    Classic,
    /// Weaker gravity, wider gaps, slower pipes
    Gentle,
    /// Faster pipes, tighter gaps, flap spam protection
    Arcade,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Gentle => "Gentle",
            Preset::Arcade => "Arcade",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "default" => Some(Preset::Classic),
            "gentle" | "easy" => Some(Preset::Gentle),
            "arcade" | "hard" => Some(Preset::Arcade),
            _ => None,
        }
    }
}

/// Configuration problems found by [`Tuning::validate`] or while loading
#[derive(Debug)]
pub enum ConfigError {
    /// NaN or infinite
    NotFinite { field: &'static str, value: f32 },
    /// A value that must be strictly positive was not
    NotPositive { field: &'static str, value: f32 },
    /// Flap must push the avatar upward
    FlapNotUpward { value: f32 },
    /// The gap does not fit between world top and ground
    GapTooLarge { gap: f32, playfield: f32 },
    /// Gap centre range is inverted
    GapRangeInverted { min: f32, max: f32 },
    /// A gap centre in range would leave an empty upper or lower pipe
    DegenerateGap { center: f32 },
    /// Ground must lie inside the world
    GroundOutsideWorld { ground_y: f32, height: f32 },
    /// Avatar must start fully inside the playfield
    AvatarOutsidePlayfield,
    /// Hitbox inset would leave no collision area
    HitboxInsetTooLarge { inset: f32 },
    /// Spawn threshold must sit left of the spawn edge and inside the world
    SpawnThreshold { threshold: f32, spawn_x: f32 },
    /// Speed bounds inverted
    SpeedRange { initial: f32, max: f32 },
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFinite { field, value } => {
                write!(f, "{field} must be a finite number (got {value})")
            }
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be positive (got {value})")
            }
            Self::FlapNotUpward { value } => {
                write!(f, "flap_strength must be negative (got {value})")
            }
            Self::GapTooLarge { gap, playfield } => {
                write!(f, "pipe gap {gap} does not fit in playfield height {playfield}")
            }
            Self::GapRangeInverted { min, max } => {
                write!(f, "gap centre range inverted: {min} > {max}")
            }
            Self::DegenerateGap { center } => {
                write!(f, "gap centre {center} leaves a pipe with no height")
            }
            Self::GroundOutsideWorld { ground_y, height } => {
                write!(f, "ground_y {ground_y} outside world height {height}")
            }
            Self::AvatarOutsidePlayfield => write!(f, "avatar start position outside playfield"),
            Self::HitboxInsetTooLarge { inset } => {
                write!(f, "hitbox inset {inset} leaves no collision area")
            }
            Self::SpawnThreshold { threshold, spawn_x } => {
                write!(f, "spawn threshold {threshold} must be in [0, {spawn_x})")
            }
            Self::SpeedRange { initial, max } => {
                write!(f, "initial speed {initial} exceeds max speed {max}")
            }
            Self::Io(e) => write!(f, "failed to read tuning: {e}"),
            Self::Json(e) => write!(f, "failed to parse tuning: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Gameplay tuning (all rates per frame unit)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    pub ground_y: f32,

    // === Avatar ===
    pub avatar_x: f32,
    pub avatar_y: f32,
    pub avatar_width: f32,
    pub avatar_height: f32,
    pub hitbox_inset: f32,
    pub gravity: f32,
    pub flap_strength: f32,
    /// Minimum frames between accepted flaps (0 = no cooldown)
    pub flap_cooldown: f32,

    // === Obstacles ===
    pub pipe_gap: f32,
    pub pipe_width: f32,
    pub min_gap_center: f32,
    pub max_gap_center: f32,
    pub spawn_x: f32,
    pub spawn_threshold_x: f32,

    // === Difficulty ===
    pub initial_speed: f32,
    pub max_speed: f32,
    pub speed_increment: f32,
    /// Points per speed step (0 disables speed scaling)
    pub speed_up_every: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ground_y: GROUND_Y,

            avatar_x: AVATAR_X,
            avatar_y: AVATAR_Y,
            avatar_width: AVATAR_WIDTH,
            avatar_height: AVATAR_HEIGHT,
            hitbox_inset: HITBOX_INSET,
            gravity: GRAVITY,
            flap_strength: FLAP_STRENGTH,
            flap_cooldown: FLAP_COOLDOWN,

            pipe_gap: PIPE_GAP,
            pipe_width: PIPE_WIDTH,
            min_gap_center: MIN_GAP_CENTER,
            max_gap_center: MAX_GAP_CENTER,
            spawn_x: SPAWN_X,
            spawn_threshold_x: SPAWN_THRESHOLD_X,

            initial_speed: INITIAL_SPEED,
            max_speed: MAX_SPEED,
            speed_increment: SPEED_INCREMENT,
            speed_up_every: SPEED_UP_EVERY,
        }
    }
}

impl Tuning {
    /// Tuning for a named preset
    pub fn from_preset(preset: Preset) -> Self {
        let base = Self::default();
        match preset {
            Preset::Classic => base,
            Preset::Gentle => Self {
                gravity: 0.2,
                flap_strength: -6.5,
                pipe_gap: 150.0,
                initial_speed: 1.5,
                max_speed: 3.5,
                speed_increment: 0.1,
                ..base
            },
            Preset::Arcade => Self {
                gravity: 0.3,
                flap_strength: -7.0,
                // 100 ms at 60 Hz
                flap_cooldown: 6.0,
                pipe_gap: 120.0,
                initial_speed: 3.0,
                max_speed: 6.0,
                speed_up_every: 5,
                ..base
            },
        }
    }

    /// Parse tuning from JSON; missing fields take default values
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Distance between world top and ground
    #[inline]
    pub fn playfield_height(&self) -> f32 {
        self.ground_y
    }

    fn float_fields(&self) -> [(&'static str, f32); 20] {
        [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("ground_y", self.ground_y),
            ("avatar_x", self.avatar_x),
            ("avatar_y", self.avatar_y),
            ("avatar_width", self.avatar_width),
            ("avatar_height", self.avatar_height),
            ("hitbox_inset", self.hitbox_inset),
            ("gravity", self.gravity),
            ("flap_strength", self.flap_strength),
            ("flap_cooldown", self.flap_cooldown),
            ("pipe_gap", self.pipe_gap),
            ("pipe_width", self.pipe_width),
            ("min_gap_center", self.min_gap_center),
            ("max_gap_center", self.max_gap_center),
            ("spawn_x", self.spawn_x),
            ("spawn_threshold_x", self.spawn_threshold_x),
            ("initial_speed", self.initial_speed),
            ("max_speed", self.max_speed),
            ("speed_increment", self.speed_increment),
        ]
    }

    /// Reject tuning that would produce degenerate geometry mid-round
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }
        let positives = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("ground_y", self.ground_y),
            ("avatar_width", self.avatar_width),
            ("avatar_height", self.avatar_height),
            ("gravity", self.gravity),
            ("pipe_gap", self.pipe_gap),
            ("pipe_width", self.pipe_width),
            ("initial_speed", self.initial_speed),
        ];
        for (field, value) in positives {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.flap_strength >= 0.0 {
            return Err(ConfigError::FlapNotUpward {
                value: self.flap_strength,
            });
        }
        if self.flap_cooldown < 0.0 {
            return Err(ConfigError::NotPositive {
                field: "flap_cooldown",
                value: self.flap_cooldown,
            });
        }
        if self.ground_y > self.world_height {
            return Err(ConfigError::GroundOutsideWorld {
                ground_y: self.ground_y,
                height: self.world_height,
            });
        }
        if self.pipe_gap >= self.playfield_height() {
            return Err(ConfigError::GapTooLarge {
                gap: self.pipe_gap,
                playfield: self.playfield_height(),
            });
        }
        if self.min_gap_center > self.max_gap_center {
            return Err(ConfigError::GapRangeInverted {
                min: self.min_gap_center,
                max: self.max_gap_center,
            });
        }
        let half_gap = self.pipe_gap / 2.0;
        if self.min_gap_center - half_gap <= 0.0 {
            return Err(ConfigError::DegenerateGap {
                center: self.min_gap_center,
            });
        }
        if self.max_gap_center + half_gap >= self.ground_y {
            return Err(ConfigError::DegenerateGap {
                center: self.max_gap_center,
            });
        }
        if self.avatar_x < 0.0
            || self.avatar_x + self.avatar_width > self.world_width
            || self.avatar_y <= 0.0
            || self.avatar_y + self.avatar_height >= self.ground_y
        {
            return Err(ConfigError::AvatarOutsidePlayfield);
        }
        if self.hitbox_inset < 0.0
            || self.hitbox_inset * 2.0 >= self.avatar_width.min(self.avatar_height)
        {
            return Err(ConfigError::HitboxInsetTooLarge {
                inset: self.hitbox_inset,
            });
        }
        if !(0.0..self.spawn_x).contains(&self.spawn_threshold_x) {
            return Err(ConfigError::SpawnThreshold {
                threshold: self.spawn_threshold_x,
                spawn_x: self.spawn_x,
            });
        }
        if self.initial_speed > self.max_speed {
            return Err(ConfigError::SpeedRange {
                initial: self.initial_speed,
                max: self.max_speed,
            });
        }
        if self.speed_increment < 0.0 {
            return Err(ConfigError::NotPositive {
                field: "speed_increment",
                value: self.speed_increment,
            });
        }
        Ok(())
    }
}
