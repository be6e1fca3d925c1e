//! The player's avatar: vertical physics only

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// The flapping avatar
///
/// `pos` is the top-left of the sprite box. `pos.x` never changes after
/// construction; the world scrolls past instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    /// Vertical velocity (pixels/frame, positive = down)
    pub vel: f32,
    pub size: Vec2,
    hitbox_inset: f32,
    gravity: f32,
    flap_strength: f32,
    flap_cooldown: f32,
    /// Frames until another flap is accepted
    #[serde(default)]
    cooldown_left: f32,
}

impl Avatar {
    /// Avatar at its start position with zero velocity
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.avatar_x, tuning.avatar_y),
            vel: 0.0,
            size: Vec2::new(tuning.avatar_width, tuning.avatar_height),
            hitbox_inset: tuning.hitbox_inset,
            gravity: tuning.gravity,
            flap_strength: tuning.flap_strength,
            flap_cooldown: tuning.flap_cooldown,
            cooldown_left: 0.0,
        }
    }

    /// Semi-implicit Euler step: velocity first, then position
    pub fn integrate(&mut self, dt: f32) {
        self.vel += self.gravity * dt;
        self.pos.y += self.vel * dt;
        if self.cooldown_left > 0.0 {
            self.cooldown_left = (self.cooldown_left - dt).max(0.0);
        }
    }

    /// Overwrite velocity with the flap impulse
    ///
    /// Returns false when the flap was swallowed by the cooldown.
    pub fn apply_impulse(&mut self) -> bool {
        if self.cooldown_left > 0.0 {
            return false;
        }
        self.vel = self.flap_strength;
        self.cooldown_left = self.flap_cooldown;
        true
    }

    /// Sprite-sized rectangle (used for world bounds)
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Forgiving collision rectangle, inset from the sprite on every side
    pub fn hitbox(&self) -> Rect {
        self.rect().inset(self.hitbox_inset)
    }

    pub fn flap_strength(&self) -> f32 {
        self.flap_strength
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }
}
