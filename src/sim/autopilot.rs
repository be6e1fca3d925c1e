//! Demo mode: the simulation plays itself
//!
//! Flaps just before the hitbox would sink below the next gap's floor.

use super::avatar::Avatar;
use super::obstacles::ObstacleStream;

/// Clearance kept above the lower pipe
const FLOOR_MARGIN: f32 = 4.0;

/// Decide whether to flap this tick
pub fn should_flap(avatar: &Avatar, obstacles: &ObstacleStream, ground_y: f32) -> bool {
    // Only flap on the way down
    if avatar.vel < 0.0 {
        return false;
    }

    let hitbox = avatar.hitbox();
    let floor = obstacles
        .pairs
        .iter()
        .find(|p| p.right() >= hitbox.left())
        .map(|p| p.lower.top())
        .unwrap_or(ground_y * 0.6);

    // Where the hitbox bottom lands next tick without a flap
    let next_vel = avatar.vel + avatar.gravity();
    let next_bottom = hitbox.bottom() + next_vel;
    next_bottom > floor - FLOOR_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_flaps_near_gap_floor() {
        let tuning = Tuning::default();
        let mut avatar = Avatar::new(&tuning);
        let mut stream = ObstacleStream::new(&tuning);
        // Gap floor at 365
        stream.spawn_at(300.0);

        // Hitbox bottom at 319: well above the floor
        avatar.vel = 1.0;
        assert!(!should_flap(&avatar, &stream, tuning.ground_y));

        // Hitbox bottom at 359, falling
        avatar.pos.y = 340.0;
        avatar.vel = 2.0;
        assert!(should_flap(&avatar, &stream, tuning.ground_y));

        // Rising: never flap
        avatar.vel = -3.0;
        assert!(!should_flap(&avatar, &stream, tuning.ground_y));
    }

    #[test]
    fn test_ignores_pairs_behind() {
        let tuning = Tuning::default();
        let mut avatar = Avatar::new(&tuning);
        let mut stream = ObstacleStream::new(&tuning);
        // Low gap already behind the avatar, high gap ahead
        stream.spawn_at(400.0);
        stream.pairs[0].upper.pos.x = 0.0;
        stream.pairs[0].lower.pos.x = 0.0;
        stream.spawn_at(200.0);

        avatar.pos.y = 250.0;
        avatar.vel = 1.0;
        // Floor of the pair ahead is 265
        assert!(should_flap(&avatar, &stream, tuning.ground_y));
    }
}
