//! Collision detection between the avatar, the obstacles and the world bounds

use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::obstacles::ObstacleStream;

/// What ended the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Hitbox overlapped a pipe of this pair
    Obstacle { pair_id: u32 },
    /// Sprite reached the top of the world
    Ceiling,
    /// Sprite reached the ground line
    Ground,
}

/// Check the avatar against world bounds and every live obstacle
///
/// Bounds use the sprite rectangle; obstacles use the inset hitbox.
pub fn check_collision(
    avatar: &Avatar,
    obstacles: &ObstacleStream,
    ground_y: f32,
) -> Option<CollisionKind> {
    let sprite = avatar.rect();
    if sprite.top() <= 0.0 {
        return Some(CollisionKind::Ceiling);
    }
    if sprite.bottom() >= ground_y {
        return Some(CollisionKind::Ground);
    }

    let hitbox = avatar.hitbox();
    obstacles
        .pairs
        .iter()
        .find(|pair| pair.rects().iter().any(|r| r.intersects(&hitbox)))
        .map(|pair| CollisionKind::Obstacle { pair_id: pair.id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GROUND_Y;
    use crate::tuning::Tuning;

    fn setup() -> (Avatar, ObstacleStream) {
        let tuning = Tuning::default();
        (Avatar::new(&tuning), ObstacleStream::new(&tuning))
    }

    fn place(stream: &mut ObstacleStream, x: f32) {
        let pair = stream.pairs.last_mut().unwrap();
        pair.upper.pos.x = x;
        pair.lower.pos.x = x;
    }

    #[test]
    fn test_open_sky() {
        let (avatar, stream) = setup();
        assert_eq!(check_collision(&avatar, &stream, GROUND_Y), None);
    }

    #[test]
    fn test_ground_and_ceiling() {
        let (mut avatar, stream) = setup();
        avatar.pos.y = GROUND_Y - avatar.size.y;
        assert_eq!(
            check_collision(&avatar, &stream, GROUND_Y),
            Some(CollisionKind::Ground)
        );

        avatar.pos.y = 0.0;
        assert_eq!(
            check_collision(&avatar, &stream, GROUND_Y),
            Some(CollisionKind::Ceiling)
        );
    }

    #[test]
    fn test_through_gap_is_safe() {
        let (avatar, mut stream) = setup();
        // Avatar sprite spans y 300..324, gap spans 247.5..377.5
        stream.spawn_at(312.5);
        place(&mut stream, 100.0);
        assert_eq!(check_collision(&avatar, &stream, GROUND_Y), None);
    }

    #[test]
    fn test_pipe_hit() {
        let (avatar, mut stream) = setup();
        // Gap 335..465: upper pipe covers the avatar
        stream.spawn_at(400.0);
        place(&mut stream, 100.0);
        let id = stream.pairs[0].id;
        assert_eq!(
            check_collision(&avatar, &stream, GROUND_Y),
            Some(CollisionKind::Obstacle { pair_id: id })
        );
    }

    #[test]
    fn test_hitbox_forgives_sprite_overlap() {
        let (avatar, mut stream) = setup();
        // Upper pipe bottom at 303: overlaps the sprite (300) but not the hitbox (305)
        stream.spawn_at(368.0);
        place(&mut stream, 100.0);
        assert!(stream.pairs[0].upper.intersects(&avatar.rect()));
        assert_eq!(check_collision(&avatar, &stream, GROUND_Y), None);

        // Horizontally: pipe starts 2px before the sprite's right edge
        let (avatar, mut stream) = setup();
        stream.spawn_at(400.0);
        place(&mut stream, 132.0);
        assert_eq!(check_collision(&avatar, &stream, GROUND_Y), None);
    }
}
