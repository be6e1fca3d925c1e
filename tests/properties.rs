//! Property tests for the physics, obstacle and scoring invariants

use proptest::prelude::*;

use flappy::Tuning;
use flappy::sim::{Avatar, CollisionKind, GamePhase, GameState, ObstacleStream};

proptest! {
    #[test]
    fn gravity_is_monotone(
        gravity in 0.01f32..2.0,
        dts in prop::collection::vec(0.1f32..3.0, 1..200),
    ) {
        let tuning = Tuning { gravity, ..Default::default() };
        let mut avatar = Avatar::new(&tuning);
        let mut prev_vel = avatar.vel;
        let mut prev_y = avatar.pos.y;

        for dt in dts {
            avatar.integrate(dt);
            prop_assert!(avatar.vel > prev_vel);
            if prev_vel > 0.0 {
                prop_assert!(avatar.pos.y >= prev_y);
            }
            prev_vel = avatar.vel;
            prev_y = avatar.pos.y;
        }
    }

    #[test]
    fn impulse_always_overrides(vel in -100.0f32..100.0, flap in -20.0f32..-0.5) {
        let tuning = Tuning { flap_strength: flap, ..Default::default() };
        let mut avatar = Avatar::new(&tuning);
        avatar.vel = vel;
        prop_assert!(avatar.apply_impulse());
        prop_assert_eq!(avatar.vel, flap);
    }

    #[test]
    fn pair_gap_holds_while_scrolling(
        center in 200.0f32..400.0,
        score_steps in prop::collection::vec(0u32..3, 1..300),
    ) {
        let tuning = Tuning::default();
        let mut stream = ObstacleStream::new(&tuning);
        stream.spawn_at(center);
        prop_assert!((stream.pairs[0].upper.bottom() - (center - 65.0)).abs() < 1e-3);

        let mut score = 0;
        for step in score_steps {
            score += step;
            stream.speed_up(score);
            stream.advance(1.0);
            stream.prune();
            for pair in &stream.pairs {
                prop_assert!((pair.gap() - tuning.pipe_gap).abs() < 1e-3);
                prop_assert_eq!(pair.upper.left(), pair.lower.left());
            }
        }
    }

    #[test]
    fn speed_steps_once_per_threshold(scores in prop::collection::vec(0u32..200, 1..100)) {
        let tuning = Tuning::default();
        let mut stream = ObstacleStream::new(&tuning);
        let mut best = 0;
        for score in scores {
            // Scores only grow within a round
            best = best.max(score);
            stream.speed_up(best);
        }
        let steps = (best / tuning.speed_up_every) as f32;
        let expected = (tuning.initial_speed + steps * tuning.speed_increment).min(tuning.max_speed);
        prop_assert!((stream.speed - expected).abs() < 1e-3);
    }

    #[test]
    fn high_score_is_running_max(rounds in prop::collection::vec(0u32..500, 1..30)) {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        let mut best = 0;
        for score in rounds {
            state.start_round();
            prop_assert_eq!(state.score, 0);
            state.score = score;
            let before = state.high_score();
            state.end_round(CollisionKind::Ground);

            best = best.max(score);
            prop_assert_eq!(state.phase, GamePhase::GameOver);
            prop_assert!(state.high_score() >= before);
            prop_assert_eq!(state.high_score(), best);
            state.check_invariants();
        }
    }
}
