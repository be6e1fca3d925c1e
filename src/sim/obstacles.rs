//! Obstacle pairs and the stream that spawns, scrolls and recycles them

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// Source of gap centres for new obstacle pairs
///
/// Any `rand::Rng` works; tests plug in fixed sequences.
pub trait GapSource {
    /// Draw a gap centre uniformly from `[min, max]`
    fn gap_center(&mut self, min: f32, max: f32) -> f32;
}

impl<R: Rng> GapSource for R {
    fn gap_center(&mut self, min: f32, max: f32) -> f32 {
        self.random_range(min..=max)
    }
}

/// An upper and lower pipe sharing one gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    /// Monotonically increasing spawn id (scoring de-duplication key)
    pub id: u32,
    pub upper: Rect,
    pub lower: Rect,
    /// Already scored
    pub passed: bool,
}

impl ObstaclePair {
    /// Vertical opening between the two pipes
    pub fn gap(&self) -> f32 {
        self.lower.top() - self.upper.bottom()
    }

    pub fn gap_center(&self) -> f32 {
        (self.upper.bottom() + self.lower.top()) / 2.0
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.lower.left()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.lower.right()
    }

    pub fn rects(&self) -> [&Rect; 2] {
        [&self.upper, &self.lower]
    }
}

/// Live obstacle pairs in spawn order plus the current scroll speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleStream {
    /// Sorted by id; also left-to-right since all pairs share one speed
    pub pairs: Vec<ObstaclePair>,
    /// Current scroll speed (pixels/frame)
    pub speed: f32,
    /// Speed steps applied so far this round
    speed_steps: u32,
    next_id: u32,

    gap: f32,
    pipe_width: f32,
    min_gap_center: f32,
    max_gap_center: f32,
    spawn_x: f32,
    spawn_threshold_x: f32,
    world_height: f32,
    initial_speed: f32,
    max_speed: f32,
    speed_increment: f32,
    speed_up_every: u32,
}

impl ObstacleStream {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pairs: Vec::new(),
            speed: tuning.initial_speed,
            speed_steps: 0,
            next_id: 1,
            gap: tuning.pipe_gap,
            pipe_width: tuning.pipe_width,
            min_gap_center: tuning.min_gap_center,
            max_gap_center: tuning.max_gap_center,
            spawn_x: tuning.spawn_x,
            spawn_threshold_x: tuning.spawn_threshold_x,
            world_height: tuning.world_height,
            initial_speed: tuning.initial_speed,
            max_speed: tuning.max_speed,
            speed_increment: tuning.speed_increment,
            speed_up_every: tuning.speed_up_every,
        }
    }

    /// Drop all pairs and return to the initial speed
    ///
    /// Pair ids keep counting up so ids stay unique for the whole process.
    pub fn reset(&mut self) {
        self.pairs.clear();
        self.speed = self.initial_speed;
        self.speed_steps = 0;
    }

    /// Configured vertical opening
    pub fn gap(&self) -> f32 {
        self.gap
    }

    /// Spawn a pair if the stream is empty or the newest pair has scrolled
    /// left of the spawn threshold
    pub fn maybe_spawn<G: GapSource + ?Sized>(&mut self, source: &mut G) -> Option<u32> {
        let due = match self.pairs.last() {
            None => true,
            Some(newest) => newest.left() < self.spawn_threshold_x,
        };
        if !due {
            return None;
        }
        let center = source
            .gap_center(self.min_gap_center, self.max_gap_center)
            .clamp(self.min_gap_center, self.max_gap_center);
        Some(self.spawn_at(center))
    }

    /// Spawn a pair at the spawn edge with the given gap centre
    pub fn spawn_at(&mut self, gap_center: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        let half_gap = self.gap / 2.0;
        let upper_bottom = gap_center - half_gap;
        let lower_top = gap_center + half_gap;

        self.pairs.push(ObstaclePair {
            id,
            upper: Rect::new(self.spawn_x, 0.0, self.pipe_width, upper_bottom),
            // Reaches the world bottom; only the part above ground is visible
            lower: Rect::new(
                self.spawn_x,
                lower_top,
                self.pipe_width,
                self.world_height - lower_top,
            ),
            passed: false,
        });
        log::debug!("Spawned pair {id} with gap centre {gap_center:.1}");
        id
    }

    /// Scroll every pair left by `speed * dt`
    pub fn advance(&mut self, dt: f32) {
        let dx = -self.speed * dt;
        for pair in &mut self.pairs {
            pair.upper.shift_x(dx);
            pair.lower.shift_x(dx);
        }
    }

    /// Remove pairs fully past the left world edge; returns how many
    pub fn prune(&mut self) -> usize {
        let before = self.pairs.len();
        self.pairs.retain(|p| p.right() >= 0.0);
        before - self.pairs.len()
    }

    /// Mark unpassed pairs whose right edge is left of `x` as passed
    ///
    /// Returns the ids newly passed, in spawn order.
    pub fn take_passed(&mut self, x: f32) -> Vec<u32> {
        self.pairs
            .iter_mut()
            .filter(|p| !p.passed && p.right() < x)
            .map(|p| {
                p.passed = true;
                p.id
            })
            .collect()
    }

    /// Apply one speed step per `speed_up_every` points reached
    ///
    /// Steps are counted, so calling this every tick at the same score is a
    /// no-op. Returns true if the speed changed.
    pub fn speed_up(&mut self, score: u32) -> bool {
        if self.speed_up_every == 0 {
            return false;
        }
        let target_steps = score / self.speed_up_every;
        let before = self.speed;
        while self.speed_steps < target_steps {
            self.speed_steps += 1;
            self.speed = (self.speed + self.speed_increment).min(self.max_speed);
        }
        if self.speed != before {
            log::debug!("Speed {before:.2} -> {:.2} at score {score}", self.speed);
            true
        } else {
            false
        }
    }

    /// Assert stream invariants (programming defects if violated)
    pub fn check_invariants(&self) {
        for pair in &self.pairs {
            assert!(
                (pair.gap() - self.gap).abs() < 1e-3,
                "pair {} gap drifted to {} (expected {})",
                pair.id,
                pair.gap(),
                self.gap
            );
            assert_eq!(
                pair.upper.left(),
                pair.lower.left(),
                "pair {} rectangles separated",
                pair.id
            );
        }
        for w in self.pairs.windows(2) {
            assert!(
                w[0].id < w[1].id && w[0].left() <= w[1].left(),
                "pairs {} and {} out of spawn order",
                w[0].id,
                w[1].id
            );
        }
        assert!(
            self.speed >= self.initial_speed && self.speed <= self.max_speed,
            "speed {} outside [{}, {}]",
            self.speed,
            self.initial_speed,
            self.max_speed
        );
    }
}
