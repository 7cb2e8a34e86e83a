//! Vortex death sequence
//!
//! A one-shot timer: the frozen player slides to the vortex centre, shrinks
//! to almost nothing, then the sequence reports `Finished` exactly once.
//! There is no way to cancel it.

use glam::Vec2;

use super::world::BodyId;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathStage {
    Sliding,
    Shrinking,
    Finished,
}

#[derive(Debug, Clone)]
pub struct DeathSequence {
    player: BodyId,
    from: Vec2,
    target: Vec2,
    elapsed: f32,
    move_secs: f32,
    shrink_secs: f32,
    final_scale: f32,
}

impl DeathSequence {
    pub fn new(player: BodyId, from: Vec2, target: Vec2, tuning: &Tuning) -> Self {
        Self {
            player,
            from,
            target,
            elapsed: 0.0,
            move_secs: tuning.death_move_secs.max(0.0),
            shrink_secs: tuning.death_shrink_secs.max(0.0),
            final_scale: tuning.death_final_scale,
        }
    }

    pub fn player(&self) -> BodyId {
        self.player
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn advance(&mut self, dt: f32) -> DeathStage {
        self.elapsed += dt;
        self.stage()
    }

    pub fn stage(&self) -> DeathStage {
        if self.elapsed < self.move_secs {
            DeathStage::Sliding
        } else if self.elapsed < self.move_secs + self.shrink_secs {
            DeathStage::Shrinking
        } else {
            DeathStage::Finished
        }
    }

    pub fn is_finished(&self) -> bool {
        self.stage() == DeathStage::Finished
    }

    /// Sprite position at the current time
    pub fn position(&self) -> Vec2 {
        self.from.lerp(self.target, progress(self.elapsed, self.move_secs))
    }

    /// Sprite scale at the current time
    pub fn scale(&self) -> f32 {
        let t = progress(self.elapsed - self.move_secs, self.shrink_secs);
        1.0 + (self.final_scale - 1.0) * t
    }
}

/// Fraction of `duration` covered by `elapsed`, clamped to [0, 1]
fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return if elapsed >= 0.0 { 1.0 } else { 0.0 };
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence() -> DeathSequence {
        DeathSequence::new(
            BodyId(1),
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            &Tuning::default(),
        )
    }

    #[test]
    fn test_slides_then_shrinks() {
        let mut seq = sequence();
        assert_eq!(seq.stage(), DeathStage::Sliding);
        assert_eq!(seq.scale(), 1.0);

        assert_eq!(seq.advance(0.125), DeathStage::Sliding);
        assert!((seq.position().x - 50.0).abs() < 0.001);
        assert_eq!(seq.scale(), 1.0);

        assert_eq!(seq.advance(0.25), DeathStage::Shrinking);
        assert_eq!(seq.position(), Vec2::new(100.0, 0.0));
        assert!(seq.scale() < 1.0 && seq.scale() > 0.0);

        assert_eq!(seq.advance(0.125), DeathStage::Finished);
        assert!((seq.scale() - 0.0001).abs() < 1e-6);
        assert!(seq.is_finished());
    }

    #[test]
    fn test_zero_durations_finish_immediately() {
        let tuning = Tuning {
            death_move_secs: 0.0,
            death_shrink_secs: 0.0,
            ..Tuning::default()
        };
        let mut seq = DeathSequence::new(BodyId(1), Vec2::ZERO, Vec2::ONE, &tuning);
        assert_eq!(seq.advance(0.0), DeathStage::Finished);
        assert_eq!(seq.position(), Vec2::ONE);
    }
}
