//! Tilt input
//!
//! Every provider boils down to one thing: the latest gravity vector, or
//! `None` when there is no fresh sample. Sampling never blocks.
//!
//! - [`Accelerometer`]: device tilt, `(accel.y * -50, accel.x * 50)`
//! - [`Pointer`]: drag toward a point, `(touch - player) / 100`
//! - [`WobbleTilt`]: seeded synthetic tilt for demos and headless runs

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::tuning::Tuning;

/// Produces a gravity vector once per tick
pub trait InputProvider {
    /// Latest gravity sample. `player` is the player's current position, if spawned.
    fn gravity(&mut self, player: Option<Vec2>) -> Option<Vec2>;
}

/// Device acceleration (in g, landscape orientation) to gravity
#[inline]
pub fn gravity_from_acceleration(accel: Vec2, scale: f32) -> Vec2 {
    Vec2::new(accel.y * -scale, accel.x * scale)
}

/// Pointer offset from the player to gravity
#[inline]
pub fn gravity_from_pointer(touch: Vec2, player: Vec2, divisor: f32) -> Vec2 {
    (touch - player) / divisor
}

/// Holds the most recent accelerometer reading
#[derive(Debug, Clone)]
pub struct Accelerometer {
    latest: Option<Vec2>,
    scale: f32,
}

impl Accelerometer {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            latest: None,
            scale: tuning.accel_gravity_scale,
        }
    }

    /// Record a new device reading (x/y acceleration in g)
    pub fn push_sample(&mut self, accel: Vec2) {
        self.latest = Some(accel);
    }
}

impl InputProvider for Accelerometer {
    fn gravity(&mut self, _player: Option<Vec2>) -> Option<Vec2> {
        self.latest.map(|a| gravity_from_acceleration(a, self.scale))
    }
}

/// Touch/mouse steering: gravity pulls the player toward the held point
#[derive(Debug, Clone)]
pub struct Pointer {
    last_touch: Option<Vec2>,
    divisor: f32,
}

impl Pointer {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            last_touch: None,
            divisor: tuning.pointer_gravity_divisor,
        }
    }

    pub fn touch_began(&mut self, at: Vec2) {
        self.last_touch = Some(at);
    }

    pub fn touch_moved(&mut self, at: Vec2) {
        self.last_touch = Some(at);
    }

    pub fn touch_ended(&mut self) {
        self.last_touch = None;
    }
}

impl InputProvider for Pointer {
    fn gravity(&mut self, player: Option<Vec2>) -> Option<Vec2> {
        let touch = self.last_touch?;
        let player = player?;
        Some(gravity_from_pointer(touch, player, self.divisor))
    }
}

/// A hand slowly circling the device, with a little tremor
#[derive(Debug, Clone)]
pub struct WobbleTilt {
    rng: Pcg32,
    angle: f32,
    /// Radians per sample
    angular_speed: f32,
    /// Tilt magnitude in g
    amplitude: f32,
    /// Tremor magnitude in g
    noise: f32,
    scale: f32,
}

impl WobbleTilt {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            angle: 0.0,
            angular_speed: 0.01,
            amplitude: 0.3,
            noise: 0.05,
            scale: tuning.accel_gravity_scale,
        }
    }
}

impl InputProvider for WobbleTilt {
    fn gravity(&mut self, _player: Option<Vec2>) -> Option<Vec2> {
        self.angle = (self.angle + self.angular_speed) % std::f32::consts::TAU;
        let jitter = Vec2::new(
            self.rng.random_range(-self.noise..=self.noise),
            self.rng.random_range(-self.noise..=self.noise),
        );
        let accel = Vec2::new(self.angle.cos(), self.angle.sin()) * self.amplitude + jitter;
        Some(gravity_from_acceleration(accel, self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_from_acceleration() {
        // Device tilted along +x rolls the ball "up" the landscape screen
        assert_eq!(
            gravity_from_acceleration(Vec2::new(0.2, 0.0), 50.0),
            Vec2::new(0.0, 10.0)
        );
        assert_eq!(
            gravity_from_acceleration(Vec2::new(0.0, 0.2), 50.0),
            Vec2::new(-10.0, 0.0)
        );
    }

    #[test]
    fn test_accelerometer_without_sample() {
        let mut accel = Accelerometer::new(&Tuning::default());
        assert_eq!(accel.gravity(None), None);
        accel.push_sample(Vec2::new(0.1, -0.1));
        let g = accel.gravity(None).unwrap();
        assert!((g - Vec2::new(5.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_pointer_only_while_touching() {
        let mut pointer = Pointer::new(&Tuning::default());
        let player = Some(Vec2::new(100.0, 100.0));
        assert_eq!(pointer.gravity(player), None);

        pointer.touch_began(Vec2::new(300.0, 100.0));
        assert_eq!(pointer.gravity(player), Some(Vec2::new(2.0, 0.0)));

        pointer.touch_moved(Vec2::new(100.0, 0.0));
        assert_eq!(pointer.gravity(player), Some(Vec2::new(0.0, -1.0)));

        // No player, no pull
        assert_eq!(pointer.gravity(None), None);

        pointer.touch_ended();
        assert_eq!(pointer.gravity(player), None);
    }

    #[test]
    fn test_wobble_is_deterministic() {
        let tuning = Tuning::default();
        let mut a = WobbleTilt::new(42, &tuning);
        let mut b = WobbleTilt::new(42, &tuning);
        for _ in 0..100 {
            assert_eq!(a.gravity(None), b.gravity(None));
        }
    }

    #[test]
    fn test_wobble_stays_bounded() {
        let tuning = Tuning::default();
        let mut tilt = WobbleTilt::new(7, &tuning);
        // amplitude + noise on each axis, times the gravity scale
        let limit = (0.3 + 0.05 * 2.0_f32.sqrt()) * tuning.accel_gravity_scale + 1e-3;
        for _ in 0..500 {
            let g = tilt.gravity(None).unwrap();
            assert!(g.length() <= limit, "{g}");
        }
    }
}
