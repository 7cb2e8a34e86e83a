//! Fixed timestep simulation tick
//!
//! One tick per rendered frame, in this order:
//! 1. take the latest gravity sample from input
//! 2. skip the gravity update while the game is over
//! 3. otherwise set world gravity
//! 4. step physics and resolve every contact that began
//! 5. advance the death sequence (respawn + restart on completion)

use glam::Vec2;

use super::scene::MazeScene;
use super::state::GameObserver;
use super::world::PhysicsWorld;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest gravity vector from the input provider, if any
    pub gravity: Option<Vec2>,
}

/// Advance the scene by one fixed timestep
pub fn tick<O: GameObserver, W: PhysicsWorld>(
    scene: &mut MazeScene<O, W>,
    input: &TickInput,
    dt: f32,
) {
    if !scene.game().is_over() {
        if let Some(gravity) = input.gravity {
            scene.world_mut().set_gravity(gravity);
        }
    }

    let contacts = scene.world_mut().step(dt);
    for contact in contacts {
        scene.handle_contact(contact);
    }

    scene.advance_death(dt);
}

/// Accumulates frame time and hands out whole simulation ticks
#[derive(Debug, Clone, Default)]
pub struct FixedTimestep {
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of [`SIM_DT`] ticks to run for a frame that took `frame_dt`
    pub fn ticks_for(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, 0.1);

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        // Drop time we could not catch up on
        if ticks == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        ticks
    }
}
