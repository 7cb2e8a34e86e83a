//! Tilt Maze - A tilt-controlled marble maze
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level parsing, contact policy, game state)
//! - `input`: Tilt/pointer input providers producing a gravity vector
//! - `levels`: Level resource lookup
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod levels;
pub mod sim;
pub mod tuning;

pub use levels::{EmbeddedLevels, LevelDir, LevelError, LevelSource};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per rendered frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Side length of one level tile in world units
    pub const TILE_SIZE: f32 = 64.0;
    /// Level loaded at startup
    pub const DEFAULT_LEVEL: &str = "level1";

    /// Player spawn point (fixed, not part of the level text)
    pub const PLAYER_START_X: f32 = 96.0;
    pub const PLAYER_START_Y: f32 = 672.0;
    pub const PLAYER_RADIUS: f32 = 24.0;
    /// Velocity lost per second, as a fraction of current velocity
    pub const PLAYER_LINEAR_DAMPING: f32 = 0.5;

    /// Death sequence: slide into the vortex, then shrink away
    pub const DEATH_MOVE_SECS: f32 = 0.25;
    pub const DEATH_SHRINK_SECS: f32 = 0.25;
    pub const DEATH_FINAL_SCALE: f32 = 0.0001;

    /// Accelerometer reading (g) to gravity multiplier
    pub const ACCEL_GRAVITY_SCALE: f32 = 50.0;
    /// Pointer offset (world units) to gravity divisor
    pub const POINTER_GRAVITY_DIVISOR: f32 = 100.0;
    /// World units per gravity unit (m/s² → units/s²)
    pub const POINTS_PER_METER: f32 = 150.0;
}

/// World-space centre of the tile at (`row`, `column`), row 0 at the bottom
#[inline]
pub fn tile_center(row: usize, column: usize, tile_size: f32) -> Vec2 {
    Vec2::new(
        tile_size * column as f32 + tile_size / 2.0,
        tile_size * row as f32 + tile_size / 2.0,
    )
}

/// Default player start position
#[inline]
pub fn player_start() -> Vec2 {
    Vec2::new(consts::PLAYER_START_X, consts::PLAYER_START_Y)
}
