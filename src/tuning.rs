//! Data-driven game balance
//!
//! Every field defaults to the matching value in [`crate::consts`], so a
//! tuning file only needs to list what it changes.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Level ===
    /// Tile side length in world units
    pub tile_size: f32,
    /// Level resource loaded at startup
    pub level: String,

    // === Bodies ===
    pub player_start: Vec2,
    pub player_radius: f32,
    /// Fraction of velocity lost per second
    pub linear_damping: f32,
    /// Radius of star/vortex/finish triggers; half a tile when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_radius: Option<f32>,

    // === Death sequence ===
    pub death_move_secs: f32,
    pub death_shrink_secs: f32,
    pub death_final_scale: f32,

    // === Input ===
    pub accel_gravity_scale: f32,
    pub pointer_gravity_divisor: f32,
    pub points_per_meter: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            level: DEFAULT_LEVEL.to_string(),

            player_start: crate::player_start(),
            player_radius: PLAYER_RADIUS,
            linear_damping: PLAYER_LINEAR_DAMPING,
            trigger_radius: None,

            death_move_secs: DEATH_MOVE_SECS,
            death_shrink_secs: DEATH_SHRINK_SECS,
            death_final_scale: DEATH_FINAL_SCALE,

            accel_gravity_scale: ACCEL_GRAVITY_SCALE,
            pointer_gravity_divisor: POINTER_GRAVITY_DIVISOR,
            points_per_meter: POINTS_PER_METER,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields keep their defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn trigger_radius(&self) -> f32 {
        self.trigger_radius.unwrap_or(self.tile_size / 2.0)
    }
}
