//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (by body ID)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod contact;
pub mod death;
pub mod level;
pub mod scene;
pub mod state;
pub mod tick;
pub mod world;

pub use body::{BodyMasks, BodySpec, Category, Shape};
pub use collision::{CollisionResult, ball_circle_collision, ball_rect_collision};
pub use contact::{WorldAction, on_contact};
pub use death::{DeathSequence, DeathStage};
pub use level::{Cell, LevelGrid, ObjectKind, ParseError, parse_level};
pub use scene::{MazeScene, SceneEvent};
pub use state::{Game, GameObserver, GamePhase, GameState};
pub use tick::{FixedTimestep, TickInput, tick};
pub use world::{Body, BodyId, Contact, ContactBody, MazeWorld, PhysicsWorld};
