//! Maze scene: glue between the game state, the contact policy and a physics world
//!
//! The scene spawns one body per level cell plus the player, turns world
//! actions into physics calls, and owns the single pending death sequence.
//! Host-facing happenings (pickups, deaths, respawns) are queued as
//! [`SceneEvent`]s for the renderer to drain once per frame.

use glam::Vec2;

use super::body::BodySpec;
use super::contact::{WorldAction, on_contact};
use super::death::{DeathSequence, DeathStage};
use super::level::LevelGrid;
use super::state::{Game, GameObserver};
use super::world::{BodyId, Contact, PhysicsWorld};
use crate::levels::{LevelError, LevelSource};
use crate::tuning::Tuning;

/// Something the renderer may want to react to (sounds, particles)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    StarCollected { id: BodyId },
    PlayerDied { at: Vec2 },
    PlayerRespawned { id: BodyId },
    FinishReached,
}

pub struct MazeScene<O: GameObserver, W: PhysicsWorld> {
    game: Game<O>,
    world: W,
    tuning: Tuning,
    level: Option<LevelGrid>,
    player: Option<BodyId>,
    death: Option<DeathSequence>,
    events: Vec<SceneEvent>,
}

impl<O: GameObserver, W: PhysicsWorld> MazeScene<O, W> {
    pub fn new(game: Game<O>, world: W, tuning: Tuning) -> Self {
        Self {
            game,
            world,
            tuning,
            level: None,
            player: None,
            death: None,
            events: Vec::new(),
        }
    }

    /// Load a level by name, spawn its bodies and the player.
    ///
    /// Nothing is spawned if the level is missing or malformed. A scene holds
    /// one level: load it once, into an empty world.
    pub fn load_level(&mut self, source: &dyn LevelSource, name: &str) -> Result<(), LevelError> {
        let level = self.game.load_level(source, name, self.tuning.tile_size)?;
        let spawned = self.spawn_level(&level);
        log::info!("Spawned {} level bodies", spawned);
        self.level = Some(level);
        self.spawn_player();
        Ok(())
    }

    /// Spawn a body for every non-empty cell. Returns the number spawned.
    pub fn spawn_level(&mut self, level: &LevelGrid) -> usize {
        let mut spawned = 0;
        for cell in level.cells() {
            if let Some(spec) = BodySpec::for_cell(&cell, &self.tuning) {
                self.world.spawn(spec);
                spawned += 1;
            }
        }
        spawned
    }

    /// Spawn a fresh player at the start position, replacing any current one
    pub fn spawn_player(&mut self) -> BodyId {
        if let Some(old) = self.player.take() {
            self.world.despawn(old);
        }
        let id = self.world.spawn(BodySpec::player(&self.tuning));
        self.player = Some(id);
        id
    }

    /// Run the contact policy and apply what it asks for
    pub fn handle_contact(&mut self, contact: Contact) {
        for action in on_contact(&mut self.game, contact.a, contact.b) {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: WorldAction) {
        match action {
            WorldAction::Despawn(id) => {
                self.world.despawn(id);
                self.events.push(SceneEvent::StarCollected { id });
            }
            WorldAction::FreezePlayer(id) => {
                self.world.set_dynamic(id, false);
                self.world.set_contacts_enabled(id, false);
            }
            WorldAction::StartDeathSequence {
                player,
                from,
                target,
            } => {
                if self.death.is_some() {
                    log::warn!("Death sequence already running; ignoring");
                    return;
                }
                self.death = Some(DeathSequence::new(player, from, target, &self.tuning));
                self.events.push(SceneEvent::PlayerDied { at: target });
            }
            WorldAction::FinishReached => {
                log::info!("Finish reached (level progression not implemented)");
                self.events.push(SceneEvent::FinishReached);
            }
        }
    }

    /// Advance the pending death sequence; on completion respawn and restart
    pub fn advance_death(&mut self, dt: f32) {
        let Some(seq) = self.death.as_mut() else {
            return;
        };
        let stage = seq.advance(dt);
        let player = seq.player();
        self.world.set_position(player, seq.position());
        self.world.set_scale(player, seq.scale());

        if stage == DeathStage::Finished {
            self.death = None;
            let id = self.spawn_player();
            self.game.restart();
            log::debug!("Player respawned as {:?}", id);
            self.events.push(SceneEvent::PlayerRespawned { id });
        }
    }

    pub fn game(&self) -> &Game<O> {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game<O> {
        &mut self.game
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn level(&self) -> Option<&LevelGrid> {
        self.level.as_ref()
    }

    pub fn player(&self) -> Option<BodyId> {
        self.player
    }

    pub fn player_position(&self) -> Option<Vec2> {
        self.player.and_then(|id| self.world.position(id))
    }

    /// True while the player is being pulled into a vortex
    pub fn is_respawning(&self) -> bool {
        self.death.is_some()
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }
}
