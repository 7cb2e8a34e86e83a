//! Game state and its observer
//!
//! The state itself is tiny: a score that may go negative and a
//! playing/over flag. Score changes are pushed to the observer before the
//! mutating call returns; game over is polled by the tick loop.

use serde::{Deserialize, Serialize};

use super::level::{LevelGrid, parse_level};
use crate::levels::{LevelError, LevelSource};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    /// Player fell into a vortex; gravity is frozen until restart
    Over,
}

/// Receives level and score notifications (implemented by the renderer)
pub trait GameObserver {
    /// A level was parsed and is ready to spawn
    fn did_load_level(&mut self, level: &LevelGrid);
    /// Score changed to `score`
    fn did_update_score(&mut self, score: i64);
}

/// Observer that ignores everything
impl GameObserver for () {
    fn did_load_level(&mut self, _level: &LevelGrid) {}
    fn did_update_score(&mut self, _score: i64) {}
}

/// Score and phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub score: i64,
    pub phase: GamePhase,
}

impl GameState {
    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }
}

/// Game state machine with an injected observer
#[derive(Debug)]
pub struct Game<O: GameObserver> {
    state: GameState,
    observer: O,
}

impl<O: GameObserver> Game<O> {
    pub fn new(observer: O) -> Self {
        Self {
            state: GameState::default(),
            observer,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> i64 {
        self.state.score
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Fetch, parse and announce a level.
    ///
    /// The observer only hears about the level once it parsed completely.
    pub fn load_level(
        &mut self,
        source: &dyn LevelSource,
        name: &str,
        tile_size: f32,
    ) -> Result<LevelGrid, LevelError> {
        let raw = source.read_level(name)?;
        let level = parse_level(&raw, tile_size).map_err(|source| LevelError::Parse {
            name: name.to_string(),
            source,
        })?;
        log::info!(
            "Loaded level {:?}: {} rows, {} stars, {} vortexes",
            name,
            level.row_count(),
            level.count(super::ObjectKind::Star),
            level.count(super::ObjectKind::Vortex)
        );
        self.observer.did_load_level(&level);
        Ok(level)
    }

    pub fn increase_score(&mut self) {
        self.set_score(self.state.score + 1);
    }

    pub fn decrease_score(&mut self) {
        self.set_score(self.state.score - 1);
    }

    fn set_score(&mut self, score: i64) {
        self.state.score = score;
        self.observer.did_update_score(score);
    }

    /// Playing → Over (no-op when already over)
    pub fn end_game(&mut self) {
        if self.state.phase != GamePhase::Over {
            log::debug!("Game over (score {})", self.state.score);
            self.state.phase = GamePhase::Over;
        }
    }

    /// Over → Playing (no-op when already playing)
    pub fn restart(&mut self) {
        if self.state.phase != GamePhase::Playing {
            log::debug!("Restart (score {})", self.state.score);
            self.state.phase = GamePhase::Playing;
        }
    }
}
