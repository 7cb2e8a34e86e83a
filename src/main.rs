//! Tilt Maze entry point
//!
//! Headless native runner: loads a level, drives the ball with a synthetic
//! tilt through simulated display frames and logs what happens. A level that
//! cannot be found or parsed is fatal.
//!
//! Usage: `tilt-maze [LEVEL_DIR] [TUNING_JSON]`

#[cfg(not(target_arch = "wasm32"))]
use tilt_maze::{
    EmbeddedLevels, LevelDir, LevelSource, Tuning,
    consts::SIM_DT,
    input::{InputProvider, WobbleTilt},
    sim::{
        FixedTimestep, Game, GameObserver, LevelGrid, MazeScene, MazeWorld, SceneEvent, TickInput,
        tick,
    },
};

/// Seconds of simulated play
#[cfg(not(target_arch = "wasm32"))]
const RUN_SECS: f32 = 30.0;

/// Simulated display refresh, deliberately off the sim rate
#[cfg(not(target_arch = "wasm32"))]
const FRAME_SECS: f32 = 1.0 / 50.0;

/// Logs what a renderer would draw
#[cfg(not(target_arch = "wasm32"))]
struct ConsoleHud;

#[cfg(not(target_arch = "wasm32"))]
impl GameObserver for ConsoleHud {
    fn did_load_level(&mut self, level: &LevelGrid) {
        for (row, kinds) in level.rows().iter().enumerate().rev() {
            let line: String = kinds.iter().filter_map(|k| k.as_char()).collect();
            log::debug!("{:2} |{}|", row, line);
        }
    }

    fn did_update_score(&mut self, score: i64) {
        log::info!("Score: {}", score);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tilt Maze (headless) starting...");

    let mut args = std::env::args().skip(1);
    let level_dir = args.next();
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let source: Box<dyn LevelSource> = match level_dir {
        Some(dir) => Box::new(LevelDir::new(dir)),
        None => Box::new(EmbeddedLevels::builtin()),
    };

    let level_name = tuning.level.clone();
    let world = MazeWorld::new(tuning.points_per_meter);
    let mut input = WobbleTilt::new(0x7117_3a2e, &tuning);
    let mut scene = MazeScene::new(Game::new(ConsoleHud), world, tuning);

    if let Err(e) = scene.load_level(source.as_ref(), &level_name) {
        log::error!("{}", e);
        std::process::exit(1);
    }

    let mut clock = FixedTimestep::new();
    let mut elapsed = 0.0;
    while elapsed < RUN_SECS {
        elapsed += FRAME_SECS;
        for _ in 0..clock.ticks_for(FRAME_SECS) {
            let tick_input = TickInput {
                gravity: input.gravity(scene.player_position()),
            };
            tick(&mut scene, &tick_input, SIM_DT);
        }

        for event in scene.drain_events() {
            match event {
                SceneEvent::StarCollected { id } => log::info!("Collected star {:?}", id),
                SceneEvent::PlayerDied { at } => log::info!("Fell into vortex at {}", at),
                SceneEvent::PlayerRespawned { .. } => log::info!("Respawned"),
                SceneEvent::FinishReached => log::info!("Reached the finish"),
            }
        }
    }

    log::info!(
        "Finished after {:.0}s: score {}, stars left {}",
        elapsed,
        scene.game().score(),
        scene.world().count(tilt_maze::sim::ObjectKind::Star)
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No web host yet; the library is driven by an embedding renderer
}
