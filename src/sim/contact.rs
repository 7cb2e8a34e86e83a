//! What happens when the player touches something
//!
//! - Star: +1 score, star removed
//! - Vortex: -1 score, game over, player frozen and pulled in, respawn later
//! - Finish: reported, no state change (level progression is not implemented)
//! - Wall: never reported (walls are not in any contact-test mask)

use glam::Vec2;

use super::level::ObjectKind;
use super::state::{Game, GameObserver};
use super::world::{BodyId, ContactBody};

/// Instruction for the scene/physics layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldAction {
    /// Remove a collected body
    Despawn(BodyId),
    /// Stop the player moving and generating contacts
    FreezePlayer(BodyId),
    /// Pull the player into `target`, then respawn it and restart
    StartDeathSequence {
        player: BodyId,
        from: Vec2,
        target: Vec2,
    },
    /// Player reached the finish
    FinishReached,
}

/// Resolve a contact between two bodies into state changes and world actions.
///
/// Score and phase change before this returns; the respawn is left to
/// whoever runs the death sequence.
pub fn on_contact<O: GameObserver>(
    game: &mut Game<O>,
    a: ContactBody,
    b: ContactBody,
) -> Vec<WorldAction> {
    let (player, other) = if a.kind == ObjectKind::Player {
        (a, b)
    } else if b.kind == ObjectKind::Player {
        (b, a)
    } else {
        log::trace!("Ignoring contact between {:?} and {:?}", a.kind, b.kind);
        return Vec::new();
    };

    match other.kind {
        ObjectKind::Vortex => {
            if game.is_over() {
                // Player is already being pulled into a vortex
                log::debug!("Ignoring vortex contact while respawning");
                return Vec::new();
            }
            game.decrease_score();
            game.end_game();
            log::debug!("Player fell into vortex at {}", other.position);
            vec![
                WorldAction::FreezePlayer(player.id),
                WorldAction::StartDeathSequence {
                    player: player.id,
                    from: player.position,
                    target: other.position,
                },
            ]
        }
        ObjectKind::Star => {
            game.increase_score();
            log::debug!("Star collected, score {}", game.score());
            vec![WorldAction::Despawn(other.id)]
        }
        ObjectKind::Finish => vec![WorldAction::FinishReached],
        ObjectKind::Wall | ObjectKind::Player | ObjectKind::Empty => {
            log::trace!("No contact rule for player vs {:?}", other.kind);
            Vec::new()
        }
    }
}
