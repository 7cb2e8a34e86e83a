//! Physics categories and body descriptions
//!
//! Each body carries three masks:
//! - `category`: the body's own bit
//! - `collision`: categories that physically block this body
//! - `contact_test`: categories whose overlap with this body is reported
//!
//! Walls block the player but are never reported. Stars, vortexes and the
//! finish are reported but never block anything.

use std::ops::{BitAnd, BitOr};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::{Cell, ObjectKind};
use crate::tuning::Tuning;

/// Category bitmask (distinct powers of two, OR-combinable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Category(pub u32);

impl Category {
    pub const NONE: Category = Category(0);
    pub const PLAYER: Category = Category(1);
    pub const WALL: Category = Category(2);
    pub const STAR: Category = Category(4);
    pub const VORTEX: Category = Category(8);
    pub const FINISH: Category = Category(16);

    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn intersects(self, other: Category) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Category {
    type Output = Category;

    fn bitor(self, rhs: Category) -> Category {
        Category(self.0 | rhs.0)
    }
}

impl BitAnd for Category {
    type Output = Category;

    fn bitand(self, rhs: Category) -> Category {
        Category(self.0 & rhs.0)
    }
}

impl ObjectKind {
    /// Category bit for this kind (`Empty` has none)
    pub fn category(&self) -> Category {
        match self {
            ObjectKind::Player => Category::PLAYER,
            ObjectKind::Wall => Category::WALL,
            ObjectKind::Star => Category::STAR,
            ObjectKind::Vortex => Category::VORTEX,
            ObjectKind::Finish => Category::FINISH,
            ObjectKind::Empty => Category::NONE,
        }
    }

    /// Collision and contact-test masks for this kind
    pub fn masks(&self) -> BodyMasks {
        let category = self.category();
        match self {
            ObjectKind::Player => BodyMasks {
                category,
                collision: Category::WALL,
                contact_test: Category::STAR | Category::VORTEX | Category::FINISH,
            },
            ObjectKind::Wall => BodyMasks {
                category,
                collision: Category::PLAYER,
                contact_test: Category::NONE,
            },
            ObjectKind::Star | ObjectKind::Vortex | ObjectKind::Finish => BodyMasks {
                category,
                collision: Category::NONE,
                contact_test: Category::PLAYER,
            },
            ObjectKind::Empty => BodyMasks::default(),
        }
    }
}

/// The three masks a body is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BodyMasks {
    pub category: Category,
    pub collision: Category,
    pub contact_test: Category,
}

impl BodyMasks {
    /// Whether `self` is pushed out of `other`
    #[inline]
    pub fn blocked_by(&self, other: &BodyMasks) -> bool {
        self.collision.intersects(other.category)
    }

    /// Whether an overlap between the two bodies produces a contact event
    #[inline]
    pub fn reports_contact_with(&self, other: &BodyMasks) -> bool {
        self.contact_test.intersects(other.category) || other.contact_test.intersects(self.category)
    }
}

/// Body outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { half_extents: Vec2 },
}

/// Everything a physics world needs to create a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub kind: ObjectKind,
    pub position: Vec2,
    pub shape: Shape,
    pub masks: BodyMasks,
    /// Moved by gravity and pushed out of blocking bodies
    pub dynamic: bool,
    pub linear_damping: f32,
    pub allows_rotation: bool,
}

impl BodySpec {
    /// Static body for a level cell. Returns `None` for empty cells.
    pub fn for_cell(cell: &Cell, tuning: &Tuning) -> Option<Self> {
        let shape = match cell.kind {
            ObjectKind::Wall => Shape::Rect {
                half_extents: Vec2::splat(tuning.tile_size / 2.0),
            },
            ObjectKind::Star | ObjectKind::Vortex | ObjectKind::Finish => Shape::Circle {
                radius: tuning.trigger_radius(),
            },
            ObjectKind::Player | ObjectKind::Empty => return None,
        };
        Some(Self {
            kind: cell.kind,
            position: cell.position,
            shape,
            masks: cell.kind.masks(),
            dynamic: false,
            linear_damping: 0.0,
            allows_rotation: false,
        })
    }

    /// Dynamic player body at the tuning's start position
    pub fn player(tuning: &Tuning) -> Self {
        Self {
            kind: ObjectKind::Player,
            position: tuning.player_start,
            shape: Shape::Circle {
                radius: tuning.player_radius,
            },
            masks: ObjectKind::Player.masks(),
            dynamic: true,
            linear_damping: tuning.linear_damping,
            allows_rotation: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPAWNABLE: [ObjectKind; 5] = [
        ObjectKind::Player,
        ObjectKind::Wall,
        ObjectKind::Star,
        ObjectKind::Vortex,
        ObjectKind::Finish,
    ];

    #[test]
    fn test_categories_are_distinct_powers_of_two() {
        let mut seen = Category::NONE;
        for kind in SPAWNABLE {
            let bits = kind.category().bits();
            assert!(bits.is_power_of_two(), "{:?}", kind);
            assert!(!seen.intersects(kind.category()), "{:?} reuses a bit", kind);
            seen = seen | kind.category();
        }
        assert_eq!(seen.bits(), 31);
        assert!(ObjectKind::Empty.category().is_empty());
    }

    #[test]
    fn test_player_blocked_only_by_walls() {
        let player = ObjectKind::Player.masks();
        for kind in SPAWNABLE {
            assert_eq!(
                player.blocked_by(&kind.masks()),
                kind == ObjectKind::Wall,
                "{:?}",
                kind
            );
        }
    }

    #[test]
    fn test_triggers_report_but_never_block() {
        let player = ObjectKind::Player.masks();
        for kind in [ObjectKind::Star, ObjectKind::Vortex, ObjectKind::Finish] {
            let masks = kind.masks();
            assert!(masks.collision.is_empty());
            assert!(player.reports_contact_with(&masks));
            assert!(masks.reports_contact_with(&player));
            assert!(!player.blocked_by(&masks));
            // Triggers never talk to each other or to walls
            assert!(!masks.reports_contact_with(&ObjectKind::Wall.masks()));
            assert!(!masks.reports_contact_with(&ObjectKind::Star.masks()));
        }
    }

    #[test]
    fn test_walls_never_report() {
        let wall = ObjectKind::Wall.masks();
        for kind in SPAWNABLE {
            assert!(!wall.reports_contact_with(&kind.masks()), "{:?}", kind);
        }
    }

    #[test]
    fn test_body_spec_for_cells() {
        let tuning = Tuning::default();
        let cell = |kind| Cell {
            kind,
            row: 0,
            column: 0,
            position: Vec2::new(32.0, 32.0),
        };

        let wall = BodySpec::for_cell(&cell(ObjectKind::Wall), &tuning).unwrap();
        assert!(!wall.dynamic);
        assert_eq!(
            wall.shape,
            Shape::Rect {
                half_extents: Vec2::splat(32.0)
            }
        );

        let star = BodySpec::for_cell(&cell(ObjectKind::Star), &tuning).unwrap();
        assert!(!star.dynamic);
        assert_eq!(star.masks.contact_test, Category::PLAYER);

        assert!(BodySpec::for_cell(&cell(ObjectKind::Empty), &tuning).is_none());
    }

    #[test]
    fn test_trigger_shapes_scale_with_tile_size() {
        let tuning = Tuning {
            tile_size: 32.0,
            ..Tuning::default()
        };
        let cell = Cell {
            kind: ObjectKind::Vortex,
            row: 0,
            column: 0,
            position: Vec2::new(16.0, 16.0),
        };
        let vortex = BodySpec::for_cell(&cell, &tuning).unwrap();
        assert_eq!(vortex.shape, Shape::Circle { radius: 16.0 });
    }

    #[test]
    fn test_player_spec() {
        let tuning = Tuning::default();
        let player = BodySpec::player(&tuning);
        assert!(player.dynamic);
        assert!(!player.allows_rotation);
        assert_eq!(player.position, Vec2::new(96.0, 672.0));
        assert_eq!(player.linear_damping, 0.5);
    }
}
