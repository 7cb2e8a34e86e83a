//! Physics world interface and a small reference world
//!
//! The game only needs a world that can spawn bodies from a [`BodySpec`],
//! apply a global gravity vector, and report when two bodies *start*
//! overlapping according to their contact-test masks. [`MazeWorld`] does
//! exactly that with per-body overlap queries: dynamic circles are moved by
//! gravity, pushed out of bodies in their collision mask, and contacts are
//! reported once per overlap (on begin, not every tick). Any pair can report,
//! moving or not, unless one side has contacts disabled.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{BodyMasks, BodySpec, Shape};
use super::collision::{ball_shape_collision, slide_velocity};
use super::level::ObjectKind;

/// Push-out passes per dynamic body per step
const RESOLVE_ITERATIONS: usize = 4;

/// Stable handle for a spawned body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// One side of a contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactBody {
    pub id: BodyId,
    pub kind: ObjectKind,
    pub position: Vec2,
}

/// Two bodies began overlapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub a: ContactBody,
    pub b: ContactBody,
}

/// What the game needs from a 2D physics engine
pub trait PhysicsWorld {
    fn spawn(&mut self, spec: BodySpec) -> BodyId;
    /// Returns false if the body was already gone
    fn despawn(&mut self, id: BodyId) -> bool;
    fn gravity(&self) -> Vec2;
    fn set_gravity(&mut self, gravity: Vec2);
    /// Non-dynamic bodies ignore gravity and are never pushed
    fn set_dynamic(&mut self, id: BodyId, dynamic: bool);
    /// A body with contacts disabled never takes part in a contact, whatever its masks
    fn set_contacts_enabled(&mut self, id: BodyId, enabled: bool);
    fn position(&self, id: BodyId) -> Option<Vec2>;
    fn set_position(&mut self, id: BodyId, position: Vec2);
    /// Visual scale (does not change the collision shape)
    fn set_scale(&mut self, id: BodyId, scale: f32);
    /// Advance by `dt` and return contacts that began during the step
    fn step(&mut self, dt: f32) -> Vec<Contact>;
}

/// A body in the reference world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub kind: ObjectKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub shape: Shape,
    pub masks: BodyMasks,
    pub dynamic: bool,
    pub linear_damping: f32,
    pub scale: f32,
    pub contacts_enabled: bool,
}

impl Body {
    /// Radius used when this body moves (dynamic bodies are treated as circles)
    fn ball_radius(&self) -> f32 {
        match self.shape {
            Shape::Circle { radius } => radius,
            Shape::Rect { half_extents } => half_extents.max_element(),
        }
    }

    fn as_contact(&self) -> ContactBody {
        ContactBody {
            id: self.id,
            kind: self.kind,
            position: self.position,
        }
    }
}

/// Deterministic overlap-query world (bodies iterate in id order)
#[derive(Debug, Clone)]
pub struct MazeWorld {
    bodies: Vec<Body>,
    gravity: Vec2,
    /// Gravity units to world units
    points_per_meter: f32,
    /// Pairs overlapping at the end of the last step
    touching: BTreeSet<(BodyId, BodyId)>,
    next_id: u32,
}

impl MazeWorld {
    /// Gravity starts at zero until the first input sample arrives
    pub fn new(points_per_meter: f32) -> Self {
        Self {
            bodies: Vec::new(),
            gravity: Vec2::ZERO,
            points_per_meter,
            touching: BTreeSet::new(),
            next_id: 1,
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn count(&self, kind: ObjectKind) -> usize {
        self.bodies.iter().filter(|b| b.kind == kind).count()
    }

    fn integrate(&mut self, index: usize, dt: f32) {
        let gravity = self.gravity * self.points_per_meter;
        let body = &mut self.bodies[index];
        body.velocity += gravity * dt;
        body.velocity *= (1.0 - body.linear_damping * dt).max(0.0);
        body.position += body.velocity * dt;

        let (id, masks, radius) = (body.id, body.masks, body.ball_radius());
        let blockers: Vec<(Vec2, Shape)> = self
            .bodies
            .iter()
            .filter(|o| o.id != id && masks.blocked_by(&o.masks))
            .map(|o| (o.position, o.shape))
            .collect();

        let body = &mut self.bodies[index];
        for _ in 0..RESOLVE_ITERATIONS {
            let mut moved = false;
            for (pos, shape) in &blockers {
                let hit = ball_shape_collision(body.position, radius, *pos, shape);
                if hit.hit && hit.penetration > 0.0 {
                    body.position += hit.normal * hit.penetration;
                    body.velocity = slide_velocity(body.velocity, hit.normal);
                    moved = true;
                }
            }
            if !moved {
                break;
            }
        }
    }

    fn collect_contacts(&mut self) -> Vec<Contact> {
        let mut now_touching = BTreeSet::new();
        let mut began = Vec::new();

        for (i, first) in self.bodies.iter().enumerate() {
            for second in &self.bodies[i + 1..] {
                if !first.contacts_enabled
                    || !second.contacts_enabled
                    || !first.masks.reports_contact_with(&second.masks)
                {
                    continue;
                }
                // The moving (or round) body is the ball, and is reported first
                let (ball, other) = if second.dynamic && !first.dynamic {
                    (second, first)
                } else if first.dynamic || matches!(first.shape, Shape::Circle { .. }) {
                    (first, second)
                } else {
                    (second, first)
                };
                if !ball_shape_collision(ball.position, ball.ball_radius(), other.position, &other.shape)
                    .hit
                {
                    continue;
                }
                let key = (first.id, second.id);
                now_touching.insert(key);
                if !self.touching.contains(&key) {
                    began.push(Contact {
                        a: ball.as_contact(),
                        b: other.as_contact(),
                    });
                }
            }
        }

        self.touching = now_touching;
        began
    }
}

impl Default for MazeWorld {
    fn default() -> Self {
        Self::new(crate::consts::POINTS_PER_METER)
    }
}

impl PhysicsWorld for MazeWorld {
    fn spawn(&mut self, spec: BodySpec) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            kind: spec.kind,
            position: spec.position,
            velocity: Vec2::ZERO,
            shape: spec.shape,
            masks: spec.masks,
            dynamic: spec.dynamic,
            linear_damping: spec.linear_damping,
            scale: 1.0,
            contacts_enabled: true,
        });
        id
    }

    fn despawn(&mut self, id: BodyId) -> bool {
        let before = self.bodies.len();
        self.bodies.retain(|b| b.id != id);
        self.touching.retain(|(a, b)| *a != id && *b != id);
        self.bodies.len() != before
    }

    fn gravity(&self) -> Vec2 {
        self.gravity
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn set_dynamic(&mut self, id: BodyId, dynamic: bool) {
        if let Some(body) = self.body_mut(id) {
            body.dynamic = dynamic;
            if !dynamic {
                body.velocity = Vec2::ZERO;
            }
        }
    }

    fn set_contacts_enabled(&mut self, id: BodyId, enabled: bool) {
        if let Some(body) = self.body_mut(id) {
            body.contacts_enabled = enabled;
        }
    }

    fn position(&self, id: BodyId) -> Option<Vec2> {
        self.body(id).map(|b| b.position)
    }

    fn set_position(&mut self, id: BodyId, position: Vec2) {
        if let Some(body) = self.body_mut(id) {
            body.position = position;
        }
    }

    fn set_scale(&mut self, id: BodyId, scale: f32) {
        if let Some(body) = self.body_mut(id) {
            body.scale = scale;
        }
    }

    fn step(&mut self, dt: f32) -> Vec<Contact> {
        for index in 0..self.bodies.len() {
            if self.bodies[index].dynamic {
                self.integrate(index, dt);
            }
        }
        self.collect_contacts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::Cell;
    use crate::tuning::Tuning;

    fn spawn_cell(world: &mut MazeWorld, kind: ObjectKind, row: usize, column: usize) -> BodyId {
        let tuning = Tuning::default();
        let cell = Cell {
            kind,
            row,
            column,
            position: crate::tile_center(row, column, tuning.tile_size),
        };
        world.spawn(BodySpec::for_cell(&cell, &tuning).unwrap())
    }

    fn player_at(world: &mut MazeWorld, position: Vec2) -> BodyId {
        let mut spec = BodySpec::player(&Tuning::default());
        spec.position = position;
        world.spawn(spec)
    }

    #[test]
    fn test_gravity_moves_dynamic_bodies_only() {
        let mut world = MazeWorld::default();
        let star = spawn_cell(&mut world, ObjectKind::Star, 5, 5);
        let player = player_at(&mut world, Vec2::new(100.0, 100.0));
        world.set_gravity(Vec2::new(1.0, 0.0));

        for _ in 0..10 {
            world.step(1.0 / 60.0);
        }
        assert!(world.position(player).unwrap().x > 100.0);
        assert_eq!(world.position(star), Some(crate::tile_center(5, 5, 64.0)));
    }

    #[test]
    fn test_walls_block_without_contacts() {
        let mut world = MazeWorld::default();
        // Wall occupies x in [64, 128]
        spawn_cell(&mut world, ObjectKind::Wall, 0, 1);
        let player = player_at(&mut world, Vec2::new(32.0, 32.0));
        world.set_gravity(Vec2::new(5.0, 0.0));

        for _ in 0..120 {
            let contacts = world.step(1.0 / 60.0);
            assert!(contacts.is_empty());
        }
        let pos = world.position(player).unwrap();
        assert!(pos.x <= 64.0 - 24.0 + 0.01, "player went through wall: {pos}");
    }

    #[test]
    fn test_triggers_report_once_and_do_not_block() {
        let mut world = MazeWorld::default();
        let star = spawn_cell(&mut world, ObjectKind::Star, 0, 1);
        let player = player_at(&mut world, Vec2::new(96.0, 32.0));

        // Already overlapping: reported on the first step only
        let contacts = world.step(1.0 / 60.0);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].a.id, player);
        assert_eq!(contacts[0].b.id, star);
        assert_eq!(contacts[0].b.kind, ObjectKind::Star);
        assert!(world.step(1.0 / 60.0).is_empty());

        // Rolling through the star is not impeded
        world.set_gravity(Vec2::new(5.0, 0.0));
        for _ in 0..60 {
            world.step(1.0 / 60.0);
        }
        assert!(world.position(player).unwrap().x > 160.0);
    }

    #[test]
    fn test_disabled_contacts_silence_a_moving_player() {
        let mut world = MazeWorld::default();
        spawn_cell(&mut world, ObjectKind::Star, 0, 0);
        let player = player_at(&mut world, Vec2::new(32.0, 32.0));
        world.set_contacts_enabled(player, false);

        // Still dynamic and still overlapping, but nothing is reported
        assert!(world.body(player).unwrap().dynamic);
        assert!(world.step(1.0 / 60.0).is_empty());

        // Re-enabling reports the overlap that is already there
        world.set_contacts_enabled(player, true);
        assert_eq!(world.step(1.0 / 60.0).len(), 1);
    }

    #[test]
    fn test_frozen_player_still_reports_unless_disabled() {
        let mut world = MazeWorld::default();
        let star = spawn_cell(&mut world, ObjectKind::Star, 0, 0);
        let player = player_at(&mut world, Vec2::new(200.0, 200.0));
        world.set_dynamic(player, false);
        assert_eq!(world.body(player).unwrap().velocity, Vec2::ZERO);

        // Moved onto the star from outside (like a scripted slide)
        world.set_position(player, Vec2::new(32.0, 32.0));
        let contacts = world.step(1.0 / 60.0);
        assert_eq!(contacts.len(), 1);
        let ids = [contacts[0].a.id, contacts[0].b.id];
        assert!(ids.contains(&player) && ids.contains(&star));

        let mut world = MazeWorld::default();
        spawn_cell(&mut world, ObjectKind::Star, 0, 0);
        let player = player_at(&mut world, Vec2::new(200.0, 200.0));
        world.set_dynamic(player, false);
        world.set_contacts_enabled(player, false);
        world.set_position(player, Vec2::new(32.0, 32.0));
        assert!(world.step(1.0 / 60.0).is_empty());
    }

    #[test]
    fn test_static_triggers_never_report_each_other() {
        let mut world = MazeWorld::default();
        spawn_cell(&mut world, ObjectKind::Star, 0, 0);
        spawn_cell(&mut world, ObjectKind::Vortex, 0, 0);
        spawn_cell(&mut world, ObjectKind::Wall, 0, 0);
        assert!(world.step(1.0 / 60.0).is_empty());
    }

    #[test]
    fn test_despawn() {
        let mut world = MazeWorld::default();
        let star = spawn_cell(&mut world, ObjectKind::Star, 0, 0);
        assert!(world.despawn(star));
        assert!(!world.despawn(star));
        assert_eq!(world.count(ObjectKind::Star), 0);
        assert_eq!(world.position(star), None);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut world = MazeWorld::default();
        let a = spawn_cell(&mut world, ObjectKind::Star, 0, 0);
        world.despawn(a);
        let b = spawn_cell(&mut world, ObjectKind::Star, 0, 0);
        assert!(b > a);
    }
}
