//! Overlap tests between the player ball and level bodies
//!
//! Walls are axis-aligned squares, everything else is a circle. Each test
//! returns the contact normal (pointing toward the ball centre) and the
//! penetration depth so blocking bodies can push the ball back out.

use glam::Vec2;

use super::body::Shape;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the shapes overlap
    pub hit: bool,
    /// Closest point on the other shape (if hit)
    pub point: Vec2,
    /// Surface normal at the contact, pointing toward the ball centre
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a ball against an axis-aligned rectangle
pub fn ball_rect_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    rect_center: Vec2,
    half_extents: Vec2,
) -> CollisionResult {
    let local = ball_pos - rect_center;
    let closest = local.clamp(-half_extents, half_extents);
    let offset = local - closest;
    let dist_sq = offset.length_squared();

    if dist_sq > 0.0 {
        if dist_sq >= ball_radius * ball_radius {
            return CollisionResult::miss();
        }
        let dist = dist_sq.sqrt();
        return CollisionResult {
            hit: true,
            point: rect_center + closest,
            normal: offset / dist,
            penetration: ball_radius - dist,
        };
    }

    // Ball centre is inside the rectangle - push out through the nearest face
    let to_edge = half_extents - local.abs();
    let (normal, depth) = if to_edge.x < to_edge.y {
        (Vec2::new(local.x.signum(), 0.0), to_edge.x)
    } else {
        (Vec2::new(0.0, local.y.signum()), to_edge.y)
    };
    CollisionResult {
        hit: true,
        point: ball_pos + normal * depth,
        normal,
        penetration: depth + ball_radius,
    }
}

/// Check a ball against another circle
pub fn ball_circle_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    center: Vec2,
    radius: f32,
) -> CollisionResult {
    let offset = ball_pos - center;
    let dist = offset.length();
    let reach = ball_radius + radius;

    if dist >= reach {
        return CollisionResult::miss();
    }

    // Concentric circles have no meaningful direction; push straight up
    let normal = if dist > f32::EPSILON {
        offset / dist
    } else {
        Vec2::Y
    };
    CollisionResult {
        hit: true,
        point: center + normal * radius,
        normal,
        penetration: reach - dist,
    }
}

/// Check a ball against any body shape
pub fn ball_shape_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    shape_pos: Vec2,
    shape: &Shape,
) -> CollisionResult {
    match *shape {
        Shape::Circle { radius } => ball_circle_collision(ball_pos, ball_radius, shape_pos, radius),
        Shape::Rect { half_extents } => {
            ball_rect_collision(ball_pos, ball_radius, shape_pos, half_extents)
        }
    }
}

/// Remove the part of `velocity` that drives into a surface
#[inline]
pub fn slide_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    let into = velocity.dot(normal);
    if into < 0.0 {
        velocity - into * normal
    } else {
        velocity
    }
}
