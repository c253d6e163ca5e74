//! Collision detection and response for the marble
//!
//! Circle-vs-axis-aligned-rectangle tests plus the reflection math applied
//! when the marble strikes a wall.

use glam::Vec2;

use crate::layout::WallRect;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Collision point (if hit)
    pub point: Vec2,
    /// Surface normal at the contact, pointing toward the marble center
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

/// Check collision between the marble and a wall rectangle
///
/// Exterior contacts use the closest point on the rect, which handles faces
/// and corners uniformly. A center that has tunneled inside the rect
/// resolves against the nearest face.
pub fn ball_rect_collision(ball_pos: Vec2, ball_radius: f32, rect: &WallRect) -> CollisionResult {
    let closest = rect.closest_point(ball_pos);
    let offset = ball_pos - closest;
    let dist_sq = offset.length_squared();

    if dist_sq > 1e-6 {
        // Center outside the rect
        let dist = dist_sq.sqrt();
        if dist < ball_radius {
            return CollisionResult {
                hit: true,
                point: closest,
                normal: offset / dist,
                penetration: ball_radius - dist,
            };
        }
        return CollisionResult::miss();
    }

    // Center inside the rect - push out through the nearest face
    let min = rect.min();
    let max = rect.max();
    let to_left = ball_pos.x - min.x;
    let to_right = max.x - ball_pos.x;
    let to_bottom = ball_pos.y - min.y;
    let to_top = max.y - ball_pos.y;
    let nearest = to_left.min(to_right).min(to_bottom).min(to_top);

    let (normal, face_dist) = if nearest == to_left {
        (Vec2::new(-1.0, 0.0), to_left)
    } else if nearest == to_right {
        (Vec2::new(1.0, 0.0), to_right)
    } else if nearest == to_bottom {
        (Vec2::new(0.0, -1.0), to_bottom)
    } else {
        (Vec2::new(0.0, 1.0), to_top)
    };

    CollisionResult {
        hit: true,
        point: ball_pos - normal * face_dist,
        normal,
        penetration: ball_radius + face_dist,
    }
}

/// Reflect velocity off a surface, keeping `restitution` of the normal
/// component: v' = v - (1 + e)(v.n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    velocity - (1.0 + restitution) * velocity.dot(normal) * normal
}
