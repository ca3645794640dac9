use glam::Vec2;

use crate::entity::{Body, Color};

/// Buffer zone subtracted from the combined radii so that float error near
/// the touching distance cannot leave two bodies stuck together.
pub const COLLISION_BUFFER: f32 = 2.0;

/// How far a damaged body is pushed along the separation vector per
/// resolution step.
pub const COLLISION_PUSH_BACK: f32 = 2.0;

/// Health removed from the damaged side per resolution step.
pub const COLLISION_DAMAGE: i32 = 5;

/// Circle collider whose center is kept in sync with its body's position
/// by [`Body::translate`].
#[derive(Clone, Copy, Debug)]
pub struct CircleCollider {
    pub center: Vec2,
    pub radius: f32,
}

/// Two colliders collide iff the circles overlap *and* the center distance
/// is strictly inside the combined radii minus [`COLLISION_BUFFER`].
pub fn colliding(a: &CircleCollider, b: &CircleCollider) -> bool {
    let distance = a.center.distance(b.center);
    let total_radii = a.radius + b.radius;
    distance < total_radii && distance < total_radii - COLLISION_BUFFER
}

/// Apply one collision resolution step: damage the colliding body, recolor
/// the other as feedback, and push the damaged body out along the normalized
/// separation vector (collider kept in sync with the new position).
///
/// Turning the contact into `CollisionStart`/`CollisionEnd` events is the
/// game loop's job; this step only separates and damages.
pub fn resolve(damaged: &mut Body, other: &mut Body) {
    damaged.health -= COLLISION_DAMAGE;
    other.color = Color::RED;

    let separation = damaged.position - other.position;
    // Perfectly coincident centers have no separation direction; pick one.
    let direction = if separation.length_squared() > f32::EPSILON {
        separation.normalize()
    } else {
        Vec2::X
    };
    damaged.translate(direction * COLLISION_PUSH_BACK);
}
