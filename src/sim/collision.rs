//! Contact detection
//!
//! Every entity is approximated by a circle around its centre. Two entities
//! touch when their centres are closer than the sum of their bounding radii.
//! With the default radius that is a flat 1.0 units whatever the entity's
//! drawn size.

use glam::Vec2;

use crate::consts::CONTACT_RADIUS;

/// Anything that can take part in a contact test
pub trait Collider {
    fn position(&self) -> Vec2;

    fn bounding_radius(&self) -> f32 {
        CONTACT_RADIUS
    }
}

/// A bare point with the default radius
impl Collider for Vec2 {
    fn position(&self) -> Vec2 {
        *self
    }
}

/// Check whether two colliders overlap
pub fn collides(a: &dyn Collider, b: &dyn Collider) -> bool {
    let reach = a.bounding_radius() + b.bounding_radius();
    a.position().distance_squared(b.position()) < reach * reach
}

/// Indices of every target touching `probe`, in order
pub fn contacts<'a, T: Collider>(
    probe: &'a dyn Collider,
    targets: &'a [T],
) -> impl Iterator<Item = usize> + 'a {
    targets
        .iter()
        .enumerate()
        .filter(move |(_, target)| collides(probe, *target))
        .map(|(i, _)| i)
}

/// Check whether `probe` touches any target
pub fn touches_any<T: Collider>(probe: &dyn Collider, targets: &[T]) -> bool {
    targets.iter().any(|target| collides(probe, target))
}

/// Bounce a projectile straight back the way it came
#[inline]
pub fn reflect(vel: Vec2) -> Vec2 {
    -vel
}
