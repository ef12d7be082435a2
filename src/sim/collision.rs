//! Collision detection and response
//!
//! Everything is a circle. Two bodies touch when their centers are closer
//! than the sum of their radii; exact tangency does not count.

use super::aquarium::Aquarium;
use super::player::PlayerCreature;
use super::state::{Body, Creature, EntityId, GameEvent};

/// Strict radius overlap test
#[inline]
pub fn check_collision(a: &Body, b: &Body) -> bool {
    a.distance_to(b) < a.radius + b.radius
}

/// Separate two overlapping bodies
///
/// Both headings are reversed, then each body is pushed half the penetration
/// depth along the line between centers. Coincident centers have no such line,
/// so only the reversal applies.
pub fn resolve_overlap(a: &mut Body, b: &mut Body) {
    a.dir = -a.dir;
    b.dir = -b.dir;

    let delta = a.pos - b.pos;
    let dist = delta.length();
    if dist > 0.0 {
        let overlap = (a.radius + b.radius - dist) / 2.0;
        let push = delta / dist * overlap;
        a.pos += push;
        b.pos -= push;
    }
}

/// O(n²) pass over every pair, resolving each overlap in index order
pub fn resolve_pairwise(creatures: &mut [Creature]) {
    for i in 0..creatures.len() {
        let (head, tail) = creatures.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if check_collision(&a.body, &b.body) {
                resolve_overlap(&mut a.body, &mut b.body);
            }
        }
    }
}

/// First creature in list order touching the player, as a collision event
pub fn detect_aquarium_collision(aquarium: &Aquarium, player: &PlayerCreature) -> Option<GameEvent> {
    aquarium
        .creatures()
        .iter()
        .find(|npc| check_collision(player.body(), &npc.body))
        .map(|npc| GameEvent::collision(player.id(), npc.id))
}

/// First power-up in list order touching the player
pub fn detect_power_up_collision(aquarium: &Aquarium, player: &PlayerCreature) -> Option<EntityId> {
    aquarium
        .power_ups()
        .iter()
        .find(|pickup| check_collision(player.body(), &pickup.body))
        .map(|pickup| pickup.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::FishKind;
    use glam::Vec2;
    use proptest::prelude::*;

    fn body(x: f32, y: f32, radius: f32, dx: f32, dy: f32) -> Body {
        let mut body = Body::new(Vec2::new(x, y), 1.0, radius);
        body.dir = Vec2::new(dx, dy);
        body
    }

    #[test]
    fn test_tangent_is_not_a_collision() {
        let a = body(0.0, 0.0, 10.0, 0.0, 0.0);
        let b = body(25.0, 0.0, 15.0, 0.0, 0.0);
        assert!(!check_collision(&a, &b));
        let c = body(24.9, 0.0, 15.0, 0.0, 0.0);
        assert!(check_collision(&a, &c));
    }

    #[test]
    fn test_resolve_separates_to_contact() {
        let mut a = body(0.0, 0.0, 30.0, 1.0, 0.0);
        let mut b = body(40.0, 0.0, 30.0, -1.0, 0.5);
        resolve_overlap(&mut a, &mut b);

        assert_eq!(a.pos, Vec2::new(-10.0, 0.0));
        assert_eq!(b.pos, Vec2::new(50.0, 0.0));
        assert_eq!(a.dir, Vec2::new(-1.0, 0.0));
        assert_eq!(b.dir, Vec2::new(1.0, -0.5));
    }

    #[test]
    fn test_resolve_coincident_only_reverses() {
        let mut a = body(5.0, 5.0, 30.0, 1.0, 1.0);
        let mut b = body(5.0, 5.0, 30.0, 0.0, -1.0);
        resolve_overlap(&mut a, &mut b);
        assert_eq!(a.pos, Vec2::new(5.0, 5.0));
        assert_eq!(b.pos, Vec2::new(5.0, 5.0));
        assert_eq!(a.dir, Vec2::new(-1.0, -1.0));
        assert_eq!(b.dir, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_pairwise_touches_only_overlapping_pairs() {
        let mut fish = vec![
            Creature::fish(FishKind::Common, Vec2::new(0.0, 0.0), 1.0, Vec2::X, None),
            Creature::fish(FishKind::Common, Vec2::new(50.0, 0.0), 1.0, Vec2::NEG_X, None),
            Creature::fish(FishKind::Common, Vec2::new(500.0, 500.0), 1.0, Vec2::Y, None),
        ];
        resolve_pairwise(&mut fish);

        assert_eq!(fish[0].body.dir, Vec2::NEG_X);
        assert_eq!(fish[1].body.dir, Vec2::X);
        assert!((fish[0].body.distance_to(&fish[1].body) - 60.0).abs() < 1e-4);
        assert_eq!(fish[2].body.dir, Vec2::Y);
        assert_eq!(fish[2].body.pos, Vec2::new(500.0, 500.0));
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ax in -200.0f32..200.0, ay in -200.0f32..200.0, ar in 1.0f32..80.0,
            bx in -200.0f32..200.0, by in -200.0f32..200.0, br in 1.0f32..80.0,
        ) {
            let a = body(ax, ay, ar, 0.0, 0.0);
            let b = body(bx, by, br, 0.0, 0.0);
            prop_assert_eq!(check_collision(&a, &b), check_collision(&b, &a));
        }

        #[test]
        fn prop_resolution_restores_contact_distance(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0, ar in 5.0f32..60.0,
            ox in -30.0f32..30.0, oy in -30.0f32..30.0, br in 5.0f32..60.0,
            dx in -1.0f32..1.0, dy in -1.0f32..1.0,
        ) {
            let mut a = body(ax, ay, ar, dx, dy);
            let mut b = body(ax + ox, ay + oy, br, dy, dx);
            prop_assume!(a.distance_to(&b) > 1e-3);
            prop_assume!(check_collision(&a, &b));

            resolve_overlap(&mut a, &mut b);
            prop_assert!((a.distance_to(&b) - (ar + br)).abs() < 1e-2);
            prop_assert_eq!(a.dir, Vec2::new(-dx, -dy));
            prop_assert_eq!(b.dir, Vec2::new(-dy, -dx));
        }
    }
}
