//! Contact detection and deferred contact resolution.
//!
//! Detection never mutates the scene: each touching pair is queued and
//! reported. The engine applies the queue at the start of the next frame,
//! removing both nodes of every pair.

use std::collections::VecDeque;

use hecs::{Entity, World};
use log::debug;

use cyborg_core::components::{Body, Geometry, Transform};
use cyborg_core::events::GameEvent;
use cyborg_core::types::Aabb;

use crate::engine::SceneCounters;
use crate::scheduler::Scheduler;
use crate::world_setup::{self, node_id};

/// A pair of tracked bodies found touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: Entity,
    pub b: Entity,
}

/// Whether two bodies report contacts with each other.
pub fn bodies_interact(a: &Body, b: &Body) -> bool {
    a.category.intersects(b.contact_mask) || b.category.intersects(a.contact_mask)
}

/// World-space bounds of a node with box geometry.
pub fn node_bounds(transform: &Transform, geometry: &Geometry) -> Aabb {
    Aabb::from_center_size(transform.position, geometry.size)
}

/// Find every touching, interacting pair of bodies and queue it.
pub fn detect(world: &World, queue: &mut VecDeque<Contact>, events: &mut Vec<GameEvent>) {
    let mut bodies: Vec<(Entity, Aabb, Body)> = world
        .query::<(&Transform, &Geometry, &Body)>()
        .iter()
        .map(|(entity, (transform, geometry, body))| {
            (entity, node_bounds(transform, geometry), *body)
        })
        .collect();
    // Query order follows archetype layout; sort for a stable pair order.
    bodies.sort_by_key(|(entity, _, _)| entity.to_bits());

    for (i, (a, a_bounds, a_body)) in bodies.iter().enumerate() {
        for (b, b_bounds, b_body) in &bodies[i + 1..] {
            if !bodies_interact(a_body, b_body) || !a_bounds.intersects(b_bounds) {
                continue;
            }
            debug!("contact {} <-> {}", node_id(*a), node_id(*b));
            queue.push_back(Contact { a: *a, b: *b });
            events.push(GameEvent::Contact {
                a: node_id(*a),
                b: node_id(*b),
            });
        }
    }
}

/// Remove both nodes of every queued contact. Nodes already removed (by an
/// earlier pair, a cull or an expiry) are skipped.
pub fn resolve(
    world: &mut World,
    scheduler: &mut Scheduler,
    queue: &mut VecDeque<Contact>,
    events: &mut Vec<GameEvent>,
    counters: &mut SceneCounters,
) {
    while let Some(contact) = queue.pop_front() {
        for entity in [contact.a, contact.b] {
            if let Some(kind) = world_setup::remove_node(world, scheduler, entity) {
                counters.destroyed_total += 1;
                events.push(GameEvent::Destroyed {
                    id: node_id(entity),
                    kind,
                });
            }
        }
    }
}
