//! Runs scheduled tasks that came due this frame.

use hecs::World;
use log::debug;

use cyborg_core::components::{Highlight, Material, Transform};
use cyborg_core::enums::NodeKind;
use cyborg_core::events::GameEvent;

use crate::scheduler::{Scheduler, TimedAction};
use crate::world_setup::{self, node_id};

/// Drain and apply every task due at `now`. Tasks whose node is already
/// gone do nothing.
pub fn run(world: &mut World, scheduler: &mut Scheduler, now: f64, events: &mut Vec<GameEvent>) {
    for action in scheduler.drain_due(now) {
        match action {
            TimedAction::Despawn(entity) => {
                let position = world
                    .get::<&Transform>(entity)
                    .map(|t| t.position)
                    .unwrap_or_default();
                match world_setup::remove_node(world, scheduler, entity) {
                    Some(NodeKind::Bullet) => {
                        debug!("bullet {} expired at {position}", node_id(entity));
                        events.push(GameEvent::BulletExpired {
                            id: node_id(entity),
                            position,
                        });
                    }
                    Some(kind) => debug!("timed removal of {kind:?} {}", node_id(entity)),
                    None => {}
                }
            }
            TimedAction::ClearHighlight(entity) => {
                let Ok(mut material) = world.get::<&mut Material>(entity) else {
                    continue;
                };
                material.emission = None;
                drop(material);
                let _ = world.remove_one::<Highlight>(entity);
                events.push(GameEvent::HighlightCleared {
                    id: node_id(entity),
                });
            }
        }
    }
}
