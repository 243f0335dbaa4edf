//! Spawn cadence: one building every 0.5 s and one enemy every 1.0 s,
//! each appearing a fixed distance ahead of the camera.

use hecs::World;
use log::debug;

use cyborg_core::config::GameConfig;
use cyborg_core::enums::NodeKind;
use cyborg_core::events::GameEvent;

use crate::engine::SceneCounters;
use crate::random::UniformRange;
use crate::world_setup::{self, node_id};

/// Next game-clock time at which each spawner fires. Both start at 0, so
/// both fire on the first frame with a positive clock.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnTimers {
    pub next_building: f64,
    pub next_enemy: f64,
}

/// Fire any due spawner, at most once each per frame. A fired timer is
/// re-armed relative to `now`, so a stalled frame never causes a burst.
#[allow(clippy::too_many_arguments)]
pub fn run<R: UniformRange + ?Sized>(
    world: &mut World,
    rng: &mut R,
    timers: &mut SpawnTimers,
    config: &GameConfig,
    now: f64,
    camera_z: f32,
    events: &mut Vec<GameEvent>,
    counters: &mut SceneCounters,
) {
    let z = camera_z - config.spawn.distance;

    if now > timers.next_building {
        let entity = world_setup::spawn_building(world, rng, &config.building, z);
        timers.next_building = now + config.spawn.building_interval;
        record_spawn(world, entity, NodeKind::Building, events, counters);
    }

    if now > timers.next_enemy {
        let entity = world_setup::spawn_enemy(world, rng, &config.enemy, z);
        timers.next_enemy = now + config.spawn.enemy_interval;
        record_spawn(world, entity, NodeKind::Enemy, events, counters);
    }
}

fn record_spawn(
    world: &World,
    entity: hecs::Entity,
    kind: NodeKind,
    events: &mut Vec<GameEvent>,
    counters: &mut SceneCounters,
) {
    let position = world
        .get::<&cyborg_core::components::Transform>(entity)
        .map(|t| t.position)
        .unwrap_or_default();

    debug!("spawned {kind:?} {} at {position}", node_id(entity));
    counters.spawned_total += 1;
    events.push(GameEvent::Spawned {
        id: node_id(entity),
        kind,
        position,
    });
}
