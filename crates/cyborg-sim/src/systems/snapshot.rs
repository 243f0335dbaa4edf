//! Snapshot system: queries the ECS world and builds a complete GameSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use cyborg_core::components::*;
use cyborg_core::enums::{GamePhase, NodeKind, TapMode};
use cyborg_core::events::GameEvent;
use cyborg_core::state::*;
use cyborg_core::types::FrameTime;

use crate::engine::SceneCounters;
use crate::world_setup::{node_id, node_kind};

/// Engine-side values that are not stored in the world.
pub struct SnapshotContext<'a> {
    pub time: FrameTime,
    pub phase: GamePhase,
    pub tap_mode: TapMode,
    pub camera: Entity,
    pub player: Entity,
    pub counters: &'a SceneCounters,
    pub pending_tasks: usize,
}

/// Build a complete GameSnapshot from the current world state.
pub fn build_snapshot(world: &World, ctx: SnapshotContext<'_>, events: Vec<GameEvent>) -> GameSnapshot {
    let nodes = build_nodes(world);

    let count = |kind: NodeKind| nodes.iter().filter(|n| n.kind == kind).count() as u32;
    let stats = SceneStats {
        buildings: count(NodeKind::Building),
        enemies: count(NodeKind::Enemy),
        bullets: count(NodeKind::Bullet),
        spawned_total: ctx.counters.spawned_total,
        culled_total: ctx.counters.culled_total,
        destroyed_total: ctx.counters.destroyed_total,
        bullets_fired: ctx.counters.bullets_fired,
        pending_tasks: ctx.pending_tasks as u32,
    };

    GameSnapshot {
        time: ctx.time,
        phase: ctx.phase,
        tap_mode: ctx.tap_mode,
        camera: build_camera(world, ctx.camera),
        player: build_player(world, ctx.player),
        nodes,
        events,
        stats,
    }
}

fn build_camera(world: &World, camera: Entity) -> CameraView {
    world
        .get::<&Transform>(camera)
        .map(|t| CameraView {
            position: t.position,
            rotation: t.rotation,
        })
        .unwrap_or_default()
}

fn build_player(world: &World, player: Entity) -> Option<PlayerView> {
    let transform = world.get::<&Transform>(player).ok()?;
    Some(PlayerView {
        id: node_id(player),
        position: transform.position,
        roll: transform.rotation.z,
    })
}

/// Every drawable node except the camera, ordered by id.
fn build_nodes(world: &World) -> Vec<NodeView> {
    let mut nodes: Vec<NodeView> = world
        .query::<(&Transform, &Geometry, &Material)>()
        .iter()
        .filter_map(|(entity, (transform, geometry, material))| {
            let kind = node_kind(world, entity)?;
            Some(NodeView {
                id: node_id(entity),
                kind,
                position: transform.position,
                rotation: transform.rotation,
                size: geometry.size,
                color: material.diffuse,
                highlighted: material.emission.is_some(),
            })
        })
        .collect();

    nodes.sort_by_key(|node| node.id);
    nodes
}
