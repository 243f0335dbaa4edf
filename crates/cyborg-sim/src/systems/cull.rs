//! Cull system: removes nodes the camera has passed that are no longer visible.

use hecs::{Entity, World};
use log::trace;

use cyborg_core::components::{Camera, CameraLens, Geometry, Transform};
use cyborg_core::enums::{CullPolicy, NodeKind};
use cyborg_core::events::GameEvent;

use crate::engine::SceneCounters;
use crate::frustum::Frustum;
use crate::scheduler::Scheduler;
use crate::systems::contact::node_bounds;
use crate::world_setup::{self, node_id};

/// A node is culled when the camera has moved past it (`camera.z < node.z`)
/// and its bounds no longer touch the frustum. Requiring both keeps nodes
/// that are behind the camera but still on screen.
pub fn should_cull(camera_z: f32, node_z: f32, visible: bool) -> bool {
    camera_z < node_z && !visible
}

/// Remove every node that satisfies `should_cull` under `policy`.
/// Uses a pre-allocated buffer to avoid per-frame allocation.
pub fn run(
    world: &mut World,
    scheduler: &mut Scheduler,
    camera_pose: (&Transform, &CameraLens),
    policy: CullPolicy,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
    counters: &mut SceneCounters,
) {
    despawn_buffer.clear();

    let (camera_transform, lens) = camera_pose;
    let camera_z = camera_transform.position.z;
    let frustum = Frustum::from_camera(camera_transform, lens);

    for (entity, (transform, geometry, camera)) in world
        .query::<(&Transform, &Geometry, Option<&Camera>)>()
        .iter()
    {
        if camera.is_some() {
            continue;
        }
        let visible = frustum.intersects_aabb(&node_bounds(transform, geometry));
        if should_cull(camera_z, transform.position.z, visible) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let kind = world_setup::node_kind(world, entity);
        let exempt = policy == CullPolicy::BuildingsOnly && kind != Some(NodeKind::Building);
        if exempt {
            continue;
        }
        if let Some(kind) = world_setup::remove_node(world, scheduler, entity) {
            trace!("culled {kind:?} {}", node_id(entity));
            counters.culled_total += 1;
            events.push(GameEvent::Culled {
                id: node_id(entity),
                kind,
            });
        }
    }
}
