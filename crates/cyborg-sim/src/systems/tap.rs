//! Tap handling: fire a bullet from the player, or highlight the tapped node.

use glam::Vec2;
use hecs::{Entity, World};
use log::debug;

use cyborg_core::components::{Camera, CameraLens, Geometry, Highlight, Material, Transform};
use cyborg_core::config::{BulletConfig, TapConfig};
use cyborg_core::events::GameEvent;
use cyborg_core::types::Ray;

use crate::engine::SceneCounters;
use crate::frustum::screen_ray;
use crate::scheduler::{Scheduler, TimedAction};
use crate::systems::contact::node_bounds;
use crate::world_setup::{self, node_id};

/// Spawn a bullet at the player's current position. No player, no bullet.
pub fn fire(
    world: &mut World,
    scheduler: &mut Scheduler,
    player: Entity,
    config: &BulletConfig,
    now: f64,
    events: &mut Vec<GameEvent>,
    counters: &mut SceneCounters,
) -> Option<Entity> {
    let origin = world.get::<&Transform>(player).ok()?.position;
    let bullet = world_setup::spawn_bullet(world, scheduler, config, origin, now);

    debug!("bullet {} fired from {origin}", node_id(bullet));
    counters.bullets_fired += 1;
    events.push(GameEvent::BulletFired {
        id: node_id(bullet),
        position: origin,
    });
    Some(bullet)
}

/// Nearest node with geometry hit by `ray`, ignoring the camera.
pub fn hit_test(world: &World, ray: &Ray) -> Option<Entity> {
    world
        .query::<(&Transform, &Geometry, Option<&Camera>)>()
        .iter()
        .filter(|(_, (_, _, camera))| camera.is_none())
        .filter_map(|(entity, (transform, geometry, _))| {
            ray.intersect_aabb(&node_bounds(transform, geometry))
                .map(|distance| (entity, distance))
        })
        .min_by(|(a_entity, a), (b_entity, b)| {
            a.total_cmp(b)
                .then_with(|| a_entity.to_bits().cmp(&b_entity.to_bits()))
        })
        .map(|(entity, _)| entity)
}

/// Hit-test the tapped point and flash the nearest hit node for
/// `config.highlight_duration` seconds. A miss does nothing. Tapping a node
/// that is already lit restarts its timer.
pub fn highlight(
    world: &mut World,
    scheduler: &mut Scheduler,
    camera_pose: (&Transform, &CameraLens),
    config: &TapConfig,
    point: Vec2,
    now: f64,
    events: &mut Vec<GameEvent>,
) -> Option<Entity> {
    let (camera_transform, lens) = camera_pose;
    let viewport = Vec2::new(config.viewport_width, config.viewport_height);
    let ray = screen_ray(camera_transform, lens, viewport, point);

    let Some(target) = hit_test(world, &ray) else {
        debug!("tap at {point} hit nothing");
        return None;
    };

    {
        let mut material = world.get::<&mut Material>(target).ok()?;
        material.emission = Some(config.highlight_color);
    }

    if let Ok(previous) = world.get::<&Highlight>(target) {
        scheduler.cancel(previous.task);
    }
    let task = scheduler.schedule(
        now + config.highlight_duration,
        TimedAction::ClearHighlight(target),
    );
    let _ = world.insert_one(target, Highlight { task });

    debug!("tap at {point} highlighted {}", node_id(target));
    events.push(GameEvent::Highlighted {
        id: node_id(target),
    });
    Some(target)
}
