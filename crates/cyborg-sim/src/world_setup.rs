//! Entity spawn factories and node bookkeeping.
//!
//! Creates the camera, player, buildings, enemies and bullets with their
//! component bundles, and removes nodes together with their pending tasks.

use glam::Vec3;
use hecs::{Entity, World};

use cyborg_core::components::*;
use cyborg_core::config::{BuildingConfig, BulletConfig, CameraConfig, EnemyConfig, PlayerConfig};
use cyborg_core::enums::NodeKind;
use cyborg_core::types::{Color, NodeId};

use crate::random::UniformRange;
use crate::scheduler::{Scheduler, TimedAction};

/// Stable id of an entity for snapshots and events.
pub fn node_id(entity: Entity) -> NodeId {
    entity.to_bits().get()
}

/// Marker-derived kind of a live node.
pub fn node_kind(world: &World, entity: Entity) -> Option<NodeKind> {
    let node = world.entity(entity).ok()?;
    if node.has::<Camera>() {
        Some(NodeKind::Camera)
    } else if node.has::<Player>() {
        Some(NodeKind::Player)
    } else if node.has::<Building>() {
        Some(NodeKind::Building)
    } else if node.has::<Enemy>() {
        Some(NodeKind::Enemy)
    } else if node.has::<Bullet>() {
        Some(NodeKind::Bullet)
    } else {
        None
    }
}

/// Spawn the camera looking straight down, panning forever along -z.
pub fn spawn_camera(world: &mut World, config: &CameraConfig) -> Entity {
    world.spawn((
        Camera,
        Transform {
            position: config.start_position,
            rotation: Vec3::new(config.pitch, 0.0, 0.0),
        },
        Velocity {
            linear: Vec3::new(0.0, 0.0, -config.pan_speed),
        },
        CameraLens {
            fov_y: config.fov_y,
            aspect: config.aspect,
            near: config.near,
            far: config.far,
        },
    ))
}

/// Spawn the player's craft in front of the camera.
/// The player has no physics body: contacts never remove it.
pub fn spawn_player(world: &mut World, config: &PlayerConfig, camera_z: f32) -> Entity {
    world.spawn((
        Player,
        Transform {
            position: Vec3::new(0.0, config.altitude, camera_z + config.offset_z),
            rotation: Vec3::ZERO,
        },
        Geometry { size: config.size },
        Material {
            diffuse: config.color,
            emission: None,
        },
    ))
}

/// Spawn one building of random size, street offset and hue at depth `z`.
pub fn spawn_building<R: UniformRange + ?Sized>(
    world: &mut World,
    rng: &mut R,
    config: &BuildingConfig,
    z: f32,
) -> Entity {
    let width = rng.below(config.max_width) as f32 + 1.0;
    let height = rng.below(config.max_height) as f32 + 1.0;
    let length = rng.below(config.max_length) as f32 + 1.0;

    let hue = rng.below(config.hue_steps) as f32 / config.hue_steps as f32;
    let x = rng.below(config.x_range) as f32 - config.x_range as f32 / 2.0;

    world.spawn((
        Building,
        Transform {
            position: Vec3::new(x, 0.0, z),
            rotation: Vec3::ZERO,
        },
        Geometry {
            size: Vec3::new(width, height, length),
        },
        Material {
            diffuse: Color::from_hsb(hue, 1.0, 1.0),
            emission: None,
        },
        Body {
            category: CollisionLayers::BUILDING,
            contact_mask: CollisionLayers::BULLET,
        },
    ))
}

/// Spawn one spinning enemy cube at a random x at depth `z`.
pub fn spawn_enemy<R: UniformRange + ?Sized>(
    world: &mut World,
    rng: &mut R,
    config: &EnemyConfig,
    z: f32,
) -> Entity {
    let x = rng.below(config.x_range) as f32 - config.x_range as f32 / 2.0;

    world.spawn((
        Enemy,
        Transform {
            position: Vec3::new(x, config.altitude, z),
            rotation: Vec3::ZERO,
        },
        Geometry {
            size: Vec3::splat(config.size),
        },
        Material {
            diffuse: config.color,
            emission: None,
        },
        Spin {
            rate_z: config.spin_rate,
        },
        Body {
            category: CollisionLayers::ENEMY,
            contact_mask: CollisionLayers::BULLET,
        },
    ))
}

/// Spawn a bullet at `origin` that travels `config.distance` along -z over
/// `config.duration` seconds and then removes itself.
pub fn spawn_bullet(
    world: &mut World,
    scheduler: &mut Scheduler,
    config: &BulletConfig,
    origin: Vec3,
    now: f64,
) -> Entity {
    let entity = world.spawn((
        Bullet,
        Transform {
            position: origin,
            rotation: Vec3::ZERO,
        },
        Geometry {
            size: Vec3::splat(config.size),
        },
        Material {
            diffuse: config.color,
            emission: None,
        },
        MoveBy {
            origin,
            delta: Vec3::new(0.0, 0.0, -config.distance),
            start: now,
            duration: config.duration,
        },
        Body {
            category: CollisionLayers::BULLET,
            contact_mask: CollisionLayers::ENEMY | CollisionLayers::BUILDING,
        },
    ));

    let task = scheduler.schedule(now + config.duration, TimedAction::Despawn(entity));
    // Freshly spawned, so the insert cannot miss.
    let _ = world.insert_one(entity, Expiry { task });
    entity
}

/// Remove a node and cancel any task it owns. Returns the node's kind, or
/// `None` if it was already gone.
pub fn remove_node(world: &mut World, scheduler: &mut Scheduler, entity: Entity) -> Option<NodeKind> {
    let kind = node_kind(world, entity)?;

    if let Ok(expiry) = world.get::<&Expiry>(entity) {
        scheduler.cancel(expiry.task);
    }
    if let Ok(highlight) = world.get::<&Highlight>(entity) {
        scheduler.cancel(highlight.task);
    }

    world.despawn(entity).ok()?;
    Some(kind)
}
