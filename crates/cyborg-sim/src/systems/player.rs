//! Player control: keep the craft in front of the camera and integrate
//! device tilt into its x position and roll.

use hecs::{Entity, World};

use cyborg_core::components::Transform;
use cyborg_core::config::PlayerConfig;
use cyborg_core::types::Acceleration;

/// Keep the player at its fixed offset ahead of the camera.
pub fn follow_camera(world: &mut World, player: Entity, camera_z: f32, config: &PlayerConfig) {
    if let Ok(mut transform) = world.get::<&mut Transform>(player) {
        transform.position.z = camera_z + config.offset_z;
    }
}

/// Tilt integrator. Each sample nudges x by `accel.x / divisor` and roll by
/// the opposite amount, both clamped. There is no decay: releasing the tilt
/// leaves the player where it is. No sample, no change.
pub fn apply_tilt(
    world: &mut World,
    player: Entity,
    sample: Option<Acceleration>,
    config: &PlayerConfig,
) {
    let Some(accel) = sample else {
        return;
    };
    let Ok(mut transform) = world.get::<&mut Transform>(player) else {
        return;
    };

    let step = accel.x / config.tilt_divisor;
    transform.position.x = (transform.position.x + step).clamp(-config.x_limit, config.x_limit);
    transform.rotation.z =
        (transform.rotation.z - step).clamp(-config.roll_limit, config.roll_limit);
}
