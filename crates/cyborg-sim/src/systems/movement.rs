//! Kinematic integration.
//!
//! Velocity and spin integrate over the frame delta; timed moves are
//! evaluated from the game clock so they land exactly on their target.

use hecs::World;

use cyborg_core::components::{MoveBy, Spin, Transform, Velocity};

use crate::scheduler::DUE_TOLERANCE;

/// Run all kinematic updates for this frame.
pub fn run(world: &mut World, dt: f64, now: f64) {
    integrate_velocity(world, dt);
    integrate_spin(world, dt);
    apply_moves(world, now);
}

/// position += velocity * dt for every moving node (the camera pan).
pub fn integrate_velocity(world: &mut World, dt: f64) {
    let dt = dt as f32;
    for (_entity, (transform, velocity)) in world.query_mut::<(&mut Transform, &Velocity)>() {
        transform.position += velocity.linear * dt;
    }
}

/// Advance z rotation of spinning nodes, wrapped to one turn.
pub fn integrate_spin(world: &mut World, dt: f64) {
    let dt = dt as f32;
    for (_entity, (transform, spin)) in world.query_mut::<(&mut Transform, &Spin)>() {
        transform.rotation.z =
            (transform.rotation.z + spin.rate_z * dt).rem_euclid(std::f32::consts::TAU);
    }
}

/// Place every node with a timed move at its interpolated position.
pub fn apply_moves(world: &mut World, now: f64) {
    for (_entity, (transform, action)) in world.query_mut::<(&mut Transform, &MoveBy)>() {
        transform.position = action.origin + action.delta * move_progress(action, now);
    }
}

/// Fraction of a timed move completed at `now`, in 0.0..=1.0. A move is
/// complete on the same frame its scheduled end task comes due.
pub fn move_progress(action: &MoveBy, now: f64) -> f32 {
    if action.duration <= 0.0 || now + DUE_TOLERANCE >= action.start + action.duration {
        return 1.0;
    }
    ((now - action.start) / action.duration).clamp(0.0, 1.0) as f32
}
