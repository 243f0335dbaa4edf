//! Tests for the game engine: spawn cadence, placement, tilt, culling,
//! bullets, contacts, taps and determinism.

use std::collections::VecDeque;

use approx::assert_relative_eq;
use glam::Vec3;
use hecs::Entity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cyborg_core::commands::PlayerCommand;
use cyborg_core::components::*;
use cyborg_core::config::{BuildingConfig, EnemyConfig, GameConfig};
use cyborg_core::enums::*;
use cyborg_core::events::GameEvent;
use cyborg_core::state::{GameSnapshot, NodeView};
use cyborg_core::constants::FRAME_DT;
use cyborg_core::types::Color;

use crate::engine::{GameEngine, SimConfig};
use crate::random::UniformRange;
use crate::world_setup::{self, node_id};

/// Replays a fixed list of draws, then repeats the last one.
struct ScriptedRange {
    draws: VecDeque<u32>,
    last: u32,
}

impl ScriptedRange {
    fn new(draws: &[u32]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
            last: 0,
        }
    }
}

impl UniformRange for ScriptedRange {
    fn below(&mut self, upper: u32) -> u32 {
        if let Some(next) = self.draws.pop_front() {
            self.last = next;
        }
        assert!(self.last < upper, "scripted draw {} >= {upper}", self.last);
        self.last
    }
}

fn engine_with(game: GameConfig) -> GameEngine {
    GameEngine::new(SimConfig {
        game,
        ..Default::default()
    })
}

fn find(snapshot: &GameSnapshot, id: u64) -> Option<&NodeView> {
    snapshot.nodes.iter().find(|n| n.id == id)
}

fn spawned_of(snapshot: &GameSnapshot, kind: NodeKind) -> Vec<Vec3> {
    snapshot
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Spawned {
                kind: k, position, ..
            } if *k == kind => Some(*position),
            _ => None,
        })
        .collect()
}

fn stage_building(engine: &mut GameEngine, position: Vec3, size: Vec3) -> Entity {
    engine.world_mut().spawn((
        Building,
        Transform {
            position,
            rotation: Vec3::ZERO,
        },
        Geometry { size },
        Material {
            diffuse: Color::WHITE,
            emission: None,
        },
        Body {
            category: CollisionLayers::BUILDING,
            contact_mask: CollisionLayers::BULLET,
        },
    ))
}

fn stage_enemy(engine: &mut GameEngine, position: Vec3) -> Entity {
    engine.world_mut().spawn((
        Enemy,
        Transform {
            position,
            rotation: Vec3::ZERO,
        },
        Geometry { size: Vec3::ONE },
        Material {
            diffuse: Color::WHITE,
            emission: None,
        },
        Body {
            category: CollisionLayers::ENEMY,
            contact_mask: CollisionLayers::BULLET,
        },
    ))
}

/// Enemies fly high enough that a bullet test never meets a random one.
fn config_without_enemy_traffic() -> GameConfig {
    let mut game = GameConfig::default();
    game.enemy.altitude = 40.0;
    game
}

// ---- Spawn cadence ----

#[test]
fn test_no_spawn_at_time_zero() {
    let mut engine = GameEngine::new(SimConfig::default());
    let snap = engine.frame(0.0);
    assert_eq!(snap.stats.spawned_total, 0);
    assert_eq!(snap.stats.buildings, 0);
    assert_eq!(snap.stats.enemies, 0);
}

#[test]
fn test_both_spawners_fire_on_first_positive_frame() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.frame(0.0);
    let snap = engine.frame(1.0 / 60.0);
    assert_eq!(spawned_of(&snap, NodeKind::Building).len(), 1);
    assert_eq!(spawned_of(&snap, NodeKind::Enemy).len(), 1);
    assert_eq!(snap.stats.buildings, 1);
    assert_eq!(snap.stats.enemies, 1);
}

#[test]
fn test_building_cadence_one_spawn_per_crossing() {
    let mut engine = GameEngine::new(SimConfig::default());
    let dt = 0.125;
    let mut spawn_times = Vec::new();

    for k in 0..=80 {
        let t = k as f64 * dt;
        let snap = engine.frame(t);
        let spawned = spawned_of(&snap, NodeKind::Building).len();
        assert!(spawned <= 1, "at most one building per frame");
        if spawned == 1 {
            spawn_times.push(t);
        }
    }

    assert_eq!(spawn_times[0], 0.125);
    for pair in spawn_times.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(gap > 0.5, "spawned again after only {gap}s");
        assert!(gap <= 0.5 + dt, "missed a crossing: gap {gap}s");
    }
}

#[test]
fn test_enemy_cadence_is_one_second() {
    let mut engine = GameEngine::new(SimConfig::default());
    let mut spawn_times = Vec::new();
    for k in 0..=64 {
        let t = k as f64 * 0.125;
        if !spawned_of(&engine.frame(t), NodeKind::Enemy).is_empty() {
            spawn_times.push(t);
        }
    }
    assert_eq!(spawn_times, vec![0.125, 1.25, 2.375, 3.5, 4.625, 5.75, 6.875, 8.0]);
}

#[test]
fn test_stalled_frame_spawns_only_once() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.frame(0.0);
    engine.frame(0.1);
    let snap = engine.frame(10.0);
    assert_eq!(spawned_of(&snap, NodeKind::Building).len(), 1);
    assert_eq!(spawned_of(&snap, NodeKind::Enemy).len(), 1);
}

#[test]
fn test_spawns_appear_twenty_ahead_of_camera() {
    let mut engine = GameEngine::new(SimConfig::default());

    // First frame: no elapsed time, camera still at z = 0.
    let snap = engine.frame(0.5);
    assert_eq!(spawned_of(&snap, NodeKind::Building)[0].z, -20.0);
    assert_eq!(spawned_of(&snap, NodeKind::Enemy)[0].z, -20.0);

    // Spawns use the camera position before this frame's pan.
    let snap = engine.frame(1.25);
    assert_eq!(spawned_of(&snap, NodeKind::Building)[0].z, -20.0);
    assert_relative_eq!(snap.camera.position.z, -1.5, epsilon = 1e-5);

    let snap = engine.frame(2.0);
    assert_relative_eq!(
        spawned_of(&snap, NodeKind::Building)[0].z,
        -21.5,
        epsilon = 1e-5
    );
}

// ---- Placement ----

#[test]
fn test_building_placement_bounds() {
    let mut world = hecs::World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(2017);
    let config = BuildingConfig::default();

    for _ in 0..2000 {
        let entity = world_setup::spawn_building(&mut world, &mut rng, &config, -20.0);
        let t = *world.get::<&Transform>(entity).unwrap();
        let g = *world.get::<&Geometry>(entity).unwrap();

        assert!((-6.0..6.0).contains(&t.position.x), "x = {}", t.position.x);
        assert_eq!(t.position.y, 0.0);
        assert_eq!(t.position.z, -20.0);
        assert!((1.0..5.0).contains(&g.size.x), "width = {}", g.size.x);
        assert!((1.0..13.0).contains(&g.size.y), "height = {}", g.size.y);
        assert!((1.0..5.0).contains(&g.size.z), "length = {}", g.size.z);
    }
}

#[test]
fn test_building_extremes_from_scripted_draws() {
    let mut world = hecs::World::new();
    let config = BuildingConfig::default();

    // Draw order: width, height, length, hue, x.
    let mut low = ScriptedRange::new(&[0, 0, 0, 0, 0]);
    let entity = world_setup::spawn_building(&mut world, &mut low, &config, 0.0);
    assert_eq!(
        world.get::<&Geometry>(entity).unwrap().size,
        Vec3::new(1.0, 1.0, 1.0)
    );
    assert_eq!(world.get::<&Transform>(entity).unwrap().position.x, -6.0);
    assert_eq!(world.get::<&Material>(entity).unwrap().diffuse, Color::RED);

    let mut high = ScriptedRange::new(&[3, 11, 3, 354, 11]);
    let entity = world_setup::spawn_building(&mut world, &mut high, &config, 0.0);
    assert_eq!(
        world.get::<&Geometry>(entity).unwrap().size,
        Vec3::new(4.0, 12.0, 4.0)
    );
    assert_eq!(world.get::<&Transform>(entity).unwrap().position.x, 5.0);
    let material = *world.get::<&Material>(entity).unwrap();
    assert_eq!(material.diffuse, Color::from_hsb(354.0 / 355.0, 1.0, 1.0));
    assert!(material.emission.is_none());
}

#[test]
fn test_enemy_placement() {
    let mut world = hecs::World::new();
    let config = EnemyConfig::default();

    let mut rng = ScriptedRange::new(&[0]);
    let left = world_setup::spawn_enemy(&mut world, &mut rng, &config, -20.0);
    let mut rng = ScriptedRange::new(&[5]);
    let right = world_setup::spawn_enemy(&mut world, &mut rng, &config, -20.0);

    assert_eq!(
        world.get::<&Transform>(left).unwrap().position,
        Vec3::new(-3.0, 15.0, -20.0)
    );
    assert_eq!(world.get::<&Transform>(right).unwrap().position.x, 2.0);
    assert_eq!(world.get::<&Geometry>(left).unwrap().size, Vec3::ONE);
    assert_eq!(
        world.get::<&Spin>(left).unwrap().rate_z,
        std::f32::consts::TAU
    );
}

#[test]
fn test_injected_rng_drives_engine_spawns() {
    // Building: w, h, l, hue, x; then enemy: x.
    let rng = ScriptedRange::new(&[1, 5, 2, 100, 9, 4]);
    let mut engine = GameEngine::with_rng(GameConfig::default(), rng);
    let snap = engine.frame(0.1);

    let building = snap
        .nodes
        .iter()
        .find(|n| n.kind == NodeKind::Building)
        .unwrap();
    assert_eq!(building.size, Vec3::new(2.0, 6.0, 3.0));
    assert_eq!(building.position, Vec3::new(3.0, 0.0, -20.0));

    let enemy = snap.nodes.iter().find(|n| n.kind == NodeKind::Enemy).unwrap();
    assert_eq!(enemy.position.x, 1.0);
}

// ---- Tilt ----

#[test]
fn test_tilt_moves_player_and_clamps() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::MotionSample {
        x: 1.0,
        y: 0.0,
        z: -1.0,
    });

    let snap = engine.frame(0.0);
    let player = snap.player.unwrap();
    assert_relative_eq!(player.position.x, 0.2);
    assert_relative_eq!(player.roll, -0.2);

    // The sample persists: it keeps integrating every frame until clamped.
    let mut last = snap;
    for k in 1..40 {
        last = engine.frame(k as f64 / 60.0);
        let p = last.player.unwrap();
        assert!((-3.0..=3.0).contains(&p.position.x));
        assert!((-0.5..=0.5).contains(&p.roll));
    }
    let p = last.player.unwrap();
    assert_eq!(p.position.x, 3.0);
    assert_eq!(p.roll, -0.5);
}

#[test]
fn test_stopped_motion_freezes_player() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::MotionSample {
        x: -0.5,
        y: 0.0,
        z: 0.0,
    });
    engine.frame(0.0);
    engine.queue_command(PlayerCommand::StopMotionUpdates);
    let before = engine.frame(0.1).player.unwrap().position.x;
    let after = engine.frame(0.2).player.unwrap().position.x;
    assert_relative_eq!(before, -0.1);
    assert_eq!(before, after);
}

#[test]
fn test_player_tracks_camera() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.frame(0.0);
    let snap = engine.frame(3.0);
    let player = snap.player.unwrap();
    assert_relative_eq!(snap.camera.position.z, -6.0, epsilon = 1e-5);
    assert_relative_eq!(player.position.z, -9.0, epsilon = 1e-5);
    assert_eq!(player.position.y, 15.0);
}

// ---- Culling ----

#[test]
fn test_cull_behind_and_outside_only() {
    let mut engine = GameEngine::new(SimConfig::default());
    let behind_hidden = stage_building(&mut engine, Vec3::new(0.0, 0.0, 20.0), Vec3::ONE);
    let behind_visible = stage_building(&mut engine, Vec3::new(0.0, 0.0, 5.0), Vec3::ONE);
    let ahead_hidden = stage_building(&mut engine, Vec3::new(0.0, 0.0, -30.0), Vec3::ONE);

    let snap = engine.frame(0.0);

    assert!(find(&snap, node_id(behind_hidden)).is_none());
    assert!(find(&snap, node_id(behind_visible)).is_some());
    assert!(find(&snap, node_id(ahead_hidden)).is_some());
    assert_eq!(snap.stats.culled_total, 1);
    assert!(snap.events.contains(&GameEvent::Culled {
        id: node_id(behind_hidden),
        kind: NodeKind::Building,
    }));
}

#[test]
fn test_building_culled_once_camera_passes() {
    let mut engine = GameEngine::new(SimConfig::default());
    let building = stage_building(&mut engine, Vec3::new(0.0, 0.0, -2.0), Vec3::ONE);
    engine.frame(0.0);

    // Half the visible depth at street level is about 14.4.
    let snap = engine.frame(5.0);
    assert!(find(&snap, node_id(building)).is_some());
    let snap = engine.frame(10.0);
    assert!(find(&snap, node_id(building)).is_none());
    assert!(!engine.world().contains(building));
}

#[test]
fn test_enemy_cull_follows_policy() {
    let mut engine = GameEngine::new(SimConfig::default());
    let enemy = stage_enemy(&mut engine, Vec3::new(0.0, 15.0, 20.0));
    assert!(find(&engine.frame(0.0), node_id(enemy)).is_none());

    let mut game = GameConfig::default();
    game.cull.policy = CullPolicy::BuildingsOnly;
    let mut engine = engine_with(game);
    let enemy = stage_enemy(&mut engine, Vec3::new(0.0, 15.0, 20.0));
    let building = stage_building(&mut engine, Vec3::new(0.0, 0.0, 20.0), Vec3::ONE);
    let snap = engine.frame(0.0);
    assert!(find(&snap, node_id(enemy)).is_some());
    assert!(find(&snap, node_id(building)).is_none());
}

#[test]
fn test_camera_and_player_never_culled() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.frame(0.0);
    for k in 1..=600 {
        engine.frame(k as f64 / 60.0);
    }
    assert!(engine.world().contains(engine.camera()));
    assert!(engine.world().contains(engine.player()));
}

// ---- Bullets ----

#[test]
fn test_bullet_travels_twenty_and_expires_after_one_second() {
    let mut engine = engine_with(config_without_enemy_traffic());
    engine.queue_command(PlayerCommand::Tap { x: 10.0, y: 10.0 });
    let snap = engine.frame(0.0);

    let fired = snap
        .events
        .iter()
        .find_map(|e| match e {
            GameEvent::BulletFired { id, position } => Some((*id, *position)),
            _ => None,
        })
        .expect("tap should fire a bullet");
    let (bullet, origin) = fired;
    assert_eq!(origin, Vec3::new(0.0, 15.0, -3.0));
    assert_eq!(snap.stats.bullets, 1);

    let snap = engine.frame(0.5);
    let halfway = find(&snap, bullet).expect("bullet alive mid-flight");
    assert_relative_eq!(halfway.position.z, -13.0, epsilon = 1e-4);

    let snap = engine.frame(0.99);
    assert!(find(&snap, bullet).is_some());

    let snap = engine.frame(1.0);
    assert!(find(&snap, bullet).is_none());
    let end = snap
        .events
        .iter()
        .find_map(|e| match e {
            GameEvent::BulletExpired { id, position } if *id == bullet => Some(*position),
            _ => None,
        })
        .expect("bullet should expire at t = 1.0");
    assert_relative_eq!(end.z - origin.z, -20.0, epsilon = 1e-4);
    assert_eq!(end.x, origin.x);
}

#[test]
fn test_bullet_fires_from_tilted_player() {
    let mut engine = engine_with(config_without_enemy_traffic());
    engine.queue_command(PlayerCommand::MotionSample {
        x: 5.0,
        y: 0.0,
        z: 0.0,
    });
    engine.frame(0.0);
    engine.queue_command(PlayerCommand::StopMotionUpdates);
    engine.queue_command(PlayerCommand::Tap { x: 0.0, y: 0.0 });
    let snap = engine.frame(0.1);
    let bullet = snap
        .nodes
        .iter()
        .find(|n| n.kind == NodeKind::Bullet)
        .unwrap();
    assert_eq!(bullet.position.x, 1.0);
}

#[test]
fn test_bullets_expire_sixty_frames_after_firing_at_60hz() {
    use std::collections::HashMap;

    let mut engine = engine_with(config_without_enemy_traffic());
    let mut fired: HashMap<u64, (u64, Vec3)> = HashMap::new();
    let mut expired = 0;

    for frame in 0..=200u64 {
        if frame < 120 {
            engine.queue_command(PlayerCommand::Tap { x: 0.0, y: 0.0 });
        }
        let snap = engine.frame(frame as f64 * FRAME_DT);
        for event in &snap.events {
            match event {
                GameEvent::BulletFired { id, position } => {
                    fired.insert(*id, (frame, *position));
                }
                GameEvent::BulletExpired { id, position } => {
                    let (fire_frame, origin) = fired[id];
                    assert_eq!(frame, fire_frame + 60, "bullet fired on frame {fire_frame}");
                    assert_relative_eq!(position.z - origin.z, -20.0, epsilon = 1e-4);
                    expired += 1;
                }
                _ => {}
            }
        }
    }

    assert_eq!(fired.len(), 120);
    assert_eq!(expired, 120);
}

// ---- Contacts ----

#[test]
fn test_contact_removes_both_on_next_frame() {
    let mut engine = engine_with(config_without_enemy_traffic());
    let enemy = stage_enemy(&mut engine, Vec3::new(0.0, 15.0, -8.0));
    engine.queue_command(PlayerCommand::Tap { x: 0.0, y: 0.0 });
    let snap = engine.frame(0.0);
    let bullet = snap
        .nodes
        .iter()
        .find(|n| n.kind == NodeKind::Bullet)
        .unwrap()
        .id;
    assert_eq!(engine.scheduler().pending(), 1);

    // Bullet reaches z = -8 at t = 0.25: contact found, nothing removed yet.
    let snap = engine.frame(0.25);
    assert!(snap.events.contains(&GameEvent::Contact {
        a: node_id(enemy).min(bullet),
        b: node_id(enemy).max(bullet),
    }));
    assert!(find(&snap, node_id(enemy)).is_some());
    assert!(find(&snap, bullet).is_some());
    assert_eq!(engine.pending_contacts(), 1);

    // Next frame: both gone, expiry task cancelled.
    let snap = engine.frame(0.26);
    assert!(find(&snap, node_id(enemy)).is_none());
    assert!(find(&snap, bullet).is_none());
    assert_eq!(snap.stats.destroyed_total, 2);
    assert_eq!(engine.pending_contacts(), 0);
    assert_eq!(engine.scheduler().pending(), 0);

    // The cancelled expiry never fires.
    let snap = engine.frame(1.5);
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::BulletExpired { .. })));
}

#[test]
fn test_overlapping_buildings_do_not_contact() {
    let mut engine = GameEngine::new(SimConfig::default());
    let a = stage_building(&mut engine, Vec3::new(0.0, 0.0, -5.0), Vec3::splat(2.0));
    let b = stage_building(&mut engine, Vec3::new(0.5, 0.0, -5.0), Vec3::splat(2.0));
    engine.frame(0.0);
    let snap = engine.frame(0.0);
    assert!(find(&snap, node_id(a)).is_some());
    assert!(find(&snap, node_id(b)).is_some());
    assert_eq!(engine.pending_contacts(), 0);
}

#[test]
fn test_contact_removal_not_held_back_by_pause() {
    let mut engine = engine_with(config_without_enemy_traffic());
    let enemy = stage_enemy(&mut engine, Vec3::new(0.0, 15.0, -8.0));
    engine.queue_command(PlayerCommand::Tap { x: 0.0, y: 0.0 });
    engine.frame(0.0);
    engine.frame(0.25);
    assert_eq!(engine.pending_contacts(), 1);

    engine.queue_command(PlayerCommand::Pause);
    let snap = engine.frame(0.26);
    assert_eq!(snap.phase, GamePhase::Paused);
    assert!(find(&snap, node_id(enemy)).is_none());
    assert_eq!(snap.stats.bullets, 0);
    assert_eq!(snap.stats.destroyed_total, 2);
    assert_eq!(engine.pending_contacts(), 0);
}

#[test]
fn test_bullet_hitting_two_nodes_counts_once() {
    let mut engine = engine_with(config_without_enemy_traffic());
    let left = stage_enemy(&mut engine, Vec3::new(-0.3, 15.0, -8.0));
    let right = stage_enemy(&mut engine, Vec3::new(0.3, 15.0, -8.0));
    engine.queue_command(PlayerCommand::Tap { x: 0.0, y: 0.0 });
    engine.frame(0.0);
    engine.frame(0.25);
    assert_eq!(engine.pending_contacts(), 2);

    let snap = engine.frame(0.26);
    assert!(find(&snap, node_id(left)).is_none());
    assert!(find(&snap, node_id(right)).is_none());
    // Two enemies and one bullet.
    assert_eq!(snap.stats.destroyed_total, 3);
}

// ---- Highlight taps ----

fn highlight_engine() -> GameEngine {
    let mut game = GameConfig::default();
    game.tap.mode = TapMode::Highlight;
    engine_with(game)
}

#[test]
fn test_tap_highlights_then_reverts() {
    let mut engine = highlight_engine();
    let building = stage_building(&mut engine, Vec3::ZERO, Vec3::new(2.0, 4.0, 2.0));
    engine.queue_command(PlayerCommand::Tap {
        x: 375.0 / 2.0,
        y: 667.0 / 2.0,
    });

    let snap = engine.frame(0.0);
    assert!(snap.events.contains(&GameEvent::Highlighted {
        id: node_id(building)
    }));
    assert!(find(&snap, node_id(building)).unwrap().highlighted);
    assert_eq!(
        engine.world().get::<&Material>(building).unwrap().emission,
        Some(Color::RED)
    );
    assert_eq!(snap.stats.bullets, 0);

    let snap = engine.frame(0.25);
    assert!(find(&snap, node_id(building)).unwrap().highlighted);

    let snap = engine.frame(0.5);
    assert!(!find(&snap, node_id(building)).unwrap().highlighted);
    assert!(snap.events.contains(&GameEvent::HighlightCleared {
        id: node_id(building)
    }));
}

#[test]
fn test_tap_picks_nearest_node() {
    let mut engine = highlight_engine();
    let low = stage_building(&mut engine, Vec3::ZERO, Vec3::splat(2.0));
    let high = stage_enemy(&mut engine, Vec3::new(0.0, 10.0, 0.0));
    engine.queue_command(PlayerCommand::Tap {
        x: 375.0 / 2.0,
        y: 667.0 / 2.0,
    });
    let snap = engine.frame(0.0);
    assert!(find(&snap, node_id(high)).unwrap().highlighted);
    assert!(!find(&snap, node_id(low)).unwrap().highlighted);
}

#[test]
fn test_tap_on_empty_space_is_noop() {
    let mut engine = highlight_engine();
    engine.queue_command(PlayerCommand::Tap { x: 5.0, y: 660.0 });
    let snap = engine.frame(0.0);
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::Highlighted { .. })));
    assert_eq!(engine.scheduler().pending(), 0);
}

#[test]
fn test_retap_restarts_highlight() {
    let mut engine = highlight_engine();
    let building = stage_building(&mut engine, Vec3::ZERO, Vec3::splat(2.0));
    let center = PlayerCommand::Tap {
        x: 375.0 / 2.0,
        y: 667.0 / 2.0,
    };

    engine.queue_command(center.clone());
    engine.frame(0.0);
    engine.queue_command(center);
    engine.frame(0.4);
    assert_eq!(engine.scheduler().pending(), 1);

    let snap = engine.frame(0.6);
    assert!(find(&snap, node_id(building)).unwrap().highlighted);
    let snap = engine.frame(0.9);
    assert!(!find(&snap, node_id(building)).unwrap().highlighted);
}

#[test]
fn test_switching_tap_mode() {
    let mut engine = highlight_engine();
    engine.queue_command(PlayerCommand::SetTapMode {
        mode: TapMode::Fire,
    });
    engine.queue_command(PlayerCommand::Tap { x: 1.0, y: 1.0 });
    let snap = engine.frame(0.0);
    assert_eq!(snap.tap_mode, TapMode::Fire);
    assert_eq!(snap.stats.bullets, 1);
}

// ---- Pause ----

#[test]
fn test_pause_freezes_game_clock() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.frame(0.0);
    engine.frame(1.0);

    engine.queue_command(PlayerCommand::Pause);
    let snap = engine.frame(2.0);
    assert_eq!(snap.phase, GamePhase::Paused);
    let frozen_clock = snap.time.game_secs;
    let frozen_camera = snap.camera.position.z;
    let frozen_spawns = snap.stats.spawned_total;

    let snap = engine.frame(5.0);
    assert_eq!(snap.time.game_secs, frozen_clock);
    assert_eq!(snap.camera.position.z, frozen_camera);
    assert_eq!(snap.stats.spawned_total, frozen_spawns);

    engine.queue_command(PlayerCommand::Resume);
    let snap = engine.frame(5.5);
    assert_eq!(snap.phase, GamePhase::Running);
    assert_relative_eq!(snap.time.game_secs, 1.5, epsilon = 1e-9);
    assert_relative_eq!(snap.camera.position.z, -3.0, epsilon = 1e-5);
}

#[test]
fn test_taps_while_paused_are_dropped() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::Pause);
    engine.frame(0.0);
    engine.queue_command(PlayerCommand::Tap { x: 1.0, y: 1.0 });
    engine.frame(0.1);
    engine.queue_command(PlayerCommand::Resume);
    let snap = engine.frame(0.2);
    assert_eq!(snap.stats.bullets_fired, 0);
}

#[test]
fn test_time_scale_clamped() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::SetTimeScale { scale: 10.0 });
    engine.frame(0.0);
    assert_eq!(engine.time_scale(), 4.0);
    engine.queue_command(PlayerCommand::SetTimeScale { scale: f64::NAN });
    engine.frame(0.1);
    assert_eq!(engine.time_scale(), 4.0);
}

// ---- Determinism ----

fn scripted_session(seed: u64) -> Vec<String> {
    let mut engine = GameEngine::new(SimConfig {
        seed,
        ..Default::default()
    });
    let mut out = Vec::new();
    for k in 0..300 {
        if k % 20 == 0 {
            engine.queue_command(PlayerCommand::Tap { x: 100.0, y: 200.0 });
        }
        let tilt = ((k as f32) * 0.05).sin();
        engine.queue_command(PlayerCommand::MotionSample {
            x: tilt,
            y: 0.0,
            z: -1.0,
        });
        let snap = engine.frame(k as f64 / 60.0);
        out.push(serde_json::to_string(&snap).unwrap());
    }
    out
}

#[test]
fn test_determinism_same_seed() {
    assert_eq!(scripted_session(12345), scripted_session(12345));
}

#[test]
fn test_determinism_different_seeds() {
    assert_ne!(scripted_session(111), scripted_session(222));
}

#[test]
fn test_long_run_stays_bounded() {
    let mut engine = GameEngine::new(SimConfig::default());
    let mut snap = engine.frame(0.0);
    for k in 1..=60 * 120 {
        snap = engine.frame(k as f64 / 60.0);
    }
    // Two minutes in, culling keeps only what is near the camera.
    assert!(snap.stats.spawned_total > 300);
    assert!(snap.stats.buildings < 80, "{} buildings", snap.stats.buildings);
    assert!(snap.stats.enemies < 40, "{} enemies", snap.stats.enemies);
    assert!(snap.stats.culled_total > 200);
}
