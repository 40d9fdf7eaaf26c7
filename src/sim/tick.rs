//! Fixed-tick pipeline
//!
//! One call advances the whole world by one tick. The step order is
//! load-bearing: collision fairness and replay determinism both depend on it,
//! so resist the urge to reorder.

use glam::Vec2;
use rand::Rng;

use super::state::{LifeState, World};

/// Input for a single tick, built by the host's event-polling step. An
/// explicit value, never shared mutable state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Point the player aims at (pointer position in world coordinates)
    pub target: Vec2,
    /// Movement direction, components in {-1, 0, 1}
    pub move_dir: Vec2,
    /// Trigger edge: fire button went down since the last tick
    pub fire_pressed: bool,
    /// Trigger edge: fire button went up since the last tick
    pub fire_released: bool,
}

/// Advance the world by one fixed tick.
///
/// Order per tick: spawn, trigger edges, player aim + move, enemy pursuit,
/// projectile motion, fire control, out-of-bounds prune, collision
/// resolution, dead-enemy sweep. Render data is pulled afterwards via
/// [`super::frame::compose`].
pub fn tick(world: &mut World, input: &TickInput, now_ms: u64) {
    world.tick_count += 1;

    maybe_spawn(world);

    if input.fire_pressed {
        world.player.fire.start(now_ms);
    }
    if input.fire_released {
        world.player.fire.stop();
    }

    world.player.face_towards(input.target);
    world.player.apply_movement(input.move_dir);

    let player_pos = world.player.pos;
    for enemy in &mut world.enemies {
        enemy.tick(player_pos);
    }

    for projectile in &mut world.projectiles {
        projectile.advance();
    }

    let bullet_speed = world.tuning.bullet_speed;
    world
        .player
        .tick_fire(now_ms, bullet_speed, &mut world.projectiles);

    let play_area = world.play_area;
    let before = world.projectiles.len();
    world.projectiles.retain(|p| play_area.contains(&p.hitbox));
    let pruned = before - world.projectiles.len();
    if pruned > 0 {
        log::debug!("pruned {pruned} out-of-bounds projectile(s)");
    }

    resolve_collisions(world);

    let before = world.enemies.len();
    world.enemies.retain(|e| e.life == LifeState::Alive);
    let killed = before - world.enemies.len();
    if killed > 0 {
        log::debug!(
            "tick {}: {killed} enemy(ies) down, {} remain",
            world.tick_count,
            world.enemies.len()
        );
    }
}

/// Memoryless spawner: one independent roll per tick. Population is
/// unbounded by design; see DESIGN.md before adding a cap.
fn maybe_spawn(world: &mut World) {
    if world.rng.random::<f32>() < world.tuning.spawn_chance {
        world.spawn_enemy();
        log::debug!(
            "tick {}: enemy spawned at {}, {} active",
            world.tick_count,
            world.tuning.enemy_spawn,
            world.enemies.len()
        );
    }
}

/// Broad-phase resolution: for each enemy in insertion order, the first
/// overlapping projectile kills it and is consumed. One projectile takes out
/// at most one enemy per tick. There is deliberately no alive pre-filter on
/// the enemy side (legacy rule, kept literally).
fn resolve_collisions(world: &mut World) {
    for enemy in &mut world.enemies {
        if let Some(idx) = world
            .projectiles
            .iter()
            .position(|p| p.hitbox.intersects(&enemy.hitbox))
        {
            enemy.life = LifeState::Dead;
            world.projectiles.remove(idx);
        }
    }
}
