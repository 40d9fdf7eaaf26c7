//! Entities and world state
//!
//! Everything here is owned exclusively by the world and mutated only inside
//! a single tick. State is serializable so a session can be snapshotted and
//! replayed deterministically.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::rig::{Sprite, SpriteRig};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::unit_from_degrees;

/// A fired projectile: a moving point with a small fixed-size hitbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub hitbox: Aabb,
}

impl Projectile {
    /// Muzzle spawn: unit direction for the firing angle, scaled by speed.
    pub fn fired_from(pos: Vec2, speed: f32, angle_deg: f32) -> Self {
        Self {
            pos,
            vel: unit_from_degrees(angle_deg) * speed,
            hitbox: Aabb::square_at(pos, BULLET_BOX_INSET, BULLET_BOX_SIDE),
        }
    }

    /// One step of motion; the hitbox follows the position.
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.hitbox = Aabb::square_at(self.pos, BULLET_BOX_INSET, BULLET_BOX_SIDE);
    }
}

/// Trigger state for the player's weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    Idle,
    /// Trigger held; `last_shot_ms` is the press time until the first shot,
    /// then the time of the most recent shot.
    Firing { last_shot_ms: u64 },
}

/// Cooldown-gated fire control.
///
/// While the trigger is held, each tick burns cooldown equal to the time
/// elapsed since the last recorded shot; once it dips below zero a shot is
/// released and the cooldown refills. Releasing the trigger also refills it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireControl {
    pub trigger: Trigger,
    pub cooldown_ms: i64,
    pub period_ms: i64,
}

impl FireControl {
    pub fn new(period_ms: i64) -> Self {
        Self {
            trigger: Trigger::Idle,
            cooldown_ms: period_ms,
            period_ms,
        }
    }

    /// Idle -> Firing, recording the press time. No-op while already firing.
    pub fn start(&mut self, now_ms: u64) {
        if self.trigger == Trigger::Idle {
            self.trigger = Trigger::Firing {
                last_shot_ms: now_ms,
            };
        }
    }

    /// Firing -> Idle; the cooldown resets to the full period.
    pub fn stop(&mut self) {
        self.trigger = Trigger::Idle;
        self.cooldown_ms = self.period_ms;
    }

    /// Returns true when a shot is released this tick. At most one per call.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if let Trigger::Firing {
            ref mut last_shot_ms,
        } = self.trigger
        {
            self.cooldown_ms -= now_ms.saturating_sub(*last_shot_ms) as i64;
            if self.cooldown_ms < 0 {
                self.cooldown_ms = self.period_ms;
                *last_shot_ms = now_ms;
                return true;
            }
        }
        false
    }
}

/// The controlled entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub move_speed: f32,
    pub rig: SpriteRig,
    pub fire: FireControl,
}

impl Player {
    pub fn new(pos: Vec2, move_speed: f32, sprite: Sprite, pivot: Vec2, cooldown_ms: i64) -> Self {
        let mut rig = SpriteRig::new(sprite, pivot);
        rig.reposition(pos);
        Self {
            pos,
            move_speed,
            rig,
            fire: FireControl::new(cooldown_ms),
        }
    }

    pub fn face_towards(&mut self, target: Vec2) {
        self.rig.face_towards(self.pos, target);
    }

    /// Held-key movement: components of `dir` are in {-1, 0, 1} per axis.
    /// Diagonal movement is deliberately not normalized (sqrt(2) faster).
    pub fn apply_movement(&mut self, dir: Vec2) {
        self.pos += dir * self.move_speed;
    }

    /// Advance fire control; a released shot leaves the muzzle at the
    /// player's position along the current facing.
    pub fn tick_fire(&mut self, now_ms: u64, bullet_speed: f32, projectiles: &mut Vec<Projectile>) {
        if self.fire.tick(now_ms) {
            projectiles.push(Projectile::fired_from(
                self.pos,
                bullet_speed,
                self.rig.orientation_deg,
            ));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    Alive,
    Dead,
}

/// A hostile entity pursuing the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub pursuit_speed: f32,
    pub rig: SpriteRig,
    pub hitbox: Aabb,
    pub life: LifeState,
}

impl Enemy {
    pub fn new(pos: Vec2, pursuit_speed: f32, sprite: Sprite, pivot: Vec2) -> Self {
        let mut rig = SpriteRig::new(sprite, pivot);
        rig.reposition(pos);
        Self {
            pos,
            pursuit_speed,
            rig,
            hitbox: Aabb::square_at(pos, ENEMY_BOX_INSET, ENEMY_BOX_SIDE),
            life: LifeState::Alive,
        }
    }

    /// Chase step: displace along the pursuit angle, recenter the hitbox,
    /// then turn the sprite toward the player. An enemy sitting exactly on
    /// the player neither moves nor turns that tick.
    pub fn tick(&mut self, player_pos: Vec2) {
        let dist = player_pos - self.pos;
        if dist != Vec2::ZERO {
            let angle = dist.y.atan2(dist.x);
            self.pos += Vec2::new(angle.cos(), angle.sin()) * self.pursuit_speed;
        }
        self.hitbox = Aabb::square_at(self.pos, ENEMY_BOX_INSET, ENEMY_BOX_SIDE);
        self.rig.face_towards(self.pos, player_pos);
    }
}

/// Complete world state: the single player, both entity collections, the play
/// area, and the spawner RNG. Ownership is exclusive; nothing here is shared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub play_area: Aabb,
    pub tick_count: u64,
    pub tuning: Tuning,
    pub(crate) enemy_sprite: Sprite,
    pub(crate) rng: Pcg32,
}

impl World {
    pub fn new(tuning: Tuning, player_sprite: Sprite, enemy_sprite: Sprite) -> Self {
        let player = Player::new(
            tuning.player_spawn,
            tuning.player_speed,
            player_sprite,
            tuning.player_pivot,
            tuning.weapon_cooldown_ms,
        );
        Self {
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            play_area: Aabb::new(Vec2::ZERO, tuning.play_area),
            tick_count: 0,
            rng: Pcg32::seed_from_u64(tuning.seed),
            enemy_sprite,
            tuning,
        }
    }

    /// Drop a new enemy at the fixed spawn point.
    pub fn spawn_enemy(&mut self) {
        self.enemies.push(Enemy::new(
            self.tuning.enemy_spawn,
            self.tuning.enemy_speed,
            self.enemy_sprite,
            self.tuning.enemy_pivot,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rig::SpriteId;

    fn sprite() -> Sprite {
        Sprite {
            id: SpriteId(1),
            size: Vec2::new(9.0, 9.0),
        }
    }

    #[test]
    fn projectile_motion_along_zero_angle() {
        let mut p = Projectile::fired_from(Vec2::ZERO, 15.0, 0.0);
        p.advance();
        assert!((p.pos - Vec2::new(15.0, 0.0)).length() < 1e-4);
        p.advance();
        assert!((p.pos - Vec2::new(30.0, 0.0)).length() < 1e-4);
        // Hitbox follows: 3x3 inset 1.
        assert!((p.hitbox.min - Vec2::new(29.0, -1.0)).length() < 1e-4);
        assert_eq!(p.hitbox.size, Vec2::splat(3.0));
    }

    #[test]
    fn fire_control_waits_out_initial_cooldown() {
        let mut fire = FireControl::new(150);
        fire.start(1000);
        // 100ms later: cooldown 150 - 100 = 50, no shot yet.
        assert!(!fire.tick(1100));
        // 120ms after the press: another 120 burned, dips below zero.
        assert!(fire.tick(1120));
        assert_eq!(fire.cooldown_ms, 150);
    }

    #[test]
    fn fire_control_cadence_at_one_shot_per_tick() {
        let mut fire = FireControl::new(150);
        let mut now = 0u64;
        fire.start(now);
        let mut shots = 0;
        for _ in 0..10 {
            now += 151;
            if fire.tick(now) {
                shots += 1;
            }
        }
        assert_eq!(shots, 10);
    }

    #[test]
    fn releasing_trigger_refills_cooldown() {
        let mut fire = FireControl::new(150);
        fire.start(0);
        assert!(fire.tick(151));
        assert!(!fire.tick(200));
        fire.stop();
        assert_eq!(fire.trigger, Trigger::Idle);
        assert_eq!(fire.cooldown_ms, 150);
        // Idle trigger never fires.
        assert!(!fire.tick(10_000));
    }

    #[test]
    fn diagonal_movement_is_not_normalized() {
        let mut player = Player::new(Vec2::ZERO, 5.0, sprite(), Vec2::splat(4.0), 150);
        player.apply_movement(Vec2::new(1.0, 1.0));
        assert_eq!(player.pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn enemy_steps_toward_player_and_recenters_hitbox() {
        let mut enemy = Enemy::new(Vec2::ZERO, 2.0, sprite(), Vec2::splat(4.0));
        enemy.tick(Vec2::new(100.0, 0.0));
        assert!((enemy.pos - Vec2::new(2.0, 0.0)).length() < 1e-4);
        assert!((enemy.hitbox.min - Vec2::new(-2.0, -4.0)).length() < 1e-4);
        assert_eq!(enemy.hitbox.size, Vec2::splat(9.0));
        assert!(enemy.rig.orientation_deg.abs() < 1e-4);
    }

    #[test]
    fn enemy_on_top_of_player_stays_put() {
        let mut enemy = Enemy::new(Vec2::new(7.0, 7.0), 2.0, sprite(), Vec2::splat(4.0));
        let facing = enemy.rig.orientation_deg;
        enemy.tick(Vec2::new(7.0, 7.0));
        assert_eq!(enemy.pos, Vec2::new(7.0, 7.0));
        assert_eq!(enemy.rig.orientation_deg, facing);
    }
}
