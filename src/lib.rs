//! Skirmish - a top-down combat simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, entities, per-tick pipeline)
//! - `platform`: Host boundary contracts (clock, input, renderer, sprites)
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_HZ: u32 = 60;
    /// Milliseconds per tick at the fixed rate (host clocks are ms-resolution)
    pub const TICK_MS: u64 = 1000 / TICK_HZ as u64;

    /// Projectile collision box: 3x3, inset 1 from the projectile position
    pub const BULLET_BOX_SIDE: f32 = 3.0;
    pub const BULLET_BOX_INSET: f32 = 1.0;

    /// Enemy collision box: 9x9, inset 4 from the enemy position
    pub const ENEMY_BOX_SIDE: f32 = 9.0;
    pub const ENEMY_BOX_INSET: f32 = 4.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    // rem_euclid can round up to the modulus itself for tiny negative inputs
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit direction vector for an angle in degrees
#[inline]
pub fn unit_from_degrees(angle: f32) -> Vec2 {
    let rad = angle.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}
