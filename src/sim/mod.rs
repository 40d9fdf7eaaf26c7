//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - Stable iteration order (insertion order for both entity lists)
//! - No rendering or platform dependencies

pub mod frame;
pub mod geometry;
pub mod rig;
pub mod state;
pub mod tick;

pub use frame::{DrawCmd, Frame};
pub use geometry::{Aabb, Angle, min_corner_after_rotation, rotate_around_point};
pub use rig::{Sprite, SpriteId, SpriteRig};
pub use state::{Enemy, FireControl, LifeState, Player, Projectile, Trigger, World};
pub use tick::{TickInput, tick};
