//! Shared sprite orientation rig
//!
//! The player and every enemy rotate the same way: derive a facing angle from
//! a target point, then work out where the rotated image's top-left corner
//! lands so the blit stays in sync with the collision box. The image itself is
//! rotated host-side by the negated angle (screen Y grows downward); the
//! footprint is rotated here by the complementary angle (360 - orientation).
//! The two-step must match or sprite and hitbox drift apart.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Angle, min_corner_after_rotation};
use crate::normalize_degrees;

/// Opaque handle to a host-loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteId(pub u32);

/// An image as the core sees it: a handle plus its pixel size. The core never
/// touches pixels; the size only feeds footprint computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub id: SpriteId,
    pub size: Vec2,
}

/// Orientation state composed into both entity types.
///
/// `sprite` is the immutable base image; the rotated rendition (screen angle
/// plus draw point) is derived state, recomputed on every turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteRig {
    pub sprite: Sprite,
    /// Corner offsets of the unrotated sprite rect, relative to its origin
    pub footprint: [Vec2; 4],
    /// Point the sprite rotates around, relative to its origin
    pub pivot: Vec2,
    /// Facing angle in degrees, normalized to [0, 360)
    pub orientation_deg: f32,
    /// Angle the host rotates the image by (negated facing)
    pub screen_angle_deg: f32,
    /// Top-left position for the rotated blit
    pub draw_point: Vec2,
}

impl SpriteRig {
    pub fn new(sprite: Sprite, pivot: Vec2) -> Self {
        let size = sprite.size;
        Self {
            sprite,
            footprint: [
                Vec2::ZERO,
                Vec2::new(0.0, size.y),
                size,
                Vec2::new(size.x, 0.0),
            ],
            pivot,
            orientation_deg: 0.0,
            screen_angle_deg: 0.0,
            draw_point: Vec2::ZERO,
        }
    }

    /// Turn toward `target` from `pos` and refresh the draw point.
    ///
    /// A degenerate direction (target exactly at `pos`) leaves the previous
    /// facing and draw point untouched; this is expected behavior, not an
    /// error.
    pub fn face_towards(&mut self, pos: Vec2, target: Vec2) {
        let dist = target - pos;
        if dist == Vec2::ZERO {
            return;
        }
        self.orientation_deg = normalize_degrees(dist.y.atan2(dist.x).to_degrees());
        self.screen_angle_deg = -self.orientation_deg;
        self.refresh_draw_point(pos);
    }

    /// Recompute the draw point at the current facing, e.g. after placement.
    pub fn reposition(&mut self, pos: Vec2) {
        self.refresh_draw_point(pos);
    }

    fn refresh_draw_point(&mut self, pos: Vec2) {
        let complement = normalize_degrees(360.0 - self.orientation_deg);
        self.draw_point =
            min_corner_after_rotation(&self.footprint, self.pivot, Angle::Degrees(complement))
                + pos
                - self.pivot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rig() -> SpriteRig {
        let sprite = Sprite {
            id: SpriteId(0),
            size: Vec2::new(12.0, 18.0),
        };
        SpriteRig::new(sprite, Vec2::new(6.0, 9.0))
    }

    #[test]
    fn footprint_spans_sprite_rect() {
        let rig = rig();
        assert_eq!(rig.footprint[0], Vec2::ZERO);
        assert_eq!(rig.footprint[2], Vec2::new(12.0, 18.0));
    }

    #[test]
    fn facing_right_is_zero_degrees() {
        let mut rig = rig();
        rig.face_towards(Vec2::new(50.0, 50.0), Vec2::new(120.0, 50.0));
        assert!(rig.orientation_deg.abs() < 1e-5);
        // Unrotated footprint: draw point is position minus pivot.
        assert!((rig.draw_point - Vec2::new(44.0, 41.0)).length() < 1e-3);
    }

    #[test]
    fn facing_down_is_ninety_degrees() {
        // Screen Y grows downward, so "below the entity" is +y and 90.
        let mut rig = rig();
        rig.face_towards(Vec2::new(10.0, 10.0), Vec2::new(10.0, 99.0));
        assert!((rig.orientation_deg - 90.0).abs() < 1e-4);
        assert!((rig.screen_angle_deg + 90.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_target_keeps_previous_facing() {
        let mut rig = rig();
        rig.face_towards(Vec2::new(10.0, 10.0), Vec2::new(10.0, 50.0));
        let before = rig.orientation_deg;
        let draw_before = rig.draw_point;
        rig.face_towards(Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0));
        assert_eq!(rig.orientation_deg, before);
        assert_eq!(rig.draw_point, draw_before);
    }

    proptest! {
        #[test]
        fn orientation_always_normalized(dx in -500.0f32..500.0, dy in -500.0f32..500.0) {
            prop_assume!(dx != 0.0 || dy != 0.0);
            let mut rig = rig();
            rig.face_towards(Vec2::ZERO, Vec2::new(dx, dy));
            prop_assert!(rig.orientation_deg >= 0.0);
            prop_assert!(rig.orientation_deg < 360.0);
        }
    }
}
