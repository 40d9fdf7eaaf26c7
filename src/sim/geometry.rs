//! Rotation math and axis-aligned collision boxes
//!
//! Sprites rotate about an arbitrary pivot, so blitting a rotated image needs
//! the component-wise minimum of the rotated footprint corners to find the
//! top-left draw position. Collision stays broad-phase: plain AABB overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An angle with an explicit unit. Callers pass degrees unless they say
/// otherwise, so a degree/radian mixup fails at the type level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Angle {
    Degrees(f32),
    Radians(f32),
}

impl Angle {
    pub fn radians(self) -> f32 {
        match self {
            Angle::Degrees(deg) => deg.to_radians(),
            Angle::Radians(rad) => rad,
        }
    }
}

/// Rotate a set of points around a pivot, counter-clockwise in the standard
/// math convention. Exact identity for angle 0.
pub fn rotate_around_point(points: &[Vec2], pivot: Vec2, angle: Angle) -> Vec<Vec2> {
    let (sin, cos) = angle.radians().sin_cos();
    points
        .iter()
        .map(|&p| {
            let v = p - pivot;
            Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos) + pivot
        })
        .collect()
}

/// Rotate the points, then take the component-wise minimum: the top-left
/// corner a rotated rectangular sprite should be blitted at.
pub fn min_corner_after_rotation(points: &[Vec2], pivot: Vec2, angle: Angle) -> Vec2 {
    debug_assert!(!points.is_empty());
    rotate_around_point(points, pivot, angle)
        .into_iter()
        .fold(Vec2::splat(f32::INFINITY), Vec2::min)
}

/// Axis-aligned box: top-left corner plus size. The sole collision primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Square box of the given side, inset from a center position the way the
    /// entity hitboxes are defined (min = pos - inset).
    pub fn square_at(pos: Vec2, inset: f32, side: f32) -> Self {
        Self {
            min: pos - Vec2::splat(inset),
            size: Vec2::splat(side),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Broad-phase overlap test. Touching edges do not count as overlap.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max().x
            && other.min.x < self.max().x
            && self.min.y < other.max().y
            && other.min.y < self.max().y
    }

    /// True if `other` lies fully inside this box (edges included).
    pub fn contains(&self, other: &Aabb) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max().x <= self.max().x
            && other.max().y <= self.max().y
    }
}
