//! Per-frame render data
//!
//! The sim hands the host a flat list of draw commands after each tick; all
//! pixel work stays on the far side of the `Renderer` trait.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::rig::SpriteId;
use super::state::World;

pub type Color = [u8; 3];

pub const WHITE: Color = [255, 255, 255];
pub const RED: Color = [255, 0, 0];
pub const BLUE: Color = [0, 0, 255];

/// Radius of the player's position marker
const AIM_MARKER_RADIUS: f32 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCmd {
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    Rect {
        rect: Aabb,
        color: Color,
    },
    /// Blit the image rotated by `angle_deg`, top-left at `top_left`.
    Sprite {
        sprite: SpriteId,
        top_left: Vec2,
        angle_deg: f32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub clear: Color,
    pub commands: Vec<DrawCmd>,
}

/// Build the frame for the current world state: white clear, player marker
/// and aim line, projectile hitboxes, then sprite blits (enemies under the
/// player).
pub fn compose(world: &World, pointer: Vec2) -> Frame {
    let mut commands = Vec::with_capacity(world.projectiles.len() + world.enemies.len() + 4);

    commands.push(DrawCmd::Circle {
        center: world.player.pos,
        radius: AIM_MARKER_RADIUS,
        color: BLUE,
    });
    commands.push(DrawCmd::Line {
        from: world.player.pos,
        to: pointer,
        color: RED,
    });
    for projectile in &world.projectiles {
        commands.push(DrawCmd::Rect {
            rect: projectile.hitbox,
            color: RED,
        });
    }
    for enemy in &world.enemies {
        commands.push(DrawCmd::Sprite {
            sprite: enemy.rig.sprite.id,
            top_left: enemy.rig.draw_point,
            angle_deg: enemy.rig.screen_angle_deg,
        });
    }
    commands.push(DrawCmd::Sprite {
        sprite: world.player.rig.sprite.id,
        top_left: world.player.rig.draw_point,
        angle_deg: world.player.rig.screen_angle_deg,
    });

    Frame {
        clear: WHITE,
        commands,
    }
}
