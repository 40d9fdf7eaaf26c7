//! Host boundary contracts
//!
//! The core never opens a window, decodes an image, or reads an input
//! device. A host supplies a clock, an event source, a renderer, and sprite
//! assets; the core hands back [`Frame`]s. Headless implementations for
//! tests and the demo binary live here too.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use glam::Vec2;

use crate::sim::frame::{Color, DrawCmd, Frame};
use crate::sim::geometry::Aabb;
use crate::sim::rig::{Sprite, SpriteId};
use crate::sim::tick::TickInput;

/// Keys the core cares about; everything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    W,
    A,
    S,
    D,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    MouseDown(Button),
    MouseUp(Button),
    MouseMoved,
}

/// Host-provided time source and frame pacing.
pub trait Clock {
    fn now_ms(&self) -> u64;
    /// Block (or advance, for virtual clocks) until the next frame slot at
    /// the target rate.
    fn tick_delay(&mut self, target_hz: u32);
}

/// Host-provided event source.
pub trait InputSource {
    fn poll_events(&mut self) -> Vec<InputEvent>;
    fn pointer_pos(&self) -> Vec2;
}

/// Host-provided drawing surface, consumed command-per-command.
pub trait Renderer {
    fn clear(&mut self, color: Color);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn draw_rect(&mut self, rect: Aabb, color: Color);
    fn draw_sprite(&mut self, sprite: SpriteId, top_left: Vec2, angle_deg: f32);
    fn present(&mut self);

    /// Map a composed frame onto the primitive calls, then present.
    fn submit(&mut self, frame: &Frame) {
        self.clear(frame.clear);
        for cmd in &frame.commands {
            match *cmd {
                DrawCmd::Circle {
                    center,
                    radius,
                    color,
                } => self.draw_circle(center, radius, color),
                DrawCmd::Line { from, to, color } => self.draw_line(from, to, color),
                DrawCmd::Rect { rect, color } => self.draw_rect(rect, color),
                DrawCmd::Sprite {
                    sprite,
                    top_left,
                    angle_deg,
                } => self.draw_sprite(sprite, top_left, angle_deg),
            }
        }
        self.present();
    }
}

/// A sprite asset could not be loaded. Fatal at startup.
#[derive(Debug)]
pub struct AssetError {
    pub path: String,
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sprite asset not found: {}", self.path)
    }
}

impl std::error::Error for AssetError {}

/// Host-side image loading. The core only ever sees the handle and size.
pub trait SpriteLoader {
    fn load(&mut self, path: &str) -> Result<Sprite, AssetError>;
}

/// Held-key state folded from raw events, producing one [`TickInput`] per
/// tick. Replaces any notion of event handlers mutating shared movement
/// state.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    move_dir: Vec2,
    fire_pressed: bool,
    fire_released: bool,
    quit: bool,
}

impl InputState {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => self.quit = true,
            // W/A/S/D set a movement component while held.
            InputEvent::KeyDown(Key::W) => self.move_dir.y = -1.0,
            InputEvent::KeyDown(Key::S) => self.move_dir.y = 1.0,
            InputEvent::KeyDown(Key::D) => self.move_dir.x = 1.0,
            InputEvent::KeyDown(Key::A) => self.move_dir.x = -1.0,
            // Releasing either key of an axis zeroes that axis (legacy rule:
            // no memory of the other key still being held).
            InputEvent::KeyUp(Key::W) | InputEvent::KeyUp(Key::S) => self.move_dir.y = 0.0,
            InputEvent::KeyUp(Key::A) | InputEvent::KeyUp(Key::D) => self.move_dir.x = 0.0,
            InputEvent::MouseDown(Button::Left) => self.fire_pressed = true,
            InputEvent::MouseUp(Button::Left) => self.fire_released = true,
            _ => {}
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Build this tick's input; trigger edges are consumed, held keys are
    /// not.
    pub fn take_tick_input(&mut self, pointer: Vec2) -> TickInput {
        let input = TickInput {
            target: pointer,
            move_dir: self.move_dir,
            fire_pressed: self.fire_pressed,
            fire_released: self.fire_released,
        };
        self.fire_pressed = false;
        self.fire_released = false;
        input
    }
}

/// Wall-clock implementation pacing against `Instant`.
pub struct SystemClock {
    start: Instant,
    next_frame: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            next_frame: now,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn tick_delay(&mut self, target_hz: u32) {
        self.next_frame += Duration::from_secs(1) / target_hz;
        let now = Instant::now();
        if self.next_frame > now {
            std::thread::sleep(self.next_frame - now);
        } else {
            // Fell behind; re-anchor instead of trying to catch up.
            self.next_frame = now;
        }
    }
}

/// Virtual clock for tests and scripted sessions.
#[derive(Debug, Default)]
pub struct ManualClock {
    pub ms: u64,
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.ms
    }

    fn tick_delay(&mut self, target_hz: u32) {
        self.ms += (1000 / target_hz.max(1)) as u64;
    }
}

/// Event source that replays a prepared per-frame script.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: Vec<Vec<InputEvent>>,
    cursor: usize,
    pub pointer: Vec2,
}

impl ScriptedInput {
    pub fn new(frames: Vec<Vec<InputEvent>>, pointer: Vec2) -> Self {
        Self {
            frames,
            cursor: 0,
            pointer,
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let events = self.frames.get(self.cursor).cloned().unwrap_or_default();
        self.cursor += 1;
        events
    }

    fn pointer_pos(&self) -> Vec2 {
        self.pointer
    }
}

/// Renderer that counts what it is asked to draw. Enough for headless runs
/// and for asserting on frame composition.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames_presented: u64,
    pub last_commands: Vec<DrawCmd>,
    pub last_clear: Option<Color>,
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, color: Color) {
        self.last_clear = Some(color);
        self.last_commands.clear();
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.last_commands.push(DrawCmd::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.last_commands.push(DrawCmd::Line { from, to, color });
    }

    fn draw_rect(&mut self, rect: Aabb, color: Color) {
        self.last_commands.push(DrawCmd::Rect { rect, color });
    }

    fn draw_sprite(&mut self, sprite: SpriteId, top_left: Vec2, angle_deg: f32) {
        self.last_commands.push(DrawCmd::Sprite {
            sprite,
            top_left,
            angle_deg,
        });
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }
}

/// Asset table with fixed pixel sizes, standing in for a host image loader.
/// Unregistered paths fail the same way a missing file would.
pub struct StubAssets {
    sizes: HashMap<String, Vec2>,
    next_id: u32,
}

impl StubAssets {
    pub fn new() -> Self {
        Self {
            sizes: HashMap::new(),
            next_id: 0,
        }
    }

    /// The default asset set the demo binary expects.
    pub fn with_defaults() -> Self {
        let mut assets = Self::new();
        assets.register("character.png", Vec2::new(12.0, 18.0));
        assets.register("enemy.png", Vec2::new(9.0, 9.0));
        assets
    }

    pub fn register(&mut self, path: &str, size: Vec2) {
        self.sizes.insert(path.to_owned(), size);
    }
}

impl Default for StubAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteLoader for StubAssets {
    fn load(&mut self, path: &str) -> Result<Sprite, AssetError> {
        let size = self.sizes.get(path).copied().ok_or_else(|| AssetError {
            path: path.to_owned(),
        })?;
        let id = SpriteId(self.next_id);
        self.next_id += 1;
        log::info!("loaded sprite {path} ({size}) as {id:?}");
        Ok(Sprite { id, size })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_mapping_and_axis_release() {
        let mut state = InputState::default();
        state.apply(InputEvent::KeyDown(Key::W));
        state.apply(InputEvent::KeyDown(Key::D));
        let input = state.take_tick_input(Vec2::ZERO);
        assert_eq!(input.move_dir, Vec2::new(1.0, -1.0));

        // Releasing S zeroes the vertical axis even though W is still held.
        state.apply(InputEvent::KeyUp(Key::S));
        let input = state.take_tick_input(Vec2::ZERO);
        assert_eq!(input.move_dir, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn fire_edges_are_one_shot() {
        let mut state = InputState::default();
        state.apply(InputEvent::MouseDown(Button::Left));
        let input = state.take_tick_input(Vec2::ZERO);
        assert!(input.fire_pressed);
        let input = state.take_tick_input(Vec2::ZERO);
        assert!(!input.fire_pressed);

        state.apply(InputEvent::MouseUp(Button::Left));
        assert!(state.take_tick_input(Vec2::ZERO).fire_released);
    }

    #[test]
    fn quit_event_sticks() {
        let mut state = InputState::default();
        state.apply(InputEvent::Quit);
        state.take_tick_input(Vec2::ZERO);
        assert!(state.quit_requested());
    }

    #[test]
    fn submit_maps_commands_one_to_one() {
        let frame = Frame {
            clear: [255, 255, 255],
            commands: vec![
                DrawCmd::Circle {
                    center: Vec2::ZERO,
                    radius: 2.0,
                    color: [0, 0, 255],
                },
                DrawCmd::Line {
                    from: Vec2::ZERO,
                    to: Vec2::new(10.0, 0.0),
                    color: [255, 0, 0],
                },
            ],
        };
        let mut renderer = RecordingRenderer::default();
        renderer.submit(&frame);
        assert_eq!(renderer.frames_presented, 1);
        assert_eq!(renderer.last_clear, Some([255, 255, 255]));
        assert_eq!(renderer.last_commands, frame.commands);
    }

    #[test]
    fn missing_sprite_is_an_error() {
        let mut assets = StubAssets::with_defaults();
        assert!(assets.load("character.png").is_ok());
        let err = assets.load("nosuch.png").unwrap_err();
        assert!(err.to_string().contains("nosuch.png"));
    }

    #[test]
    fn manual_clock_advances_per_frame() {
        let mut clock = ManualClock::default();
        clock.tick_delay(60);
        clock.tick_delay(60);
        assert_eq!(clock.now_ms(), 32);
    }
}
