//! Skirmish entry point
//!
//! Runs a scripted headless session at the fixed tick rate. A windowed host
//! would swap in real Clock/InputSource/Renderer implementations; the sim
//! core is identical either way.

use std::path::Path;
use std::process::ExitCode;

use glam::Vec2;

use skirmish::consts::TICK_HZ;
use skirmish::platform::{
    Button, Clock, InputEvent, InputSource, InputState, Key, RecordingRenderer, Renderer,
    ScriptedInput, SpriteLoader, StubAssets, SystemClock,
};
use skirmish::sim::{World, frame};
use skirmish::tuning::Tuning;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("skirmish starting");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match Tuning::load(Path::new(&path)) {
            Ok(t) => t,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    let mut assets = StubAssets::with_defaults();
    let player_sprite = match assets.load(&tuning.player_sprite) {
        Ok(s) => s,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let enemy_sprite = match assets.load(&tuning.enemy_sprite) {
        Ok(s) => s,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let pointer = tuning.screen / 2.0;
    let mut world = World::new(tuning, player_sprite, enemy_sprite);
    let mut clock = SystemClock::new();
    let mut input_src = ScriptedInput::new(demo_script(), pointer);
    let mut renderer = RecordingRenderer::default();

    run(&mut world, &mut clock, &mut input_src, &mut renderer);

    log::info!(
        "session over: {} ticks, {} frames, {} enemies active, {} projectiles in flight",
        world.tick_count,
        renderer.frames_presented,
        world.enemies.len(),
        world.projectiles.len()
    );
    ExitCode::SUCCESS
}

/// The fixed-rate loop: poll, fold input, tick, compose, submit, pace.
fn run(
    world: &mut World,
    clock: &mut impl Clock,
    input_src: &mut impl InputSource,
    renderer: &mut impl Renderer,
) {
    let mut input_state = InputState::default();
    loop {
        for event in input_src.poll_events() {
            input_state.apply(event);
        }
        if input_state.quit_requested() {
            log::info!("quit requested, finishing up");
            break;
        }

        let pointer = input_src.pointer_pos();
        let input = input_state.take_tick_input(pointer);
        skirmish::sim::tick(world, &input, clock.now_ms());

        renderer.submit(&frame::compose(world, pointer));
        clock.tick_delay(TICK_HZ);
    }
}

/// Ten seconds of demo play: strafe right while firing, release, then quit.
fn demo_script() -> Vec<Vec<InputEvent>> {
    let mut frames = vec![Vec::new(); 600];
    frames[0] = vec![
        InputEvent::KeyDown(Key::D),
        InputEvent::MouseDown(Button::Left),
    ];
    frames[90] = vec![InputEvent::KeyUp(Key::D), InputEvent::KeyDown(Key::S)];
    frames[180] = vec![InputEvent::KeyUp(Key::S)];
    frames[420] = vec![InputEvent::MouseUp(Button::Left)];
    frames[599] = vec![InputEvent::Quit];
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish::platform::ManualClock;
    use skirmish::sim::rig::{Sprite, SpriteId};

    #[test]
    fn scripted_session_runs_to_quit() {
        let player = Sprite {
            id: SpriteId(0),
            size: Vec2::new(12.0, 18.0),
        };
        let enemy = Sprite {
            id: SpriteId(1),
            size: Vec2::splat(9.0),
        };
        let mut world = World::new(Tuning::default(), player, enemy);
        let mut clock = ManualClock::default();
        let mut input = ScriptedInput::new(demo_script(), Vec2::new(320.0, 240.0));
        let mut renderer = RecordingRenderer::default();

        run(&mut world, &mut clock, &mut input, &mut renderer);

        assert_eq!(world.tick_count, 599);
        assert_eq!(renderer.frames_presented, 599);
        // Player strafed right for 90 ticks then down for 90 at 5 units/tick.
        assert_eq!(world.player.pos, Vec2::new(100.0 + 90.0 * 5.0, 100.0 + 90.0 * 5.0));
    }
}
