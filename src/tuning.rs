//! Data-driven game balance
//!
//! Defaults reproduce the original feel; a JSON file can override any subset
//! of fields. Loaded once at startup; a bad file is fatal there, never
//! mid-session.

use std::fmt;
use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player movement speed, units per tick per held axis
    pub player_speed: f32,
    pub player_spawn: Vec2,
    /// Rotation pivot of the player sprite, relative to its origin
    pub player_pivot: Vec2,
    pub player_sprite: String,
    /// Time between shots while the trigger is held
    pub weapon_cooldown_ms: i64,
    /// Muzzle speed, units per tick
    pub bullet_speed: f32,
    /// Enemy pursuit speed, units per tick
    pub enemy_speed: f32,
    /// Fixed point every enemy spawns at
    pub enemy_spawn: Vec2,
    pub enemy_pivot: Vec2,
    pub enemy_sprite: String,
    /// Independent per-tick spawn probability (~one enemy per 100 ticks at
    /// the default)
    pub spawn_chance: f32,
    /// Play-area rectangle, anchored at the origin; projectiles leaving it
    /// are culled
    pub play_area: Vec2,
    /// Host surface size (the play area is smaller than the screen)
    pub screen: Vec2,
    /// Spawner RNG seed; same seed + same inputs replays identically
    pub seed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 5.0,
            player_spawn: Vec2::new(100.0, 100.0),
            player_pivot: Vec2::new(6.0, 9.0),
            player_sprite: "character.png".to_owned(),
            weapon_cooldown_ms: 150,
            bullet_speed: 15.0,
            enemy_speed: 2.0,
            enemy_spawn: Vec2::ZERO,
            enemy_pivot: Vec2::new(4.0, 4.0),
            enemy_sprite: "enemy.png".to_owned(),
            spawn_chance: 0.01,
            play_area: Vec2::new(600.0, 400.0),
            screen: Vec2::new(640.0, 480.0),
            seed: 0,
        }
    }
}

#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {e}"),
            TuningError::Parse(e) => write!(f, "failed to parse tuning file: {e}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let text = fs::read_to_string(path)?;
        let tuning: Tuning = serde_json::from_str(&text)?;
        log::info!("tuning loaded from {}", path.display());
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_constants() {
        let t = Tuning::default();
        assert_eq!(t.player_speed, 5.0);
        assert_eq!(t.weapon_cooldown_ms, 150);
        assert_eq!(t.bullet_speed, 15.0);
        assert_eq!(t.enemy_speed, 2.0);
        assert_eq!(t.spawn_chance, 0.01);
        assert_eq!(t.play_area, Vec2::new(600.0, 400.0));
        assert_eq!(t.screen, Vec2::new(640.0, 480.0));
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let t: Tuning = serde_json::from_str(r#"{"bullet_speed": 20.0, "seed": 42}"#).unwrap();
        assert_eq!(t.bullet_speed, 20.0);
        assert_eq!(t.seed, 42);
        assert_eq!(t.player_speed, 5.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Tuning::load(Path::new("/nonexistent/tuning.json")).unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = serde_json::from_str::<Tuning>("not json").unwrap_err();
        assert!(TuningError::from(err).to_string().contains("parse"));
    }
}
