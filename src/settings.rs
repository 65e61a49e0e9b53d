//! Game tunables.
//!
//! Read once at startup from an optional JSON file; every field falls back
//! to its default when absent.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entities::Size;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frame ticks per second
    pub frame_rate: u32,
    /// Milliseconds between enemy spawns
    pub spawn_interval_ms: u64,

    // === Player ===
    /// Cells moved per step
    pub player_speed: i32,
    /// Rows left free between the player's start position and the bottom edge
    pub player_floor: i32,
    /// Frames between repeated moves while a direction key is held
    pub move_repeat_frames: u32,

    // === Enemies ===
    /// Cells an enemy descends per step
    pub enemy_speed: i32,
    /// Frames between enemy descent steps
    pub enemy_step_frames: u32,
    /// Columns kept free on both sides when picking a spawn column
    pub spawn_margin: i32,

    // === Bullets ===
    /// Cells a bullet climbs per frame
    pub bullet_speed: i32,

    // === Frontend ===
    /// Ring the terminal bell for sound cues
    pub bell: bool,
    /// Fixed RNG seed; fresh entropy when absent
    pub seed: Option<u64>,
    /// Log destination; logging stays off when absent
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            spawn_interval_ms: 1000,

            player_speed: 1,
            player_floor: 1,
            move_repeat_frames: 3,

            enemy_speed: 1,
            enemy_step_frames: 20,
            spawn_margin: 2,

            bullet_speed: 1,

            bell: true,
            seed: None,
            log_file: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the loop cannot run with. Spawn margins also depend on
    /// the viewport and are checked by `validate_for`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 || self.frame_rate > 1000 {
            return Err(invalid("frame_rate", "must be between 1 and 1000"));
        }
        if self.spawn_interval_ms == 0 {
            return Err(invalid("spawn_interval_ms", "must be positive"));
        }
        if self.player_speed <= 0 {
            return Err(invalid("player_speed", "must be positive"));
        }
        if self.player_floor < 0 {
            return Err(invalid("player_floor", "must not be negative"));
        }
        if self.move_repeat_frames == 0 {
            return Err(invalid("move_repeat_frames", "must be positive"));
        }
        if self.enemy_speed <= 0 {
            return Err(invalid("enemy_speed", "must be positive"));
        }
        if self.enemy_step_frames == 0 {
            return Err(invalid("enemy_step_frames", "must be positive"));
        }
        if self.spawn_margin < 0 {
            return Err(invalid("spawn_margin", "must not be negative"));
        }
        if self.bullet_speed <= 0 {
            return Err(invalid("bullet_speed", "must be positive"));
        }
        // Cells per frame: bullets climb every frame, enemies every
        // `enemy_step_frames`.
        let enemy_steps = i64::from(self.enemy_step_frames);
        if i64::from(self.bullet_speed) * enemy_steps <= i64::from(self.enemy_speed) {
            return Err(invalid("bullet_speed", "bullets must be faster than enemies"));
        }
        Ok(())
    }

    /// Full validation once the viewport and enemy sprite sizes are known:
    /// the spawn margins must leave at least one column for an enemy.
    pub fn validate_for(&self, viewport: Size, enemy: Size) -> Result<(), ConfigError> {
        self.validate()?;
        if viewport.width - enemy.width - 2 * self.spawn_margin < 0 {
            return Err(invalid(
                "spawn_margin",
                &format!(
                    "no spawn column left for a {}-wide enemy in a {}-wide viewport",
                    enemy.width, viewport.width
                ),
            ));
        }
        Ok(())
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    pub fn spawn_period(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.to_string() }
}
