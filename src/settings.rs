//! Engine tuning
//!
//! Defaults reproduce the game's fixed feel. Hosts may override them from a
//! JSON file; missing keys fall back to the defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;

/// Simulation constants exposed for tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Host timer rate (ticks per second)
    pub tick_hz: f32,
    /// Progress per physics step at scale 1
    pub step_rate: f32,
    /// Physics steps per tick while the boost modifier is held
    pub boost_speed: u32,

    // === Partial-progress caps ===
    /// How far the head peeks through an exit before the level ends
    pub exit_cap: f32,
    /// How far the head advances into an already visited vertex
    pub overlap_cap: f32,
    /// How far the head pokes into a blocked crossing
    pub blocked_cap: f32,

    /// Ticks per failure-flash cycle (on for the first half)
    pub flash_period: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_hz: 30.0,
            step_rate: 0.02,
            boost_speed: 3,

            exit_cap: 0.2,
            overlap_cap: 0.8,
            blocked_cap: 0.3,

            flash_period: 32,
        }
    }
}

impl Settings {
    /// Parse settings JSON (partial objects allowed)
    pub fn from_json(json: &str) -> Result<Self, PuzzleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PuzzleError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Interval between host ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.tick_hz.max(1.0))
    }

    /// Grid scale factor: larger grids move faster so crossing time stays even
    pub fn scale_for(rows: i32, cols: i32) -> f32 {
        (rows.max(cols).max(1) as f32).sqrt()
    }

    /// Whether failure markers are lit on this animation tick
    pub fn flash_on(&self, animate_state: u64) -> bool {
        let period = u64::from(self.flash_period.max(2));
        animate_state % period < period / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "boost_speed": 5 }"#).unwrap();
        assert_eq!(s.boost_speed, 5);
        assert_eq!(s.exit_cap, 0.2);
        assert_eq!(s.overlap_cap, 0.8);
        assert_eq!(s.blocked_cap, 0.3);
    }

    #[test]
    fn test_flash_phase() {
        let s = Settings::default();
        assert!(s.flash_on(0));
        assert!(s.flash_on(15));
        assert!(!s.flash_on(16));
        assert!(!s.flash_on(31));
        assert!(s.flash_on(32));
    }

    #[test]
    fn test_scale_and_interval() {
        assert!((Settings::scale_for(3, 2) - 3f32.sqrt()).abs() < 1e-6);
        assert_eq!(Settings::scale_for(1, 1), 1.0);
        let interval = Settings::default().tick_interval();
        assert!((interval.as_secs_f32() - 1.0 / 30.0).abs() < 1e-4);
    }
}
