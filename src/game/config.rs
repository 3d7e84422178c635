use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use super::sampler::{MAX_ATTEMPTS, RetryPolicy};
use crate::render::Theme;

/// Arena radius in cells
pub const CIRCLE_RADIUS: u32 = 20;
/// Milliseconds between ticks
pub const GAME_SPEED_MS: u64 = 200;
/// Size of one cell in canvas units
pub const SEGMENT_SIZE: f64 = 15.0;

const MAX_RADIUS: u32 = 1000;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Radius of the circular arena
    pub circle_radius: u32,
    /// Tick interval in milliseconds
    pub game_speed_ms: u64,
    /// Canvas units per grid cell
    pub segment_size: f64,
    /// Draws the food sampler makes before giving up on a free cell
    pub max_attempts: u32,
    /// Sampler behaviour once attempts run out
    pub retry_policy: RetryPolicy,
    /// Ignore 180-degree turns while the snake is longer than its head
    pub prevent_reversal: bool,
    /// Fixed RNG seed, mostly for reproducing a game
    pub seed: Option<u64>,
    pub theme: Theme,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            circle_radius: CIRCLE_RADIUS,
            game_speed_ms: GAME_SPEED_MS,
            segment_size: SEGMENT_SIZE,
            max_attempts: MAX_ATTEMPTS,
            retry_policy: RetryPolicy::default(),
            prevent_reversal: false,
            seed: None,
            theme: Theme::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom arena radius
    pub fn new(circle_radius: u32) -> Self {
        Self {
            circle_radius,
            ..Default::default()
        }
    }

    /// Read a JSON config file; missing fields fall back to defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .map_err(|e| anyhow!("Invalid config in {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.game_speed_ms)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.circle_radius == 0 {
            return Err("circle_radius must be at least 1".to_string());
        }

        if self.circle_radius > MAX_RADIUS {
            return Err(format!(
                "circle_radius must be at most {}, got {}",
                MAX_RADIUS, self.circle_radius
            ));
        }

        if self.game_speed_ms == 0 {
            return Err("game_speed_ms must be at least 1".to_string());
        }

        if !(self.segment_size > 0.0 && self.segment_size.is_finite()) {
            return Err(format!(
                "segment_size must be positive, got {}",
                self.segment_size
            ));
        }

        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }

        self.theme.validate()
    }
}
