//! Per-wave stat curves.

use path_defence_core::{DifficultyMultipliers, WaveId};
use serde::{Deserialize, Serialize};

/// Spawn interval at wave zero, in milliseconds.
pub const BASE_SPAWN_INTERVAL_MS: u32 = 800;

/// Lower bound applied to the spawn interval before and after theme pacing.
pub const MIN_SPAWN_INTERVAL_MS: u32 = 300;

/// Absolute floor for the spawn interval once every adjustment is applied.
pub const HARD_SPAWN_INTERVAL_FLOOR_MS: u32 = 280;

/// Upper bound of the reward curve before difficulty.
pub const MAX_REWARD_MULTIPLIER: f64 = 1.25;

/// Scaling factors applied to every archetype spawned in a wave.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveScaling {
    enemy_count: u32,
    health: f64,
    speed: f64,
    reward: f64,
    spawn_interval_ms: u32,
}

impl WaveScaling {
    /// Evaluates the curves for `wave`.
    ///
    /// `interval_multiplier` is the pacing factor of the wave's theme. Waves
    /// always hold at least one enemy.
    #[must_use]
    pub fn for_wave(
        wave: WaveId,
        difficulty: DifficultyMultipliers,
        interval_multiplier: f64,
    ) -> Self {
        let w = f64::from(wave.get());

        let raw_count = (5.0 + w * 1.5 + (w + 1.0).ln() * 3.0) * sanitize(difficulty.count);
        let enemy_count = saturating_u32(raw_count.floor()).max(1);

        let health = (1.0 + (w - 1.0) * 0.15 + (w / 10.0).powf(1.5)) * sanitize(difficulty.health);
        let speed = (1.0 + (w * 0.04).min(0.5)) * sanitize(difficulty.speed);
        let reward = (0.95 + (w + 1.0).ln() * 0.08).min(MAX_REWARD_MULTIPLIER)
            * sanitize(difficulty.reward);

        Self {
            enemy_count,
            health,
            speed,
            reward,
            spawn_interval_ms: spawn_interval_ms(wave, interval_multiplier),
        }
    }

    /// Number of enemies in the wave, bosses included.
    #[must_use]
    pub const fn enemy_count(&self) -> u32 {
        self.enemy_count
    }

    /// Factor applied to archetype health.
    #[must_use]
    pub const fn health(&self) -> f64 {
        self.health
    }

    /// Factor applied to archetype speed.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Factor applied to archetype rewards.
    #[must_use]
    pub const fn reward(&self) -> f64 {
        self.reward
    }

    /// Delay between consecutive spawns, in milliseconds of game time.
    #[must_use]
    pub const fn spawn_interval_ms(&self) -> u32 {
        self.spawn_interval_ms
    }
}

/// Spawn interval for `wave` after theme pacing and both floors.
#[must_use]
pub fn spawn_interval_ms(wave: WaveId, interval_multiplier: f64) -> u32 {
    let base = f64::from(BASE_SPAWN_INTERVAL_MS) - f64::from(wave.get()) * 30.0;
    let base = base.max(f64::from(MIN_SPAWN_INTERVAL_MS));
    let multiplier = if interval_multiplier.is_finite() && interval_multiplier > 0.0 {
        interval_multiplier
    } else {
        1.0
    };
    saturating_u32((base * multiplier).round())
        .max(MIN_SPAWN_INTERVAL_MS)
        .max(HARD_SPAWN_INTERVAL_FLOOR_MS)
}

/// Wave completion bonus before rounding down.
#[must_use]
pub fn completion_bonus(wave: WaveId, reward_multiplier: f64) -> u32 {
    let w = f64::from(wave.get());
    let bonus = (12.0 + w * 3.0 + w.powf(1.1)) * sanitize(reward_multiplier);
    saturating_u32(bonus.floor())
}

/// Negative or non-finite multipliers collapse to zero.
fn sanitize(multiplier: f64) -> f64 {
    if multiplier.is_finite() {
        multiplier.max(0.0)
    } else {
        0.0
    }
}

pub(crate) fn saturating_u32(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value as u32
    }
}
