//! Spawn pacing
//!
//! Rocks come faster the longer the run lasts. The interval drops quickly
//! down to the plateau, then creeps toward the floor.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// True when more than `interval` seconds have passed since the last spawn
#[inline]
pub fn should_spawn(now_ms: f64, last_spawn_ms: f64, interval: f32) -> bool {
    now_ms > last_spawn_ms + f64::from(interval) * 1000.0
}

/// Interval after one spawn's worth of decay
pub fn next_interval(interval: f32) -> f32 {
    let step = if interval > PLATEAU_INTERVAL {
        FAST_DECAY
    } else {
        SLOW_DECAY
    };
    (interval - step).clamp(MIN_SPAWN_INTERVAL, MAX_SPAWN_INTERVAL)
}

/// Tracks the current spawn interval and when the last rock appeared
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyScheduler {
    interval: f32,
    last_spawn_ms: f64,
}

impl DifficultyScheduler {
    pub fn new(now_ms: f64) -> Self {
        Self {
            interval: MAX_SPAWN_INTERVAL,
            last_spawn_ms: now_ms,
        }
    }

    /// Current spawn interval in seconds
    #[inline]
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Returns true if a rock is due; records the spawn and decays the interval
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if !should_spawn(now_ms, self.last_spawn_ms, self.interval) {
            return false;
        }
        self.last_spawn_ms = now_ms;
        self.interval = next_interval(self.interval);
        true
    }

    pub fn reset(&mut self, now_ms: f64) {
        self.interval = MAX_SPAWN_INTERVAL;
        self.last_spawn_ms = now_ms;
    }
}
