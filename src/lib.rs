//! Canoe Rapids - A river dodging arcade game
//!
//! Core modules:
//! - `sim`: Game-state simulation (spawning, difficulty, collisions, scoring)
//! - `render`: Frame snapshot handed to whatever draws the game
//! - `settings`: Presentation preferences
//! - `web`: Browser binding (wasm32 only)

pub mod render;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use render::{Frame, Renderer, run_frame};
pub use settings::Settings;
pub use sim::{GameEvent, GameSession, SessionPhase};

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play field never gets shorter than this (pixels)
    pub const MIN_FIELD_HEIGHT: f32 = 500.0;
    /// Field width as a fraction of height (portrait river)
    pub const FIELD_ASPECT: f32 = 0.6;

    /// Spawn interval bounds (seconds)
    pub const MAX_SPAWN_INTERVAL: f32 = 1.0;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.2;
    /// Above this interval the ramp is steep, below it difficulty plateaus
    pub const PLATEAU_INTERVAL: f32 = 0.4;
    pub const FAST_DECAY: f32 = 0.01;
    pub const SLOW_DECAY: f32 = 0.001;

    /// Rock radius range as fractions of field width
    pub const ROCK_MIN_RADIUS: f32 = 0.05;
    pub const ROCK_MAX_RADIUS: f32 = 0.12;
    /// Rock fall speed per tick as a fraction of field height
    pub const ROCK_SPEED: f32 = 0.01;
    /// Rock gray shade range (cosmetic)
    pub const ROCK_MIN_SHADE: u8 = 45;
    pub const ROCK_MAX_SHADE: u8 = 105;

    /// Canoe spawn point as fractions of the field
    pub const CANOE_START_X: f32 = 0.5;
    pub const CANOE_START_Y: f32 = 0.8;
    /// Canoe length as a fraction of field height
    pub const CANOE_SIZE: f32 = 0.1;
    /// Hit circle as a fraction of canoe length (smaller than the hull)
    pub const CANOE_COLLISION: f32 = 0.175;
    /// Paddling speed per tick as a fraction of canoe length
    pub const CANOE_SPEED: f32 = 0.05;
    /// Lean while steering (radians)
    pub const CANOE_TILT: f32 = std::f32::consts::PI * 0.125;

    /// Wake trail
    pub const TRAIL_LENGTH: usize = 40;
    /// Downstream drift of wake points per tick, fraction of field height
    pub const TRAIL_DRIFT: f32 = 0.005;

    /// Delay between the crash and the game over screen
    pub const EXPLODE_DELAY_MS: f64 = 1000.0;
    /// Screen shake magnitude while exploding, fraction of field height
    pub const SHAKE: f32 = 0.01;

    /// Explosion particles
    pub const EXPLOSION_PARTICLES: usize = 100;
    pub const PARTICLE_MIN_SPEED: f32 = 5.0;
    pub const PARTICLE_MAX_SPEED: f32 = 15.0;
    pub const PARTICLE_DRAG: f32 = 0.9;
    pub const PARTICLE_LIFESPAN: f32 = 255.0;
    pub const PARTICLE_FADE: f32 = 4.0;
    /// Particle dot size as a fraction of field height
    pub const PARTICLE_SIZE: f32 = 0.007;

    /// Digits shown on the score display
    pub const SCORE_DIGITS: usize = 5;
}

/// The bounded region the canoe and rocks live in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

impl PlayField {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Fit a portrait river into the window
    pub fn from_window(window_width: f32, window_height: f32) -> Self {
        let height = window_height.max(consts::MIN_FIELD_HEIGHT);
        let width = window_width.min(height * consts::FIELD_ASPECT);
        Self { width, height }
    }
}
