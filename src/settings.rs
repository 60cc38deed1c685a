//! Presentation settings
//!
//! These only change what gets handed to the renderer. The difficulty ramp
//! is fixed and not affected by anything in here.

use serde::{Deserialize, Serialize};

use crate::consts::EXPLOSION_PARTICLES;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Screen shake while the canoe is exploding
    pub screen_shake: bool,
    /// Explosion sparks
    pub particles: bool,
    /// Wake bubbles behind the canoe
    pub trails: bool,
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            particles: true,
            trails: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse settings JSON, falling back to defaults on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Sparks per explosion
    pub fn explosion_particles(&self) -> usize {
        if self.particles {
            EXPLOSION_PARTICLES
        } else {
            0
        }
    }
}
