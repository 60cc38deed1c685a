//! The player's canoe

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::PlayField;
use crate::consts::*;

/// Desired movement along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Intent {
    /// Left / up
    Negative,
    #[default]
    Neutral,
    /// Right / down
    Positive,
}

impl Intent {
    /// Anything other than -1 or 1 means "hold still"
    pub fn from_axis(value: i32) -> Self {
        match value {
            -1 => Intent::Negative,
            1 => Intent::Positive,
            _ => Intent::Neutral,
        }
    }

    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Intent::Negative => -1.0,
            Intent::Neutral => 0.0,
            Intent::Positive => 1.0,
        }
    }
}

/// The canoe: position, steering intents and wake trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Where the canoe returns to on restart
    start: Vec2,
    /// Hull length
    size: f32,
    field: PlayField,
    intent_x: Intent,
    intent_y: Intent,
    /// Wake points, oldest at the front
    trail: VecDeque<Vec2>,
}

impl Player {
    pub fn new(field: PlayField, start: Vec2, size: f32) -> Self {
        Self {
            pos: start,
            start,
            size,
            field,
            intent_x: Intent::Neutral,
            intent_y: Intent::Neutral,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Canoe at its usual spot, sized to the field
    pub fn for_field(field: PlayField) -> Self {
        let start = Vec2::new(field.width * CANOE_START_X, field.height * CANOE_START_Y);
        Self::new(field, start, field.height * CANOE_SIZE)
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    #[inline]
    pub fn collision_radius(&self) -> f32 {
        self.size * CANOE_COLLISION
    }

    /// Paddling distance per tick
    #[inline]
    pub fn speed(&self) -> f32 {
        self.size * CANOE_SPEED
    }

    pub fn set_direction_x(&mut self, intent: Intent) {
        self.intent_x = intent;
    }

    pub fn set_direction_y(&mut self, intent: Intent) {
        self.intent_y = intent;
    }

    /// Lean of the hull while steering sideways (radians)
    pub fn tilt(&self) -> f32 {
        self.intent_x.sign() * CANOE_TILT
    }

    pub fn trail(&self) -> impl ExactSizeIterator<Item = &Vec2> {
        self.trail.iter()
    }

    /// Move one tick along both axes, then record the wake
    pub fn advance(&mut self, speed: f32) {
        self.pos.x = step_axis(self.pos.x, self.intent_x, speed, self.field.width);
        self.pos.y = step_axis(self.pos.y, self.intent_y, speed, self.field.height);
        self.record_trail();
    }

    /// Push the current position; older points drift downstream
    fn record_trail(&mut self) {
        self.trail.push_back(self.pos);
        while self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
        let drift = self.field.height * TRAIL_DRIFT;
        for point in &mut self.trail {
            point.y += drift;
        }
    }

    /// Back to the start with a clean wake (on restart)
    pub fn reset_position(&mut self) {
        self.pos = self.start;
        self.trail.clear();
    }
}

/// Field edges are walls: snap back if outside, otherwise move and clamp
fn step_axis(pos: f32, intent: Intent, speed: f32, extent: f32) -> f32 {
    if pos < 0.0 {
        0.0
    } else if pos > extent {
        extent
    } else {
        (pos + intent.sign() * speed).clamp(0.0, extent)
    }
}
