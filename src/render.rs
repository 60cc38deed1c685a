//! Hand-off to the renderer
//!
//! The simulation never draws. After every tick it captures a `Frame` and
//! passes it to whatever implements `Renderer` (a canvas page, a terminal,
//! a test spy).

use glam::Vec2;
use serde::Serialize;

use crate::PlayField;
use crate::consts::SCORE_DIGITS;
use crate::sim::{Explosion, GameEvent, GameSession, Obstacle, SessionPhase};

/// Where the canoe is and how it leans
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CanoePose {
    pub pos: Vec2,
    pub tilt: f32,
    pub size: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Frame<'a> {
    pub tick: u64,
    pub phase: SessionPhase,
    pub field: PlayField,
    /// Zero-padded score text
    pub score: String,
    pub canoe: CanoePose,
    /// Wake points, oldest first (empty when trails are off)
    pub trail: Vec<Vec2>,
    pub rocks: &'a [Obstacle],
    pub explosions: &'a [Explosion],
    /// Canvas translation while exploding
    pub shake: Option<Vec2>,
}

impl<'a> Frame<'a> {
    pub fn capture(session: &'a GameSession) -> Self {
        let player = session.player();
        let trail = if session.settings().trails {
            player.trail().copied().collect()
        } else {
            Vec::new()
        };

        Self {
            tick: session.time_ticks(),
            phase: session.phase(),
            field: *session.field(),
            score: session.score().formatted(SCORE_DIGITS),
            canoe: CanoePose {
                pos: player.pos,
                tilt: player.tilt(),
                size: player.size(),
            },
            trail,
            rocks: session.obstacles(),
            explosions: session.explosions(),
            shake: session.shake_offset(),
        }
    }

    /// The game over overlay is up
    pub fn show_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }
}

/// Draws frames; called once per tick after the state update
pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>);
}

/// Tick the session once, then draw the result
pub fn run_frame<R: Renderer + ?Sized>(
    session: &mut GameSession,
    renderer: &mut R,
    dt: f32,
) -> Vec<GameEvent> {
    let events = session.tick(dt);
    renderer.draw(&Frame::capture(session));
    events
}
