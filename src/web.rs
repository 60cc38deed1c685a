//! Browser binding
//!
//! The page owns the canvas and the keyboard/mouse listeners. It calls
//! `frame` from `requestAnimationFrame`, draws the returned JSON, and
//! forwards steering and the restart button here.

use wasm_bindgen::prelude::*;

use crate::PlayField;
use crate::consts::*;
use crate::render::Frame;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameSession, Intent};

/// Frame JSON plus the events the page may want to react to
#[derive(serde::Serialize)]
struct FrameMessage<'a> {
    frame: Frame<'a>,
    events: Vec<GameEvent>,
}

#[wasm_bindgen]
pub struct WebGame {
    session: GameSession,
    accumulator: f32,
    last_time: f64,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(window_width: f32, window_height: f32) -> WebGame {
        Self::with_settings(window_width, window_height, "{}")
    }

    /// Create a game with settings JSON (bad JSON falls back to defaults)
    pub fn with_settings(window_width: f32, window_height: f32, settings: &str) -> WebGame {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            log::debug!("Logger already initialized");
        }

        let field = PlayField::from_window(window_width, window_height);
        let seed = js_sys::Date::now() as u64;
        let settings = Settings::from_json_or_default(settings);
        WebGame {
            session: GameSession::with_settings(field, seed, settings),
            accumulator: 0.0,
            last_time: 0.0,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f32 {
        self.session.field().width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f32 {
        self.session.field().height
    }

    /// Run however many fixed ticks fit since the last call, return frame JSON
    pub fn frame(&mut self, now_ms: f64) -> String {
        let dt = if self.last_time > 0.0 {
            ((now_ms - self.last_time) / 1000.0) as f32
        } else {
            SIM_DT
        };
        self.last_time = now_ms;
        self.accumulator += dt.min(0.1);

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(self.session.tick(SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        let message = FrameMessage {
            frame: Frame::capture(&self.session),
            events,
        };
        match serde_json::to_string(&message) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Frame serialization failed: {:?}", e);
                String::from("{}")
            }
        }
    }

    /// -1 left, 1 right, anything else stops
    pub fn set_direction_x(&mut self, direction: i32) {
        self.session.set_direction_x(Intent::from_axis(direction));
    }

    /// -1 up, 1 down, anything else stops
    pub fn set_direction_y(&mut self, direction: i32) {
        self.session.set_direction_y(Intent::from_axis(direction));
    }

    /// Wired to the restart button
    pub fn restart(&mut self) {
        self.session.restart();
        self.accumulator = 0.0;
    }

    /// Canoe x, for mouse steering on the page
    pub fn canoe_x(&self) -> f32 {
        self.session.player().pos.x
    }
}
