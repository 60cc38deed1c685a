//! Canoe Rapids entry point
//!
//! The browser build is driven from the page through `canoe_rapids::web`.
//! Natively this runs the simulation headless with a simple autopilot,
//! which is handy for watching the difficulty ramp in the logs:
//!
//! ```text
//! RUST_LOG=info canoe-rapids --frames 20000 --seed 7 --settings settings.json
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;

    use canoe_rapids::consts::*;
    use canoe_rapids::sim::{GameEvent, GameSession, Intent, SessionPhase};
    use canoe_rapids::{Frame, PlayField, Renderer, Settings, run_frame};

    /// Command line options
    pub struct Options {
        pub frames: u64,
        pub seed: u64,
        pub settings_path: Option<String>,
        pub width: f32,
        pub height: f32,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                frames: 10_000,
                seed: 1,
                settings_path: None,
                width: 480.0,
                height: 800.0,
            }
        }
    }

    impl Options {
        pub fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, Box<dyn Error>> {
            let mut options = Self::default();
            while let Some(arg) = args.next() {
                let mut value = || args.next().ok_or_else(|| format!("missing value for {}", arg));
                match arg.as_str() {
                    "--frames" => options.frames = value()?.parse()?,
                    "--seed" => options.seed = value()?.parse()?,
                    "--settings" => options.settings_path = Some(value()?),
                    "--width" => options.width = value()?.parse()?,
                    "--height" => options.height = value()?.parse()?,
                    other => return Err(format!("unknown argument: {}", other).into()),
                }
            }
            Ok(options)
        }
    }

    /// Stands in for the canvas: logs a summary line now and then
    #[derive(Default)]
    struct LogRenderer {
        frames: u64,
    }

    impl Renderer for LogRenderer {
        fn draw(&mut self, frame: &Frame<'_>) {
            self.frames += 1;
            if self.frames % 600 == 0 {
                log::debug!(
                    "frame {} {:?} score {} rocks {} canoe ({:.0}, {:.0})",
                    frame.tick,
                    frame.phase,
                    frame.score,
                    frame.rocks.len(),
                    frame.canoe.pos.x,
                    frame.canoe.pos.y
                );
            }
        }
    }

    /// Dodge the closest rock that is above the canoe and in its lane
    fn steer(session: &mut GameSession) {
        let canoe = session.player().pos;
        let reach = session.player().size();
        let threat = session
            .obstacles()
            .iter()
            .filter(|r| r.pos.y < canoe.y && (r.pos.x - canoe.x).abs() < r.radius() + reach)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        let intent = match threat {
            Some(rock) if rock.pos.x > canoe.x => Intent::Negative,
            Some(_) => Intent::Positive,
            None => Intent::Neutral,
        };
        // Pinned against a bank: the only way out is back across
        let width = session.field().width;
        let intent = match intent {
            Intent::Negative if canoe.x <= 0.0 => Intent::Positive,
            Intent::Positive if canoe.x >= width => Intent::Negative,
            other => other,
        };
        session.set_direction_x(intent);
    }

    pub fn run(options: Options) -> Result<(), Box<dyn Error>> {
        let settings = match &options.settings_path {
            Some(path) => Settings::from_json(&std::fs::read_to_string(path)?)?,
            None => Settings::default(),
        };
        let field = PlayField::from_window(options.width, options.height);
        let mut session = GameSession::with_settings(field, options.seed, settings);
        let mut renderer = LogRenderer::default();

        let mut best = 0;
        let mut runs = 0;
        let mut run_started_ms = 0.0;
        for _ in 0..options.frames {
            if session.phase() == SessionPhase::Playing {
                steer(&mut session);
            }
            for event in run_frame(&mut session, &mut renderer, SIM_DT) {
                if let GameEvent::GameOver { score } = event {
                    runs += 1;
                    best = best.max(score);
                    log::info!(
                        "Run {} over after {:.1}s: {} rocks",
                        runs,
                        (session.clock_ms() - run_started_ms) / 1000.0,
                        score
                    );
                    session.restart();
                    run_started_ms = session.clock_ms();
                }
            }
        }

        log::info!(
            "Finished {} frames: {} runs, best {}, current {}",
            renderer.frames,
            runs,
            best,
            session.score().formatted(SCORE_DIGITS)
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Canoe Rapids (headless) starting...");

    let options = headless::Options::parse(std::env::args().skip(1))?;
    headless::run(options)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is canoe_rapids::web::WebGame, this is just to satisfy the compiler
}
