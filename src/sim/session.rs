//! Game session: one run of the river, tick by tick
//!
//! Owns every piece of game state. The host calls `tick` once per frame,
//! forwards steering intents, and calls `restart` from the game over screen.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::first_collision;
use super::difficulty::DifficultyScheduler;
use super::entity::{Explosion, Obstacle};
use super::player::{Intent, Player};
use super::score::ScoreTracker;
use super::spawner::spawn_obstacle;
use crate::PlayField;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Canoe is paddling, rocks are falling
    Playing,
    /// Canoe hit a rock; waiting for the game over screen
    Exploding,
    /// Run ended, waiting for restart
    GameOver,
}

/// Things that happened during a tick, for sounds and UI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RockSpawned { id: u32 },
    /// A rock left the bottom of the field
    RockPassed { id: u32, score: u64 },
    Collision { pos: Vec2 },
    GameOver { score: u64 },
    Restarted,
}

/// All state for a single play session
#[derive(Debug, Clone)]
pub struct GameSession {
    field: PlayField,
    settings: Settings,
    rng: Pcg32,
    /// Session clock, advanced by `dt` each tick
    clock_ms: f64,
    time_ticks: u64,
    phase: SessionPhase,
    difficulty: DifficultyScheduler,
    obstacles: Vec<Obstacle>,
    explosions: Vec<Explosion>,
    player: Player,
    score: ScoreTracker,
    /// Latched once on entering Exploding, cleared on restart
    game_over_at: Option<f64>,
    /// Current screen shake translation (Exploding only)
    shake: Option<Vec2>,
    next_id: u32,
}

impl GameSession {
    pub fn new(field: PlayField, seed: u64) -> Self {
        Self::with_settings(field, seed, Settings::default())
    }

    pub fn with_settings(field: PlayField, seed: u64, settings: Settings) -> Self {
        log::info!(
            "New session: field {}x{}, seed {}",
            field.width,
            field.height,
            seed
        );
        Self {
            field,
            settings,
            rng: Pcg32::seed_from_u64(seed),
            clock_ms: 0.0,
            time_ticks: 0,
            phase: SessionPhase::Playing,
            difficulty: DifficultyScheduler::new(0.0),
            obstacles: Vec::new(),
            explosions: Vec::new(),
            player: Player::for_field(field),
            score: ScoreTracker::new(),
            game_over_at: None,
            shake: None,
            next_id: 1,
        }
    }

    pub fn field(&self) -> &PlayField {
        &self.field
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    /// Current spawn interval in seconds
    pub fn spawn_interval(&self) -> f32 {
        self.difficulty.interval()
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn shake_offset(&self) -> Option<Vec2> {
        self.shake
    }

    pub fn set_direction_x(&mut self, intent: Intent) {
        self.player.set_direction_x(intent);
    }

    pub fn set_direction_y(&mut self, intent: Intent) {
        self.player.set_direction_y(intent);
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Advance the session by one tick of `dt` seconds
    pub fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.clock_ms += f64::from(dt) * 1000.0;
        self.time_ticks += 1;

        // Sparks keep flying in every phase
        for explosion in &mut self.explosions {
            explosion.update();
        }
        self.explosions.retain(|e| !e.done());

        match self.phase {
            SessionPhase::Playing => self.tick_playing(&mut events),
            SessionPhase::Exploding => self.tick_exploding(&mut events),
            SessionPhase::GameOver => {}
        }

        self.shake = if self.phase == SessionPhase::Exploding
            && self.settings.effective_screen_shake()
        {
            let magnitude = self.field.height * SHAKE;
            Some(Vec2::new(
                self.rng.random_range(-magnitude..=magnitude),
                self.rng.random_range(-magnitude..=magnitude),
            ))
        } else {
            None
        };

        events
    }

    fn tick_playing(&mut self, events: &mut Vec<GameEvent>) {
        // At most one rock per tick
        if self.difficulty.poll(self.clock_ms) {
            let id = self.next_entity_id();
            let rock = spawn_obstacle(id, &self.field, &mut self.rng);
            log::debug!(
                "Spawned rock {} (r={:.1}), next interval {:.3}s",
                id,
                rock.radius(),
                self.difficulty.interval()
            );
            self.obstacles.push(rock);
            events.push(GameEvent::RockSpawned { id });
        }

        for rock in &mut self.obstacles {
            rock.advance();
        }

        // Survived rocks score a point each
        let height = self.field.height;
        let score = &mut self.score;
        self.obstacles.retain(|rock| {
            if rock.has_exited(height) {
                score.increment();
                events.push(GameEvent::RockPassed {
                    id: rock.id,
                    score: score.value(),
                });
                false
            } else {
                true
            }
        });

        let speed = self.player.speed();
        self.player.advance(speed);

        if let Some(index) = first_collision(&self.player, &self.obstacles) {
            let pos = self.player.pos;
            log::info!(
                "Canoe hit rock {} at ({:.0}, {:.0}), score {}",
                self.obstacles[index].id,
                pos.x,
                pos.y,
                self.score.value()
            );
            self.phase = SessionPhase::Exploding;
            self.game_over_at = Some(self.clock_ms + EXPLODE_DELAY_MS);

            let count = self.settings.explosion_particles();
            if count > 0 {
                let size = self.field.height * PARTICLE_SIZE;
                self.explosions
                    .push(Explosion::new(pos, count, size, &mut self.rng));
            }
            events.push(GameEvent::Collision { pos });
        }
    }

    fn tick_exploding(&mut self, events: &mut Vec<GameEvent>) {
        let Some(deadline) = self.game_over_at else {
            return;
        };
        if self.clock_ms >= deadline {
            self.game_over_at = None;
            self.phase = SessionPhase::GameOver;
            log::info!("Game over, final score {}", self.score.formatted(SCORE_DIGITS));
            events.push(GameEvent::GameOver {
                score: self.score.value(),
            });
        }
    }

    /// Start a fresh run from any phase
    pub fn restart(&mut self) -> GameEvent {
        log::info!("Restarting (was {:?})", self.phase);
        self.phase = SessionPhase::Playing;
        self.game_over_at = None;
        self.shake = None;
        self.score.reset();
        self.difficulty.reset(self.clock_ms);
        self.obstacles.clear();
        self.explosions.clear();
        self.player.reset_position();
        GameEvent::Restarted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn field() -> PlayField {
        PlayField::new(300.0, 500.0)
    }

    fn rock(session: &mut GameSession, pos: Vec2, radius: f32) {
        let id = session.next_entity_id();
        let speed = session.field.height * ROCK_SPEED;
        session.obstacles.push(Obstacle::new(id, pos, radius, speed, 80));
    }

    /// Drop a rock right on the canoe so the next tick collides
    fn crash(session: &mut GameSession) -> Vec<GameEvent> {
        let pos = session.player.pos - Vec2::new(0.0, 5.0);
        rock(session, pos, 20.0);
        session.tick(SIM_DT)
    }

    #[test]
    fn test_new_session_starts_playing() {
        let session = GameSession::new(field(), 1);
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.score().value(), 0);
        assert!(session.obstacles().is_empty());
        assert_eq!(session.spawn_interval(), MAX_SPAWN_INTERVAL);
        assert_eq!(session.player().pos, session.player().start());
    }

    #[test]
    fn test_first_rock_after_one_second() {
        let mut session = GameSession::new(field(), 1);
        for _ in 0..59 {
            session.tick(SIM_DT);
        }
        assert!(session.obstacles().is_empty());

        let mut spawned = 0;
        for _ in 0..3 {
            spawned += session
                .tick(SIM_DT)
                .iter()
                .filter(|e| matches!(e, GameEvent::RockSpawned { .. }))
                .count();
        }
        assert_eq!(spawned, 1);
        assert_eq!(session.obstacles().len(), 1);
        assert!(session.spawn_interval() < MAX_SPAWN_INTERVAL);
    }

    #[test]
    fn test_rock_leaving_field_scores_once() {
        let mut session = GameSession::new(field(), 1);
        // Speed is 5/tick: this one crosses height + radius next tick
        rock(&mut session, Vec2::new(10.0, 508.0), 10.0);
        // This one does not
        rock(&mut session, Vec2::new(10.0, 200.0), 10.0);

        let events = session.tick(SIM_DT);
        assert_eq!(session.score().value(), 1);
        assert_eq!(session.obstacles().len(), 1);
        assert!(events.contains(&GameEvent::RockPassed { id: 1, score: 1 }));

        session.tick(SIM_DT);
        assert_eq!(session.score().value(), 1);
    }

    #[test]
    fn test_collision_starts_exploding() {
        let mut session = GameSession::new(field(), 1);
        let events = crash(&mut session);

        assert_eq!(session.phase(), SessionPhase::Exploding);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::Collision { .. }))
        );
        assert_eq!(session.explosions().len(), 1);
        assert_eq!(
            session.explosions()[0].particles.len(),
            EXPLOSION_PARTICLES
        );
        assert!(session.shake_offset().is_some());
    }

    #[test]
    fn test_exploding_freezes_rocks_and_score() {
        let mut session = GameSession::new(field(), 1);
        rock(&mut session, Vec2::new(10.0, 100.0), 10.0);
        crash(&mut session);
        let frozen: Vec<Vec2> = session.obstacles().iter().map(|r| r.pos).collect();
        let canoe = session.player().pos;

        for _ in 0..30 {
            let events = session.tick(SIM_DT);
            assert!(events.is_empty());
        }
        let after: Vec<Vec2> = session.obstacles().iter().map(|r| r.pos).collect();
        assert_eq!(frozen, after);
        assert_eq!(session.player().pos, canoe);
        assert_eq!(session.score().value(), 0);
    }

    #[test]
    fn test_game_over_fires_once_after_delay() {
        let mut session = GameSession::new(field(), 1);
        crash(&mut session);
        let crash_tick = session.time_ticks();

        let mut game_overs = Vec::new();
        for _ in 0..300 {
            let events = session.tick(SIM_DT);
            if events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
                game_overs.push(session.time_ticks());
            }
        }
        assert_eq!(game_overs.len(), 1);
        // ~1000 ms at 60 Hz
        let waited = game_overs[0] - crash_tick;
        assert!((59..=61).contains(&waited), "waited {} ticks", waited);
        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert!(session.shake_offset().is_none());
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = GameSession::new(field(), 3);
        session.set_direction_x(Intent::Positive);
        for _ in 0..10 {
            session.tick(SIM_DT);
        }
        assert!(session.difficulty.poll(1.0e6));
        assert!(session.spawn_interval() < MAX_SPAWN_INTERVAL);
        rock(&mut session, Vec2::new(10.0, 508.0), 10.0);
        session.tick(SIM_DT);
        crash(&mut session);
        for _ in 0..100 {
            session.tick(SIM_DT);
        }
        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert!(session.score().value() > 0);

        assert_eq!(session.restart(), GameEvent::Restarted);
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.score().value(), 0);
        assert_eq!(session.spawn_interval(), MAX_SPAWN_INTERVAL);
        assert!(session.obstacles().is_empty());
        assert!(session.explosions().is_empty());
        assert_eq!(session.player().pos, session.player().start());
    }

    #[test]
    fn test_early_restart_drops_pending_game_over() {
        let mut session = GameSession::new(field(), 5);
        assert!(session.difficulty.poll(1.0e6));
        rock(&mut session, Vec2::new(10.0, 508.0), 10.0);
        crash(&mut session);
        for _ in 0..10 {
            session.tick(SIM_DT);
        }
        assert_eq!(session.phase(), SessionPhase::Exploding);
        assert_eq!(session.score().value(), 1);
        assert!(!session.obstacles().is_empty());

        session.restart();
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.score().value(), 0);
        assert_eq!(session.spawn_interval(), MAX_SPAWN_INTERVAL);
        assert!(session.obstacles().is_empty());
        assert_eq!(session.player().pos, session.player().start());

        for _ in 0..100 {
            let events = session.tick(SIM_DT);
            assert!(!events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
        }
        assert_eq!(session.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_zero_width_window_still_spawns() {
        let mut session = GameSession::new(PlayField::from_window(0.0, 800.0), 1);
        let mut spawned = 0;
        for _ in 0..120 {
            spawned += session
                .tick(SIM_DT)
                .iter()
                .filter(|e| matches!(e, GameEvent::RockSpawned { .. }))
                .count();
        }
        assert!(spawned >= 1);
        assert!(session.obstacles().iter().all(|r| r.pos.x == 0.0));
    }

    #[test]
    fn test_restart_while_playing() {
        let mut session = GameSession::new(field(), 9);
        session.set_direction_y(Intent::Negative);
        for _ in 0..70 {
            session.tick(SIM_DT);
        }
        session.restart();
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.player().pos, session.player().start());
        assert!(session.obstacles().is_empty());
    }

    #[test]
    fn test_no_particles_setting() {
        let settings = Settings {
            particles: false,
            screen_shake: false,
            ..Default::default()
        };
        let mut session = GameSession::with_settings(field(), 1, settings);
        crash(&mut session);
        assert_eq!(session.phase(), SessionPhase::Exploding);
        assert!(session.explosions().is_empty());
        assert!(session.shake_offset().is_none());
    }

    proptest! {
        #[test]
        fn prop_rocks_keep_radius_and_speed(seed in any::<u64>(), ticks in 1usize..600) {
            let mut session = GameSession::new(field(), seed);
            let mut seen: HashMap<u32, (f32, f32)> = HashMap::new();
            for _ in 0..ticks {
                session.tick(SIM_DT);
                for rock in session.obstacles() {
                    let first = *seen.entry(rock.id).or_insert((rock.radius(), rock.speed()));
                    prop_assert_eq!(first, (rock.radius(), rock.speed()));
                }
            }
        }

        #[test]
        fn prop_score_counts_exited_rocks(seed in any::<u64>(), ticks in 1usize..600) {
            let mut session = GameSession::new(field(), seed);
            for _ in 0..ticks {
                let was_playing = session.phase() == SessionPhase::Playing;
                let before = session.score().value();
                let height = session.field().height;
                let leaving = session
                    .obstacles()
                    .iter()
                    .filter(|r| r.pos.y + r.speed() > height + r.radius())
                    .count() as u64;

                session.tick(SIM_DT);

                let expected = if was_playing { leaving } else { 0 };
                prop_assert_eq!(session.score().value() - before, expected);
            }
        }

        #[test]
        fn prop_interval_in_bounds(seed in any::<u64>(), ticks in 1usize..3000) {
            let mut session = GameSession::new(field(), seed);
            session.set_direction_x(Intent::Negative);
            for _ in 0..ticks {
                session.tick(SIM_DT);
                let interval = session.spawn_interval();
                prop_assert!((MIN_SPAWN_INTERVAL..=MAX_SPAWN_INTERVAL).contains(&interval));
            }
        }
    }
}
