//! Game simulation module
//!
//! All gameplay logic lives here:
//! - Fixed per-tick motion (one tick per display frame)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod entity;
pub mod player;
pub mod score;
pub mod session;
pub mod spawner;

pub use collision::{circles_overlap, collides, first_collision};
pub use difficulty::{DifficultyScheduler, next_interval, should_spawn};
pub use entity::{Explosion, Obstacle, Particle};
pub use player::{Intent, Player};
pub use score::ScoreTracker;
pub use session::{GameEvent, GameSession, SessionPhase};
pub use spawner::spawn_obstacle;
