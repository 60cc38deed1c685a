//! Passive game entities
//!
//! Rocks fall, particles fly. Neither knows about the session.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A rock drifting down the river
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    radius: f32,
    speed: f32,
    /// Gray level for drawing
    shade: u8,
}

impl Obstacle {
    pub fn new(id: u32, pos: Vec2, radius: f32, speed: f32, shade: u8) -> Self {
        Self {
            id,
            pos,
            radius,
            speed,
            shade,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn shade(&self) -> u8 {
        self.shade
    }

    /// Fall one tick downstream
    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    /// True once the rock is completely below the field
    pub fn has_exited(&self, field_height: f32) -> bool {
        self.pos.y > field_height + self.radius
    }
}

/// A single explosion spark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Counts down from 255; doubles as alpha
    pub lifespan: f32,
}

impl Particle {
    pub fn update(&mut self) {
        self.vel *= PARTICLE_DRAG;
        self.lifespan -= PARTICLE_FADE;
        self.pos += self.vel;
    }

    pub fn done(&self) -> bool {
        self.lifespan < 0.0
    }
}

/// A burst of sparks at the crash site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub origin: Vec2,
    pub particles: Vec<Particle>,
    /// Dot size for the renderer
    pub particle_size: f32,
}

impl Explosion {
    /// Scatter `count` sparks in random directions from `origin`
    pub fn new<R: Rng>(origin: Vec2, count: usize, particle_size: f32, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|_| {
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                let speed = rng.random_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
                Particle {
                    pos: origin,
                    vel: Vec2::from_angle(angle) * speed,
                    lifespan: PARTICLE_LIFESPAN,
                }
            })
            .collect();

        Self {
            origin,
            particles,
            particle_size,
        }
    }

    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(|p| !p.done());
    }

    pub fn done(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_obstacle_falls_at_constant_speed() {
        let mut rock = Obstacle::new(1, Vec2::new(50.0, -10.0), 10.0, 5.0, 80);
        rock.advance();
        rock.advance();
        assert_eq!(rock.pos, Vec2::new(50.0, 0.0));
        assert_eq!(rock.speed(), 5.0);
        assert_eq!(rock.radius(), 10.0);
    }

    #[test]
    fn test_obstacle_exit_needs_full_radius() {
        let mut rock = Obstacle::new(1, Vec2::new(0.0, 510.0), 10.0, 5.0, 80);
        assert!(!rock.has_exited(500.0));
        rock.advance();
        assert!(rock.has_exited(500.0));
    }

    #[test]
    fn test_explosion_burns_out() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut explosion = Explosion::new(Vec2::new(10.0, 10.0), 100, 3.5, &mut rng);
        assert_eq!(explosion.particles.len(), 100);
        assert!(!explosion.done());

        // 255 / 4 -> gone after 64 updates
        for _ in 0..63 {
            explosion.update();
        }
        assert!(!explosion.done());
        explosion.update();
        assert!(explosion.done());
    }

    #[test]
    fn test_particles_slow_down() {
        let mut particle = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(10.0, 0.0),
            lifespan: PARTICLE_LIFESPAN,
        };
        particle.update();
        assert!((particle.vel.x - 9.0).abs() < 1e-5);
        assert!((particle.pos.x - 9.0).abs() < 1e-5);
    }
}
