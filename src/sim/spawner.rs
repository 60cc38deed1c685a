//! Rock spawning

use glam::Vec2;
use rand::Rng;

use super::entity::Obstacle;
use crate::PlayField;
use crate::consts::*;

/// Create a rock just above the visible field at a random column
pub fn spawn_obstacle<R: Rng>(id: u32, field: &PlayField, rng: &mut R) -> Obstacle {
    let radius = field.width * rng.random_range(ROCK_MIN_RADIUS..ROCK_MAX_RADIUS);
    // Scaled unit sample: a zero-width field yields x = 0 instead of an empty range
    let x = field.width * rng.random::<f32>();
    let shade = rng.random_range(ROCK_MIN_SHADE..ROCK_MAX_SHADE);
    Obstacle::new(
        id,
        Vec2::new(x, -radius),
        radius,
        field.height * ROCK_SPEED,
        shade,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawned_rocks_start_offscreen() {
        let field = PlayField::new(300.0, 500.0);
        let mut rng = Pcg32::seed_from_u64(42);

        for id in 0..200 {
            let rock = spawn_obstacle(id, &field, &mut rng);
            assert_eq!(rock.id, id);
            assert!(rock.radius() >= 14.99 && rock.radius() <= 36.0);
            assert!(rock.pos.x >= 0.0 && rock.pos.x < 300.0);
            assert_eq!(rock.pos.y, -rock.radius());
            assert!((rock.speed() - 5.0).abs() < 1e-4);
            assert!((ROCK_MIN_SHADE..ROCK_MAX_SHADE).contains(&rock.shade()));
        }
    }

    #[test]
    fn test_zero_width_field_spawns_at_left_bank() {
        let field = PlayField::new(0.0, 500.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let rock = spawn_obstacle(1, &field, &mut rng);
        assert_eq!(rock.pos.x, 0.0);
        assert_eq!(rock.radius(), 0.0);
    }
}
