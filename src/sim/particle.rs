//! A single drifting point

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

/// One background particle. Moves up by `speed` and sideways by `drift`
/// every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Radius, always > 0
    pub size: f32,
    /// Upward velocity per frame
    pub speed: f32,
    /// Horizontal velocity per frame (negative sways left)
    pub drift: f32,
    /// Fill alpha in (0, 1]
    pub opacity: f32,
}

impl Particle {
    /// Spawn anywhere on a `width` x `height` surface
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(uniform(rng, 0.0, width), uniform(rng, 0.0, height)),
            size: uniform(rng, PARTICLE_SIZE_MIN, PARTICLE_SIZE_MAX),
            speed: uniform(rng, PARTICLE_SPEED_MIN, PARTICLE_SPEED_MAX),
            drift: uniform(rng, -PARTICLE_DRIFT_MAX, PARTICLE_DRIFT_MAX),
            opacity: uniform(rng, PARTICLE_OPACITY_MIN, PARTICLE_OPACITY_MAX),
        }
    }

    /// Move one frame
    #[inline]
    pub fn advance(&mut self) {
        self.pos.y -= self.speed;
        self.pos.x += self.drift;
    }

    /// Whether the particle has left through the top edge
    #[inline]
    pub fn is_above_top(&self) -> bool {
        self.pos.y < -RECYCLE_MARGIN
    }

    /// Re-enter just below the bottom edge at a new horizontal offset
    pub fn recycle<R: Rng + ?Sized>(&mut self, rng: &mut R, width: f32, height: f32) {
        self.pos.y = height + RECYCLE_MARGIN;
        self.pos.x = uniform(rng, 0.0, width);
    }
}

/// Uniform draw from `[lo, hi)`, or `lo` when the range is empty
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn random_particles_respect_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::random(&mut rng, 800.0, 600.0);
            assert!((0.0..800.0).contains(&p.pos.x));
            assert!((0.0..600.0).contains(&p.pos.y));
            assert!((0.5..2.5).contains(&p.size));
            assert!((0.1..0.4).contains(&p.speed));
            assert!((0.1..0.5).contains(&p.opacity));
            assert!((-0.25..0.25).contains(&p.drift));
        }
    }

    #[test]
    fn advance_moves_up_and_sideways() {
        let mut p = Particle {
            pos: Vec2::new(10.0, 10.0),
            size: 1.0,
            speed: 0.25,
            drift: -0.125,
            opacity: 0.3,
        };
        p.advance();
        assert_eq!(p.pos, Vec2::new(9.875, 9.75));
    }

    #[test]
    fn zero_sized_surface_does_not_panic() {
        let mut rng = Pcg32::seed_from_u64(1);
        let p = Particle::random(&mut rng, 0.0, 0.0);
        assert_eq!(p.pos, Vec2::ZERO);
    }
}
