//! Particle field: a fixed population drifting upward forever
//!
//! Particles that leave through the top are recycled to the bottom, so the
//! population never changes after construction.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::particle::Particle;

/// Drawing target for the field (canvas on web, recorder in tests)
pub trait ParticleSurface {
    /// Erase the whole surface
    fn clear(&mut self, width: f32, height: f32);
    /// Filled white circle
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, opacity: f32);
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    rng: Pcg32,
}

impl ParticleField {
    pub fn new(count: usize, width: f32, height: f32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = (0..count)
            .map(|_| Particle::random(&mut rng, width, height))
            .collect();
        Self {
            particles,
            width,
            height,
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access for placing particles directly (tests, demos)
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Adopt new surface dimensions. Positions are left as they are; the
    /// recycling rule pulls strays back within a pass.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Advance every particle one frame, recycling those past the top
    pub fn tick(&mut self) {
        let (width, height) = (self.width, self.height);
        for p in self.particles.iter_mut() {
            p.advance();
            if p.is_above_top() {
                p.recycle(&mut self.rng, width, height);
            }
        }
    }

    /// Clear, draw every particle at its current position, then advance
    pub fn frame<S: ParticleSurface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear(self.width, self.height);
        for p in &self.particles {
            surface.fill_circle(p.pos.x, p.pos.y, p.size, p.opacity);
        }
        self.tick();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use glam::Vec2;

    /// Records draw calls
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub clears: usize,
        pub circles: Vec<(f32, f32, f32, f32)>,
    }

    impl ParticleSurface for Recorder {
        fn clear(&mut self, _width: f32, _height: f32) {
            self.clears += 1;
            self.circles.clear();
        }

        fn fill_circle(&mut self, x: f32, y: f32, radius: f32, opacity: f32) {
            self.circles.push((x, y, radius, opacity));
        }
    }

    #[test]
    fn frame_clears_then_draws_each_particle() {
        let mut field = ParticleField::new(40, 800.0, 600.0, 3);
        let before: Vec<Particle> = field.particles().to_vec();
        let mut surface = Recorder::default();

        field.frame(&mut surface);

        assert_eq!(surface.clears, 1);
        assert_eq!(surface.circles.len(), 40);
        // Drawn at pre-advance positions
        for (p, c) in before.iter().zip(&surface.circles) {
            assert_eq!((p.pos.x, p.pos.y, p.size, p.opacity), *c);
        }
    }

    #[test]
    fn particle_past_top_recycles_same_tick() {
        let mut field = ParticleField::new(1, 300.0, 200.0, 11);
        {
            let p = &mut field.particles_mut()[0];
            p.pos = Vec2::new(50.0, -9.95);
            p.speed = 0.1;
            p.drift = 0.0;
        }
        field.tick();

        let p = field.particles()[0];
        assert_eq!(p.pos.y, 210.0);
        assert!((0.0..300.0).contains(&p.pos.x));
    }

    #[test]
    fn particle_at_margin_is_not_recycled() {
        let mut field = ParticleField::new(1, 300.0, 200.0, 11);
        {
            let p = &mut field.particles_mut()[0];
            p.pos = Vec2::new(50.0, -9.5);
            p.speed = 0.25;
            p.drift = 0.0;
        }
        field.tick();
        assert_eq!(field.particles()[0].pos, Vec2::new(50.0, -9.75));
    }

    #[test]
    fn resize_keeps_positions_and_population() {
        let mut field = ParticleField::new(40, 800.0, 600.0, 5);
        let before: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();

        field.resize(200.0, 100.0);

        let after: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
        assert_eq!(field.size(), (200.0, 100.0));
        assert_eq!(field.len(), 40);
    }

    #[test]
    fn recycling_uses_current_dimensions() {
        let mut field = ParticleField::new(1, 800.0, 600.0, 9);
        field.resize(100.0, 50.0);
        {
            let p = &mut field.particles_mut()[0];
            p.pos = Vec2::new(700.0, -10.0);
            p.speed = 0.2;
        }
        field.tick();
        let p = field.particles()[0];
        assert_eq!(p.pos.y, 60.0);
        assert!(p.pos.x < 100.0);
    }

    #[test]
    fn same_seed_same_field() {
        let a = ParticleField::new(10, 640.0, 480.0, 42);
        let b = ParticleField::new(10, 640.0, 480.0, 42);
        assert_eq!(a.particles(), b.particles());
    }
}
