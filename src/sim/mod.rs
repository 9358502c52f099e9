//! Background particle simulation
//!
//! Pure and platform-free: the caller supplies the surface size, the seed and
//! a drawing target. The canvas loop that drives it lives in `renderer`.

pub mod field;
pub mod particle;
pub mod simulator;

pub use field::{ParticleField, ParticleSurface};
pub use particle::Particle;
pub use simulator::{ParticleSimulator, SimulatorPhase};
