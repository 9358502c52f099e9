//! Canvas rendering for the particle background

pub mod canvas;

pub use canvas::{CanvasSurface, ParticleLoop};
