//! Lifecycle of the background particle effect
//!
//! `Uninitialized -> Running -> Stopped`. A reduced-motion preference keeps
//! the simulator uninitialized for good; `Stopped` is terminal.

use super::field::{ParticleField, ParticleSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorPhase {
    /// Not started, or suppressed by reduced motion
    Uninitialized,
    /// Drawing every animation frame
    Running,
    /// Torn down after unmount
    Stopped,
}

#[derive(Debug, Clone)]
pub struct ParticleSimulator {
    phase: SimulatorPhase,
    count: usize,
    suppressed: bool,
    field: Option<ParticleField>,
}

impl ParticleSimulator {
    pub fn new(count: usize) -> Self {
        Self {
            phase: SimulatorPhase::Uninitialized,
            count,
            suppressed: false,
            field: None,
        }
    }

    pub fn phase(&self) -> SimulatorPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SimulatorPhase::Running
    }

    /// Whether reduced motion has disabled the effect
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    /// Mount the effect. Returns true if the simulator is now running.
    pub fn start(&mut self, reduced_motion: bool, width: f32, height: f32, seed: u64) -> bool {
        if self.phase != SimulatorPhase::Uninitialized || self.suppressed {
            return false;
        }
        if reduced_motion {
            log::info!("Reduced motion requested, particles disabled");
            self.suppressed = true;
            return false;
        }

        self.field = Some(ParticleField::new(self.count, width, height, seed));
        self.phase = SimulatorPhase::Running;
        log::info!("Particle field running ({} particles)", self.count);
        true
    }

    /// Draw and advance one frame. Does nothing unless running.
    pub fn frame<S: ParticleSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        match (&self.phase, self.field.as_mut()) {
            (SimulatorPhase::Running, Some(field)) => {
                field.frame(surface);
                true
            }
            _ => false,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if let Some(field) = self.field.as_mut() {
            field.resize(width, height);
        }
    }

    /// Unmount. Returns true if this call stopped a running simulator.
    pub fn stop(&mut self) -> bool {
        let was_running = self.is_running();
        if was_running {
            log::info!("Particle field stopped");
        }
        if self.phase != SimulatorPhase::Stopped && !self.suppressed {
            self.phase = SimulatorPhase::Stopped;
        }
        self.field = None;
        was_running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::tests::Recorder;

    #[test]
    fn starts_running_with_full_population() {
        let mut sim = ParticleSimulator::new(40);
        assert_eq!(sim.phase(), SimulatorPhase::Uninitialized);
        assert!(sim.start(false, 800.0, 600.0, 1));
        assert_eq!(sim.phase(), SimulatorPhase::Running);
        assert_eq!(sim.field().map(|f| f.len()), Some(40));
    }

    #[test]
    fn reduced_motion_stays_uninitialized() {
        let mut sim = ParticleSimulator::new(40);
        assert!(!sim.start(true, 800.0, 600.0, 1));
        assert_eq!(sim.phase(), SimulatorPhase::Uninitialized);
        assert!(sim.is_suppressed());

        // Permanently: a later mount does not start it either
        assert!(!sim.start(false, 800.0, 600.0, 1));

        let mut surface = Recorder::default();
        assert!(!sim.frame(&mut surface));
        assert_eq!(surface.clears, 0);
        assert!(surface.circles.is_empty());
    }

    #[test]
    fn stop_is_terminal() {
        let mut sim = ParticleSimulator::new(5);
        sim.start(false, 100.0, 100.0, 2);
        assert!(sim.stop());
        assert_eq!(sim.phase(), SimulatorPhase::Stopped);
        assert!(!sim.start(false, 100.0, 100.0, 2));
        assert!(!sim.stop());

        let mut surface = Recorder::default();
        assert!(!sim.frame(&mut surface));
    }

    #[test]
    fn frames_draw_only_while_running() {
        let mut sim = ParticleSimulator::new(3);
        let mut surface = Recorder::default();
        assert!(!sim.frame(&mut surface));

        sim.start(false, 100.0, 100.0, 4);
        assert!(sim.frame(&mut surface));
        assert_eq!(surface.circles.len(), 3);
    }

    #[test]
    fn resize_before_start_is_harmless() {
        let mut sim = ParticleSimulator::new(3);
        sim.resize(10.0, 10.0);
        assert_eq!(sim.phase(), SimulatorPhase::Uninitialized);
    }
}
