use super::kinetic_energy;
use crate::Particles;

/// Instantaneous temperature 2 KE / (D N), with k_B = 1
pub fn temperature<const D: usize>(particles: &Particles<D>) -> f64 {
    if particles.is_empty() {
        return 0.0;
    }
    2.0 * kinetic_energy(particles) / (D * particles.len()) as f64
}
