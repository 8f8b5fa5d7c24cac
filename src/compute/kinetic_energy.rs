use crate::Particles;

/// Total kinetic energy with unit masses
pub fn kinetic_energy<const D: usize>(particles: &Particles<D>) -> f64 {
    0.5 * particles
        .velocities()
        .iter()
        .map(|v| v.norm_squared())
        .sum::<f64>()
}
