use crate::Particles;

/// Mean squared speed, zero for an empty system
pub fn avg_vsq<const D: usize>(particles: &Particles<D>) -> f64 {
    if particles.is_empty() {
        return 0.0;
    }
    particles
        .velocities()
        .iter()
        .map(|v| v.norm_squared())
        .sum::<f64>()
        / particles.len() as f64
}
