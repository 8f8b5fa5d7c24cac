use crate::{utils::Vector, Particles};

/// Sum of particle velocities (unit masses)
pub fn total_momentum<const D: usize>(particles: &Particles<D>) -> Vector<D> {
    particles.velocities().iter().sum()
}
