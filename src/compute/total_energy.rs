use super::kinetic_energy;
use crate::Simulation;

pub fn total_energy<const D: usize>(sim: &Simulation<D>) -> f64 {
    sim.potential_energy() + kinetic_energy(sim.particles())
}
