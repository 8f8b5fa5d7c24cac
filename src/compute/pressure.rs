use crate::Simulation;

/// Virial pressure, rho (sum v^2 + virial) / (D N)
pub fn pressure<const D: usize>(sim: &Simulation<D>) -> f64 {
    let vsq: f64 = sim
        .particles()
        .velocities()
        .iter()
        .map(|v| v.norm_squared())
        .sum();
    (vsq + sim.summary().virial) / (D as f64 * sim.simulation_cell().volume())
}
