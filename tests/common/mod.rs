#![allow(dead_code)]

use jmd::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Square or cubic lattice at density `rho` with `cells` sites per axis,
/// thermalised to `temperature`
pub fn lattice_liquid<const D: usize>(
    rho: f64,
    cells: usize,
    temperature: f64,
    seed: u64,
) -> Result<(SimConfig, Particles<D>)> {
    let lattice = Cubic::from_density::<D>(rho);
    let lengths = lattice.box_lengths([cells; D]);
    let cell = SimulationCell::periodic(lengths)?;
    let mut particles = Particles::from_positions(lattice.coords_within_cell(&cell));
    particles.set_temperature(temperature, &mut StdRng::seed_from_u64(seed))?;
    let config = SimConfig {
        n_particles: particles.len(),
        box_lengths: lengths.components().to_vec(),
        boundary: vec![Boundary::Periodic; D],
        ..SimConfig::default()
    };
    Ok((config, particles))
}

/// Uniformly scattered particles, no overlap control
pub fn random_positions<const D: usize>(n: usize, lengths: &Vector<D>, seed: u64) -> Vec<Vector<D>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Vector(std::array::from_fn(|k| (rng.gen::<f64>() - 0.5) * lengths[k])))
        .collect()
}
