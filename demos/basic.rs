use jmd::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn main() -> Result<()> {
    let lattice = Cubic::from_density::<3>(0.8);
    let lengths = lattice.box_lengths([10, 10, 10]);
    let cell = SimulationCell::periodic(lengths)?;

    let mut particles = Particles::from_positions(lattice.coords_within_cell(&cell));
    particles.set_temperature(3.0, &mut StdRng::seed_from_u64(2024))?;

    let config = SimConfig {
        n_particles: particles.len(),
        box_lengths: lengths.components().to_vec(),
        boundary: vec![Boundary::Periodic; 3],
        cutoff: 2.5,
        skin: 0.3,
        dt: 0.005,
        workers: 4,
        rebuild_every: 10,
        ..SimConfig::default()
    };
    let mut simulation = Simulation::new(config, particles, LJCut::reduced(2.5)?)?;

    let computes = [
        Compute::AvgVsq,
        Compute::Temperature,
        Compute::KineticE,
        Compute::PotentialE,
        Compute::TotalE,
        Compute::Pressure,
    ];
    let header: Vec<&str> = computes.iter().map(|c| c.name()).collect();
    println!("Start");
    println!("step {}", header.join(" "));
    for _ in 0..5 {
        let report = simulation.run(50)?;
        let values: Vec<String> = computes
            .iter()
            .map(|c| format!("{:.5}", c.compute(&simulation)))
            .collect();
        println!("{} {}", report.step, values.join(" "));
    }
    println!("{} neighbor list builds", simulation.rebuild_count());
    Ok(())
}
