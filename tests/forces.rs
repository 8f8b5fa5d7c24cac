mod common;

use approx::assert_abs_diff_eq;
use jmd::{prelude::*, CellList, ForceEvaluator, NeighborList, UpdateSettings};

fn prepared(seed: u64) -> Result<(Particles<3>, SimulationCell<3>, NeighborList)> {
    let (config, mut particles) = common::lattice_liquid::<3>(0.8, 9, 1.0, seed)?;
    let cell = config.simulation_cell::<3>()?;
    // jiggle off the lattice so forces do not cancel by symmetry
    let offsets = common::random_positions(particles.len(), &Vector::splat(0.2), seed + 1);
    let positions = particles
        .positions()
        .iter()
        .zip(offsets)
        .map(|(p, d)| *p + d)
        .collect();
    particles = Particles::from_positions(positions);
    let mut nl = NeighborList::new(2.5, 0.3, UpdateSettings::default());
    let cl = CellList::build(&particles, &cell, nl.list_distance())?;
    nl.rebuild(&mut particles, &cl, &cell);
    Ok((particles, cell, nl))
}

#[test]
fn threaded_evaluation_matches_sequential() -> Result<()> {
    let (mut sequential, cell, nl) = prepared(51)?;
    let mut threaded = sequential.clone();
    let potential = PairPotential::from(LJCut::reduced(2.5)?);

    let one = ForceEvaluator::new(1, 0.1)?.evaluate(&mut sequential, &nl, &cell, 2.5, &potential)?;
    for workers in [2, 3, 8] {
        let many =
            ForceEvaluator::new(workers, 0.1)?.evaluate(&mut threaded, &nl, &cell, 2.5, &potential)?;
        assert_abs_diff_eq!(one.potential_energy, many.potential_energy, epsilon = 1e-9);
        assert_abs_diff_eq!(one.virial, many.virial, epsilon = 1e-9);
        for (a, b) in sequential.accelerations().iter().zip(threaded.accelerations()) {
            assert_abs_diff_eq!((*a - *b).norm(), 0.0, epsilon = 1e-9);
        }
    }
    Ok(())
}

#[test]
fn threaded_runs_follow_the_same_trajectory() -> Result<()> {
    let (config, particles) = common::lattice_liquid::<2>(0.7, 16, 1.0, 52)?;
    let threaded = SimConfig {
        workers: 4,
        ..config.clone()
    };
    let potential = LJCut::reduced(2.5)?;
    let mut a = Simulation::new(config, particles.clone(), potential)?;
    let mut b = Simulation::new(threaded, particles, potential)?;
    let ra = a.run(50)?;
    let rb = b.run(50)?;
    assert_abs_diff_eq!(ra.potential_energy, rb.potential_energy, epsilon = 1e-8);
    for (p, q) in a.particles().positions().iter().zip(b.particles().positions()) {
        assert!(a.simulation_cell().minimum_image_delta(p, q).norm() < 1e-8);
    }
    Ok(())
}

#[test]
fn net_force_vanishes() -> Result<()> {
    let (mut particles, cell, nl) = prepared(53)?;
    let potential = PairPotential::from(LJCut::reduced(2.5)?);
    ForceEvaluator::new(4, 0.1)?.evaluate(&mut particles, &nl, &cell, 2.5, &potential)?;
    let net: Vector<3> = particles.accelerations().iter().sum();
    assert!(net.norm() < 1e-9);
    Ok(())
}

#[test]
fn overlapping_pair_is_reported_by_threaded_evaluation() -> Result<()> {
    let config = SimConfig {
        workers: 3,
        ..SimConfig::periodic::<3>(4, 10.0)
    };
    let particles = Particles::from_positions(vec![
        Vector([-3.0, -3.0, -3.0]),
        Vector([2.0, 2.0, 2.0]),
        Vector([0.0, 0.0, 0.0]),
        Vector([0.05, 0.0, 0.0]),
    ]);
    let result = Simulation::new(config, particles, LJCut::reduced(2.5)?);
    match result {
        Err(Error::NumericalInstability { i, j, distance }) => {
            assert_eq!((i, j), (2, 3));
            assert_abs_diff_eq!(distance, 0.05, epsilon = 1e-12);
        }
        Err(other) => panic!("unexpected error {}", other),
        Ok(_) => panic!("overlap went undetected"),
    }
    Ok(())
}
