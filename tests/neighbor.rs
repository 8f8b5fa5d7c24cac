mod common;

use jmd::{
    neighbor::brute_force_pairs, prelude::*, CellList, NeighborList, RebuildTrigger, UpdateSettings,
};

fn sorted(pairs: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut pairs = pairs.to_vec();
    pairs.sort_unstable();
    pairs
}

fn check_against_brute_force<const D: usize>(cell: &SimulationCell<D>, n: usize, seed: u64) -> Result<()> {
    let mut particles = Particles::from_positions(common::random_positions(n, cell.lengths(), seed));
    let mut nl = NeighborList::new(2.5, 0.3, UpdateSettings::default());
    let cl = CellList::build(&particles, cell, nl.list_distance())?;
    nl.rebuild(&mut particles, &cl, cell);

    assert!(nl.pairs().iter().all(|&(i, j)| i < j));
    let expected = brute_force_pairs(&particles, cell, nl.list_distance());
    assert!(!expected.is_empty());
    assert_eq!(sorted(nl.pairs()), expected);
    Ok(())
}

#[test]
fn periodic_3d_matches_brute_force() -> Result<()> {
    let cell = SimulationCell::periodic(Vector([10.0, 9.0, 8.5]))?;
    check_against_brute_force(&cell, 300, 1)
}

#[test]
fn exactly_three_cells_match_brute_force() -> Result<()> {
    let cell = SimulationCell::periodic(Vector([8.5, 8.5]))?;
    check_against_brute_force(&cell, 150, 2)
}

#[test]
fn mixed_boundaries_match_brute_force() -> Result<()> {
    let cell = SimulationCell::new(
        Vector([10.0, 7.0, 12.0]),
        [Boundary::Periodic, Boundary::Wall, Boundary::Periodic],
    )?;
    check_against_brute_force(&cell, 300, 3)?;

    let walls = SimulationCell::new(Vector([4.0, 6.0]), [Boundary::Wall, Boundary::Wall])?;
    check_against_brute_force(&walls, 60, 4)
}

#[test]
fn box_narrower_than_three_cells_is_rejected() -> Result<()> {
    let cell = SimulationCell::periodic(Vector([8.0, 20.0, 20.0]))?;
    let particles = Particles::from_positions(common::random_positions(10, cell.lengths(), 5));
    let result = CellList::build(&particles, &cell, 2.8);
    assert!(matches!(result, Err(Error::Configuration(_))));
    Ok(())
}

#[test]
fn skin_does_not_change_trajectory() -> Result<()> {
    let (config, particles) = common::lattice_liquid::<2>(0.7, 16, 1.0, 7)?;
    let potential = LJCut::reduced(2.5)?;

    let every_step = SimConfig {
        skin: 0.0,
        ..config.clone()
    };
    let mut reference = Simulation::new(every_step, particles.clone(), potential)?;
    let mut skinned = Simulation::new(config, particles, potential)?;
    reference.run(100)?;
    skinned.run(100)?;

    assert_eq!(reference.rebuild_count(), 101);
    assert!(skinned.rebuild_count() < 60);
    for (a, b) in reference
        .particles()
        .positions()
        .iter()
        .zip(skinned.particles().positions())
    {
        let d = reference.simulation_cell().minimum_image_delta(a, b);
        assert!(d.norm() < 1e-8, "trajectories diverged by {}", d.norm());
    }
    Ok(())
}

#[test]
fn relaxed_trigger_keeps_the_same_trajectory() -> Result<()> {
    let (config, particles) = common::lattice_liquid::<2>(0.7, 16, 1.0, 8)?;
    let potential = LJCut::reduced(2.5)?;
    let relaxed = SimConfig {
        rebuild_trigger: RebuildTrigger::MaxDisplacement,
        ..config.clone()
    };
    let mut two_largest = Simulation::new(config, particles.clone(), potential)?;
    let mut max_displacement = Simulation::new(relaxed, particles, potential)?;
    two_largest.run(100)?;
    max_displacement.run(100)?;
    for (a, b) in two_largest
        .particles()
        .positions()
        .iter()
        .zip(max_displacement.particles().positions())
    {
        assert!(two_largest.simulation_cell().minimum_image_delta(a, b).norm() < 1e-8);
    }
    Ok(())
}

#[test]
fn staleness_is_only_checked_on_cadence_steps() -> Result<()> {
    // particles outrun the skin every step, but the list may only be
    // rebuilt on multiples of `rebuild_every`
    let config = SimConfig {
        skin: 0.05,
        dt: 0.1,
        rebuild_every: 5,
        ..SimConfig::periodic::<2>(2, 10.0)
    };
    let particles = Particles::from_positions(vec![Vector([0.0, 0.0]), Vector([1.5, 1.0])])
        .with_velocities(vec![Vector([1.0, 0.0]), Vector([0.0, -1.0])])?;
    let mut sim = Simulation::new(config, particles, NoInteraction::new())?;
    for step in 1..=12 {
        let report = sim.step()?;
        assert_eq!(report.step, step);
        assert_eq!(report.rebuilt, step % 5 == 0, "step {}", step);
    }
    assert_eq!(sim.rebuild_count(), 3);
    Ok(())
}

#[test]
fn sparse_system_in_huge_box_runs() -> Result<()> {
    let config = SimConfig::periodic::<3>(2, 1.0e7);
    let particles =
        Particles::from_positions(vec![Vector([0.0, 0.0, 0.0]), Vector([1.5, 0.0, 0.0])]);
    let mut sim = Simulation::new(config, particles, LJCut::reduced(2.5)?)?;
    assert_eq!(sim.neighbor_list().pairs(), &[(0, 1)]);
    sim.run(5)?;
    assert!(sim.potential_energy() < 0.0);
    Ok(())
}
