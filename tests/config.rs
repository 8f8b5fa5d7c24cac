mod common;

use jmd::prelude::*;

#[test]
fn json_config_drives_a_run() -> Result<()> {
    let config: SimConfig = serde_json::from_str(
        r#"{
            "n_particles": 256,
            "box_lengths": [19.12, 19.12],
            "boundary": ["periodic", "periodic"],
            "cutoff": 2.5,
            "skin": 0.3,
            "dt": 0.005,
            "integrator": "leapfrog",
            "workers": 2,
            "steps": 20,
            "rebuild_every": 2,
            "rebuild_trigger": "two_largest"
        }"#,
    )
    .map_err(|e| Error::Configuration(e.to_string()))?;
    let cell = config.simulation_cell::<2>()?;
    let lattice = Cubic::new(19.12 / 16.0);
    let particles = Particles::from_positions(lattice.coords_within_cell(&cell));
    assert_eq!(particles.len(), 256);

    let mut sim = Simulation::new(config, particles, LJCut::reduced(2.5)?)?;
    let report = sim.run_configured()?;
    assert_eq!(report.step, 20);
    assert_eq!(sim.step_count(), 20);
    Ok(())
}

#[test]
fn invalid_settings_are_rejected_before_running() -> Result<()> {
    let (config, particles) = common::lattice_liquid::<2>(0.7, 16, 1.0, 61)?;
    let broken = [
        SimConfig { dt: 0.0, ..config.clone() },
        SimConfig { workers: 0, ..config.clone() },
        SimConfig { skin: -0.2, ..config.clone() },
        SimConfig { n_particles: 10, ..config.clone() },
        SimConfig { box_lengths: vec![19.1], ..config.clone() },
        SimConfig { box_lengths: vec![7.0, 19.1], ..config.clone() },
    ];
    for config in broken {
        let result = Simulation::new(config.clone(), particles.clone(), LJCut::reduced(2.5)?);
        assert!(
            matches!(result, Err(Error::Configuration(_))),
            "accepted {:?}",
            config
        );
    }
    Ok(())
}

#[test]
fn unknown_integrator_fails_to_parse() {
    let parsed = serde_json::from_str::<SimConfig>(r#"{"integrator": "runge_kutta"}"#);
    assert!(parsed.is_err());
}
