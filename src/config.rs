//! Run configuration, supplied once before stepping begins.
//!
//! Loading it (from a file, the command line, ...) is left to the caller; the
//! struct derives `Deserialize` so any serde format works.

use serde::{Deserialize, Serialize};

use crate::{
    neighbor::{RebuildTrigger, UpdateSettings},
    utils::Vector,
    Boundary, Error, IntegratorKind, Result, SimulationCell,
};

/// Simulation configuration in reduced units
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of particles
    pub n_particles: usize,
    /// Box edge lengths, one per dimension
    pub box_lengths: Vec<f64>,
    /// Boundary condition per dimension
    pub boundary: Vec<Boundary>,
    /// Force cutoff distance
    pub cutoff: f64,
    /// Neighbor list margin beyond the cutoff
    pub skin: f64,
    /// Time step
    pub dt: f64,
    pub integrator: IntegratorKind,
    /// Force worker threads
    pub workers: usize,
    /// Steps driven by `Simulation::run_configured`
    pub steps: usize,
    /// Check the neighbor list for staleness on every n-th step
    pub rebuild_every: usize,
    pub rebuild_trigger: RebuildTrigger,
    /// Pairs closer than this abort the run
    pub min_separation: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            n_particles: 0,
            box_lengths: Vec::new(),
            boundary: Vec::new(),
            cutoff: 2.5,
            skin: 0.4,
            dt: 0.005,
            integrator: IntegratorKind::Leapfrog,
            workers: 1,
            steps: 0,
            rebuild_every: 1,
            rebuild_trigger: RebuildTrigger::TwoLargest,
            min_separation: 0.1,
        }
    }
}

impl SimConfig {
    /// Fully periodic configuration for a cubic (or square) box
    pub fn periodic<const D: usize>(n_particles: usize, box_length: f64) -> Self {
        Self {
            n_particles,
            box_lengths: vec![box_length; D],
            boundary: vec![Boundary::Periodic; D],
            ..Self::default()
        }
    }

    /// Check everything that can be checked without particles
    pub fn validate<const D: usize>(&self) -> Result<()> {
        if self.n_particles == 0 {
            return Err(Error::config("particle count should be positive"));
        }
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(Error::config(format!(
                "time step should be positive, found {}",
                self.dt
            )));
        }
        if !(self.cutoff > 0.0 && self.cutoff.is_finite()) {
            return Err(Error::config(format!(
                "cutoff should be positive, found {}",
                self.cutoff
            )));
        }
        if !(self.skin >= 0.0 && self.skin.is_finite()) {
            return Err(Error::config(format!(
                "skin should not be negative, found {}",
                self.skin
            )));
        }
        if self.workers == 0 {
            return Err(Error::config("worker count should be at least 1"));
        }
        if self.rebuild_every == 0 {
            return Err(Error::config("rebuild check cadence should be at least 1"));
        }
        if !(self.min_separation >= 0.0 && self.min_separation < self.cutoff) {
            return Err(Error::config(format!(
                "minimum separation {} should lie in [0, cutoff)",
                self.min_separation
            )));
        }
        self.simulation_cell::<D>().map(|_| ())
    }

    /// The simulation cell this configuration describes
    pub fn simulation_cell<const D: usize>(&self) -> Result<SimulationCell<D>> {
        if self.box_lengths.len() != D || self.boundary.len() != D {
            return Err(Error::config(format!(
                "expected {} box lengths and boundary conditions, found {} and {}",
                D,
                self.box_lengths.len(),
                self.boundary.len()
            )));
        }
        let lengths = Vector(std::array::from_fn(|k| self.box_lengths[k]));
        let boundary = std::array::from_fn(|k| self.boundary[k]);
        SimulationCell::new(lengths, boundary)
    }

    pub fn update_settings(&self) -> UpdateSettings {
        UpdateSettings::new(self.rebuild_every, self.rebuild_trigger)
    }
}
