//! Observables evaluated on the current simulation state

use crate::Simulation;

mod avg_vsq;
mod kinetic_energy;
mod momentum;
mod pressure;
mod temperature;
mod total_energy;

pub use avg_vsq::avg_vsq;
pub use kinetic_energy::kinetic_energy;
pub use momentum::total_momentum;
pub use pressure::pressure;
pub use temperature::temperature;
pub use total_energy::total_energy;

/// Named scalar observables, for periodic reporting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compute {
    AvgVsq,
    Temperature,
    KineticE,
    PotentialE,
    TotalE,
    Pressure,
}

impl Compute {
    pub fn compute<const D: usize>(&self, sim: &Simulation<D>) -> f64 {
        match self {
            Compute::AvgVsq => avg_vsq(sim.particles()),
            Compute::Temperature => temperature(sim.particles()),
            Compute::KineticE => kinetic_energy(sim.particles()),
            Compute::PotentialE => sim.potential_energy(),
            Compute::TotalE => total_energy(sim),
            Compute::Pressure => pressure(sim),
        }
    }
    pub fn name(&self) -> &'static str {
        match self {
            Compute::AvgVsq => "AvgVsq",
            Compute::Temperature => "Temp",
            Compute::KineticE => "KE",
            Compute::PotentialE => "PE",
            Compute::TotalE => "TotalE",
            Compute::Pressure => "Press",
        }
    }
}
