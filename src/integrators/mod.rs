mod leapfrog;
mod predictor_corrector;

pub use leapfrog::Leapfrog;
pub use predictor_corrector::{Phase, PredictorCorrector};

use serde::{Deserialize, Serialize};

use crate::Particles;

/// Integration scheme, chosen at configuration time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    #[default]
    Leapfrog,
    PredictorCorrector,
}

/// Simulation integrator, split around the force evaluation
pub trait IntegratorTrait<const D: usize> {
    /// Seed stored history from the accelerations of the initial state
    fn prime(&mut self, _particles: &mut Particles<D>) {}
    /// Advance positions (and velocities) ahead of the force evaluation
    fn pre_force(&mut self, particles: &mut Particles<D>, timestep: f64);
    /// Complete the step using the freshly computed accelerations
    fn post_force(&mut self, particles: &mut Particles<D>, timestep: f64);
    /// Forget a step abandoned between `pre_force` and `post_force`
    fn abandon_step(&mut self) {}
}

#[derive(Clone, Debug)]
pub enum Integrator<const D: usize> {
    Leapfrog(Leapfrog),
    PredictorCorrector(PredictorCorrector<D>),
}
impl<const D: usize> Integrator<D> {
    pub fn new(kind: IntegratorKind) -> Self {
        match kind {
            IntegratorKind::Leapfrog => Integrator::Leapfrog(Leapfrog::new()),
            IntegratorKind::PredictorCorrector => {
                Integrator::PredictorCorrector(PredictorCorrector::new())
            }
        }
    }
    pub fn kind(&self) -> IntegratorKind {
        match self {
            Integrator::Leapfrog(_) => IntegratorKind::Leapfrog,
            Integrator::PredictorCorrector(_) => IntegratorKind::PredictorCorrector,
        }
    }
}
impl<const D: usize> IntegratorTrait<D> for Integrator<D> {
    fn prime(&mut self, particles: &mut Particles<D>) {
        match self {
            Integrator::Leapfrog(i) => i.prime(particles),
            Integrator::PredictorCorrector(i) => i.prime(particles),
        }
    }
    fn pre_force(&mut self, particles: &mut Particles<D>, timestep: f64) {
        match self {
            Integrator::Leapfrog(i) => i.pre_force(particles, timestep),
            Integrator::PredictorCorrector(i) => i.pre_force(particles, timestep),
        }
    }
    fn post_force(&mut self, particles: &mut Particles<D>, timestep: f64) {
        match self {
            Integrator::Leapfrog(i) => i.post_force(particles, timestep),
            Integrator::PredictorCorrector(i) => i.post_force(particles, timestep),
        }
    }
    fn abandon_step(&mut self) {
        match self {
            Integrator::Leapfrog(i) => IntegratorTrait::<D>::abandon_step(i),
            Integrator::PredictorCorrector(i) => i.abandon_step(),
        }
    }
}
