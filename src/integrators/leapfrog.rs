use super::*;

/// Leapfrog (velocity-Verlet form) integrator
#[derive(Clone, Copy, Debug, Default)]
pub struct Leapfrog {}

impl Leapfrog {
    pub fn new() -> Self {
        Self {}
    }
    /// Steps the velocities by half a timestep
    fn increment_velocity_halfstep<const D: usize>(particles: &mut Particles<D>, timestep: f64) {
        let half_ts = 0.5 * timestep;
        for (v, a) in particles
            .velocities
            .iter_mut()
            .zip(particles.accelerations.iter())
        {
            *v += *a * half_ts;
        }
    }
    /// Steps the positions forward a full timestep
    fn increment_positions<const D: usize>(particles: &mut Particles<D>, timestep: f64) {
        for (r, v) in particles
            .positions
            .iter_mut()
            .zip(particles.velocities.iter())
        {
            *r += *v * timestep;
        }
    }
}

impl<const D: usize> IntegratorTrait<D> for Leapfrog {
    fn pre_force(&mut self, particles: &mut Particles<D>, timestep: f64) {
        Leapfrog::increment_velocity_halfstep(particles, timestep);
        Leapfrog::increment_positions(particles, timestep);
    }
    fn post_force(&mut self, particles: &mut Particles<D>, timestep: f64) {
        Leapfrog::increment_velocity_halfstep(particles, timestep);
    }
}
