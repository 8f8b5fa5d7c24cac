use num_traits::Zero;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::{utils::Vector, Error, Result, SimulationCell};

/// Number of stored past accelerations used by the multi-step integrator
pub const HISTORY_LEN: usize = 2;

/// Particle state during simulation.
///
/// Stored as parallel arrays; the index of a particle is its id and never
/// changes during a run. All particles have unit mass.
#[derive(Clone, Debug, Default)]
pub struct Particles<const D: usize> {
    pub(crate) ids: Vec<usize>,
    pub(crate) positions: Vec<Vector<D>>,
    pub(crate) velocities: Vec<Vector<D>>,
    pub(crate) accelerations: Vec<Vector<D>>,
    /// Past accelerations, most recent first
    pub(crate) history: Vec<[Vector<D>; HISTORY_LEN]>,
    /// Net displacement since the last neighbor list rebuild
    pub(crate) displacements: Vec<Vector<D>>,
}
impl<const D: usize> Particles<D> {
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            positions: Vec::new(),
            velocities: Vec::new(),
            accelerations: Vec::new(),
            history: Vec::new(),
            displacements: Vec::new(),
        }
    }
    /// Particles at rest at the given positions
    pub fn from_positions(positions: Vec<Vector<D>>) -> Self {
        let mut particles = Self::new();
        particles.add_particles(positions);
        particles
    }
    pub fn with_velocities(mut self, velocities: Vec<Vector<D>>) -> Result<Self> {
        if velocities.len() != self.len() {
            return Err(Error::config(format!(
                "expected {} velocities, found {}",
                self.len(),
                velocities.len()
            )));
        }
        self.velocities = velocities;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }
    pub fn positions(&self) -> &[Vector<D>] {
        &self.positions
    }
    pub fn velocities(&self) -> &[Vector<D>] {
        &self.velocities
    }
    pub fn accelerations(&self) -> &[Vector<D>] {
        &self.accelerations
    }
    pub fn displacements(&self) -> &[Vector<D>] {
        &self.displacements
    }
    pub fn velocities_mut(&mut self) -> &mut [Vector<D>] {
        &mut self.velocities
    }

    pub fn add_particles(&mut self, positions: Vec<Vector<D>>) {
        let num = positions.len();
        let first_id = self.len();
        self.ids.extend(first_id..first_id + num);
        self.velocities.resize(first_id + num, Vector::zero());
        self.accelerations.resize(first_id + num, Vector::zero());
        self.history.resize(first_id + num, [Vector::zero(); HISTORY_LEN]);
        self.displacements.resize(first_id + num, Vector::zero());
        self.positions.extend(positions);
    }

    /// Draw Maxwell-Boltzmann velocities, remove the centre-of-mass drift and
    /// rescale to exactly `temperature` (k_B = 1).
    pub fn set_temperature<R: Rng + ?Sized>(&mut self, temperature: f64, rng: &mut R) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        let dist = Normal::new(0.0, temperature.sqrt())
            .map_err(|e| Error::config(format!("invalid temperature {temperature}: {e}")))?;
        for v in self.velocities.iter_mut() {
            *v = Vector(std::array::from_fn(|_| dist.sample(rng)));
        }

        let n = self.len() as f64;
        let drift = self.velocities.iter().sum::<Vector<D>>() / n;
        for v in self.velocities.iter_mut() {
            *v -= drift;
        }

        let vsq: f64 = self.velocities.iter().map(|v| v.norm_squared()).sum();
        if vsq > 0.0 {
            let scale = (D as f64 * n * temperature / vsq).sqrt();
            for v in self.velocities.iter_mut() {
                *v *= scale;
            }
        }
        Ok(())
    }

    /// Apply the cell's boundary conditions to every particle
    pub(crate) fn apply_boundary(&mut self, cell: &SimulationCell<D>) {
        for (p, v) in self.positions.iter_mut().zip(self.velocities.iter_mut()) {
            cell.wrap_coordinate(p, v);
        }
    }

    /// Add the position change since `before` to each displacement accumulator
    pub(crate) fn accumulate_displacements(&mut self, before: &[Vector<D>], cell: &SimulationCell<D>) {
        for ((d, now), then) in self
            .displacements
            .iter_mut()
            .zip(self.positions.iter())
            .zip(before.iter())
        {
            *d += cell.minimum_image_delta(now, then);
        }
    }

    /// Overwrite every per-particle array with `other`'s, reusing allocations
    pub(crate) fn copy_from(&mut self, other: &Self) {
        self.ids.clone_from(&other.ids);
        self.positions.clone_from(&other.positions);
        self.velocities.clone_from(&other.velocities);
        self.accelerations.clone_from(&other.accelerations);
        self.history.clone_from(&other.history);
        self.displacements.clone_from(&other.displacements);
    }

    pub(crate) fn reset_displacements(&mut self) {
        self.displacements.fill(Vector::zero());
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn ids_follow_insertion_order() {
        let mut p = Particles::from_positions(vec![Vector([0.0, 0.0]); 3]);
        p.add_particles(vec![Vector([1.0, 1.0]); 2]);
        assert_eq!(p.ids(), &[0, 1, 2, 3, 4]);
        assert_eq!(p.velocities().len(), 5);
        assert_eq!(p.displacements().len(), 5);
    }

    #[test]
    fn set_temperature_is_exact_and_drift_free() -> Result<()> {
        let mut p = Particles::<3>::from_positions(vec![Vector::zero(); 200]);
        let mut rng = StdRng::seed_from_u64(11);
        p.set_temperature(1.5, &mut rng)?;

        let momentum: Vector<3> = p.velocities().iter().sum();
        assert!(momentum.norm() < 1e-10);
        let ke = 0.5 * p.velocities().iter().map(|v| v.norm_squared()).sum::<f64>();
        assert_relative_eq!(2.0 * ke / (3.0 * 200.0), 1.5, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn velocity_count_must_match() {
        let p = Particles::from_positions(vec![Vector([0.0, 0.0]); 3]);
        assert!(p.with_velocities(vec![Vector([0.0, 0.0]); 2]).is_err());
    }
}
