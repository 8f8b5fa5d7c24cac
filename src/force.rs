use num_traits::Zero;

use crate::{
    atomic::{PairPotential, PairPotentialTrait},
    parallel::WorkerPool,
    utils::Vector,
    Error, NeighborList, Particles, Result, SimulationCell,
};

/// Running sums produced by one force evaluation
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ForceSummary {
    pub potential_energy: f64,
    /// Sum over pairs of force times separation
    pub virial: f64,
}

/// One worker's private contribution, indexed by particle id
struct PartialForces<const D: usize> {
    accelerations: Vec<Vector<D>>,
    summary: ForceSummary,
}

/// Pair force evaluation over a neighbor list, optionally split across a
/// worker pool
#[derive(Debug)]
pub struct ForceEvaluator {
    pool: WorkerPool,
    min_separation: f64,
}
impl ForceEvaluator {
    /// `min_separation`: pairs closer than this abort the evaluation
    pub fn new(workers: usize, min_separation: f64) -> Result<Self> {
        Ok(Self {
            pool: WorkerPool::new(workers)?,
            min_separation,
        })
    }
    pub fn workers(&self) -> usize {
        self.pool.workers()
    }
    pub fn min_separation(&self) -> f64 {
        self.min_separation
    }

    /// Overwrite every acceleration with the pair forces from the neighbor
    /// list and return potential energy and virial.
    ///
    /// Pairs are re-checked against `cutoff` (or the potential's own range, if
    /// shorter) so stale list entries contribute nothing.
    pub fn evaluate<const D: usize>(
        &self,
        particles: &mut Particles<D>,
        neighbor_list: &NeighborList,
        cell: &SimulationCell<D>,
        cutoff: f64,
        potential: &PairPotential,
    ) -> Result<ForceSummary> {
        let kernel = PairKernel {
            cell,
            potential,
            cutoff2: cutoff.min(potential.cutoff_distance()).powi(2),
            min_separation2: self.min_separation * self.min_separation,
        };
        let pairs = neighbor_list.pairs();
        let Particles {
            positions,
            accelerations,
            ..
        } = particles;
        accelerations.fill(Vector::zero());

        if self.pool.workers() == 1 {
            return kernel.accumulate(pairs, positions, accelerations);
        }

        let n = positions.len();
        let chunk = pairs.len().div_ceil(self.pool.workers()).max(1);
        let partitions: Vec<&[(usize, usize)]> = pairs.chunks(chunk).collect();
        let positions: &[Vector<D>] = positions;
        let partials = self.pool.scatter(partitions.len(), |p| {
            let mut buffer = vec![Vector::zero(); n];
            let summary = kernel.accumulate(partitions[p], positions, &mut buffer)?;
            Ok(PartialForces {
                accelerations: buffer,
                summary,
            })
        })?;

        // single reduction after the join, in partition order
        let mut total = ForceSummary::default();
        for partial in partials {
            for (a, pa) in accelerations.iter_mut().zip(partial.accelerations.iter()) {
                *a += *pa;
            }
            total.potential_energy += partial.summary.potential_energy;
            total.virial += partial.summary.virial;
        }
        Ok(total)
    }
}

struct PairKernel<'a, const D: usize> {
    cell: &'a SimulationCell<D>,
    potential: &'a PairPotential,
    cutoff2: f64,
    min_separation2: f64,
}
impl<const D: usize> PairKernel<'_, D> {
    fn accumulate(
        &self,
        pairs: &[(usize, usize)],
        positions: &[Vector<D>],
        accelerations: &mut [Vector<D>],
    ) -> Result<ForceSummary> {
        let mut summary = ForceSummary::default();
        for &(i, j) in pairs {
            let dr = self.cell.minimum_image_delta(&positions[i], &positions[j]);
            let r2 = dr.norm_squared();
            if r2 >= self.cutoff2 {
                continue;
            }
            if r2 < self.min_separation2 {
                return Err(Error::NumericalInstability {
                    i,
                    j,
                    distance: r2.sqrt(),
                });
            }
            let term = self.potential.pair_term(r2);
            if !term.force_over_r.is_finite() || !term.energy.is_finite() {
                return Err(Error::NumericalInstability {
                    i,
                    j,
                    distance: r2.sqrt(),
                });
            }
            let f = dr * term.force_over_r;
            accelerations[i] += f;
            accelerations[j] -= f;
            summary.potential_energy += term.energy;
            summary.virial += term.force_over_r * r2;
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{atomic::LJCut, neighbor::UpdateSettings, CellList};

    fn setup(positions: Vec<Vector<3>>, l: f64) -> (Particles<3>, NeighborList, SimulationCell<3>) {
        let cell = SimulationCell::periodic(Vector::splat(l)).unwrap();
        let mut particles = Particles::from_positions(positions);
        let mut nl = NeighborList::new(2.5, 0.3, UpdateSettings::default());
        let cl = CellList::build(&particles, &cell, nl.list_distance()).unwrap();
        nl.rebuild(&mut particles, &cl, &cell);
        (particles, nl, cell)
    }

    #[test]
    fn pair_forces_are_equal_and_opposite() -> Result<()> {
        let (mut particles, nl, cell) = setup(
            vec![Vector([0.0, 0.0, 0.0]), Vector([1.1, 0.2, 0.0])],
            10.0,
        );
        let potential = PairPotential::from(LJCut::reduced(2.5)?);
        let evaluator = ForceEvaluator::new(1, 0.1)?;
        let summary = evaluator.evaluate(&mut particles, &nl, &cell, 2.5, &potential)?;

        let a = particles.accelerations();
        let sum = a[0] + a[1];
        assert_abs_diff_eq!(sum.norm(), 0.0, epsilon = 1e-12);
        let r2: f64 = 1.1 * 1.1 + 0.2 * 0.2;
        let term = potential.pair_term(r2);
        assert_abs_diff_eq!(summary.potential_energy, term.energy, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.virial, term.force_over_r * r2, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn stale_pairs_beyond_cutoff_are_skipped() -> Result<()> {
        let (mut particles, nl, cell) = setup(
            vec![Vector([0.0, 0.0, 0.0]), Vector([2.7, 0.0, 0.0])],
            10.0,
        );
        assert_eq!(nl.pairs().len(), 1);
        let potential = PairPotential::from(LJCut::reduced(2.5)?);
        let summary = ForceEvaluator::new(1, 0.1)?.evaluate(&mut particles, &nl, &cell, 2.5, &potential)?;
        assert_eq!(summary, ForceSummary::default());
        assert!(particles.accelerations().iter().all(|a| a.is_zero()));
        Ok(())
    }

    #[test]
    fn collapsed_pair_is_reported() -> Result<()> {
        let (mut particles, nl, cell) = setup(
            vec![
                Vector([0.0, 0.0, 0.0]),
                Vector([3.0, 0.0, 0.0]),
                Vector([3.0, 0.01, 0.0]),
            ],
            10.0,
        );
        let potential = PairPotential::from(LJCut::reduced(2.5)?);
        let err = ForceEvaluator::new(2, 0.1)?
            .evaluate(&mut particles, &nl, &cell, 2.5, &potential)
            .unwrap_err();
        match err {
            Error::NumericalInstability { i, j, distance } => {
                assert_eq!((i, j), (1, 2));
                assert_abs_diff_eq!(distance, 0.01, epsilon = 1e-9);
            }
            other => panic!("unexpected error {other}"),
        }
        Ok(())
    }

    #[test]
    fn no_interaction_leaves_accelerations_zero() -> Result<()> {
        let (mut particles, nl, cell) = setup(
            vec![Vector([0.0, 0.0, 0.0]), Vector([0.5, 0.0, 0.0])],
            10.0,
        );
        let potential = PairPotential::from(crate::atomic::NoInteraction::new());
        let summary = ForceEvaluator::new(1, 0.1)?.evaluate(&mut particles, &nl, &cell, 2.5, &potential)?;
        assert_eq!(summary.potential_energy, 0.0);
        assert!(particles.accelerations().iter().all(|a| a.is_zero()));
        Ok(())
    }
}
