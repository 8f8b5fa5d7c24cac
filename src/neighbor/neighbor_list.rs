use log::{debug, warn};

use super::{CellList, RebuildTrigger, UpdateSettings};
use crate::{Particles, SimulationCell};

/// Verlet list of particle pairs within cutoff + skin, reused across steps
/// until particles have moved far enough to invalidate it
#[derive(Clone, Debug)]
pub struct NeighborList {
    force_distance: f64,
    skin_distance: f64,
    settings: UpdateSettings,
    pairs: Vec<(usize, usize)>,
    built: bool,
    num_builds: usize,
}
impl NeighborList {
    pub fn new(force_distance: f64, skin_distance: f64, settings: UpdateSettings) -> Self {
        if skin_distance <= 0.0 {
            warn!(
                "neighbor skin is {}, the list will be rebuilt every step",
                skin_distance
            );
        }
        Self {
            force_distance,
            skin_distance,
            settings,
            pairs: Vec::new(),
            built: false,
            num_builds: 0,
        }
    }

    /// Pairs `(i, j)` with `i < j`
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }
    pub fn force_distance(&self) -> f64 {
        self.force_distance
    }
    pub fn skin_distance(&self) -> f64 {
        self.skin_distance
    }
    /// Largest separation a stored pair had at build time
    pub fn list_distance(&self) -> f64 {
        self.force_distance + self.skin_distance.max(0.0)
    }
    pub fn settings(&self) -> &UpdateSettings {
        &self.settings
    }
    pub fn is_built(&self) -> bool {
        self.built
    }
    pub fn num_builds(&self) -> usize {
        self.num_builds
    }

    /// Rebuild from a freshly binned cell list and reset every particle's
    /// displacement accumulator
    pub fn rebuild<const D: usize>(
        &mut self,
        particles: &mut Particles<D>,
        cell_list: &CellList<D>,
        cell: &SimulationCell<D>,
    ) {
        let range2 = self.list_distance() * self.list_distance();
        let positions = particles.positions();
        let mut pairs = Vec::with_capacity(self.pairs.len());
        cell_list.for_each_candidate_pair(|i, j| {
            if cell
                .minimum_image_delta(&positions[i], &positions[j])
                .norm_squared()
                <= range2
            {
                pairs.push((i, j));
            }
        });
        self.pairs = pairs;
        self.built = true;
        self.num_builds += 1;
        particles.reset_displacements();
        debug!(
            "neighbor list rebuilt: {} pairs from {} particles",
            self.pairs.len(),
            particles.len()
        );
    }

    /// Whether some pair could have come within the force cutoff without being
    /// in the list
    pub fn should_rebuild<const D: usize>(&self, particles: &Particles<D>) -> bool {
        if !self.built || self.skin_distance <= 0.0 {
            return true;
        }
        let (first, second) = two_largest(particles.displacements().iter().map(|d| d.norm()));
        match self.settings.trigger {
            RebuildTrigger::TwoLargest => first + second > self.skin_distance,
            RebuildTrigger::MaxDisplacement => 2.0 * first > self.skin_distance,
        }
    }
}

fn two_largest(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((0.0, 0.0), |(first, second), x| {
        if x > first {
            (x, first)
        } else if x > second {
            (first, x)
        } else {
            (first, second)
        }
    })
}

/// All pairs within `range` by direct O(N^2) search
pub fn brute_force_pairs<const D: usize>(
    particles: &Particles<D>,
    cell: &SimulationCell<D>,
    range: f64,
) -> Vec<(usize, usize)> {
    let positions = particles.positions();
    let mut pairs = Vec::new();
    for i in 0..positions.len() {
        for j in i + 1..positions.len() {
            if cell
                .minimum_image_delta(&positions[i], &positions[j])
                .norm_squared()
                <= range * range
            {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
