use serde::{Deserialize, Serialize};

use super::{PairPotentialTrait, PairTerm};
use crate::{Error, Result};

/// Lennard-Jones 12-6 potential truncated at `rcut`
///
/// U(r) = 4 eps ((sig/r)^12 - (sig/r)^6) - shift
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LJCut {
    sigma: f64,
    epsilon: f64,
    rcut: f64,
    #[serde(default)]
    shifted: bool,
}

impl LJCut {
    pub fn new(sigma: f64, epsilon: f64, rcut: f64) -> Result<Self> {
        if !(sigma > 0.0 && epsilon >= 0.0 && rcut > 0.0) {
            return Err(Error::config(format!(
                "Lennard-Jones parameters should be positive, found sigma {} epsilon {} rcut {}",
                sigma, epsilon, rcut
            )));
        }
        Ok(Self {
            sigma,
            epsilon,
            rcut,
            shifted: false,
        })
    }
    /// Reduced units: sigma = epsilon = 1
    pub fn reduced(rcut: f64) -> Result<Self> {
        Self::new(1.0, 1.0, rcut)
    }
    /// Purely repulsive soft-sphere form, cut and shifted at the minimum 2^(1/6)
    pub fn soft_sphere() -> Self {
        Self {
            sigma: 1.0,
            epsilon: 1.0,
            rcut: 2f64.powf(1.0 / 6.0),
            shifted: true,
        }
    }
    /// Shift the energy so it vanishes at the cutoff
    pub fn with_shift(mut self, shifted: bool) -> Self {
        self.shifted = shifted;
        self
    }
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
    pub fn is_shifted(&self) -> bool {
        self.shifted
    }

    fn energy_shift(&self, sigma6: f64) -> f64 {
        if !self.shifted {
            return 0.0;
        }
        let sr6 = sigma6 / self.rcut.powi(6);
        4.0 * self.epsilon * sr6 * (sr6 - 1.0)
    }
}

impl PairPotentialTrait for LJCut {
    fn cutoff_distance(&self) -> f64 {
        self.rcut
    }
    // f(r)/r = 24 eps sig^6 / r^8 (2 (sig^6 / r^6) - 1)
    // which is 48/r^14 - 24/r^8 in reduced units
    fn pair_term(&self, r2: f64) -> PairTerm {
        let sigma6 = self.sigma.powi(6);
        let rri = 1.0 / r2;
        let sr6 = sigma6 * rri * rri * rri;
        PairTerm {
            force_over_r: 24.0 * self.epsilon * sr6 * rri * (2.0 * sr6 - 1.0),
            energy: 4.0 * self.epsilon * sr6 * (sr6 - 1.0) - self.energy_shift(sigma6),
        }
    }
}
