use super::{PairPotentialTrait, PairTerm};

/// Non-interacting particles: free flight between boundary events
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInteraction {}
impl NoInteraction {
    pub fn new() -> Self {
        Self {}
    }
}
impl PairPotentialTrait for NoInteraction {
    fn cutoff_distance(&self) -> f64 {
        0.0
    }
    fn pair_term(&self, _r2: f64) -> PairTerm {
        PairTerm {
            force_over_r: 0.0,
            energy: 0.0,
        }
    }
}
