pub mod ljcut;
pub mod no_interaction;

pub use ljcut::LJCut;
pub use no_interaction::NoInteraction;

use enum_dispatch::enum_dispatch;

/// Short-range pair potential, chosen at configuration time
#[enum_dispatch]
#[derive(Clone, Debug)]
pub enum PairPotential {
    LJCut,
    NoInteraction,
}

/// Force and energy of one interacting pair
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PairTerm {
    /// Force magnitude divided by separation; positive is repulsive
    pub force_over_r: f64,
    pub energy: f64,
}

#[enum_dispatch(PairPotential)]
/// Trait for pairwise atomic potentials
pub trait PairPotentialTrait {
    /// Get the maximum distance for effective interaction
    fn cutoff_distance(&self) -> f64;

    /// Evaluate the pair at squared separation `r2`, which is below the
    /// squared cutoff
    fn pair_term(&self, r2: f64) -> PairTerm;
}
