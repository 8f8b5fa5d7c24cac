pub use super::atomic::{LJCut, NoInteraction, PairPotential, PairPotentialTrait};
pub use super::compute::Compute;
pub use super::integrators::IntegratorKind;
pub use super::lattice::{Cubic, Lattice};
pub use super::simulation::{HookContext, PostStepHook, Simulation, StepReport};
pub use super::utils::{Vec2, Vec3, Vector};
pub use super::{Boundary, Error, Particles, Result, SimConfig, SimulationCell};
