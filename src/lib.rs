//! Short-range molecular dynamics of point particles in a 2D or 3D box.
//!
//! Positions are advanced with either a leapfrog or a predictor-corrector
//! integrator; pair forces come from a Verlet neighbor list that is rebuilt
//! from a cell list when particles have moved far enough.

pub mod atomic;
pub mod compute;
pub mod config;
pub mod error;
pub mod force;
pub mod integrators;
pub mod lattice;
pub mod neighbor;
pub mod parallel;
pub mod particles;
pub mod prelude;
pub mod simulation;
pub mod simulation_cell;
pub mod utils;

pub use atomic::{LJCut, NoInteraction, PairPotential, PairPotentialTrait};
pub use config::SimConfig;
pub use error::{Error, Result};
pub use force::{ForceEvaluator, ForceSummary};
pub use integrators::{Integrator, IntegratorKind, IntegratorTrait};
pub use neighbor::{CellList, NeighborList, RebuildTrigger, UpdateSettings};
pub use parallel::WorkerPool;
pub use particles::Particles;
pub use simulation::{HookContext, PostStepHook, Simulation, StepReport};
pub use simulation_cell::{Boundary, SimulationCell};
