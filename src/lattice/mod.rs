mod cubic;

pub use cubic::Cubic;

use crate::{utils::Vector, SimulationCell};

/// Generator of initial particle positions
pub trait Lattice<const D: usize> {
    /// Lattice sites filling the simulation cell
    fn coords_within_cell(&self, cell: &SimulationCell<D>) -> Vec<Vector<D>>;
    fn cell_lengths(&self) -> Vector<D>;
}
