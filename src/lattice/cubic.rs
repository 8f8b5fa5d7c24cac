use super::Lattice;
use crate::{utils::Vector, SimulationCell};

/// Simple square (2D) or cubic (3D) lattice
#[derive(Debug)]
pub struct Cubic {
    a: f64,
}
impl Cubic {
    pub fn new(a: f64) -> Self {
        let s = Self { a };
        s.assert_positive();
        s
    }
    /// Lattice with one site per unit cell at number density `rho`
    pub fn from_density<const D: usize>(rho: f64) -> Self {
        let s = Self {
            a: (1.0 / rho).powf(1.0 / D as f64),
        };
        s.assert_positive();
        s
    }
    /// Box edge lengths that hold exactly `num_cells` lattice cells per axis
    pub fn box_lengths<const D: usize>(&self, num_cells: [usize; D]) -> Vector<D> {
        Vector(std::array::from_fn(|k| self.a * num_cells[k] as f64))
    }
    fn assert_positive(&self) {
        assert!(
            self.a > 0.0 && self.a.is_finite(),
            "Lattice constant should be positive, found {}",
            self.a
        );
    }
}
impl<const D: usize> Lattice<D> for Cubic {
    fn cell_lengths(&self) -> Vector<D> {
        Vector::splat(self.a)
    }
    /// Sites sit at the centres of the lattice cells, so none lies on a face
    fn coords_within_cell(&self, cell: &SimulationCell<D>) -> Vec<Vector<D>> {
        let lengths = cell.lengths();
        // tolerance so lengths built from `box_lengths` are not lost to rounding
        let nlattice: [usize; D] =
            std::array::from_fn(|k| (lengths[k] / self.a + 1e-9).floor() as usize);
        let total: usize = nlattice.iter().product();

        let mut coords = Vec::with_capacity(total);
        for n in 0..total {
            let mut rem = n;
            let mut site = [0.0; D];
            for k in (0..D).rev() {
                let i = rem % nlattice[k];
                rem /= nlattice[k];
                site[k] = -0.5 * lengths[k] + self.a * (i as f64 + 0.5);
            }
            coords.push(Vector(site));
        }
        coords
    }
}
