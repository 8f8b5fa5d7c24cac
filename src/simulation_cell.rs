use serde::{Deserialize, Serialize};

use crate::{
    utils::{Matrix, Vector},
    Error, Result,
};

/// Boundary condition along one axis of the simulation cell.
///
/// Periodic: particles leaving one face re-enter through the opposite one
/// Wall: particles are reflected back at the face
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    Periodic,
    Wall,
}
impl Boundary {
    /// Check whether the boundary condition is periodic
    pub fn is_periodic(&self) -> bool {
        matches!(self, Boundary::Periodic)
    }
}

/// Simulation box centred on the origin, each axis spanning [-L/2, L/2),
/// with a boundary condition per axis
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationCell<const D: usize> {
    lengths: Vector<D>,
    boundary: [Boundary; D],
}
impl<const D: usize> SimulationCell<D> {
    // Creation

    /// Create a new cell from edge lengths and boundary conditions
    pub fn new(lengths: Vector<D>, boundary: [Boundary; D]) -> Result<Self> {
        check_lengths(&lengths)?;
        Ok(Self { lengths, boundary })
    }
    /// Create a fully periodic cell
    pub fn periodic(lengths: Vector<D>) -> Result<Self> {
        Self::new(lengths, [Boundary::Periodic; D])
    }

    // Getters

    pub fn lengths(&self) -> &Vector<D> {
        &self.lengths
    }
    pub fn boundary(&self) -> &[Boundary; D] {
        &self.boundary
    }
    /// Check whether the boundary condition along a given axis is periodic
    pub fn is_periodic(&self, axis: usize) -> bool {
        self.boundary[axis].is_periodic()
    }
    pub fn volume(&self) -> f64 {
        self.lengths.product()
    }

    // Geometry

    /// Map a position into canonical form.
    ///
    /// Periodic axes wrap into [-L/2, L/2). Wall axes clamp the position to the
    /// face and turn the velocity component back inside.
    pub fn wrap_coordinate(&self, position: &mut Vector<D>, velocity: &mut Vector<D>) {
        for k in 0..D {
            let l = self.lengths[k];
            let half = 0.5 * l;
            match self.boundary[k] {
                Boundary::Periodic => {
                    let x = &mut position[k];
                    if *x < -half || *x >= half {
                        *x -= l * ((*x + half) / l).floor();
                        // floor can land exactly on the upper face through rounding
                        if *x >= half {
                            *x -= l;
                        }
                    }
                }
                Boundary::Wall => {
                    if position[k] < -half {
                        position[k] = -half;
                        velocity[k] = velocity[k].abs();
                    } else if position[k] > half {
                        position[k] = half;
                        velocity[k] = -velocity[k].abs();
                    }
                }
            }
        }
    }

    /// Displacement `a - b`, using the nearest periodic image on periodic axes
    pub fn minimum_image_delta(&self, a: &Vector<D>, b: &Vector<D>) -> Vector<D> {
        let mut d = *a - *b;
        for k in 0..D {
            if self.boundary[k].is_periodic() {
                let l = self.lengths[k];
                d[k] -= l * (d[k] / l).round();
            }
        }
        d
    }

    /// Change the edge lengths, returning the affine map to apply to positions
    pub fn resize(&mut self, new_lengths: Vector<D>) -> Result<Matrix<D>> {
        check_lengths(&new_lengths)?;
        let scale = Vector(std::array::from_fn(|k| new_lengths[k] / self.lengths[k]));
        self.lengths = new_lengths;
        Ok(Matrix::diagonal(&scale))
    }
}

fn check_lengths<const D: usize>(lengths: &Vector<D>) -> Result<()> {
    if lengths.components().iter().any(|l| !(*l > 0.0) || !l.is_finite()) {
        return Err(Error::config(format!(
            "box lengths should be positive and finite, found {:?}",
            lengths.components()
        )));
    }
    Ok(())
}
