use std::iter::Sum;
use std::ops::{
    Add, AddAssign, Div, Index as IndexOp, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use num_traits::Zero;

/// Fixed-size vector in D dimensions
///
/// ```rust
/// use jmd::utils::Vector;
///
/// let a = Vector::new([1.0, 2.0, 2.0]);
/// let b = Vector::new([1.0, 0.0, 0.0]);
/// assert_eq!(a.norm(), 3.0);
/// assert_eq!((a - b).dot(&b), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector<const D: usize>(pub [f64; D]);

pub type Vec2 = Vector<2>;
pub type Vec3 = Vector<3>;

impl<const D: usize> Vector<D> {
    pub const fn new(components: [f64; D]) -> Self {
        Self(components)
    }
    pub fn splat(value: f64) -> Self {
        Self([value; D])
    }
    pub fn components(&self) -> &[f64; D] {
        &self.0
    }
    pub fn dot(&self, other: &Self) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }
    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }
    /// Element-wise product
    pub fn component_mul(&self, other: &Self) -> Self {
        Self(std::array::from_fn(|k| self.0[k] * other.0[k]))
    }
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self(std::array::from_fn(|k| f(self.0[k])))
    }
    /// Product of all components, e.g. the volume spanned by box edge lengths
    pub fn product(&self) -> f64 {
        self.0.iter().product()
    }
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }
}

impl<const D: usize> Default for Vector<D> {
    fn default() -> Self {
        Self([0.0; D])
    }
}

impl<const D: usize> From<[f64; D]> for Vector<D> {
    fn from(value: [f64; D]) -> Self {
        Self(value)
    }
}

impl<const D: usize> Zero for Vector<D> {
    fn zero() -> Self {
        Self([0.0; D])
    }
    fn is_zero(&self) -> bool {
        self.0.iter().all(|x| *x == 0.0)
    }
}

impl<const D: usize> IndexOp<usize> for Vector<D> {
    type Output = f64;
    fn index(&self, k: usize) -> &f64 {
        &self.0[k]
    }
}
impl<const D: usize> IndexMut<usize> for Vector<D> {
    fn index_mut(&mut self, k: usize) -> &mut f64 {
        &mut self.0[k]
    }
}

impl<const D: usize> Add for Vector<D> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|k| self.0[k] + rhs.0[k]))
    }
}
impl<const D: usize> Sub for Vector<D> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|k| self.0[k] - rhs.0[k]))
    }
}
impl<const D: usize> Neg for Vector<D> {
    type Output = Self;
    fn neg(self) -> Self {
        self.map(|x| -x)
    }
}
impl<const D: usize> Mul<f64> for Vector<D> {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.map(|x| x * rhs)
    }
}
impl<const D: usize> Mul<Vector<D>> for f64 {
    type Output = Vector<D>;
    fn mul(self, rhs: Vector<D>) -> Vector<D> {
        rhs * self
    }
}
impl<const D: usize> Div<f64> for Vector<D> {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        self.map(|x| x / rhs)
    }
}
impl<const D: usize> AddAssign for Vector<D> {
    fn add_assign(&mut self, rhs: Self) {
        for k in 0..D {
            self.0[k] += rhs.0[k];
        }
    }
}
impl<const D: usize> SubAssign for Vector<D> {
    fn sub_assign(&mut self, rhs: Self) {
        for k in 0..D {
            self.0[k] -= rhs.0[k];
        }
    }
}
impl<const D: usize> MulAssign<f64> for Vector<D> {
    fn mul_assign(&mut self, rhs: f64) {
        for x in self.0.iter_mut() {
            *x *= rhs;
        }
    }
}
impl<const D: usize> Sum for Vector<D> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, v| acc + v)
    }
}
impl<'a, const D: usize> Sum<&'a Vector<D>> for Vector<D> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, v| acc + *v)
    }
}

/// Square D x D matrix, row-major
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix<const D: usize>(pub [[f64; D]; D]);

impl<const D: usize> Matrix<D> {
    pub fn identity() -> Self {
        Self::diagonal(&Vector::splat(1.0))
    }
    pub fn diagonal(diag: &Vector<D>) -> Self {
        Self(std::array::from_fn(|i| {
            std::array::from_fn(|j| if i == j { diag[i] } else { 0.0 })
        }))
    }
    pub fn transpose(&self) -> Self {
        Self(std::array::from_fn(|i| std::array::from_fn(|j| self.0[j][i])))
    }
    pub fn mul_vec(&self, v: &Vector<D>) -> Vector<D> {
        Vector(std::array::from_fn(|i| Vector(self.0[i]).dot(v)))
    }
    pub fn mul_mat(&self, other: &Self) -> Self {
        Self(std::array::from_fn(|i| {
            std::array::from_fn(|j| (0..D).map(|k| self.0[i][k] * other.0[k][j]).sum())
        }))
    }
}
