/// Linear index into a D-dimensional grid, row-major with the last axis fastest.
///
/// ```rust
/// use jmd::utils::indices::Index;
///
/// let idx = Index::from_nd(&[1, 2, 3], &[2, 3, 4]);
/// assert_eq!(idx.idx(), 1 * 3 * 4 + 2 * 4 + 3);
/// assert_eq!(idx.to_nd(), [1, 2, 3]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Index<const D: usize> {
    idx: usize,
    bounds: [usize; D],
}
impl<const D: usize> Index<D> {
    pub fn from_nd(indices: &[usize; D], bounds: &[usize; D]) -> Self {
        assert!(
            indices.iter().zip(bounds.iter()).all(|(i, n)| i < n),
            "Grid index {:?} out of bounds {:?}",
            indices,
            bounds
        );
        let idx = indices
            .iter()
            .zip(bounds.iter())
            .fold(0, |acc, (i, n)| acc * n + i);
        Self {
            idx,
            bounds: *bounds,
        }
    }
    pub fn from_linear(idx: usize, bounds: &[usize; D]) -> Self {
        assert!(
            idx < bounds.iter().product(),
            "Linear index {} out of bounds {:?}",
            idx,
            bounds
        );
        Self {
            idx,
            bounds: *bounds,
        }
    }
    pub fn to_nd(&self) -> [usize; D] {
        let mut out = [0; D];
        let mut q = self.idx;
        for k in (0..D).rev() {
            out[k] = q % self.bounds[k];
            q /= self.bounds[k];
        }
        out
    }
    pub fn idx(&self) -> usize {
        self.idx
    }
    pub fn bounds(&self) -> [usize; D] {
        self.bounds
    }
}
