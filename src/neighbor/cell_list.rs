use crate::{
    utils::{get_sort_indices, Index, Vector},
    Error, Particles, Result, SimulationCell,
};

/// One spatial bucket: its grid index and the ids of the particles inside it
#[derive(Clone, Copy, Debug)]
pub struct Cell<'a, const D: usize> {
    pub index: [usize; D],
    pub members: &'a [usize],
}

/// Partition of the simulation box into a grid of cells no smaller than the
/// neighbor range, used for O(N) candidate pair search
#[derive(Clone, Debug)]
pub struct CellList<const D: usize> {
    num_cells: [usize; D],
    cell_size: Vector<D>,
    lengths: Vector<D>,
    periodic: [bool; D],
    /// Particle ids grouped by cell
    order: Vec<usize>,
    /// Offset of each cell's first entry in `order`, plus the total
    starts: Vec<usize>,
    stencil: Vec<[i64; D]>,
}
impl<const D: usize> CellList<D> {
    /// Bin every particle into cells with edges of at least `min_cell_size`.
    ///
    /// Periodic axes need three or more cells for the half stencil to visit
    /// distinct neighbours.
    pub fn build(
        particles: &Particles<D>,
        cell: &SimulationCell<D>,
        min_cell_size: f64,
    ) -> Result<Self> {
        if !(min_cell_size > 0.0) {
            return Err(Error::config(format!(
                "cell size should be positive, found {}",
                min_cell_size
            )));
        }
        let lengths = *cell.lengths();
        let mut num_cells = [1; D];
        for k in 0..D {
            // saturates for boxes far larger than the cell size
            let n = (lengths[k] / min_cell_size).floor() as usize;
            if cell.is_periodic(k) && n < 3 {
                return Err(Error::config(format!(
                    "box length {} along axis {} is too small for cutoff + skin = {}: \
                     a periodic axis needs at least 3 cells",
                    lengths[k], k, min_cell_size
                )));
            }
            num_cells[k] = n.max(1);
        }
        coarsen(&mut num_cells, cell, cell_budget(particles.len()));
        let total = num_cells
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .ok_or_else(|| {
                Error::config(format!("cell grid {:?} is too large to index", num_cells))
            })?;
        let cell_size = Vector(std::array::from_fn(|k| lengths[k] / num_cells[k] as f64));
        let periodic = std::array::from_fn(|k| cell.is_periodic(k));

        let mut cell_list = Self {
            num_cells,
            cell_size,
            lengths,
            periodic,
            order: Vec::new(),
            starts: Vec::new(),
            stencil: half_stencil(),
        };
        let keys: Vec<usize> = particles
            .positions()
            .iter()
            .map(|p| cell_list.cell_of(p))
            .collect();
        let (order, starts) = get_sort_indices(&keys, total);
        cell_list.order = order;
        cell_list.starts = starts;
        Ok(cell_list)
    }

    pub fn num_cells(&self) -> [usize; D] {
        self.num_cells
    }
    pub fn total_num_cells(&self) -> usize {
        self.num_cells.iter().product()
    }
    pub fn cell_size(&self) -> &Vector<D> {
        &self.cell_size
    }
    /// Cell offsets visited from each cell, self included
    pub fn stencil(&self) -> &[[i64; D]] {
        &self.stencil
    }

    /// Linear index of the cell containing a wrapped position
    pub fn cell_of(&self, position: &Vector<D>) -> usize {
        let inds: [usize; D] = std::array::from_fn(|k| {
            let c = ((position[k] + 0.5 * self.lengths[k]) / self.cell_size[k]).floor() as i64;
            c.clamp(0, self.num_cells[k] as i64 - 1) as usize
        });
        Index::from_nd(&inds, &self.num_cells).idx()
    }

    pub fn cell(&self, idx: usize) -> Cell<'_, D> {
        Cell {
            index: Index::from_linear(idx, &self.num_cells).to_nd(),
            members: &self.order[self.starts[idx]..self.starts[idx + 1]],
        }
    }
    pub fn cells(&self) -> impl Iterator<Item = Cell<'_, D>> + '_ {
        (0..self.total_num_cells()).map(move |c| self.cell(c))
    }

    /// Linear index of the cell at `offset` from `index`, if there is one
    fn neighbor_cell(&self, index: &[usize; D], offset: &[i64; D]) -> Option<usize> {
        let mut inds = [0; D];
        for k in 0..D {
            let n = self.num_cells[k] as i64;
            let j = index[k] as i64 + offset[k];
            inds[k] = if self.periodic[k] {
                j.rem_euclid(n) as usize
            } else if (0..n).contains(&j) {
                j as usize
            } else {
                return None;
            };
        }
        Some(Index::from_nd(&inds, &self.num_cells).idx())
    }

    /// Call `f(a, b)` once for every unordered pair of adjacent cells, and once
    /// with `a == b` for every cell.
    pub fn for_each_cell_pair(&self, mut f: impl FnMut(usize, usize)) {
        for a in 0..self.total_num_cells() {
            let index = Index::from_linear(a, &self.num_cells).to_nd();
            for offset in &self.stencil {
                if let Some(b) = self.neighbor_cell(&index, offset) {
                    f(a, b);
                }
            }
        }
    }

    /// Call `f(i, j)` with `i < j` for every pair of particles sharing a cell or
    /// sitting in adjacent cells. Each pair is visited once.
    pub fn for_each_candidate_pair(&self, mut f: impl FnMut(usize, usize)) {
        self.for_each_cell_pair(|a, b| {
            let members_a = self.cell(a).members;
            if a == b {
                for (x, &i) in members_a.iter().enumerate() {
                    for &j in &members_a[x + 1..] {
                        f(i.min(j), i.max(j));
                    }
                }
            } else {
                let members_b = self.cell(b).members;
                for &i in members_a {
                    for &j in members_b {
                        f(i.min(j), i.max(j));
                    }
                }
            }
        });
    }
}

/// Grids up to this many cells are never coarsened
const MIN_CELL_BUDGET: usize = 4096;
const CELLS_PER_PARTICLE: usize = 2;

fn cell_budget(num_particles: usize) -> usize {
    num_particles
        .saturating_mul(CELLS_PER_PARTICLE)
        .max(MIN_CELL_BUDGET)
}

/// Merge cells uniformly until the grid holds at most `budget` cells, so a
/// sparse system in a huge box stays O(N). Cells only ever grow, and periodic
/// axes keep at least 3.
fn coarsen<const D: usize>(num_cells: &mut [usize; D], cell: &SimulationCell<D>, budget: usize) {
    let total: f64 = num_cells.iter().map(|&n| n as f64).product();
    if total <= budget as f64 {
        return;
    }
    let shrink = (budget as f64 / total).powf(1.0 / D as f64);
    for (k, n) in num_cells.iter_mut().enumerate() {
        let least = if cell.is_periodic(k) { 3 } else { 1 };
        *n = ((*n as f64 * shrink).floor() as usize).clamp(least, *n);
    }
}

/// Offsets in {-1, 0, 1}^D whose first non-zero component is positive, plus
/// the zero offset: 5 in 2D, 14 in 3D.
fn half_stencil<const D: usize>() -> Vec<[i64; D]> {
    let total = 3usize.pow(D as u32);
    let mut stencil = vec![[0; D]];
    for n in 0..total {
        let mut rem = n;
        let offset: [i64; D] = std::array::from_fn(|_| {
            let digit = (rem % 3) as i64 - 1;
            rem /= 3;
            digit
        });
        if let Some(first) = offset.iter().find(|&&o| o != 0) {
            if *first > 0 {
                stencil.push(offset);
            }
        }
    }
    stencil
}
