// src/scalar_field.rs

use crate::grid::Grid2D;

/// Temperature field defined on a 2D grid, one f64 per cell (row-major).
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField2D {
    pub grid: Grid2D,
    pub data: Vec<f64>,
}

impl ScalarField2D {
    /// Create a new zero-filled field on the given grid.
    pub fn new(grid: Grid2D) -> Self {
        Self {
            grid,
            data: vec![0.0; grid.n_cells()],
        }
    }

    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        self.grid.idx(i, j)
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.idx(i, j)]
    }

    /// Smallest and largest finite value, if any cell is finite.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in self.data.iter().filter(|v| v.is_finite()) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if lo.is_finite() {
            Some((lo, hi))
        } else {
            None
        }
    }

    /// Largest pointwise difference against another field on the same grid.
    pub fn max_abs_diff(&self, other: &ScalarField2D) -> f64 {
        debug_assert_eq!(self.grid, other.grid);
        self.data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}
