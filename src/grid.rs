// src/grid.rs

/// Square 2D finite-difference grid: n × n interior cells of width dx.
///
/// Cell (i, j) sits at x = dx·(i+1), y = dx·(j+1); the boundary lines
/// x = 0 and x = dx·(n+1) are not stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid2D {
    pub n: usize,
    pub dx: f64,
}

impl Grid2D {
    /// Create a new n × n grid with spacing dx.
    pub fn new(n: usize, dx: f64) -> Self {
        Self { n, dx }
    }

    /// Total number of cells.
    pub fn n_cells(&self) -> usize {
        self.n * self.n
    }

    /// Convert (i, j) indices to a flat row-major index (j is the row).
    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.n && j < self.n);
        j * self.n + i
    }

    /// Physical coordinate of column i (or row j).
    #[inline]
    pub fn coord(&self, i: usize) -> f64 {
        self.dx * (i + 1) as f64
    }
}
