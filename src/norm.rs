// src/norm.rs

use crate::mms::solution;
use crate::scalar_field::ScalarField2D;

/// L2 norm of the difference between `u` and the manufactured solution at
/// time `t`: sqrt(Σ (u - u_exact)²).
///
/// Summation runs row-major (j outer, i inner) on a single thread so the
/// result is reproducible regardless of the executor used for the solve.
pub fn l2norm(u: &ScalarField2D, t: f64, alpha: f64, length: f64) -> f64 {
    let grid = u.grid;
    let mut sum = 0.0;
    for j in 0..grid.n {
        let y = grid.coord(j);
        for i in 0..grid.n {
            let x = grid.coord(i);
            let diff = u.data[grid.idx(i, j)] - solution(t, x, y, alpha, length);
            sum += diff * diff;
        }
    }
    sum.sqrt()
}

/// Pointwise error field u - u_exact(t), for plotting.
pub fn error_field(u: &ScalarField2D, t: f64, alpha: f64, length: f64) -> ScalarField2D {
    let grid = u.grid;
    let mut err = ScalarField2D::new(grid);
    for j in 0..grid.n {
        for i in 0..grid.n {
            let k = grid.idx(i, j);
            err.data[k] = u.data[k] - solution(t, grid.coord(i), grid.coord(j), alpha, length);
        }
    }
    err
}
