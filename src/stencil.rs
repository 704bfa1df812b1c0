// src/stencil.rs
//
// Explicit (forward Euler) 5-point update for u_t = α ∇²u:
//
//   u'[j][i] = (1 - 4r) u[j][i] + r (u[j][i+1] + u[j][i-1] + u[j+1][i] + u[j-1][i])
//
// with r = α dt / dx². Neighbours outside [0, n-1] contribute exactly 0
// (zero Dirichlet boundary); each of the four is bounds-checked on its own.

use crate::exec::Executor;
use crate::params::ProblemParams;
use crate::scalar_field::ScalarField2D;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StencilCoeffs {
    pub r: f64,  // neighbour weight
    pub r2: f64, // centre weight, 1 - 4r
}

impl StencilCoeffs {
    pub fn new(alpha: f64, dt: f64, dx: f64) -> Self {
        let r = alpha * dt / (dx * dx);
        Self { r, r2: 1.0 - 4.0 * r }
    }

    pub fn from_params(p: &ProblemParams) -> Self {
        Self::new(p.alpha, p.dt(), p.dx())
    }
}

/// Compute the next time layer of `u` into `u_tmp`. `u` is only read;
/// every cell of `u_tmp` is overwritten.
pub fn solve<E: Executor>(
    exec: &E,
    coeffs: StencilCoeffs,
    u: &ScalarField2D,
    u_tmp: &mut ScalarField2D,
) {
    debug_assert_eq!(u.grid, u_tmp.grid);

    let n = u.grid.n;
    let StencilCoeffs { r, r2 } = coeffs;
    let src = u.data.as_slice();

    exec.fill(&mut u_tmp.data, n, |i, j| {
        let row = j * n;
        r2 * src[row + i]
            + r * if i < n - 1 { src[row + i + 1] } else { 0.0 }
            + r * if i > 0 { src[row + i - 1] } else { 0.0 }
            + r * if j < n - 1 { src[row + n + i] } else { 0.0 }
            + r * if j > 0 { src[row - n + i] } else { 0.0 }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::Serial;
    use crate::grid::Grid2D;

    fn field_from(n: usize, data: Vec<f64>) -> ScalarField2D {
        ScalarField2D {
            grid: Grid2D::new(n, 1.0),
            data,
        }
    }

    #[test]
    fn coefficients_sum_to_one() {
        let c = StencilCoeffs::new(0.1, 0.5, 250.0);
        assert!((c.r - 8e-7).abs() < 1e-20);
        assert!((c.r2 + 4.0 * c.r - 1.0).abs() < 1e-15);
    }

    #[test]
    fn interior_cell_uses_all_four_neighbours() {
        // 3x3, only the centre is hot
        let mut u = field_from(3, vec![0.0; 9]);
        u.data[4] = 1.0;
        let mut out = field_from(3, vec![9.9; 9]);
        let c = StencilCoeffs { r: 0.1, r2: 0.6 };

        solve(&Serial, c, &u, &mut out);

        assert!((out.get(1, 1) - 0.6).abs() < 1e-15);
        for (i, j) in [(0, 1), (2, 1), (1, 0), (1, 2)] {
            assert!((out.get(i, j) - 0.1).abs() < 1e-15, "({i},{j}) = {}", out.get(i, j));
        }
        for (i, j) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
            assert_eq!(out.get(i, j), 0.0, "corner ({i},{j}) should stay cold");
        }
    }

    #[test]
    fn missing_neighbours_contribute_zero_not_wraparound() {
        // Uniform field: an edge cell sees 3 neighbours, a corner 2, interior 4.
        let n = 4;
        let u = field_from(n, vec![1.0; n * n]);
        let mut out = field_from(n, vec![0.0; n * n]);
        let c = StencilCoeffs { r: 0.125, r2: 0.5 };

        solve(&Serial, c, &u, &mut out);

        assert_eq!(out.get(0, 0), 0.5 + 2.0 * 0.125);
        assert_eq!(out.get(n - 1, n - 1), 0.5 + 2.0 * 0.125);
        assert_eq!(out.get(1, 0), 0.5 + 3.0 * 0.125);
        assert_eq!(out.get(0, 2), 0.5 + 3.0 * 0.125);
        assert_eq!(out.get(2, 2), 1.0);
    }

    #[test]
    fn edge_value_does_not_leak_to_opposite_edge() {
        let n = 5;
        let mut u = field_from(n, vec![0.0; n * n]);
        // Hot column on the left edge only.
        for j in 0..n {
            let k = u.idx(0, j);
            u.data[k] = 1.0;
        }
        let mut out = field_from(n, vec![0.0; n * n]);
        solve(&Serial, StencilCoeffs { r: 0.2, r2: 0.2 }, &u, &mut out);
        for j in 0..n {
            assert_eq!(out.get(n - 1, j), 0.0);
        }
    }

    #[test]
    fn single_cell_grid_only_keeps_centre_term() {
        let u = field_from(1, vec![2.0]);
        let mut out = field_from(1, vec![0.0]);
        solve(&Serial, StencilCoeffs { r: 0.1, r2: 0.6 }, &u, &mut out);
        assert!((out.data[0] - 1.2).abs() < 1e-15);
    }
}
