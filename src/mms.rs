// src/mms.rs
//
// Manufactured solution for the 2D heat equation on [0, L]²:
//
//   u(t, x, y) = exp(-2 α π² t / L²) · sin(π x / L) · sin(π y / L)
//
// It vanishes on the boundary, so it matches the zero Dirichlet condition
// used by the stencil, and at t = 0 it is the initial condition.

use std::f64::consts::PI;

use crate::exec::Executor;
use crate::scalar_field::ScalarField2D;

/// Exact solution at time t and position (x, y).
#[inline]
pub fn solution(t: f64, x: f64, y: f64, alpha: f64, length: f64) -> f64 {
    (-2.0 * alpha * PI * PI * t / (length * length)).exp()
        * (PI * x / length).sin()
        * (PI * y / length).sin()
}

/// Set every cell of `u` to the manufactured solution at t = 0.
pub fn initial_value<E: Executor>(exec: &E, length: f64, u: &mut ScalarField2D) {
    let grid = u.grid;
    exec.fill(&mut u.data, grid.n, |i, j| {
        let x = grid.coord(i);
        let y = grid.coord(j);
        (PI * x / length).sin() * (PI * y / length).sin()
    });
}

/// Set every cell of `u` to zero.
pub fn zero<E: Executor>(exec: &E, u: &mut ScalarField2D) {
    let n = u.grid.n;
    exec.fill(&mut u.data, n, |_, _| 0.0);
}
