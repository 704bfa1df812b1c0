// src/params.rs

use crate::error::{HeatError, Result};
use crate::grid::Grid2D;

pub const DEFAULT_N: usize = 6000;
pub const DEFAULT_NSTEPS: usize = 20;
pub const DEFAULT_ALPHA: f64 = 0.1;
pub const DEFAULT_LENGTH: f64 = 1000.0;

/// Largest stability ratio for which the explicit 2D scheme is stable.
pub const STABILITY_LIMIT: f64 = 0.5;

/// Problem definition for the MMS heat equation.
///
/// Only n, nsteps, alpha and length are stored; dx and dt are always
/// derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProblemParams {
    pub n: usize,      // cells per side
    pub nsteps: usize, // number of time steps
    pub alpha: f64,    // diffusivity
    pub length: f64,   // physical side length of the domain
}

impl ProblemParams {
    /// Problem with the default diffusivity and domain length.
    ///
    /// `nsteps == 0` is accepted here (an identity run); the command line
    /// rejects it through [`ProblemParams::from_args`].
    pub fn new(n: usize, nsteps: usize) -> Result<Self> {
        Self::with_physics(n, nsteps, DEFAULT_ALPHA, DEFAULT_LENGTH)
    }

    pub fn with_physics(n: usize, nsteps: usize, alpha: f64, length: f64) -> Result<Self> {
        if n == 0 {
            return Err(HeatError::NonPositive { name: "n", value: 0 });
        }
        Ok(Self {
            n,
            nsteps,
            alpha,
            length,
        })
    }

    /// Validate raw command-line values. Both must be strictly positive.
    pub fn from_args(n: Option<i64>, nsteps: Option<i64>) -> Result<Self> {
        let n = positive("n", n.unwrap_or(DEFAULT_N as i64))?;
        let nsteps = positive("nsteps", nsteps.unwrap_or(DEFAULT_NSTEPS as i64))?;
        Self::new(n, nsteps)
    }

    /// Cell width: length / (n + 1).
    pub fn dx(&self) -> f64 {
        self.length / (self.n + 1) as f64
    }

    /// Time step: 0.5 / nsteps, so the total simulated time is always 0.5.
    /// A zero-step run has dt = 0.
    pub fn dt(&self) -> f64 {
        if self.nsteps == 0 {
            0.0
        } else {
            0.5 / self.nsteps as f64
        }
    }

    /// Simulated time after all steps.
    pub fn total_time(&self) -> f64 {
        self.dt() * self.nsteps as f64
    }

    /// Stability ratio r = alpha·dt/dx².
    pub fn r(&self) -> f64 {
        let dx = self.dx();
        self.alpha * self.dt() / (dx * dx)
    }

    pub fn is_stable(&self) -> bool {
        self.r() <= STABILITY_LIMIT
    }

    pub fn grid(&self) -> Grid2D {
        Grid2D::new(self.n, self.dx())
    }

    /// Bytes read and written by the whole solve: 2·n²·nsteps doubles.
    pub fn bytes_moved(&self) -> f64 {
        2.0 * (self.n as f64) * (self.n as f64) * self.nsteps as f64
            * std::mem::size_of::<f64>() as f64
    }
}

fn positive(name: &'static str, value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(HeatError::NonPositive { name, value });
    }
    usize::try_from(value).map_err(|_| HeatError::NonPositive { name, value })
}
