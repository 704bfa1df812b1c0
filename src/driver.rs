// src/driver.rs
//
// Time-stepping driver:
//   Setup -> Initializing -> Stepping(k) -> Evaluating -> Reporting -> Done
//
// One stencil submission per step, each blocking until complete, then an O(1)
// role swap of the two grids. There is no checkpointing: a panic inside a
// kernel takes the whole run down.

use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};
use serde::Serialize;

use crate::double_buffer::DoubleBuffer;
use crate::exec::Executor;
use crate::mms::{initial_value, zero};
use crate::norm::l2norm;
use crate::params::ProblemParams;
use crate::scalar_field::ScalarField2D;
use crate::stencil::{StencilCoeffs, solve};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Initializing,
    /// Number of steps completed so far.
    Stepping(usize),
    Evaluating,
    Reporting,
    Done,
}

/// Timings and error of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub n: usize,
    pub nsteps: usize,
    pub l2norm: f64,
    pub solve_time_s: f64,
    pub total_time_s: f64,
    pub bandwidth_gb_s: f64,
}

pub struct RunOutcome {
    pub report: RunReport,
    pub field: ScalarField2D,
}

pub struct Driver<'e, E: Executor> {
    exec: &'e E,
    params: ProblemParams,
    coeffs: StencilCoeffs,
    buffers: DoubleBuffer,
    phase: Phase,
    started: Instant,
    solve_time: Duration,
}

impl<'e, E: Executor> Driver<'e, E> {
    /// Allocate both grids. The total-time clock starts here.
    pub fn new(exec: &'e E, params: ProblemParams) -> Self {
        Self::started_at(exec, params, Instant::now())
    }

    /// Like [`Driver::new`] but with an earlier start instant (e.g. process start).
    pub fn started_at(exec: &'e E, params: ProblemParams, started: Instant) -> Self {
        let grid = params.grid();
        debug!("allocating 2 x {} x {} grids", params.n, params.n);
        Self {
            exec,
            params,
            coeffs: StencilCoeffs::from_params(&params),
            buffers: DoubleBuffer::new(grid),
            phase: Phase::Setup,
            started,
            solve_time: Duration::ZERO,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn params(&self) -> &ProblemParams {
        &self.params
    }

    pub fn buffers(&self) -> &DoubleBuffer {
        &self.buffers
    }

    /// Write the manufactured solution into the current grid and zero the other.
    pub fn initialize(&mut self) {
        self.phase = Phase::Initializing;
        info!("initialising {} x {} grid", self.params.n, self.params.n);

        if !self.params.is_stable() {
            warn!(
                "stability ratio r = {:.3e} exceeds 0.5; the solution may diverge",
                self.params.r()
            );
        }

        let length = self.params.length;
        initial_value(self.exec, length, self.buffers.current_mut());
        zero(self.exec, self.buffers.next_mut());
        self.phase = Phase::Stepping(0);
    }

    /// Advance one step; the freshly written grid becomes current.
    /// Returns false (and does nothing) once all `nsteps` are done.
    pub fn step(&mut self) -> bool {
        let k = match self.phase {
            Phase::Stepping(k) => k,
            Phase::Setup => {
                self.initialize();
                0
            }
            other => panic!("cannot step a driver in phase {other:?}"),
        };
        if k >= self.params.nsteps {
            return false;
        }

        let exec = self.exec;
        let coeffs = self.coeffs;
        self.buffers.advance(|u, u_tmp| solve(exec, coeffs, u, u_tmp));

        trace!("step {} done", k + 1);
        self.phase = Phase::Stepping(k + 1);
        true
    }

    /// Run all remaining steps, timing only the stepping loop.
    pub fn solve_all(&mut self) {
        if self.phase == Phase::Setup {
            self.initialize();
        }
        let tic = Instant::now();
        while self.step() {}
        self.solve_time += tic.elapsed();
        debug!(
            "{} steps in {:.3} s",
            self.params.nsteps,
            self.solve_time.as_secs_f64()
        );
    }

    /// Run the whole state machine and hand back the report and final grid.
    pub fn run(mut self) -> RunOutcome {
        self.solve_all();

        self.phase = Phase::Evaluating;
        let p = self.params;
        let norm = l2norm(self.buffers.current(), p.total_time(), p.alpha, p.length);
        let total = self.started.elapsed();

        self.phase = Phase::Reporting;
        // Clamped so bandwidth stays finite for a zero-step run.
        let solve_s = self.solve_time.max(Duration::from_nanos(1)).as_secs_f64();
        let total_s = total.as_secs_f64().max(solve_s);
        let report = RunReport {
            n: p.n,
            nsteps: p.nsteps,
            l2norm: norm,
            solve_time_s: solve_s,
            total_time_s: total_s,
            bandwidth_gb_s: 1.0e-9 * p.bytes_moved() / solve_s,
        };
        info!(
            "L2 norm {:.6e} after {} steps ({:.3} s)",
            report.l2norm, report.nsteps, report.solve_time_s
        );

        self.phase = Phase::Done;
        RunOutcome {
            report,
            field: self.buffers.into_current(),
        }
    }
}

/// Convenience wrapper: build a driver and run it to completion.
pub fn run<E: Executor>(exec: &E, params: ProblemParams) -> RunOutcome {
    Driver::new(exec, params).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::Serial;

    #[test]
    fn phases_advance_in_order() {
        let params = ProblemParams::new(4, 3).unwrap();
        let mut d = Driver::new(&Serial, params);
        assert_eq!(d.phase(), Phase::Setup);

        d.initialize();
        assert_eq!(d.phase(), Phase::Stepping(0));

        d.step();
        d.step();
        assert_eq!(d.phase(), Phase::Stepping(2));
        assert_eq!(d.buffers().current_version(), 2);

        d.solve_all();
        assert_eq!(d.phase(), Phase::Stepping(3));
        assert_eq!(d.buffers().current_version(), 3);

        assert!(!d.step(), "no steps past nsteps");
        assert_eq!(d.buffers().current_version(), 3);
    }

    #[test]
    fn step_from_setup_initialises_first() {
        let params = ProblemParams::new(3, 1).unwrap();
        let mut d = Driver::new(&Serial, params);
        d.step();
        assert_eq!(d.phase(), Phase::Stepping(1));
        assert!(d.buffers().current().data.iter().any(|&v| v > 0.0));
    }

    #[test]
    fn report_timings_are_consistent() {
        let params = ProblemParams::new(16, 5).unwrap();
        let out = run(&Serial, params);
        let r = &out.report;
        assert!(r.solve_time_s > 0.0);
        assert!(r.total_time_s >= r.solve_time_s);
        assert!(r.bandwidth_gb_s > 0.0 && r.bandwidth_gb_s.is_finite());
        assert_eq!(r.nsteps, 5);
        assert_eq!(out.field.grid.n, 16);
    }

    #[test]
    fn zero_steps_leaves_initial_condition() {
        let params = ProblemParams::new(8, 0).unwrap();
        let out = run(&Serial, params);
        let mut expected = ScalarField2D::new(params.grid());
        initial_value(&Serial, params.length, &mut expected);
        assert_eq!(out.field, expected);
        assert_eq!(out.report.l2norm, 0.0);
    }
}
