// src/report.rs
//
// Plain-text run report written to stdout by the `heat-sim` binary.

use std::io::{self, Write};

use crate::driver::RunReport;
use crate::params::ProblemParams;

pub const LINE: &str = "--------------------";

pub fn write_problem_input<W: Write>(w: &mut W, p: &ProblemParams, device: &str) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, " MMS heat equation")?;
    writeln!(w)?;
    writeln!(w, "{LINE}")?;
    writeln!(w, "Problem input")?;
    writeln!(w)?;
    writeln!(w, " Grid size: {} x {}", p.n, p.n)?;
    writeln!(w, " Cell width: {}", p.dx())?;
    writeln!(w, " Grid length: {} x {}", p.length, p.length)?;
    writeln!(w)?;
    writeln!(w, " Alpha: {}", p.alpha)?;
    writeln!(w)?;
    writeln!(w, " Steps: {}", p.nsteps)?;
    writeln!(w, " Total time: {}", p.total_time())?;
    writeln!(w, " Time step: {}", p.dt())?;
    writeln!(w, " Device: {device}")?;
    writeln!(w, "{LINE}")
}

pub fn write_stability<W: Write>(w: &mut W, p: &ProblemParams) -> io::Result<()> {
    writeln!(w, "Stability")?;
    writeln!(w)?;
    writeln!(w, " r value: {}", p.r())?;
    if !p.is_stable() {
        writeln!(w, " Warning: unstable")?;
    }
    writeln!(w, "{LINE}")
}

pub fn write_results<W: Write>(w: &mut W, r: &RunReport) -> io::Result<()> {
    writeln!(w, "Results")?;
    writeln!(w)?;
    writeln!(w, "(L2norm): {:e}", r.l2norm)?;
    writeln!(w, "Solve time (s): {:.6}", r.solve_time_s)?;
    writeln!(w, "Total time (s): {:.6}", r.total_time_s)?;
    writeln!(w, "Bandwidth (GB/s): {:.3}", r.bandwidth_gb_s)?;
    writeln!(w, "{LINE}")
}
