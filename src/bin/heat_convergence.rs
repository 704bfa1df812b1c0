// src/bin/heat_convergence.rs
//
// Grid-refinement study: fixed step count (so fixed dt and total time),
// increasing n. The L2 error against the manufactured solution should drop
// with every refinement.
//
// Run:
//   cargo run --release --bin heat_convergence
//   cargo run --release --bin heat_convergence -- steps=50 ns=32,64,128 threads=4
//
// Output:
//   out/heat_convergence/
//     ├── config.json        (coarsest case)
//     └── convergence.csv

use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::Path;

use heat_sim::config::RunConfig;
use heat_sim::driver::run;
use heat_sim::exec::{Executor, ThreadPoolExecutor};
use heat_sim::params::ProblemParams;
use heat_sim::{Result, logging};

fn parse_list(v: &str) -> Option<Vec<usize>> {
    v.split(',').map(|s| s.trim().parse::<usize>().ok()).collect()
}

fn main() -> Result<()> {
    logging::init_logging(None);

    let mut nsteps: usize = 20;
    let mut ns: Vec<usize> = vec![16, 32, 64, 128, 256];
    let mut threads: usize = 0;

    for arg in std::env::args().skip(1) {
        if let Some(v) = arg.strip_prefix("steps=") {
            match v.parse::<usize>() {
                Ok(s) if s > 0 => nsteps = s,
                _ => eprintln!("Warning: could not parse steps value '{v}', ignoring"),
            }
            continue;
        }
        if let Some(v) = arg.strip_prefix("ns=") {
            match parse_list(v) {
                Some(list) if !list.is_empty() && list.iter().all(|&n| n > 0) => ns = list,
                _ => eprintln!("Warning: could not parse ns list '{v}', ignoring"),
            }
            continue;
        }
        if let Some(v) = arg.strip_prefix("threads=") {
            threads = v.parse::<usize>().unwrap_or(0);
            continue;
        }
        eprintln!("Warning: ignoring unknown argument '{arg}'");
    }
    ns.sort_unstable();
    ns.dedup();

    let exec = ThreadPoolExecutor::new(threads)?;

    let out_dir = Path::new("out").join("heat_convergence");
    create_dir_all(&out_dir)?;

    let coarsest = ProblemParams::new(ns[0], nsteps)?;
    RunConfig::new(&coarsest, "heat_convergence", "convergence", &exec.name(), exec.lanes())
        .write_to_dir(&out_dir)?;

    let mut w = BufWriter::new(File::create(out_dir.join("convergence.csv"))?);
    writeln!(w, "n,dx,r,l2norm,ratio")?;

    println!("{:>6} {:>14} {:>12} {:>14} {:>8}", "n", "dx", "r", "l2norm", "ratio");

    let mut prev: Option<f64> = None;
    for &n in &ns {
        let params = ProblemParams::new(n, nsteps)?;
        let outcome = run(&exec, params);
        let norm = outcome.report.l2norm;
        let ratio = prev.map(|p| p / norm).unwrap_or(f64::NAN);

        writeln!(
            w,
            "{},{:.16e},{:.16e},{:.16e},{:.6}",
            n,
            params.dx(),
            params.r(),
            norm,
            ratio
        )?;
        println!(
            "{:>6} {:>14.6e} {:>12.4e} {:>14.6e} {:>8.3}",
            n,
            params.dx(),
            params.r(),
            norm,
            ratio
        );

        if let Some(p) = prev {
            if norm >= p {
                log::warn!("L2 error did not decrease from n = {} (prev {:.3e}, now {:.3e})", n, p, norm);
            }
        }
        prev = Some(norm);
    }
    w.flush()?;

    println!("Wrote out/heat_convergence/convergence.csv");
    Ok(())
}
